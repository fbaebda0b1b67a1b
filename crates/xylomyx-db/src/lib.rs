//! Xylomyx candidate store
//!
//! Persistence sink for scored candidates, run after the annotation pipeline
//! finishes. Records are keyed by accession with upsert semantics.
//!
//! # Example
//!
//! ```rust,no_run
//! use xylomyx_db::{CandidateQuery, CandidateStore, InMemoryCandidateStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = InMemoryCandidateStore::new();
//!     let top = store.query(&CandidateQuery::new().min_confidence(0.8).limit(10)).await?;
//!     println!("{} high-confidence candidates", top.len());
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod schema;
pub mod store;

pub use error::{DbError, Result};
pub use schema::{CandidateQuery, StoreStatistics, StoredCandidate};
pub use store::{BatchUpsertResult, CandidateStore, InMemoryCandidateStore, UpsertOutcome};
