//! xylomyx-ranker: Digestive enzyme matrix construction and ranking.
//!
//! Filters scored candidates by confidence, projects them into a flat ranked
//! table, summarises and clusters the table by biochemical function, and
//! exports it alongside a text report.

pub mod export;
pub mod function_map;
pub mod matrix;
pub mod ranking;
pub mod report;
pub mod summary;

pub use export::ExportFormat;
pub use function_map::{infer_function, Cluster};
pub use matrix::{MatrixBuilder, MatrixRow, RankedMatrix};
pub use ranking::RankCriterion;
pub use report::ReportOptions;
pub use summary::MatrixSummary;
