//! xylomyx-annotate: Candidate annotation and scoring.
//!
//! Classifies raw sequence metadata into enzyme annotations, scores tissue and
//! stage relevance, folds in homology evidence and blends the three signals
//! into one confidence per candidate.

pub mod classifier;
pub mod expression;
pub mod homology;
pub mod homology_provider;
pub mod pipeline;
pub mod statistics;

pub use classifier::EnzymeClassifier;
pub use expression::ExpressionScorer;
pub use homology::HomologyScorer;
pub use homology_provider::{HomologyProvider, MockHomologyProvider, StaticHitTable};
pub use pipeline::{AnnotationPipeline, PipelineReport};
pub use statistics::{AnnotationStatistics, CandidateOrder, ExpressionFilter, ExpressionStatistics};
