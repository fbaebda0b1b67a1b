//! xylomyx-common: Shared types, errors, and configuration used across all Xylomyx crates.

pub mod error;
pub mod entities;
pub mod confidence;
pub mod profile_config;

// Re-export commonly used types
pub use error::{Result, XylomyxError};
pub use entities::{
    Candidate, CandidateBatch, Classification, ConfidenceStep, DevelopmentalStage, EnzymeMatch,
    ExpressionProfile, HomologyHit, HomologyResult, PipelineStage, RawCandidate, RejectedRecord,
    RejectionReason, ScoredCandidate, TissueSubtype,
};
pub use confidence::{BlendWeights, ConfidenceEvidence, EvidenceWeights};
pub use profile_config::{
    DiscoveryProfile, EnzymeTypeSpec, HomologyThresholds, MatrixConfig, OrganismSpec, ScoringConfig, PRESET_NAMES,
};
