//! Council deliberation value objects and pure text operations.
//!
//! Everything in this module is free of I/O: wire-level stage payloads,
//! ranking-text parsing, and label de-anonymization.

pub mod deanonymize;
pub mod ranking;
pub mod stages;

pub use stages::{
    AggregateRanking, CouncilMetadata, Stage1Response, Stage2Ranking, Stage3Synthesis,
};
