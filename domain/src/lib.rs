//! Domain layer for council-cli
//!
//! This crate contains the core entities and pure logic of the council
//! client. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A question is answered in three stages by a set of independent models:
//!
//! - **Stage 1**: every council model answers the question on its own
//! - **Stage 2**: each model ranks the anonymized answers of its peers
//! - **Stage 3**: a designated chairman model synthesizes one final answer
//!
//! ## Stream fold
//!
//! The backend reports progress as a stream of lifecycle events. The
//! [`reduce`] state machine folds that event sequence into a single evolving
//! [`AssistantMessage`], tolerating missing intermediate events and stopping
//! at the first terminal event.

pub mod conversation;
pub mod council;
pub mod stream;

// Re-export commonly used types
pub use conversation::entities::{Conversation, ConversationSummary, Message};
pub use council::deanonymize::{
    deanonymize_labels, deanonymize_text, format_average_rank, short_model_name,
};
pub use council::ranking::parse_ranking_from_text;
pub use council::stages::{
    AggregateRanking, CouncilMetadata, Stage1Response, Stage2Ranking, Stage3Synthesis,
};
pub use stream::event::{CouncilEvent, TitleData};
pub use stream::reducer::{AssistantMessage, CouncilPhase, ReducerEffect, reduce};
