//! Council stage payloads.
//!
//! Wire-level value objects for the three deliberation stages and the
//! anonymization metadata that accompanies Stage 2.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One council member's answer from Stage 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage1Response {
    /// Model identifier (e.g., "openai/gpt-5.1").
    pub model: String,
    /// The model's full answer text.
    pub response: String,
}

impl Stage1Response {
    pub fn new(model: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            response: response.into(),
        }
    }
}

/// One council member's peer ranking from Stage 2.
///
/// `ranking` is the raw text the model produced. `parsed_ranking` is the
/// ordered list of anonymized labels extracted from it, when the producer
/// supplied one; the reducer recovers it from the text otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage2Ranking {
    pub model: String,
    pub ranking: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_ranking: Option<Vec<String>>,
}

impl Stage2Ranking {
    pub fn new(model: impl Into<String>, ranking: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ranking: ranking.into(),
            parsed_ranking: None,
        }
    }

    pub fn with_parsed_ranking(mut self, labels: Vec<String>) -> Self {
        self.parsed_ranking = Some(labels);
        self
    }
}

/// The chairman's synthesized final answer from Stage 3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage3Synthesis {
    pub model: String,
    pub response: String,
}

impl Stage3Synthesis {
    pub fn new(model: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            response: response.into(),
        }
    }
}

/// Per-model aggregate statistics computed across all Stage 2 rankings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRanking {
    pub model: String,
    /// Mean position across the rankings that mentioned this model (1 = best).
    pub average_rank: f64,
    /// Number of rankings this model appeared in.
    #[serde(default, alias = "votes_count")]
    pub rankings_count: u32,
}

/// Anonymization metadata delivered with `stage2_complete`.
///
/// `aggregate_rankings` keeps the server's order (sorted by average rank);
/// the client never re-sorts it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CouncilMetadata {
    /// Maps anonymized labels ("Response A") to model identifiers.
    #[serde(default)]
    pub label_to_model: HashMap<String, String>,
    #[serde(default)]
    pub aggregate_rankings: Vec<AggregateRanking>,
}

impl CouncilMetadata {
    pub fn is_empty(&self) -> bool {
        self.label_to_model.is_empty() && self.aggregate_rankings.is_empty()
    }
}
