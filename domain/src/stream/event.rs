//! Lifecycle events of a streamed council deliberation.
//!
//! Each SSE frame decodes into one [`CouncilEvent`]. Events for a given
//! message arrive in stage order (`stage1_*` before `stage2_*` before
//! `stage3_*`), with `title_complete` possible at any point and exactly one
//! of `complete` / `error` closing the sequence.

use crate::council::stages::{CouncilMetadata, Stage1Response, Stage2Ranking, Stage3Synthesis};
use serde::{Deserialize, Serialize};

/// Payload of the `title_complete` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleData {
    pub title: String,
}

/// One decoded lifecycle event from the council stream.
///
/// Wire form: `{"type": "<tag>", ...}` with snake_case tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CouncilEvent {
    Stage1Start,
    Stage1Complete {
        data: Vec<Stage1Response>,
    },
    Stage2Start,
    Stage2Complete {
        data: Vec<Stage2Ranking>,
        /// Tolerated when absent: de-anonymization becomes a no-op instead
        /// of dropping the whole event.
        #[serde(default)]
        metadata: CouncilMetadata,
    },
    Stage3Start,
    Stage3Complete {
        data: Stage3Synthesis,
    },
    TitleComplete {
        data: TitleData,
    },
    Complete,
    Error {
        message: String,
    },
}

impl CouncilEvent {
    /// Whether this event ends the message's lifecycle.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CouncilEvent::Complete | CouncilEvent::Error { .. })
    }

    /// The wire name of this event's type tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            CouncilEvent::Stage1Start => "stage1_start",
            CouncilEvent::Stage1Complete { .. } => "stage1_complete",
            CouncilEvent::Stage2Start => "stage2_start",
            CouncilEvent::Stage2Complete { .. } => "stage2_complete",
            CouncilEvent::Stage3Start => "stage3_start",
            CouncilEvent::Stage3Complete { .. } => "stage3_complete",
            CouncilEvent::TitleComplete { .. } => "title_complete",
            CouncilEvent::Complete => "complete",
            CouncilEvent::Error { .. } => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_start_events() {
        let event: CouncilEvent = serde_json::from_str(r#"{"type":"stage1_start"}"#).unwrap();
        assert_eq!(event, CouncilEvent::Stage1Start);
        assert!(!event.is_terminal());
    }

    #[test]
    fn decodes_stage1_complete_payload() {
        let event: CouncilEvent = serde_json::from_str(
            r#"{"type":"stage1_complete","data":[{"model":"m1","response":"R1"}]}"#,
        )
        .unwrap();
        match event {
            CouncilEvent::Stage1Complete { data } => {
                assert_eq!(data.len(), 1);
                assert_eq!(data[0].model, "m1");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn decodes_stage2_complete_with_metadata() {
        let event: CouncilEvent = serde_json::from_str(
            r#"{
                "type": "stage2_complete",
                "data": [{"model": "m1", "ranking": "FINAL RANKING:\n1. Response A"}],
                "metadata": {
                    "label_to_model": {"Response A": "m1"},
                    "aggregate_rankings": [{"model": "m1", "average_rank": 1.0, "rankings_count": 1}]
                }
            }"#,
        )
        .unwrap();
        match event {
            CouncilEvent::Stage2Complete { data, metadata } => {
                assert_eq!(data[0].model, "m1");
                assert_eq!(metadata.label_to_model["Response A"], "m1");
                assert_eq!(metadata.aggregate_rankings[0].rankings_count, 1);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn stage2_complete_tolerates_missing_metadata() {
        let event: CouncilEvent =
            serde_json::from_str(r#"{"type":"stage2_complete","data":[]}"#).unwrap();
        match event {
            CouncilEvent::Stage2Complete { metadata, .. } => assert!(metadata.is_empty()),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn terminal_events() {
        let complete: CouncilEvent = serde_json::from_str(r#"{"type":"complete"}"#).unwrap();
        assert!(complete.is_terminal());

        let error: CouncilEvent =
            serde_json::from_str(r#"{"type":"error","message":"boom"}"#).unwrap();
        assert!(error.is_terminal());
        assert_eq!(error, CouncilEvent::Error { message: "boom".to_string() });
    }

    #[test]
    fn unknown_type_fails_to_decode() {
        assert!(serde_json::from_str::<CouncilEvent>(r#"{"type":"mystery"}"#).is_err());
    }

    #[test]
    fn type_names_round_trip_the_tag() {
        let event: CouncilEvent =
            serde_json::from_str(r#"{"type":"title_complete","data":{"title":"T"}}"#).unwrap();
        assert_eq!(event.type_name(), "title_complete");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "title_complete");
    }
}
