//! The assistant-message state machine.
//!
//! [`reduce`] folds the ordered stream of [`CouncilEvent`]s into one evolving
//! [`AssistantMessage`] and reports side effects the orchestrator must
//! perform (title refresh, send completion, stream failure).
//!
//! The fold is tolerant by contract: the producer's `*_start` cadence is not
//! guaranteed, so only `*_complete` payloads are required to populate stage
//! data. A terminal phase absorbs every later event unchanged.

use crate::council::deanonymize::{deanonymize_labels, deanonymize_text};
use crate::council::ranking::parse_ranking_from_text;
use crate::council::stages::{CouncilMetadata, Stage1Response, Stage2Ranking, Stage3Synthesis};
use crate::stream::event::CouncilEvent;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of an assistant message.
///
/// A single tagged state instead of per-stage boolean loading flags, so
/// impossible combinations (stage 1 and stage 3 loading at once) cannot be
/// represented.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CouncilPhase {
    #[default]
    Idle,
    Stage1Running,
    Stage1Done,
    Stage2Running,
    Stage2Done,
    Stage3Running,
    Stage3Done,
    Completed,
    Errored {
        message: String,
    },
}

impl CouncilPhase {
    /// Terminal phases accept no further events.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CouncilPhase::Completed | CouncilPhase::Errored { .. })
    }

    /// The stage currently awaiting results (1-3), if any.
    pub fn running_stage(&self) -> Option<u8> {
        match self {
            CouncilPhase::Stage1Running => Some(1),
            CouncilPhase::Stage2Running => Some(2),
            CouncilPhase::Stage3Running => Some(3),
            _ => None,
        }
    }
}

/// The single evolving assistant message for one council deliberation.
///
/// Starts empty in [`CouncilPhase::Idle`] when the user message is
/// submitted; stage fields fill in as `*_complete` events arrive; the
/// record is settled once the phase turns terminal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    #[serde(default)]
    pub phase: CouncilPhase,
    #[serde(default)]
    pub stage1: Vec<Stage1Response>,
    #[serde(default)]
    pub stage2: Vec<Stage2Ranking>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage3: Option<Stage3Synthesis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<CouncilMetadata>,
}

impl AssistantMessage {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while any stage is awaiting results.
    pub fn is_loading(&self) -> bool {
        self.phase.running_stage().is_some()
    }

    /// Settle the record (used for replies that arrive fully populated).
    pub fn completed(mut self) -> Self {
        self.phase = CouncilPhase::Completed;
        self
    }
}

/// Side effects the orchestrator must perform after applying an event.
#[derive(Debug, Clone, PartialEq)]
pub enum ReducerEffect {
    /// The server assigned a conversation title; the list must be refreshed.
    TitleAssigned(String),
    /// The deliberation finished normally.
    Finished,
    /// The producer reported a stream-level error.
    Failed(String),
}

/// Fold one event into the message state.
///
/// Pure: no I/O, no logging. Returns the next state plus an optional effect
/// for the orchestrator.
pub fn reduce(
    mut state: AssistantMessage,
    event: CouncilEvent,
) -> (AssistantMessage, Option<ReducerEffect>) {
    if state.phase.is_terminal() {
        return (state, None);
    }

    let effect = match event {
        CouncilEvent::Stage1Start => {
            state.phase = CouncilPhase::Stage1Running;
            None
        }
        CouncilEvent::Stage1Complete { data } => {
            state.stage1 = data;
            state.phase = CouncilPhase::Stage1Done;
            None
        }
        CouncilEvent::Stage2Start => {
            state.phase = CouncilPhase::Stage2Running;
            None
        }
        CouncilEvent::Stage2Complete { data, metadata } => {
            state.stage2 = data
                .into_iter()
                .map(|ranking| deanonymize_ranking(ranking, &metadata))
                .collect();
            state.metadata = Some(metadata);
            state.phase = CouncilPhase::Stage2Done;
            None
        }
        CouncilEvent::Stage3Start => {
            state.phase = CouncilPhase::Stage3Running;
            None
        }
        CouncilEvent::Stage3Complete { data } => {
            state.stage3 = Some(data);
            state.phase = CouncilPhase::Stage3Done;
            None
        }
        CouncilEvent::TitleComplete { data } => Some(ReducerEffect::TitleAssigned(data.title)),
        CouncilEvent::Complete => {
            state.phase = CouncilPhase::Completed;
            Some(ReducerEffect::Finished)
        }
        CouncilEvent::Error { message } => {
            state.phase = CouncilPhase::Errored {
                message: message.clone(),
            };
            Some(ReducerEffect::Failed(message))
        }
    };

    (state, effect)
}

/// Rewrite one Stage 2 ranking for display: anonymized labels become model
/// short names in both the raw text and the parsed order. A parsed order
/// missing from the payload is recovered from the text first.
fn deanonymize_ranking(mut ranking: Stage2Ranking, metadata: &CouncilMetadata) -> Stage2Ranking {
    let labels = ranking
        .parsed_ranking
        .take()
        .unwrap_or_else(|| parse_ranking_from_text(&ranking.ranking));
    ranking.parsed_ranking = Some(deanonymize_labels(&labels, &metadata.label_to_model));
    ranking.ranking = deanonymize_text(&ranking.ranking, &metadata.label_to_model);
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata_for(pairs: &[(&str, &str)]) -> CouncilMetadata {
        CouncilMetadata {
            label_to_model: pairs
                .iter()
                .map(|(label, model)| (label.to_string(), model.to_string()))
                .collect(),
            aggregate_rankings: Vec::new(),
        }
    }

    fn fold(events: Vec<CouncilEvent>) -> (AssistantMessage, Vec<ReducerEffect>) {
        let mut state = AssistantMessage::new();
        let mut effects = Vec::new();
        for event in events {
            let (next, effect) = reduce(state, event);
            state = next;
            effects.extend(effect);
        }
        (state, effects)
    }

    #[test]
    fn full_sequence_populates_every_stage() {
        let (state, effects) = fold(vec![
            CouncilEvent::Stage1Start,
            CouncilEvent::Stage1Complete {
                data: vec![Stage1Response::new("openai/gpt-4", "R1")],
            },
            CouncilEvent::Stage2Start,
            CouncilEvent::Stage2Complete {
                data: vec![Stage2Ranking::new(
                    "openai/gpt-4",
                    "FINAL RANKING:\n1. Response A",
                )],
                metadata: metadata_for(&[("Response A", "openai/gpt-4")]),
            },
            CouncilEvent::Stage3Start,
            CouncilEvent::Stage3Complete {
                data: Stage3Synthesis::new("chairman", "Final"),
            },
            CouncilEvent::Complete,
        ]);

        assert_eq!(state.phase, CouncilPhase::Completed);
        assert_eq!(state.stage1.len(), 1);
        assert_eq!(state.stage2.len(), 1);
        assert_eq!(state.stage3.as_ref().unwrap().response, "Final");
        assert!(!state.is_loading());
        assert_eq!(effects, vec![ReducerEffect::Finished]);
    }

    #[test]
    fn start_events_drive_running_phases() {
        let (state, _) = fold(vec![CouncilEvent::Stage1Start]);
        assert_eq!(state.phase.running_stage(), Some(1));
        assert!(state.is_loading());
    }

    #[test]
    fn complete_events_apply_without_start() {
        // The producer's cadence is not guaranteed; a lone stage2_complete
        // must still land.
        let (state, effects) = fold(vec![CouncilEvent::Stage2Complete {
            data: vec![Stage2Ranking::new("m1", "no labels here")],
            metadata: CouncilMetadata::default(),
        }]);

        assert_eq!(state.phase, CouncilPhase::Stage2Done);
        assert_eq!(state.stage2.len(), 1);
        assert!(effects.is_empty());
    }

    #[test]
    fn stage2_rankings_are_deanonymized() {
        let (state, _) = fold(vec![CouncilEvent::Stage2Complete {
            data: vec![Stage2Ranking::new(
                "judge",
                "FINAL RANKING:\n1. Response B\n2. Response A",
            )],
            metadata: metadata_for(&[
                ("Response A", "openai/gpt-4"),
                ("Response B", "anthropic/claude-sonnet"),
            ]),
        }]);

        let ranking = &state.stage2[0];
        assert!(ranking.ranking.contains("claude-sonnet"));
        assert!(ranking.ranking.contains("gpt-4"));
        assert!(!ranking.ranking.contains("Response A"));
        assert_eq!(
            ranking.parsed_ranking.as_deref().unwrap(),
            ["claude-sonnet", "gpt-4"]
        );
    }

    #[test]
    fn producer_parsed_ranking_is_preferred() {
        let (state, _) = fold(vec![CouncilEvent::Stage2Complete {
            data: vec![
                Stage2Ranking::new("judge", "free-form text mentioning Response B only")
                    .with_parsed_ranking(vec!["Response A".to_string()]),
            ],
            metadata: metadata_for(&[("Response A", "m/one"), ("Response B", "m/two")]),
        }]);

        assert_eq!(state.stage2[0].parsed_ranking.as_deref().unwrap(), ["one"]);
    }

    #[test]
    fn empty_metadata_leaves_ranking_text_alone() {
        let (state, _) = fold(vec![CouncilEvent::Stage2Complete {
            data: vec![Stage2Ranking::new("judge", "Response A wins")],
            metadata: CouncilMetadata::default(),
        }]);

        assert_eq!(state.stage2[0].ranking, "Response A wins");
    }

    #[test]
    fn title_yields_effect_without_touching_stages() {
        let (state, effects) = fold(vec![CouncilEvent::TitleComplete {
            data: crate::stream::event::TitleData {
                title: "Generated Title".to_string(),
            },
        }]);

        assert_eq!(state.phase, CouncilPhase::Idle);
        assert_eq!(
            effects,
            vec![ReducerEffect::TitleAssigned("Generated Title".to_string())]
        );
    }

    #[test]
    fn error_terminates_from_any_point() {
        let (state, effects) = fold(vec![CouncilEvent::Error {
            message: "boom".to_string(),
        }]);

        assert_eq!(
            state.phase,
            CouncilPhase::Errored {
                message: "boom".to_string()
            }
        );
        assert!(state.stage1.is_empty());
        assert!(state.stage2.is_empty());
        assert!(state.stage3.is_none());
        assert!(!state.is_loading());
        assert_eq!(effects, vec![ReducerEffect::Failed("boom".to_string())]);
    }

    #[test]
    fn events_after_terminal_are_ignored() {
        let (state, effects) = fold(vec![
            CouncilEvent::Complete,
            CouncilEvent::Stage1Complete {
                data: vec![Stage1Response::new("m1", "late")],
            },
            CouncilEvent::Error {
                message: "late error".to_string(),
            },
        ]);

        assert_eq!(state.phase, CouncilPhase::Completed);
        assert!(state.stage1.is_empty());
        assert_eq!(effects, vec![ReducerEffect::Finished]);
    }

    #[test]
    fn empty_event_sequence_means_untouched_state() {
        let (state, effects) = fold(Vec::new());
        assert_eq!(state, AssistantMessage::new());
        assert!(effects.is_empty());
    }

    #[test]
    fn phase_serialization_is_tagged() {
        let phase = CouncilPhase::Errored {
            message: "boom".to_string(),
        };
        let json = serde_json::to_value(&phase).unwrap();
        assert_eq!(json["state"], "errored");
        assert_eq!(json["message"], "boom");
    }
}
