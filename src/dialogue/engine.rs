//! The dialogue engine — a pure transition function over the session.
//!
//! `step` consumes a [`Session`] plus one utterance and produces the next
//! session, the scripted response, and at most one side effect for the
//! host to carry out. Nothing here does I/O; exporting and rendering are
//! collaborator concerns.

use crate::guard::is_off_topic;

use super::model::{Classification, ClassifiedWord, Session};
use super::prompts;
use super::state::Stage;

/// A side effect the host must perform after a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideEffect {
    /// Export the classified records (the "download" command).
    Export,
    /// The session was destroyed and recreated (the "restart" command).
    Restart,
}

/// Result of one engine step.
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// The session after the transition.
    pub session: Session,
    /// The scripted response to show the user.
    pub response: String,
    /// Side effect for the host, if any.
    pub effect: Option<SideEffect>,
}

impl StepOutcome {
    fn reply(session: Session, response: impl Into<String>) -> Self {
        Self {
            session,
            response: response.into(),
            effect: None,
        }
    }
}

/// Split an utterance on commas into candidate terms.
///
/// Filtering is purely length-based: each piece is trimmed and kept only
/// if longer than 2 characters. No deduplication — listing "memo" twice
/// yields two independent entries.
pub fn split_terms(utterance: &str) -> Vec<String> {
    utterance
        .split(',')
        .map(str::trim)
        .filter(|piece| piece.chars().count() > 2)
        .map(String::from)
        .collect()
}

/// Move the session to `next`, checking the stage table.
fn transition(session: &mut Session, next: Stage) {
    debug_assert!(
        session.stage.can_transition_to(next),
        "invalid stage transition {} -> {}",
        session.stage,
        next
    );
    session.stage = next;
}

/// Advance the conversation by one utterance.
pub fn step(mut session: Session, utterance: &str) -> StepOutcome {
    // Off-topic input short-circuits everywhere except the initial
    // stage, which has softer handling below.
    if is_off_topic(utterance) && session.stage != Stage::Initial {
        tracing::debug!(stage = %session.stage, "off-topic utterance refused");
        return StepOutcome::reply(session, prompts::OFF_TOPIC_REFUSAL);
    }

    match session.stage {
        Stage::Initial => {
            if is_off_topic(utterance) {
                return StepOutcome::reply(session, prompts::OFF_TOPIC_INITIAL);
            }
            session.department = utterance.to_string();
            transition(&mut session, Stage::CollectWords);
            let response = prompts::department_confirmed(&session.department);
            tracing::info!(department = %session.department, "department captured");
            StepOutcome::reply(session, response)
        }

        Stage::CollectWords => {
            let words = split_terms(utterance);
            if words.is_empty() {
                return StepOutcome::reply(session, prompts::COLLECT_REPROMPT);
            }
            session.collected_words.extend(words.iter().cloned());
            session.pending_classification = words.iter().cloned().collect();
            transition(&mut session, Stage::ClassifyWords);
            let first = &words[0];
            let response = prompts::collection_confirmed(&words, first);
            tracing::info!(count = words.len(), "collected word batch");
            StepOutcome::reply(session, response)
        }

        Stage::ClassifyWords => {
            // Unreachable through normal transitions, but external session
            // tampering could empty the queue. Stay put and fall back.
            let Some(current_word) = session.pending_classification.front().cloned() else {
                tracing::warn!("classify stage reached with empty pending queue");
                return StepOutcome::reply(session, prompts::FALLBACK);
            };

            let Some(label) = Classification::parse(utterance) else {
                return StepOutcome::reply(session, prompts::invalid_label(&current_word));
            };

            session.pending_classification.pop_front();
            session.classified_words.push(ClassifiedWord::new(
                &current_word,
                label,
                &session.department,
            ));
            tracing::info!(word = %current_word, label = %label, "word classified");

            match session.pending_classification.front() {
                Some(next_word) => {
                    let response = prompts::word_classified_next(
                        &current_word,
                        &label.to_string(),
                        next_word,
                    );
                    StepOutcome::reply(session, response)
                }
                None => {
                    transition(&mut session, Stage::FinalOptions);
                    StepOutcome::reply(session, prompts::ALL_CLASSIFIED)
                }
            }
        }

        Stage::FinalOptions => {
            let option = utterance.to_lowercase();
            if option.contains("more") {
                transition(&mut session, Stage::CollectWords);
                StepOutcome::reply(session, prompts::MORE_WORDS)
            } else if option.contains("download") {
                StepOutcome {
                    session,
                    response: prompts::DOWNLOAD_READY.to_string(),
                    effect: Some(SideEffect::Export),
                }
            } else if option.contains("restart") {
                tracing::info!("session restart requested");
                StepOutcome {
                    session: Session::default(),
                    response: prompts::GREETING.to_string(),
                    effect: Some(SideEffect::Restart),
                }
            } else {
                StepOutcome::reply(session, prompts::FINAL_OPTIONS_HELP)
            }
        }
    }
}
