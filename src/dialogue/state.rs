//! Conversation stage state machine — tracks which phase of the keyword
//! collection flow the user is in.

use serde::{Deserialize, Serialize};

/// The stages of the keyword collection conversation.
///
/// The happy path runs Initial → CollectWords → ClassifyWords →
/// FinalOptions, and FinalOptions loops back into CollectWords ("more")
/// or returns to Initial via a full session restart. There is no
/// terminal stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Initial,
    CollectWords,
    ClassifyWords,
    FinalOptions,
}

impl Stage {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: Stage) -> bool {
        use Stage::*;
        matches!(
            (self, target),
            (Initial, CollectWords)
                | (CollectWords, ClassifyWords)
                | (ClassifyWords, FinalOptions)
                | (FinalOptions, CollectWords)
                | (FinalOptions, Initial)
        )
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::Initial
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Initial => "initial",
            Self::CollectWords => "collect_words",
            Self::ClassifyWords => "classify_words",
            Self::FinalOptions => "final_options",
        };
        write!(f, "{s}")
    }
}
