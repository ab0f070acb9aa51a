//! Session and classification data models.

use std::collections::VecDeque;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::state::Stage;

/// A sensitivity label applied to a collected word.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Classification {
    Internal,
    Public,
    Confidential,
}

impl Classification {
    /// Parse a user utterance into a label.
    ///
    /// Matching is case-insensitive via title-case normalization
    /// (`"internal"` → `Internal`) but otherwise exact — no partial or
    /// fuzzy matching.
    pub fn parse(utterance: &str) -> Option<Self> {
        match title_case(utterance.trim()).as_str() {
            "Internal" => Some(Self::Internal),
            "Public" => Some(Self::Public),
            "Confidential" => Some(Self::Confidential),
            _ => None,
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Internal => write!(f, "Internal"),
            Self::Public => write!(f, "Public"),
            Self::Confidential => write!(f, "Confidential"),
        }
    }
}

/// Title-case each whitespace-separated word (first letter upper, rest lower).
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One classified word record. Immutable once appended — reclassifying a
/// word means re-collecting it, which produces a second record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassifiedWord {
    pub word: String,
    pub classification: Classification,
    pub department: String,
    /// ISO-8601 / RFC 3339 timestamp of the moment of classification.
    pub timestamp: String,
}

impl ClassifiedWord {
    /// Build a record stamped with the current time.
    pub fn new(word: &str, classification: Classification, department: &str) -> Self {
        Self {
            word: word.to_string(),
            classification,
            department: department.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Who said a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the display-only chat transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        Self {
            role: Role::User,
            content: content.to_string(),
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: Role::Assistant,
            content: content.to_string(),
        }
    }
}

/// The whole conversation session. A plain value type: the engine takes
/// a Session in and hands a Session back, so there is no hidden
/// process-wide state and tests can drive it directly.
///
/// Lives for one conversation; an explicit restart replaces it wholesale
/// with `Session::default()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    /// Current engine stage. Mutated only by the engine.
    pub stage: Stage,
    /// Set once during the Initial stage; cleared only by restart.
    pub department: String,
    /// Every word ever collected, across all rounds. Append-only, never
    /// deduplicated.
    pub collected_words: Vec<String>,
    /// Words from the latest collection round still awaiting a label.
    pub pending_classification: VecDeque<String>,
    /// Append-only classification records.
    pub classified_words: Vec<ClassifiedWord>,
    /// Display transcript. Not read by the engine's transition logic.
    pub chat_history: Vec<ChatMessage>,
}

impl Session {
    /// Number of records classified so far (for progress display).
    pub fn classified_count(&self) -> usize {
        self.classified_words.len()
    }

    /// Number of words still awaiting a label (for progress display).
    pub fn pending_count(&self) -> usize {
        self.pending_classification.len()
    }
}
