//! Topic Guard — keyword-heuristic gate deciding whether an utterance is
//! in scope for keyword collection.
//!
//! Deliberately shallow: case-insensitive substring containment against
//! two static marker sets, no whole-word matching and no semantics. A
//! marker appearing inside a longer word still counts ("explained"
//! contains "explain"). The coarseness is part of the observable
//! behavior; do not upgrade to smarter matching.

/// General-knowledge and small-talk markers that flag an utterance as
/// off-topic.
const OFF_TOPIC_MARKERS: &[&str] = &[
    "weather",
    "news",
    "joke",
    "story",
    "recipe",
    "music",
    "movie",
    "game",
    "sports",
    "politics",
    "religion",
    "health",
    "medical",
    "code",
    "programming",
    "math",
    "calculate",
    "translate",
    "how to",
    "what is",
    "who is",
    "when is",
    "where is",
    "why is",
    "help me",
    "can you",
    "tell me about",
    "explain",
];

/// Workplace-context markers that rescue an otherwise off-topic
/// utterance.
const WORK_MARKERS: &[&str] = &[
    "work",
    "job",
    "office",
    "document",
    "word",
    "term",
    "memo",
    "report",
    "department",
];

/// Classify an utterance as off-topic.
///
/// Off-topic iff it contains at least one off-topic marker and no work
/// marker. Stateless and side-effect-free.
pub fn is_off_topic(utterance: &str) -> bool {
    let input = utterance.to_lowercase();
    let has_off_topic = OFF_TOPIC_MARKERS.iter().any(|m| input.contains(m));
    let has_work_context = WORK_MARKERS.iter().any(|m| input.contains(m));
    has_off_topic && !has_work_context
}
