//! Scripted response templates for each conversation stage.
//!
//! Every response the engine emits comes from here — the LLM hook is
//! never consulted for the scripted flow.

/// Greeting shown before the first user turn and after a restart.
pub const GREETING: &str = "👋 Hello! I'm DMO Assist, your Document Management Organization \
assistant. I help collect and classify keywords used in different departments. What department \
do you work in?";

/// Fixed refusal emitted whenever the Topic Guard rejects an utterance
/// outside the initial stage.
pub const OFF_TOPIC_REFUSAL: &str = "I'm sorry, I can only help with collecting and classifying \
workplace keywords for document management. Please tell me about the words you commonly use in \
your work.";

/// Softer off-topic handling for the initial stage: refuse, but repeat
/// the department question instead of the generic refusal.
pub const OFF_TOPIC_INITIAL: &str = "I'm sorry, I can only help with collecting and classifying \
workplace keywords for document management. What department do you work in? (e.g., HR, Finance, \
IT, Marketing, etc.)";

/// Fallback for states the normal transitions can't reach (e.g. an empty
/// pending queue while classifying).
pub const FALLBACK: &str = "I'm sorry, I can only help with collecting and classifying workplace \
keywords for document management.";

/// Re-prompt when a collection round yields no usable words.
pub const COLLECT_REPROMPT: &str = "Please provide work-related words or terms you commonly use, \
separated by commas. For example: 'memo, report, evaluation, meeting'";

/// Prompt after "more" in the final options menu.
pub const MORE_WORDS: &str = "Please provide more words you commonly use, separated by commas:";

/// Menu shown when every pending word has been classified.
pub const ALL_CLASSIFIED: &str = "🎉 All words classified! Would you like to:\n\n1. Add more \
words\n2. Download the results\n3. Start over\n\nType 'more', 'download', or 'restart'";

/// Confirmation emitted when the user asks for a download.
pub const DOWNLOAD_READY: &str = "📁 Preparing your downloads...\n\nYour classified keywords are \
ready for download!";

/// Help text for unrecognized input in the final options menu.
pub const FINAL_OPTIONS_HELP: &str = "Please type 'more' to add more words, 'download' to get \
your results, or 'restart' to begin again.";

/// Department captured — ask for the first batch of terms.
pub fn department_confirmed(department: &str) -> String {
    format!(
        "Great! I see you work in {department}. As a {department} employee, what are some words \
         or terms you often write or use in your work? For example: 'memo', 'report', \
         'evaluation', 'policy', etc. Please list them separated by commas."
    )
}

/// Words collected — start the classification round.
pub fn collection_confirmed(words: &[String], first_word: &str) -> String {
    format!(
        "Thank you! I collected these words: {}\n\nNow, let's classify them. How would you \
         classify the word '{first_word}'? Please choose:\n\n1. **Internal** - Used within the \
         organization only\n2. **Public** - Can be shared publicly\n3. **Confidential** - \
         Sensitive information\n\nPlease type: Internal, Public, or Confidential",
        words.join(", ")
    )
}

/// One word classified, more remain.
pub fn word_classified_next(word: &str, label: &str, next_word: &str) -> String {
    format!(
        "✅ '{word}' classified as {label}.\n\nNext word: '{next_word}' - How would you classify \
         this? (Internal/Public/Confidential)"
    )
}

/// Invalid label — repeat the current word.
pub fn invalid_label(word: &str) -> String {
    format!("Please choose a valid classification for '{word}': Internal, Public, or Confidential")
}
