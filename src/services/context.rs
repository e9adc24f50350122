// src/services/context.rs
use crate::message::HistoryEntry;

/// How many trailing history entries are considered when building a prompt.
pub const HISTORY_WINDOW: usize = 5;

/// Build the prompt sent to the model from the current message and the
/// client supplied history.
///
/// Only the last [`HISTORY_WINDOW`] entries are looked at. Entries that are
/// not turn records still occupy a slot in that window; they are skipped,
/// not back-filled with older turns. No overall length limit is applied.
pub fn build_prompt(message: &str, history: &[HistoryEntry]) -> String {
    let start = history.len().saturating_sub(HISTORY_WINDOW);

    let mut prompt = String::new();
    for turn in history[start..].iter().filter_map(HistoryEntry::as_turn) {
        prompt.push_str("User: ");
        prompt.push_str(&turn.user());
        prompt.push_str("\nAssistant: ");
        prompt.push_str(&turn.assistant());
        prompt.push('\n');
    }

    prompt.push_str("\nUser: ");
    prompt.push_str(message);
    prompt.push_str("\nAssistant:");
    prompt
}
