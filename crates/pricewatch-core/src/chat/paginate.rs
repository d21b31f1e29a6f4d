//! Packing of formatted entries into platform-sized messages.

/// Per-message character budget. Telegram caps messages at 4096 characters;
/// the budget leaves headroom below that.
pub const MAX_MESSAGE_CHARS: usize = 4000;

/// Pack `entries` into messages of at most `budget` characters each.
///
/// Entries are appended to a buffer in order. The buffer is flushed before
/// an entry that would push it over the budget, so no entry is ever split
/// across two messages. A single entry longer than the budget is truncated
/// to fit. Returns no messages for no entries.
pub fn paginate<I, S>(entries: I, budget: usize) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut messages = Vec::new();
    let mut buffer = String::new();
    let mut buffer_chars = 0;

    for entry in entries {
        let entry = entry.as_ref();
        let mut entry_chars = entry.chars().count();
        let entry = if entry_chars > budget {
            entry_chars = budget;
            truncate_chars(entry, budget)
        } else {
            entry
        };

        if buffer_chars + entry_chars > budget && !buffer.is_empty() {
            messages.push(std::mem::take(&mut buffer));
            buffer_chars = 0;
        }

        buffer.push_str(entry);
        buffer_chars += entry_chars;
    }

    if !buffer.is_empty() {
        messages.push(buffer);
    }

    messages
}

fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
