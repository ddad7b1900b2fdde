//! Output cleaning for result payloads

use std::sync::LazyLock;

use regex::Regex;

/// Maximum number of characters of aggregate output kept in a result
pub const OUTPUT_TAIL_CHARS: usize = 5000;

// CSI sequences, OSC sequences (BEL or ST terminated) and two-byte escapes.
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)|\x1b[@-Z\\-_]")
        .expect("escape sequence pattern is valid")
});

/// Removes terminal escape sequences from `text`
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}

/// Returns the last `max_chars` characters of `text`
pub fn tail_chars(text: &str, max_chars: usize) -> &str {
    let total = text.chars().count();
    if total <= max_chars {
        return text;
    }

    match text.char_indices().nth(total - max_chars) {
        Some((offset, _)) => &text[offset..],
        None => "",
    }
}

/// Joins step outputs with newlines, strips escapes and keeps the tail
pub fn aggregate<'a, I>(outputs: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let joined = outputs.into_iter().collect::<Vec<_>>().join("\n");
    let cleaned = strip_ansi(&joined);
    tail_chars(&cleaned, OUTPUT_TAIL_CHARS).to_string()
}
