//! Prompt text rules
//!
//! Every prompt that leaves the process (agent input, image request text,
//! fallback caption) goes through [`truncate_prompt`], so downstream services
//! never see more than [`PROMPT_MAX_CHARS`] characters plus the ellipsis.

/// Maximum prompt length, in characters, embedded in downstream requests.
pub const PROMPT_MAX_CHARS: usize = 200;

/// Marker appended to truncated text.
pub const ELLIPSIS: &str = "...";

const ALLOWED_PUNCTUATION: &[char] = &['-', '.', ',', '!', '?', '_'];

fn is_allowed(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || ALLOWED_PUNCTUATION.contains(&c)
}

/// Cut `text` to at most `max_chars` characters, appending `...` when
/// anything was removed.
pub fn truncate_prompt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            let mut out = String::with_capacity(byte_idx + ELLIPSIS.len());
            out.push_str(&text[..byte_idx]);
            out.push_str(ELLIPSIS);
            out
        }
        None => text.to_string(),
    }
}

/// Local prompt sanitization used when the extraction service is unavailable.
///
/// Trims the input, strips everything outside ASCII letters, digits,
/// whitespace and `- . , ! ? _`, then caps the result at
/// [`PROMPT_MAX_CHARS`] characters.
pub fn sanitize_prompt(input: &str) -> String {
    let cleaned: String = input.trim().chars().filter(|c| is_allowed(*c)).collect();
    truncate_prompt(cleaned.trim(), PROMPT_MAX_CHARS)
}
