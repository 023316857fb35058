//! Chat text helpers: feedback prefixing, markup stripping, and log-safe
//! escaping of user-controlled strings.

/// Prefix prepended to every user-facing feedback message.
pub const PREFIX: &str = "[Skylands] ";

/// Prepend the system prefix to a feedback message.
pub fn apply_prefix(message: &str) -> String {
    format!("{}{}", PREFIX, message)
}

/// Strip `<...>` markup tags from a string, leaving only the visible text.
///
/// Name and title length ceilings are enforced against the stripped form, so
/// `<bold>Guide</bold>` counts as five characters. Unterminated tags are
/// dropped to the end of the string.
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Number of visible characters once markup tags are stripped.
pub fn visible_len(input: &str) -> usize {
    strip_tags(input).chars().count()
}

/// Escape a string for single-line logging:
/// - `\n` => `\\n`
/// - `\r` => `\\r`
/// - `\t` => `\\t`
/// - backslash => `\\\\`
///   Truncates very long strings with an ellipsis to cap log noise.
pub fn escape_log(s: &str) -> String {
    const MAX_PREVIEW: usize = 200;
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(&mut out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
