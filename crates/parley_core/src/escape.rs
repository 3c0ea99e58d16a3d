//! Newline escaping for flat-file storage.
//!
//! Message bodies are multi-line. Flat-file rows store each line break as the
//! two characters `\` `n` and restore it on load.

/// Replaces every line break with the two-character sequence `\n`.
///
/// ```
/// use parley_core::escape_newlines;
///
/// assert_eq!(escape_newlines("Hello\nthere"), "Hello\\nthere");
/// ```
pub fn escape_newlines(text: &str) -> String {
    text.replace('\n', "\\n")
}

/// Replaces every two-character sequence `\n` with a line break.
///
/// A literal backslash followed by `n` in the original text is indistinguishable
/// from an escaped line break and is also converted.
///
/// ```
/// use parley_core::unescape_newlines;
///
/// assert_eq!(unescape_newlines("Hello\\nthere"), "Hello\nthere");
/// ```
pub fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}
