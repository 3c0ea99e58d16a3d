//! Codec for the "system actions" field of a turn.
//!
//! A turn's actions are persisted as a single string of comma-joined segments,
//! each normally wrapped in brackets so it may contain commas of its own:
//!
//! ```text
//! [Fetches inventory, filtered by SKU],[Creates draft order]
//! ```
//!
//! A comma only separates actions when it sits outside every bracket pair.
//! Brackets are kept on the decoded strings; [`display_action`] strips them for
//! presentation and [`format_actions`] puts them back.
//!
//! Actions that themselves contain literal `[` or `]` do not survive a round trip
//! unchanged. That is a property of the grammar, not something the codec repairs.

/// Splits an action field into its individual actions.
///
/// Bracket depth is tracked but never validated: a stray `]` drives the depth
/// negative and an unclosed `[` keeps it positive, and in both cases the
/// remaining text is still flushed as an action.
///
/// # Examples
///
/// ```
/// use parley_core::parse_actions;
///
/// assert_eq!(
///     parse_actions("[A, with comma],[B]"),
///     vec!["[A, with comma]".to_string(), "[B]".to_string()]
/// );
/// assert!(parse_actions("   ").is_empty());
/// ```
pub fn parse_actions(text: &str) -> Vec<String> {
    let mut actions = Vec::new();
    let mut current = String::new();
    let mut depth: i64 = 0;

    for ch in text.chars() {
        match ch {
            '[' => {
                depth += 1;
                current.push(ch);
            }
            ']' => {
                depth -= 1;
                current.push(ch);
            }
            ',' if depth == 0 => {
                flush(&mut current, &mut actions);
            }
            _ => current.push(ch),
        }
    }
    flush(&mut current, &mut actions);

    actions
}

fn flush(current: &mut String, actions: &mut Vec<String>) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        actions.push(trimmed.to_string());
    }
    current.clear();
}

/// Joins actions into a single field, wrapping each in brackets.
///
/// Actions are trimmed first. An action that already starts with `[` and ends
/// with `]` is written verbatim.
///
/// # Examples
///
/// ```
/// use parley_core::format_actions;
///
/// assert_eq!(format_actions(&["x", "[y]"]), "[x],[y]");
/// assert_eq!(format_actions::<&str>(&[]), "");
/// ```
pub fn format_actions<S: AsRef<str>>(actions: &[S]) -> String {
    actions
        .iter()
        .map(|action| {
            let trimmed = action.as_ref().trim();
            if is_wrapped(trimmed) {
                trimmed.to_string()
            } else {
                format!("[{}]", trimmed)
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Strips one outer bracket pair from a fully wrapped action.
///
/// ```
/// use parley_core::display_action;
///
/// assert_eq!(display_action("[Checks stock, east warehouse]"), "Checks stock, east warehouse");
/// assert_eq!(display_action("Checks stock"), "Checks stock");
/// ```
pub fn display_action(action: &str) -> &str {
    let trimmed = action.trim();
    if is_wrapped(trimmed) {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

fn is_wrapped(action: &str) -> bool {
    action.len() >= 2 && action.starts_with('[') && action.ends_with(']')
}

/// Result of checking the bracket nesting of an action field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum BracketBalance {
    /// Every `[` has a matching `]`
    #[display("balanced")]
    Balanced,
    /// Input ended with this many brackets still open
    #[display("{} unclosed bracket(s)", _0)]
    Unclosed(usize),
    /// A `]` with no matching `[` appeared at this character offset
    #[display("unmatched ']' at offset {}", _0)]
    Unopened(usize),
}

impl BracketBalance {
    /// Returns `true` for [`BracketBalance::Balanced`].
    pub fn is_balanced(&self) -> bool {
        matches!(self, BracketBalance::Balanced)
    }
}

/// Reports whether an action field nests its brackets cleanly.
///
/// Parsing never depends on this; callers use it to warn about text that
/// [`parse_actions`] will split in a surprising way.
pub fn bracket_balance(text: &str) -> BracketBalance {
    let mut depth = 0usize;
    for (offset, ch) in text.chars().enumerate() {
        match ch {
            '[' => depth += 1,
            ']' => {
                if depth == 0 {
                    return BracketBalance::Unopened(offset);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    if depth == 0 {
        BracketBalance::Balanced
    } else {
        BracketBalance::Unclosed(depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stray_closing_bracket_still_flushes() {
        // depth goes to -1 after "]", so the comma is treated as literal
        assert_eq!(parse_actions("a],b"), vec!["a],b".to_string()]);
    }

    #[test]
    fn unclosed_bracket_swallows_rest() {
        assert_eq!(
            parse_actions("[open, still open,[x]"),
            vec!["[open, still open,[x]".to_string()]
        );
    }

    #[test]
    fn empty_segments_are_dropped() {
        assert_eq!(
            parse_actions(" ,[a],, ,[b], "),
            vec!["[a]".to_string(), "[b]".to_string()]
        );
    }

    #[test]
    fn single_bracket_is_not_wrapped() {
        assert_eq!(format_actions(&["["]), "[[]");
        assert_eq!(display_action("["), "[");
    }
}
