//! Forward-only playback over a turn list.

use derive_getters::Getters;
use parley_core::{Role, Turn};
use tracing::debug;

/// Result of one [`Sequencer::advance`] call.
///
/// `current` is the next turn of the primary role. `preview` is the first
/// counter-party turn after it, offered as a suggested reply; it is not consumed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters)]
pub struct Advance {
    /// Next primary-role turn, if any remain
    current: Option<Turn>,
    /// First counter-party turn after `current`
    preview: Option<Turn>,
    /// Whether the cursor still points inside the script
    has_more: bool,
}

impl Advance {
    /// The "no more turns" result.
    pub fn finished() -> Self {
        Self::default()
    }

    /// Text of the current turn.
    pub fn current_text(&self) -> Option<&str> {
        self.current.as_ref().map(|t| t.text().as_str())
    }

    /// Role of the current turn.
    pub fn current_role(&self) -> Option<Role> {
        self.current.as_ref().map(|t| *t.role())
    }

    /// Actions of the current turn, empty when there is none.
    pub fn current_actions(&self) -> &[String] {
        self.current
            .as_ref()
            .map(|t| t.actions().as_slice())
            .unwrap_or(&[])
    }

    /// Text of the preview turn.
    pub fn preview_text(&self) -> Option<&str> {
        self.preview.as_ref().map(|t| t.text().as_str())
    }

    /// Role of the preview turn.
    pub fn preview_role(&self) -> Option<Role> {
        self.preview.as_ref().map(|t| *t.role())
    }
}

/// Cursor over a script that surfaces one primary-role turn per step.
///
/// # Examples
///
/// ```
/// use parley_core::{Role, Turn};
/// use parley_script::Sequencer;
///
/// let turns = vec![
///     Turn::new(Role::AiAgent, "a1"),
///     Turn::new(Role::Merchant, "m1"),
///     Turn::new(Role::AiAgent, "a2"),
/// ];
/// let mut sequencer = Sequencer::new();
///
/// let step = sequencer.advance(&turns);
/// assert_eq!(step.current_text(), Some("a1"));
/// assert_eq!(step.preview_text(), Some("m1"));
/// assert_eq!(sequencer.cursor(), 1);
/// assert!(*step.has_more());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sequencer {
    cursor: usize,
    primary: Role,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Sequencer {
    /// Creates a sequencer at cursor 0 whose primary role is the AI agent.
    pub fn new() -> Self {
        Self::with_primary(Role::AiAgent)
    }

    /// Creates a sequencer at cursor 0 for the given primary role.
    pub fn with_primary(primary: Role) -> Self {
        Self { cursor: 0, primary }
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Role whose turns are surfaced as `current`.
    pub fn primary(&self) -> Role {
        self.primary
    }

    /// Moves to the next primary-role turn at or after the cursor.
    ///
    /// The cursor lands just past the surfaced turn, not past the preview, so a
    /// previewed counter-party turn is scanned again on the next call.
    pub fn advance(&mut self, turns: &[Turn]) -> Advance {
        let counterpart = self.primary.counterpart();

        let Some(i) = find_from(turns, self.cursor, self.primary) else {
            debug!(cursor = self.cursor, len = turns.len(), "No further primary turn");
            return Advance::finished();
        };
        let j = find_from(turns, i + 1, counterpart);

        self.cursor = i + 1;
        debug!(current = i, preview = ?j, cursor = self.cursor, "Advanced");

        Advance {
            current: Some(turns[i].clone()),
            preview: j.map(|j| turns[j].clone()),
            has_more: self.cursor < turns.len(),
        }
    }

    /// Rewinds to the start of the script.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

fn find_from(turns: &[Turn], start: usize, role: Role) -> Option<usize> {
    turns
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, turn)| *turn.role() == role)
        .map(|(index, _)| index)
}
