//! Editable, densely numbered turn lists.

use parley_core::{Role, Turn, TurnRecord, bracket_balance, format_actions, parse_actions, renumber};
use parley_error::{ScriptError, ScriptErrorKind};
use tracing::{debug, warn};

/// An ordered list of turns whose positions are always 1..N.
///
/// Every mutation renumbers, so positions never need to be maintained by hand.
///
/// # Examples
///
/// ```
/// use parley_core::{Role, Turn};
/// use parley_script::Script;
///
/// let mut script = Script::default();
/// script.push(Turn::new(Role::AiAgent, "Hello"));
/// script.push(Turn::new(Role::AiAgent, "Anything else?"));
/// script.insert(1, Turn::new(Role::Merchant, "Hi!")).unwrap();
///
/// let positions: Vec<usize> = script.turns().iter().map(|t| *t.position()).collect();
/// assert_eq!(positions, vec![1, 2, 3]);
/// assert_eq!(script.turns()[1].text(), "Hi!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script {
    turns: Vec<Turn>,
}

impl Script {
    /// Wraps turns, renumbering them in the given order.
    pub fn new(mut turns: Vec<Turn>) -> Self {
        renumber(&mut turns);
        Self { turns }
    }

    /// Decodes raw rows in submitted order.
    ///
    /// Rows without a speaker or message are skipped. Submitted `turn` numbers
    /// are ignored in favour of row order.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRole` for the first row whose speaker is unknown.
    pub fn from_records(records: &[TurnRecord]) -> Result<Self, ScriptError> {
        let mut turns = Vec::with_capacity(records.len());
        for record in records {
            if record.is_blank() {
                debug!(turn = record.turn, "Skipping blank row");
                continue;
            }
            turns.push(Turn::from_record(record)?);
        }
        Ok(Self::new(turns))
    }

    /// Encodes every turn back into a raw row.
    pub fn to_records(&self) -> Vec<TurnRecord> {
        self.turns.iter().map(Turn::to_record).collect()
    }

    /// The turns, in order.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the script has no turns.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Appends a turn.
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
        renumber(&mut self.turns);
    }

    /// Inserts a turn before `index`; `index == len()` appends.
    pub fn insert(&mut self, index: usize, turn: Turn) -> Result<(), ScriptError> {
        if index > self.turns.len() {
            return Err(self.out_of_range(index));
        }
        self.turns.insert(index, turn);
        renumber(&mut self.turns);
        Ok(())
    }

    /// Removes and returns the turn at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Turn, ScriptError> {
        if index >= self.turns.len() {
            return Err(self.out_of_range(index));
        }
        let removed = self.turns.remove(index);
        renumber(&mut self.turns);
        Ok(removed)
    }

    /// Replaces the turn at `index`, returning the old one.
    pub fn replace(&mut self, index: usize, turn: Turn) -> Result<Turn, ScriptError> {
        if index >= self.turns.len() {
            return Err(self.out_of_range(index));
        }
        let old = std::mem::replace(&mut self.turns[index], turn);
        renumber(&mut self.turns);
        Ok(old)
    }

    /// Edits the turn at `index` in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use parley_core::{Role, Turn};
    /// use parley_script::Script;
    ///
    /// let mut script = Script::new(vec![Turn::new(Role::AiAgent, "Helo")]);
    /// script.update(0, |turn| turn.set_text("Hello")).unwrap();
    /// assert_eq!(script.turns()[0].text(), "Hello");
    /// ```
    pub fn update<F>(&mut self, index: usize, edit: F) -> Result<(), ScriptError>
    where
        F: FnOnce(&mut Turn),
    {
        if index >= self.turns.len() {
            return Err(self.out_of_range(index));
        }
        edit(&mut self.turns[index]);
        renumber(&mut self.turns);
        Ok(())
    }

    /// Moves the turn at `from` so that it ends up at index `to`.
    pub fn move_turn(&mut self, from: usize, to: usize) -> Result<(), ScriptError> {
        let len = self.turns.len();
        if from >= len {
            return Err(self.out_of_range(from));
        }
        if to >= len {
            return Err(self.out_of_range(to));
        }
        let turn = self.turns.remove(from);
        self.turns.insert(to, turn);
        renumber(&mut self.turns);
        Ok(())
    }

    fn out_of_range(&self, index: usize) -> ScriptError {
        ScriptError::new(ScriptErrorKind::PositionOutOfRange {
            index,
            len: self.turns.len(),
        })
    }
}

impl From<Script> for Vec<Turn> {
    fn from(script: Script) -> Self {
        script.turns
    }
}

/// Prepares edited rows for persistence.
///
/// Rows keep their submitted order and are renumbered 1..N. Each action field is
/// re-parsed and re-formatted so every action carries brackets. Blank rows are
/// kept (the editor may be mid-way through filling them in) but any row with a
/// speaker must name a known role. Unbalanced action text is logged, not
/// rejected.
///
/// # Errors
///
/// Returns `InvalidRole` for the first row with an unknown speaker.
pub fn reconcile_records(records: &[TurnRecord]) -> Result<Vec<TurnRecord>, ScriptError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| -> Result<TurnRecord, ScriptError> {
            let speaker = if record.speaker.trim().is_empty() {
                String::new()
            } else {
                record.speaker.parse::<Role>()?.as_str().to_string()
            };

            let balance = bracket_balance(&record.system_actions);
            if !balance.is_balanced() {
                warn!(
                    turn = index + 1,
                    balance = %balance,
                    actions = %record.system_actions,
                    "Saving action text with unbalanced brackets"
                );
            }

            Ok(TurnRecord {
                turn: u32::try_from(index + 1).unwrap_or(u32::MAX),
                speaker,
                message: record.message.clone(),
                system_actions: format_actions(&parse_actions(&record.system_actions)),
            })
        })
        .collect()
}
