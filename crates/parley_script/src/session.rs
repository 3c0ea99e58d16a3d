//! Per-conversation playback state.

use crate::{Advance, Script, Sequencer};
use parley_core::TurnRecord;
use parley_error::{ScriptError, ScriptErrorKind};
use tracing::{debug, info};

/// A loaded script plus the playback cursor over it.
///
/// The cursor is runtime state only. Loading or replacing the script always
/// rewinds it, because stored positions no longer match any cursor value.
#[derive(Debug, Clone, Default)]
pub struct Session {
    script: Option<Script>,
    sequencer: Sequencer,
}

impl Session {
    /// Creates a session with no script loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session that is already loaded with `script`.
    pub fn with_script(script: Script) -> Self {
        Self {
            script: Some(script),
            sequencer: Sequencer::new(),
        }
    }

    /// Whether a script has been loaded.
    pub fn is_loaded(&self) -> bool {
        self.script.is_some()
    }

    /// The loaded script, if any.
    pub fn script(&self) -> Option<&Script> {
        self.script.as_ref()
    }

    /// Current playback cursor.
    pub fn cursor(&self) -> usize {
        self.sequencer.cursor()
    }

    /// Decodes raw rows and replaces the script wholesale.
    ///
    /// Returns the number of playable turns. On error the previous script and
    /// cursor are left untouched.
    pub fn load_turns(&mut self, records: &[TurnRecord]) -> Result<usize, ScriptError> {
        let script = Script::from_records(records)?;
        let count = script.len();
        self.replace_script(script);
        Ok(count)
    }

    /// Replaces the script and rewinds the cursor.
    pub fn replace_script(&mut self, script: Script) {
        info!(turns = script.len(), "Loaded script into session");
        self.script = Some(script);
        self.sequencer.reset();
    }

    /// Encodes the loaded script back into raw rows.
    pub fn export_turns(&self) -> Result<Vec<TurnRecord>, ScriptError> {
        Ok(self.loaded()?.to_records())
    }

    /// Surfaces the next primary-role turn and its preview.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSessionState` when no script was ever loaded.
    pub fn advance(&mut self) -> Result<Advance, ScriptError> {
        let script = self.script.as_ref().ok_or_else(not_loaded)?;
        let step = self.sequencer.advance(script.turns());
        debug!(cursor = self.sequencer.cursor(), has_more = *step.has_more(), "Session advanced");
        Ok(step)
    }

    /// Rewinds playback to the first turn.
    pub fn reset(&mut self) {
        self.sequencer.reset();
    }

    fn loaded(&self) -> Result<&Script, ScriptError> {
        self.script.as_ref().ok_or_else(not_loaded)
    }
}

#[track_caller]
fn not_loaded() -> ScriptError {
    ScriptError::new(ScriptErrorKind::InvalidSessionState(
        "no script has been loaded for this session".to_string(),
    ))
}
