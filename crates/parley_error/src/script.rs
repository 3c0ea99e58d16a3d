//! Script and playback error types.

/// Specific error conditions for decoding, editing and playing a script.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ScriptErrorKind {
    /// Speaker name is not one of the two known roles
    #[display("Unknown role '{}': expected 'AI Agent' or 'Merchant'", _0)]
    InvalidRole(String),
    /// Operation is not valid for the session's current state
    #[display("Invalid session state: {}", _0)]
    InvalidSessionState(String),
    /// Edit referenced a position outside the script
    #[display("Position {} is out of range for a script of {} turns", index, len)]
    PositionOutOfRange {
        /// Requested zero-based index
        index: usize,
        /// Number of turns in the script
        len: usize,
    },
}

/// Error type for script operations.
///
/// # Examples
///
/// ```
/// use parley_error::{ScriptError, ScriptErrorKind};
///
/// let err = ScriptError::new(ScriptErrorKind::InvalidRole("Narrator".to_string()));
/// assert!(format!("{}", err).contains("Narrator"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Script Error: {} at line {} in {}", kind, line, file)]
pub struct ScriptError {
    /// The specific error condition
    pub kind: ScriptErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ScriptError {
    /// Create a new ScriptError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ScriptErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
