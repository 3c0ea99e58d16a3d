//! Top-level error wrapper types.

use crate::{ConfigError, JsonError, ScriptError, ServerError, StorageError, TerminalError};

/// Every error a Parley crate can surface.
///
/// # Examples
///
/// ```
/// use parley_error::{ParleyError, StorageError, StorageErrorKind};
///
/// let storage_err = StorageError::new(StorageErrorKind::FileRead("index".to_string()));
/// let err: ParleyError = storage_err.into();
/// assert!(format!("{}", err).contains("Storage Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ParleyErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Script decoding, editing or playback error
    #[from(ScriptError)]
    Script(ScriptError),
    /// Persistence error
    #[from(StorageError)]
    Storage(StorageError),
    /// HTTP server error
    #[from(ServerError)]
    Server(ServerError),
    /// Terminal playback error
    #[from(TerminalError)]
    Terminal(TerminalError),
}

/// Parley error with kind discrimination.
///
/// # Examples
///
/// ```
/// use parley_error::{ConfigError, ParleyResult};
///
/// fn might_fail() -> ParleyResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Parley Error: {}", _0)]
pub struct ParleyError(Box<ParleyErrorKind>);

impl ParleyError {
    /// Create a new error from a kind.
    pub fn new(kind: ParleyErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ParleyErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to ParleyErrorKind
impl<T> From<T> for ParleyError
where
    T: Into<ParleyErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Parley operations.
pub type ParleyResult<T> = std::result::Result<T, ParleyError>;
