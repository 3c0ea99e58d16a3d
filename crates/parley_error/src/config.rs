//! Errors raised while assembling settings from `parley.toml` layers and
//! `PARLEY__*` environment overrides.

/// A settings file or override could not be read or does not fit `ParleyConfig`.
///
/// The message carries the underlying `config` crate error or a description of
/// the invalid value, e.g. a `[server]` host and port that do not form a
/// listen address.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// What went wrong, including the offending key or file when known
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Records a settings failure at the caller's location.
    ///
    /// # Examples
    ///
    /// ```
    /// use parley_error::ConfigError;
    ///
    /// let err = ConfigError::new("Invalid listen address not a host:3000: invalid socket address syntax");
    /// assert!(err.message.starts_with("Invalid listen address"));
    /// assert!(err.to_string().starts_with("Configuration Error:"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
