//! Error types for the HTTP server.

/// Error kinds for server operations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum ServerErrorKind {
    /// Could not bind the listening socket
    #[display("Failed to bind {}", _0)]
    Bind(String),

    /// Server loop terminated with an error
    #[display("Server error: {}", _0)]
    Serve(String),

    /// No access password configured
    #[display("Access password not configured")]
    AuthNotConfigured,

    /// Request lacks the authentication cookie
    #[display("Unauthorized")]
    Unauthorized,

    /// Wrong password supplied to the auth endpoint
    #[display("Invalid password")]
    InvalidPassword,

    /// Malformed request
    #[display("Bad request: {}", _0)]
    BadRequest(String),

    /// No route matches the request path
    #[display("No route for {}", _0)]
    RouteNotFound(String),
}

/// Error wrapper with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Server Error: {} at line {} in {}", kind, line, file)]
pub struct ServerError {
    /// The error kind
    pub kind: ServerErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl ServerError {
    /// Create a new ServerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ServerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
