use std::fmt;

/// Route registration error
///
/// Returned by [`Router::go`](crate::router::Router::go) and
/// [`Router::register`](crate::router::Router::register) when a route cannot
/// be stored. Registration is all-or-nothing: a rejected route is never
/// partially stored. Registration consumes the router, so callers that must
/// keep a built table across a fallible registration clone it first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// The supplied handler is not invocable
    ///
    /// Raised when a handler slot converts to no callable (for example an
    /// absent handler in a config-driven registration). The entry is never
    /// stored, so the route table only ever holds invocable handlers.
    InvalidHandler,
    /// The pattern could not be compiled into a matcher
    ///
    /// Raised when a pattern exceeds the size limits or produces an invalid
    /// regular expression. Mis-specified patterns surface here, at
    /// registration time, never at dispatch time.
    InvalidPattern {
        /// The pattern string as it was supplied
        pattern: String,
        /// Why compilation was rejected
        reason: String,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::InvalidHandler => {
                write!(
                    f,
                    "route registration error: handler is not invocable. \
                    The route was not stored."
                )
            }
            RouterError::InvalidPattern { pattern, reason } => {
                write!(
                    f,
                    "route registration error: invalid pattern '{}': {}",
                    pattern, reason
                )
            }
        }
    }
}

impl std::error::Error for RouterError {}
