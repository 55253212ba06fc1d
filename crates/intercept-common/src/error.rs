//! Error types for OpenIntercept

use thiserror::Error;

/// OpenIntercept error type
///
/// Only the registration and configuration paths can fail; steady-state
/// lookups are total functions.
#[derive(Error, Debug)]
pub enum InterceptError {
    /// The registry has no description for the requested type
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// Registration was attempted on a non-concrete type
    #[error("not a concrete type: {0}")]
    NotConcrete(String),

    /// A configuration pattern was empty or had a non-trailing wildcard
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Result type for OpenIntercept
pub type InterceptResult<T> = Result<T, InterceptError>;
