//! Error types for the manager middleware
//!
//! Two error channels exist and are kept apart:
//!
//! - **Structural errors** ([`Error`]): invalid input, misconfiguration,
//!   unimplemented optional behaviour, and backend failures. Raised
//!   before (or instead of) any per-element result.
//! - **Per-element batch errors** ([`BatchElementError`]): reported through
//!   error callbacks, one per failed element. They only become an
//!   [`Error::BatchElement`] when a caller asks for exception-style
//!   results.
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! [`BatchElementError`]: crate::BatchElementError

use crate::exceptions::BatchElementException;
use crate::traits_data::TraitId;
use thiserror::Error;

/// Result type alias for middleware operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the manager middleware
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input to a public API function is invalid for the requested
    /// operation (mismatched batch lengths, zero page size, rejected
    /// entity reference string, ...)
    #[error("{0}")]
    InputValidation(String),

    /// Externally supplied configuration is invalid, or a manager does
    /// not meet the requirements of the middleware
    #[error("{0}")]
    Configuration(String),

    /// An optional operation is not implemented by the manager
    #[error("{0}")]
    NotImplemented(String),

    /// A failure inside the manager backend that it did not report as a
    /// per-element error, or a breach of the callback contract
    #[error("{0}")]
    Unhandled(String),

    /// A property was queried on a trait that is not present
    #[error("Unknown trait: '{trait_id}'")]
    UnknownTrait {
        /// The trait that was queried
        trait_id: TraitId,
    },

    /// A per-element batch error raised by an exception-style convenience
    /// call
    #[error(transparent)]
    BatchElement(#[from] BatchElementException),
}

impl Error {
    /// Create an input validation error
    pub fn input_validation(msg: impl Into<String>) -> Self {
        Error::InputValidation(msg.into())
    }

    /// Create a configuration error
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration(msg.into())
    }

    /// Create a not-implemented error
    pub fn not_implemented(msg: impl Into<String>) -> Self {
        Error::NotImplemented(msg.into())
    }

    /// Create an unhandled backend error
    pub fn unhandled(msg: impl Into<String>) -> Self {
        Error::Unhandled(msg.into())
    }

    /// Whether this error is an input validation failure
    ///
    /// Configuration errors are a special case of input validation where
    /// the input came from external config rather than arguments.
    pub fn is_input_validation(&self) -> bool {
        matches!(self, Error::InputValidation(_) | Error::Configuration(_))
    }

    /// The batch element exception, if this error carries one
    pub fn as_batch_element(&self) -> Option<&BatchElementException> {
        match self {
            Error::BatchElement(exc) => Some(exc),
            _ => None,
        }
    }
}
