//! Per-element batch errors
//!
//! Most manager operations take a batch of inputs and report one outcome
//! per element through a pair of callbacks. A failure of a single element
//! is described by a [`BatchElementError`]: an [`ErrorCode`] for control
//! flow and a human readable message.
//!
//! A failure of the whole batch is NOT a `BatchElementError`; it is an
//! [`Error`](crate::Error) returned from the call itself.
//!
//! ## Ingestion of foreign codes
//!
//! Codes arriving from outside the type system (a deserialized payload, a
//! raw integer from another runtime) may lie outside the closed set.
//! [`BatchElementError::from_raw`] and the `Deserialize` impl never fail on
//! such input: they substitute [`ErrorCode::Unknown`] and record the
//! unrecognised value in the message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classes of per-element error
///
/// ## Invariant
///
/// This enum is closed and maps 1:1 onto the variants of
/// [`BatchElementException`](crate::BatchElementException).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[repr(u32)]
pub enum ErrorCode {
    /// Fallback for uncommon errors
    Unknown = 0,

    /// The entity reference is not one that is known to the manager
    InvalidEntityReference = 1,

    /// The entity reference is recognised but malformed for this
    /// particular operation, e.g. a required query parameter is missing
    MalformedEntityReference = 2,

    /// The reference is valid, but the requested access mode is not
    /// permitted for it (e.g. write access to a read-only entity)
    EntityAccessError = 3,

    /// The reference is valid, but data for the entity could not be
    /// retrieved
    EntityResolutionError = 4,

    /// The traits data supplied as a preflight hint is not acceptable
    InvalidPreflightHint = 5,

    /// The trait set supplied is not acceptable for the operation
    InvalidTraitSet = 6,

    /// The traits data supplied is not acceptable for the operation
    InvalidTraitsData = 7,
}

impl ErrorCode {
    /// All error codes (for iteration)
    pub const ALL: [ErrorCode; 8] = [
        ErrorCode::Unknown,
        ErrorCode::InvalidEntityReference,
        ErrorCode::MalformedEntityReference,
        ErrorCode::EntityAccessError,
        ErrorCode::EntityResolutionError,
        ErrorCode::InvalidPreflightHint,
        ErrorCode::InvalidTraitSet,
        ErrorCode::InvalidTraitsData,
    ];

    /// Name used in exception messages and serialized forms
    pub const fn name(&self) -> &'static str {
        match self {
            ErrorCode::Unknown => "unknown",
            ErrorCode::InvalidEntityReference => "invalidEntityReference",
            ErrorCode::MalformedEntityReference => "malformedEntityReference",
            ErrorCode::EntityAccessError => "entityAccessError",
            ErrorCode::EntityResolutionError => "entityResolutionError",
            ErrorCode::InvalidPreflightHint => "invalidPreflightHint",
            ErrorCode::InvalidTraitSet => "invalidTraitSet",
            ErrorCode::InvalidTraitsData => "invalidTraitsData",
        }
    }

    /// Numeric value of the code
    pub const fn value(&self) -> u32 {
        *self as u32
    }

    /// Look up a code by numeric value
    pub fn from_value(value: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|code| code.value() == value)
    }

    /// Look up a code by name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|code| code.name() == name)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Description of a single failed batch element
///
/// Carries no index or entity context; that is attached by the dispatch
/// layer when converting to a [`BatchElementException`](crate::BatchElementException).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawBatchElementError", into = "RawBatchElementError")]
pub struct BatchElementError {
    /// Error code indicating the class of error
    pub code: ErrorCode,
    /// Human readable error message
    pub message: String,
}

impl BatchElementError {
    /// Create a new error
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create an error from a raw numeric code
    ///
    /// Unrecognised codes become [`ErrorCode::Unknown`], with the message
    /// annotated to record the value that was received.
    pub fn from_raw(code: u32, message: impl Into<String>) -> Self {
        let message = message.into();
        match ErrorCode::from_value(code) {
            Some(code) => Self { code, message },
            None => {
                tracing::warn!(
                    target: "assetgate::manager",
                    code,
                    "Unrecognised batch element error code, treating as unknown"
                );
                let message = if message.is_empty() {
                    format!("Unrecognised error code {}", code)
                } else {
                    format!("Unrecognised error code {}: {}", code, message)
                };
                Self {
                    code: ErrorCode::Unknown,
                    message,
                }
            }
        }
    }
}

impl fmt::Display for BatchElementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Wire shape of a [`BatchElementError`], with the code as a plain integer
#[derive(Serialize, Deserialize)]
struct RawBatchElementError {
    code: u32,
    #[serde(default)]
    message: String,
}

impl From<RawBatchElementError> for BatchElementError {
    fn from(raw: RawBatchElementError) -> Self {
        BatchElementError::from_raw(raw.code, raw.message)
    }
}

impl From<BatchElementError> for RawBatchElementError {
    fn from(err: BatchElementError) -> Self {
        RawBatchElementError {
            code: err.code.value(),
            message: err.message,
        }
    }
}
