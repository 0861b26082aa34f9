//! Error policy tags
//!
//! Every convenience form takes a policy tag that fixes, at compile time,
//! how a per-element error is delivered:
//!
//! | Tag | `Output<T>` | Per-element error |
//! |-----|-------------|-------------------|
//! | [`Except`] | `T` | `Err(Error::BatchElement(..))` |
//! | [`Variant`] | `BatchElementResult<T>` | `Ok(Err(BatchElementError))` |
//!
//! ```ignore
//! let data: TraitsData = manager.resolve_one(&r, &traits, ResolveAccess::Read, &ctx, Except)?;
//! let outcome = manager.resolve_one(&r, &traits, ResolveAccess::Read, &ctx, Variant)?;
//! ```
//!
//! Structural failures (bad input, whole-batch backend failure) are always
//! returned as `Err`, whatever the tag. An element the manager never
//! reported is settled per element: `Except` raises [`Error::Unhandled`]
//! on reaching it, `Variant` yields an inline `unknown` error.

use assetgate_core::{
    BatchElementError, BatchElementException, Error, ErrorCode, ErrorContext, Result,
};

/// Per-element outcome: the value, or the error the manager reported
pub type BatchElementResult<T> = std::result::Result<T, BatchElementError>;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Except {}
    impl Sealed for super::Variant {}
}

/// Selects the return shape of a convenience form
///
/// Sealed: only [`Except`] and [`Variant`] exist.
pub trait ErrorPolicy: sealed::Sealed + Copy {
    /// What a successful call yields for one element
    type Output<T>;

    /// Turn one element's outcome into this policy's output
    ///
    /// `context` is only evaluated when an exception has to be built.
    fn settle<T>(
        self,
        index: usize,
        outcome: BatchElementResult<T>,
        context: impl FnOnce() -> ErrorContext,
    ) -> Result<Self::Output<T>>;

    /// Output for an element the manager never reported
    fn unreported<T>(self, message: String) -> Result<Self::Output<T>>;
}

/// Raise per-element errors as [`BatchElementException`]s
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Except;

/// Return per-element errors inline as [`BatchElementResult`]s
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Variant;

impl ErrorPolicy for Except {
    type Output<T> = T;

    fn settle<T>(
        self,
        index: usize,
        outcome: BatchElementResult<T>,
        context: impl FnOnce() -> ErrorContext,
    ) -> Result<T> {
        outcome.map_err(|error| BatchElementException::new(index, error, &context()).into())
    }

    fn unreported<T>(self, message: String) -> Result<T> {
        Err(Error::Unhandled(message))
    }
}

impl ErrorPolicy for Variant {
    type Output<T> = BatchElementResult<T>;

    fn settle<T>(
        self,
        _index: usize,
        outcome: BatchElementResult<T>,
        _context: impl FnOnce() -> ErrorContext,
    ) -> Result<BatchElementResult<T>> {
        Ok(outcome)
    }

    fn unreported<T>(self, message: String) -> Result<BatchElementResult<T>> {
        Ok(Err(BatchElementError::new(ErrorCode::Unknown, message)))
    }
}
