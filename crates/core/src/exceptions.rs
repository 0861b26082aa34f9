//! Typed batch element exceptions
//!
//! A [`BatchElementError`] says *what* went wrong with one element of a
//! batch. A [`BatchElementException`] additionally says *where*: the index of
//! the element, and whatever the call site knew about it (the entity
//! reference, the access mode, the trait set or traits data involved).
//!
//! ## One kind per error code
//!
//! | ErrorCode | Kind | Optional context |
//! |-----------|------|------------------|
//! | unknown | [`UnknownException`] | |
//! | invalidEntityReference | [`InvalidEntityReferenceException`] | entity reference |
//! | malformedEntityReference | [`MalformedEntityReferenceException`] | entity reference |
//! | entityResolutionError | [`EntityResolutionException`] | entity reference |
//! | entityAccessError | [`EntityAccessException`] | entity reference, access |
//! | invalidTraitsData | [`InvalidTraitsDataException`] | entity reference, traits data |
//! | invalidPreflightHint | [`InvalidPreflightHintException`] | entity reference, traits data |
//! | invalidTraitSet | [`InvalidTraitSetException`] | entity reference, trait set |
//!
//! All kinds are built by [`BatchElementException::new`] from an
//! [`ErrorContext`]. Context fields a kind does not support are dropped.
//!
//! ## Message format
//!
//! ```text
//! <code>: <message> [index=<i>] [access=<a>] [entity=<ref>]
//! ```
//!
//! The descriptor message is omitted when empty; the access and entity
//! suffixes are present only when the call site supplied them. Field order
//! and bracket style are stable, so logs can be parsed.

use crate::access::Access;
use crate::batch_error::{BatchElementError, ErrorCode};
use crate::entity_ref::EntityReference;
use crate::traits_data::{TraitSet, TraitsData};
use thiserror::Error;

/// What the call site knows about a failed batch element
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorContext {
    /// Entity reference the element was about
    pub entity_reference: Option<EntityReference>,
    /// Access mode of the call
    pub access: Option<Access>,
    /// Trait set involved in the call
    pub trait_set: Option<TraitSet>,
    /// Traits data involved in the call
    pub traits_data: Option<TraitsData>,
}

impl ErrorContext {
    /// Empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an entity reference
    pub fn with_entity_reference(mut self, entity_reference: EntityReference) -> Self {
        self.entity_reference = Some(entity_reference);
        self
    }

    /// Attach an access mode
    pub fn with_access(mut self, access: impl Into<Access>) -> Self {
        self.access = Some(access.into());
        self
    }

    /// Attach a trait set
    pub fn with_trait_set(mut self, trait_set: TraitSet) -> Self {
        self.trait_set = Some(trait_set);
        self
    }

    /// Attach traits data
    pub fn with_traits_data(mut self, traits_data: TraitsData) -> Self {
        self.traits_data = Some(traits_data);
        self
    }
}

/// Build the message carried by every exception kind
fn exception_message(
    error: &BatchElementError,
    index: usize,
    access: Option<Access>,
    entity_reference: Option<&EntityReference>,
) -> String {
    let mut message = format!("{}:", error.code.name());
    if !error.message.is_empty() {
        message.push(' ');
        message.push_str(&error.message);
    }
    message.push_str(&format!(" [index={}]", index));
    if let Some(access) = access {
        message.push_str(&format!(" [access={}]", access.name()));
    }
    if let Some(entity_reference) = entity_reference {
        message.push_str(&format!(" [entity={}]", entity_reference));
    }
    message
}

/// Fallback for errors that fit no other kind
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct UnknownException {
    /// Index of the failed element
    pub index: usize,
    /// The error reported by the manager
    pub error: BatchElementError,
    message: String,
}

/// The entity reference is not known to the manager
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct InvalidEntityReferenceException {
    /// Index of the failed element
    pub index: usize,
    /// The error reported by the manager
    pub error: BatchElementError,
    /// Reference that was rejected
    pub entity_reference: Option<EntityReference>,
    message: String,
}

/// The entity reference is malformed for this operation
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct MalformedEntityReferenceException {
    /// Index of the failed element
    pub index: usize,
    /// The error reported by the manager
    pub error: BatchElementError,
    /// Reference that was rejected
    pub entity_reference: Option<EntityReference>,
    message: String,
}

/// Data for the entity could not be retrieved
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct EntityResolutionException {
    /// Index of the failed element
    pub index: usize,
    /// The error reported by the manager
    pub error: BatchElementError,
    /// Reference that failed to resolve
    pub entity_reference: Option<EntityReference>,
    message: String,
}

/// The access mode is not permitted for the entity
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct EntityAccessException {
    /// Index of the failed element
    pub index: usize,
    /// The error reported by the manager
    pub error: BatchElementError,
    /// Reference that was accessed
    pub entity_reference: Option<EntityReference>,
    /// Access mode that was refused
    pub access: Option<Access>,
    message: String,
}

/// The traits data supplied is not acceptable
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct InvalidTraitsDataException {
    /// Index of the failed element
    pub index: usize,
    /// The error reported by the manager
    pub error: BatchElementError,
    /// Reference the data was destined for
    pub entity_reference: Option<EntityReference>,
    /// The rejected data
    pub traits_data: Option<TraitsData>,
    message: String,
}

/// The preflight hint is not acceptable
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct InvalidPreflightHintException {
    /// Index of the failed element
    pub index: usize,
    /// The error reported by the manager
    pub error: BatchElementError,
    /// Reference the hint was destined for
    pub entity_reference: Option<EntityReference>,
    /// The rejected hint
    pub traits_data: Option<TraitsData>,
    message: String,
}

/// The trait set is not acceptable
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct InvalidTraitSetException {
    /// Index of the failed element
    pub index: usize,
    /// The error reported by the manager
    pub error: BatchElementError,
    /// Reference the trait set applied to
    pub entity_reference: Option<EntityReference>,
    /// The rejected trait set
    pub trait_set: Option<TraitSet>,
    message: String,
}

/// A per-element failure raised by an exception-style call
///
/// Exactly one variant exists per [`ErrorCode`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BatchElementException {
    /// See [`UnknownException`]
    #[error(transparent)]
    Unknown(UnknownException),
    /// See [`InvalidEntityReferenceException`]
    #[error(transparent)]
    InvalidEntityReference(InvalidEntityReferenceException),
    /// See [`MalformedEntityReferenceException`]
    #[error(transparent)]
    MalformedEntityReference(MalformedEntityReferenceException),
    /// See [`EntityAccessException`]
    #[error(transparent)]
    EntityAccess(EntityAccessException),
    /// See [`EntityResolutionException`]
    #[error(transparent)]
    EntityResolution(EntityResolutionException),
    /// See [`InvalidPreflightHintException`]
    #[error(transparent)]
    InvalidPreflightHint(InvalidPreflightHintException),
    /// See [`InvalidTraitSetException`]
    #[error(transparent)]
    InvalidTraitSet(InvalidTraitSetException),
    /// See [`InvalidTraitsDataException`]
    #[error(transparent)]
    InvalidTraitsData(InvalidTraitsDataException),
}

impl BatchElementException {
    /// Build the exception kind matching `error.code`
    ///
    /// The message is composed from the error, the index, and the access
    /// and entity reference in `context`. Context the kind cannot carry is
    /// dropped.
    pub fn new(index: usize, error: BatchElementError, context: &ErrorContext) -> Self {
        let message = exception_message(
            &error,
            index,
            context.access,
            context.entity_reference.as_ref(),
        );
        let entity_reference = context.entity_reference.clone();

        match error.code {
            ErrorCode::Unknown => BatchElementException::Unknown(UnknownException {
                index,
                error,
                message,
            }),
            ErrorCode::InvalidEntityReference => {
                BatchElementException::InvalidEntityReference(InvalidEntityReferenceException {
                    index,
                    error,
                    entity_reference,
                    message,
                })
            }
            ErrorCode::MalformedEntityReference => {
                BatchElementException::MalformedEntityReference(
                    MalformedEntityReferenceException {
                        index,
                        error,
                        entity_reference,
                        message,
                    },
                )
            }
            ErrorCode::EntityAccessError => {
                BatchElementException::EntityAccess(EntityAccessException {
                    index,
                    error,
                    entity_reference,
                    access: context.access,
                    message,
                })
            }
            ErrorCode::EntityResolutionError => {
                BatchElementException::EntityResolution(EntityResolutionException {
                    index,
                    error,
                    entity_reference,
                    message,
                })
            }
            ErrorCode::InvalidPreflightHint => {
                BatchElementException::InvalidPreflightHint(InvalidPreflightHintException {
                    index,
                    error,
                    entity_reference,
                    traits_data: context.traits_data.clone(),
                    message,
                })
            }
            ErrorCode::InvalidTraitSet => {
                BatchElementException::InvalidTraitSet(InvalidTraitSetException {
                    index,
                    error,
                    entity_reference,
                    trait_set: context.trait_set.clone(),
                    message,
                })
            }
            ErrorCode::InvalidTraitsData => {
                BatchElementException::InvalidTraitsData(InvalidTraitsDataException {
                    index,
                    error,
                    entity_reference,
                    traits_data: context.traits_data.clone(),
                    message,
                })
            }
        }
    }

    fn parts(&self) -> (usize, &BatchElementError, &str) {
        match self {
            BatchElementException::Unknown(e) => (e.index, &e.error, &e.message),
            BatchElementException::InvalidEntityReference(e) => (e.index, &e.error, &e.message),
            BatchElementException::MalformedEntityReference(e) => {
                (e.index, &e.error, &e.message)
            }
            BatchElementException::EntityAccess(e) => (e.index, &e.error, &e.message),
            BatchElementException::EntityResolution(e) => (e.index, &e.error, &e.message),
            BatchElementException::InvalidPreflightHint(e) => (e.index, &e.error, &e.message),
            BatchElementException::InvalidTraitSet(e) => (e.index, &e.error, &e.message),
            BatchElementException::InvalidTraitsData(e) => (e.index, &e.error, &e.message),
        }
    }

    /// Index of the failed element within the batch
    pub fn index(&self) -> usize {
        self.parts().0
    }

    /// The error reported by the manager
    pub fn error(&self) -> &BatchElementError {
        self.parts().1
    }

    /// Error code of the reported error
    pub fn code(&self) -> ErrorCode {
        self.parts().1.code
    }

    /// The composed exception message
    pub fn message(&self) -> &str {
        self.parts().2
    }

    /// Entity reference, for kinds that carry one
    pub fn entity_reference(&self) -> Option<&EntityReference> {
        match self {
            BatchElementException::Unknown(_) => None,
            BatchElementException::InvalidEntityReference(e) => e.entity_reference.as_ref(),
            BatchElementException::MalformedEntityReference(e) => e.entity_reference.as_ref(),
            BatchElementException::EntityAccess(e) => e.entity_reference.as_ref(),
            BatchElementException::EntityResolution(e) => e.entity_reference.as_ref(),
            BatchElementException::InvalidPreflightHint(e) => e.entity_reference.as_ref(),
            BatchElementException::InvalidTraitSet(e) => e.entity_reference.as_ref(),
            BatchElementException::InvalidTraitsData(e) => e.entity_reference.as_ref(),
        }
    }

    /// Access mode, for the access error kind
    pub fn access(&self) -> Option<Access> {
        match self {
            BatchElementException::EntityAccess(e) => e.access,
            _ => None,
        }
    }

    /// Trait set, for the invalid trait set kind
    pub fn trait_set(&self) -> Option<&TraitSet> {
        match self {
            BatchElementException::InvalidTraitSet(e) => e.trait_set.as_ref(),
            _ => None,
        }
    }

    /// Traits data, for the invalid traits data and preflight hint kinds
    pub fn traits_data(&self) -> Option<&TraitsData> {
        match self {
            BatchElementException::InvalidTraitsData(e) => e.traits_data.as_ref(),
            BatchElementException::InvalidPreflightHint(e) => e.traits_data.as_ref(),
            _ => None,
        }
    }
}
