//! Core types for assetgate
//!
//! This crate defines the value types that cross the boundary between a
//! host and an asset manager:
//! - Value / TraitsData: trait and property payloads
//! - EntityReference: opaque manager-issued entity handle
//! - Access enums: per-operation access intent
//! - Context: locale and opaque manager state for a call
//! - BatchElementError: per-element error descriptor
//! - BatchElementException: typed per-element exceptions
//! - Error: structural error hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod access;
pub mod batch_error;
pub mod context;
pub mod entity_ref;
pub mod error;
pub mod exceptions;
pub mod traits_data;
pub mod value;

pub use access::{
    Access, DefaultEntityAccess, EntityTraitsAccess, PolicyAccess, PublishingAccess,
    RelationsAccess, ResolveAccess,
};
pub use batch_error::{BatchElementError, ErrorCode};
pub use context::{Context, ManagerState, ManagerStatePtr};
pub use entity_ref::{EntityReference, EntityReferences};
pub use error::{Error, Result};
pub use exceptions::{
    BatchElementException, EntityAccessException, EntityResolutionException, ErrorContext,
    InvalidEntityReferenceException, InvalidPreflightHintException, InvalidTraitSetException,
    InvalidTraitsDataException, MalformedEntityReferenceException, UnknownException,
};
pub use traits_data::{PropertyKey, TraitId, TraitSet, TraitSets, TraitsData, TraitsDatas};
pub use value::{InfoDictionary, StrMap, Value};
