//! Entity reference type
//!
//! An entity reference is the only handle a host holds on an entity. Its
//! string form is opaque and belongs to the manager that issued it.
//!
//! ## Validation
//!
//! Only the manager knows its reference grammar, so there is no free
//! standing validator here. Hosts obtain references through
//! `Manager::create_entity_reference`, which asks the manager (or checks its
//! advertised prefix) before wrapping the string. Backends construct the
//! references they return with [`EntityReference::new_unchecked`].
//!
//! Deserialization is the other unchecked path: a reference read back from
//! disk or the wire is whatever string was stored. Re-validate it with
//! `Manager::create_entity_reference(r.as_str())` when its origin is not
//! trusted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque reference to an entity
///
/// The wrapped string is immutable after construction. Holding one does not
/// prove a manager accepted it: [`EntityReference::new_unchecked`] and
/// `Deserialize` both wrap any string as is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityReference(String);

impl EntityReference {
    /// Wrap a string without asking the manager
    ///
    /// The caller must already know the string is a reference for the
    /// manager in question, e.g. because the manager itself produced it.
    /// Hosts holding untrusted input should go through the manager.
    pub fn new_unchecked(reference: impl Into<String>) -> Self {
        EntityReference(reference.into())
    }

    /// Get the reference as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for EntityReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of results from a relationship query
pub type EntityReferences = Vec<EntityReference>;
