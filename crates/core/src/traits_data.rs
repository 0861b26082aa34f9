//! Trait/property container
//!
//! `TraitsData` is the payload type that moves entity metadata across the
//! manager boundary. It maps a trait identifier to that trait's property
//! dictionary:
//!
//! ```text
//! trait id ──▶ { property key ──▶ Value }
//! ```
//!
//! ## Semantics
//!
//! - Adding a trait that is already present is a no-op
//! - Reading a property of a trait that is NOT present is an error
//!   ([`Error::UnknownTrait`]); reading an unset property of a trait that
//!   IS present returns `Ok(None)`
//! - Setting a property implicitly adds its trait
//! - Equality is deep and independent of insertion order
//!
//! `Clone` is a deep copy. There is no interior mutability, so a clone
//! never observes mutations made to the original.

use crate::error::{Error, Result};
use crate::value::Value;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identifier of a trait, e.g. `"locatableContent"`.
pub type TraitId = String;

/// Key of a property within a trait.
pub type PropertyKey = String;

/// An unordered set of unique trait identifiers.
///
/// A `BTreeSet` so iteration, `Debug` output and exception messages are
/// deterministic.
pub type TraitSet = BTreeSet<TraitId>;

/// A list of trait sets, used for batch-first calls keyed by trait set.
pub type TraitSets = Vec<TraitSet>;

type Properties = FxHashMap<PropertyKey, Value>;

/// Per-entity trait and property store
///
/// # Example
///
/// ```
/// use assetgate_core::{TraitsData, Value};
///
/// let mut data = TraitsData::with_traits(["t1"]);
/// data.set_property("t2", "k", 42);
///
/// assert!(data.has_trait("t1"));
/// assert_eq!(data.get_property("t1", "k").unwrap(), None);
/// assert_eq!(data.get_property("t2", "k").unwrap(), Some(Value::Int(42)));
/// assert!(data.get_property("t3", "k").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraitsData {
    data: FxHashMap<TraitId, Properties>,
}

impl TraitsData {
    /// Create an empty container
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container holding the given traits, with no properties set
    pub fn with_traits<I, S>(trait_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TraitId>,
    {
        let mut data = Self::new();
        data.add_traits(trait_ids);
        data
    }

    /// The set of traits held by this container
    pub fn trait_set(&self) -> TraitSet {
        self.data.keys().cloned().collect()
    }

    /// Check whether the given trait is present
    pub fn has_trait(&self, trait_id: &str) -> bool {
        self.data.contains_key(trait_id)
    }

    /// Add a trait with no properties
    ///
    /// Existing properties are left untouched if the trait is already
    /// present.
    pub fn add_trait(&mut self, trait_id: impl Into<TraitId>) {
        self.data.entry(trait_id.into()).or_default();
    }

    /// Add several traits, see [`add_trait`](Self::add_trait)
    pub fn add_traits<I, S>(&mut self, trait_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<TraitId>,
    {
        for trait_id in trait_ids {
            self.add_trait(trait_id);
        }
    }

    /// Get the value of a property
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTrait`] if the trait is not present. An
    /// unset property on a present trait is `Ok(None)`.
    pub fn get_property(&self, trait_id: &str, key: &str) -> Result<Option<Value>> {
        let properties = self
            .data
            .get(trait_id)
            .ok_or_else(|| Error::UnknownTrait {
                trait_id: trait_id.to_string(),
            })?;
        Ok(properties.get(key).cloned())
    }

    /// Set the value of a property, adding the trait if it is missing
    pub fn set_property(
        &mut self,
        trait_id: impl Into<TraitId>,
        key: impl Into<PropertyKey>,
        value: impl Into<Value>,
    ) {
        self.data
            .entry(trait_id.into())
            .or_default()
            .insert(key.into(), value.into());
    }

    /// Keys of the properties set for a trait, sorted
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownTrait`] if the trait is not present.
    pub fn property_keys(&self, trait_id: &str) -> Result<Vec<PropertyKey>> {
        let properties = self
            .data
            .get(trait_id)
            .ok_or_else(|| Error::UnknownTrait {
                trait_id: trait_id.to_string(),
            })?;
        let mut keys: Vec<PropertyKey> = properties.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }

    /// Whether the container holds no traits
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A list of containers, used for batch-first calls keyed by traits data.
pub type TraitsDatas = Vec<TraitsData>;
