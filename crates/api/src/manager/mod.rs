//! Host-facing manager
//!
//! [`Manager`] wraps a [`ManagerInterface`] for use by a host. It adds:
//!
//! - Input validation before the backend is reached (batch lengths,
//!   page sizes, entity reference strings)
//! - Capability checks at initialization
//! - A session-lifetime cache of the manager's entity reference prefix
//! - Convenience forms of every batch operation, see `conveniences`
//!
//! ## Module Structure
//!
//! - `policy`: Except / Variant error policy tags
//! - `collect`: index-keyed buffering of callback results
//! - `conveniences`: singular and batch forms per operation

mod collect;
mod conveniences;
pub mod policy;

pub use policy::{BatchElementResult, ErrorPolicy, Except, Variant};

use crate::interface::{
    Capability, ErrorCallback, ManagerInterface, PagerInterfacePtr, SuccessCallback,
};
use crate::pager::EntityReferencePager;
use assetgate_core::{
    Context, DefaultEntityAccess, EntityReference, EntityTraitsAccess, Error, ErrorContext,
    InfoDictionary, PolicyAccess, PublishingAccess, RelationsAccess, ResolveAccess, Result,
    StrMap, TraitSet, TraitsData, TraitsDatas, Value,
};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

/// Info key under which a manager advertises a static entity reference
/// prefix
///
/// When present, `is_entity_reference_string` becomes a local prefix check
/// and the backend is no longer consulted.
pub const INFO_KEY_ENTITY_REFERENCES_MATCH_PREFIX: &str = "entityReferencesMatchPrefix";

/// Host-facing access to one manager
///
/// One instance per manager connection. Cheap to share behind an `Arc`;
/// all methods take `&self`.
pub struct Manager {
    interface: Arc<dyn ManagerInterface>,
    /// Written by `initialize`, read by every reference check
    entity_reference_prefix: RwLock<Option<String>>,
}

impl std::fmt::Debug for Manager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("identifier", &self.interface.identifier())
            .field("entity_reference_prefix", &*self.entity_reference_prefix.read())
            .finish()
    }
}

impl Manager {
    /// Wrap a backend
    ///
    /// The manager must be [initialized](Self::initialize) before use.
    pub fn new(interface: Arc<dyn ManagerInterface>) -> Self {
        Manager {
            interface,
            entity_reference_prefix: RwLock::new(None),
        }
    }

    // =========================================================================
    // Identity and lifecycle
    // =========================================================================

    /// Unique identifier of the manager
    pub fn identifier(&self) -> String {
        self.interface.identifier()
    }

    /// Human readable name of the manager
    pub fn display_name(&self) -> String {
        self.interface.display_name()
    }

    /// Static information about the manager
    pub fn info(&self) -> InfoDictionary {
        self.interface.info()
    }

    /// Current settings of the manager
    pub fn settings(&self) -> Result<InfoDictionary> {
        self.interface.settings()
    }

    /// Initialize the manager with the given settings
    ///
    /// After the backend accepts the settings, checks that it has every
    /// required [`Capability`] and caches its entity reference prefix, if
    /// it advertises one.
    ///
    /// # Errors
    ///
    /// - Any error from the backend's own initialization
    /// - `Configuration` if required capabilities are missing
    pub fn initialize(&self, settings: InfoDictionary) -> Result<()> {
        // A failed re-initialization must not keep the old prefix
        *self.entity_reference_prefix.write() = None;
        self.interface.initialize(settings)?;

        let missing: Vec<&str> = Capability::REQUIRED
            .iter()
            .filter(|capability| !self.interface.has_capability(**capability))
            .map(|capability| capability.name())
            .collect();
        if !missing.is_empty() {
            return Err(Error::configuration(format!(
                "Manager implementation for '{}' does not support the required capabilities: {}",
                self.interface.identifier(),
                missing.join(", ")
            )));
        }

        let prefix = match self.interface.info().get(INFO_KEY_ENTITY_REFERENCES_MATCH_PREFIX) {
            Some(Value::String(prefix)) => {
                debug!(
                    target: "assetgate::manager",
                    prefix = %prefix,
                    "Entity reference prefix '{}' provided by manager's info() dict. \
                     Subsequent calls to is_entity_reference_string will use this prefix \
                     rather than call the manager's implementation.",
                    prefix
                );
                Some(prefix.clone())
            }
            Some(other) => {
                warn!(
                    target: "assetgate::manager",
                    value_type = other.type_name(),
                    "Entity reference prefix given but is an invalid type: should be a string."
                );
                None
            }
            None => None,
        };
        *self.entity_reference_prefix.write() = prefix;

        Ok(())
    }

    /// Whether the manager implements a group of operations
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.interface.has_capability(capability)
    }

    /// Ask the manager to substitute its own terms
    ///
    /// `terms` is not modified; the manager's version is returned.
    pub fn update_terminology(&self, terms: &StrMap) -> Result<StrMap> {
        self.interface.update_terminology(terms.clone())
    }

    /// Ask the manager to drop any cached data
    pub fn flush_caches(&self) -> Result<()> {
        self.interface.flush_caches()
    }

    /// How the manager handles each trait set, one result per input
    pub fn management_policy(
        &self,
        trait_sets: &[TraitSet],
        access: PolicyAccess,
        context: &Context,
    ) -> Result<TraitsDatas> {
        self.interface.management_policy(trait_sets, access, context)
    }

    // =========================================================================
    // Contexts
    // =========================================================================

    /// New context, with manager state if the manager is stateful
    pub fn create_context(&self) -> Result<Context> {
        let mut context = Context::new();
        if self.interface.has_capability(Capability::StatefulContexts) {
            context.manager_state = Some(self.interface.create_state()?);
        }
        Ok(context)
    }

    /// New context sharing the parent's locale
    ///
    /// If the parent holds manager state, the child holds a state derived
    /// from it by the manager.
    pub fn create_child_context(&self, parent: &Context) -> Result<Context> {
        let mut context = Context::with_locale(parent.locale.clone());
        if let Some(parent_state) = &parent.manager_state {
            context.manager_state = Some(self.interface.create_child_state(parent_state)?);
        }
        Ok(context)
    }

    /// Token from which the context's manager state can be restored
    ///
    /// Empty if the context holds no state.
    pub fn persistence_token_for_context(&self, context: &Context) -> Result<String> {
        match &context.manager_state {
            Some(state) => self.interface.persistence_token_for_state(state),
            None => Ok(String::new()),
        }
    }

    /// Context restored from a persistence token
    ///
    /// An empty token gives a context with no state.
    pub fn context_from_persistence_token(&self, token: &str) -> Result<Context> {
        let mut context = Context::new();
        if !token.is_empty() {
            context.manager_state = Some(self.interface.state_from_persistence_token(token)?);
        }
        Ok(context)
    }

    // =========================================================================
    // Entity references
    // =========================================================================

    /// Whether a string is a reference belonging to this manager
    ///
    /// Uses the cached prefix when the manager advertised one, without
    /// calling the backend.
    pub fn is_entity_reference_string(&self, some_string: &str) -> bool {
        if let Some(prefix) = self.entity_reference_prefix.read().as_deref() {
            return some_string.starts_with(prefix);
        }
        self.interface.is_entity_reference_string(some_string)
    }

    /// Validate and wrap an entity reference string
    ///
    /// # Errors
    ///
    /// `InputValidation` if the string is not a reference for this manager.
    pub fn create_entity_reference(
        &self,
        entity_reference_string: impl Into<String>,
    ) -> Result<EntityReference> {
        let entity_reference_string = entity_reference_string.into();
        if !self.is_entity_reference_string(&entity_reference_string) {
            return Err(Error::input_validation(format!(
                "Invalid entity reference: {}",
                entity_reference_string
            )));
        }
        Ok(EntityReference::new_unchecked(entity_reference_string))
    }

    /// Validate and wrap an entity reference string, if valid
    pub fn create_entity_reference_if_valid(
        &self,
        entity_reference_string: impl Into<String>,
    ) -> Option<EntityReference> {
        let entity_reference_string = entity_reference_string.into();
        if self.is_entity_reference_string(&entity_reference_string) {
            Some(EntityReference::new_unchecked(entity_reference_string))
        } else {
            None
        }
    }

    // =========================================================================
    // Batch primitives
    // =========================================================================

    /// Whether each referenced entity exists
    pub fn entity_exists(
        &self,
        entity_references: &[EntityReference],
        context: &Context,
        on_success: SuccessCallback<'_, bool>,
        on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        self.interface
            .entity_exists(entity_references, context, on_success, on_error)
    }

    /// Traits that make up each referenced entity's type
    pub fn entity_traits(
        &self,
        entity_references: &[EntityReference],
        access: EntityTraitsAccess,
        context: &Context,
        on_success: SuccessCallback<'_, TraitSet>,
        on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        self.interface
            .entity_traits(entity_references, access, context, on_success, on_error)
    }

    /// Property values of `trait_set` for each referenced entity
    pub fn resolve(
        &self,
        entity_references: &[EntityReference],
        trait_set: &TraitSet,
        access: ResolveAccess,
        context: &Context,
        on_success: SuccessCallback<'_, TraitsData>,
        on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        self.interface
            .resolve(entity_references, trait_set, access, context, on_success, on_error)
    }

    /// Default entity for each trait set
    ///
    /// `None` means the manager has no default for that trait set.
    pub fn default_entity_reference(
        &self,
        trait_sets: &[TraitSet],
        access: DefaultEntityAccess,
        context: &Context,
        on_success: SuccessCallback<'_, Option<EntityReference>>,
        on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        self.interface
            .default_entity_reference(trait_sets, access, context, on_success, on_error)
    }

    /// Entities related to each reference by one relationship
    ///
    /// # Errors
    ///
    /// `InputValidation` if `page_size` is zero.
    #[allow(clippy::too_many_arguments)]
    pub fn get_with_relationship(
        &self,
        entity_references: &[EntityReference],
        relationship_traits_data: &TraitsData,
        result_trait_set: &TraitSet,
        page_size: usize,
        access: RelationsAccess,
        context: &Context,
        on_success: SuccessCallback<'_, EntityReferencePager>,
        on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        validate_page_size(page_size)?;
        self.interface.get_with_relationship(
            entity_references,
            relationship_traits_data,
            result_trait_set,
            page_size,
            access,
            context,
            &mut |index: usize, pager: PagerInterfacePtr| {
                on_success(index, EntityReferencePager::new(pager))
            },
            on_error,
        )
    }

    /// Entities related to one reference by each of several relationships
    ///
    /// # Errors
    ///
    /// `InputValidation` if `page_size` is zero.
    #[allow(clippy::too_many_arguments)]
    pub fn get_with_relationships(
        &self,
        entity_reference: &EntityReference,
        relationship_traits_datas: &[TraitsData],
        result_trait_set: &TraitSet,
        page_size: usize,
        access: RelationsAccess,
        context: &Context,
        on_success: SuccessCallback<'_, EntityReferencePager>,
        on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        validate_page_size(page_size)?;
        self.interface.get_with_relationships(
            entity_reference,
            relationship_traits_datas,
            result_trait_set,
            page_size,
            access,
            context,
            &mut |index: usize, pager: PagerInterfacePtr| {
                on_success(index, EntityReferencePager::new(pager))
            },
            on_error,
        )
    }

    /// Announce intent to publish to each reference
    ///
    /// # Errors
    ///
    /// `InputValidation` if `traits_hints` is not the same length as
    /// `entity_references`.
    pub fn preflight(
        &self,
        entity_references: &[EntityReference],
        traits_hints: &[TraitsData],
        access: PublishingAccess,
        context: &Context,
        on_success: SuccessCallback<'_, EntityReference>,
        on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        validate_parallel_lengths(entity_references.len(), traits_hints.len(), "traits hints")?;
        self.interface
            .preflight(entity_references, traits_hints, access, context, on_success, on_error)
    }

    /// Publish data to each reference
    ///
    /// Elements the backend has already registered stay registered even if
    /// a later element fails.
    ///
    /// # Errors
    ///
    /// `InputValidation` if `entity_traits_datas` is not the same length as
    /// `entity_references`, or if the datas do not all share one trait set.
    pub fn register(
        &self,
        entity_references: &[EntityReference],
        entity_traits_datas: &[TraitsData],
        access: PublishingAccess,
        context: &Context,
        on_success: SuccessCallback<'_, EntityReference>,
        on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        validate_parallel_lengths(
            entity_references.len(),
            entity_traits_datas.len(),
            "traits datas",
        )?;
        validate_uniform_traits(entity_traits_datas)?;
        self.interface.register(
            entity_references,
            entity_traits_datas,
            access,
            context,
            on_success,
            on_error,
        )
    }

    // =========================================================================
    // Settling collected results
    // =========================================================================

    /// Apply `policy` to collected outcomes in input order
    ///
    /// Under [`Except`] this stops at the lowest failed index.
    fn settle_all<P: ErrorPolicy, T>(
        &self,
        policy: P,
        collected: Vec<Option<BatchElementResult<T>>>,
        error_context: impl Fn(usize) -> ErrorContext,
    ) -> Result<Vec<P::Output<T>>> {
        collected
            .into_iter()
            .enumerate()
            .map(|(index, slot)| match slot {
                Some(outcome) => policy.settle(index, outcome, || error_context(index)),
                None => policy.unreported(format!(
                    "Manager '{}' did not report a result for batch element {}.",
                    self.interface.identifier(),
                    index
                )),
            })
            .collect()
    }
}

fn validate_page_size(page_size: usize) -> Result<()> {
    if page_size == 0 {
        return Err(Error::input_validation("pageSize must be greater than zero."));
    }
    Ok(())
}

fn validate_parallel_lengths(references: usize, others: usize, what: &str) -> Result<()> {
    if references != others {
        return Err(Error::input_validation(format!(
            "Parameter lists must be of the same length: {} entity references vs. {} {}.",
            references, others, what
        )));
    }
    Ok(())
}

/// Every data in a register batch must carry the same traits
fn validate_uniform_traits(entity_traits_datas: &[TraitsData]) -> Result<()> {
    let Some((first, rest)) = entity_traits_datas.split_first() else {
        return Ok(());
    };
    let expected = first.trait_set();
    for (offset, data) in rest.iter().enumerate() {
        if data.trait_set() != expected {
            return Err(Error::input_validation(format!(
                "Mismatched traits at index {}",
                offset + 1
            )));
        }
    }
    Ok(())
}

/// Take the only element of a length-1 result
fn single<T>(outputs: Vec<T>) -> Result<T> {
    outputs
        .into_iter()
        .next()
        .ok_or_else(|| Error::unhandled("Manager returned no result for a single element."))
}
