//! Manager backend contract
//!
//! `ManagerInterface` is what an asset management system implements to be
//! usable through a [`Manager`](crate::Manager). It is deliberately raw:
//! every entity operation is batch-first and reports per-element outcomes
//! through a success/error callback pair.
//!
//! ## Callback Contract
//!
//! For a batch of N inputs the backend must, before returning:
//! - call exactly one of `on_success` / `on_error` for every index `0..N`
//! - in any order
//! - at most once per index
//!
//! Returning `Err` means the whole batch failed. Callbacks already made
//! are discarded by the convenience forms in that case.
//!
//! ## Optional Operations
//!
//! Operations guarded by a [`Capability`] have default implementations
//! that return [`Error::NotImplemented`]. A backend overrides exactly the
//! groups it advertises through [`has_capability`](ManagerInterface::has_capability).

use super::capability::Capability;
use super::pager::EntityReferencePagerInterface;
use assetgate_core::{
    BatchElementError, Context, DefaultEntityAccess, EntityReference, EntityTraitsAccess, Error,
    InfoDictionary, ManagerStatePtr, PolicyAccess, PublishingAccess, RelationsAccess,
    ResolveAccess, Result, StrMap, TraitSet, TraitsData, TraitsDatas,
};

/// Callback receiving the value for one batch element
pub type SuccessCallback<'a, T> = &'a mut dyn FnMut(usize, T);

/// Callback receiving the error for one batch element
pub type ErrorCallback<'a> = &'a mut dyn FnMut(usize, BatchElementError);

/// Boxed pager handed out by relationship queries
pub type PagerInterfacePtr = Box<dyn EntityReferencePagerInterface>;

fn not_implemented(method: &str, capability: Capability) -> Error {
    Error::not_implemented(format!(
        "The '{}' method has not been implemented by the manager. Check manager \
         capability for {} by calling `has_capability`.",
        method,
        capability.name()
    ))
}

/// Backend contract of an asset manager
///
/// Implementations must be usable from several threads at once; any
/// mutable state is the implementation's own to synchronize.
pub trait ManagerInterface: Send + Sync {
    // =========================================================================
    // Identity and lifecycle
    // =========================================================================

    /// Unique identifier, e.g. `"org.example.manager"`
    fn identifier(&self) -> String;

    /// Human readable name
    fn display_name(&self) -> String;

    /// Static information about the manager
    ///
    /// Well-known keys are read by the middleware, see
    /// [`INFO_KEY_ENTITY_REFERENCES_MATCH_PREFIX`](crate::INFO_KEY_ENTITY_REFERENCES_MATCH_PREFIX).
    fn info(&self) -> InfoDictionary {
        InfoDictionary::new()
    }

    /// Current settings
    fn settings(&self) -> Result<InfoDictionary> {
        Ok(InfoDictionary::new())
    }

    /// Prepare for use with the given settings
    fn initialize(&self, settings: InfoDictionary) -> Result<()>;

    /// Whether the manager implements a group of operations
    fn has_capability(&self, capability: Capability) -> bool;

    /// Replace host terms with manager-specific ones
    fn update_terminology(&self, _terms: StrMap) -> Result<StrMap> {
        Err(not_implemented(
            "update_terminology",
            Capability::CustomTerminology,
        ))
    }

    /// Drop any cached data
    fn flush_caches(&self) -> Result<()> {
        Ok(())
    }

    // =========================================================================
    // Policy and state
    // =========================================================================

    /// How the manager handles each trait set, one result per input
    fn management_policy(
        &self,
        trait_sets: &[TraitSet],
        access: PolicyAccess,
        context: &Context,
    ) -> Result<TraitsDatas>;

    /// New state object for a fresh context
    fn create_state(&self) -> Result<ManagerStatePtr> {
        Err(not_implemented("create_state", Capability::StatefulContexts))
    }

    /// New state object for a child of a context holding `parent`
    fn create_child_state(&self, _parent: &ManagerStatePtr) -> Result<ManagerStatePtr> {
        Err(not_implemented(
            "create_child_state",
            Capability::StatefulContexts,
        ))
    }

    /// Token from which the state can later be restored
    fn persistence_token_for_state(&self, _state: &ManagerStatePtr) -> Result<String> {
        Err(not_implemented(
            "persistence_token_for_state",
            Capability::StatefulContexts,
        ))
    }

    /// Restore a state from a persistence token
    fn state_from_persistence_token(&self, _token: &str) -> Result<ManagerStatePtr> {
        Err(not_implemented(
            "state_from_persistence_token",
            Capability::StatefulContexts,
        ))
    }

    // =========================================================================
    // Entity references
    // =========================================================================

    /// Whether a string is a reference belonging to this manager
    ///
    /// Only syntax is checked; the entity need not exist.
    fn is_entity_reference_string(&self, some_string: &str) -> bool;

    // =========================================================================
    // Batch entity operations
    // =========================================================================

    /// Whether each referenced entity exists
    fn entity_exists(
        &self,
        _entity_references: &[EntityReference],
        _context: &Context,
        _on_success: SuccessCallback<'_, bool>,
        _on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        Err(not_implemented("entity_exists", Capability::ExistenceQueries))
    }

    /// Traits that make up each referenced entity's type
    fn entity_traits(
        &self,
        entity_references: &[EntityReference],
        access: EntityTraitsAccess,
        context: &Context,
        on_success: SuccessCallback<'_, TraitSet>,
        on_error: ErrorCallback<'_>,
    ) -> Result<()>;

    /// Property values of the given traits for each referenced entity
    fn resolve(
        &self,
        _entity_references: &[EntityReference],
        _trait_set: &TraitSet,
        _access: ResolveAccess,
        _context: &Context,
        _on_success: SuccessCallback<'_, TraitsData>,
        _on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        Err(not_implemented("resolve", Capability::Resolution))
    }

    /// Default entity for each trait set, if the manager has one
    fn default_entity_reference(
        &self,
        _trait_sets: &[TraitSet],
        _access: DefaultEntityAccess,
        _context: &Context,
        _on_success: SuccessCallback<'_, Option<EntityReference>>,
        _on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        Err(not_implemented(
            "default_entity_reference",
            Capability::DefaultEntityReferences,
        ))
    }

    /// Entities related to each reference by one relationship
    ///
    /// `page_size` is always non-zero.
    #[allow(clippy::too_many_arguments)]
    fn get_with_relationship(
        &self,
        _entity_references: &[EntityReference],
        _relationship_traits_data: &TraitsData,
        _result_trait_set: &TraitSet,
        _page_size: usize,
        _access: RelationsAccess,
        _context: &Context,
        _on_success: SuccessCallback<'_, PagerInterfacePtr>,
        _on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        Err(not_implemented(
            "get_with_relationship",
            Capability::RelationshipQueries,
        ))
    }

    /// Entities related to one reference by each of several relationships
    ///
    /// `page_size` is always non-zero.
    #[allow(clippy::too_many_arguments)]
    fn get_with_relationships(
        &self,
        _entity_reference: &EntityReference,
        _relationship_traits_datas: &[TraitsData],
        _result_trait_set: &TraitSet,
        _page_size: usize,
        _access: RelationsAccess,
        _context: &Context,
        _on_success: SuccessCallback<'_, PagerInterfacePtr>,
        _on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        Err(not_implemented(
            "get_with_relationships",
            Capability::RelationshipQueries,
        ))
    }

    /// Announce intent to publish, yielding working references
    ///
    /// `traits_hints` is index-aligned with `entity_references`.
    fn preflight(
        &self,
        _entity_references: &[EntityReference],
        _traits_hints: &[TraitsData],
        _access: PublishingAccess,
        _context: &Context,
        _on_success: SuccessCallback<'_, EntityReference>,
        _on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        Err(not_implemented("preflight", Capability::Publishing))
    }

    /// Publish data, yielding the references of the published entities
    ///
    /// `entity_traits_datas` is index-aligned with `entity_references`.
    fn register(
        &self,
        _entity_references: &[EntityReference],
        _entity_traits_datas: &[TraitsData],
        _access: PublishingAccess,
        _context: &Context,
        _on_success: SuccessCallback<'_, EntityReference>,
        _on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        Err(not_implemented("register", Capability::Publishing))
    }
}
