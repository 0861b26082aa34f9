//! Convenience forms of the batch operations
//!
//! Every batch primitive on [`Manager`] has a `*_batch` and a `*_one`
//! form, each generic over an [`ErrorPolicy`] tag:
//!
//! | Form | Input | Success | Per-element error |
//! |------|-------|---------|-------------------|
//! | `*_one(.., Except)` | one element | `T` | `Err(Error::BatchElement)` |
//! | `*_one(.., Variant)` | one element | `Ok(T)` | `Err(BatchElementError)` inline |
//! | `*_batch(.., Except)` | N elements | `Vec<T>` | `Err` for the lowest failed index |
//! | `*_batch(.., Variant)` | N elements | `Vec<BatchElementResult<T>>` | inline per element |
//!
//! ## Ordering
//!
//! All callbacks are buffered by index until the backend returns, so the
//! order in which the backend reports elements never shows in the result.
//! In particular `*_batch(.., Except)` reports the failed element with the
//! lowest input index, whichever the backend reported first.
//!
//! ## Side effects
//!
//! The backend always processes the whole batch before any error is
//! raised. Nothing is rolled back: with `register_batch(.., Except)`, the
//! elements that succeeded are registered even though the call returns
//! `Err`.

use super::collect::collect;
use super::policy::ErrorPolicy;
use super::{single, Manager};
use crate::pager::EntityReferencePager;
use assetgate_core::{
    Context, DefaultEntityAccess, EntityReference, EntityTraitsAccess, ErrorContext,
    PublishingAccess, RelationsAccess, ResolveAccess, Result, TraitSet, TraitsData,
};
use std::slice;

impl Manager {
    // =========================================================================
    // entity_exists
    // =========================================================================

    /// Whether each referenced entity exists
    pub fn entity_exists_batch<P: ErrorPolicy>(
        &self,
        entity_references: &[EntityReference],
        context: &Context,
        policy: P,
    ) -> Result<Vec<P::Output<bool>>> {
        let collected = collect(entity_references.len(), |on_success, on_error| {
            self.entity_exists(entity_references, context, on_success, on_error)
        })?;
        self.settle_all(policy, collected, |index| {
            ErrorContext::new().with_entity_reference(entity_references[index].clone())
        })
    }

    /// Whether the referenced entity exists
    pub fn entity_exists_one<P: ErrorPolicy>(
        &self,
        entity_reference: &EntityReference,
        context: &Context,
        policy: P,
    ) -> Result<P::Output<bool>> {
        single(self.entity_exists_batch(slice::from_ref(entity_reference), context, policy)?)
    }

    // =========================================================================
    // entity_traits
    // =========================================================================

    /// Traits of each referenced entity
    pub fn entity_traits_batch<P: ErrorPolicy>(
        &self,
        entity_references: &[EntityReference],
        access: EntityTraitsAccess,
        context: &Context,
        policy: P,
    ) -> Result<Vec<P::Output<TraitSet>>> {
        let collected = collect(entity_references.len(), |on_success, on_error| {
            self.entity_traits(entity_references, access, context, on_success, on_error)
        })?;
        self.settle_all(policy, collected, |index| {
            ErrorContext::new()
                .with_entity_reference(entity_references[index].clone())
                .with_access(access)
        })
    }

    /// Traits of the referenced entity
    pub fn entity_traits_one<P: ErrorPolicy>(
        &self,
        entity_reference: &EntityReference,
        access: EntityTraitsAccess,
        context: &Context,
        policy: P,
    ) -> Result<P::Output<TraitSet>> {
        single(self.entity_traits_batch(
            slice::from_ref(entity_reference),
            access,
            context,
            policy,
        )?)
    }

    // =========================================================================
    // resolve
    // =========================================================================

    /// Property values of `trait_set` for each referenced entity
    pub fn resolve_batch<P: ErrorPolicy>(
        &self,
        entity_references: &[EntityReference],
        trait_set: &TraitSet,
        access: ResolveAccess,
        context: &Context,
        policy: P,
    ) -> Result<Vec<P::Output<TraitsData>>> {
        let collected = collect(entity_references.len(), |on_success, on_error| {
            self.resolve(
                entity_references,
                trait_set,
                access,
                context,
                on_success,
                on_error,
            )
        })?;
        self.settle_all(policy, collected, |index| {
            ErrorContext::new()
                .with_entity_reference(entity_references[index].clone())
                .with_access(access)
                .with_trait_set(trait_set.clone())
        })
    }

    /// Property values of `trait_set` for the referenced entity
    pub fn resolve_one<P: ErrorPolicy>(
        &self,
        entity_reference: &EntityReference,
        trait_set: &TraitSet,
        access: ResolveAccess,
        context: &Context,
        policy: P,
    ) -> Result<P::Output<TraitsData>> {
        single(self.resolve_batch(
            slice::from_ref(entity_reference),
            trait_set,
            access,
            context,
            policy,
        )?)
    }

    // =========================================================================
    // default_entity_reference
    // =========================================================================

    /// Default entity for each trait set
    pub fn default_entity_reference_batch<P: ErrorPolicy>(
        &self,
        trait_sets: &[TraitSet],
        access: DefaultEntityAccess,
        context: &Context,
        policy: P,
    ) -> Result<Vec<P::Output<Option<EntityReference>>>> {
        let collected = collect(trait_sets.len(), |on_success, on_error| {
            self.default_entity_reference(trait_sets, access, context, on_success, on_error)
        })?;
        self.settle_all(policy, collected, |index| {
            ErrorContext::new()
                .with_access(access)
                .with_trait_set(trait_sets[index].clone())
        })
    }

    /// Default entity for the trait set
    pub fn default_entity_reference_one<P: ErrorPolicy>(
        &self,
        trait_set: &TraitSet,
        access: DefaultEntityAccess,
        context: &Context,
        policy: P,
    ) -> Result<P::Output<Option<EntityReference>>> {
        single(self.default_entity_reference_batch(
            slice::from_ref(trait_set),
            access,
            context,
            policy,
        )?)
    }

    // =========================================================================
    // get_with_relationship / get_with_relationships
    // =========================================================================

    /// Pager over the entities related to each reference
    #[allow(clippy::too_many_arguments)]
    pub fn get_with_relationship_batch<P: ErrorPolicy>(
        &self,
        entity_references: &[EntityReference],
        relationship_traits_data: &TraitsData,
        result_trait_set: &TraitSet,
        page_size: usize,
        access: RelationsAccess,
        context: &Context,
        policy: P,
    ) -> Result<Vec<P::Output<EntityReferencePager>>> {
        let collected = collect(entity_references.len(), |on_success, on_error| {
            self.get_with_relationship(
                entity_references,
                relationship_traits_data,
                result_trait_set,
                page_size,
                access,
                context,
                on_success,
                on_error,
            )
        })?;
        self.settle_all(policy, collected, |index| {
            ErrorContext::new()
                .with_entity_reference(entity_references[index].clone())
                .with_access(access)
        })
    }

    /// Pager over the entities related to the reference
    #[allow(clippy::too_many_arguments)]
    pub fn get_with_relationship_one<P: ErrorPolicy>(
        &self,
        entity_reference: &EntityReference,
        relationship_traits_data: &TraitsData,
        result_trait_set: &TraitSet,
        page_size: usize,
        access: RelationsAccess,
        context: &Context,
        policy: P,
    ) -> Result<P::Output<EntityReferencePager>> {
        single(self.get_with_relationship_batch(
            slice::from_ref(entity_reference),
            relationship_traits_data,
            result_trait_set,
            page_size,
            access,
            context,
            policy,
        )?)
    }

    /// Pager per relationship over the entities related to one reference
    #[allow(clippy::too_many_arguments)]
    pub fn get_with_relationships_batch<P: ErrorPolicy>(
        &self,
        entity_reference: &EntityReference,
        relationship_traits_datas: &[TraitsData],
        result_trait_set: &TraitSet,
        page_size: usize,
        access: RelationsAccess,
        context: &Context,
        policy: P,
    ) -> Result<Vec<P::Output<EntityReferencePager>>> {
        let collected = collect(relationship_traits_datas.len(), |on_success, on_error| {
            self.get_with_relationships(
                entity_reference,
                relationship_traits_datas,
                result_trait_set,
                page_size,
                access,
                context,
                on_success,
                on_error,
            )
        })?;
        self.settle_all(policy, collected, |index| {
            ErrorContext::new()
                .with_entity_reference(entity_reference.clone())
                .with_access(access)
                .with_traits_data(relationship_traits_datas[index].clone())
        })
    }

    /// Pager over the entities related to one reference by one relationship
    #[allow(clippy::too_many_arguments)]
    pub fn get_with_relationships_one<P: ErrorPolicy>(
        &self,
        entity_reference: &EntityReference,
        relationship_traits_data: &TraitsData,
        result_trait_set: &TraitSet,
        page_size: usize,
        access: RelationsAccess,
        context: &Context,
        policy: P,
    ) -> Result<P::Output<EntityReferencePager>> {
        single(self.get_with_relationships_batch(
            entity_reference,
            slice::from_ref(relationship_traits_data),
            result_trait_set,
            page_size,
            access,
            context,
            policy,
        )?)
    }

    // =========================================================================
    // preflight / register
    // =========================================================================

    /// Working reference for each entity about to be published
    ///
    /// Under [`Except`](super::Except), preflights the backend completed
    /// for other elements are not undone.
    pub fn preflight_batch<P: ErrorPolicy>(
        &self,
        entity_references: &[EntityReference],
        traits_hints: &[TraitsData],
        access: PublishingAccess,
        context: &Context,
        policy: P,
    ) -> Result<Vec<P::Output<EntityReference>>> {
        let collected = collect(entity_references.len(), |on_success, on_error| {
            self.preflight(
                entity_references,
                traits_hints,
                access,
                context,
                on_success,
                on_error,
            )
        })?;
        self.settle_all(policy, collected, |index| {
            ErrorContext::new()
                .with_entity_reference(entity_references[index].clone())
                .with_access(access)
                .with_traits_data(traits_hints[index].clone())
        })
    }

    /// Working reference for an entity about to be published
    pub fn preflight_one<P: ErrorPolicy>(
        &self,
        entity_reference: &EntityReference,
        traits_hint: &TraitsData,
        access: PublishingAccess,
        context: &Context,
        policy: P,
    ) -> Result<P::Output<EntityReference>> {
        single(self.preflight_batch(
            slice::from_ref(entity_reference),
            slice::from_ref(traits_hint),
            access,
            context,
            policy,
        )?)
    }

    /// Publish data to each reference
    ///
    /// Under [`Except`](super::Except), entities the backend registered
    /// for other elements stay registered.
    pub fn register_batch<P: ErrorPolicy>(
        &self,
        entity_references: &[EntityReference],
        entity_traits_datas: &[TraitsData],
        access: PublishingAccess,
        context: &Context,
        policy: P,
    ) -> Result<Vec<P::Output<EntityReference>>> {
        let collected = collect(entity_references.len(), |on_success, on_error| {
            self.register(
                entity_references,
                entity_traits_datas,
                access,
                context,
                on_success,
                on_error,
            )
        })?;
        self.settle_all(policy, collected, |index| {
            ErrorContext::new()
                .with_entity_reference(entity_references[index].clone())
                .with_access(access)
                .with_traits_data(entity_traits_datas[index].clone())
        })
    }

    /// Publish data to the reference
    pub fn register_one<P: ErrorPolicy>(
        &self,
        entity_reference: &EntityReference,
        entity_traits_data: &TraitsData,
        access: PublishingAccess,
        context: &Context,
        policy: P,
    ) -> Result<P::Output<EntityReference>> {
        single(self.register_batch(
            slice::from_ref(entity_reference),
            slice::from_ref(entity_traits_data),
            access,
            context,
            policy,
        )?)
    }
}
