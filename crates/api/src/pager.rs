//! Host-facing paged relationship results
//!
//! Relationship queries can match more entities than fit in one batch
//! result, so they return an [`EntityReferencePager`] per input element.
//!
//! ## State Machine
//!
//! ```text
//! Active ──advance()──▶ Active ── ... ──▶ Exhausted (get() returns empty)
//! ```
//!
//! The pager is neither `Clone` nor `Copy`: each instance is bound to one
//! query on the backend. Dropping it is the only release signal the
//! backend gets.

use crate::interface::PagerInterfacePtr;
use assetgate_core::{EntityReferences, Result};
use tracing::trace;

/// Cursor over pages of entity references
pub struct EntityReferencePager {
    inner: PagerInterfacePtr,
}

impl EntityReferencePager {
    /// Wrap a backend pager
    pub fn new(inner: PagerInterfacePtr) -> Self {
        EntityReferencePager { inner }
    }

    /// Whether another page follows the current one
    ///
    /// May call into the backend.
    pub fn has_next(&mut self) -> Result<bool> {
        self.inner.has_next()
    }

    /// The current page, empty once the query is exhausted
    pub fn get(&mut self) -> Result<EntityReferences> {
        self.inner.get()
    }

    /// Move to the next page
    pub fn advance(&mut self) -> Result<()> {
        self.inner.next()
    }
}

impl std::fmt::Debug for EntityReferencePager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityReferencePager").finish_non_exhaustive()
    }
}

impl Drop for EntityReferencePager {
    fn drop(&mut self) {
        trace!(target: "assetgate::pager", "Releasing entity reference pager");
    }
}
