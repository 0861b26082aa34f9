//! Pager backend contract

use assetgate_core::{EntityReferences, Result};

/// Backend side of a paged relationship query
///
/// One instance is bound to one query. It is dropped when the host
/// releases the corresponding [`EntityReferencePager`](crate::EntityReferencePager);
/// implementations free any query resources in `Drop`.
pub trait EntityReferencePagerInterface: Send {
    /// Whether another page follows the current one
    ///
    /// May perform I/O.
    fn has_next(&mut self) -> Result<bool>;

    /// The current page
    ///
    /// Empty once the query is exhausted.
    fn get(&mut self) -> Result<EntityReferences>;

    /// Move to the next page
    fn next(&mut self) -> Result<()>;
}
