//! Manager-facing contract
//!
//! The traits an asset management backend implements:
//!
//! - `capability`: Capability flags advertised by a manager
//! - `manager`: ManagerInterface, the batch-first backend contract
//! - `pager`: EntityReferencePagerInterface, the backend half of a paged query

pub mod capability;
pub mod manager;
pub mod pager;

pub use capability::Capability;
pub use manager::{ErrorCallback, ManagerInterface, PagerInterfacePtr, SuccessCallback};
pub use pager::EntityReferencePagerInterface;
