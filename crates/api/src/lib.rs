//! Host and manager API for assetgate
//!
//! This crate connects a host application to an asset manager backend:
//! - **Manager-facing contract** (`interface`): the batch-first traits a
//!   backend implements
//! - **Host-facing API** (`manager`): validation, capability checks and
//!   convenience forms over the backend
//!
//! ## Two-Layer Call Model
//!
//! ### Batch primitives
//!
//! Each entity operation takes N inputs and a success/error callback
//! pair. The backend reports each element exactly once, in any order.
//!
//! ### Convenience forms
//!
//! Every batch primitive has `*_one` and `*_batch` forms, generic over an
//! error policy tag (`Except` or `Variant`). They buffer callbacks by index
//! and return results in input order.
//!
//! ## Architectural Invariant
//!
//! Every convenience call makes exactly one batch primitive call.
//!
//! ## Module Structure
//!
//! - `interface`: ManagerInterface, EntityReferencePagerInterface, Capability
//! - `manager`: Manager, policy tags
//! - `pager`: EntityReferencePager
//! - `config`: TOML manager configuration
//! - `factory`: manager registry and factory
//! - `bridge`: foreign runtime handle table
//!
//! ## Quick Start
//!
//! ```ignore
//! use assetgate_api::{Except, Manager};
//! use assetgate_core::ResolveAccess;
//!
//! let manager = Manager::new(backend);
//! manager.initialize(Default::default())?;
//!
//! let context = manager.create_context()?;
//! let reference = manager.create_entity_reference("bal:///asset")?;
//! let data = manager.resolve_one(&reference, &traits, ResolveAccess::Read, &context, Except)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bridge;
pub mod config;
pub mod factory;
pub mod interface;
pub mod manager;
pub mod pager;

pub use bridge::{BridgeError, ForeignBridge, Handle, HandleTable};
pub use config::ManagerConfig;
pub use factory::{
    ManagerDetails, ManagerFactory, ManagerImplementationFactory, StaticManagerRegistry,
};
pub use interface::{
    Capability, EntityReferencePagerInterface, ErrorCallback, ManagerInterface, PagerInterfacePtr,
    SuccessCallback,
};
pub use manager::{
    BatchElementResult, ErrorPolicy, Except, Manager, Variant,
    INFO_KEY_ENTITY_REFERENCES_MATCH_PREFIX,
};
pub use pager::EntityReferencePager;
