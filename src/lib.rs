//! Assetgate - batch-first middleware between hosts and asset managers
//!
//! A host application talks to an asset management system through a
//! [`Manager`]. The asset management system plugs in by implementing
//! [`ManagerInterface`].
//!
//! # Quick Start
//!
//! ```ignore
//! use assetgate::{Except, ManagerFactory, ResolveAccess};
//!
//! let factory = ManagerFactory::new(registry);
//! let manager = factory.default_manager_from_config(Path::new("manager.toml"))?;
//!
//! let context = manager.create_context()?;
//! let reference = manager.create_entity_reference("mock://shot/010")?;
//! let data = manager.resolve_one(&reference, &traits, ResolveAccess::Read, &context, Except)?;
//! ```
//!
//! # Architecture
//!
//! - `assetgate-core`: data model (traits data, entity references, access
//!   modes, contexts) and the error taxonomy
//! - `assetgate-api`: the backend contract, the host-facing manager,
//!   pagers, configuration and the manager factory

pub use assetgate_api::*;
pub use assetgate_core::*;
