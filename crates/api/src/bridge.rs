//! Foreign runtime handle bridge
//!
//! Another runtime (a scripting host, a C caller) cannot hold Rust values
//! directly. It holds opaque [`Handle`]s instead, each standing for one
//! `Arc` owned by a [`HandleTable`].
//!
//! ## Lifetime
//!
//! - `to_foreign` stores a strong reference: the object stays alive while
//!   the handle is live, even if every Rust-side owner is dropped
//! - `from_foreign` returns a new strong reference: the object stays alive
//!   while Rust holds it, even if the handle is released
//! - `release` drops the table's reference
//!
//! Handles are never reused within one table.

use dashmap::DashMap;
use rustc_hash::FxHasher;
use std::any::{type_name, Any};
use std::fmt;
use std::hash::BuildHasherDefault;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::trace;

/// Opaque reference held by the foreign runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(u64);

impl Handle {
    /// Raw value, for passing across an FFI boundary
    pub fn as_raw(&self) -> u64 {
        self.0
    }

    /// Rebuild a handle from its raw value
    ///
    /// Zero is the null handle.
    pub fn from_raw(raw: u64) -> Option<Self> {
        if raw == 0 {
            None
        } else {
            Some(Handle(raw))
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "handle#{}", self.0)
    }
}

/// Failures converting across the bridge
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// A null object was given for conversion to a handle
    #[error("Attempting to convert a null object to a foreign handle")]
    NullObject,

    /// A null handle was given for conversion to an object
    #[error("Attempting to convert a null foreign handle to an object")]
    NullHandle,

    /// The handle is not live in this table
    #[error("Unknown foreign handle: {handle}")]
    UnknownHandle {
        /// The handle that was not found
        handle: Handle,
    },

    /// The handle refers to an object of another type
    #[error("Foreign handle does not refer to an object of type '{expected}'")]
    TypeMismatch {
        /// Name of the requested type
        expected: &'static str,
    },
}

impl From<BridgeError> for assetgate_core::Error {
    fn from(err: BridgeError) -> Self {
        assetgate_core::Error::InputValidation(err.to_string())
    }
}

/// Conversion between native objects and foreign handles
pub trait ForeignBridge {
    /// Hand an object to the foreign runtime
    fn to_foreign<T: Any + Send + Sync>(
        &self,
        object: Option<Arc<T>>,
    ) -> Result<Handle, BridgeError>;

    /// Take back an object from the foreign runtime
    fn from_foreign<T: Any + Send + Sync>(
        &self,
        handle: Option<Handle>,
    ) -> Result<Arc<T>, BridgeError>;

    /// Drop the foreign runtime's reference
    fn release(&self, handle: Handle) -> Result<(), BridgeError>;
}

type LiveObjects = DashMap<Handle, Arc<dyn Any + Send + Sync>, BuildHasherDefault<FxHasher>>;

/// Concurrent table of live handles
pub struct HandleTable {
    objects: LiveObjects,
    next_id: AtomicU64,
}

impl Default for HandleTable {
    fn default() -> Self {
        HandleTable {
            objects: DashMap::with_hasher(BuildHasherDefault::default()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl HandleTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live handles
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether no handles are live
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl fmt::Debug for HandleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleTable")
            .field("live", &self.objects.len())
            .finish()
    }
}

impl ForeignBridge for HandleTable {
    fn to_foreign<T: Any + Send + Sync>(
        &self,
        object: Option<Arc<T>>,
    ) -> Result<Handle, BridgeError> {
        let object = object.ok_or(BridgeError::NullObject)?;
        let handle = Handle(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.objects.insert(handle, object as Arc<dyn Any + Send + Sync>);
        trace!(
            target: "assetgate::bridge",
            %handle,
            type_name = type_name::<T>(),
            "Handle issued"
        );
        Ok(handle)
    }

    fn from_foreign<T: Any + Send + Sync>(
        &self,
        handle: Option<Handle>,
    ) -> Result<Arc<T>, BridgeError> {
        let handle = handle.ok_or(BridgeError::NullHandle)?;
        let object = self
            .objects
            .get(&handle)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or(BridgeError::UnknownHandle { handle })?;
        object.downcast::<T>().map_err(|_| BridgeError::TypeMismatch {
            expected: type_name::<T>(),
        })
    }

    fn release(&self, handle: Handle) -> Result<(), BridgeError> {
        match self.objects.remove(&handle) {
            Some(_) => {
                trace!(target: "assetgate::bridge", %handle, "Handle released");
                Ok(())
            }
            None => Err(BridgeError::UnknownHandle { handle }),
        }
    }
}
