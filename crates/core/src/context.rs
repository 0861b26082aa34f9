//! Calling context
//!
//! A [`Context`] accompanies every entity operation. It carries the host's
//! locale (a [`TraitsData`] describing where in the host the call comes
//! from) and, for managers that support it, an opaque manager state object
//! that lets the manager correlate related calls.
//!
//! Contexts are created through the manager so the state object is the
//! manager's own. The state is shared, never copied: child contexts hold a
//! new state derived from the parent's.

use crate::traits_data::TraitsData;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Opaque per-context state owned by a manager
///
/// The middleware never inspects it. A manager downcasts its own state
/// with [`as_any`](ManagerState::as_any).
pub trait ManagerState: Any + Send + Sync + fmt::Debug {
    /// Access the concrete state for downcasting
    fn as_any(&self) -> &dyn Any;
}

/// Shared handle on a manager state object
pub type ManagerStatePtr = Arc<dyn ManagerState>;

/// Context for an entity operation
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Description of where in the host the call originates
    pub locale: TraitsData,
    /// Manager-specific state, if the manager is stateful
    pub manager_state: Option<ManagerStatePtr>,
}

impl Context {
    /// A context with an empty locale and no state
    pub fn new() -> Self {
        Self::default()
    }

    /// A context with the given locale and no state
    pub fn with_locale(locale: TraitsData) -> Self {
        Context {
            locale,
            manager_state: None,
        }
    }

    /// Whether a manager state object is attached
    pub fn has_manager_state(&self) -> bool {
        self.manager_state.is_some()
    }

    /// Downcast the attached manager state to a concrete type
    pub fn manager_state_as<T: ManagerState>(&self) -> Option<&T> {
        self.manager_state
            .as_deref()
            .and_then(|state| state.as_any().downcast_ref::<T>())
    }
}
