//! Manager discovery and instantiation
//!
//! - [`ManagerImplementationFactory`]: source of backend instances by
//!   identifier
//! - [`StaticManagerRegistry`]: in-process factory of registered
//!   constructors
//! - [`ManagerFactory`]: host-facing entry point producing [`Manager`]s,
//!   including the default manager described by a config file

use crate::config::ManagerConfig;
use crate::interface::ManagerInterface;
use crate::manager::Manager;
use assetgate_core::{Error, InfoDictionary, Result};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Source of manager backends
pub trait ManagerImplementationFactory: Send + Sync {
    /// Identifiers of every manager this factory can instantiate
    fn identifiers(&self) -> Vec<String>;

    /// New backend instance for an identifier
    ///
    /// # Errors
    ///
    /// `InputValidation` if the identifier is not known.
    fn instantiate(&self, identifier: &str) -> Result<Arc<dyn ManagerInterface>>;
}

type Constructor = Box<dyn Fn() -> Arc<dyn ManagerInterface> + Send + Sync>;

/// Factory over constructors registered at startup
///
/// ```ignore
/// let mut registry = StaticManagerRegistry::new();
/// registry.register("org.example.manager", || Arc::new(ExampleManager::default()));
/// ```
#[derive(Default)]
pub struct StaticManagerRegistry {
    constructors: BTreeMap<String, Constructor>,
}

impl StaticManagerRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor, replacing any previous one for `identifier`
    pub fn register<F>(&mut self, identifier: impl Into<String>, constructor: F)
    where
        F: Fn() -> Arc<dyn ManagerInterface> + Send + Sync + 'static,
    {
        self.constructors
            .insert(identifier.into(), Box::new(constructor));
    }
}

impl std::fmt::Debug for StaticManagerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticManagerRegistry")
            .field("identifiers", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl ManagerImplementationFactory for StaticManagerRegistry {
    fn identifiers(&self) -> Vec<String> {
        self.constructors.keys().cloned().collect()
    }

    fn instantiate(&self, identifier: &str) -> Result<Arc<dyn ManagerInterface>> {
        let constructor = self.constructors.get(identifier).ok_or_else(|| {
            Error::input_validation(format!(
                "Could not instantiate manager '{}': no such manager is registered.",
                identifier
            ))
        })?;
        Ok(constructor())
    }
}

/// Summary of an available manager
#[derive(Debug, Clone, PartialEq)]
pub struct ManagerDetails {
    /// Identifier reported by the manager
    pub identifier: String,
    /// Human readable name
    pub display_name: String,
    /// Static information about the manager
    pub info: InfoDictionary,
}

/// Host-facing manager factory
pub struct ManagerFactory {
    implementations: Arc<dyn ManagerImplementationFactory>,
}

impl ManagerFactory {
    /// Factory drawing backends from `implementations`
    pub fn new(implementations: Arc<dyn ManagerImplementationFactory>) -> Self {
        ManagerFactory { implementations }
    }

    /// Identifiers of every available manager
    pub fn identifiers(&self) -> Vec<String> {
        self.implementations.identifiers()
    }

    /// Details of every available manager, keyed by identifier
    ///
    /// Instantiates each backend to query it. The instances are not
    /// initialized and are dropped afterwards.
    pub fn available_managers(&self) -> Result<BTreeMap<String, ManagerDetails>> {
        let mut details = BTreeMap::new();
        for identifier in self.implementations.identifiers() {
            let interface = self.implementations.instantiate(&identifier)?;
            details.insert(
                identifier,
                ManagerDetails {
                    identifier: interface.identifier(),
                    display_name: interface.display_name(),
                    info: interface.info(),
                },
            );
        }
        Ok(details)
    }

    /// Uninitialized manager for an identifier
    pub fn create_manager(&self, identifier: &str) -> Result<Manager> {
        Ok(Manager::new(self.implementations.instantiate(identifier)?))
    }

    /// Initialized manager described by a config file
    ///
    /// # Errors
    ///
    /// - `Configuration` if the file is missing or invalid
    /// - `InputValidation` if the identifier is not available
    /// - Any error from `Manager::initialize`
    pub fn default_manager_from_config(&self, config_path: &Path) -> Result<Manager> {
        let config = ManagerConfig::from_file(config_path)?;
        debug!(
            target: "assetgate::factory",
            identifier = %config.identifier,
            settings = config.settings.len(),
            "Creating default manager"
        );
        let manager = self.create_manager(&config.identifier)?;
        manager.initialize(config.settings)?;
        Ok(manager)
    }
}

impl std::fmt::Debug for ManagerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagerFactory")
            .field("identifiers", &self.identifiers())
            .finish()
    }
}
