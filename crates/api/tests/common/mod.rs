//! Shared test fixtures for manager integration tests
//!
//! `MockManager` is a scriptable backend. Each batch operation either
//! replays a script of callbacks set by the test (in the scripted order,
//! indices included) or, with no script, reports success for every
//! element in input order.

#![allow(dead_code)]

use assetgate_api::{
    Capability, EntityReferencePagerInterface, ErrorCallback, Manager, ManagerInterface,
    PagerInterfacePtr, SuccessCallback,
};
use assetgate_core::{
    BatchElementError, Context, DefaultEntityAccess, EntityReference, EntityReferences,
    EntityTraitsAccess, Error, ErrorCode, InfoDictionary, ManagerState, ManagerStatePtr,
    PolicyAccess, PublishingAccess, RelationsAccess, ResolveAccess, Result, StrMap, TraitSet,
    TraitsData, TraitsDatas, Value,
};
use parking_lot::Mutex;
use std::any::Any;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

pub const MOCK_IDENTIFIER: &str = "org.assetgate.test.mock";
pub const MOCK_SCHEME: &str = "mock://";
pub const MOCK_TRAIT: &str = "mock";

/// One scripted callback
pub enum Reply<T> {
    Success(usize, T),
    Error(usize, BatchElementError),
}

pub fn error(code: ErrorCode, message: &str) -> BatchElementError {
    BatchElementError::new(code, message)
}

pub fn reference(name: &str) -> EntityReference {
    EntityReference::new_unchecked(format!("{}{}", MOCK_SCHEME, name))
}

pub fn references(names: &[&str]) -> Vec<EntityReference> {
    names.iter().map(|name| reference(name)).collect()
}

pub fn trait_set(ids: &[&str]) -> TraitSet {
    ids.iter().map(|id| id.to_string()).collect()
}

/// What the mock resolves for a reference when unscripted
pub fn resolved_data(entity_reference: &EntityReference) -> TraitsData {
    let mut data = TraitsData::new();
    data.set_property(MOCK_TRAIT, "reference", entity_reference.as_str());
    data
}

type Script<T> = Mutex<Option<Vec<Reply<T>>>>;

fn replay<T>(
    script: &Script<T>,
    len: usize,
    default: impl Fn(usize) -> T,
    on_success: SuccessCallback<'_, T>,
    on_error: ErrorCallback<'_>,
) {
    match script.lock().take() {
        Some(replies) => {
            for reply in replies {
                match reply {
                    Reply::Success(index, value) => on_success(index, value),
                    Reply::Error(index, err) => on_error(index, err),
                }
            }
        }
        None => {
            for index in 0..len {
                on_success(index, default(index));
            }
        }
    }
}

// =============================================================================
// State and pager
// =============================================================================

#[derive(Debug, PartialEq, Eq)]
pub struct MockState {
    pub id: u64,
    pub parent: Option<u64>,
}

impl ManagerState for MockState {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub struct MockPager {
    pages: Vec<EntityReferences>,
    position: usize,
    released: Arc<AtomicUsize>,
}

impl EntityReferencePagerInterface for MockPager {
    fn has_next(&mut self) -> Result<bool> {
        Ok(self.position + 1 < self.pages.len())
    }

    fn get(&mut self) -> Result<EntityReferences> {
        Ok(self.pages.get(self.position).cloned().unwrap_or_default())
    }

    fn next(&mut self) -> Result<()> {
        self.position += 1;
        Ok(())
    }
}

impl Drop for MockPager {
    fn drop(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// Two pages of children for a reference
pub fn child_pages(parent: &EntityReference, page_size: usize) -> Vec<EntityReferences> {
    let children: Vec<EntityReference> = (0..3)
        .map(|n| EntityReference::new_unchecked(format!("{}/child{}", parent, n)))
        .collect();
    children.chunks(page_size).map(|chunk| chunk.to_vec()).collect()
}

// =============================================================================
// MockManager
// =============================================================================

pub struct MockManager {
    capabilities: Vec<Capability>,
    info: InfoDictionary,
    settings: Mutex<InfoDictionary>,
    calls: Mutex<Vec<&'static str>>,
    reference_checks: AtomicUsize,
    next_state: AtomicU64,
    batch_failure: Mutex<Option<Error>>,
    initialize_failure: Mutex<Option<Error>>,
    pub pagers_released: Arc<AtomicUsize>,
    pub registered: Mutex<Vec<EntityReference>>,

    pub exists_script: Script<bool>,
    pub traits_script: Script<TraitSet>,
    pub resolve_script: Script<TraitsData>,
    pub default_script: Script<Option<EntityReference>>,
    pub relationship_script: Script<Vec<EntityReferences>>,
    pub preflight_script: Script<EntityReference>,
    pub register_script: Script<EntityReference>,
}

impl Default for MockManager {
    fn default() -> Self {
        MockManager {
            capabilities: vec![
                Capability::EntityReferenceIdentification,
                Capability::ManagementPolicyQueries,
                Capability::EntityTraitIntrospection,
                Capability::Resolution,
                Capability::Publishing,
                Capability::RelationshipQueries,
                Capability::ExistenceQueries,
                Capability::DefaultEntityReferences,
                Capability::StatefulContexts,
                Capability::CustomTerminology,
            ],
            info: InfoDictionary::new(),
            settings: Mutex::new(InfoDictionary::new()),
            calls: Mutex::new(Vec::new()),
            reference_checks: AtomicUsize::new(0),
            next_state: AtomicU64::new(1),
            batch_failure: Mutex::new(None),
            initialize_failure: Mutex::new(None),
            pagers_released: Arc::new(AtomicUsize::new(0)),
            registered: Mutex::new(Vec::new()),
            exists_script: Mutex::new(None),
            traits_script: Mutex::new(None),
            resolve_script: Mutex::new(None),
            default_script: Mutex::new(None),
            relationship_script: Mutex::new(None),
            preflight_script: Mutex::new(None),
            register_script: Mutex::new(None),
        }
    }
}

impl MockManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capabilities(mut self, capabilities: &[Capability]) -> Self {
        self.capabilities = capabilities.to_vec();
        self
    }

    pub fn with_info(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.info.insert(key.to_string(), value.into());
        self
    }

    /// Make the next batch call fail as a whole
    pub fn fail_next_batch(&self, err: Error) {
        *self.batch_failure.lock() = Some(err);
    }

    /// Make the next initialize fail
    pub fn fail_next_initialize(&self, err: Error) {
        *self.initialize_failure.lock() = Some(err);
    }

    pub fn script<T>(script: &Script<T>, replies: Vec<Reply<T>>) {
        *script.lock() = Some(replies);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.calls.lock().iter().filter(|m| **m == method).count()
    }

    pub fn reference_checks(&self) -> usize {
        self.reference_checks.load(Ordering::SeqCst)
    }

    pub fn received_settings(&self) -> InfoDictionary {
        self.settings.lock().clone()
    }

    fn record(&self, method: &'static str) -> Result<()> {
        self.calls.lock().push(method);
        match self.batch_failure.lock().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn new_state(&self, parent: Option<u64>) -> ManagerStatePtr {
        let id = self.next_state.fetch_add(1, Ordering::SeqCst);
        Arc::new(MockState { id, parent })
    }

    fn pager(&self, pages: Vec<EntityReferences>) -> PagerInterfacePtr {
        Box::new(MockPager {
            pages,
            position: 0,
            released: self.pagers_released.clone(),
        })
    }
}

impl ManagerInterface for MockManager {
    fn identifier(&self) -> String {
        MOCK_IDENTIFIER.to_string()
    }

    fn display_name(&self) -> String {
        "Mock Manager".to_string()
    }

    fn info(&self) -> InfoDictionary {
        self.info.clone()
    }

    fn settings(&self) -> Result<InfoDictionary> {
        Ok(self.settings.lock().clone())
    }

    fn initialize(&self, settings: InfoDictionary) -> Result<()> {
        self.calls.lock().push("initialize");
        if let Some(err) = self.initialize_failure.lock().take() {
            return Err(err);
        }
        *self.settings.lock() = settings;
        Ok(())
    }

    fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    fn update_terminology(&self, mut terms: StrMap) -> Result<StrMap> {
        if let Some(term) = terms.get_mut("asset") {
            *term = "entity".to_string();
        }
        Ok(terms)
    }

    fn management_policy(
        &self,
        trait_sets: &[TraitSet],
        _access: PolicyAccess,
        _context: &Context,
    ) -> Result<TraitsDatas> {
        self.record("management_policy")?;
        Ok(trait_sets
            .iter()
            .map(|set| TraitsData::with_traits(set.iter().cloned()))
            .collect())
    }

    fn create_state(&self) -> Result<ManagerStatePtr> {
        Ok(self.new_state(None))
    }

    fn create_child_state(&self, parent: &ManagerStatePtr) -> Result<ManagerStatePtr> {
        let parent_id = parent
            .as_any()
            .downcast_ref::<MockState>()
            .map(|state| state.id);
        Ok(self.new_state(parent_id))
    }

    fn persistence_token_for_state(&self, state: &ManagerStatePtr) -> Result<String> {
        let state = state
            .as_any()
            .downcast_ref::<MockState>()
            .ok_or_else(|| Error::unhandled("foreign state"))?;
        Ok(format!("mock-state-{}", state.id))
    }

    fn state_from_persistence_token(&self, token: &str) -> Result<ManagerStatePtr> {
        let id = token
            .strip_prefix("mock-state-")
            .and_then(|id| id.parse().ok())
            .ok_or_else(|| Error::input_validation(format!("Bad token: {}", token)))?;
        Ok(Arc::new(MockState { id, parent: None }))
    }

    fn is_entity_reference_string(&self, some_string: &str) -> bool {
        self.reference_checks.fetch_add(1, Ordering::SeqCst);
        some_string.starts_with(MOCK_SCHEME)
    }

    fn entity_exists(
        &self,
        entity_references: &[EntityReference],
        _context: &Context,
        on_success: SuccessCallback<'_, bool>,
        on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        self.record("entity_exists")?;
        replay(
            &self.exists_script,
            entity_references.len(),
            |_| true,
            on_success,
            on_error,
        );
        Ok(())
    }

    fn entity_traits(
        &self,
        entity_references: &[EntityReference],
        _access: EntityTraitsAccess,
        _context: &Context,
        on_success: SuccessCallback<'_, TraitSet>,
        on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        self.record("entity_traits")?;
        replay(
            &self.traits_script,
            entity_references.len(),
            |_| trait_set(&[MOCK_TRAIT]),
            on_success,
            on_error,
        );
        Ok(())
    }

    fn resolve(
        &self,
        entity_references: &[EntityReference],
        _trait_set: &TraitSet,
        _access: ResolveAccess,
        _context: &Context,
        on_success: SuccessCallback<'_, TraitsData>,
        on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        self.record("resolve")?;
        replay(
            &self.resolve_script,
            entity_references.len(),
            |index| resolved_data(&entity_references[index]),
            on_success,
            on_error,
        );
        Ok(())
    }

    fn default_entity_reference(
        &self,
        trait_sets: &[TraitSet],
        _access: DefaultEntityAccess,
        _context: &Context,
        on_success: SuccessCallback<'_, Option<EntityReference>>,
        on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        self.record("default_entity_reference")?;
        replay(
            &self.default_script,
            trait_sets.len(),
            |index| {
                if trait_sets[index].is_empty() {
                    None
                } else {
                    Some(reference("default"))
                }
            },
            on_success,
            on_error,
        );
        Ok(())
    }

    fn get_with_relationship(
        &self,
        entity_references: &[EntityReference],
        _relationship_traits_data: &TraitsData,
        _result_trait_set: &TraitSet,
        page_size: usize,
        _access: RelationsAccess,
        _context: &Context,
        on_success: SuccessCallback<'_, PagerInterfacePtr>,
        on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        self.record("get_with_relationship")?;
        replay(
            &self.relationship_script,
            entity_references.len(),
            |index| child_pages(&entity_references[index], page_size),
            &mut |index: usize, pages: Vec<EntityReferences>| on_success(index, self.pager(pages)),
            on_error,
        );
        Ok(())
    }

    fn get_with_relationships(
        &self,
        entity_reference: &EntityReference,
        relationship_traits_datas: &[TraitsData],
        _result_trait_set: &TraitSet,
        page_size: usize,
        _access: RelationsAccess,
        _context: &Context,
        on_success: SuccessCallback<'_, PagerInterfacePtr>,
        on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        self.record("get_with_relationships")?;
        replay(
            &self.relationship_script,
            relationship_traits_datas.len(),
            |_| child_pages(entity_reference, page_size),
            &mut |index: usize, pages: Vec<EntityReferences>| on_success(index, self.pager(pages)),
            on_error,
        );
        Ok(())
    }

    fn preflight(
        &self,
        entity_references: &[EntityReference],
        _traits_hints: &[TraitsData],
        _access: PublishingAccess,
        _context: &Context,
        on_success: SuccessCallback<'_, EntityReference>,
        on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        self.record("preflight")?;
        replay(
            &self.preflight_script,
            entity_references.len(),
            |index| {
                EntityReference::new_unchecked(format!("{}?working", entity_references[index]))
            },
            on_success,
            on_error,
        );
        Ok(())
    }

    fn register(
        &self,
        entity_references: &[EntityReference],
        _entity_traits_datas: &[TraitsData],
        _access: PublishingAccess,
        _context: &Context,
        on_success: SuccessCallback<'_, EntityReference>,
        on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        self.record("register")?;
        replay(
            &self.register_script,
            entity_references.len(),
            |index| {
                EntityReference::new_unchecked(format!("{}?v=1", entity_references[index]))
            },
            &mut |index: usize, registered: EntityReference| {
                self.registered.lock().push(registered.clone());
                on_success(index, registered)
            },
            on_error,
        );
        Ok(())
    }
}

/// An initialized manager over a fresh mock, with the mock kept for
/// inspection
pub fn setup() -> (Manager, Arc<MockManager>) {
    setup_with(MockManager::new())
}

pub fn setup_with(mock: MockManager) -> (Manager, Arc<MockManager>) {
    let mock = Arc::new(mock);
    let manager = Manager::new(mock.clone());
    manager.initialize(InfoDictionary::new()).unwrap();
    (manager, mock)
}
