//! Manager Lifecycle Integration Tests
//!
//! Initialization, capability checks, entity reference identification
//! and context handling.

mod common;

use assetgate_api::{
    Capability, ErrorCallback, Except, Manager, ManagerInterface, SuccessCallback,
    INFO_KEY_ENTITY_REFERENCES_MATCH_PREFIX,
};
use assetgate_core::{
    Context, EntityReference, EntityTraitsAccess, Error, InfoDictionary, PolicyAccess,
    ResolveAccess, Result, StrMap, TraitSet, TraitsData, TraitsDatas, Value,
};
use common::{reference, setup, setup_with, trait_set, MockManager, MockState, MOCK_IDENTIFIER};
use std::sync::Arc;

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn test_initialize_forwards_settings() {
    let mock = Arc::new(MockManager::new());
    let manager = Manager::new(mock.clone());
    let mut settings = InfoDictionary::new();
    settings.insert("library".to_string(), Value::from("/mnt/assets"));

    manager.initialize(settings.clone()).unwrap();

    assert_eq!(mock.received_settings(), settings);
    assert_eq!(manager.settings().unwrap(), settings);
    assert_eq!(manager.identifier(), MOCK_IDENTIFIER);
    assert_eq!(manager.display_name(), "Mock Manager");
}

#[test]
fn test_initialize_rejects_missing_required_capabilities() {
    let mock = Arc::new(
        MockManager::new().with_capabilities(&[
            Capability::Resolution,
            Capability::ManagementPolicyQueries,
        ]),
    );
    let manager = Manager::new(mock);

    let err = manager.initialize(InfoDictionary::new()).unwrap_err();

    assert_eq!(
        err,
        Error::Configuration(format!(
            "Manager implementation for '{}' does not support the required capabilities: \
             entityReferenceIdentification, entityTraitIntrospection",
            MOCK_IDENTIFIER
        ))
    );
}

#[test]
fn test_has_capability_passthrough() {
    let mock = MockManager::new().with_capabilities(&Capability::REQUIRED);
    let (manager, _mock) = setup_with(mock);

    assert!(manager.has_capability(Capability::EntityTraitIntrospection));
    assert!(!manager.has_capability(Capability::Publishing));
}

// =============================================================================
// Entity reference identification
// =============================================================================

#[test]
fn test_reference_check_uses_backend_without_prefix() {
    let (manager, mock) = setup();

    assert!(manager.is_entity_reference_string("mock://a"));
    assert!(!manager.is_entity_reference_string("/tmp/a"));
    assert_eq!(mock.reference_checks(), 2);
}

#[test]
fn test_prefix_from_info_bypasses_backend() {
    let cases = [
        ("bal:///", "bal:///x", true),
        ("asset://", "asset://my_asset", true),
        ("asset://", "/home/user/my_asset", false),
        ("a", "asset://my_asset", true),
        ("asset://my_asset", "asset://my_asset", true),
        ("asset://my_asset/long_prefix/", "asset://my_asset", false),
        ("🐠🐟🐠🐟", "🐠🐟🐠🐟 fish", true),
        ("🐠🐟🐠🐟", "🐟🐠🐟🐠 fish", false),
    ];

    for (prefix, candidate, expected) in cases {
        let mock = MockManager::new().with_info(INFO_KEY_ENTITY_REFERENCES_MATCH_PREFIX, prefix);
        let (manager, mock) = setup_with(mock);

        assert_eq!(
            manager.is_entity_reference_string(candidate),
            expected,
            "prefix {:?} candidate {:?}",
            prefix,
            candidate
        );
        assert_eq!(mock.reference_checks(), 0);
    }
}

#[test]
fn test_non_string_prefix_falls_back_to_backend() {
    let mock = MockManager::new().with_info(INFO_KEY_ENTITY_REFERENCES_MATCH_PREFIX, 42i64);
    let (manager, mock) = setup_with(mock);

    assert!(manager.is_entity_reference_string("mock://a"));
    assert_eq!(mock.reference_checks(), 1);
}

#[test]
fn test_prefix_not_used_before_initialize() {
    let mock =
        Arc::new(MockManager::new().with_info(INFO_KEY_ENTITY_REFERENCES_MATCH_PREFIX, "x://"));
    let manager = Manager::new(mock.clone());

    assert!(!manager.is_entity_reference_string("x://a"));
    assert_eq!(mock.reference_checks(), 1);
}

#[test]
fn test_failed_reinitialize_drops_cached_prefix() {
    let mock = MockManager::new().with_info(INFO_KEY_ENTITY_REFERENCES_MATCH_PREFIX, "x://");
    let (manager, mock) = setup_with(mock);
    assert!(manager.is_entity_reference_string("x://a"));
    assert_eq!(mock.reference_checks(), 0);

    mock.fail_next_initialize(Error::configuration("library offline"));
    let err = manager.initialize(InfoDictionary::new()).unwrap_err();
    assert_eq!(err, Error::Configuration("library offline".to_string()));

    // Falls back to the backend, which only knows mock://
    assert!(!manager.is_entity_reference_string("x://a"));
    assert_eq!(mock.reference_checks(), 1);
}

#[test]
fn test_create_entity_reference() {
    let (manager, _mock) = setup();

    let valid = manager.create_entity_reference("mock://a").unwrap();
    assert_eq!(valid, reference("a"));

    let err = manager.create_entity_reference("file:///a").unwrap_err();
    assert_eq!(
        err,
        Error::InputValidation("Invalid entity reference: file:///a".to_string())
    );

    assert_eq!(
        manager.create_entity_reference_if_valid("mock://b"),
        Some(reference("b"))
    );
    assert_eq!(manager.create_entity_reference_if_valid("b"), None);
}

#[test]
fn test_stored_reference_revalidated_through_manager() {
    #[derive(serde::Deserialize)]
    struct Saved {
        target: EntityReference,
    }
    let (manager, _mock) = setup();

    let saved: Saved = toml::from_str("target = \"file:///shots/010\"").unwrap();
    assert_eq!(saved.target.as_str(), "file:///shots/010");
    assert!(manager.create_entity_reference(saved.target.as_str()).is_err());

    let saved: Saved = toml::from_str("target = \"mock://shots/010\"").unwrap();
    assert_eq!(
        manager.create_entity_reference(saved.target.as_str()).unwrap(),
        saved.target
    );
}

// =============================================================================
// Contexts
// =============================================================================

#[test]
fn test_create_context_attaches_state() {
    let (manager, _mock) = setup();

    let context = manager.create_context().unwrap();

    assert!(context.has_manager_state());
    assert!(context.locale.is_empty());
    assert_eq!(context.manager_state_as::<MockState>().unwrap().parent, None);
}

#[test]
fn test_child_context_derives_state_and_copies_locale() {
    let (manager, _mock) = setup();
    let mut parent = manager.create_context().unwrap();
    parent.locale = TraitsData::with_traits(["host.shot"]);
    let parent_id = parent.manager_state_as::<MockState>().unwrap().id;

    let child = manager.create_child_context(&parent).unwrap();

    assert_eq!(child.locale, parent.locale);
    let child_state = child.manager_state_as::<MockState>().unwrap();
    assert_ne!(child_state.id, parent_id);
    assert_eq!(child_state.parent, Some(parent_id));
}

#[test]
fn test_child_of_stateless_context_is_stateless() {
    let (manager, _mock) = setup();

    let child = manager.create_child_context(&Context::new()).unwrap();

    assert!(!child.has_manager_state());
}

#[test]
fn test_persistence_token_roundtrip() {
    let (manager, _mock) = setup();
    let context = manager.create_context().unwrap();
    let id = context.manager_state_as::<MockState>().unwrap().id;

    let token = manager.persistence_token_for_context(&context).unwrap();
    assert_eq!(token, format!("mock-state-{}", id));

    let restored = manager.context_from_persistence_token(&token).unwrap();
    assert_eq!(restored.manager_state_as::<MockState>().unwrap().id, id);
}

#[test]
fn test_empty_persistence_token() {
    let (manager, _mock) = setup();

    assert_eq!(
        manager.persistence_token_for_context(&Context::new()).unwrap(),
        ""
    );
    let restored = manager.context_from_persistence_token("").unwrap();
    assert!(!restored.has_manager_state());
}

#[test]
fn test_stateless_manager_gives_stateless_context() {
    let mock = MockManager::new().with_capabilities(&Capability::REQUIRED);
    let (manager, _mock) = setup_with(mock);

    let context = manager.create_context().unwrap();

    assert!(!context.has_manager_state());
}

// =============================================================================
// Passthroughs
// =============================================================================

#[test]
fn test_update_terminology_returns_managers_terms() {
    let (manager, _mock) = setup();
    let mut terms = StrMap::new();
    terms.insert("asset".to_string(), "asset".to_string());
    terms.insert("shot".to_string(), "shot".to_string());

    let updated = manager.update_terminology(&terms).unwrap();

    assert_eq!(updated["asset"], "entity");
    assert_eq!(updated["shot"], "shot");
    assert_eq!(terms["asset"], "asset");
}

#[test]
fn test_management_policy_one_result_per_trait_set() {
    let (manager, _mock) = setup();
    let context = manager.create_context().unwrap();

    let policies = manager
        .management_policy(
            &[trait_set(&["a"]), trait_set(&["b", "c"])],
            PolicyAccess::Read,
            &context,
        )
        .unwrap();

    assert_eq!(policies.len(), 2);
    assert!(policies[1].has_trait("c"));
    manager.flush_caches().unwrap();
}

// =============================================================================
// Optional operations
// =============================================================================

/// Backend implementing only the required operations
struct MinimalManager;

impl ManagerInterface for MinimalManager {
    fn identifier(&self) -> String {
        "org.assetgate.test.minimal".to_string()
    }

    fn display_name(&self) -> String {
        "Minimal".to_string()
    }

    fn initialize(&self, _settings: InfoDictionary) -> Result<()> {
        Ok(())
    }

    fn has_capability(&self, capability: Capability) -> bool {
        capability.is_required()
    }

    fn management_policy(
        &self,
        trait_sets: &[TraitSet],
        _access: PolicyAccess,
        _context: &Context,
    ) -> Result<TraitsDatas> {
        Ok(vec![TraitsData::new(); trait_sets.len()])
    }

    fn is_entity_reference_string(&self, some_string: &str) -> bool {
        some_string.starts_with("min://")
    }

    fn entity_traits(
        &self,
        entity_references: &[EntityReference],
        _access: EntityTraitsAccess,
        _context: &Context,
        on_success: SuccessCallback<'_, TraitSet>,
        _on_error: ErrorCallback<'_>,
    ) -> Result<()> {
        for index in 0..entity_references.len() {
            on_success(index, TraitSet::new());
        }
        Ok(())
    }
}

#[test]
fn test_unimplemented_operations_report_not_implemented() {
    let manager = Manager::new(Arc::new(MinimalManager));
    manager.initialize(InfoDictionary::new()).unwrap();
    let context = manager.create_context().unwrap();
    let target = EntityReference::new_unchecked("min://a");

    let err = manager
        .resolve_one(
            &target,
            &TraitSet::new(),
            ResolveAccess::Read,
            &context,
            Except,
        )
        .unwrap_err();
    assert!(matches!(err, Error::NotImplemented(_)));
    assert!(err.to_string().contains("resolution"));

    assert!(matches!(
        manager.update_terminology(&StrMap::new()),
        Err(Error::NotImplemented(_))
    ));
    assert!(manager.info().is_empty());

    let traits = manager
        .entity_traits_one(&target, EntityTraitsAccess::Read, &context, Except)
        .unwrap();
    assert!(traits.is_empty());
}
