//! Manager capabilities
//!
//! A manager advertises which groups of operations it implements. Hosts
//! query these before calling optional operations; the middleware checks
//! the required ones once, during `Manager::initialize`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A group of operations a manager may implement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    /// Manager state objects in contexts (`create_state` and friends)
    StatefulContexts,
    /// `update_terminology`
    CustomTerminology,
    /// `resolve`
    Resolution,
    /// `preflight` and `register`
    Publishing,
    /// `get_with_relationship` and `get_with_relationships`
    RelationshipQueries,
    /// `entity_exists`
    ExistenceQueries,
    /// `default_entity_reference`
    DefaultEntityReferences,
    /// `is_entity_reference_string` (required)
    EntityReferenceIdentification,
    /// `management_policy` (required)
    ManagementPolicyQueries,
    /// `entity_traits` (required)
    EntityTraitIntrospection,
}

impl Capability {
    /// All capabilities (for iteration)
    pub const ALL: [Capability; 10] = [
        Capability::StatefulContexts,
        Capability::CustomTerminology,
        Capability::Resolution,
        Capability::Publishing,
        Capability::RelationshipQueries,
        Capability::ExistenceQueries,
        Capability::DefaultEntityReferences,
        Capability::EntityReferenceIdentification,
        Capability::ManagementPolicyQueries,
        Capability::EntityTraitIntrospection,
    ];

    /// Capabilities every manager must have, in the order they are checked
    pub const REQUIRED: [Capability; 3] = [
        Capability::EntityReferenceIdentification,
        Capability::ManagementPolicyQueries,
        Capability::EntityTraitIntrospection,
    ];

    /// Name used in error messages
    pub const fn name(&self) -> &'static str {
        match self {
            Capability::StatefulContexts => "statefulContexts",
            Capability::CustomTerminology => "customTerminology",
            Capability::Resolution => "resolution",
            Capability::Publishing => "publishing",
            Capability::RelationshipQueries => "relationshipQueries",
            Capability::ExistenceQueries => "existenceQueries",
            Capability::DefaultEntityReferences => "defaultEntityReferences",
            Capability::EntityReferenceIdentification => "entityReferenceIdentification",
            Capability::ManagementPolicyQueries => "managementPolicyQueries",
            Capability::EntityTraitIntrospection => "entityTraitIntrospection",
        }
    }

    /// Whether every manager must have this capability
    pub fn is_required(&self) -> bool {
        Self::REQUIRED.contains(self)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
