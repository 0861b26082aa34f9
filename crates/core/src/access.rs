//! Access intent enumerations
//!
//! Every entity operation is told *why* the host is asking: to read an
//! entity, to write one, or to create something related to it. Each
//! operation accepts only the subset of intents that make sense for it:
//!
//! | Enum | Read | Write | CreateRelated | Required | ManagerDriven |
//! |------|------|-------|---------------|----------|---------------|
//! | [`PolicyAccess`] | ✓ | ✓ | ✓ | ✓ | ✓ |
//! | [`ResolveAccess`] | ✓ | | | | ✓ |
//! | [`PublishingAccess`] | | ✓ | ✓ | | |
//! | [`RelationsAccess`] | ✓ | ✓ | ✓ | | |
//! | [`DefaultEntityAccess`] | ✓ | ✓ | ✓ | | |
//! | [`EntityTraitsAccess`] | ✓ | ✓ | | | |
//!
//! Every subset converts losslessly into the internal [`Access`], which is
//! what exceptions carry and what messages print.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Union of all access intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Access {
    /// Reading existing data
    Read,
    /// Writing new data
    Write,
    /// Creating an entity related to an existing one
    CreateRelated,
    /// Data that the host requires to be managed
    Required,
    /// Data whose handling the manager chooses
    ManagerDriven,
}

impl Access {
    /// All access modes (for iteration)
    pub const ALL: [Access; 5] = [
        Access::Read,
        Access::Write,
        Access::CreateRelated,
        Access::Required,
        Access::ManagerDriven,
    ];

    /// Name used in exception messages
    pub const fn name(&self) -> &'static str {
        match self {
            Access::Read => "read",
            Access::Write => "write",
            Access::CreateRelated => "createRelated",
            Access::Required => "required",
            Access::ManagerDriven => "managerDriven",
        }
    }

    /// Parse from name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|access| access.name() == name)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Declares an operation-specific subset of `Access`, with the lossless
// widening conversion and a matching `Display`.
macro_rules! access_subset {
    ($(#[$meta:meta])* $name:ident { $($variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub enum $name {
            $(
                #[allow(missing_docs)]
                $variant,
            )+
        }

        impl $name {
            /// All modes accepted by this operation
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Name used in exception messages
            pub fn name(&self) -> &'static str {
                Access::from(*self).name()
            }
        }

        impl From<$name> for Access {
            fn from(access: $name) -> Self {
                match access {
                    $($name::$variant => Access::$variant,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}

access_subset! {
    /// Access modes accepted by management policy queries
    PolicyAccess { Read, Write, CreateRelated, Required, ManagerDriven }
}

access_subset! {
    /// Access modes accepted by `resolve`
    ResolveAccess { Read, ManagerDriven }
}

access_subset! {
    /// Access modes accepted by `preflight` and `register`
    PublishingAccess { Write, CreateRelated }
}

access_subset! {
    /// Access modes accepted by relationship queries
    RelationsAccess { Read, Write, CreateRelated }
}

access_subset! {
    /// Access modes accepted by `default_entity_reference`
    DefaultEntityAccess { Read, Write, CreateRelated }
}

access_subset! {
    /// Access modes accepted by `entity_traits`
    EntityTraitsAccess { Read, Write }
}
