use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::role::{Role, RoleSet};

/// Declarative statement of which roles satisfy access to a protected resource
///
/// Every protected resource is bound to exactly one requirement, resolved
/// statically at registration time. In config form requirements read as
/// `any_of: [admin]` or `all_of: [auditor, admin]`.
///
/// A requirement with an empty role list is satisfied by nobody: it always
/// denies, including for `AllOf` where set theory would suggest a vacuous
/// allow. An empty list in config is a mistake, not an allow-all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    /// Satisfied if the principal's role set intersects these roles
    AnyOf(BTreeSet<Role>),
    /// Satisfied only if the principal holds every one of these roles
    AllOf(BTreeSet<Role>),
}

impl Requirement {
    pub fn any_of(roles: impl IntoIterator<Item = Role>) -> Self {
        Self::AnyOf(roles.into_iter().collect())
    }

    pub fn all_of(roles: impl IntoIterator<Item = Role>) -> Self {
        Self::AllOf(roles.into_iter().collect())
    }

    /// The roles this requirement names
    #[must_use]
    pub fn roles(&self) -> &BTreeSet<Role> {
        match self {
            Self::AnyOf(roles) | Self::AllOf(roles) => roles,
        }
    }

    /// Pure, total satisfaction check; never panics for any input
    #[must_use]
    pub fn is_satisfied_by(&self, held: &RoleSet) -> bool {
        crate::engine::evaluate(held, self).is_allow()
    }
}
