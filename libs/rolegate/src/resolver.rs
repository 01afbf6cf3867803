use std::collections::HashMap;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::principal::Principal;
use crate::role::RoleSet;

/// Failure modes of role resolution
///
/// These are distinct from a deny: operators must be able to tell "the role
/// check said no" apart from "the role check system is broken". A resolver
/// failure is never silently folded into a denial.
#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("authentication required: no principal could be established")]
    Unauthenticated,

    #[error("principal not found: {0}")]
    PrincipalNotFound(Uuid),

    #[error("role resolution unavailable: {0}")]
    Unavailable(String),
}

/// Supplies the role set for an authenticated principal
///
/// This is the boundary to whatever identity store is in use; resolution may
/// block on a cache or store read and is the only suspension point on the
/// authorization path. Timeout or TTL policy belongs to implementations of
/// this trait, never to the decision engine.
#[async_trait]
pub trait PrincipalResolver: Send + Sync {
    /// Resolve the roles held by `principal` at this point in time
    ///
    /// # Errors
    ///
    /// Returns a [`ResolverError`] if the identity cannot be resolved or the
    /// backing store is unavailable.
    async fn resolve_roles(&self, principal: &Principal) -> Result<RoleSet, ResolverError>;
}

/// In-memory principal-to-roles table
///
/// Fixed at construction time; suitable for tests, demos, and deployments
/// whose role assignments are part of static configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticPrincipalResolver {
    assignments: HashMap<Uuid, RoleSet>,
}

impl StaticPrincipalResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_roles(mut self, principal: Uuid, roles: RoleSet) -> Self {
        self.assignments.insert(principal, roles);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

#[async_trait]
impl PrincipalResolver for StaticPrincipalResolver {
    async fn resolve_roles(&self, principal: &Principal) -> Result<RoleSet, ResolverError> {
        self.assignments
            .get(&principal.id())
            .cloned()
            .ok_or(ResolverError::PrincipalNotFound(principal.id()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_resolver_returns_assigned_roles() {
        let id = Uuid::new_v4();
        let roles = RoleSet::from_names(["admin", "user"]).unwrap();
        let resolver = StaticPrincipalResolver::new().with_roles(id, roles.clone());

        let resolved = resolver.resolve_roles(&Principal::new(id)).await.unwrap();
        assert_eq!(resolved, roles);
    }

    #[tokio::test]
    async fn test_static_resolver_unknown_principal() {
        let resolver = StaticPrincipalResolver::new();
        let id = Uuid::new_v4();

        let result = resolver.resolve_roles(&Principal::new(id)).await;
        assert!(matches!(
            result,
            Err(ResolverError::PrincipalNotFound(found)) if found == id
        ));
    }

    #[tokio::test]
    async fn test_static_resolver_can_hold_empty_role_set() {
        let id = Uuid::new_v4();
        let resolver = StaticPrincipalResolver::new().with_roles(id, RoleSet::empty());

        let resolved = resolver.resolve_roles(&Principal::new(id)).await.unwrap();
        assert!(resolved.is_empty());
    }
}
