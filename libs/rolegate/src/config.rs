use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::registry::StaticRegistry;
use crate::requirement::Requirement;
use crate::resolver::StaticPrincipalResolver;
use crate::role::{InvalidRole, RoleSet};

/// Static authorization configuration
///
/// Supplied at startup, e.g. from YAML:
///
/// ```yaml
/// resources:
///   /api/v1/admin:
///     any_of: [admin]
///   /api/v1/user:
///     any_of: [user]
/// principals:
///   550e8400-e29b-41d4-a716-446655440000: [admin]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthzConfig {
    /// Mapping from resource path to its bound requirement
    #[serde(default)]
    pub resources: HashMap<String, Requirement>,

    /// Role assignments for the static principal resolver
    #[serde(default)]
    pub principals: HashMap<Uuid, Vec<String>>,
}

/// Configuration assembly errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid role for principal {principal}: {source}")]
    InvalidPrincipalRole {
        principal: Uuid,
        source: InvalidRole,
    },
}

impl AuthzConfig {
    /// Build the resource-to-requirement registry
    #[must_use]
    pub fn build_registry(&self) -> StaticRegistry {
        let registry = self
            .resources
            .iter()
            .fold(StaticRegistry::new(), |registry, (path, requirement)| {
                tracing::debug!(
                    resource = %path,
                    requirement = ?requirement,
                    "Registered resource requirement"
                );
                registry.with_route(path.clone(), requirement.clone())
            });

        if registry.is_empty() {
            tracing::warn!("authorization registry is empty: every protected resource will deny");
        }
        registry
    }

    /// Build the static principal resolver from configured role assignments
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPrincipalRole`] if any assigned role
    /// name fails validation.
    pub fn build_resolver(&self) -> Result<StaticPrincipalResolver, ConfigError> {
        let mut resolver = StaticPrincipalResolver::new();
        for (principal, names) in &self.principals {
            let roles = RoleSet::from_names(names.iter().cloned()).map_err(|source| {
                ConfigError::InvalidPrincipalRole {
                    principal: *principal,
                    source,
                }
            })?;
            resolver = resolver.with_roles(*principal, roles);
        }
        Ok(resolver)
    }
}

/// Build the middleware state from configuration
///
/// # Errors
///
/// Returns a [`ConfigError`] if the configuration is inconsistent.
#[cfg(feature = "axum-ext")]
pub fn build_authz_state(config: &AuthzConfig) -> Result<crate::axum_ext::AuthzState, ConfigError> {
    use std::sync::Arc;

    let registry = config.build_registry();
    let resolver = config.build_resolver()?;

    tracing::info!(
        resources = registry.len(),
        principals = resolver.len(),
        "Authorization state initialized"
    );

    Ok(crate::axum_ext::AuthzState::new(
        Arc::new(resolver),
        Arc::new(registry),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::principal::Principal;
    use crate::registry::RequirementRegistry;
    use crate::resolver::PrincipalResolver;
    use crate::role::Role;

    const CONFIG_JSON: &str = r#"{
        "resources": {
            "/api/v1/admin": { "any_of": ["admin"] },
            "/api/v1/user": { "any_of": ["user"] },
            "/api/v1/subscriber": { "any_of": ["subscriber"] }
        },
        "principals": {
            "550e8400-e29b-41d4-a716-446655440000": ["admin"]
        }
    }"#;

    #[test]
    fn test_parse_config() {
        let config: AuthzConfig = serde_json::from_str(CONFIG_JSON).unwrap();
        assert_eq!(config.resources.len(), 3);
        assert_eq!(config.principals.len(), 1);
        assert_eq!(
            config.resources["/api/v1/admin"],
            Requirement::any_of([Role::new("admin").unwrap()])
        );
    }

    #[test]
    fn test_default_config_is_empty() {
        let config = AuthzConfig::default();
        assert!(config.resources.is_empty());
        assert!(config.principals.is_empty());
        assert!(config.build_registry().is_empty());
    }

    #[test]
    fn test_build_registry() {
        let config: AuthzConfig = serde_json::from_str(CONFIG_JSON).unwrap();
        let registry = config.build_registry();
        assert_eq!(registry.len(), 3);
        assert!(
            registry
                .requirement_for(&http::Method::GET, "/api/v1/user")
                .is_some()
        );
        assert!(
            registry
                .requirement_for(&http::Method::GET, "/api/v1/other")
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_build_resolver() {
        let config: AuthzConfig = serde_json::from_str(CONFIG_JSON).unwrap();
        let resolver = config.build_resolver().unwrap();

        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        let roles = resolver.resolve_roles(&Principal::new(id)).await.unwrap();
        assert!(roles.contains(&Role::new("admin").unwrap()));
    }

    #[test]
    fn test_invalid_principal_role_rejected() {
        let id = Uuid::new_v4();
        let config = AuthzConfig {
            resources: HashMap::new(),
            principals: HashMap::from([(id, vec![String::new()])]),
        };

        let result = config.build_resolver();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidPrincipalRole { principal, .. }) if principal == id
        ));
    }

    #[cfg(feature = "axum-ext")]
    #[test]
    fn test_build_authz_state() {
        let config: AuthzConfig = serde_json::from_str(CONFIG_JSON).unwrap();
        assert!(build_authz_state(&config).is_ok());
    }
}
