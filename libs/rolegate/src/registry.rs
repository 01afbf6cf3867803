use std::collections::HashMap;

use http::Method;

use crate::requirement::Requirement;

/// Resolves the requirement bound to a protected resource
///
/// Returning `None` means the resource has no registered requirement; the
/// caller must fail closed (deny) and surface the configuration defect to
/// operators. There is no "allow all" default.
pub trait RequirementRegistry: Send + Sync {
    fn requirement_for(&self, method: &Method, path: &str) -> Option<&Requirement>;
}

/// Static resource-to-requirement table, loaded once at startup
///
/// Keys are exact request paths; the method is ignored, matching a model
/// where each route carries exactly one role requirement. Implement
/// [`RequirementRegistry`] directly for method-aware or pattern-based
/// resolution.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    routes: HashMap<String, Requirement>,
}

impl StaticRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_route(mut self, path: impl Into<String>, requirement: Requirement) -> Self {
        self.routes.insert(path.into(), requirement);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl RequirementRegistry for StaticRegistry {
    fn requirement_for(&self, _method: &Method, path: &str) -> Option<&Requirement> {
        self.routes.get(path)
    }
}
