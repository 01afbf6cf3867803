//! Axum extractors and middleware for role-based authorization

use crate::{
    decision::Decision,
    engine::evaluate,
    errors::AuthzError,
    metrics::{AuthzEvent, AuthzMetricLabels, AuthzMetrics, NoOpMetrics},
    principal::Principal,
    registry::RequirementRegistry,
    resolver::PrincipalResolver,
    role::RoleSet,
};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Extractor for the role set established by the authorization middleware
#[derive(Debug, Clone)]
pub struct Roles(pub RoleSet);

impl<S> FromRequestParts<S> for Roles
where
    S: Send + Sync,
{
    type Rejection = AuthzError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RoleSet>()
            .cloned()
            .map(Roles)
            .ok_or(AuthzError::Internal(
                "RoleSet not found - authorization middleware not configured".to_string(),
            ))
    }
}

/// Extractor for the authenticated principal placed on the request upstream
#[derive(Debug, Clone, Copy)]
pub struct CurrentPrincipal(pub Principal);

impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = AuthzError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .copied()
            .map(CurrentPrincipal)
            .ok_or(AuthzError::Unauthenticated)
    }
}

/// Shared state for the authorization middleware
#[derive(Clone)]
pub struct AuthzState {
    resolver: Arc<dyn PrincipalResolver>,
    registry: Arc<dyn RequirementRegistry>,
    metrics: Arc<dyn AuthzMetrics>,
}

impl AuthzState {
    pub fn new(
        resolver: Arc<dyn PrincipalResolver>,
        registry: Arc<dyn RequirementRegistry>,
    ) -> Self {
        Self {
            resolver,
            registry,
            metrics: Arc::new(NoOpMetrics),
        }
    }

    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn AuthzMetrics>) -> Self {
        self.metrics = metrics;
        self
    }
}

/// Role-gating middleware backed by a requirement registry
///
/// This middleware:
/// 1. Skips authorization for CORS preflight requests
/// 2. Requires an authenticated [`Principal`] on the request (401 otherwise)
/// 3. Resolves the principal's role set; resolver failures surface as
///    401/500 per the error taxonomy, never as a silent deny
/// 4. Resolves the requirement bound to the request path; an unbound
///    resource fails closed (403) and is logged as a configuration defect
/// 5. Evaluates the decision engine: on Deny it short-circuits with 403 and
///    the handler never runs; on Allow the role set is attached to the
///    request and processing continues unchanged
///
/// Returns Response directly (Axum 0.8 style) with errors converted via IntoResponse.
pub async fn authz_with_registry(
    State(state): State<AuthzState>,
    mut request: Request,
    next: Next,
) -> Response {
    // 1. Preflight: skip authorization
    if is_preflight_request(request.method(), request.headers()) {
        return next.run(request).await;
    }

    // 2. Principal must have been established upstream
    let Some(principal) = request.extensions().get::<Principal>().copied() else {
        return AuthzError::Unauthenticated.into_response();
    };

    let labels = AuthzMetricLabels::default()
        .with_resource(request.uri().path())
        .with_principal(principal.id().to_string());

    // 3. Resolve the role set
    let held = match state.resolver.resolve_roles(&principal).await {
        Ok(held) => held,
        Err(err) => {
            state.metrics.record_event(
                AuthzEvent::ResolverFailed,
                &labels.clone().with_reason(err.to_string()),
            );
            tracing::error!(
                principal = %principal.id(),
                error = %err,
                "role resolution failed"
            );
            return AuthzError::from(err).into_response();
        }
    };

    // 4. Resolve the bound requirement; fail closed when absent
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let Some(requirement) = state.registry.requirement_for(&method, &path) else {
        state
            .metrics
            .record_event(AuthzEvent::UnboundResource, &labels);
        tracing::warn!(
            resource = %path,
            "protected resource has no registered requirement, denying"
        );
        return AuthzError::MisconfiguredResource.into_response();
    };

    // 5. Evaluate and enforce
    match evaluate(&held, requirement) {
        Decision::Allow => {
            state.metrics.record_event(AuthzEvent::Allowed, &labels);
            tracing::debug!(
                principal = %principal.id(),
                resource = %path,
                roles = %held,
                "authorization allowed"
            );
            request.extensions_mut().insert(held);
            next.run(request).await
        }
        Decision::Deny(reason) => {
            state
                .metrics
                .record_event(AuthzEvent::Denied, &labels.with_reason(reason.as_str()));
            tracing::info!(
                principal = %principal.id(),
                resource = %path,
                reason = reason.as_str(),
                "authorization denied"
            );
            AuthzError::Forbidden.into_response()
        }
    }
}

/// Check if this is a CORS preflight request
///
/// Preflight requests are OPTIONS requests with:
/// - Origin header present
/// - Access-Control-Request-Method header present
fn is_preflight_request(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::OPTIONS
        && headers.contains_key(axum::http::header::ORIGIN)
        && headers.contains_key(axum::http::header::ACCESS_CONTROL_REQUEST_METHOD)
}

// Note: tests for authz_with_registry are in tests/middleware_integration_test.rs.
// Direct unit testing requires the full Axum middleware stack, so integration tests are more appropriate.
