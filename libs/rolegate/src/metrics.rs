/// Metrics tracking for authorization events
///
/// Trait-based so deployments can plug in their metrics backend
/// (Prometheus, StatsD, etc.); the default is a no-op.
/// Authorization event types for metrics tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthzEvent {
    /// The decision engine allowed the request
    Allowed,

    /// The decision engine denied the request
    Denied,

    /// The principal resolver failed
    ResolverFailed,

    /// A protected resource had no registered requirement
    UnboundResource,
}

impl AuthzEvent {
    /// Get the metric name for this event
    #[must_use]
    pub fn metric_name(&self) -> &'static str {
        match self {
            AuthzEvent::Allowed => "authz.decision.allow",
            AuthzEvent::Denied => "authz.decision.deny",
            AuthzEvent::ResolverFailed => "authz.resolver.fail",
            AuthzEvent::UnboundResource => "authz.registry.unbound",
        }
    }
}

/// Labels for authorization metrics
#[derive(Default, Debug, Clone)]
pub struct AuthzMetricLabels {
    /// Resource identifier (request path)
    pub resource: Option<String>,

    /// Principal id
    pub principal: Option<String>,

    /// Deny reason or error type (for denials and failures)
    pub reason: Option<String>,
}

impl AuthzMetricLabels {
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    #[must_use]
    pub fn with_principal(mut self, principal: impl Into<String>) -> Self {
        self.principal = Some(principal.into());
        self
    }

    #[must_use]
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Trait for metrics backends
pub trait AuthzMetrics: Send + Sync {
    /// Record an authorization event
    fn record_event(&self, event: AuthzEvent, labels: &AuthzMetricLabels);
}

/// No-op metrics implementation (default)
#[derive(Debug, Clone, Copy)]
pub struct NoOpMetrics;

impl AuthzMetrics for NoOpMetrics {
    fn record_event(&self, _event: AuthzEvent, _labels: &AuthzMetricLabels) {
        // No-op
    }
}

/// Logging-based metrics implementation (for debugging)
#[derive(Debug, Clone, Copy)]
pub struct LoggingMetrics;

impl AuthzMetrics for LoggingMetrics {
    fn record_event(&self, event: AuthzEvent, labels: &AuthzMetricLabels) {
        tracing::debug!(
            metric = event.metric_name(),
            resource = ?labels.resource,
            principal = ?labels.principal,
            reason = ?labels.reason,
            "Authorization event recorded"
        );
    }
}
