/// Why a request was denied
///
/// Reasons are informational: they feed audit logs and metrics, never
/// response bodies. A caller only ever learns "forbidden".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// The principal holds none of the roles an `AnyOf` requirement names
    NoMatchingRole,
    /// The principal is missing at least one role an `AllOf` requirement names
    MissingRoles,
    /// The requirement names no roles at all; satisfied by nobody
    EmptyRequirement,
    /// The resource has no registered requirement; fail closed
    UnboundResource,
}

impl DenyReason {
    /// Stable label for logs and metrics
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DenyReason::NoMatchingRole => "no_matching_role",
            DenyReason::MissingRoles => "missing_roles",
            DenyReason::EmptyRequirement => "empty_requirement",
            DenyReason::UnboundResource => "unbound_resource",
        }
    }
}

/// The verdict of one authorization evaluation
///
/// A derived value, never persisted. `Deny` is an expected outcome, not an
/// error: evaluation itself cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl Decision {
    #[must_use]
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    #[must_use]
    pub fn is_deny(&self) -> bool {
        !self.is_allow()
    }
}
