#![warn(warnings)]

// Core modules
pub mod decision;
pub mod engine;
pub mod errors;
pub mod principal;
pub mod requirement;
pub mod role;

pub mod config;
pub mod metrics;
pub mod registry;
pub mod resolver;

#[cfg(feature = "axum-ext")]
pub mod axum_ext;

// Core exports
pub use decision::{Decision, DenyReason};
pub use engine::evaluate;
pub use errors::AuthzError;
pub use principal::Principal;
pub use requirement::Requirement;
pub use role::{InvalidRole, Role, RoleSet};

pub use config::{AuthzConfig, ConfigError};
pub use metrics::{AuthzEvent, AuthzMetricLabels, AuthzMetrics, LoggingMetrics, NoOpMetrics};
pub use registry::{RequirementRegistry, StaticRegistry};
pub use resolver::{PrincipalResolver, ResolverError, StaticPrincipalResolver};

#[cfg(feature = "axum-ext")]
pub use config::build_authz_state;
