use thiserror::Error;

use crate::resolver::ResolverError;

/// Authorization failure taxonomy
///
/// Display strings double as response messages, so they carry no deny
/// reasons, principal ids, or resource names. The detail lives in audit
/// logs, not in what the caller sees.
#[derive(Debug, Error)]
pub enum AuthzError {
    #[error("Authentication required: no principal on the request")]
    Unauthenticated,

    #[error("Forbidden: insufficient role")]
    Forbidden,

    /// A protected resource with no registered requirement; fail closed.
    /// To the caller this is indistinguishable from an ordinary denial.
    #[error("Forbidden: insufficient role")]
    MisconfiguredResource,

    #[error("Authorization unavailable")]
    Resolver(#[source] ResolverError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ResolverError> for AuthzError {
    fn from(err: ResolverError) -> Self {
        AuthzError::Resolver(err)
    }
}

#[cfg(feature = "axum-ext")]
impl axum::response::IntoResponse for AuthzError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;
        use axum::response::Json;
        use serde_json::json;

        let status = match &self {
            AuthzError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AuthzError::Forbidden | AuthzError::MisconfiguredResource => StatusCode::FORBIDDEN,
            // An unresolvable identity is an authentication failure, not a deny
            AuthzError::Resolver(
                ResolverError::Unauthenticated | ResolverError::PrincipalNotFound(_),
            ) => StatusCode::UNAUTHORIZED,
            AuthzError::Resolver(ResolverError::Unavailable(_)) | AuthzError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_hides_detail() {
        let err = AuthzError::Resolver(ResolverError::PrincipalNotFound(uuid::Uuid::new_v4()));
        // The principal id must not leak through the outer message
        assert_eq!(err.to_string(), "Authorization unavailable");

        assert_eq!(
            AuthzError::MisconfiguredResource.to_string(),
            AuthzError::Forbidden.to_string()
        );
    }

    #[cfg(feature = "axum-ext")]
    #[test]
    fn test_status_mapping() {
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        assert_eq!(
            AuthzError::Unauthenticated.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthzError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthzError::MisconfiguredResource.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AuthzError::Resolver(ResolverError::Unauthenticated)
                .into_response()
                .status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthzError::Resolver(ResolverError::Unavailable("store down".into()))
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
