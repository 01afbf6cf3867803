use uuid::Uuid;

/// The authenticated identity a request is made on behalf of
///
/// Authentication is an upstream concern: by the time authorization runs, a
/// `Principal` has already been established and attached to the request by
/// the authentication layer. A request without one is unauthenticated, which
/// is a distinct failure from unauthorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Principal {
    id: Uuid,
}

impl Principal {
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self { id }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }
}
