// src/application/context.rs
use crate::domain::user::User;

/// Best-effort actor identity. Only the id is embedded into audit rows; the
/// username and email exist for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUser {
    pub id: i64,
    pub username: Option<String>,
    pub email: Option<String>,
}

impl ResolvedUser {
    /// Identity known only by id, e.g. decoded from a token whose user row
    /// could not be fetched.
    pub fn minimal(id: i64) -> Self {
        Self {
            id,
            username: None,
            email: None,
        }
    }
}

impl From<User> for ResolvedUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into(),
            username: Some(user.username),
            email: Some(user.email),
        }
    }
}

/// Request-scoped identity context threaded explicitly through every
/// mutation. Replaces the process-wide "current user" slot: because the
/// context lives and dies with one request, a concurrent request can never
/// observe another request's identity.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    /// User attached by the authentication layer.
    pub session_user: Option<ResolvedUser>,
    /// User attached by the audit-context middleware, for requests where
    /// the authentication layer did not run.
    pub audit_user: Option<ResolvedUser>,
    /// Creator id supplied directly in the mutation payload.
    pub created_by: Option<i64>,
    /// Raw bearer token from the Authorization header, decoded lazily.
    pub bearer_token: Option<String>,
    /// Last-resort identity for deferred code paths.
    pub fallback_user: Option<ResolvedUser>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session_user(mut self, user: ResolvedUser) -> Self {
        self.session_user = Some(user);
        self
    }

    pub fn with_audit_user(mut self, user: ResolvedUser) -> Self {
        self.audit_user = Some(user);
        self
    }

    pub fn with_created_by(mut self, created_by: Option<i64>) -> Self {
        self.created_by = created_by;
        self
    }

    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    pub fn with_fallback_user(mut self, user: ResolvedUser) -> Self {
        self.fallback_user = Some(user);
        self
    }
}
