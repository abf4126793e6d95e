// src/application/ports/security.rs
use crate::application::ApplicationResult;
use async_trait::async_trait;

/// Claims extracted from a verified bearer token. Token issuance lives in a
/// separate service; this one only verifies.
#[derive(Debug, Clone, Copy)]
pub struct VerifiedToken {
    pub user_id: i64,
}

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify the token signature and embedded checks (expiry included) and
    /// return its claims. Expired or malformed tokens are errors.
    async fn verify(&self, token: &str) -> ApplicationResult<VerifiedToken>;
}
