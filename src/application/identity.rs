// src/application/identity.rs
use crate::application::context::{RequestContext, ResolvedUser};
use crate::application::ports::security::TokenVerifier;
use crate::domain::user::{UserId, UserRepository};
use std::sync::Arc;
use tracing::{debug, warn};

/// Determines the acting user for an audit entry. Tries an ordered list of
/// strategies and stops at the first one that yields an identity; every
/// failure degrades to the next strategy, never to an error.
pub struct IdentityResolver {
    verifier: Arc<dyn TokenVerifier>,
    users: Arc<dyn UserRepository>,
}

impl IdentityResolver {
    pub fn new(verifier: Arc<dyn TokenVerifier>, users: Arc<dyn UserRepository>) -> Self {
        Self { verifier, users }
    }

    pub async fn resolve(&self, ctx: &RequestContext) -> Option<ResolvedUser> {
        if let Some(user) = &ctx.session_user {
            debug!(user_id = user.id, "resolved actor from session");
            return Some(user.clone());
        }

        if let Some(user) = &ctx.audit_user {
            debug!(user_id = user.id, "resolved actor from audit context");
            return Some(user.clone());
        }

        // Creator id straight out of the mutation payload, taken verbatim
        // with no existence check.
        if let Some(created_by) = ctx.created_by {
            debug!(user_id = created_by, "resolved actor from payload created_by");
            return Some(ResolvedUser::minimal(created_by));
        }

        if let Some(token) = ctx.bearer_token.as_deref() {
            if let Some(user) = self.resolve_bearer(token).await {
                return Some(user);
            }
        }

        if let Some(user) = &ctx.fallback_user {
            debug!(user_id = user.id, "resolved actor from fallback slot");
            return Some(user.clone());
        }

        warn!("no actor identity found, audit entry will carry a null user");
        None
    }

    async fn resolve_bearer(&self, token: &str) -> Option<ResolvedUser> {
        let verified = match self.verifier.verify(token).await {
            Ok(claims) => claims,
            Err(err) => {
                // Expired and malformed tokens are expected traffic here.
                debug!(error = %err, "bearer token verification failed");
                return None;
            }
        };

        let user_id = match UserId::new(verified.user_id) {
            Ok(id) => id,
            Err(err) => {
                warn!(error = %err, "token carried an unusable user id");
                return None;
            }
        };

        match self.users.find_by_id(user_id).await {
            Ok(Some(user)) => {
                debug!(user_id = verified.user_id, "resolved actor from bearer token");
                Some(user.into())
            }
            Ok(None) => {
                debug!(
                    user_id = verified.user_id,
                    "token user not found, using minimal identity"
                );
                Some(ResolvedUser::minimal(verified.user_id))
            }
            Err(err) => {
                warn!(error = %err, "user lookup failed, using minimal identity");
                Some(ResolvedUser::minimal(verified.user_id))
            }
        }
    }
}
