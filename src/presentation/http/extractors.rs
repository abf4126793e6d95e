// src/presentation/http/extractors.rs
use crate::application::context::{RequestContext, ResolvedUser};
use axum::{extract::FromRequestParts, http::request::Parts};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use std::convert::Infallible;

/// User attached by the authentication layer, when it ran for this request.
#[derive(Debug, Clone)]
pub struct SessionUser(pub ResolvedUser);

/// User attached by the audit-context middleware.
#[derive(Debug, Clone)]
pub struct AuditUser(pub ResolvedUser);

/// Last-resort identity for code paths that run detached from the request.
#[derive(Debug, Clone)]
pub struct FallbackUser(pub ResolvedUser);

/// Assembles the request-scoped identity context consumed by audit
/// resolution. Extraction never fails: an empty context is a valid context
/// and simply resolves to a null actor.
#[derive(Debug, Clone, Default)]
pub struct AuditContext(pub RequestContext);

impl<S> FromRequestParts<S> for AuditContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let mut ctx = RequestContext::new();

        if let Some(SessionUser(user)) = parts.extensions.get::<SessionUser>() {
            ctx.session_user = Some(user.clone());
        }
        if let Some(AuditUser(user)) = parts.extensions.get::<AuditUser>() {
            ctx.audit_user = Some(user.clone());
        }
        if let Some(FallbackUser(user)) = parts.extensions.get::<FallbackUser>() {
            ctx.fallback_user = Some(user.clone());
        }
        if let Some(header) = parts.headers.typed_get::<Authorization<Bearer>>() {
            ctx.bearer_token = Some(header.token().to_owned());
        }

        Ok(Self(ctx))
    }
}
