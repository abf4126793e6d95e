// src/presentation/http/middleware/audit_context.rs
use crate::application::context::RequestContext;
use crate::presentation::http::extractors::{AuditUser, FallbackUser, SessionUser};
use crate::presentation::http::state::HttpState;
use axum::{Extension, extract::Request, middleware::Next, response::Response};
use headers::{Authorization, HeaderMapExt, authorization::Bearer};
use tracing::debug;

const SKIP_PREFIXES: [&str; 2] = ["/uploads/", "/assets/"];
const SKIP_PATHS: [&str; 2] = ["/health", "/_health"];

/// Pre-resolves the acting user for audit logging. Runs before the
/// controllers so the identity is available even on paths where the
/// authentication layer is skipped, and populates the request-scoped
/// fallback slot used by deferred lifecycle callbacks.
pub async fn audit_context(
    Extension(state): Extension<HttpState>,
    mut req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path();
    if SKIP_PATHS.contains(&path) || SKIP_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
        return next.run(req).await;
    }

    if req.extensions().get::<SessionUser>().is_none() {
        if let Some(header) = req.headers().typed_get::<Authorization<Bearer>>() {
            let ctx = RequestContext::new().with_bearer_token(header.token());
            if let Some(user) = state.services.identity_resolver().resolve(&ctx).await {
                debug!(user_id = user.id, "audit context resolved from bearer token");
                req.extensions_mut().insert(AuditUser(user.clone()));
                req.extensions_mut().insert(FallbackUser(user));
            }
        } else {
            debug!(path = %req.uri().path(), "no user context and no authorization header");
        }
    } else if let Some(SessionUser(user)) = req.extensions().get::<SessionUser>().cloned() {
        req.extensions_mut().insert(FallbackUser(user));
    }

    next.run(req).await
}
