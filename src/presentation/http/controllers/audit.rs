use crate::application::dto::{AuditLogDto, CursorPage};
use crate::application::queries::audit::{ListAuditLogsByProductQuery, ListAuditLogsQuery};
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};

#[derive(Debug, serde::Deserialize)]
pub struct ListAuditParams {
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub cursor: Option<String>,
}

fn default_limit() -> u32 {
    20
}

pub async fn list_audit_logs(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ListAuditParams>,
) -> HttpResult<Json<CursorPage<AuditLogDto>>> {
    let page = state
        .services
        .audit_queries
        .list_audit_logs(ListAuditLogsQuery {
            limit: params.limit,
            cursor: params.cursor,
        })
        .await
        .into_http()?;
    Ok(Json(page))
}

pub async fn list_audit_logs_for_product(
    Extension(state): Extension<HttpState>,
    Path(id): Path<String>,
    Query(params): Query<ListAuditParams>,
) -> HttpResult<Json<CursorPage<AuditLogDto>>> {
    let page = state
        .services
        .audit_queries
        .list_by_product(ListAuditLogsByProductQuery {
            key: id,
            limit: params.limit,
            cursor: params.cursor,
        })
        .await
        .into_http()?;
    Ok(Json(page))
}
