use super::{AuditQueryService, common};
use crate::{
    application::{
        dto::{AuditLogDto, CursorPage},
        error::{ApplicationError, ApplicationResult},
    },
    domain::audit::cursor::AuditLogCursor,
};

pub struct ListAuditLogsQuery {
    pub limit: u32,
    pub cursor: Option<String>,
}

pub struct ListAuditLogsByProductQuery {
    /// Matched against both the numeric entity id and the document id.
    pub key: String,
    pub limit: u32,
    pub cursor: Option<String>,
}

impl AuditQueryService {
    pub async fn list_audit_logs(
        &self,
        query: ListAuditLogsQuery,
    ) -> ApplicationResult<CursorPage<AuditLogDto>> {
        let limit = common::normalize_limit(query.limit);
        let typed_cursor = decode_cursor(query.cursor.as_deref())?;

        let (items, next_cursor) = self
            .repo
            .list(limit, typed_cursor)
            .await
            .map_err(ApplicationError::from)?;
        let dtos: Vec<_> = items.into_iter().map(Into::<AuditLogDto>::into).collect();
        Ok(CursorPage::new(dtos, next_cursor))
    }

    pub async fn list_by_product(
        &self,
        query: ListAuditLogsByProductQuery,
    ) -> ApplicationResult<CursorPage<AuditLogDto>> {
        let key = query.key.trim();
        if key.is_empty() {
            return Err(ApplicationError::validation("product id is required"));
        }

        let limit = common::normalize_limit(query.limit);
        let typed_cursor = decode_cursor(query.cursor.as_deref())?;

        let (items, next_cursor) = self
            .repo
            .find_by_entity(key, limit, typed_cursor)
            .await
            .map_err(ApplicationError::from)?;
        let dtos: Vec<_> = items.into_iter().map(Into::<AuditLogDto>::into).collect();
        Ok(CursorPage::new(dtos, next_cursor))
    }
}

fn decode_cursor(cursor: Option<&str>) -> ApplicationResult<Option<AuditLogCursor>> {
    match cursor {
        Some(token) => Ok(Some(
            AuditLogCursor::decode(token).map_err(ApplicationError::from)?,
        )),
        None => Ok(None),
    }
}
