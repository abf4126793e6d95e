// src/infrastructure/repositories/postgres_audit_log.rs
use super::map_sqlx;
use crate::domain::audit::cursor::AuditLogCursor;
use crate::domain::audit::entity::{AuditAction, AuditLog};
use crate::domain::audit::repository::AuditLogRepository;
use crate::domain::errors::{DomainError, DomainResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

#[derive(Clone)]
pub struct PostgresAuditLogRepository {
    pool: PgPool,
}

impl PostgresAuditLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct AuditLogRow {
    id: i64,
    user_id: Option<i64>,
    action: String,
    entity_type: String,
    entity_id: i64,
    entity_document_id: String,
    changes: Value,
    previous_values: Value,
    timestamp: DateTime<Utc>,
}

impl TryFrom<AuditLogRow> for AuditLog {
    type Error = DomainError;

    fn try_from(row: AuditLogRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Some(row.id),
            user_id: row.user_id,
            action: AuditAction::from_str(&row.action)?,
            entity_type: row.entity_type,
            entity_id: row.entity_id,
            entity_document_id: row.entity_document_id,
            changes: into_map(row.changes),
            previous_values: into_map(row.previous_values),
            timestamp: row.timestamp,
        })
    }
}

fn into_map(value: Value) -> serde_json::Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}

const SELECT_COLUMNS: &str = "id, user_id, action, entity_type, entity_id, \
     entity_document_id, changes, previous_values, timestamp";

fn page_from(rows: Vec<AuditLogRow>, limit: u32) -> DomainResult<(Vec<AuditLog>, Option<String>)> {
    let has_more = rows.len() as u32 > limit;
    let items: Vec<AuditLog> = rows
        .into_iter()
        .take(limit as usize)
        .map(AuditLog::try_from)
        .collect::<DomainResult<_>>()?;

    let next_cursor = if has_more {
        items.last().and_then(|last| {
            last.id
                .map(|id| AuditLogCursor::new(last.timestamp, id).encode())
        })
    } else {
        None
    };

    Ok((items, next_cursor))
}

#[async_trait]
impl AuditLogRepository for PostgresAuditLogRepository {
    async fn insert(&self, log: AuditLog) -> DomainResult<()> {
        sqlx::query(
            "INSERT INTO audit_logs \
             (user_id, action, entity_type, entity_id, entity_document_id, changes, previous_values, timestamp) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(log.user_id)
        .bind(log.action.as_str())
        .bind(log.entity_type)
        .bind(log.entity_id)
        .bind(log.entity_document_id)
        .bind(Value::Object(log.changes))
        .bind(Value::Object(log.previous_values))
        .bind(log.timestamp)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(())
    }

    async fn list(
        &self,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditLog>, Option<String>)> {
        let rows = match cursor {
            Some(cursor) => {
                sqlx::query_as::<_, AuditLogRow>(&format!(
                    "SELECT {SELECT_COLUMNS} FROM audit_logs \
                     WHERE (timestamp, id) < ($1, $2) \
                     ORDER BY timestamp DESC, id DESC LIMIT $3"
                ))
                .bind(cursor.timestamp)
                .bind(cursor.id)
                .bind(i64::from(limit) + 1)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, AuditLogRow>(&format!(
                    "SELECT {SELECT_COLUMNS} FROM audit_logs \
                     ORDER BY timestamp DESC, id DESC LIMIT $1"
                ))
                .bind(i64::from(limit) + 1)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_sqlx)?;

        page_from(rows, limit)
    }

    async fn find_by_entity(
        &self,
        key: &str,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditLog>, Option<String>)> {
        // The key may be a numeric row id or a document id; match both.
        let rows = match cursor {
            Some(cursor) => {
                sqlx::query_as::<_, AuditLogRow>(&format!(
                    "SELECT {SELECT_COLUMNS} FROM audit_logs \
                     WHERE (entity_id::text = $1 OR entity_document_id = $1) \
                       AND (timestamp, id) < ($2, $3) \
                     ORDER BY timestamp DESC, id DESC LIMIT $4"
                ))
                .bind(key)
                .bind(cursor.timestamp)
                .bind(cursor.id)
                .bind(i64::from(limit) + 1)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, AuditLogRow>(&format!(
                    "SELECT {SELECT_COLUMNS} FROM audit_logs \
                     WHERE (entity_id::text = $1 OR entity_document_id = $1) \
                     ORDER BY timestamp DESC, id DESC LIMIT $2"
                ))
                .bind(key)
                .bind(i64::from(limit) + 1)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_sqlx)?;

        page_from(rows, limit)
    }
}
