use crate::domain::audit::entity::{AuditAction, AuditLog};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogDto {
    pub id: i64,
    pub user_id: Option<i64>,
    pub action: AuditAction,
    pub entity_type: String,
    pub entity_id: i64,
    pub entity_document_id: String,
    pub changes: Map<String, Value>,
    pub previous_values: Map<String, Value>,
    pub timestamp: DateTime<Utc>,
}

impl From<AuditLog> for AuditLogDto {
    fn from(log: AuditLog) -> Self {
        Self {
            id: log.id.unwrap_or_default(),
            user_id: log.user_id,
            action: log.action,
            entity_type: log.entity_type,
            entity_id: log.entity_id,
            entity_document_id: log.entity_document_id,
            changes: log.changes,
            previous_values: log.previous_values,
            timestamp: log.timestamp,
        }
    }
}
