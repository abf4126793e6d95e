// src/domain/audit/entity.rs
use crate::domain::errors::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(DomainError::Validation(format!("unknown audit action '{other}'"))),
        }
    }
}

/// One immutable audit trail entry. Inserted once per mutation event and
/// never updated or deleted by this service.
#[derive(Debug, Clone)]
pub struct AuditLog {
    pub id: Option<i64>,
    pub user_id: Option<i64>,
    pub action: AuditAction,
    pub entity_type: String,
    pub entity_id: i64,
    pub entity_document_id: String,
    pub changes: Map<String, Value>,
    pub previous_values: Map<String, Value>,
    pub timestamp: DateTime<Utc>,
}
