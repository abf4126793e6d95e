// src/domain/audit/repository.rs
use crate::domain::audit::cursor::AuditLogCursor;
use crate::domain::audit::entity::AuditLog;
use crate::domain::errors::DomainResult;
use async_trait::async_trait;

#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn insert(&self, log: AuditLog) -> DomainResult<()>;

    /// Newest-first page of the whole trail.
    async fn list(
        &self,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditLog>, Option<String>)>;

    /// Newest-first page of entries whose numeric entity id or document id
    /// matches `key`. A single opaque key covers both identifier kinds.
    async fn find_by_entity(
        &self,
        key: &str,
        limit: u32,
        cursor: Option<AuditLogCursor>,
    ) -> DomainResult<(Vec<AuditLog>, Option<String>)>;
}
