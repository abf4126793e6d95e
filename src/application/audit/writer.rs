// src/application/audit/writer.rs
use crate::application::context::RequestContext;
use crate::application::identity::IdentityResolver;
use crate::application::ports::time::Clock;
use crate::domain::audit::entity::{AuditAction, AuditLog};
use crate::domain::audit::repository::AuditLogRepository;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, error};

/// Assembles and persists audit entries. Failures are logged and swallowed:
/// an audit write must never abort the mutation that triggered it, so this
/// type exposes no error path at all. One write attempt per invocation.
pub struct AuditWriter {
    repo: Arc<dyn AuditLogRepository>,
    resolver: Arc<IdentityResolver>,
    clock: Arc<dyn Clock>,
}

impl AuditWriter {
    pub fn new(
        repo: Arc<dyn AuditLogRepository>,
        resolver: Arc<IdentityResolver>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repo,
            resolver,
            clock,
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn record(
        &self,
        ctx: &RequestContext,
        action: AuditAction,
        entity_type: &str,
        entity_id: i64,
        document_id: &str,
        changes: Map<String, Value>,
        previous_values: Map<String, Value>,
    ) {
        let user = self.resolver.resolve(ctx).await;

        debug!(
            %action,
            entity_id,
            document_id,
            user_id = user.as_ref().map(|u| u.id),
            change_count = changes.len(),
            "writing audit entry"
        );

        let log = AuditLog {
            id: None,
            user_id: user.map(|u| u.id),
            action,
            entity_type: entity_type.to_owned(),
            entity_id,
            entity_document_id: document_id.to_owned(),
            changes,
            previous_values,
            timestamp: self.clock.now(),
        };

        if let Err(err) = self.repo.insert(log).await {
            error!(error = %err, entity_id, %action, "failed to write audit entry");
        }
    }
}
