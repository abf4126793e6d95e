// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        audit::{AuditWriter, ProductAuditHooks},
        commands::products::ProductCommandService,
        identity::IdentityResolver,
        ports::{security::TokenVerifier, time::Clock},
        queries::{audit::AuditQueryService, products::ProductQueryService},
    },
    domain::{
        audit::repository::AuditLogRepository,
        product::{ProductReadRepository, ProductWriteRepository},
        user::UserRepository,
    },
};

pub struct ApplicationServices {
    pub product_commands: Arc<ProductCommandService>,
    pub product_queries: Arc<ProductQueryService>,
    pub audit_queries: Arc<AuditQueryService>,
    identity_resolver: Arc<IdentityResolver>,
}

impl ApplicationServices {
    pub fn new(
        product_read_repo: Arc<dyn ProductReadRepository>,
        product_write_repo: Arc<dyn ProductWriteRepository>,
        audit_log_repo: Arc<dyn AuditLogRepository>,
        user_repo: Arc<dyn UserRepository>,
        token_verifier: Arc<dyn TokenVerifier>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let identity_resolver = Arc::new(IdentityResolver::new(
            Arc::clone(&token_verifier),
            Arc::clone(&user_repo),
        ));
        let writer = Arc::new(AuditWriter::new(
            Arc::clone(&audit_log_repo),
            Arc::clone(&identity_resolver),
            Arc::clone(&clock),
        ));
        let hooks = Arc::new(ProductAuditHooks::new(
            Arc::clone(&product_read_repo),
            writer,
        ));

        let product_commands = Arc::new(ProductCommandService::new(
            product_write_repo,
            hooks,
            Arc::clone(&clock),
        ));
        let product_queries = Arc::new(ProductQueryService::new(Arc::clone(&product_read_repo)));
        let audit_queries = Arc::new(AuditQueryService::new(audit_log_repo));

        Self {
            product_commands,
            product_queries,
            audit_queries,
            identity_resolver,
        }
    }

    pub fn identity_resolver(&self) -> Arc<IdentityResolver> {
        Arc::clone(&self.identity_resolver)
    }
}
