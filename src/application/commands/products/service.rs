// src/application/commands/products/service.rs
use std::sync::Arc;

use crate::{
    application::{audit::ProductAuditHooks, ports::time::Clock},
    domain::product::ProductWriteRepository,
};

pub struct ProductCommandService {
    pub(super) write_repo: Arc<dyn ProductWriteRepository>,
    pub(super) hooks: Arc<ProductAuditHooks>,
    pub(super) clock: Arc<dyn Clock>,
}

impl ProductCommandService {
    pub fn new(
        write_repo: Arc<dyn ProductWriteRepository>,
        hooks: Arc<ProductAuditHooks>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            write_repo,
            hooks,
            clock,
        }
    }
}
