// src/application/commands/products/delete.rs
use super::ProductCommandService;
use crate::{
    application::{audit::MutationParams, context::RequestContext, error::ApplicationResult},
    domain::product::value_objects::DocumentId,
};

pub struct DeleteProductCommand {
    pub document_id: String,
}

impl ProductCommandService {
    pub async fn delete_product(
        &self,
        ctx: &RequestContext,
        command: DeleteProductCommand,
    ) -> ApplicationResult<()> {
        let document_id = DocumentId::new(command.document_id)?;

        let mut params = MutationParams::for_document(document_id.clone());
        self.hooks.before_delete(&mut params).await;

        let deleted = self.write_repo.delete(&document_id).await?;
        self.hooks.after_delete(ctx, &deleted, &params).await;
        Ok(())
    }
}
