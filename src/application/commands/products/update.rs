// src/application/commands/products/update.rs
use super::ProductCommandService;
use crate::{
    application::{
        audit::MutationParams,
        context::RequestContext,
        dto::ProductDto,
        error::ApplicationResult,
    },
    domain::product::{
        entity::{ClassicalFields, ProductContent, ProductUpdate, ProprietaryFields},
        value_objects::{Category, DocumentId},
    },
};

pub struct UpdateProductCommand {
    pub document_id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub proprietary_fields: Option<ProprietaryFields>,
    pub classical_fields: Option<ClassicalFields>,
    pub created_by: Option<i64>,
}

impl ProductCommandService {
    pub async fn update_product(
        &self,
        ctx: &RequestContext,
        command: UpdateProductCommand,
    ) -> ApplicationResult<ProductDto> {
        let ctx = ctx.clone().with_created_by(command.created_by);
        let document_id = DocumentId::new(command.document_id)?;

        let content = ProductContent {
            name: command.name,
            category: command.category,
            description: command.description,
            proprietary_fields: command.proprietary_fields,
            classical_fields: command.classical_fields,
        };
        let update = ProductUpdate::new(document_id.clone(), content, self.clock.now())?;

        // Pre-image is stashed before the write so the post-phase can diff
        // against it even though the row has already changed by then.
        let mut params = MutationParams::for_document(document_id);
        self.hooks.before_update(&mut params).await;

        let updated = self.write_repo.update(update).await?;
        self.hooks.after_update(&ctx, &updated, &params).await;
        Ok(updated.into())
    }
}
