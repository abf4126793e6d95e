// src/application/commands/products/create.rs
use super::ProductCommandService;
use crate::{
    application::{
        context::RequestContext,
        dto::ProductDto,
        error::ApplicationResult,
    },
    domain::product::{
        entity::{ClassicalFields, NewProduct, ProductContent, ProprietaryFields},
        value_objects::{Category, DocumentId},
    },
};

pub struct CreateProductCommand {
    pub name: String,
    pub category: Category,
    pub description: String,
    pub proprietary_fields: Option<ProprietaryFields>,
    pub classical_fields: Option<ClassicalFields>,
    /// Creator id carried in the payload, consumed by identity resolution.
    pub created_by: Option<i64>,
}

impl ProductCommandService {
    pub async fn create_product(
        &self,
        ctx: &RequestContext,
        command: CreateProductCommand,
    ) -> ApplicationResult<ProductDto> {
        let ctx = ctx.clone().with_created_by(command.created_by);

        let content = ProductContent {
            name: command.name,
            category: command.category,
            description: command.description,
            proprietary_fields: command.proprietary_fields,
            classical_fields: command.classical_fields,
        };
        let new_product = NewProduct::new(DocumentId::generate(), content, self.clock.now())?;

        let created = self.write_repo.insert(new_product).await?;
        self.hooks.after_create(&ctx, &created).await;
        Ok(created.into())
    }
}
