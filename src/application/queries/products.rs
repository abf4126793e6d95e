// src/application/queries/products.rs
use std::sync::Arc;

use crate::{
    application::{
        dto::ProductDto,
        error::{ApplicationError, ApplicationResult},
    },
    domain::product::{ProductReadRepository, value_objects::DocumentId},
};

pub struct ProductQueryService {
    repo: Arc<dyn ProductReadRepository>,
}

impl ProductQueryService {
    pub fn new(repo: Arc<dyn ProductReadRepository>) -> Self {
        Self { repo }
    }

    pub async fn list_products(&self, limit: u32) -> ApplicationResult<Vec<ProductDto>> {
        let limit = if limit == 0 { 50 } else { limit.min(100) };
        let products = self.repo.list(limit).await.map_err(ApplicationError::from)?;
        Ok(products.into_iter().map(Into::into).collect())
    }

    pub async fn get_product(&self, document_id: String) -> ApplicationResult<ProductDto> {
        let document_id = DocumentId::new(document_id)?;
        self.repo
            .find_by_document_id(&document_id)
            .await
            .map_err(ApplicationError::from)?
            .map(Into::into)
            .ok_or_else(|| ApplicationError::not_found("product not found"))
    }
}
