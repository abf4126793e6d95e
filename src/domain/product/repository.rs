// src/domain/product/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::product::entity::{NewProduct, Product, ProductUpdate};
use crate::domain::product::value_objects::{DocumentId, ProductId};
use async_trait::async_trait;

/// Reads return the product with its component structures fully populated,
/// so a single fetch yields a complete snapshot.
#[async_trait]
pub trait ProductReadRepository: Send + Sync {
    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>>;
    async fn find_by_document_id(&self, document_id: &DocumentId) -> DomainResult<Option<Product>>;
    async fn list(&self, limit: u32) -> DomainResult<Vec<Product>>;
}

#[async_trait]
pub trait ProductWriteRepository: Send + Sync {
    async fn insert(&self, new_product: NewProduct) -> DomainResult<Product>;
    async fn update(&self, update: ProductUpdate) -> DomainResult<Product>;
    /// Deletes the product and returns the removed row, which the lifecycle
    /// hooks use when the pre-delete snapshot was never stashed.
    async fn delete(&self, document_id: &DocumentId) -> DomainResult<Product>;
}
