// src/infrastructure/repositories/postgres_product.rs
use super::map_sqlx;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::product::entity::{
    ClassicalFields, NewProduct, Product, ProductUpdate, ProprietaryFields,
};
use crate::domain::product::repository::{ProductReadRepository, ProductWriteRepository};
use crate::domain::product::value_objects::{Category, DocumentId, ProductId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, types::Json};
use std::str::FromStr;

#[derive(Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ProductRow {
    id: i64,
    document_id: String,
    name: String,
    category: String,
    description: String,
    proprietary_fields: Option<Json<ProprietaryFields>>,
    classical_fields: Option<Json<ClassicalFields>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    published_at: Option<DateTime<Utc>>,
    locale: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DomainError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(row.id)?,
            document_id: DocumentId::new(row.document_id)?,
            name: row.name,
            category: Category::from_str(&row.category)?,
            description: row.description,
            proprietary_fields: row.proprietary_fields.map(|json| json.0),
            classical_fields: row.classical_fields.map(|json| json.0),
            created_at: row.created_at,
            updated_at: row.updated_at,
            published_at: row.published_at,
            locale: row.locale,
        })
    }
}

const SELECT_COLUMNS: &str = "id, document_id, name, category, description, \
     proprietary_fields, classical_fields, created_at, updated_at, published_at, locale";

#[async_trait]
impl ProductReadRepository for PostgresProductRepository {
    async fn find_by_id(&self, id: ProductId) -> DomainResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(i64::from(id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Product::try_from).transpose()
    }

    async fn find_by_document_id(&self, document_id: &DocumentId) -> DomainResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM products WHERE document_id = $1"
        ))
        .bind(document_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        row.map(Product::try_from).transpose()
    }

    async fn list(&self, limit: u32) -> DomainResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM products ORDER BY id DESC LIMIT $1"
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        rows.into_iter().map(Product::try_from).collect()
    }
}

#[async_trait]
impl ProductWriteRepository for PostgresProductRepository {
    async fn insert(&self, new_product: NewProduct) -> DomainResult<Product> {
        let NewProduct {
            document_id,
            content,
            created_at,
            updated_at,
        } = new_product;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products \
             (document_id, name, category, description, proprietary_fields, classical_fields, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(document_id.as_str())
        .bind(&content.name)
        .bind(content.category.as_str())
        .bind(&content.description)
        .bind(content.proprietary_fields.as_ref().map(Json))
        .bind(content.classical_fields.as_ref().map(Json))
        .bind(created_at)
        .bind(updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Product::try_from(row)
    }

    async fn update(&self, update: ProductUpdate) -> DomainResult<Product> {
        let ProductUpdate {
            document_id,
            content,
            updated_at,
        } = update;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products \
             SET name = $2, category = $3, description = $4, \
                 proprietary_fields = $5, classical_fields = $6, updated_at = $7 \
             WHERE document_id = $1 \
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(document_id.as_str())
        .bind(&content.name)
        .bind(content.category.as_str())
        .bind(&content.description)
        .bind(content.proprietary_fields.as_ref().map(Json))
        .bind(content.classical_fields.as_ref().map(Json))
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("product not found".into()))?;

        Product::try_from(row)
    }

    async fn delete(&self, document_id: &DocumentId) -> DomainResult<Product> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "DELETE FROM products WHERE document_id = $1 RETURNING {SELECT_COLUMNS}"
        ))
        .bind(document_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?
        .ok_or_else(|| DomainError::NotFound("product not found".into()))?;

        Product::try_from(row)
    }
}
