use crate::domain::product::entity::{ClassicalFields, Product, ProprietaryFields};
use crate::domain::product::value_objects::Category;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ProductDto {
    pub id: i64,
    pub document_id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub proprietary_fields: Option<ProprietaryFields>,
    pub classical_fields: Option<ClassicalFields>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
    pub locale: Option<String>,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.into(),
            document_id: product.document_id.to_string(),
            name: product.name,
            category: product.category,
            description: product.description,
            proprietary_fields: product.proprietary_fields,
            classical_fields: product.classical_fields,
            created_at: product.created_at,
            updated_at: product.updated_at,
            published_at: product.published_at,
            locale: product.locale,
        }
    }
}
