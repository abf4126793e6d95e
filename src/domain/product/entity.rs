// src/domain/product/entity.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::product::value_objects::{Category, DocumentId, ProductId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub sr_no: i64,
    pub qty: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProprietaryFields {
    pub usage: Option<String>,
    pub ingredients: Option<String>,
    pub dosage: Option<String>,
    pub price_list: Option<Vec<PriceEntry>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ClassicalFields {
    pub sub_category: Option<String>,
    pub usage: Option<String>,
    pub ingredients: Option<String>,
    pub dosage_anupan: Option<String>,
    pub reference: Option<String>,
    pub price_list: Option<Vec<PriceEntry>>,
}

/// The mutable content of a product: everything except identifiers and
/// system-managed timestamps. Exactly one of the two component structures
/// must be populated, matching the category tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductContent {
    pub name: String,
    pub category: Category,
    pub description: String,
    pub proprietary_fields: Option<ProprietaryFields>,
    pub classical_fields: Option<ClassicalFields>,
}

impl ProductContent {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("product name must not be empty".into()));
        }
        match self.category {
            Category::Proprietary => {
                if self.classical_fields.is_some() {
                    return Err(DomainError::Validation(
                        "proprietary products must not carry classical_fields".into(),
                    ));
                }
            }
            Category::Classical => {
                if self.proprietary_fields.is_some() {
                    return Err(DomainError::Validation(
                        "classical products must not carry proprietary_fields".into(),
                    ));
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub document_id: DocumentId,
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

impl Product {
    /// Flatten the product into a JSON object used as one side of a diff.
    /// Serialisation of the entity cannot fail; a non-object result would
    /// indicate a programming error, so it degrades to an empty map.
    pub fn snapshot(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub document_id: DocumentId,
    pub content: ProductContent,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewProduct {
    pub fn new(
        document_id: DocumentId,
        content: ProductContent,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        content.validate()?;
        Ok(Self {
            document_id,
            content,
            created_at: now,
            updated_at: now,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub document_id: DocumentId,
    pub content: ProductContent,
    pub updated_at: DateTime<Utc>,
}

impl ProductUpdate {
    pub fn new(
        document_id: DocumentId,
        content: ProductContent,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        content.validate()?;
        Ok(Self {
            document_id,
            content,
            updated_at: now,
        })
    }
}
