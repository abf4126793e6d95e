use crate::application::commands::products::{
    CreateProductCommand, DeleteProductCommand, UpdateProductCommand,
};
use crate::application::dto::ProductDto;
use crate::domain::product::entity::{ClassicalFields, ProprietaryFields};
use crate::domain::product::value_objects::Category;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::AuditContext;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
    http::StatusCode,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub proprietary_fields: Option<ProprietaryFields>,
    #[serde(default)]
    pub classical_fields: Option<ClassicalFields>,
    /// Creator id supplied by admin tooling; feeds identity resolution.
    #[serde(default)]
    pub created_by: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ListProductParams {
    #[serde(default)]
    pub limit: u32,
}

pub async fn create_product(
    Extension(state): Extension<HttpState>,
    AuditContext(ctx): AuditContext,
    Json(payload): Json<ProductPayload>,
) -> HttpResult<(StatusCode, Json<ProductDto>)> {
    let created = state
        .services
        .product_commands
        .create_product(
            &ctx,
            CreateProductCommand {
                name: payload.name,
                category: payload.category,
                description: payload.description,
                proprietary_fields: payload.proprietary_fields,
                classical_fields: payload.classical_fields,
                created_by: payload.created_by,
            },
        )
        .await
        .into_http()?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_product(
    Extension(state): Extension<HttpState>,
    AuditContext(ctx): AuditContext,
    Path(document_id): Path<String>,
    Json(payload): Json<ProductPayload>,
) -> HttpResult<Json<ProductDto>> {
    let updated = state
        .services
        .product_commands
        .update_product(
            &ctx,
            UpdateProductCommand {
                document_id,
                name: payload.name,
                category: payload.category,
                description: payload.description,
                proprietary_fields: payload.proprietary_fields,
                classical_fields: payload.classical_fields,
                created_by: payload.created_by,
            },
        )
        .await
        .into_http()?;
    Ok(Json(updated))
}

pub async fn delete_product(
    Extension(state): Extension<HttpState>,
    AuditContext(ctx): AuditContext,
    Path(document_id): Path<String>,
) -> HttpResult<StatusCode> {
    state
        .services
        .product_commands
        .delete_product(&ctx, DeleteProductCommand { document_id })
        .await
        .into_http()?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_products(
    Extension(state): Extension<HttpState>,
    Query(params): Query<ListProductParams>,
) -> HttpResult<Json<Vec<ProductDto>>> {
    let products = state
        .services
        .product_queries
        .list_products(params.limit)
        .await
        .into_http()?;
    Ok(Json(products))
}

pub async fn get_product(
    Extension(state): Extension<HttpState>,
    Path(document_id): Path<String>,
) -> HttpResult<Json<ProductDto>> {
    let product = state
        .services
        .product_queries
        .get_product(document_id)
        .await
        .into_http()?;
    Ok(Json(product))
}
