//! HTTP handlers for the five product CRUD operations.
//! Each handler is a thin translation between the HTTP surface and
//! `ProductService`; store failures are converted to responses here and
//! never propagate as raw faults.

use crate::{
    errors::AppError,
    models::product::ProductInput,
    services::product_service::{ProductError, ProductService},
};
use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde_json::json;

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) => AppError::not_found("Product not found"),
            ProductError::InvalidId(_) => AppError::bad_request("Invalid product ID"),
            // Malformed ids on the get/update paths fail inside the lookup
            // and surface like any other store failure.
            ProductError::MalformedLookup(e) => AppError::internal(e.to_string()),
            ProductError::Sqlx(e) => AppError::internal(e.to_string()),
        }
    }
}

/// GET `/api/products` — every stored product, insertion order.
pub async fn list_products(
    State(service): State<ProductService>,
) -> Result<impl IntoResponse, AppError> {
    let products = service.list_products().await?;
    Ok(Json(products))
}

/// GET `/api/products/{id}` — one product, 404 when the id does not resolve.
pub async fn get_product(
    State(service): State<ProductService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let product = service.get_product(&id).await?;
    Ok(Json(product))
}

/// POST `/api/products` — create from a partial record.
///
/// Unknown body fields are ignored and no field-level validation is done;
/// a negative price is stored as sent. Echoes the full created record,
/// including the assigned id and creation timestamp.
pub async fn create_product(
    State(service): State<ProductService>,
    Json(input): Json<ProductInput>,
) -> Result<impl IntoResponse, AppError> {
    let product = service.create_product(input).await?;
    Ok(Json(product))
}

/// PUT `/api/products/{id}` — full replacement of the mutable fields.
///
/// Omitted fields are cleared, not preserved. Returns the post-update
/// record, or 404 when the id does not resolve.
pub async fn update_product(
    State(service): State<ProductService>,
    Path(id): Path<String>,
    Json(input): Json<ProductInput>,
) -> Result<impl IntoResponse, AppError> {
    let product = service.update_product(&id, input).await?;
    Ok(Json(product))
}

/// DELETE `/api/products/{id}` — hard delete.
///
/// A malformed id is rejected with 400 before the store is consulted;
/// a well-formed id with no matching record yields 404.
pub async fn delete_product(
    State(service): State<ProductService>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    service.delete_product(&id).await?;
    Ok(Json(json!({ "message": "Product deleted successfully" })))
}
