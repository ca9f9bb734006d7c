//! Defines routes for the product CRUD API.
//!
//! ## Structure
//! - **Collection endpoints**
//!   - `GET  /api/products` — list all products
//!   - `POST /api/products` — create a product
//!
//! - **Item endpoints**
//!   - `GET    /api/products/{id}` — fetch one product
//!   - `PUT    /api/products/{id}` — replace a product's fields
//!   - `DELETE /api/products/{id}` — remove a product
//!
//! Health endpoints (`/healthz`, `/readyz`) are mounted at the root.

use crate::{
    handlers::{
        health_handlers::{healthz, readyz},
        product_handlers::{
            create_product, delete_product, get_product, list_products, update_product,
        },
    },
    services::product_service::ProductService,
};
use axum::{Router, routing::get};

/// Build and return the router for all product API routes.
///
/// The router carries shared state (`ProductService`) to all handlers.
pub fn routes() -> Router<ProductService> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Collection routes
        .route("/api/products", get(list_products).post(create_product))
        // Item routes
        .route(
            "/api/products/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}
