//! src/services/product_service.rs
//!
//! ProductService — the persistence adapter between the HTTP handlers and
//! the SQLite store. It owns the product schema knowledge (column set,
//! defaults, server-assigned fields) and exposes exactly the five
//! single-record operations the API needs. No pagination, no filtering,
//! no multi-record transactions.

use crate::models::product::{Product, ProductInput};
use chrono::Utc;
use sqlx::SqlitePool;
use sqlx::types::Json;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found")]
    NotFound(Uuid),
    #[error("Invalid product ID")]
    InvalidId(String),
    #[error("{0}")]
    MalformedLookup(#[from] uuid::Error),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub type ProductResult<T> = Result<T, ProductError>;

const PRODUCT_COLUMNS: &str = "id, gambar, nama_product, harga, deskripsi, rate, category, \
     location, units_sold, stock, product_type, createdat, detailproduct";

/// ProductService provides the five CRUD operations over the products table:
/// - List all products (insertion order)
/// - Get one product by id
/// - Create a product (server assigns id and creation timestamp)
/// - Update a product in place (full replacement of mutable fields)
/// - Delete a product (hard delete)
///
/// Each call is a single statement against the shared pool; the store's
/// per-row atomicity is all the coordination these operations need.
#[derive(Clone)]
pub struct ProductService {
    /// Shared SQLite connection pool, acquired once at startup.
    pub db: Arc<SqlitePool>,
}

impl ProductService {
    pub fn new(db: Arc<SqlitePool>) -> Self {
        Self { db }
    }

    /// Syntactic identifier check: could this string be a store-assigned id?
    ///
    /// Says nothing about whether a record with that id exists. Only the
    /// delete path consults this before touching the store; get and update
    /// let a malformed id fail inside the lookup instead.
    pub fn is_valid_id(id: &str) -> bool {
        Uuid::parse_str(id).is_ok()
    }

    /// Fetch every stored product in the table's natural (insertion) order.
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY rowid"
        ))
        .fetch_all(&*self.db)
        .await?;
        Ok(products)
    }

    /// Fetch a single product by its identifier string.
    ///
    /// A malformed id fails the UUID parse here and surfaces as
    /// `MalformedLookup` — the generic failure path, not a 400. Returns
    /// `NotFound` when the id parses but no row matches.
    pub async fn get_product(&self, id: &str) -> ProductResult<Product> {
        let id = Uuid::parse_str(id)?;
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"
        ))
        .bind(id)
        .fetch_one(&*self.db)
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => ProductError::NotFound(id),
            other => ProductError::Sqlx(other),
        })
    }

    /// Insert a new product and return the stored record.
    ///
    /// The store assigns the id (UUID v4) and the creation timestamp; both
    /// are immutable afterwards. Fields absent from the input land as NULL
    /// or their declared defaults (`units_sold`/`stock` = 0,
    /// `detailproduct` = []). No field-level validation is applied.
    pub async fn create_product(&self, input: ProductInput) -> ProductResult<Product> {
        let id = Uuid::new_v4();
        let createdat = Utc::now();

        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO products (
                id, gambar, nama_product, harga, deskripsi, rate, category,
                location, units_sold, stock, product_type, createdat, detailproduct
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.gambar)
        .bind(&input.nama_product)
        .bind(input.harga)
        .bind(&input.deskripsi)
        .bind(input.rate)
        .bind(&input.category)
        .bind(&input.location)
        .bind(input.units_sold)
        .bind(input.stock)
        .bind(&input.product_type)
        .bind(createdat)
        .bind(Json(&input.detailproduct))
        .fetch_one(&*self.db)
        .await?;

        debug!("created product {}", product.id);
        Ok(product)
    }

    /// Overwrite a product's mutable fields and return the updated record.
    ///
    /// Full-replace semantics: every mutable column is written from the
    /// input, so fields the client omits are cleared to NULL or their
    /// defaults rather than preserved. `id` and `createdat` are never
    /// touched. Malformed ids fail the parse like `get_product` does.
    pub async fn update_product(&self, id: &str, input: ProductInput) -> ProductResult<Product> {
        let id = Uuid::parse_str(id)?;

        sqlx::query_as::<_, Product>(&format!(
            "UPDATE products SET
                gambar = ?, nama_product = ?, harga = ?, deskripsi = ?,
                rate = ?, category = ?, location = ?, units_sold = ?,
                stock = ?, product_type = ?, detailproduct = ?
             WHERE id = ?
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&input.gambar)
        .bind(&input.nama_product)
        .bind(input.harga)
        .bind(&input.deskripsi)
        .bind(input.rate)
        .bind(&input.category)
        .bind(&input.location)
        .bind(input.units_sold)
        .bind(input.stock)
        .bind(&input.product_type)
        .bind(Json(&input.detailproduct))
        .bind(id)
        .fetch_optional(&*self.db)
        .await?
        .ok_or(ProductError::NotFound(id))
    }

    /// Permanently remove a product. No tombstone is kept.
    ///
    /// Validates the identifier format up front and refuses with
    /// `InvalidId` before any store access. A well-formed id with no
    /// matching row yields `NotFound`, which keeps repeated deletes
    /// harmless.
    pub async fn delete_product(&self, id: &str) -> ProductResult<Product> {
        if !Self::is_valid_id(id) {
            return Err(ProductError::InvalidId(id.to_string()));
        }
        let id = Uuid::parse_str(id)?;

        let deleted = sqlx::query_as::<_, Product>(&format!(
            "DELETE FROM products WHERE id = ? RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .fetch_optional(&*self.db)
        .await?
        .ok_or(ProductError::NotFound(id))?;

        debug!("deleted product {}", deleted.id);
        Ok(deleted)
    }

    /// Compute the next candidate in a sequential numeric id scheme.
    ///
    /// The handlers never call this: the store assigns UUIDs natively.
    /// It exists as an opt-in strategy for deployments whose store cannot
    /// assign identifiers itself — most recent row plus one, starting at 1
    /// on an empty table.
    pub async fn next_sequential_id(&self) -> ProductResult<i64> {
        let next = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(MAX(rowid), 0) + 1 FROM products",
        )
        .fetch_one(&*self.db)
        .await?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::DetailImage;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn service() -> ProductService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        for stmt in include_str!("../../migrations/0001_init.sql")
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            sqlx::query(stmt).execute(&pool).await.expect("migration");
        }
        ProductService::new(Arc::new(pool))
    }

    fn chair() -> ProductInput {
        ProductInput {
            nama_product: Some("Chair".into()),
            harga: Some(50.0),
            ..Default::default()
        }
    }

    #[test]
    fn id_predicate_accepts_uuids_only() {
        assert!(ProductService::is_valid_id(
            "550e8400-e29b-41d4-a716-446655440000"
        ));
        assert!(!ProductService::is_valid_id("not-a-valid-id"));
        assert!(!ProductService::is_valid_id(""));
    }

    #[tokio::test]
    async fn create_then_get_round_trips_fields_and_defaults() {
        let svc = service().await;
        let before = Utc::now() - chrono::Duration::seconds(1);

        let created = svc.create_product(chair()).await.unwrap();
        assert_eq!(created.nama_product.as_deref(), Some("Chair"));
        assert_eq!(created.harga, Some(50.0));
        assert_eq!(created.units_sold, 0);
        assert_eq!(created.stock, 0);
        assert!(created.detailproduct.0.is_empty());
        assert!(created.createdat >= before && created.createdat <= Utc::now());

        let fetched = svc.get_product(&created.id.to_string()).await.unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.nama_product, created.nama_product);
        assert_eq!(fetched.harga, created.harga);
        assert_eq!(fetched.createdat, created.createdat);
    }

    #[tokio::test]
    async fn create_stores_detail_images_in_order() {
        let svc = service().await;
        let input = ProductInput {
            detailproduct: vec![
                DetailImage { image: "a.jpg".into() },
                DetailImage { image: "b.jpg".into() },
            ],
            ..chair()
        };

        let created = svc.create_product(input).await.unwrap();
        let fetched = svc.get_product(&created.id.to_string()).await.unwrap();
        assert_eq!(
            fetched.detailproduct.0,
            vec![
                DetailImage { image: "a.jpg".into() },
                DetailImage { image: "b.jpg".into() },
            ]
        );
    }

    #[tokio::test]
    async fn create_accepts_unvalidated_values() {
        // No field-level validation: a negative price is stored as sent.
        let svc = service().await;
        let created = svc
            .create_product(ProductInput {
                harga: Some(-10.0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.harga, Some(-10.0));
    }

    #[tokio::test]
    async fn get_missing_id_is_not_found() {
        let svc = service().await;
        let err = svc.get_product(&Uuid::new_v4().to_string()).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn get_malformed_id_fails_in_lookup_not_as_invalid_id() {
        let svc = service().await;
        let err = svc.get_product("not-a-valid-id").await.unwrap_err();
        assert!(matches!(err, ProductError::MalformedLookup(_)));
    }

    #[tokio::test]
    async fn update_replaces_all_mutable_fields() {
        let svc = service().await;
        let created = svc
            .create_product(ProductInput {
                deskripsi: Some("wooden".into()),
                stock: 7,
                ..chair()
            })
            .await
            .unwrap();

        // Only harga in the replacement: everything else is cleared.
        let updated = svc
            .update_product(
                &created.id.to_string(),
                ProductInput {
                    harga: Some(60.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.harga, Some(60.0));
        assert_eq!(updated.nama_product, None);
        assert_eq!(updated.deskripsi, None);
        assert_eq!(updated.stock, 0);
        // id and creation timestamp survive the rewrite untouched
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.createdat, created.createdat);
    }

    #[tokio::test]
    async fn update_missing_id_leaves_store_unchanged() {
        let svc = service().await;
        let created = svc.create_product(chair()).await.unwrap();

        let err = svc
            .update_product(&Uuid::new_v4().to_string(), ProductInput::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));

        let fetched = svc.get_product(&created.id.to_string()).await.unwrap();
        assert_eq!(fetched.nama_product.as_deref(), Some("Chair"));
    }

    #[tokio::test]
    async fn delete_removes_record_permanently() {
        let svc = service().await;
        let created = svc.create_product(chair()).await.unwrap();
        let id = created.id.to_string();

        let deleted = svc.delete_product(&id).await.unwrap();
        assert_eq!(deleted.id, created.id);

        let err = svc.get_product(&id).await.unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_well_formed_missing_id_is_not_found() {
        let svc = service().await;
        let err = svc
            .delete_product(&Uuid::new_v4().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ProductError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_malformed_id_is_rejected_before_store_access() {
        let svc = service().await;
        let err = svc.delete_product("not-a-valid-id").await.unwrap_err();
        assert!(matches!(err, ProductError::InvalidId(_)));
    }

    #[tokio::test]
    async fn list_tracks_creates_and_deletes_in_order() {
        let svc = service().await;
        assert!(svc.list_products().await.unwrap().is_empty());

        let first = svc.create_product(chair()).await.unwrap();
        let second = svc
            .create_product(ProductInput {
                nama_product: Some("Table".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        let listed = svc.list_products().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.id);
        assert_eq!(listed[1].id, second.id);

        svc.delete_product(&first.id.to_string()).await.unwrap();
        let listed = svc.list_products().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, second.id);
    }

    #[tokio::test]
    async fn sequential_id_helper_counts_from_one() {
        let svc = service().await;
        assert_eq!(svc.next_sequential_id().await.unwrap(), 1);

        svc.create_product(chair()).await.unwrap();
        assert_eq!(svc.next_sequential_id().await.unwrap(), 2);
    }
}
