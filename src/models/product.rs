//! The product record managed by this service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use uuid::Uuid;

/// A single product record as stored and served.
///
/// Field names follow the wire contract of the service this API replaces,
/// so clients keep working unchanged. The schema is permissive: apart from
/// the server-assigned `id` and `createdat`, every field may be absent.
#[derive(Serialize, Deserialize, Clone, FromRow, Debug)]
pub struct Product {
    /// Store-assigned identifier (UUID v4). Immutable after insert.
    pub id: Uuid,

    /// Primary image reference.
    pub gambar: Option<String>,

    /// Product name.
    pub nama_product: Option<String>,

    /// Price. Not range-checked; the store accepts whatever the client sends.
    pub harga: Option<f64>,

    /// Free-text description.
    pub deskripsi: Option<String>,

    /// Rating.
    pub rate: Option<f64>,

    /// Category label.
    pub category: Option<String>,

    /// Seller or warehouse location.
    pub location: Option<String>,

    /// Units sold so far. Defaults to 0.
    pub units_sold: i64,

    /// Units in stock. Defaults to 0.
    pub stock: i64,

    /// Product type label.
    pub product_type: Option<String>,

    /// Set once at insert time, never touched by updates.
    pub createdat: DateTime<Utc>,

    /// Ordered gallery of detail images, stored as a JSON column.
    pub detailproduct: Json<Vec<DetailImage>>,
}

/// One entry in a product's detail-image gallery.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DetailImage {
    pub image: String,
}

/// Request body accepted by Create and Update.
///
/// Any subset of fields may be supplied; unknown fields are ignored.
/// Update applies this as a full replacement: omitted fields are written
/// back as NULL (or the declared default), not preserved.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ProductInput {
    pub gambar: Option<String>,
    pub nama_product: Option<String>,
    pub harga: Option<f64>,
    pub deskripsi: Option<String>,
    pub rate: Option<f64>,
    pub category: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub units_sold: i64,
    #[serde(default)]
    pub stock: i64,
    pub product_type: Option<String>,
    #[serde(default)]
    pub detailproduct: Vec<DetailImage>,
}
