//! Product catalog entity model and DTOs.
//!
//! Products are keyed by a TEXT slug rather than a BIGSERIAL: the slug is
//! the weak-reference key that product blocks store, and it doubles as the
//! shop URL segment.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use verdia_core::catalog::ProductSummary;
use verdia_core::types::Timestamp;

/// A row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Price in minor currency units (paise).
    pub price_cents: i64,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub in_stock: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Product {
    /// The slice of this product the renderer needs.
    pub fn summary(&self) -> ProductSummary {
        ProductSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            price_cents: self.price_cents,
            image_url: self.image_url.clone(),
        }
    }
}

/// DTO for creating a new product. The id is generated from the name when
/// not supplied.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

/// DTO for updating an existing product. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub image_url: Option<String>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}
