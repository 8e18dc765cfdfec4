//! Product catalog collaborator types and validation.
//!
//! Content blocks reference products weakly, by string id, and resolve
//! them at render time; nothing in the content model owns product data.
//! Product ids are URL-safe slugs ("monstera-deliciosa") so they double as
//! shop links.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// The slice of product data the renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: String,
    pub name: String,
    /// Price in minor currency units (paise).
    pub price_cents: i64,
    pub image_url: Option<String>,
}

/// Lookup-by-key resolution of product references. No ownership, no
/// referential integrity: a miss simply returns `None` and the caller
/// drops the reference.
pub trait ProductResolver {
    fn resolve(&self, product_id: &str) -> Option<ProductSummary>;
}

/// The usual implementation: a map preloaded from a bulk catalog query.
impl ProductResolver for HashMap<String, ProductSummary> {
    fn resolve(&self, product_id: &str) -> Option<ProductSummary> {
        self.get(product_id).cloned()
    }
}

/// Format a minor-unit price for display ("₹1,299" territory is left to
/// the storefront; this is the plain fallback).
pub fn format_price(price_cents: i64) -> String {
    format!("₹{}.{:02}", price_cents / 100, (price_cents % 100).abs())
}

// ---------------------------------------------------------------------------
// Slug generation
// ---------------------------------------------------------------------------

/// Generate a URL-safe product id from a display name.
///
/// Converts to lowercase, replaces anything non-alphanumeric with hyphens,
/// collapses consecutive hyphens, and trims leading/trailing hyphens.
pub fn generate_product_id(name: &str) -> String {
    let slug: String = name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();

    let mut result = String::with_capacity(slug.len());
    let mut prev_hyphen = false;
    for c in slug.chars() {
        if c == '-' {
            if !prev_hyphen {
                result.push('-');
            }
            prev_hyphen = true;
        } else {
            result.push(c);
            prev_hyphen = false;
        }
    }

    result.trim_matches('-').to_string()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a product id (non-empty, only lowercase alphanumeric + hyphens).
pub fn validate_product_id(id: &str) -> Result<(), CoreError> {
    if id.is_empty() {
        return Err(CoreError::Validation("Product id must not be empty".into()));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(CoreError::Validation(
            "Product id must contain only lowercase alphanumeric characters and hyphens".into(),
        ));
    }
    Ok(())
}

/// Validate a product name (non-empty, <= 200 chars).
pub fn validate_product_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation("Product name must not be empty".into()));
    }
    if name.len() > 200 {
        return Err(CoreError::Validation(
            "Product name must be at most 200 characters".into(),
        ));
    }
    Ok(())
}

/// Validate a price in minor units (non-negative).
pub fn validate_price(price_cents: i64) -> Result<(), CoreError> {
    if price_cents < 0 {
        return Err(CoreError::Validation("Price must not be negative".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- resolution ----------------------------------------------------------

    #[test]
    fn map_resolver_hits_and_misses() {
        let mut map = HashMap::new();
        map.insert(
            "snake-plant".to_string(),
            ProductSummary {
                id: "snake-plant".into(),
                name: "Snake Plant".into(),
                price_cents: 49_900,
                image_url: None,
            },
        );
        assert_eq!(map.resolve("snake-plant").unwrap().name, "Snake Plant");
        assert!(map.resolve("gone").is_none());
    }

    #[test]
    fn price_formatting() {
        assert_eq!(format_price(129_900), "₹1299.00");
        assert_eq!(format_price(505), "₹5.05");
        assert_eq!(format_price(0), "₹0.00");
    }

    // -- slug generation -----------------------------------------------------

    #[test]
    fn product_id_basic_name() {
        assert_eq!(generate_product_id("Monstera Deliciosa"), "monstera-deliciosa");
    }

    #[test]
    fn product_id_special_characters() {
        assert_eq!(generate_product_id("Bird's Nest Fern (small)"), "bird-s-nest-fern-small");
    }

    #[test]
    fn product_id_collapses_and_trims_hyphens() {
        assert_eq!(generate_product_id("--Aloe  Vera--"), "aloe-vera");
    }

    // -- validation ----------------------------------------------------------

    #[test]
    fn product_id_validation() {
        assert!(validate_product_id("monstera-deliciosa").is_ok());
        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("Not A Slug").is_err());
    }

    #[test]
    fn product_name_validation() {
        assert!(validate_product_name("Monstera").is_ok());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"a".repeat(201)).is_err());
    }

    #[test]
    fn price_validation() {
        assert!(validate_price(0).is_ok());
        assert!(validate_price(-1).is_err());
    }
}
