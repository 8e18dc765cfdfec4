//! Repository for the `products` table.
//!
//! Products are the catalog collaborator for product blocks: the renderer
//! bulk-resolves the string ids a post references via
//! [`ProductRepo::find_many_by_ids`] and silently drops misses.

use sqlx::PgPool;

use crate::models::product::{CreateProduct, Product, UpdateProduct};

/// Column list for `products` queries.
const COLUMNS: &str = "\
    id, name, description, price_cents, image_url, \
    category, in_stock, created_at, updated_at";

/// Provides CRUD operations for products.
pub struct ProductRepo;

impl ProductRepo {
    /// Create a new product under the given id, returning the full row.
    pub async fn create(
        pool: &PgPool,
        id: &str,
        input: &CreateProduct,
    ) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products \
                (id, name, description, price_cents, image_url, category, in_stock) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price_cents)
            .bind(&input.image_url)
            .bind(&input.category)
            .bind(input.in_stock.unwrap_or(true))
            .fetch_one(pool)
            .await
    }

    /// Find a product by ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every product whose id appears in `ids`. Missing ids are
    /// simply absent from the result; callers treat them as dropped weak
    /// references.
    pub async fn find_many_by_ids(
        pool: &PgPool,
        ids: &[String],
    ) -> Result<Vec<Product>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = ANY($1)");
        sqlx::query_as::<_, Product>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List products with optional filters for category and stock state.
    ///
    /// Results are ordered by name.
    pub async fn list_filtered(
        pool: &PgPool,
        category: Option<&str>,
        in_stock: Option<bool>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut param_idx: usize = 1;

        if category.is_some() {
            conditions.push(format!("category = ${param_idx}"));
            param_idx += 1;
        }
        if in_stock.is_some() {
            conditions.push(format!("in_stock = ${param_idx}"));
            param_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM products {where_clause} \
             ORDER BY name \
             LIMIT ${param_idx} OFFSET ${}",
            param_idx + 1
        );

        let mut q = sqlx::query_as::<_, Product>(&query);

        if let Some(c) = category {
            q = q.bind(c);
        }
        if let Some(s) = in_stock {
            q = q.bind(s);
        }
        q = q.bind(limit).bind(offset);

        q.fetch_all(pool).await
    }

    /// Patch a product. Returns the updated row if found.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET \
                name = COALESCE($1, name), \
                description = COALESCE($2, description), \
                price_cents = COALESCE($3, price_cents), \
                image_url = COALESCE($4, image_url), \
                category = COALESCE($5, category), \
                in_stock = COALESCE($6, in_stock), \
                updated_at = NOW() \
             WHERE id = $7 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.price_cents)
            .bind(&input.image_url)
            .bind(&input.category)
            .bind(input.in_stock)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a product. Returns whether a row was removed. Posts that
    /// still reference the id keep their weak reference; it stops
    /// resolving at render time.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
