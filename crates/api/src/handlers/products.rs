//! Handlers for the product catalog.
//!
//! Products are the collaborator that content blocks reference by slug
//! id; deleting one never touches post content, the reference just stops
//! resolving at render time.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use verdia_core::blog::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use verdia_core::catalog::{
    generate_product_id, validate_price, validate_product_id, validate_product_name,
};
use verdia_core::error::CoreError;
use verdia_db::models::product::{CreateProduct, UpdateProduct};
use verdia_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, serde::Deserialize)]
pub struct ListProductsParams {
    pub category: Option<String>,
    pub in_stock: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

fn product_not_found(id: &str) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id: id.to_string(),
    })
}

/// GET /products
///
/// List products with optional category/stock filtering, ordered by name.
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ListProductsParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let products = ProductRepo::list_filtered(
        &state.pool,
        params.category.as_deref(),
        params.in_stock,
        limit,
        offset,
    )
    .await?;

    Ok(Json(DataResponse { data: products }))
}

/// POST /products
///
/// Create a product. The slug id is taken from the request when present,
/// otherwise derived from the name. Duplicate ids surface as 409.
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<impl IntoResponse> {
    validate_product_name(&input.name).map_err(AppError::Core)?;
    validate_price(input.price_cents).map_err(AppError::Core)?;

    let id = match &input.id {
        Some(id) => id.clone(),
        None => generate_product_id(&input.name),
    };
    validate_product_id(&id).map_err(AppError::Core)?;

    let product = ProductRepo::create(&state.pool, &id, &input).await?;

    tracing::info!(product_id = %product.id, "Product created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let product = ProductRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| product_not_found(&id))?;
    Ok(Json(DataResponse { data: product }))
}

/// PUT /products/{id}
///
/// Patch product fields; absent fields are left unchanged.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref name) = input.name {
        validate_product_name(name).map_err(AppError::Core)?;
    }
    if let Some(price_cents) = input.price_cents {
        validate_price(price_cents).map_err(AppError::Core)?;
    }

    let product = ProductRepo::update(&state.pool, &id, &input)
        .await?
        .ok_or_else(|| product_not_found(&id))?;

    tracing::info!(product_id = %id, "Product updated");

    Ok(Json(DataResponse { data: product }))
}

/// DELETE /products/{id}
///
/// Remove a product. Post content referencing the id is untouched; the
/// reference simply stops resolving.
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    if !ProductRepo::delete(&state.pool, &id).await? {
        return Err(product_not_found(&id));
    }

    tracing::info!(product_id = %id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}
