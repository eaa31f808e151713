//! Product API Handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::db::repository::ProductRepository;
use crate::utils::{AppError, AppResult};

#[derive(serde::Deserialize, Default)]
pub struct ListQuery {
    /// Include inactive catalog entries
    #[serde(default)]
    pub include_inactive: bool,
}

/// GET /api/products - active catalog, optionally everything
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let repo = ProductRepository::new(state.get_db());
    let products = if query.include_inactive {
        repo.find_all_with_inactive().await?
    } else {
        repo.find_all().await?
    };
    Ok(Json(products))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;
    Ok(Json(product))
}

/// POST /api/products
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    payload.validate()?;

    let repo = ProductRepository::new(state.get_db());
    let product = repo.create(payload).await?;

    tracing::info!(name = %product.name, "product created");
    Ok(Json(product))
}

/// PUT /api/products/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    if let Some(price) = payload.price_cents {
        if price < 1 {
            return Err(AppError::Validation("price must be positive".to_string()));
        }
    }

    let repo = ProductRepository::new(state.get_db());
    let product = repo.update(&id, payload).await?;
    Ok(Json(product))
}

/// POST /api/products/:id/toggle - flip the active flag (soft delete)
pub async fn toggle_active(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.get_db());
    let current = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))?;

    let product = repo
        .update(
            &id,
            ProductUpdate {
                name: None,
                kind: None,
                price_cents: None,
                category: None,
                is_active: Some(!current.is_active),
            },
        )
        .await?;
    Ok(Json(product))
}

/// DELETE /api/products/:id - hard delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = ProductRepository::new(state.get_db());
    repo.delete(&id).await?;

    tracing::info!(id = %id, "product deleted");
    Ok(Json(serde_json::json!({ "deleted": id })))
}
