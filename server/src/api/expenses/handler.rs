//! Expense API Handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Expense, ExpenseCreate};
use crate::db::repository::ExpenseRepository;
use crate::utils::{time, AppResult};

const DEFAULT_LIMIT: usize = 10;

#[derive(serde::Deserialize, Default)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

/// GET /api/expenses?limit=N - most recent expenses
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Expense>>> {
    let repo = ExpenseRepository::new(state.get_db());
    let expenses = repo
        .find_recent(query.limit.unwrap_or(DEFAULT_LIMIT))
        .await?;
    Ok(Json(expenses))
}

/// POST /api/expenses
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ExpenseCreate>,
) -> AppResult<Json<Expense>> {
    payload.validate()?;

    let date = time::parse_date(&payload.date)?;
    let expense = Expense {
        id: None,
        date: time::day_start_millis(date, state.config.timezone),
        concept: payload.concept,
        supplier: payload.supplier,
        description: payload.description,
        payment_method: payload.payment_method,
        amount_cents: payload.amount_cents,
        created_at: None,
        updated_at: None,
    };

    let repo = ExpenseRepository::new(state.get_db());
    let created = repo.create(expense).await?;
    state.dashboard.invalidate();

    tracing::info!(amount_cents = created.amount_cents, "expense recorded");
    Ok(Json(created))
}

/// DELETE /api/expenses/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = ExpenseRepository::new(state.get_db());
    repo.delete(&id).await?;
    state.dashboard.invalidate();

    tracing::info!(id = %id, "expense deleted");
    Ok(Json(serde_json::json!({ "deleted": id })))
}
