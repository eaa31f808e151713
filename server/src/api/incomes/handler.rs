//! Income API Handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Income, IncomeCreate};
use crate::db::repository::IncomeRepository;
use crate::utils::{time, AppResult};

const DEFAULT_LIMIT: usize = 10;

#[derive(serde::Deserialize, Default)]
pub struct ListQuery {
    pub limit: Option<usize>,
}

/// GET /api/incomes?limit=N - most recent incomes
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Income>>> {
    let repo = IncomeRepository::new(state.get_db());
    let incomes = repo
        .find_recent(query.limit.unwrap_or(DEFAULT_LIMIT))
        .await?;
    Ok(Json(incomes))
}

/// POST /api/incomes
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<IncomeCreate>,
) -> AppResult<Json<Income>> {
    payload.validate()?;

    let date = time::parse_date(&payload.date)?;
    let income = Income {
        id: None,
        date: time::day_start_millis(date, state.config.timezone),
        client_name: payload.client_name,
        operator: payload.operator,
        payment_method: payload.payment_method,
        note: payload.note,
        items: payload.item.into_iter().collect(),
        total_cents: payload.total_cents,
        created_at: None,
        updated_at: None,
    };

    let repo = IncomeRepository::new(state.get_db());
    let created = repo.create(income).await?;
    state.dashboard.invalidate();

    tracing::info!(total_cents = created.total_cents, "income recorded");
    Ok(Json(created))
}

/// DELETE /api/incomes/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = IncomeRepository::new(state.get_db());
    repo.delete(&id).await?;
    state.dashboard.invalidate();

    tracing::info!(id = %id, "income deleted");
    Ok(Json(serde_json::json!({ "deleted": id })))
}
