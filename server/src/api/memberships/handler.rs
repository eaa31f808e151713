//! Membership API Handlers

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{
    Membership, MembershipCreate, MembershipUpdate, MISSING_CLIENT_NAME,
};
use crate::db::repository::{ClientRepository, MembershipRepository};
use crate::services::status::{self, MembershipState, MembershipStatus};
use crate::utils::{time, AppError, AppResult};

/// One row of the cross-client membership listing: the latest record
/// per client, enriched with the client name and expiry state
#[derive(serde::Serialize)]
pub struct MembershipListEntry {
    #[serde(flatten)]
    pub membership: Membership,
    pub client_name: String,
    pub state: MembershipState,
    pub days_until_expiry: i64,
}

#[derive(serde::Deserialize, Default)]
pub struct ListQuery {
    /// Filter on the active flag
    pub active: Option<bool>,
    /// Filter on expiry state (current | expiring_soon | expired)
    pub state: Option<MembershipState>,
}

/// GET /api/memberships - latest record per client, soonest expiry first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<MembershipListEntry>>> {
    let repo = MembershipRepository::new(state.get_db());
    let clients = ClientRepository::new(state.get_db());

    let records = status::dedupe_latest_per_client(repo.find_all().await?);

    let client_names: HashMap<String, String> = clients
        .find_all()
        .await?
        .into_iter()
        .map(|c| (c.dni.clone(), c.name))
        .collect();

    let tz = state.config.timezone;
    let today = time::millis_to_date(time::now_millis(), tz);

    let entries = records
        .into_iter()
        .filter(|m| query.active.map_or(true, |active| m.is_active == active))
        .filter_map(|m| {
            let (expiry_state, days_until_expiry) = status::expiry_state(&m, today, tz);
            if query.state.map_or(false, |wanted| wanted != expiry_state) {
                return None;
            }
            let client_name = client_names
                .get(&m.client_dni)
                .cloned()
                .unwrap_or_else(|| MISSING_CLIENT_NAME.to_string());
            Some(MembershipListEntry {
                membership: m,
                client_name,
                state: expiry_state,
                days_until_expiry,
            })
        })
        .collect();

    Ok(Json(entries))
}

/// GET /api/memberships/status/:dni - status of one client
pub async fn status_by_client(
    State(state): State<ServerState>,
    Path(dni): Path<String>,
) -> AppResult<Json<MembershipStatus>> {
    let clients = ClientRepository::new(state.get_db());
    if clients.find_by_dni(&dni).await?.is_none() {
        return Err(AppError::NotFound(format!("Cliente {} no encontrado", dni)));
    }

    let repo = MembershipRepository::new(state.get_db());
    let records = repo.find_by_client(&dni).await?;

    let tz = state.config.timezone;
    let today = time::millis_to_date(time::now_millis(), tz);
    Ok(Json(status::evaluate(&records, today, tz)))
}

/// POST /api/memberships
///
/// The expiration date is always recomputed server-side from type and
/// start date.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MembershipCreate>,
) -> AppResult<Json<Membership>> {
    payload.validate()?;

    let clients = ClientRepository::new(state.get_db());
    if clients.find_by_dni(&payload.client_dni).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Cliente {} no encontrado",
            payload.client_dni
        )));
    }

    let tz = state.config.timezone;
    let start = time::parse_date(&payload.start_date)?;
    let expiry = payload.membership_type.expiry_from(start);

    let membership = Membership {
        id: None,
        client_dni: payload.client_dni,
        membership_type: payload.membership_type,
        start_date: time::day_start_millis(start, tz),
        expires_at: time::day_start_millis(expiry, tz),
        price_cents: payload.price_cents,
        payment_method: payload.payment_method,
        notes: payload.notes,
        is_active: true,
        created_at: None,
        updated_at: None,
    };

    let repo = MembershipRepository::new(state.get_db());
    let created = repo.create(membership).await?;
    state.dashboard.invalidate();

    tracing::info!(
        dni = %created.client_dni,
        membership_type = %created.membership_type,
        "membership created"
    );
    Ok(Json(created))
}

/// PUT /api/memberships/:id - toggle active flag / edit notes
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MembershipUpdate>,
) -> AppResult<Json<Membership>> {
    let repo = MembershipRepository::new(state.get_db());
    let membership = repo.update(&id, payload).await?;
    state.dashboard.invalidate();
    Ok(Json(membership))
}

/// DELETE /api/memberships/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let repo = MembershipRepository::new(state.get_db());
    repo.delete(&id).await?;
    state.dashboard.invalidate();

    tracing::info!(id = %id, "membership deleted");
    Ok(Json(serde_json::json!({ "deleted": id })))
}
