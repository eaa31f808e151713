//! Client API Handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Client, ClientCreate, ClientUpdate};
use crate::db::repository::{ClientRepository, MembershipRepository};
use crate::utils::{AppError, AppResult};

#[derive(serde::Deserialize, Default)]
pub struct ListQuery {
    /// When true, only active clients
    #[serde(default)]
    pub active: bool,
}

/// GET /api/clients - all clients, optionally active only
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Client>>> {
    let repo = ClientRepository::new(state.get_db());
    let clients = if query.active {
        repo.find_active().await?
    } else {
        repo.find_all().await?
    };
    Ok(Json(clients))
}

/// GET /api/clients/:dni
pub async fn get_by_dni(
    State(state): State<ServerState>,
    Path(dni): Path<String>,
) -> AppResult<Json<Client>> {
    let repo = ClientRepository::new(state.get_db());
    let client = repo
        .find_by_dni(&dni)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Cliente {} no encontrado", dni)))?;
    Ok(Json(client))
}

/// POST /api/clients
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ClientCreate>,
) -> AppResult<Json<Client>> {
    payload.validate()?;

    let repo = ClientRepository::new(state.get_db());
    let client = repo.create(payload).await?;
    state.dashboard.invalidate();

    tracing::info!(dni = %client.dni, "client created");
    Ok(Json(client))
}

/// PUT /api/clients/:dni
pub async fn update(
    State(state): State<ServerState>,
    Path(dni): Path<String>,
    Json(payload): Json<ClientUpdate>,
) -> AppResult<Json<Client>> {
    let repo = ClientRepository::new(state.get_db());
    let client = repo.update(&dni, payload).await?;
    state.dashboard.invalidate();
    Ok(Json(client))
}

/// POST /api/clients/:dni/toggle - flip the active flag
pub async fn toggle_active(
    State(state): State<ServerState>,
    Path(dni): Path<String>,
) -> AppResult<Json<Client>> {
    let repo = ClientRepository::new(state.get_db());
    let current = repo
        .find_by_dni(&dni)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Cliente {} no encontrado", dni)))?;

    let client = repo
        .update(
            &dni,
            ClientUpdate {
                name: None,
                phone: None,
                email: None,
                is_active: Some(!current.is_active),
            },
        )
        .await?;
    state.dashboard.invalidate();
    Ok(Json(client))
}

/// DELETE /api/clients/:dni
///
/// Refused while the client has any active membership.
pub async fn delete(
    State(state): State<ServerState>,
    Path(dni): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let memberships = MembershipRepository::new(state.get_db());
    if memberships.client_has_active(&dni).await? {
        return Err(AppError::BusinessRule(
            "No se puede eliminar el cliente. Tiene membresías activas.".to_string(),
        ));
    }

    let repo = ClientRepository::new(state.get_db());
    repo.delete(&dni).await?;
    state.dashboard.invalidate();

    tracing::info!(dni = %dni, "client deleted");
    Ok(Json(serde_json::json!({ "deleted": dni })))
}
