//! Client Repository
//!
//! Clients are stored under their DNI as the record key, so lookups and
//! duplicate detection are direct key operations.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Client, ClientCreate, ClientUpdate};
use crate::utils::time;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "cliente";

#[derive(Clone)]
pub struct ClientRepository {
    base: BaseRepository,
}

impl ClientRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All clients ordered by name
    pub async fn find_all(&self) -> RepoResult<Vec<Client>> {
        let clients: Vec<Client> = self
            .base
            .db()
            .query("SELECT * FROM cliente ORDER BY name")
            .await?
            .take(0)?;
        Ok(clients)
    }

    /// Active clients only (for membership form selectors)
    pub async fn find_active(&self) -> RepoResult<Vec<Client>> {
        let clients: Vec<Client> = self
            .base
            .db()
            .query("SELECT * FROM cliente WHERE is_active = true ORDER BY name")
            .await?
            .take(0)?;
        Ok(clients)
    }

    pub async fn find_by_dni(&self, dni: &str) -> RepoResult<Option<Client>> {
        let client: Option<Client> = self.base.db().select((TABLE, dni)).await?;
        Ok(client)
    }

    /// Create a client keyed by DNI; rejects duplicates
    pub async fn create(&self, data: ClientCreate) -> RepoResult<Client> {
        if self.find_by_dni(&data.dni).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Ya existe un cliente con DNI: {}",
                data.dni
            )));
        }

        let now = time::now_millis();
        let client = Client {
            id: None,
            name: data.name,
            dni: data.dni.clone(),
            phone: data.phone,
            email: data.email,
            is_active: true,
            created_at: Some(now),
            updated_at: Some(now),
        };

        let created: Option<Client> = self
            .base
            .db()
            .create((TABLE, data.dni.as_str()))
            .content(client)
            .await?;

        created.ok_or_else(|| RepoError::Database("Failed to create client".to_string()))
    }

    /// Merge a partial update; DNI itself is immutable
    pub async fn update(&self, dni: &str, data: ClientUpdate) -> RepoResult<Client> {
        let thing = RecordId::from_table_key(TABLE, dni);

        let mut patch = serde_json::to_value(&data)
            .map_err(|e| RepoError::Database(format!("Failed to serialize update: {}", e)))?;
        if let Some(map) = patch.as_object_mut() {
            map.insert("updated_at".into(), serde_json::json!(time::now_millis()));
        }

        let mut result = self
            .base
            .db()
            .query("UPDATE $thing MERGE $data RETURN AFTER")
            .bind(("thing", thing))
            .bind(("data", patch))
            .await?;
        let clients: Vec<Client> = result.take(0)?;

        clients
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Cliente {} no encontrado", dni)))
    }

    /// Hard delete; the active-membership guard lives in the handler
    pub async fn delete(&self, dni: &str) -> RepoResult<()> {
        let deleted: Option<Client> = self.base.db().delete((TABLE, dni)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!(
                "Cliente {} no encontrado",
                dni
            )));
        }
        Ok(())
    }
}
