//! Membership Repository

use super::{strip_table_prefix, BaseRepository, RepoError, RepoResult};
use crate::db::models::{Membership, MembershipUpdate};
use crate::utils::time;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "membresia";

#[derive(Clone)]
pub struct MembershipRepository {
    base: BaseRepository,
}

impl MembershipRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All membership records across all clients
    ///
    /// Recency ordering and per-client dedup are application-side passes
    /// in `services::status`; the ordering key falls back across fields,
    /// which the store cannot express.
    pub async fn find_all(&self) -> RepoResult<Vec<Membership>> {
        let memberships: Vec<Membership> =
            self.base.db().query("SELECT * FROM membresia").await?.take(0)?;
        Ok(memberships)
    }

    /// All memberships belonging to one client
    pub async fn find_by_client(&self, dni: &str) -> RepoResult<Vec<Membership>> {
        let dni = dni.to_string();
        let memberships: Vec<Membership> = self
            .base
            .db()
            .query("SELECT * FROM membresia WHERE client_dni = $dni")
            .bind(("dni", dni))
            .await?
            .take(0)?;
        Ok(memberships)
    }

    /// Whether the client has any membership with the active flag set
    /// (the client-delete guard)
    pub async fn client_has_active(&self, dni: &str) -> RepoResult<bool> {
        let dni = dni.to_string();
        let memberships: Vec<Membership> = self
            .base
            .db()
            .query("SELECT * FROM membresia WHERE client_dni = $dni AND is_active = true")
            .bind(("dni", dni))
            .await?
            .take(0)?;
        Ok(!memberships.is_empty())
    }

    /// Memberships whose start date falls in `[start, end)` millis
    pub async fn find_started_between(&self, start: i64, end: i64) -> RepoResult<Vec<Membership>> {
        let memberships: Vec<Membership> = self
            .base
            .db()
            .query("SELECT * FROM membresia WHERE start_date >= $start AND start_date < $end")
            .bind(("start", start))
            .bind(("end", end))
            .await?
            .take(0)?;
        Ok(memberships)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Membership>> {
        let pure_id = strip_table_prefix(TABLE, id);
        let membership: Option<Membership> = self.base.db().select((TABLE, pure_id)).await?;
        Ok(membership)
    }

    /// Persist a fully-built membership record (expiration already
    /// computed by the caller from type + start date)
    pub async fn create(&self, mut membership: Membership) -> RepoResult<Membership> {
        let now = time::now_millis();
        membership.id = None;
        membership.created_at = Some(now);
        membership.updated_at = Some(now);

        let created: Option<Membership> =
            self.base.db().create(TABLE).content(membership).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create membership".to_string()))
    }

    /// Merge a partial update (active-flag toggle, notes)
    pub async fn update(&self, id: &str, data: MembershipUpdate) -> RepoResult<Membership> {
        let pure_id = strip_table_prefix(TABLE, id);
        let thing = RecordId::from_table_key(TABLE, pure_id);

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
        let memberships: Vec<Membership> = result.take(0)?;

        memberships
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::NotFound(format!("Membership {} not found", id)))
    }

    /// Hard delete a membership record
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        let pure_id = strip_table_prefix(TABLE, id);
        let deleted: Option<Membership> = self.base.db().delete((TABLE, pure_id)).await?;
        if deleted.is_none() {
            return Err(RepoError::NotFound(format!("Membership {} not found", id)));
        }
        Ok(())
    }
}
