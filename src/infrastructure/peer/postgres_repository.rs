//! PostgreSQL peer catalog access repository
//!
//! The C_PEER_CAT_ACC_MAP table is nothing but its composite
//! (peer_id, catalog_id) key.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::peer::{PeerCatalogAccess, PeerCatalogAccessRepository};
use crate::domain::DomainError;
use crate::infrastructure::db::map_sqlx_error;

/// PostgreSQL implementation of PeerCatalogAccessRepository
#[derive(Debug, Clone)]
pub struct PostgresPeerCatalogAccessRepository {
    pool: PgPool,
}

impl PostgresPeerCatalogAccessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PeerCatalogAccessRepository for PostgresPeerCatalogAccessRepository {
    async fn grant(&self, access: PeerCatalogAccess) -> Result<PeerCatalogAccess, DomainError> {
        sqlx::query("INSERT INTO c_peer_cat_acc_map (peer_id, catalog_id) VALUES ($1, $2)")
            .bind(access.peer_id())
            .bind(access.catalog_id())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("Failed to grant catalog access", e))?;

        Ok(access)
    }

    async fn revoke(&self, peer_id: &str, catalog_id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            "DELETE FROM c_peer_cat_acc_map WHERE peer_id = $1 AND catalog_id = $2",
        )
        .bind(peer_id)
        .bind(catalog_id)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to revoke catalog access: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_catalog_ids_by_peer_id(
        &self,
        peer_id: &str,
    ) -> Result<Vec<String>, DomainError> {
        let rows = sqlx::query("SELECT catalog_id FROM c_peer_cat_acc_map WHERE peer_id = $1")
            .bind(peer_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to list catalog grants: {}", e))
            })?;

        Ok(rows
            .into_iter()
            .map(|row| row.get::<String, _>("catalog_id"))
            .collect())
    }
}
