//! Peer catalog access repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::PeerCatalogAccess;
use crate::domain::DomainError;

/// Repository trait for peer-to-catalog access grants
#[async_trait]
pub trait PeerCatalogAccessRepository: Send + Sync + Debug {
    /// Insert a grant row; duplicates are a conflict
    async fn grant(&self, access: PeerCatalogAccess) -> Result<PeerCatalogAccess, DomainError>;

    /// Remove a grant row; returns false if no row existed
    async fn revoke(&self, peer_id: &str, catalog_id: &str) -> Result<bool, DomainError>;

    /// IDs of catalogs with access specially granted to the peer.
    ///
    /// Unpaged: the grants per peer are expected to be few. That is an
    /// assumption, not an enforced limit.
    async fn find_catalog_ids_by_peer_id(&self, peer_id: &str)
        -> Result<Vec<String>, DomainError>;
}
