//! Peer-to-catalog access grant entity

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PeerAccessValidationError {
    #[error("Peer ID cannot be empty")]
    EmptyPeerId,

    #[error("Catalog ID cannot be empty")]
    EmptyCatalogId,
}

/// A row in the C_PEER_CAT_ACC_MAP table granting a peer special access to
/// a (typically restricted) catalog. The composite (peer_id, catalog_id)
/// key is the entire row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerCatalogAccess {
    peer_id: String,
    catalog_id: String,
}

impl PeerCatalogAccess {
    pub fn new(
        peer_id: impl Into<String>,
        catalog_id: impl Into<String>,
    ) -> Result<Self, PeerAccessValidationError> {
        let peer_id = peer_id.into();
        let catalog_id = catalog_id.into();

        if peer_id.is_empty() {
            return Err(PeerAccessValidationError::EmptyPeerId);
        }
        if catalog_id.is_empty() {
            return Err(PeerAccessValidationError::EmptyCatalogId);
        }

        Ok(Self {
            peer_id,
            catalog_id,
        })
    }

    pub fn peer_id(&self) -> &str {
        &self.peer_id
    }

    pub fn catalog_id(&self) -> &str {
        &self.catalog_id
    }
}
