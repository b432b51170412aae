//! Peer catalog access grants and status codes

mod entity;
mod repository;
mod status;

pub use entity::{PeerAccessValidationError, PeerCatalogAccess};
pub use repository::PeerCatalogAccessRepository;
pub use status::PeerStatusCode;
