//! Peer catalog access persistence

mod postgres_repository;

pub use postgres_repository::PostgresPeerCatalogAccessRepository;
