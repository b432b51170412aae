//! Publish request persistence and search

mod postgres_repository;

pub use postgres_repository::PostgresPublishRequestRepository;
