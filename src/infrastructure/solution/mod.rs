//! Solution persistence

mod postgres_repository;

pub use postgres_repository::PostgresSolutionRepository;
