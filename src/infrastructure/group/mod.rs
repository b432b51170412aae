//! Solution group persistence

mod postgres_repository;

pub use postgres_repository::{PostgresGroupMemberRepository, PostgresSolutionGroupRepository};
