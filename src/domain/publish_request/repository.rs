//! Publish request repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::PublishRequest;
use crate::domain::DomainError;

/// Repository trait for publish request storage
#[async_trait]
pub trait PublishRequestRepository: Send + Sync + Debug {
    async fn get(&self, request_id: i64) -> Result<Option<PublishRequest>, DomainError>;

    /// Create a request; the store assigns the generated request ID
    async fn create(&self, request: PublishRequest) -> Result<PublishRequest, DomainError>;

    async fn update(&self, request: &PublishRequest) -> Result<PublishRequest, DomainError>;

    async fn delete(&self, request_id: i64) -> Result<bool, DomainError>;
}
