//! Infrastructure layer - PostgreSQL repositories, pool setup, logging

pub mod db;
pub mod document;
pub mod group;
pub mod logging;
pub mod peer;
pub mod publish_request;
pub mod solution;

pub use db::connect_pool;
pub use document::PostgresDocumentRepository;
pub use group::{PostgresGroupMemberRepository, PostgresSolutionGroupRepository};
pub use logging::init_logging;
pub use peer::PostgresPeerCatalogAccessRepository;
pub use publish_request::PostgresPublishRequestRepository;
pub use solution::PostgresSolutionRepository;
