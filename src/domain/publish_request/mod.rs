//! Publish requests and their filtered search

mod entity;
mod repository;
mod search;

pub use entity::{
    PublishRequest, PublishRequestValidationError, MAX_COMMENT_LENGTH, MAX_STATUS_CODE_LENGTH,
};
pub use repository::PublishRequestRepository;
pub use search::{
    sort_column, PublishRequestSearchCriteria, PublishRequestSearchService,
};
