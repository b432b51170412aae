//! Domain layer - catalog entities, validation, and repository contracts

pub mod document;
pub mod error;
pub mod group;
pub mod page;
pub mod peer;
pub mod publish_request;
pub mod solution;

pub use error::DomainError;
pub use page::{Page, PageRequest, SortDirection, SortOrder, DEFAULT_PAGE_SIZE};

pub use document::{Document, DocumentId, DocumentRepository, RevisionDocumentMap};
pub use group::{
    GroupMemberRepository, SolutionGroup, SolutionGroupMember, SolutionGroupRepository,
};
pub use peer::{PeerCatalogAccess, PeerCatalogAccessRepository, PeerStatusCode};
pub use publish_request::{
    PublishRequest, PublishRequestRepository, PublishRequestSearchCriteria,
    PublishRequestSearchService,
};
pub use solution::{Solution, SolutionId, SolutionRepository};
