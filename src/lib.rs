//! Catalog Data Service
//!
//! Data access layer for an ML model catalog with support for:
//! - Solutions (published models) with usage counters and rating stats
//! - Solution groups and group membership
//! - Per-peer catalog access grants for federation
//! - Documents attached to solution revisions
//! - Publish request workflow with flexible AND/OR search

pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

pub use domain::document::{Document, DocumentId, DocumentRepository, RevisionDocumentMap};
pub use domain::group::{
    GroupMemberRepository, SolutionGroup, SolutionGroupMember, SolutionGroupRepository,
};
pub use domain::page::{Page, PageRequest, SortDirection, SortOrder};
pub use domain::peer::{PeerCatalogAccess, PeerCatalogAccessRepository, PeerStatusCode};
pub use domain::publish_request::{
    PublishRequest, PublishRequestRepository, PublishRequestSearchCriteria,
    PublishRequestSearchService,
};
pub use domain::solution::{Solution, SolutionId, SolutionRepository};
pub use domain::DomainError;
