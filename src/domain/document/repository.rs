//! Document repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Document, DocumentId, RevisionDocumentMap};
use crate::domain::DomainError;

/// Repository trait for documents and their revision mappings.
///
/// `create` applies the same ID policy as solutions: keep a well-formed
/// client-supplied UUID, otherwise generate one.
#[async_trait]
pub trait DocumentRepository: Send + Sync + Debug {
    async fn get(&self, id: &DocumentId) -> Result<Option<Document>, DomainError>;

    async fn create(&self, document: Document) -> Result<Document, DomainError>;

    async fn update(&self, document: &Document) -> Result<Document, DomainError>;

    async fn delete(&self, id: &DocumentId) -> Result<bool, DomainError>;

    /// Associate a document with a solution revision under an access type
    async fn map_to_revision(
        &self,
        map: RevisionDocumentMap,
    ) -> Result<RevisionDocumentMap, DomainError>;

    /// Remove a revision association; returns false if no row existed
    async fn unmap_from_revision(&self, map: &RevisionDocumentMap) -> Result<bool, DomainError>;

    /// All documents attached to the revision under the access type: an
    /// inner join of the document table and the revision-document mapping
    /// table with equality filters on both mapping columns.
    ///
    /// Unpaged: the documents per revision and access type are expected to
    /// be few. That is an assumption, not an enforced limit.
    async fn find_by_revision_access(
        &self,
        revision_id: &str,
        access_type_code: &str,
    ) -> Result<Vec<Document>, DomainError>;
}
