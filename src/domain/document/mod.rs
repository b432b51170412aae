//! Documents attached to solution revisions

mod entity;
mod repository;

pub use entity::{
    Document, DocumentId, DocumentValidationError, RevisionDocumentMap,
    MAX_ACCESS_TYPE_CODE_LENGTH, MAX_DOCUMENT_NAME_LENGTH, MAX_DOCUMENT_SIZE,
    MAX_DOCUMENT_URI_LENGTH, MAX_DOCUMENT_VERSION_LENGTH,
};
pub use repository::DocumentRepository;
