//! Document and revision-document mapping entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// NAME column is VARCHAR(100)
pub const MAX_DOCUMENT_NAME_LENGTH: usize = 100;
/// VERSION column is VARCHAR(25)
pub const MAX_DOCUMENT_VERSION_LENGTH: usize = 25;
/// URI column is VARCHAR(512)
pub const MAX_DOCUMENT_URI_LENGTH: usize = 512;
/// ACCESS_TYPE_CD column is CHAR(2)
pub const MAX_ACCESS_TYPE_CODE_LENGTH: usize = 2;
/// SIZE column is INT
pub const MAX_DOCUMENT_SIZE: i64 = i32::MAX as i64;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DocumentValidationError {
    #[error("Document ID must be a 36-character UUID: '{0}'")]
    InvalidDocumentId(String),

    #[error("Document name cannot be empty")]
    EmptyName,

    #[error("Document name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("Document version exceeds maximum length of {0} characters")]
    VersionTooLong(usize),

    #[error("Document URI cannot be empty")]
    EmptyUri,

    #[error("Document URI exceeds maximum length of {0} characters")]
    UriTooLong(usize),

    #[error("Document size cannot be negative, got {0}")]
    NegativeSize(i64),

    #[error("Document size exceeds the SIZE column maximum of {MAX_DOCUMENT_SIZE}, got {0}")]
    SizeTooLarge(i64),

    #[error("Revision ID cannot be empty")]
    EmptyRevisionId,

    #[error("Access type code exceeds maximum length of {0} characters")]
    AccessTypeCodeTooLong(usize),
}

/// Document identifier - 36-character UUID text (DOCUMENT_ID CHAR(36))
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Result<Self, DocumentValidationError> {
        let id = id.into();
        if id.len() != 36 || Uuid::parse_str(&id).is_err() {
            return Err(DocumentValidationError::InvalidDocumentId(id));
        }
        Ok(Self(id))
    }

    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DocumentId {
    type Error = DocumentValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user document attached to solution revisions, mapped to C_DOCUMENT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// None until persisted; clients may supply their own UUID
    #[serde(skip_serializing_if = "Option::is_none")]
    document_id: Option<DocumentId>,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    version: Option<String>,
    uri: String,
    /// Size in bytes
    size: i64,
    /// Owning user, by ID only
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl Document {
    pub fn new(
        name: impl Into<String>,
        uri: impl Into<String>,
    ) -> Result<Self, DocumentValidationError> {
        let name = name.into();
        let uri = uri.into();
        validate_document_name(&name)?;
        validate_document_uri(&uri)?;

        let now = Utc::now();
        Ok(Self {
            document_id: None,
            name,
            version: None,
            uri,
            size: 0,
            user_id: None,
            created: now,
            modified: now,
        })
    }

    /// Hydration path for storage implementations
    pub fn from_storage(
        document_id: DocumentId,
        name: String,
        version: Option<String>,
        uri: String,
        size: i64,
        user_id: Option<String>,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            document_id: Some(document_id),
            name,
            version,
            uri,
            size,
            user_id,
            created,
            modified,
        }
    }

    pub fn document_id(&self) -> Option<&DocumentId> {
        self.document_id.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    pub fn set_document_id(&mut self, id: DocumentId) {
        self.document_id = Some(id);
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), DocumentValidationError> {
        let name = name.into();
        validate_document_name(&name)?;
        self.name = name;
        self.touch();
        Ok(())
    }

    pub fn set_version(
        &mut self,
        version: Option<String>,
    ) -> Result<(), DocumentValidationError> {
        if let Some(ref v) = version {
            if v.chars().count() > MAX_DOCUMENT_VERSION_LENGTH {
                return Err(DocumentValidationError::VersionTooLong(
                    MAX_DOCUMENT_VERSION_LENGTH,
                ));
            }
        }
        self.version = version;
        self.touch();
        Ok(())
    }

    pub fn set_uri(&mut self, uri: impl Into<String>) -> Result<(), DocumentValidationError> {
        let uri = uri.into();
        validate_document_uri(&uri)?;
        self.uri = uri;
        self.touch();
        Ok(())
    }

    pub fn set_size(&mut self, size: i64) -> Result<(), DocumentValidationError> {
        if size < 0 {
            return Err(DocumentValidationError::NegativeSize(size));
        }
        if size > MAX_DOCUMENT_SIZE {
            return Err(DocumentValidationError::SizeTooLarge(size));
        }
        self.size = size;
        self.touch();
        Ok(())
    }

    pub fn set_user_id(&mut self, user_id: Option<String>) {
        self.user_id = user_id;
        self.touch();
    }

    pub(crate) fn touch(&mut self) {
        self.modified = Utc::now();
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.document_id == other.document_id
    }
}

impl Eq for Document {}

impl std::hash::Hash for Document {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.document_id.hash(state);
    }
}

fn validate_document_name(name: &str) -> Result<(), DocumentValidationError> {
    if name.is_empty() {
        return Err(DocumentValidationError::EmptyName);
    }
    if name.chars().count() > MAX_DOCUMENT_NAME_LENGTH {
        return Err(DocumentValidationError::NameTooLong(
            MAX_DOCUMENT_NAME_LENGTH,
        ));
    }
    Ok(())
}

fn validate_document_uri(uri: &str) -> Result<(), DocumentValidationError> {
    if uri.is_empty() {
        return Err(DocumentValidationError::EmptyUri);
    }
    if uri.chars().count() > MAX_DOCUMENT_URI_LENGTH {
        return Err(DocumentValidationError::UriTooLong(MAX_DOCUMENT_URI_LENGTH));
    }
    Ok(())
}

/// A row in the C_SOL_REV_DOC_MAP table associating a document with a
/// solution revision under an access-type code. All three fields form the
/// composite key; there is nothing else in the row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RevisionDocumentMap {
    revision_id: String,
    access_type_code: String,
    document_id: DocumentId,
}

impl RevisionDocumentMap {
    pub fn new(
        revision_id: impl Into<String>,
        access_type_code: impl Into<String>,
        document_id: DocumentId,
    ) -> Result<Self, DocumentValidationError> {
        let revision_id = revision_id.into();
        let access_type_code = access_type_code.into();

        if revision_id.is_empty() {
            return Err(DocumentValidationError::EmptyRevisionId);
        }
        if access_type_code.chars().count() > MAX_ACCESS_TYPE_CODE_LENGTH {
            return Err(DocumentValidationError::AccessTypeCodeTooLong(
                MAX_ACCESS_TYPE_CODE_LENGTH,
            ));
        }

        Ok(Self {
            revision_id,
            access_type_code,
            document_id,
        })
    }

    pub fn revision_id(&self) -> &str {
        &self.revision_id
    }

    pub fn access_type_code(&self) -> &str {
        &self.access_type_code
    }

    pub fn document_id(&self) -> &DocumentId {
        &self.document_id
    }
}
