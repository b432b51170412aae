//! Publish request entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// STATUS_CD column is CHAR(2)
pub const MAX_STATUS_CODE_LENGTH: usize = 2;
/// COMMENT column is VARCHAR(8192)
pub const MAX_COMMENT_LENGTH: usize = 8192;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PublishRequestValidationError {
    #[error("Solution ID cannot be empty")]
    EmptySolutionId,

    #[error("Revision ID cannot be empty")]
    EmptyRevisionId,

    #[error("Request user ID cannot be empty")]
    EmptyRequestUserId,

    #[error("Status code cannot be empty")]
    EmptyStatusCode,

    #[error("Status code exceeds maximum length of {0} characters")]
    StatusCodeTooLong(usize),

    #[error("Comment exceeds maximum length of {0} characters")]
    CommentTooLong(usize),
}

fn validate_status_code(code: &str) -> Result<(), PublishRequestValidationError> {
    if code.is_empty() {
        return Err(PublishRequestValidationError::EmptyStatusCode);
    }
    if code.chars().count() > MAX_STATUS_CODE_LENGTH {
        return Err(PublishRequestValidationError::StatusCodeTooLong(
            MAX_STATUS_CODE_LENGTH,
        ));
    }
    Ok(())
}

/// A record tracking a solution revision's request for publication
/// approval, mapped to the C_PUBLISH_REQUEST table. The request ID is
/// generated by the store; the status code is validated against
/// server-side reference data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<i64>,
    solution_id: String,
    revision_id: String,
    request_user_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    review_user_id: Option<String>,
    status_code: String,
    /// Reviewer's free-text comment
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl PublishRequest {
    pub fn new(
        solution_id: impl Into<String>,
        revision_id: impl Into<String>,
        request_user_id: impl Into<String>,
        status_code: impl Into<String>,
    ) -> Result<Self, PublishRequestValidationError> {
        let solution_id = solution_id.into();
        let revision_id = revision_id.into();
        let request_user_id = request_user_id.into();
        let status_code = status_code.into();

        if solution_id.is_empty() {
            return Err(PublishRequestValidationError::EmptySolutionId);
        }
        if revision_id.is_empty() {
            return Err(PublishRequestValidationError::EmptyRevisionId);
        }
        if request_user_id.is_empty() {
            return Err(PublishRequestValidationError::EmptyRequestUserId);
        }
        validate_status_code(&status_code)?;

        let now = Utc::now();
        Ok(Self {
            request_id: None,
            solution_id,
            revision_id,
            request_user_id,
            review_user_id: None,
            status_code,
            comment: None,
            created: now,
            modified: now,
        })
    }

    /// Hydration path for storage implementations
    #[allow(clippy::too_many_arguments)]
    pub fn from_storage(
        request_id: i64,
        solution_id: String,
        revision_id: String,
        request_user_id: String,
        review_user_id: Option<String>,
        status_code: String,
        comment: Option<String>,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            request_id: Some(request_id),
            solution_id,
            revision_id,
            request_user_id,
            review_user_id,
            status_code,
            comment,
            created,
            modified,
        }
    }

    pub fn request_id(&self) -> Option<i64> {
        self.request_id
    }

    pub fn solution_id(&self) -> &str {
        &self.solution_id
    }

    pub fn revision_id(&self) -> &str {
        &self.revision_id
    }

    pub fn request_user_id(&self) -> &str {
        &self.request_user_id
    }

    pub fn review_user_id(&self) -> Option<&str> {
        self.review_user_id.as_deref()
    }

    pub fn status_code(&self) -> &str {
        &self.status_code
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    pub fn set_review_user_id(&mut self, review_user_id: Option<String>) {
        self.review_user_id = review_user_id;
        self.touch();
    }

    pub fn set_status_code(
        &mut self,
        status_code: impl Into<String>,
    ) -> Result<(), PublishRequestValidationError> {
        let status_code = status_code.into();
        validate_status_code(&status_code)?;
        self.status_code = status_code;
        self.touch();
        Ok(())
    }

    pub fn set_comment(
        &mut self,
        comment: Option<String>,
    ) -> Result<(), PublishRequestValidationError> {
        if let Some(ref c) = comment {
            if c.chars().count() > MAX_COMMENT_LENGTH {
                return Err(PublishRequestValidationError::CommentTooLong(
                    MAX_COMMENT_LENGTH,
                ));
            }
        }
        self.comment = comment;
        self.touch();
        Ok(())
    }

    pub(crate) fn set_request_id(&mut self, request_id: i64) {
        self.request_id = Some(request_id);
    }

    pub(crate) fn touch(&mut self) {
        self.modified = Utc::now();
    }
}

impl PartialEq for PublishRequest {
    fn eq(&self, other: &Self) -> bool {
        self.request_id == other.request_id
    }
}

impl Eq for PublishRequest {}

impl std::hash::Hash for PublishRequest {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.request_id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_publish_request() {
        let request = PublishRequest::new("sol-1", "rev-1", "user-1", "PE").unwrap();
        assert!(request.request_id().is_none());
        assert_eq!(request.solution_id(), "sol-1");
        assert_eq!(request.status_code(), "PE");
        assert!(request.review_user_id().is_none());
        assert!(request.comment().is_none());
    }

    #[test]
    fn test_required_fields() {
        assert!(PublishRequest::new("", "rev-1", "user-1", "PE").is_err());
        assert!(PublishRequest::new("sol-1", "", "user-1", "PE").is_err());
        assert!(PublishRequest::new("sol-1", "rev-1", "", "PE").is_err());
        assert!(PublishRequest::new("sol-1", "rev-1", "user-1", "").is_err());
        assert!(PublishRequest::new("sol-1", "rev-1", "user-1", "LONG").is_err());
    }

    #[test]
    fn test_equality_by_request_id() {
        let first = PublishRequest::from_storage(
            1,
            "sol-1".into(),
            "rev-1".into(),
            "user-1".into(),
            None,
            "PE".into(),
            None,
            Utc::now(),
            Utc::now(),
        );
        let mut second = first.clone();
        second.set_status_code("AP").unwrap();

        // Same key, different payload: still the same row
        assert_eq!(first, second);
    }

    #[test]
    fn test_review_flow() {
        let mut request = PublishRequest::new("sol-1", "rev-1", "user-1", "PE").unwrap();
        request.set_review_user_id(Some("reviewer-1".to_string()));
        request.set_status_code("AP").unwrap();
        request.set_comment(Some("Looks good".to_string())).unwrap();

        assert_eq!(request.review_user_id(), Some("reviewer-1"));
        assert_eq!(request.status_code(), "AP");
        assert_eq!(request.comment(), Some("Looks good"));
    }

    #[test]
    fn test_comment_length() {
        let mut request = PublishRequest::new("sol-1", "rev-1", "user-1", "PE").unwrap();
        assert!(request.set_comment(Some("c".repeat(8193))).is_err());
        assert!(request.set_comment(Some("c".repeat(8192))).is_ok());
    }
}
