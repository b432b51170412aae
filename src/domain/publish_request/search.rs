//! Publish request search: optional filters combined with AND or OR

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use super::entity::PublishRequest;
use crate::domain::page::{Page, PageRequest};
use crate::domain::DomainError;

/// Optional equality filters for the publish request search. A `None`
/// filter is ignored; string matching is case-insensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequestSearchCriteria {
    pub solution_id: Option<String>,
    pub revision_id: Option<String>,
    pub request_user_id: Option<String>,
    pub review_user_id: Option<String>,
    pub status_code: Option<String>,
}

impl PublishRequestSearchCriteria {
    /// True when every filter is `None`
    pub fn is_empty(&self) -> bool {
        self.solution_id.is_none()
            && self.revision_id.is_none()
            && self.request_user_id.is_none()
            && self.review_user_id.is_none()
            && self.status_code.is_none()
    }

    /// Evaluate the criteria against one row.
    ///
    /// Each present filter yields one predicate. Predicates combine with
    /// AND when `is_or` is false and OR when it is true. Zero predicates
    /// match every row regardless of `is_or`.
    pub fn matches(&self, row: &PublishRequest, is_or: bool) -> bool {
        let mut predicates = Vec::with_capacity(5);

        if let Some(ref solution_id) = self.solution_id {
            predicates.push(eq_ignore_case(solution_id, row.solution_id()));
        }
        if let Some(ref revision_id) = self.revision_id {
            predicates.push(eq_ignore_case(revision_id, row.revision_id()));
        }
        if let Some(ref request_user_id) = self.request_user_id {
            predicates.push(eq_ignore_case(request_user_id, row.request_user_id()));
        }
        if let Some(ref review_user_id) = self.review_user_id {
            predicates.push(
                row.review_user_id()
                    .is_some_and(|r| eq_ignore_case(review_user_id, r)),
            );
        }
        if let Some(ref status_code) = self.status_code {
            predicates.push(eq_ignore_case(status_code, row.status_code()));
        }

        if predicates.is_empty() {
            return true;
        }

        if is_or {
            predicates.into_iter().any(|p| p)
        } else {
            predicates.into_iter().all(|p| p)
        }
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Paged search over publish requests
#[async_trait]
pub trait PublishRequestSearchService: Send + Sync + Debug {
    /// Find requests matching all (`is_or == false`) or any
    /// (`is_or == true`) of the present filters. Empty criteria return all
    /// rows regardless of `is_or`. Results are ordered by the request's
    /// sort fields, defaulting to request ID ascending; unknown sort fields
    /// are rejected with a validation error.
    async fn find_publish_requests(
        &self,
        criteria: &PublishRequestSearchCriteria,
        is_or: bool,
        page: &PageRequest,
    ) -> Result<Page<PublishRequest>, DomainError>;
}

/// Sortable fields accepted by the search, mapped to their columns.
/// Anything else is a validation error rather than SQL.
pub fn sort_column(field: &str) -> Option<&'static str> {
    match field {
        "request_id" => Some("request_id"),
        "solution_id" => Some("solution_id"),
        "revision_id" => Some("revision_id"),
        "request_user_id" => Some("req_user_id"),
        "review_user_id" => Some("rvw_user_id"),
        "status_code" => Some("status_cd"),
        "created" => Some("created_date"),
        "modified" => Some("modified_date"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn row(
        request_id: i64,
        solution_id: &str,
        request_user_id: &str,
        status_code: &str,
    ) -> PublishRequest {
        PublishRequest::from_storage(
            request_id,
            solution_id.to_string(),
            "rev-1".to_string(),
            request_user_id.to_string(),
            None,
            status_code.to_string(),
            None,
            Utc::now(),
            Utc::now(),
        )
    }

    #[test]
    fn test_and_requires_all_filters() {
        let criteria = PublishRequestSearchCriteria {
            solution_id: Some("sol-1".to_string()),
            status_code: Some("PE".to_string()),
            ..Default::default()
        };

        // Both hold
        assert!(criteria.matches(&row(1, "sol-1", "user-1", "PE"), false));
        // Only one holds
        assert!(!criteria.matches(&row(2, "sol-1", "user-1", "AP"), false));
        assert!(!criteria.matches(&row(3, "sol-2", "user-1", "PE"), false));
    }

    #[test]
    fn test_or_requires_any_filter() {
        let criteria = PublishRequestSearchCriteria {
            solution_id: Some("sol-1".to_string()),
            status_code: Some("PE".to_string()),
            ..Default::default()
        };

        assert!(criteria.matches(&row(1, "sol-1", "user-1", "AP"), true));
        assert!(criteria.matches(&row(2, "sol-2", "user-1", "PE"), true));
        assert!(!criteria.matches(&row(3, "sol-2", "user-1", "AP"), true));
    }

    #[test]
    fn test_empty_criteria_match_everything() {
        let criteria = PublishRequestSearchCriteria::default();
        assert!(criteria.is_empty());

        let any_row = row(1, "sol-1", "user-1", "PE");
        // The OR of zero conditions matches all rows, same as AND
        assert!(criteria.matches(&any_row, false));
        assert!(criteria.matches(&any_row, true));
    }

    #[test]
    fn test_matching_ignores_case() {
        let criteria = PublishRequestSearchCriteria {
            solution_id: Some("SOL-1".to_string()),
            ..Default::default()
        };
        assert!(criteria.matches(&row(1, "sol-1", "user-1", "PE"), false));

        let criteria = PublishRequestSearchCriteria {
            status_code: Some("pe".to_string()),
            ..Default::default()
        };
        assert!(criteria.matches(&row(1, "sol-1", "user-1", "PE"), true));
    }

    #[test]
    fn test_review_user_filter_against_null_column() {
        let criteria = PublishRequestSearchCriteria {
            review_user_id: Some("reviewer-1".to_string()),
            ..Default::default()
        };

        // Row has no reviewer: equality cannot hold
        assert!(!criteria.matches(&row(1, "sol-1", "user-1", "PE"), false));

        let mut reviewed = row(2, "sol-1", "user-1", "PE");
        reviewed.set_review_user_id(Some("Reviewer-1".to_string()));
        assert!(criteria.matches(&reviewed, false));
    }

    #[test]
    fn test_sort_column_whitelist() {
        assert_eq!(sort_column("status_code"), Some("status_cd"));
        assert_eq!(sort_column("created"), Some("created_date"));
        assert_eq!(sort_column("comment"), None);
        assert_eq!(sort_column("1; DROP TABLE C_PUBLISH_REQUEST"), None);
    }
}
