//! PostgreSQL publish request repository and search implementation
//!
//! The search composes its WHERE clause explicitly: one case-insensitive
//! equality predicate per present filter, joined with AND or OR. No
//! predicates means no WHERE clause at all, so empty criteria return every
//! row for either combinator.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::page::{Page, PageRequest};
use crate::domain::publish_request::{
    sort_column, PublishRequest, PublishRequestRepository, PublishRequestSearchCriteria,
    PublishRequestSearchService,
};
use crate::domain::DomainError;
use crate::infrastructure::db::map_sqlx_error;

/// PostgreSQL implementation of PublishRequestRepository and its search
#[derive(Debug, Clone)]
pub struct PostgresPublishRequestRepository {
    pool: PgPool,
}

impl PostgresPublishRequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = "request_id, solution_id, revision_id, req_user_id, \
     rvw_user_id, status_cd, comment, created_date, modified_date";

#[async_trait]
impl PublishRequestRepository for PostgresPublishRequestRepository {
    async fn get(&self, request_id: i64) -> Result<Option<PublishRequest>, DomainError> {
        let query = format!(
            "SELECT {} FROM c_publish_request WHERE request_id = $1",
            SELECT_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(request_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to get publish request: {}", e))
            })?;

        match row {
            Some(row) => Ok(Some(row_to_publish_request(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, mut request: PublishRequest) -> Result<PublishRequest, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO c_publish_request (solution_id, revision_id, req_user_id,
                                           rvw_user_id, status_cd, comment,
                                           created_date, modified_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING request_id
            "#,
        )
        .bind(request.solution_id())
        .bind(request.revision_id())
        .bind(request.request_user_id())
        .bind(request.review_user_id())
        .bind(request.status_code())
        .bind(request.comment())
        .bind(request.created().naive_utc())
        .bind(request.modified().naive_utc())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to create publish request", e))?;

        let request_id: i64 = row.get("request_id");
        request.set_request_id(request_id);
        Ok(request)
    }

    async fn update(&self, request: &PublishRequest) -> Result<PublishRequest, DomainError> {
        let id = request
            .request_id()
            .ok_or_else(|| DomainError::validation("Cannot update an unsaved request"))?;

        let result = sqlx::query(
            r#"
            UPDATE c_publish_request
            SET solution_id = $2, revision_id = $3, req_user_id = $4, rvw_user_id = $5,
                status_cd = $6, comment = $7, modified_date = $8
            WHERE request_id = $1
            "#,
        )
        .bind(id)
        .bind(request.solution_id())
        .bind(request.revision_id())
        .bind(request.request_user_id())
        .bind(request.review_user_id())
        .bind(request.status_code())
        .bind(request.comment())
        .bind(request.modified().naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update publish request", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Publish request '{}' not found",
                id
            )));
        }

        Ok(request.clone())
    }

    async fn delete(&self, request_id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM c_publish_request WHERE request_id = $1")
            .bind(request_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to delete publish request: {}", e))
            })?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl PublishRequestSearchService for PostgresPublishRequestRepository {
    async fn find_publish_requests(
        &self,
        criteria: &PublishRequestSearchCriteria,
        is_or: bool,
        page: &PageRequest,
    ) -> Result<Page<PublishRequest>, DomainError> {
        let filters = collect_filters(criteria);
        let where_clause = build_where_clause(&filters, is_or);
        let order_clause = build_order_clause(page)?;

        let count_query = format!("SELECT COUNT(*) FROM c_publish_request{}", where_clause);
        let mut count = sqlx::query_scalar::<_, i64>(&count_query);
        for (_, value) in &filters {
            count = count.bind(value.as_str());
        }
        let total = count
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to count publish requests: {}", e))
            })?;

        let data_query = format!(
            "SELECT {} FROM c_publish_request{}{} LIMIT ${} OFFSET ${}",
            SELECT_COLUMNS,
            where_clause,
            order_clause,
            filters.len() + 1,
            filters.len() + 2,
        );
        let mut data = sqlx::query(&data_query);
        for (_, value) in &filters {
            data = data.bind(value.as_str());
        }
        let rows = data
            .bind(page.size as i64)
            .bind(page.offset() as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to search publish requests: {}", e))
            })?;

        let mut requests = Vec::with_capacity(rows.len());
        for row in rows {
            requests.push(row_to_publish_request(&row)?);
        }

        Ok(Page::new(requests, page, total as usize))
    }
}

/// Pair each present filter with its column, in bind order
fn collect_filters(criteria: &PublishRequestSearchCriteria) -> Vec<(&'static str, String)> {
    let mut filters = Vec::with_capacity(5);

    if let Some(ref v) = criteria.solution_id {
        filters.push(("solution_id", v.clone()));
    }
    if let Some(ref v) = criteria.revision_id {
        filters.push(("revision_id", v.clone()));
    }
    if let Some(ref v) = criteria.request_user_id {
        filters.push(("req_user_id", v.clone()));
    }
    if let Some(ref v) = criteria.review_user_id {
        filters.push(("rvw_user_id", v.clone()));
    }
    if let Some(ref v) = criteria.status_code {
        filters.push(("status_cd", v.clone()));
    }

    filters
}

/// One LOWER() equality predicate per filter, joined with AND or OR.
/// Zero filters produce no WHERE clause: every row matches, for both
/// combinators.
fn build_where_clause(filters: &[(&'static str, String)], is_or: bool) -> String {
    if filters.is_empty() {
        return String::new();
    }

    let connector = if is_or { " OR " } else { " AND " };
    let clauses: Vec<String> = filters
        .iter()
        .enumerate()
        .map(|(i, (column, _))| format!("LOWER({}) = LOWER(${})", column, i + 1))
        .collect();

    format!(" WHERE {}", clauses.join(connector))
}

/// ORDER BY from the whitelisted sort fields; request ID ascending when
/// the request carries no sort, so paging stays stable.
fn build_order_clause(page: &PageRequest) -> Result<String, DomainError> {
    if page.sort.is_empty() {
        return Ok(" ORDER BY request_id ASC".to_string());
    }

    let mut orders = Vec::with_capacity(page.sort.len());
    for order in &page.sort {
        let column = sort_column(&order.field).ok_or_else(|| {
            DomainError::validation(format!("Unknown sort field '{}'", order.field))
        })?;
        orders.push(format!("{} {}", column, order.direction.as_sql()));
    }

    Ok(format!(" ORDER BY {}", orders.join(", ")))
}

fn row_to_publish_request(row: &sqlx::postgres::PgRow) -> Result<PublishRequest, DomainError> {
    let request_id: i64 = row.get("request_id");
    let solution_id: String = row.get("solution_id");
    let revision_id: String = row.get("revision_id");
    let request_user_id: String = row.get("req_user_id");
    let review_user_id: Option<String> = row.get("rvw_user_id");
    let status_code: String = row.get("status_cd");
    let comment: Option<String> = row.get("comment");
    let created: chrono::NaiveDateTime = row.get("created_date");
    let modified: chrono::NaiveDateTime = row.get("modified_date");

    Ok(PublishRequest::from_storage(
        request_id,
        solution_id,
        revision_id,
        request_user_id,
        review_user_id,
        status_code,
        comment,
        created.and_utc(),
        modified.and_utc(),
    ))
}
