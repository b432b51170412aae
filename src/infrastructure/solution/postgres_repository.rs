//! PostgreSQL solution repository implementation
//!
//! Column names and types follow the legacy catalog schema (C_SOLUTION):
//! CHAR(36) UUID keys, CHAR(1) Y/N flags, and INT counter columns that the
//! generic update never touches.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::solution::{Solution, SolutionId, SolutionRepository};
use crate::domain::DomainError;
use crate::infrastructure::db::{bool_to_yn, map_sqlx_error, to_int_column, yn_to_bool};

/// PostgreSQL implementation of SolutionRepository
#[derive(Debug, Clone)]
pub struct PostgresSolutionRepository {
    pool: PgPool,
}

impl PostgresSolutionRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = "solution_id, name, metadata, active_yn, model_type_cd, \
     toolkit_type_cd, origin, user_id, view_count, download_count, rating_count, \
     rating_avg_tenths, featured_yn, created_date, modified_date";

#[async_trait]
impl SolutionRepository for PostgresSolutionRepository {
    async fn get(&self, id: &SolutionId) -> Result<Option<Solution>, DomainError> {
        let query = format!(
            "SELECT {} FROM c_solution WHERE solution_id = $1",
            SELECT_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get solution: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_solution(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, mut solution: Solution) -> Result<Solution, DomainError> {
        // ID policy: keep a client-supplied UUID, else generate one here
        let id = match solution.solution_id() {
            Some(id) => id.clone(),
            None => SolutionId::generate(),
        };
        solution.set_solution_id(id.clone());

        sqlx::query(
            r#"
            INSERT INTO c_solution (solution_id, name, metadata, active_yn, model_type_cd,
                                    toolkit_type_cd, origin, user_id, view_count,
                                    download_count, rating_count, rating_avg_tenths,
                                    featured_yn, created_date, modified_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 0, 0, 0, 0, $9, $10, $11)
            "#,
        )
        .bind(id.as_str())
        .bind(solution.name())
        .bind(solution.metadata())
        .bind(bool_to_yn(solution.is_active()))
        .bind(solution.model_type_code())
        .bind(solution.toolkit_type_code())
        .bind(solution.origin())
        .bind(solution.user_id())
        .bind(solution.featured().map(bool_to_yn))
        .bind(solution.created().naive_utc())
        .bind(solution.modified().naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to create solution", e))?;

        Ok(solution)
    }

    async fn update(&self, solution: &Solution) -> Result<Solution, DomainError> {
        let id = solution
            .solution_id()
            .ok_or_else(|| DomainError::validation("Cannot update an unsaved solution"))?;

        // Counter columns are deliberately absent from the SET list
        let result = sqlx::query(
            r#"
            UPDATE c_solution
            SET name = $2, metadata = $3, active_yn = $4, model_type_cd = $5,
                toolkit_type_cd = $6, origin = $7, user_id = $8, featured_yn = $9,
                modified_date = $10
            WHERE solution_id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(solution.name())
        .bind(solution.metadata())
        .bind(bool_to_yn(solution.is_active()))
        .bind(solution.model_type_code())
        .bind(solution.toolkit_type_code())
        .bind(solution.origin())
        .bind(solution.user_id())
        .bind(solution.featured().map(bool_to_yn))
        .bind(solution.modified().naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update solution", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Solution '{}' not found",
                id
            )));
        }

        // Re-read so the caller gets the stored counter values back
        self.get(id).await?.ok_or_else(|| {
            DomainError::storage(format!("Solution '{}' vanished during update", id))
        })
    }

    async fn delete(&self, id: &SolutionId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM c_solution WHERE solution_id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete solution: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_view_count(&self, id: &SolutionId) -> Result<(), DomainError> {
        self.increment_counter(id, "view_count").await
    }

    async fn increment_download_count(&self, id: &SolutionId) -> Result<(), DomainError> {
        self.increment_counter(id, "download_count").await
    }

    async fn update_rating_stats(
        &self,
        id: &SolutionId,
        rating_count: i64,
        rating_average_tenths: i64,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE c_solution
            SET rating_count = $2, rating_avg_tenths = $3
            WHERE solution_id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(to_int_column(rating_count, "Rating count")?)
        .bind(to_int_column(rating_average_tenths, "Rating average")?)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to update rating stats: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Solution '{}' not found",
                id
            )));
        }

        Ok(())
    }
}

impl PostgresSolutionRepository {
    /// Single-statement increment: concurrency safety is the store's
    /// problem, not a read-modify-write in this process.
    async fn increment_counter(
        &self,
        id: &SolutionId,
        column: &'static str,
    ) -> Result<(), DomainError> {
        let query = format!(
            "UPDATE c_solution SET {col} = {col} + 1 WHERE solution_id = $1",
            col = column
        );

        let result = sqlx::query(&query)
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to increment {}: {}", column, e))
            })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Solution '{}' not found",
                id
            )));
        }

        Ok(())
    }
}

fn row_to_solution(row: &sqlx::postgres::PgRow) -> Result<Solution, DomainError> {
    let solution_id: String = row.get("solution_id");
    let name: String = row.get("name");
    let metadata: Option<String> = row.get("metadata");
    let active_yn: String = row.get("active_yn");
    let model_type_code: Option<String> = row.get("model_type_cd");
    let toolkit_type_code: Option<String> = row.get("toolkit_type_cd");
    let origin: Option<String> = row.get("origin");
    let user_id: Option<String> = row.get("user_id");
    // Counter columns are INT in the legacy schema
    let view_count: i32 = row.get("view_count");
    let download_count: i32 = row.get("download_count");
    let rating_count: i32 = row.get("rating_count");
    let rating_average_tenths: i32 = row.get("rating_avg_tenths");
    let featured_yn: Option<String> = row.get("featured_yn");
    let created: chrono::NaiveDateTime = row.get("created_date");
    let modified: chrono::NaiveDateTime = row.get("modified_date");

    let solution_id = SolutionId::new(solution_id)
        .map_err(|e| DomainError::storage(format!("Invalid solution ID in database: {}", e)))?;

    let featured = featured_yn.as_deref().map(yn_to_bool).transpose()?;

    Ok(Solution::from_storage(
        solution_id,
        name,
        metadata,
        yn_to_bool(&active_yn)?,
        model_type_code,
        toolkit_type_code,
        origin,
        user_id,
        i64::from(view_count),
        i64::from(download_count),
        i64::from(rating_count),
        i64::from(rating_average_tenths),
        featured,
        created.and_utc(),
        modified.and_utc(),
    ))
}
