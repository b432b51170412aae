//! PostgreSQL solution group and membership repositories
//!
//! Tables: C_SOLUTION_GROUP (generated INT key) and the composite-key
//! membership table C_SOL_GRP_MEM_MAP, whose created_date is written once
//! at insertion and never updated.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::group::{
    GroupMemberRepository, SolutionGroup, SolutionGroupMember, SolutionGroupRepository,
};
use crate::domain::page::{Page, PageRequest};
use crate::domain::solution::SolutionId;
use crate::domain::DomainError;
use crate::infrastructure::db::{map_sqlx_error, to_int_column};

/// PostgreSQL implementation of SolutionGroupRepository
#[derive(Debug, Clone)]
pub struct PostgresSolutionGroupRepository {
    pool: PgPool,
}

impl PostgresSolutionGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SolutionGroupRepository for PostgresSolutionGroupRepository {
    async fn get(&self, group_id: i64) -> Result<Option<SolutionGroup>, DomainError> {
        // Keys outside the INT column range cannot identify any row
        let Ok(key) = i32::try_from(group_id) else {
            return Ok(None);
        };

        let row = sqlx::query(
            "SELECT group_id, name, created_date, modified_date FROM c_solution_group \
             WHERE group_id = $1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get group: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_group(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, mut group: SolutionGroup) -> Result<SolutionGroup, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO c_solution_group (name, created_date, modified_date)
            VALUES ($1, $2, $3)
            RETURNING group_id
            "#,
        )
        .bind(group.name())
        .bind(group.created().naive_utc())
        .bind(group.modified().naive_utc())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to create group", e))?;

        let group_id: i32 = row.get("group_id");
        group.set_group_id(i64::from(group_id));
        Ok(group)
    }

    async fn update(&self, group: &SolutionGroup) -> Result<SolutionGroup, DomainError> {
        let id = group
            .group_id()
            .ok_or_else(|| DomainError::validation("Cannot update an unsaved group"))?;

        let key = i32::try_from(id)
            .map_err(|_| DomainError::not_found(format!("Group '{}' not found", id)))?;

        let result = sqlx::query(
            "UPDATE c_solution_group SET name = $2, modified_date = $3 WHERE group_id = $1",
        )
        .bind(key)
        .bind(group.name())
        .bind(group.modified().naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update group", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("Group '{}' not found", id)));
        }

        Ok(group.clone())
    }

    async fn delete(&self, group_id: i64) -> Result<bool, DomainError> {
        let Ok(key) = i32::try_from(group_id) else {
            return Ok(false);
        };

        let result = sqlx::query("DELETE FROM c_solution_group WHERE group_id = $1")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete group: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self, page: &PageRequest) -> Result<Page<SolutionGroup>, DomainError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM c_solution_group")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count groups: {}", e)))?;

        let rows = sqlx::query(
            "SELECT group_id, name, created_date, modified_date FROM c_solution_group \
             ORDER BY group_id LIMIT $1 OFFSET $2",
        )
        .bind(page.size as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to list groups: {}", e)))?;

        let mut groups = Vec::with_capacity(rows.len());
        for row in rows {
            groups.push(row_to_group(&row)?);
        }

        Ok(Page::new(groups, page, total as usize))
    }
}

fn row_to_group(row: &sqlx::postgres::PgRow) -> Result<SolutionGroup, DomainError> {
    let group_id: i32 = row.get("group_id");
    let name: String = row.get("name");
    let created: chrono::NaiveDateTime = row.get("created_date");
    let modified: chrono::NaiveDateTime = row.get("modified_date");

    Ok(SolutionGroup::from_storage(
        i64::from(group_id),
        name,
        created.and_utc(),
        modified.and_utc(),
    ))
}

/// PostgreSQL implementation of GroupMemberRepository
#[derive(Debug, Clone)]
pub struct PostgresGroupMemberRepository {
    pool: PgPool,
}

impl PostgresGroupMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupMemberRepository for PostgresGroupMemberRepository {
    async fn add_member(
        &self,
        member: SolutionGroupMember,
    ) -> Result<SolutionGroupMember, DomainError> {
        let row = sqlx::query(
            r#"
            INSERT INTO c_sol_grp_mem_map (group_id, solution_id, created_date)
            VALUES ($1, $2, NOW())
            RETURNING created_date
            "#,
        )
        .bind(to_int_column(member.group_id(), "Group ID")?)
        .bind(member.solution_id().as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to add group member", e))?;

        let created: chrono::NaiveDateTime = row.get("created_date");
        Ok(SolutionGroupMember::from_storage(
            member.group_id(),
            member.solution_id().clone(),
            created.and_utc(),
        ))
    }

    async fn drop_member(
        &self,
        group_id: i64,
        solution_id: &SolutionId,
    ) -> Result<bool, DomainError> {
        let Ok(key) = i32::try_from(group_id) else {
            return Ok(false);
        };

        let result = sqlx::query(
            "DELETE FROM c_sol_grp_mem_map WHERE group_id = $1 AND solution_id = $2",
        )
        .bind(key)
        .bind(solution_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to drop group member: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_solution_ids_in_group(
        &self,
        group_id: i64,
    ) -> Result<Vec<SolutionId>, DomainError> {
        let Ok(key) = i32::try_from(group_id) else {
            return Ok(Vec::new());
        };

        let rows = sqlx::query("SELECT solution_id FROM c_sol_grp_mem_map WHERE group_id = $1")
            .bind(key)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to list group members: {}", e))
            })?;

        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            let id: String = row.get("solution_id");
            ids.push(SolutionId::new(id).map_err(|e| {
                DomainError::storage(format!("Invalid solution ID in database: {}", e))
            })?);
        }

        Ok(ids)
    }
}
