//! PostgreSQL document repository implementation
//!
//! Covers the C_DOCUMENT table and the C_SOL_REV_DOC_MAP mapping table
//! that attaches documents to solution revisions under an access type.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::document::{
    Document, DocumentId, DocumentRepository, RevisionDocumentMap,
};
use crate::domain::DomainError;
use crate::infrastructure::db::{map_sqlx_error, to_int_column};

/// PostgreSQL implementation of DocumentRepository
#[derive(Debug, Clone)]
pub struct PostgresDocumentRepository {
    pool: PgPool,
}

impl PostgresDocumentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str =
    "document_id, name, version, uri, size, user_id, created_date, modified_date";

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn get(&self, id: &DocumentId) -> Result<Option<Document>, DomainError> {
        let query = format!(
            "SELECT {} FROM c_document WHERE document_id = $1",
            SELECT_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get document: {}", e)))?;

        match row {
            Some(row) => Ok(Some(row_to_document(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, mut document: Document) -> Result<Document, DomainError> {
        // Same ID policy as solutions
        let id = match document.document_id() {
            Some(id) => id.clone(),
            None => DocumentId::generate(),
        };
        document.set_document_id(id.clone());

        sqlx::query(
            r#"
            INSERT INTO c_document (document_id, name, version, uri, size, user_id,
                                    created_date, modified_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(id.as_str())
        .bind(document.name())
        .bind(document.version())
        .bind(document.uri())
        .bind(to_int_column(document.size(), "Document size")?)
        .bind(document.user_id())
        .bind(document.created().naive_utc())
        .bind(document.modified().naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to create document", e))?;

        Ok(document)
    }

    async fn update(&self, document: &Document) -> Result<Document, DomainError> {
        let id = document
            .document_id()
            .ok_or_else(|| DomainError::validation("Cannot update an unsaved document"))?;

        let result = sqlx::query(
            r#"
            UPDATE c_document
            SET name = $2, version = $3, uri = $4, size = $5, user_id = $6,
                modified_date = $7
            WHERE document_id = $1
            "#,
        )
        .bind(id.as_str())
        .bind(document.name())
        .bind(document.version())
        .bind(document.uri())
        .bind(to_int_column(document.size(), "Document size")?)
        .bind(document.user_id())
        .bind(document.modified().naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to update document", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!(
                "Document '{}' not found",
                id
            )));
        }

        Ok(document.clone())
    }

    async fn delete(&self, id: &DocumentId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM c_document WHERE document_id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete document: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn map_to_revision(
        &self,
        map: RevisionDocumentMap,
    ) -> Result<RevisionDocumentMap, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO c_sol_rev_doc_map (revision_id, access_type_cd, document_id)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(map.revision_id())
        .bind(map.access_type_code())
        .bind(map.document_id().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("Failed to map document to revision", e))?;

        Ok(map)
    }

    async fn unmap_from_revision(&self, map: &RevisionDocumentMap) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM c_sol_rev_doc_map
            WHERE revision_id = $1 AND access_type_cd = $2 AND document_id = $3
            "#,
        )
        .bind(map.revision_id())
        .bind(map.access_type_code())
        .bind(map.document_id().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::storage(format!("Failed to unmap document from revision: {}", e))
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_revision_access(
        &self,
        revision_id: &str,
        access_type_code: &str,
    ) -> Result<Vec<Document>, DomainError> {
        // Inner join of the document table and the revision mapping table,
        // equality filters on both mapping columns. Unpaged: documents per
        // revision and access type are expected to be few.
        let rows = sqlx::query(
            r#"
            SELECT d.document_id, d.name, d.version, d.uri, d.size, d.user_id,
                   d.created_date, d.modified_date
            FROM c_document d, c_sol_rev_doc_map m
            WHERE d.document_id = m.document_id
              AND m.revision_id = $1
              AND m.access_type_cd = $2
            "#,
        )
            .bind(revision_id)
            .bind(access_type_code)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                DomainError::storage(format!("Failed to find documents by revision: {}", e))
            })?;

        let mut documents = Vec::with_capacity(rows.len());
        for row in rows {
            documents.push(row_to_document(&row)?);
        }

        Ok(documents)
    }
}

fn row_to_document(row: &sqlx::postgres::PgRow) -> Result<Document, DomainError> {
    let document_id: String = row.get("document_id");
    let name: String = row.get("name");
    let version: Option<String> = row.get("version");
    let uri: String = row.get("uri");
    let size: i32 = row.get("size");
    let user_id: Option<String> = row.get("user_id");
    let created: chrono::NaiveDateTime = row.get("created_date");
    let modified: chrono::NaiveDateTime = row.get("modified_date");

    let document_id = DocumentId::new(document_id)
        .map_err(|e| DomainError::storage(format!("Invalid document ID in database: {}", e)))?;

    Ok(Document::from_storage(
        document_id,
        name,
        version,
        uri,
        i64::from(size),
        user_id,
        created.and_utc(),
        modified.and_utc(),
    ))
}
