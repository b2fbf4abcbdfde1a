//! Repository for the `objects` table.

use scenestore_core::object::{CreateObject, ObjectFilter, UpdateObject};
use scenestore_core::types::ObjectId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::object::ObjectRecord;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, doc, created_at, updated_at";

/// Provides CRUD operations for scene objects.
pub struct ObjectRepo;

impl ObjectRepo {
    /// Insert a new object, returning the created row.
    ///
    /// If `input.id` is `None`, a fresh UUIDv7 is assigned.
    pub async fn create(pool: &PgPool, input: &CreateObject) -> Result<ObjectRecord, sqlx::Error> {
        let query = format!("INSERT INTO objects (id, doc) VALUES ($1, $2) RETURNING {COLUMNS}");
        sqlx::query_as::<_, ObjectRecord>(&query)
            .bind(input.id.unwrap_or_else(ObjectId::now_v7))
            .bind(Json(input.to_document()))
            .fetch_one(pool)
            .await
    }

    /// Insert each object independently, in order, without a transaction.
    ///
    /// Rows the database rejects (e.g. a duplicate `_id`) are logged and
    /// skipped so the remaining entries still persist. Connection-level
    /// failures abort the batch.
    pub async fn create_many(
        pool: &PgPool,
        inputs: &[CreateObject],
    ) -> Result<Vec<ObjectRecord>, sqlx::Error> {
        let mut saved = Vec::with_capacity(inputs.len());
        for (index, input) in inputs.iter().enumerate() {
            match Self::create(pool, input).await {
                Ok(record) => saved.push(record),
                Err(sqlx::Error::Database(db_err)) => {
                    tracing::warn!(index, error = %db_err, "Skipping object rejected by database");
                }
                Err(other) => return Err(other),
            }
        }
        Ok(saved)
    }

    /// Find an object by its primary identifier.
    pub async fn find_by_id(pool: &PgPool, id: ObjectId) -> Result<Option<ObjectRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM objects WHERE id = $1");
        sqlx::query_as::<_, ObjectRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all objects, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ObjectRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM objects ORDER BY created_at ASC, id ASC");
        sqlx::query_as::<_, ObjectRecord>(&query)
            .fetch_all(pool)
            .await
    }

    /// List objects whose documents contain every field set in `filter`.
    pub async fn list_by_filter(
        pool: &PgPool,
        filter: &ObjectFilter,
    ) -> Result<Vec<ObjectRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM objects
             WHERE doc @> $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, ObjectRecord>(&query)
            .bind(Json(filter))
            .fetch_all(pool)
            .await
    }

    /// Merge the set fields of `input` over the stored document.
    ///
    /// Runs as one statement, so concurrent updates are last-write-wins per
    /// field. An empty update returns the current row unchanged.
    pub async fn update(
        pool: &PgPool,
        id: ObjectId,
        input: &UpdateObject,
    ) -> Result<Option<ObjectRecord>, sqlx::Error> {
        if input.is_empty() {
            return Self::find_by_id(pool, id).await;
        }
        let query = format!(
            "UPDATE objects
             SET doc = (doc - $2::text[]) || $3::jsonb,
                 updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ObjectRecord>(&query)
            .bind(id)
            .bind(input.cleared_fields())
            .bind(Json(input.patch()))
            .fetch_optional(pool)
            .await
    }

    /// Delete an object. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: ObjectId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM objects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
