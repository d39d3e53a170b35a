//! Remote document store.
//!
//! Two tables, both keyed by user: `default_resumes` holds one upserted
//! baseline document per user, `generated_resumes` is an append-only log
//! of tailored snapshots with the job description they were tailored for.
//! Documents are stored as whole JSONB values; the row never decomposes
//! the entity sequences.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::ResumeDocument;

#[derive(Debug, sqlx::FromRow)]
struct DefaultResumeRow {
    doc: serde_json::Value,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct GeneratedResumeRow {
    id: Uuid,
    doc: serde_json::Value,
    job_description: String,
    created_at: DateTime<Utc>,
}

/// One tailored snapshot, hydrated.
#[derive(Debug)]
pub struct GeneratedResume {
    pub id: Uuid,
    pub document: ResumeDocument,
    pub job_description: String,
    pub created_at: DateTime<Utc>,
}

/// List entry for the snapshot log — no document body, the list view
/// only needs identity and provenance.
#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub struct GeneratedResumeSummary {
    pub id: Uuid,
    pub job_description: String,
    pub created_at: DateTime<Utc>,
}

/// Fetches the user's baseline document, if one was ever saved.
pub async fn get_default_resume(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<(ResumeDocument, DateTime<Utc>)>> {
    let row: Option<DefaultResumeRow> = sqlx::query_as(
        "SELECT doc, updated_at FROM default_resumes WHERE user_id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    match row {
        None => Ok(None),
        Some(row) => {
            let doc = serde_json::from_value(row.doc)
                .context("stored default resume is not a valid document")?;
            Ok(Some((doc, row.updated_at)))
        }
    }
}

/// Upserts the user's baseline document. Returns the new `updated_at`.
pub async fn set_default_resume(
    pool: &PgPool,
    user_id: Uuid,
    doc: &ResumeDocument,
) -> Result<DateTime<Utc>> {
    let updated_at: DateTime<Utc> = sqlx::query_scalar(
        r#"
        INSERT INTO default_resumes (user_id, doc, updated_at)
        VALUES ($1, $2, now())
        ON CONFLICT (user_id)
        DO UPDATE SET doc = EXCLUDED.doc, updated_at = now()
        RETURNING updated_at
        "#,
    )
    .bind(user_id)
    .bind(serde_json::to_value(doc)?)
    .fetch_one(pool)
    .await?;

    info!("Saved default resume for user {user_id}");
    Ok(updated_at)
}

/// Appends one tailored snapshot to the user's log. Never overwrites.
pub async fn append_generated_resume(
    pool: &PgPool,
    user_id: Uuid,
    doc: &ResumeDocument,
    job_description: &str,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    sqlx::query(
        r#"
        INSERT INTO generated_resumes (id, user_id, doc, job_description, created_at)
        VALUES ($1, $2, $3, $4, now())
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(serde_json::to_value(doc)?)
    .bind(job_description)
    .execute(pool)
    .await?;

    info!("Appended generated resume {id} for user {user_id}");
    Ok(id)
}

/// Fetches one tailored snapshot. The user id scopes the lookup so one
/// user cannot read another's snapshot by id.
pub async fn get_generated_resume(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
) -> Result<Option<GeneratedResume>> {
    let row: Option<GeneratedResumeRow> = sqlx::query_as(
        r#"
        SELECT id, doc, job_description, created_at
        FROM generated_resumes
        WHERE user_id = $1 AND id = $2
        "#,
    )
    .bind(user_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        None => Ok(None),
        Some(row) => {
            let document = serde_json::from_value(row.doc)
                .context("stored generated resume is not a valid document")?;
            Ok(Some(GeneratedResume {
                id: row.id,
                document,
                job_description: row.job_description,
                created_at: row.created_at,
            }))
        }
    }
}

/// Lists the user's tailored snapshots, newest first.
pub async fn list_generated_resumes(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<GeneratedResumeSummary>> {
    Ok(sqlx::query_as(
        r#"
        SELECT id, job_description, created_at
        FROM generated_resumes
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}
