//! Tailoring endpoint.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::document::cache;
use crate::document::handlers::resolve_document;
use crate::document::repo;
use crate::errors::AppError;
use crate::models::ResumeDocument;
use crate::state::AppState;
use crate::tailor::tailor_resume;

#[derive(Deserialize)]
pub struct TailorRequest {
    pub job_description: String,
    /// When true, the tailored result is also appended to the generated
    /// log. Defaults to session-only.
    #[serde(default)]
    pub save: bool,
}

#[derive(Serialize)]
pub struct TailorResponse {
    pub document: ResumeDocument,
    /// True when the LLM result was rejected and the original content was
    /// kept — the caller should tell the user nothing was tailored.
    pub fallback: bool,
    pub generated_id: Option<Uuid>,
}

/// POST /api/v1/resume/:user_id/tailor
pub async fn handle_tailor(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<TailorRequest>,
) -> Result<Json<TailorResponse>, AppError> {
    if req.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description must not be empty".to_string(),
        ));
    }

    let (snapshot, _) = resolve_document(&state, user_id).await?;
    let outcome = tailor_resume(&snapshot, &req.job_description, state.llm.as_ref()).await;

    let doc = if outcome.fallback {
        warn!("tailoring for user {user_id} fell back to original content");
        snapshot
    } else {
        // The LLM call takes seconds; the session may have moved on. Only
        // the tailored sequences land, on a freshly resolved document, so
        // edits dispatched mid-flight to the other sequences survive.
        let (mut fresh, _) = resolve_document(&state, user_id).await?;
        fresh.replace_tailored(outcome.experience, outcome.projects);
        cache::store_document(&state.redis, user_id, &fresh).await?;
        info!("Tailored resume for user {user_id}");
        fresh
    };

    let generated_id = if req.save && !outcome.fallback {
        Some(repo::append_generated_resume(&state.db, user_id, &doc, &req.job_description).await?)
    } else {
        None
    };

    Ok(Json(TailorResponse {
        document: doc,
        fallback: outcome.fallback,
        generated_id,
    }))
}
