//! Resume document endpoints: load, field updates, entry lifecycle, style,
//! and the default/generated persistence surface.
//!
//! Every mutation follows the same order: mutate the in-memory document,
//! write the session cache, then (where applicable) write the remote
//! store. A remote failure surfaces to the caller but never rolls back
//! the session — the user's edits stay live and the save can be retried.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::document::{apply_update, cache, repo, UpdateError};
use crate::errors::AppError;
use crate::models::{EntityType, ResumeDocument, StyleParameters, StyleUpdate};
use crate::state::AppState;

/// Where the loaded document came from, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentSource {
    Cache,
    Default,
    Blank,
}

/// Resolves the user's working document: session cache over remote
/// default over a blank seed.
pub async fn resolve_document(
    state: &AppState,
    user_id: Uuid,
) -> Result<(ResumeDocument, DocumentSource), AppError> {
    let (mut doc, mut source) = match repo::get_default_resume(&state.db, user_id).await? {
        Some((doc, _)) => (doc, DocumentSource::Default),
        None => (ResumeDocument::blank(), DocumentSource::Blank),
    };
    if cache::apply_cached_document(&state.redis, user_id, &mut doc).await? {
        source = DocumentSource::Cache;
    }
    Ok((doc, source))
}

/// Resolves the user's live style: controller state over session cache
/// over fixed defaults. Seeds the controller so later merges see it.
pub async fn resolve_style(state: &AppState, user_id: Uuid) -> Result<StyleParameters, AppError> {
    if let Some(style) = state.styles.get(user_id) {
        return Ok(style);
    }
    let mut style = StyleParameters::default();
    cache::apply_cached_style(&state.redis, user_id, &mut style).await?;
    Ok(state.styles.seed_if_absent(user_id, style))
}

async fn store_session(state: &AppState, user_id: Uuid, doc: &ResumeDocument) -> Result<(), AppError> {
    cache::store_document(&state.redis, user_id, doc).await?;
    Ok(())
}

#[derive(Serialize)]
pub struct DocumentResponse {
    pub document: ResumeDocument,
    pub style: StyleParameters,
    pub source: DocumentSource,
}

/// GET /api/v1/resume/:user_id
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<DocumentResponse>, AppError> {
    let (document, source) = resolve_document(&state, user_id).await?;
    let style = resolve_style(&state, user_id).await?;
    Ok(Json(DocumentResponse {
        document,
        style,
        source,
    }))
}

#[derive(Deserialize)]
pub struct FieldUpdateRequest {
    pub entity: EntityType,
    pub index: usize,
    pub field: String,
    pub value: String,
}

/// PATCH /api/v1/resume/:user_id/field
///
/// The dispatch contract: one call, one field of one record, or a clean
/// rejection with the document untouched.
pub async fn handle_update_field(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<FieldUpdateRequest>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (mut doc, _) = resolve_document(&state, user_id).await?;

    apply_update(&mut doc, req.entity, req.index, &req.field, &req.value).map_err(|e| match e {
        UpdateError::IndexOutOfRange { .. } => AppError::NotFound(e.to_string()),
        UpdateError::UnknownField { .. } => AppError::Validation(e.to_string()),
        UpdateError::InvalidValue { .. } => AppError::UnprocessableEntity(e.to_string()),
    })?;

    store_session(&state, user_id, &doc).await?;
    Ok(Json(doc))
}

/// POST /api/v1/resume/:user_id/entries/:entity
pub async fn handle_append_entry(
    State(state): State<AppState>,
    Path((user_id, entity)): Path<(Uuid, EntityType)>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (mut doc, _) = resolve_document(&state, user_id).await?;
    doc.append_blank(entity);
    store_session(&state, user_id, &doc).await?;
    Ok(Json(doc))
}

/// DELETE /api/v1/resume/:user_id/entries/:entity/:index
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((user_id, entity, index)): Path<(Uuid, EntityType, usize)>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (mut doc, _) = resolve_document(&state, user_id).await?;
    if !doc.remove_at(entity, index) {
        return Err(AppError::NotFound(format!(
            "{} index {index} out of range",
            entity.as_str()
        )));
    }
    store_session(&state, user_id, &doc).await?;
    Ok(Json(doc))
}

/// DELETE /api/v1/resume/:user_id/entries/:entity
pub async fn handle_clear_entries(
    State(state): State<AppState>,
    Path((user_id, entity)): Path<(Uuid, EntityType)>,
) -> Result<Json<ResumeDocument>, AppError> {
    let (mut doc, _) = resolve_document(&state, user_id).await?;
    doc.clear(entity);
    store_session(&state, user_id, &doc).await?;
    Ok(Json(doc))
}

/// GET /api/v1/resume/:user_id/style
pub async fn handle_get_style(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<StyleParameters>, AppError> {
    Ok(Json(resolve_style(&state, user_id).await?))
}

/// PATCH /api/v1/resume/:user_id/style
///
/// The merge is immediate in the response; the session cache receives the
/// value after the debounce window, so slider drags coalesce.
pub async fn handle_update_style(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(update): Json<StyleUpdate>,
) -> Result<Json<StyleParameters>, AppError> {
    let base = resolve_style(&state, user_id).await?;
    let merged = state.styles.apply(user_id, base, update);
    Ok(Json(merged))
}

/// POST /api/v1/resume/:user_id/style/reset
pub async fn handle_reset_style(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<StyleParameters>, AppError> {
    let defaults = StyleParameters::default();
    state.styles.set(user_id, defaults.clone());
    Ok(Json(defaults))
}

/// POST /api/v1/resume/:user_id/default
///
/// Saves the current working document as the user's baseline.
pub async fn handle_save_default(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let (doc, _) = resolve_document(&state, user_id).await?;
    let updated_at = repo::set_default_resume(&state.db, user_id, &doc).await?;
    Ok(Json(json!({ "updated_at": updated_at })))
}

/// GET /api/v1/resume/:user_id/default
pub async fn handle_get_default(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let (document, updated_at) = repo::get_default_resume(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No default resume for user {user_id}")))?;
    Ok(Json(json!({ "document": document, "updated_at": updated_at })))
}

#[derive(Deserialize)]
pub struct SaveGeneratedRequest {
    pub job_description: String,
}

/// POST /api/v1/resume/:user_id/generated
///
/// Appends the current working document to the generated log.
pub async fn handle_save_generated(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(req): Json<SaveGeneratedRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let (doc, _) = resolve_document(&state, user_id).await?;
    let id = repo::append_generated_resume(&state.db, user_id, &doc, &req.job_description).await?;
    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// GET /api/v1/resume/:user_id/generated
pub async fn handle_list_generated(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<repo::GeneratedResumeSummary>>, AppError> {
    Ok(Json(repo::list_generated_resumes(&state.db, user_id).await?))
}

/// GET /api/v1/resume/:user_id/generated/:id
pub async fn handle_get_generated(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, AppError> {
    let snapshot = repo::get_generated_resume(&state.db, user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Generated resume {id} not found")))?;
    Ok(Json(json!({
        "id": snapshot.id,
        "document": snapshot.document,
        "job_description": snapshot.job_description,
        "created_at": snapshot.created_at,
    })))
}

/// POST /api/v1/resume/:user_id/generated/:id/load
///
/// Loads a generated snapshot into the editing session, replacing the
/// cached working document. The baseline default is untouched.
pub async fn handle_load_generated(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ResumeDocument>, AppError> {
    let snapshot = repo::get_generated_resume(&state.db, user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Generated resume {id} not found")))?;
    store_session(&state, user_id, &snapshot.document).await?;
    Ok(Json(snapshot.document))
}
