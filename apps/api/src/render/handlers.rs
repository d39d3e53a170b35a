//! Read-only render endpoints. Each one resolves the working document and
//! live style, runs the pure pipeline, and returns the view — no render
//! state is kept between requests.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use uuid::Uuid;

use crate::document::handlers::{resolve_document, resolve_style};
use crate::errors::AppError;
use crate::render::{form_from_document, layout_document, overlay_from_page, serialize_pdf};
use crate::render::overlay::OverlayView;
use crate::render::form::FormView;
use crate::render::tree::Page;
use crate::state::AppState;

/// GET /api/v1/resume/:user_id/layout
pub async fn handle_get_layout(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Page>, AppError> {
    let (doc, _) = resolve_document(&state, user_id).await?;
    let style = resolve_style(&state, user_id).await?;
    Ok(Json(layout_document(&doc, &style)))
}

/// GET /api/v1/resume/:user_id/overlay
pub async fn handle_get_overlay(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<OverlayView>, AppError> {
    let (doc, _) = resolve_document(&state, user_id).await?;
    let style = resolve_style(&state, user_id).await?;
    let page = layout_document(&doc, &style);
    Ok(Json(overlay_from_page(&page)))
}

/// GET /api/v1/resume/:user_id/form
pub async fn handle_get_form(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<FormView>, AppError> {
    let (doc, _) = resolve_document(&state, user_id).await?;
    Ok(Json(form_from_document(&doc)))
}

/// GET /api/v1/resume/:user_id/pdf
pub async fn handle_get_pdf(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (doc, _) = resolve_document(&state, user_id).await?;
    let style = resolve_style(&state, user_id).await?;
    let page = layout_document(&doc, &style);
    let bytes = Bytes::from(serialize_pdf(&page));
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"resume.pdf\"",
            ),
        ],
        bytes,
    ))
}
