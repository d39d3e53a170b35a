pub mod health;

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use crate::document::handlers as document;
use crate::errors::AppError;
use crate::render::handlers as render;
use crate::state::AppState;
use crate::tailor::handlers as tailor;

async fn not_implemented() -> Result<(), AppError> {
    Err(AppError::NotImplemented)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Document: load, field dispatch, entry lifecycle
        .route(
            "/api/v1/resume/:user_id",
            get(document::handle_get_document),
        )
        .route(
            "/api/v1/resume/:user_id/field",
            patch(document::handle_update_field),
        )
        .route(
            "/api/v1/resume/:user_id/entries/:entity",
            post(document::handle_append_entry).delete(document::handle_clear_entries),
        )
        .route(
            "/api/v1/resume/:user_id/entries/:entity/:index",
            delete(document::handle_remove_entry),
        )
        // Style parameters
        .route(
            "/api/v1/resume/:user_id/style",
            get(document::handle_get_style).patch(document::handle_update_style),
        )
        .route(
            "/api/v1/resume/:user_id/style/reset",
            post(document::handle_reset_style),
        )
        // Render views
        .route(
            "/api/v1/resume/:user_id/layout",
            get(render::handle_get_layout),
        )
        .route(
            "/api/v1/resume/:user_id/overlay",
            get(render::handle_get_overlay),
        )
        .route("/api/v1/resume/:user_id/form", get(render::handle_get_form))
        .route("/api/v1/resume/:user_id/pdf", get(render::handle_get_pdf))
        // AI tailoring
        .route(
            "/api/v1/resume/:user_id/tailor",
            post(tailor::handle_tailor),
        )
        // Persistence: default baseline and generated snapshot log
        .route(
            "/api/v1/resume/:user_id/default",
            get(document::handle_get_default).post(document::handle_save_default),
        )
        .route(
            "/api/v1/resume/:user_id/generated",
            get(document::handle_list_generated).post(document::handle_save_generated),
        )
        .route(
            "/api/v1/resume/:user_id/generated/:id",
            get(document::handle_get_generated),
        )
        .route(
            "/api/v1/resume/:user_id/generated/:id/load",
            post(document::handle_load_generated),
        )
        // Job-board automation (future phase)
        .route("/api/v1/automation/apply", post(not_implemented))
        .with_state(state)
}
