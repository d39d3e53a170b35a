use std::sync::Arc;

use redis::Client as RedisClient;
use sqlx::PgPool;

use crate::config::Config;
use crate::document::StyleController;
use crate::tailor::TailorBackend;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Session cache: per-user entity sequences and style parameters.
    pub redis: RedisClient,
    /// Pluggable tailoring backend. Production wires the Anthropic client;
    /// tests substitute a stub.
    pub llm: Arc<dyn TailorBackend>,
    pub config: Config,
    /// Layout parameter controller — live style state with debounced
    /// propagation to the session cache.
    pub styles: Arc<StyleController>,
}
