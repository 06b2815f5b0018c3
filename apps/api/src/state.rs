use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::matching::skills::SkillExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Compiled skill vocabulary, built once at startup.
    pub skills: Arc<SkillExtractor>,
}
