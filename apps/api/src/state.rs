use std::sync::Arc;

use genpdf::fonts::{FontData, FontFamily};

use crate::config::Config;
use crate::store::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable résumé store. Production: PgResumeStore. Tests: in-memory.
    pub store: Arc<dyn ResumeStore>,
    /// Preloaded font family for the PDF encoder. `None` when the TTF assets
    /// are missing at startup; PDF requests then take the plain-text fallback.
    pub fonts: Option<Arc<FontFamily<FontData>>>,
    pub config: Config,
}
