pub mod health;

use axum::{routing::get, Router};

use crate::export::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Export API (one endpoint per target format)
        .route(
            "/api/v1/resumes/:id/export/pdf",
            get(handlers::handle_export_pdf),
        )
        .route(
            "/api/v1/resumes/:id/export/docx",
            get(handlers::handle_export_docx),
        )
        .route(
            "/api/v1/resumes/:id/export/txt",
            get(handlers::handle_export_text),
        )
        .with_state(state)
}
