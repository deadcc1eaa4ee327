//! Axum route handlers for the Export API.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::auth::{is_owner_or_elevated, AuthPrincipal};
use crate::errors::AppError;
use crate::export::{export_resume, ExportFormat};
use crate::state::AppState;

/// GET /api/v1/resumes/:id/export/pdf
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    principal: AuthPrincipal,
) -> Result<Response, AppError> {
    export_response(state, id, principal, ExportFormat::Pdf).await
}

/// GET /api/v1/resumes/:id/export/docx
pub async fn handle_export_docx(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    principal: AuthPrincipal,
) -> Result<Response, AppError> {
    export_response(state, id, principal, ExportFormat::Docx).await
}

/// GET /api/v1/resumes/:id/export/txt
pub async fn handle_export_text(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    principal: AuthPrincipal,
) -> Result<Response, AppError> {
    export_response(state, id, principal, ExportFormat::Text).await
}

/// Shared path: fetch, authorize, encode, attach download headers.
///
/// Encoding is CPU-bound but bounded by résumé size; it runs inline on the
/// request task rather than through spawn_blocking.
async fn export_response(
    state: AppState,
    id: Uuid,
    principal: AuthPrincipal,
    format: ExportFormat,
) -> Result<Response, AppError> {
    let resume = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;

    if !is_owner_or_elevated(resume.owner_id, &principal) {
        return Err(AppError::Forbidden);
    }

    let exported = export_resume(format, &resume.document, state.fonts.as_deref());

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, exported.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", exported.filename),
            ),
        ],
        exported.data,
    )
        .into_response())
}
