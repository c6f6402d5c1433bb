use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError};
use crate::services::import::{FileUpload, RejectedFile};
use crate::state::AppState;
use lotops_core::models::ImportFile;
use lotops_core::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterImportsResponse {
    /// Files accepted as pending imports
    pub admitted: Vec<ImportFile>,
    /// Files refused by the admission policy, with reasons
    pub rejected: Vec<RejectedFile>,
}

/// Pull every file part out of the multipart request. Parts without a
/// filename (plain form fields) are skipped.
async fn collect_uploads(mut multipart: Multipart) -> Result<Vec<FileUpload>, AppError> {
    let mut uploads = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart field: {}", e)))?
    {
        let Some(filename) = field.file_name().map(|s: &str| s.to_string()) else {
            continue;
        };
        let content_type = field.content_type().map(|s: &str| s.to_string());
        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart field: {}", e)))?;

        uploads.push(FileUpload {
            filename,
            content_type,
            content,
        });
    }

    if uploads.is_empty() {
        return Err(AppError::InvalidInput("No files provided".to_string()));
    }

    Ok(uploads)
}

/// Register a batch of feed files as pending imports
#[utoipa::path(
    post,
    path = "/api/v0/dealers/{dealer_id}/imports",
    tag = "imports",
    params(
        ("dealer_id" = Uuid, Path, description = "Dealer ID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Batch registered", body = RegisterImportsResponse),
        (status = 400, description = "Invalid request or batch over the file cap", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, multipart))]
pub async fn register_imports(
    State(state): State<Arc<AppState>>,
    Path(dealer_id): Path<Uuid>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let uploads = collect_uploads(multipart).await?;
    let outcome = state.imports.register(dealer_id, uploads).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterImportsResponse {
            admitted: outcome.admitted,
            rejected: outcome.rejected,
        }),
    ))
}

/// Process every pending import for the dealer
#[utoipa::path(
    post,
    path = "/api/v0/dealers/{dealer_id}/imports/process",
    tag = "imports",
    params(
        ("dealer_id" = Uuid, Path, description = "Dealer ID")
    ),
    responses(
        (status = 200, description = "Pending imports processed", body = [ImportFile]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn process_imports(
    State(state): State<Arc<AppState>>,
    Path(dealer_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, HttpAppError> {
    let files = state.imports.process_pending(dealer_id).await?;

    Ok(Json(serde_json::json!({
        "files": files,
        "count": files.len()
    })))
}

/// List the dealer's imports
#[utoipa::path(
    get,
    path = "/api/v0/dealers/{dealer_id}/imports",
    tag = "imports",
    params(
        ("dealer_id" = Uuid, Path, description = "Dealer ID")
    ),
    responses(
        (status = 200, description = "Imports in registration order", body = [ImportFile]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn list_imports(
    State(state): State<Arc<AppState>>,
    Path(dealer_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, HttpAppError> {
    let files = state.imports.list(dealer_id).await;

    Ok(Json(serde_json::json!({
        "files": files,
        "count": files.len()
    })))
}

/// Get one import by ID
#[utoipa::path(
    get,
    path = "/api/v0/dealers/{dealer_id}/imports/{import_id}",
    tag = "imports",
    params(
        ("dealer_id" = Uuid, Path, description = "Dealer ID"),
        ("import_id" = Uuid, Path, description = "Import ID")
    ),
    responses(
        (status = 200, description = "Import found", body = ImportFile),
        (status = 404, description = "Import not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_import(
    State(state): State<Arc<AppState>>,
    Path((dealer_id, import_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ImportFile>, HttpAppError> {
    let file = state.imports.get(dealer_id, import_id).await?;
    Ok(Json(file))
}

/// Retry a failed import
#[utoipa::path(
    post,
    path = "/api/v0/dealers/{dealer_id}/imports/{import_id}/retry",
    tag = "imports",
    params(
        ("dealer_id" = Uuid, Path, description = "Dealer ID"),
        ("import_id" = Uuid, Path, description = "Import ID")
    ),
    responses(
        (status = 200, description = "Import reprocessed", body = ImportFile),
        (status = 404, description = "Import not found", body = ErrorResponse),
        (status = 409, description = "Import is not in the error state", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn retry_import(
    State(state): State<Arc<AppState>>,
    Path((dealer_id, import_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ImportFile>, HttpAppError> {
    tracing::info!(import_id = %import_id, "Retrying import");
    let file = state.imports.retry(dealer_id, import_id).await?;
    Ok(Json(file))
}

/// Remove a pending import
#[utoipa::path(
    delete,
    path = "/api/v0/dealers/{dealer_id}/imports/{import_id}",
    tag = "imports",
    params(
        ("dealer_id" = Uuid, Path, description = "Dealer ID"),
        ("import_id" = Uuid, Path, description = "Import ID")
    ),
    responses(
        (status = 204, description = "Import removed"),
        (status = 404, description = "Import not found", body = ErrorResponse),
        (status = 409, description = "Import already left the pending state", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn remove_import(
    State(state): State<Arc<AppState>>,
    Path((dealer_id, import_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.imports.remove(dealer_id, import_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
