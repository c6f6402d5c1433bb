use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::DbState;
use lotops_core::models::Dealer;
use lotops_core::AppError;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateDealerRequest {
    /// Display name for the dealership
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
}

/// Provision a dealer
#[utoipa::path(
    post,
    path = "/api/v0/dealers",
    tag = "dealers",
    request_body = CreateDealerRequest,
    responses(
        (status = 201, description = "Dealer created", body = Dealer),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(db, request))]
pub async fn create_dealer(
    State(db): State<DbState>,
    ValidatedJson(request): ValidatedJson<CreateDealerRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let dealer = db.dealer_repository.create(&request.name).await?;
    tracing::info!(dealer_id = %dealer.id, "Dealer created");

    Ok((StatusCode::CREATED, Json(dealer)))
}

/// Get a dealer by ID
#[utoipa::path(
    get,
    path = "/api/v0/dealers/{dealer_id}",
    tag = "dealers",
    params(
        ("dealer_id" = Uuid, Path, description = "Dealer ID")
    ),
    responses(
        (status = 200, description = "Dealer found", body = Dealer),
        (status = 404, description = "Dealer not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(db))]
pub async fn get_dealer(
    State(db): State<DbState>,
    Path(dealer_id): Path<Uuid>,
) -> Result<Json<Dealer>, HttpAppError> {
    let dealer = db.dealer_repository.get(dealer_id).await?.ok_or_else(|| {
        tracing::warn!(dealer_id = %dealer_id, "Dealer not found");
        AppError::NotFound("Dealer not found".to_string())
    })?;

    Ok(Json(dealer))
}
