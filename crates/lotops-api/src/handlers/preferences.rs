use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::StoreState;
use lotops_core::models::DealerPreference;
use lotops_core::AppError;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SetPreferenceRequest {
    /// New value for the preference key
    #[validate(length(max = 4096, message = "Value must be at most 4096 characters"))]
    pub value: String,
}

/// Get one preference value
///
/// Unset keys return 404; clients fall back to their own defaults.
#[utoipa::path(
    get,
    path = "/api/v0/dealers/{dealer_id}/preferences/{key}",
    tag = "preferences",
    params(
        ("dealer_id" = Uuid, Path, description = "Dealer ID"),
        ("key" = String, Path, description = "Preference key, e.g. \"inventory.default_view\"")
    ),
    responses(
        (status = 200, description = "Preference found", body = DealerPreference),
        (status = 404, description = "Preference not set", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(stores))]
pub async fn get_preference(
    State(stores): State<StoreState>,
    Path((dealer_id, key)): Path<(Uuid, String)>,
) -> Result<Json<DealerPreference>, HttpAppError> {
    let preference = stores
        .preferences
        .get(dealer_id, &key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Preference {} not set", key)))?;

    Ok(Json(preference))
}

/// Set one preference value
#[utoipa::path(
    put,
    path = "/api/v0/dealers/{dealer_id}/preferences/{key}",
    tag = "preferences",
    params(
        ("dealer_id" = Uuid, Path, description = "Dealer ID"),
        ("key" = String, Path, description = "Preference key")
    ),
    request_body = SetPreferenceRequest,
    responses(
        (status = 200, description = "Preference stored", body = DealerPreference),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(stores, request))]
pub async fn put_preference(
    State(stores): State<StoreState>,
    Path((dealer_id, key)): Path<(Uuid, String)>,
    ValidatedJson(request): ValidatedJson<SetPreferenceRequest>,
) -> Result<Json<DealerPreference>, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let preference = stores
        .preferences
        .set(dealer_id, &key, &request.value)
        .await?;
    tracing::info!(dealer_id = %dealer_id, key = %key, "Preference stored");

    Ok(Json(preference))
}
