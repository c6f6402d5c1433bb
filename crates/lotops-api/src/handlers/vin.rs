use axum::{extract::Path, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::HttpAppError;
use lotops_core::{analyze_vin, normalize_vin, VinAnalysis};

#[derive(Debug, Serialize, ToSchema)]
pub struct VinCheckResponse {
    /// Normalized VIN (trimmed, uppercased)
    pub vin: String,
    pub valid: bool,
    /// Why the VIN failed, when it did
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<VinAnalysis>,
}

/// Analyze a VIN
///
/// Always returns 200; a malformed VIN is a result, not an error.
#[utoipa::path(
    get,
    path = "/api/v0/vin/{vin}",
    tag = "vin",
    params(
        ("vin" = String, Path, description = "Vehicle identification number")
    ),
    responses(
        (status = 200, description = "Analysis result", body = VinCheckResponse)
    )
)]
#[tracing::instrument]
pub async fn check_vin(Path(vin): Path<String>) -> Result<Json<VinCheckResponse>, HttpAppError> {
    let normalized = normalize_vin(&vin);

    let response = match analyze_vin(&vin) {
        Ok(analysis) => VinCheckResponse {
            vin: normalized,
            valid: true,
            reason: None,
            analysis: Some(analysis),
        },
        Err(err) => VinCheckResponse {
            vin: normalized,
            valid: false,
            reason: Some(err.to_string()),
            analysis: None,
        },
    };

    Ok(Json(response))
}
