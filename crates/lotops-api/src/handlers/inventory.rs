use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{ErrorResponse, HttpAppError};
use crate::state::StoreState;
use lotops_core::models::Vehicle;
use lotops_core::AppError;

#[derive(Deserialize, ToSchema, utoipa::IntoParams)]
pub struct InventoryQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
    /// Filter on the raw status column, e.g. "used" or "new"
    #[serde(default)]
    pub status: Option<String>,
}

fn default_limit() -> i64 {
    50
}

/// List the dealer's vehicles
#[utoipa::path(
    get,
    path = "/api/v0/dealers/{dealer_id}/inventory",
    tag = "inventory",
    params(
        ("dealer_id" = Uuid, Path, description = "Dealer ID"),
        InventoryQuery
    ),
    responses(
        (status = 200, description = "Vehicles ordered by stock number", body = [Vehicle]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(stores, query),
    fields(
        dealer_id = %dealer_id,
        limit = query.limit,
        offset = query.offset,
        status = ?query.status
    )
)]
pub async fn list_vehicles(
    State(stores): State<StoreState>,
    Path(dealer_id): Path<Uuid>,
    Query(query): Query<InventoryQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    // Out-of-range paging values are clamped, not rejected.
    let limit = query.limit.clamp(1, 100);
    let offset = query.offset.max(0);
    let status = query.status.as_deref();

    let vehicles = stores
        .inventory
        .list(dealer_id, status, limit, offset)
        .await?;
    let total = stores.inventory.count(dealer_id, status).await?;

    Ok(Json(serde_json::json!({
        "vehicles": vehicles,
        "count": vehicles.len(),
        "total": total
    })))
}

/// Get one vehicle by stock number
#[utoipa::path(
    get,
    path = "/api/v0/dealers/{dealer_id}/inventory/{stock_number}",
    tag = "inventory",
    params(
        ("dealer_id" = Uuid, Path, description = "Dealer ID"),
        ("stock_number" = String, Path, description = "Dealer-assigned stock number")
    ),
    responses(
        (status = 200, description = "Vehicle found", body = Vehicle),
        (status = 404, description = "Vehicle not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(stores))]
pub async fn get_vehicle(
    State(stores): State<StoreState>,
    Path((dealer_id, stock_number)): Path<(Uuid, String)>,
) -> Result<Json<Vehicle>, HttpAppError> {
    let vehicle = stores
        .inventory
        .get(dealer_id, &stock_number)
        .await?
        .ok_or_else(|| {
            tracing::warn!(stock_number = %stock_number, "Vehicle not found");
            AppError::NotFound(format!("Vehicle {} not found", stock_number))
        })?;

    Ok(Json(vehicle))
}
