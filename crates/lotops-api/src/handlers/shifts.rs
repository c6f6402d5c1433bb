use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::services::schedule::ShiftDraft;
use crate::state::AppState;
use lotops_core::models::ScheduleShift;
use lotops_core::AppError;

/// Shift payload for create and full-replace update.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ShiftRequest {
    pub employee_id: Uuid,
    pub shift_date: NaiveDate,
    /// Start of the shift, e.g. "09:00:00"
    pub start_time: NaiveTime,
    /// End of the shift, must be after `start_time`
    pub end_time: NaiveTime,
    /// Kiosk or station the employee clocks in at
    #[serde(default)]
    #[validate(length(max = 100, message = "Kiosk must be at most 100 characters"))]
    pub kiosk: Option<String>,
    /// Unpaid or paid break length in minutes
    #[serde(default)]
    #[validate(range(min = 0, max = 480, message = "Break must be between 0 and 480 minutes"))]
    pub break_minutes: i32,
    #[serde(default)]
    pub break_paid: bool,
    /// Minutes the employee may clock in before the shift starts
    #[serde(default)]
    #[validate(range(min = 0, max = 120, message = "Grace must be between 0 and 120 minutes"))]
    pub grace_early_minutes: i32,
    /// Minutes the employee may clock in after the shift starts
    #[serde(default)]
    #[validate(range(min = 0, max = 120, message = "Grace must be between 0 and 120 minutes"))]
    pub grace_late_minutes: i32,
    #[serde(default)]
    #[validate(length(max = 1000, message = "Notes must be at most 1000 characters"))]
    pub notes: Option<String>,
}

impl ShiftRequest {
    fn into_draft(self) -> ShiftDraft {
        ShiftDraft {
            employee_id: self.employee_id,
            shift_date: self.shift_date,
            start_time: self.start_time,
            end_time: self.end_time,
            kiosk: self.kiosk,
            break_minutes: self.break_minutes,
            break_paid: self.break_paid,
            grace_early_minutes: self.grace_early_minutes,
            grace_late_minutes: self.grace_late_minutes,
            notes: self.notes,
        }
    }
}

#[derive(Deserialize, ToSchema, utoipa::IntoParams)]
pub struct ShiftListQuery {
    /// Restrict to one employee
    #[serde(default)]
    pub employee_id: Option<Uuid>,
    /// Restrict to one date
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConflictCheckRequest {
    pub employee_id: Uuid,
    pub shift_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Shift to ignore, for previewing an edit of an existing shift
    #[serde(default)]
    pub exclude_shift_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConflictCheckResponse {
    pub conflict: bool,
}

/// Create a shift
#[utoipa::path(
    post,
    path = "/api/v0/dealers/{dealer_id}/shifts",
    tag = "schedule",
    params(
        ("dealer_id" = Uuid, Path, description = "Dealer ID")
    ),
    request_body = ShiftRequest,
    responses(
        (status = 201, description = "Shift created", body = ScheduleShift),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 409, description = "Shift overlaps an existing shift", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request))]
pub async fn create_shift(
    State(state): State<Arc<AppState>>,
    Path(dealer_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<ShiftRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let shift = state
        .schedule
        .create(dealer_id, request.into_draft())
        .await?;

    Ok((StatusCode::CREATED, Json(shift)))
}

/// Replace a shift
#[utoipa::path(
    put,
    path = "/api/v0/dealers/{dealer_id}/shifts/{shift_id}",
    tag = "schedule",
    params(
        ("dealer_id" = Uuid, Path, description = "Dealer ID"),
        ("shift_id" = Uuid, Path, description = "Shift ID")
    ),
    request_body = ShiftRequest,
    responses(
        (status = 200, description = "Shift updated", body = ScheduleShift),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 404, description = "Shift not found", body = ErrorResponse),
        (status = 409, description = "Shift overlaps an existing shift", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request))]
pub async fn update_shift(
    State(state): State<Arc<AppState>>,
    Path((dealer_id, shift_id)): Path<(Uuid, Uuid)>,
    ValidatedJson(request): ValidatedJson<ShiftRequest>,
) -> Result<Json<ScheduleShift>, HttpAppError> {
    request.validate().map_err(AppError::from)?;

    let shift = state
        .schedule
        .update(dealer_id, shift_id, request.into_draft())
        .await?;

    Ok(Json(shift))
}

/// Delete a shift
#[utoipa::path(
    delete,
    path = "/api/v0/dealers/{dealer_id}/shifts/{shift_id}",
    tag = "schedule",
    params(
        ("dealer_id" = Uuid, Path, description = "Dealer ID"),
        ("shift_id" = Uuid, Path, description = "Shift ID")
    ),
    responses(
        (status = 204, description = "Shift deleted"),
        (status = 404, description = "Shift not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_shift(
    State(state): State<Arc<AppState>>,
    Path((dealer_id, shift_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.schedule.delete(dealer_id, shift_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Get one shift by ID
#[utoipa::path(
    get,
    path = "/api/v0/dealers/{dealer_id}/shifts/{shift_id}",
    tag = "schedule",
    params(
        ("dealer_id" = Uuid, Path, description = "Dealer ID"),
        ("shift_id" = Uuid, Path, description = "Shift ID")
    ),
    responses(
        (status = 200, description = "Shift found", body = ScheduleShift),
        (status = 404, description = "Shift not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_shift(
    State(state): State<Arc<AppState>>,
    Path((dealer_id, shift_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ScheduleShift>, HttpAppError> {
    let shift = state.schedule.get(dealer_id, shift_id).await?;
    Ok(Json(shift))
}

/// List shifts with optional employee and date filters
#[utoipa::path(
    get,
    path = "/api/v0/dealers/{dealer_id}/shifts",
    tag = "schedule",
    params(
        ("dealer_id" = Uuid, Path, description = "Dealer ID"),
        ShiftListQuery
    ),
    responses(
        (status = 200, description = "Shifts ordered by date and start time", body = [ScheduleShift]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(
    skip(state, query),
    fields(
        dealer_id = %dealer_id,
        employee_id = ?query.employee_id,
        date = ?query.date
    )
)]
pub async fn list_shifts(
    State(state): State<Arc<AppState>>,
    Path(dealer_id): Path<Uuid>,
    Query(query): Query<ShiftListQuery>,
) -> Result<Json<serde_json::Value>, HttpAppError> {
    let shifts = state
        .schedule
        .list(dealer_id, query.employee_id, query.date)
        .await?;

    Ok(Json(serde_json::json!({
        "shifts": shifts,
        "count": shifts.len()
    })))
}

/// Preview whether a time range would conflict, without writing anything
#[utoipa::path(
    post,
    path = "/api/v0/dealers/{dealer_id}/shifts/conflicts",
    tag = "schedule",
    params(
        ("dealer_id" = Uuid, Path, description = "Dealer ID")
    ),
    request_body = ConflictCheckRequest,
    responses(
        (status = 200, description = "Conflict check result", body = ConflictCheckResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[tracing::instrument(skip(state, request))]
pub async fn check_conflicts(
    State(state): State<Arc<AppState>>,
    Path(dealer_id): Path<Uuid>,
    ValidatedJson(request): ValidatedJson<ConflictCheckRequest>,
) -> Result<Json<ConflictCheckResponse>, HttpAppError> {
    let conflict = state
        .schedule
        .has_conflict(
            dealer_id,
            request.employee_id,
            request.shift_date,
            request.start_time,
            request.end_time,
            request.exclude_shift_id,
        )
        .await?;

    Ok(Json(ConflictCheckResponse { conflict }))
}
