//! Schedule service
//!
//! Validates shift time ranges and enforces the no-overlap rule per
//! employee and date before delegating to the schedule store.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use lotops_core::models::ScheduleShift;
use lotops_core::AppError;
use lotops_db::ScheduleStore;

/// Fields a caller supplies when creating or replacing a shift. The service
/// owns id and timestamps.
#[derive(Debug, Clone)]
pub struct ShiftDraft {
    pub employee_id: Uuid,
    pub shift_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub kiosk: Option<String>,
    pub break_minutes: i32,
    pub break_paid: bool,
    pub grace_early_minutes: i32,
    pub grace_late_minutes: i32,
    pub notes: Option<String>,
}

#[derive(Clone)]
pub struct ScheduleService {
    store: Arc<dyn ScheduleStore>,
}

impl ScheduleService {
    pub fn new(store: Arc<dyn ScheduleStore>) -> Self {
        Self { store }
    }

    /// Create a shift after range and overlap checks.
    pub async fn create(
        &self,
        dealer_id: Uuid,
        draft: ShiftDraft,
    ) -> Result<ScheduleShift, AppError> {
        validate_time_range(draft.start_time, draft.end_time)?;

        if self
            .has_conflict(
                dealer_id,
                draft.employee_id,
                draft.shift_date,
                draft.start_time,
                draft.end_time,
                None,
            )
            .await?
        {
            return Err(AppError::ScheduleConflict(
                "Shift overlaps an existing shift for this employee".to_string(),
            ));
        }

        let now = Utc::now();
        let shift = ScheduleShift {
            id: Uuid::new_v4(),
            dealer_id,
            employee_id: draft.employee_id,
            shift_date: draft.shift_date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            kiosk: draft.kiosk,
            break_minutes: draft.break_minutes,
            break_paid: draft.break_paid,
            grace_early_minutes: draft.grace_early_minutes,
            grace_late_minutes: draft.grace_late_minutes,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        };

        self.store.create(&shift).await?;
        tracing::info!(
            shift_id = %shift.id,
            employee_id = %shift.employee_id,
            shift_date = %shift.shift_date,
            "shift created"
        );
        Ok(shift)
    }

    /// Replace a shift. The edited shift is excluded from the overlap check
    /// so shrinking or nudging a shift within its own slot always passes.
    pub async fn update(
        &self,
        dealer_id: Uuid,
        shift_id: Uuid,
        draft: ShiftDraft,
    ) -> Result<ScheduleShift, AppError> {
        let existing = self
            .store
            .get(dealer_id, shift_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Shift {} not found", shift_id)))?;

        validate_time_range(draft.start_time, draft.end_time)?;

        if self
            .has_conflict(
                dealer_id,
                draft.employee_id,
                draft.shift_date,
                draft.start_time,
                draft.end_time,
                Some(shift_id),
            )
            .await?
        {
            return Err(AppError::ScheduleConflict(
                "Shift overlaps an existing shift for this employee".to_string(),
            ));
        }

        let shift = ScheduleShift {
            id: existing.id,
            dealer_id,
            employee_id: draft.employee_id,
            shift_date: draft.shift_date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            kiosk: draft.kiosk,
            break_minutes: draft.break_minutes,
            break_paid: draft.break_paid,
            grace_early_minutes: draft.grace_early_minutes,
            grace_late_minutes: draft.grace_late_minutes,
            notes: draft.notes,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };

        self.store.update(&shift).await?;
        tracing::info!(shift_id = %shift.id, "shift updated");
        Ok(shift)
    }

    pub async fn delete(&self, dealer_id: Uuid, shift_id: Uuid) -> Result<(), AppError> {
        let deleted = self.store.delete(dealer_id, shift_id).await?;
        if !deleted {
            return Err(AppError::NotFound(format!("Shift {} not found", shift_id)));
        }
        tracing::info!(shift_id = %shift_id, "shift deleted");
        Ok(())
    }

    pub async fn get(&self, dealer_id: Uuid, shift_id: Uuid) -> Result<ScheduleShift, AppError> {
        self.store
            .get(dealer_id, shift_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Shift {} not found", shift_id)))
    }

    pub async fn list(
        &self,
        dealer_id: Uuid,
        employee_id: Option<Uuid>,
        date: Option<NaiveDate>,
    ) -> Result<Vec<ScheduleShift>, AppError> {
        self.store.list(dealer_id, employee_id, date).await
    }

    /// True when the candidate range overlaps any of the employee's shifts
    /// on that date, ignoring `exclude` (the shift being edited).
    pub async fn has_conflict(
        &self,
        dealer_id: Uuid,
        employee_id: Uuid,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
        exclude: Option<Uuid>,
    ) -> Result<bool, AppError> {
        let shifts = self
            .store
            .shifts_for_employee_date(dealer_id, employee_id, date)
            .await?;

        Ok(shifts
            .iter()
            .filter(|shift| exclude != Some(shift.id))
            .any(|shift| shift.overlaps(start_time, end_time)))
    }
}

fn validate_time_range(start: NaiveTime, end: NaiveTime) -> Result<(), AppError> {
    if end <= start {
        return Err(AppError::InvalidInput(
            "end_time must be after start_time".to_string(),
        ));
    }
    Ok(())
}
