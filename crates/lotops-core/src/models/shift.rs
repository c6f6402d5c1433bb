use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Employee schedule shift. Invariant: `end_time` is strictly after
/// `start_time`; overlap against other shifts for the same employee and date
/// is checked by [`shift_overlaps`] before persistence.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ScheduleShift {
    pub id: Uuid,
    pub dealer_id: Uuid,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ScheduleShift {
    /// True when the candidate time range overlaps this shift's range.
    pub fn overlaps(&self, start: NaiveTime, end: NaiveTime) -> bool {
        shift_overlaps(start, end, self.start_time, self.end_time)
    }
}

/// Half-open overlap test between two time ranges on the same date.
/// A shift ending exactly when another starts does not conflict.
pub fn shift_overlaps(
    candidate_start: NaiveTime,
    candidate_end: NaiveTime,
    other_start: NaiveTime,
    other_end: NaiveTime,
) -> bool {
    candidate_start < other_end && candidate_end > other_start
}
