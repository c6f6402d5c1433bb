use async_trait::async_trait;
use chrono::NaiveDate;
use lotops_core::models::ScheduleShift;
use lotops_core::AppError;
use sqlx::PgPool;
use uuid::Uuid;

use super::stores::ScheduleStore;

const SHIFT_COLUMNS: &str = "id, dealer_id, employee_id, shift_date, start_time, end_time, \
     kiosk, break_minutes, break_paid, grace_early_minutes, grace_late_minutes, notes, \
     created_at, updated_at";

/// Postgres-backed shift schedule.
#[derive(Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn persistence_error(err: sqlx::Error) -> AppError {
    AppError::ScheduleStore(err.to_string())
}

#[async_trait]
impl ScheduleStore for ScheduleRepository {
    async fn create(&self, shift: &ScheduleShift) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO shifts (
                id, dealer_id, employee_id, shift_date, start_time, end_time,
                kiosk, break_minutes, break_paid, grace_early_minutes,
                grace_late_minutes, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(shift.id)
        .bind(shift.dealer_id)
        .bind(shift.employee_id)
        .bind(shift.shift_date)
        .bind(shift.start_time)
        .bind(shift.end_time)
        .bind(&shift.kiosk)
        .bind(shift.break_minutes)
        .bind(shift.break_paid)
        .bind(shift.grace_early_minutes)
        .bind(shift.grace_late_minutes)
        .bind(&shift.notes)
        .bind(shift.created_at)
        .bind(shift.updated_at)
        .execute(&self.pool)
        .await
        .map_err(persistence_error)?;

        Ok(())
    }

    async fn update(&self, shift: &ScheduleShift) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE shifts SET
                employee_id = $3,
                shift_date = $4,
                start_time = $5,
                end_time = $6,
                kiosk = $7,
                break_minutes = $8,
                break_paid = $9,
                grace_early_minutes = $10,
                grace_late_minutes = $11,
                notes = $12,
                updated_at = $13
            WHERE id = $1 AND dealer_id = $2
            "#,
        )
        .bind(shift.id)
        .bind(shift.dealer_id)
        .bind(shift.employee_id)
        .bind(shift.shift_date)
        .bind(shift.start_time)
        .bind(shift.end_time)
        .bind(&shift.kiosk)
        .bind(shift.break_minutes)
        .bind(shift.break_paid)
        .bind(shift.grace_early_minutes)
        .bind(shift.grace_late_minutes)
        .bind(&shift.notes)
        .bind(shift.updated_at)
        .execute(&self.pool)
        .await
        .map_err(persistence_error)?;

        Ok(())
    }

    async fn delete(&self, dealer_id: Uuid, shift_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM shifts WHERE id = $1 AND dealer_id = $2")
            .bind(shift_id)
            .bind(dealer_id)
            .execute(&self.pool)
            .await
            .map_err(persistence_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn get(
        &self,
        dealer_id: Uuid,
        shift_id: Uuid,
    ) -> Result<Option<ScheduleShift>, AppError> {
        let shift = sqlx::query_as::<_, ScheduleShift>(&format!(
            r#"
            SELECT {SHIFT_COLUMNS}
            FROM shifts
            WHERE id = $1 AND dealer_id = $2
            "#
        ))
        .bind(shift_id)
        .bind(dealer_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(shift)
    }

    async fn list(
        &self,
        dealer_id: Uuid,
        employee_id: Option<Uuid>,
        date: Option<NaiveDate>,
    ) -> Result<Vec<ScheduleShift>, AppError> {
        let shifts = sqlx::query_as::<_, ScheduleShift>(&format!(
            r#"
            SELECT {SHIFT_COLUMNS}
            FROM shifts
            WHERE dealer_id = $1
              AND ($2::uuid IS NULL OR employee_id = $2)
              AND ($3::date IS NULL OR shift_date = $3)
            ORDER BY shift_date, start_time
            "#
        ))
        .bind(dealer_id)
        .bind(employee_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(shifts)
    }

    async fn shifts_for_employee_date(
        &self,
        dealer_id: Uuid,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleShift>, AppError> {
        let shifts = sqlx::query_as::<_, ScheduleShift>(&format!(
            r#"
            SELECT {SHIFT_COLUMNS}
            FROM shifts
            WHERE dealer_id = $1 AND employee_id = $2 AND shift_date = $3
            ORDER BY start_time
            "#
        ))
        .bind(dealer_id)
        .bind(employee_id)
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(shifts)
    }
}
