//! Narrow store interfaces between the service layer and persistence.
//!
//! The ingestion orchestrator and schedule service depend on these traits
//! only; `db` holds the Postgres implementations and `test_helpers` the
//! in-memory doubles.

use async_trait::async_trait;
use chrono::NaiveDate;
use lotops_core::models::{DealerPreference, ScheduleShift, Vehicle, VehicleRecord};
use lotops_core::AppError;
use uuid::Uuid;

/// Counts reported back for one batch submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub inserted: u64,
    pub updated: u64,
}

/// Tabular vehicle store the upload orchestrator submits batches to.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Upsert validated records keyed on `(dealer_id, stock_number)` in a
    /// single transaction, reporting how many rows were new versus
    /// refreshed. Submission failures carry the backend's message so the
    /// operator sees it verbatim next to the retry affordance.
    async fn upsert_batch(
        &self,
        dealer_id: Uuid,
        records: &[VehicleRecord],
    ) -> Result<BatchOutcome, AppError>;

    async fn list(
        &self,
        dealer_id: Uuid,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Vehicle>, AppError>;

    async fn count(&self, dealer_id: Uuid, status: Option<&str>) -> Result<i64, AppError>;

    async fn get(&self, dealer_id: Uuid, stock_number: &str)
        -> Result<Option<Vehicle>, AppError>;
}

/// Shift persistence plus the read side the conflict detector queries.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    async fn create(&self, shift: &ScheduleShift) -> Result<(), AppError>;

    async fn update(&self, shift: &ScheduleShift) -> Result<(), AppError>;

    /// Returns false when no shift matched.
    async fn delete(&self, dealer_id: Uuid, shift_id: Uuid) -> Result<bool, AppError>;

    async fn get(&self, dealer_id: Uuid, shift_id: Uuid)
        -> Result<Option<ScheduleShift>, AppError>;

    async fn list(
        &self,
        dealer_id: Uuid,
        employee_id: Option<Uuid>,
        date: Option<NaiveDate>,
    ) -> Result<Vec<ScheduleShift>, AppError>;

    /// Stored shifts a candidate is compared against for conflicts.
    async fn shifts_for_employee_date(
        &self,
        dealer_id: Uuid,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleShift>, AppError>;
}

/// Dealer-scoped key/value operator preferences.
#[async_trait]
pub trait PreferencesStore: Send + Sync {
    async fn get(&self, dealer_id: Uuid, key: &str) -> Result<Option<DealerPreference>, AppError>;

    async fn set(
        &self,
        dealer_id: Uuid,
        key: &str,
        value: &str,
    ) -> Result<DealerPreference, AppError>;
}
