//! Mock store implementations for testing
//!
//! These mocks let the orchestrator and schedule service be exercised
//! without a database. The inventory mock mirrors the real upsert
//! semantics, including the inserted/updated split and an injectable
//! submission failure.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use lotops_core::models::{DealerPreference, ScheduleShift, Vehicle, VehicleRecord};
use lotops_core::AppError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use crate::db::stores::{BatchOutcome, InventoryStore, PreferencesStore, ScheduleStore};

/// Mock inventory store keyed like the real table.
#[derive(Clone, Default)]
pub struct MockInventoryStore {
    vehicles: Arc<Mutex<HashMap<(Uuid, String), Vehicle>>>,
    fail_with: Arc<Mutex<Option<String>>>,
}

impl MockInventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent submission fail with this message.
    pub fn fail_with(&self, message: &str) {
        *self.fail_with.lock().unwrap() = Some(message.to_string());
    }

    pub fn clear_failure(&self) {
        *self.fail_with.lock().unwrap() = None;
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicles.lock().unwrap().len()
    }
}

fn vehicle_from(dealer_id: Uuid, record: &VehicleRecord) -> Vehicle {
    let now = Utc::now();
    Vehicle {
        id: Uuid::new_v4(),
        dealer_id,
        stock_number: record.stock_number.clone(),
        vin: record.vin.clone(),
        make: record.make.clone(),
        model: record.model.clone(),
        trim: record.trim.clone(),
        year: record.year,
        mileage: record.mileage,
        price: record.price,
        msrp: record.msrp,
        status: record.status.clone(),
        age_days: record.age_days,
        location: record.location.clone(),
        certified: record.certified,
        leads: record.leads,
        market_day_supply: record.market_day_supply,
        created_at: now,
        updated_at: now,
    }
}

#[async_trait]
impl InventoryStore for MockInventoryStore {
    async fn upsert_batch(
        &self,
        dealer_id: Uuid,
        records: &[VehicleRecord],
    ) -> Result<BatchOutcome, AppError> {
        if let Some(message) = self.fail_with.lock().unwrap().clone() {
            return Err(AppError::InventoryStore(message));
        }

        let mut vehicles = self.vehicles.lock().unwrap();
        let mut outcome = BatchOutcome::default();

        for record in records {
            let key = (dealer_id, record.stock_number.clone());
            match vehicles.get_mut(&key) {
                Some(existing) => {
                    let created_at = existing.created_at;
                    let id = existing.id;
                    *existing = vehicle_from(dealer_id, record);
                    existing.id = id;
                    existing.created_at = created_at;
                    outcome.updated += 1;
                }
                None => {
                    vehicles.insert(key, vehicle_from(dealer_id, record));
                    outcome.inserted += 1;
                }
            }
        }

        Ok(outcome)
    }

    async fn list(
        &self,
        dealer_id: Uuid,
        status: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = self.vehicles.lock().unwrap();
        let mut matched: Vec<Vehicle> = vehicles
            .values()
            .filter(|vehicle| vehicle.dealer_id == dealer_id)
            .filter(|vehicle| status.is_none() || vehicle.status.as_deref() == status)
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.stock_number.cmp(&b.stock_number));

        Ok(matched
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self, dealer_id: Uuid, status: Option<&str>) -> Result<i64, AppError> {
        let vehicles = self.vehicles.lock().unwrap();
        let total = vehicles
            .values()
            .filter(|vehicle| vehicle.dealer_id == dealer_id)
            .filter(|vehicle| status.is_none() || vehicle.status.as_deref() == status)
            .count();

        Ok(total as i64)
    }

    async fn get(
        &self,
        dealer_id: Uuid,
        stock_number: &str,
    ) -> Result<Option<Vehicle>, AppError> {
        let vehicles = self.vehicles.lock().unwrap();
        Ok(vehicles.get(&(dealer_id, stock_number.to_string())).cloned())
    }
}

/// Mock schedule store backed by a plain map.
#[derive(Clone, Default)]
pub struct MockScheduleStore {
    shifts: Arc<Mutex<HashMap<(Uuid, Uuid), ScheduleShift>>>,
}

impl MockScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shift(&self, shift: ScheduleShift) {
        self.shifts
            .lock()
            .unwrap()
            .insert((shift.dealer_id, shift.id), shift);
    }

    pub fn shift_count(&self) -> usize {
        self.shifts.lock().unwrap().len()
    }
}

#[async_trait]
impl ScheduleStore for MockScheduleStore {
    async fn create(&self, shift: &ScheduleShift) -> Result<(), AppError> {
        self.add_shift(shift.clone());
        Ok(())
    }

    async fn update(&self, shift: &ScheduleShift) -> Result<(), AppError> {
        let mut shifts = self.shifts.lock().unwrap();
        if let Some(existing) = shifts.get_mut(&(shift.dealer_id, shift.id)) {
            *existing = shift.clone();
        }
        Ok(())
    }

    async fn delete(&self, dealer_id: Uuid, shift_id: Uuid) -> Result<bool, AppError> {
        let removed = self
            .shifts
            .lock()
            .unwrap()
            .remove(&(dealer_id, shift_id))
            .is_some();
        Ok(removed)
    }

    async fn get(
        &self,
        dealer_id: Uuid,
        shift_id: Uuid,
    ) -> Result<Option<ScheduleShift>, AppError> {
        let shifts = self.shifts.lock().unwrap();
        Ok(shifts.get(&(dealer_id, shift_id)).cloned())
    }

    async fn list(
        &self,
        dealer_id: Uuid,
        employee_id: Option<Uuid>,
        date: Option<NaiveDate>,
    ) -> Result<Vec<ScheduleShift>, AppError> {
        let shifts = self.shifts.lock().unwrap();
        let mut matched: Vec<ScheduleShift> = shifts
            .values()
            .filter(|shift| shift.dealer_id == dealer_id)
            .filter(|shift| employee_id.is_none() || Some(shift.employee_id) == employee_id)
            .filter(|shift| date.is_none() || Some(shift.shift_date) == date)
            .cloned()
            .collect();
        matched.sort_by_key(|shift| (shift.shift_date, shift.start_time));

        Ok(matched)
    }

    async fn shifts_for_employee_date(
        &self,
        dealer_id: Uuid,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<ScheduleShift>, AppError> {
        let shifts = self.shifts.lock().unwrap();
        let mut matched: Vec<ScheduleShift> = shifts
            .values()
            .filter(|shift| {
                shift.dealer_id == dealer_id
                    && shift.employee_id == employee_id
                    && shift.shift_date == date
            })
            .cloned()
            .collect();
        matched.sort_by_key(|shift| shift.start_time);

        Ok(matched)
    }
}

/// Mock preferences store.
#[derive(Clone, Default)]
pub struct MockPreferencesStore {
    preferences: Arc<Mutex<HashMap<(Uuid, String), DealerPreference>>>,
}

impl MockPreferencesStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferencesStore for MockPreferencesStore {
    async fn get(&self, dealer_id: Uuid, key: &str) -> Result<Option<DealerPreference>, AppError> {
        let preferences = self.preferences.lock().unwrap();
        Ok(preferences.get(&(dealer_id, key.to_string())).cloned())
    }

    async fn set(
        &self,
        dealer_id: Uuid,
        key: &str,
        value: &str,
    ) -> Result<DealerPreference, AppError> {
        let preference = DealerPreference {
            dealer_id,
            pref_key: key.to_string(),
            pref_value: value.to_string(),
            updated_at: Utc::now(),
        };
        self.preferences
            .lock()
            .unwrap()
            .insert((dealer_id, key.to_string()), preference.clone());

        Ok(preference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn record(stock: &str, price: Option<Decimal>) -> VehicleRecord {
        VehicleRecord {
            stock_number: stock.to_string(),
            vin: None,
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            trim: None,
            year: Some(2022),
            mileage: None,
            price,
            msrp: None,
            status: Some("used".to_string()),
            age_days: None,
            location: None,
            certified: None,
            leads: None,
            market_day_supply: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_splits_inserted_and_updated() {
        let store = MockInventoryStore::new();
        let dealer_id = Uuid::new_v4();

        let outcome = store
            .upsert_batch(dealer_id, &[record("A1", None), record("A2", None)])
            .await
            .unwrap();
        assert_eq!(outcome.inserted, 2);
        assert_eq!(outcome.updated, 0);

        let outcome = store
            .upsert_batch(
                dealer_id,
                &[record("A1", Some(Decimal::new(19_995, 0))), record("A3", None)],
            )
            .await
            .unwrap();
        assert_eq!(outcome.inserted, 1);
        assert_eq!(outcome.updated, 1);
        assert_eq!(store.vehicle_count(), 3);

        let refreshed = store.get(dealer_id, "A1").await.unwrap().unwrap();
        assert_eq!(refreshed.price, Some(Decimal::new(19_995, 0)));
    }

    #[tokio::test]
    async fn test_injected_failure_surfaces_message() {
        let store = MockInventoryStore::new();
        store.fail_with("inventory backend offline");

        let err = store
            .upsert_batch(Uuid::new_v4(), &[record("A1", None)])
            .await
            .unwrap_err();
        match err {
            AppError::InventoryStore(message) => {
                assert_eq!(message, "inventory backend offline")
            }
            other => panic!("unexpected error: {:?}", other),
        }

        store.clear_failure();
        assert!(store
            .upsert_batch(Uuid::new_v4(), &[record("A1", None)])
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_list_respects_status_filter_and_paging() {
        let store = MockInventoryStore::new();
        let dealer_id = Uuid::new_v4();
        let mut records = vec![record("A1", None), record("A2", None), record("A3", None)];
        records[2].status = Some("new".to_string());
        store.upsert_batch(dealer_id, &records).await.unwrap();

        let used = store.list(dealer_id, Some("used"), 10, 0).await.unwrap();
        assert_eq!(used.len(), 2);
        assert_eq!(store.count(dealer_id, Some("used")).await.unwrap(), 2);

        let page = store.list(dealer_id, None, 1, 1).await.unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].stock_number, "A2");
    }

    #[tokio::test]
    async fn test_schedule_store_scopes_employee_and_date() {
        let store = MockScheduleStore::new();
        let dealer_id = Uuid::new_v4();
        let employee = Uuid::new_v4();
        let other = Uuid::new_v4();
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();

        let shift = ScheduleShift {
            id: Uuid::new_v4(),
            dealer_id,
            employee_id: employee,
            shift_date: date,
            start_time: chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: chrono::NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
            kiosk: None,
            break_minutes: 30,
            break_paid: false,
            grace_early_minutes: 5,
            grace_late_minutes: 5,
            notes: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        store.add_shift(shift.clone());

        let mut second = shift.clone();
        second.id = Uuid::new_v4();
        second.employee_id = other;
        store.add_shift(second);

        let matched = store
            .shifts_for_employee_date(dealer_id, employee, date)
            .await
            .unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, shift.id);

        let all = store.list(dealer_id, None, Some(date)).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_preferences_round_trip() {
        let store = MockPreferencesStore::new();
        let dealer_id = Uuid::new_v4();

        assert!(store.get(dealer_id, "inventory_tab").await.unwrap().is_none());

        store.set(dealer_id, "inventory_tab", "aged").await.unwrap();
        let preference = store.get(dealer_id, "inventory_tab").await.unwrap().unwrap();
        assert_eq!(preference.pref_value, "aged");

        store.set(dealer_id, "inventory_tab", "all").await.unwrap();
        let preference = store.get(dealer_id, "inventory_tab").await.unwrap().unwrap();
        assert_eq!(preference.pref_value, "all");
    }
}
