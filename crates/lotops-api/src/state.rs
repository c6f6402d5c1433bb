//! Shared router state.
//!
//! Handlers that touch a single concern extract the matching sub-state
//! through `FromRef`; the rest take the whole `Arc<AppState>`.

use crate::services::{ImportService, ScheduleService};
use lotops_db::{DealerRepository, InventoryStore, PreferencesStore};
use sqlx::PgPool;
use std::sync::Arc;

/// Connection pool plus the dealer provisioning repository.
#[derive(Clone)]
pub struct DbState {
    pub pool: PgPool,
    pub dealer_repository: DealerRepository,
}

/// Trait-object handles to the dealer-scoped stores. Tests swap in mocks here.
#[derive(Clone)]
pub struct StoreState {
    pub inventory: Arc<dyn InventoryStore>,
    pub preferences: Arc<dyn PreferencesStore>,
}

/// Everything the router carries. Built once in `setup::services`.
#[derive(Clone)]
pub struct AppState {
    pub db: DbState,
    pub stores: StoreState,
    pub imports: ImportService,
    pub schedule: ScheduleService,
}

impl axum::extract::FromRef<Arc<AppState>> for DbState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}

impl axum::extract::FromRef<Arc<AppState>> for StoreState {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.stores.clone()
    }
}

fn _assert_state_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AppState>();
}
