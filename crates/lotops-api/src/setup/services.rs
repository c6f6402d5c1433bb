//! Service initialization and application state setup

use std::sync::Arc;

use lotops_core::Config;
use lotops_db::{
    DealerRepository, InventoryRepository, InventoryStore, PreferenceRepository, PreferencesStore,
    ScheduleRepository, ScheduleStore,
};
use sqlx::PgPool;

use crate::services::{ImportService, ScheduleService};
use crate::state::{AppState, DbState, StoreState};

/// Initialize all services and repositories, returning the application state
pub fn initialize_services(config: &Config, pool: PgPool) -> Arc<AppState> {
    let inventory: Arc<dyn InventoryStore> = Arc::new(InventoryRepository::new(pool.clone()));
    let schedule_store: Arc<dyn ScheduleStore> = Arc::new(ScheduleRepository::new(pool.clone()));
    let preferences: Arc<dyn PreferencesStore> =
        Arc::new(PreferenceRepository::new(pool.clone()));

    build_state(config, pool, inventory, schedule_store, preferences)
}

/// Assemble the application state from explicit store handles. Tests use
/// this directly to run the full router over mock stores.
pub fn build_state(
    config: &Config,
    pool: PgPool,
    inventory: Arc<dyn InventoryStore>,
    schedule_store: Arc<dyn ScheduleStore>,
    preferences: Arc<dyn PreferencesStore>,
) -> Arc<AppState> {
    let imports = ImportService::new(config, inventory.clone());
    let schedule = ScheduleService::new(schedule_store);

    tracing::info!(
        max_files_per_batch = config.max_import_files_per_batch(),
        preview_rows = config.import_preview_rows(),
        retention_seconds = config.import_retention_seconds(),
        "Import service initialized"
    );

    Arc::new(AppState {
        db: DbState {
            pool: pool.clone(),
            dealer_repository: DealerRepository::new(pool),
        },
        stores: StoreState {
            inventory,
            preferences,
        },
        imports,
        schedule,
    })
}
