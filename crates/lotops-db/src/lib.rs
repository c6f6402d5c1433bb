//! Postgres persistence for dealers, vehicle inventory, shifts and
//! operator preferences, behind the narrow store traits the service
//! layer depends on.

pub mod db;
pub mod test_helpers;

pub use db::{
    BatchOutcome, DealerRepository, InventoryRepository, InventoryStore, PreferenceRepository,
    PreferencesStore, ScheduleRepository, ScheduleStore,
};
