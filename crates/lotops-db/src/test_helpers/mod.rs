//! In-memory store doubles for tests that run without Postgres.

pub mod mock_stores;

pub use mock_stores::{MockInventoryStore, MockPreferencesStore, MockScheduleStore};
