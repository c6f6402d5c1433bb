//! Database repositories for the data access layer
//!
//! One repository per aggregate, each a `Clone` handle over the shared
//! pool. Services and handlers talk to the traits in `stores`; the
//! concrete types here are wired in at setup time.

pub mod dealers;
pub mod inventory;
pub mod preferences;
pub mod schedule;
pub mod stores;

pub use dealers::DealerRepository;
pub use inventory::InventoryRepository;
pub use preferences::PreferenceRepository;
pub use schedule::ScheduleRepository;
pub use stores::{BatchOutcome, InventoryStore, PreferencesStore, ScheduleStore};
