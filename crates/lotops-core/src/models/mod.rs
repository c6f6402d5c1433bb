//! Data models for the application
//!
//! This module contains all data structures used throughout the application,
//! organized by domain. Each sub-module represents a specific feature area.

mod dealer;
mod import;
mod preferences;
mod shift;
mod vehicle;

// Re-export all models for convenient imports
pub use dealer::*;
pub use import::*;
pub use preferences::*;
pub use shift::*;
pub use vehicle::*;
