//! LotOps API library surface.
//!
//! The binary lives in `main.rs`; integration tests link against this crate
//! to stand up the router without a process.

mod api_doc;
mod handlers;
mod telemetry;

pub mod constants;
pub mod error;
pub mod services;
pub mod setup;
pub mod state;

pub use error::ErrorResponse;
pub use services::{ImportService, ScheduleService};
