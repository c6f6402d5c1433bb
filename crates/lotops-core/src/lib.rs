//! Lotops Core Library
//!
//! This crate provides core domain models, error types, configuration, and VIN
//! analysis that are shared across all lotops components.

pub mod config;
pub mod error;
pub mod models;
pub mod vin;

// Re-export commonly used types
pub use config::{BaseConfig, Config, PlatformConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use vin::{analyze_vin, normalize_vin, VinAnalysis, VinError};
