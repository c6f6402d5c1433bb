//! Startup configuration checks.
//!
//! Fail fast on settings that would be unsafe or unusable once the
//! server is listening.

use anyhow::{bail, Result};
use lotops_core::Config;

/// Run the core config checks, then the HTTP-facing ones.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() {
        // Error-body redaction keys off ENVIRONMENT/APP_ENV directly, so a
        // production config without the process-level flag leaks detail.
        let flag_set = std::env::var("ENVIRONMENT")
            .or_else(|_| std::env::var("APP_ENV"))
            .is_ok();
        if !flag_set {
            tracing::warn!(
                "Production config without ENVIRONMENT or APP_ENV set; error responses may expose internal detail"
            );
        }

        if config.cors_origins().iter().any(|origin| origin == "*") {
            bail!(
                "CORS_ORIGINS allows every origin in production; list the dashboard origins explicitly"
            );
        }
    }

    tracing::info!("Configuration validated");
    Ok(())
}
