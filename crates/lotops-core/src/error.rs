//! Unified error type for the platform.
//!
//! Every fallible operation surfaces an [`AppError`]; the HTTP layer renders
//! it through the [`ErrorMetadata`] trait, which fixes status code, wire
//! code, retryability and log level per variant in one place.
//!
//! The `Database` variant wraps `sqlx::Error` only when the `sqlx` feature is
//! on. Clients built with `default-features = false` get a plain string
//! variant instead and never link the database stack.

use std::io;

#[cfg(feature = "sqlx")]
use sqlx::Error as SqlxError;

/// Severity at which a variant is logged when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected client mistakes: validation, missing resources.
    Debug,
    /// Recoverable backend trouble worth an operator's glance.
    Warn,
    /// Unexpected failures.
    Error,
}

/// How an error presents over HTTP. Implemented once for [`AppError`];
/// the API crate renders responses exclusively through this trait.
pub trait ErrorMetadata {
    fn http_status_code(&self) -> u16;

    /// Stable machine-readable code (e.g. "SCHEDULE_CONFLICT").
    fn error_code(&self) -> &'static str;

    /// Whether retrying the same request can succeed.
    fn is_recoverable(&self) -> bool;

    fn suggested_action(&self) -> Option<&'static str>;

    /// Message safe to hand to the client; may hide the internal text.
    fn client_message(&self) -> String;

    /// Sensitive errors never expose details, regardless of environment.
    fn is_sensitive(&self) -> bool;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[cfg(feature = "sqlx")]
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[cfg(not(feature = "sqlx"))]
    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("File rejected: {0}")]
    FileRejected(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Schedule conflict: {0}")]
    ScheduleConflict(String),

    #[error("Import not retryable: import {id} is {status}")]
    ImportNotRetryable { id: uuid::Uuid, status: String },

    #[error("Import not removable: import {id} is {status}")]
    ImportNotRemovable { id: uuid::Uuid, status: String },

    #[error("Inventory store error: {0}")]
    InventoryStore(String),

    #[error("Schedule store error: {0}")]
    ScheduleStore(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

#[cfg(feature = "sqlx")]
impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::InvalidInput(format!("UUID parsing error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::InvalidInput(format!("Validation error: {}", err))
    }
}

/// Per-variant presentation constants. `client_message` stays out of this
/// table because most variants interpolate runtime data into it.
struct Traits {
    status: u16,
    code: &'static str,
    recoverable: bool,
    action: Option<&'static str>,
    sensitive: bool,
    level: LogLevel,
}

fn traits_of(err: &AppError) -> Traits {
    match err {
        AppError::Database(_) => Traits {
            status: 500,
            code: "DATABASE_ERROR",
            recoverable: true,
            action: Some("Retry after a short delay"),
            sensitive: true,
            level: LogLevel::Error,
        },
        AppError::InvalidInput(_) => Traits {
            status: 400,
            code: "INVALID_INPUT",
            recoverable: false,
            action: Some("Check request parameters and try again"),
            sensitive: false,
            level: LogLevel::Debug,
        },
        AppError::BadRequest(_) => Traits {
            status: 400,
            code: "BAD_REQUEST",
            recoverable: false,
            action: Some("Check request format and parameters"),
            sensitive: false,
            level: LogLevel::Debug,
        },
        AppError::NotFound(_) => Traits {
            status: 404,
            code: "NOT_FOUND",
            recoverable: false,
            action: Some("Verify the resource ID exists"),
            sensitive: false,
            level: LogLevel::Debug,
        },
        AppError::FileRejected(_) => Traits {
            status: 400,
            code: "FILE_REJECTED",
            recoverable: false,
            action: Some("Check file type, size and count against the import policy"),
            sensitive: false,
            level: LogLevel::Debug,
        },
        AppError::PayloadTooLarge(_) => Traits {
            status: 413,
            code: "PAYLOAD_TOO_LARGE",
            recoverable: false,
            action: Some("Reduce file size and try again"),
            sensitive: false,
            level: LogLevel::Debug,
        },
        AppError::ScheduleConflict(_) => Traits {
            status: 409,
            code: "SCHEDULE_CONFLICT",
            recoverable: false,
            action: Some("Change the proposed shift times or cancel"),
            sensitive: false,
            level: LogLevel::Debug,
        },
        AppError::ImportNotRetryable { .. } => Traits {
            status: 409,
            code: "IMPORT_NOT_RETRYABLE",
            recoverable: false,
            action: Some("Only failed imports can be retried"),
            sensitive: false,
            level: LogLevel::Debug,
        },
        AppError::ImportNotRemovable { .. } => Traits {
            status: 409,
            code: "IMPORT_NOT_REMOVABLE",
            recoverable: false,
            action: Some("Only pending imports can be removed"),
            sensitive: false,
            level: LogLevel::Debug,
        },
        AppError::InventoryStore(_) => Traits {
            status: 502,
            code: "INVENTORY_STORE_ERROR",
            recoverable: true,
            action: Some("Retry the import"),
            sensitive: false,
            level: LogLevel::Warn,
        },
        AppError::ScheduleStore(_) => Traits {
            status: 502,
            code: "SCHEDULE_STORE_ERROR",
            recoverable: true,
            action: Some("Retry after a short delay"),
            sensitive: false,
            level: LogLevel::Warn,
        },
        AppError::Internal(_) | AppError::InternalWithSource { .. } => Traits {
            status: 500,
            code: "INTERNAL_ERROR",
            recoverable: true,
            action: Some("Retry after a short delay"),
            sensitive: true,
            level: LogLevel::Error,
        },
    }
}

/// Printed causes in [`AppError::detailed_message`] before truncation.
const MAX_SOURCE_DEPTH: usize = 5;

impl AppError {
    /// Variant name as exposed in non-production error bodies.
    pub fn error_type(&self) -> &str {
        match self {
            AppError::Database(_) => "Database",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::BadRequest(_) => "BadRequest",
            AppError::NotFound(_) => "NotFound",
            AppError::FileRejected(_) => "FileRejected",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::ScheduleConflict(_) => "ScheduleConflict",
            AppError::ImportNotRetryable { .. } => "ImportNotRetryable",
            AppError::ImportNotRemovable { .. } => "ImportNotRemovable",
            AppError::InventoryStore(_) => "InventoryStore",
            AppError::ScheduleStore(_) => "ScheduleStore",
            AppError::Internal(_) => "Internal",
            AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Message plus the source chain, capped at [`MAX_SOURCE_DEPTH`] causes.
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();
        let causes = std::iter::successors(self.source(), |err| Error::source(*err));
        for (depth, cause) in causes.enumerate() {
            if depth == MAX_SOURCE_DEPTH {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", cause));
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        traits_of(self).status
    }

    fn error_code(&self) -> &'static str {
        traits_of(self).code
    }

    fn is_recoverable(&self) -> bool {
        traits_of(self).recoverable
    }

    fn suggested_action(&self) -> Option<&'static str> {
        traits_of(self).action
    }

    fn is_sensitive(&self) -> bool {
        traits_of(self).sensitive
    }

    fn log_level(&self) -> LogLevel {
        traits_of(self).level
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::BadRequest(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::FileRejected(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::ScheduleConflict(ref msg) => msg.clone(),
            AppError::ImportNotRetryable { id, status } => {
                format!("Import {} cannot be retried while {}", id, status)
            }
            AppError::ImportNotRemovable { id, status } => {
                format!("Import {} cannot be removed while {}", id, status)
            }
            // Store failures carry the backend's original message so the
            // operator sees it verbatim next to the retry affordance.
            AppError::InventoryStore(ref msg) => msg.clone(),
            AppError::ScheduleStore(ref msg) => msg.clone(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_database() {
        #[cfg(feature = "sqlx")]
        let err = AppError::from(sqlx::Error::PoolClosed);
        #[cfg(not(feature = "sqlx"))]
        let err = AppError::Database("pool closed".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "DATABASE_ERROR");
        assert!(err.is_recoverable());
        assert_eq!(err.client_message(), "Failed to access database");
        assert!(err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_error_metadata_not_found() {
        let err = AppError::NotFound("Import not found".to_string());
        assert_eq!(err.http_status_code(), 404);
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "Import not found");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_schedule_conflict() {
        let err = AppError::ScheduleConflict(
            "Shift overlaps an existing shift for this employee".to_string(),
        );
        assert_eq!(err.http_status_code(), 409);
        assert_eq!(err.error_code(), "SCHEDULE_CONFLICT");
        assert!(!err.is_recoverable());
        assert_eq!(
            err.suggested_action(),
            Some("Change the proposed shift times or cancel")
        );
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_inventory_store_keeps_message() {
        let err = AppError::InventoryStore("duplicate key value violates constraint".to_string());
        assert_eq!(err.http_status_code(), 502);
        assert_eq!(err.error_code(), "INVENTORY_STORE_ERROR");
        assert!(err.is_recoverable());
        assert_eq!(
            err.client_message(),
            "duplicate key value violates constraint"
        );
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Warn);
    }

    #[test]
    fn test_error_metadata_import_state_violations() {
        let id = uuid::Uuid::new_v4();
        let err = AppError::ImportNotRemovable {
            id,
            status: "uploading".to_string(),
        };
        assert_eq!(err.http_status_code(), 409);
        assert_eq!(err.error_code(), "IMPORT_NOT_REMOVABLE");
        assert!(err.client_message().contains(&id.to_string()));
        assert!(err.client_message().contains("uploading"));

        let err = AppError::ImportNotRetryable {
            id,
            status: "pending".to_string(),
        };
        assert_eq!(err.error_code(), "IMPORT_NOT_RETRYABLE");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_metadata_suggested_actions() {
        #[cfg(feature = "sqlx")]
        let err1 = AppError::Database(sqlx::Error::PoolClosed);
        #[cfg(not(feature = "sqlx"))]
        let err1 = AppError::Database("test".to_string());
        assert_eq!(err1.suggested_action(), Some("Retry after a short delay"));

        let err2 = AppError::NotFound("test".to_string());
        assert_eq!(
            err2.suggested_action(),
            Some("Verify the resource ID exists")
        );

        let err3 = AppError::FileRejected("test".to_string());
        assert_eq!(
            err3.suggested_action(),
            Some("Check file type, size and count against the import policy")
        );
    }

    #[test]
    fn test_detailed_message_walks_source_chain() {
        let root = anyhow::anyhow!("connection refused")
            .context("pinging feed store")
            .context("import submission");
        let err = AppError::from(root);
        let details = err.detailed_message();
        assert!(details.contains("Caused by: pinging feed store"));
        assert!(details.contains("Caused by: connection refused"));
    }
}
