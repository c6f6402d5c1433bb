use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// One raw CSV line split on the detected separator. Transient; used for
/// preview and column mapping only.
pub type ParsedRow = Vec<String>;

/// Import file lifecycle: `pending -> uploading -> success | error`, with
/// `error -> uploading` on operator retry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ImportStatus {
    Pending,
    Uploading,
    Success,
    Error,
}

impl ImportStatus {
    /// Terminal states keep their summary or error for operator inspection.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ImportStatus::Success | ImportStatus::Error)
    }

    /// Retry is operator-initiated and only valid from `error`.
    pub fn can_retry(&self) -> bool {
        matches!(self, ImportStatus::Error)
    }

    /// Removal is only valid before processing starts.
    pub fn can_remove(&self) -> bool {
        matches!(self, ImportStatus::Pending)
    }
}

impl Display for ImportStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ImportStatus::Pending => write!(f, "pending"),
            ImportStatus::Uploading => write!(f, "uploading"),
            ImportStatus::Success => write!(f, "success"),
            ImportStatus::Error => write!(f, "error"),
        }
    }
}

impl FromStr for ImportStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ImportStatus::Pending),
            "uploading" => Ok(ImportStatus::Uploading),
            "success" => Ok(ImportStatus::Success),
            "error" => Ok(ImportStatus::Error),
            _ => Err(anyhow::anyhow!("Invalid import status: {}", s)),
        }
    }
}

/// Metadata detected from file content and filename before any upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DetectedMeta {
    /// Field delimiter guessed from the first sampled lines.
    pub separator: char,
    /// Date embedded in the filename, when a known convention matched.
    pub timestamp: Option<NaiveDate>,
}

/// One rejected row with the reasons validation recorded for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InvalidRowReport {
    /// 1-based data row number (header excluded).
    pub row: usize,
    pub reasons: Vec<String>,
}

/// Result summary retained on a successful import for operator inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImportSummary {
    pub processed: usize,
    pub valid: usize,
    pub invalid: usize,
    pub inserted: u64,
    pub updated: u64,
    pub separator: char,
    /// Resolved target-field -> source-column mapping.
    pub column_mapping: BTreeMap<String, usize>,
    /// Bounded sample of invalid rows; counts above cover the full file.
    pub invalid_sample: Vec<InvalidRowReport>,
}

/// Per-file import record tracked through the upload lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportFile {
    pub id: Uuid,
    pub dealer_id: Uuid,
    pub filename: String,
    pub size_bytes: u64,
    pub status: ImportStatus,
    /// Approximate percentage, monotonic within an attempt; 100 only on
    /// confirmed success.
    pub progress: u8,
    pub detected: Option<DetectedMeta>,
    pub preview: Option<Vec<ParsedRow>>,
    pub summary: Option<ImportSummary>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ImportFile {
    pub fn new(dealer_id: Uuid, filename: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            dealer_id,
            filename: filename.into(),
            size_bytes,
            status: ImportStatus::Pending,
            progress: 0,
            detected: None,
            preview: None,
            summary: None,
            error: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Start an attempt: fresh progress, cleared failure from any prior run.
    pub fn mark_uploading(&mut self) {
        self.status = ImportStatus::Uploading;
        self.progress = 0;
        self.error = None;
        self.summary = None;
        self.completed_at = None;
    }

    /// Advance progress within the running attempt. Values are clamped so an
    /// in-flight file never reports more than 99 or moves backwards.
    pub fn advance_progress(&mut self, progress: u8) {
        self.progress = self.progress.max(progress.min(99));
    }

    pub fn mark_success(&mut self, summary: ImportSummary) {
        self.status = ImportStatus::Success;
        self.progress = 100;
        self.summary = Some(summary);
        self.error = None;
        self.completed_at = Some(Utc::now());
    }

    pub fn mark_error(&mut self, message: impl Into<String>) {
        self.status = ImportStatus::Error;
        self.error = Some(message.into());
        self.completed_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary() -> ImportSummary {
        ImportSummary {
            processed: 3,
            valid: 1,
            invalid: 2,
            inserted: 1,
            updated: 0,
            separator: ';',
            column_mapping: BTreeMap::new(),
            invalid_sample: vec![],
        }
    }

    #[test]
    fn test_status_display_from_str_round_trip() {
        for status in [
            ImportStatus::Pending,
            ImportStatus::Uploading,
            ImportStatus::Success,
            ImportStatus::Error,
        ] {
            let parsed: ImportStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert!("done".parse::<ImportStatus>().is_err());
    }

    #[test]
    fn test_status_predicates() {
        assert!(ImportStatus::Pending.can_remove());
        assert!(!ImportStatus::Uploading.can_remove());
        assert!(!ImportStatus::Success.can_remove());

        assert!(ImportStatus::Error.can_retry());
        assert!(!ImportStatus::Pending.can_retry());
        assert!(!ImportStatus::Success.can_retry());

        assert!(ImportStatus::Success.is_terminal());
        assert!(ImportStatus::Error.is_terminal());
        assert!(!ImportStatus::Uploading.is_terminal());
    }

    #[test]
    fn test_new_file_starts_pending_at_zero() {
        let file = ImportFile::new(Uuid::new_v4(), "inventory.csv", 1024);
        assert_eq!(file.status, ImportStatus::Pending);
        assert_eq!(file.progress, 0);
        assert!(file.summary.is_none());
        assert!(file.error.is_none());
        assert!(file.completed_at.is_none());
    }

    #[test]
    fn test_progress_is_monotonic_and_capped_below_success() {
        let mut file = ImportFile::new(Uuid::new_v4(), "inventory.csv", 1024);
        file.mark_uploading();
        file.advance_progress(45);
        file.advance_progress(25);
        assert_eq!(file.progress, 45, "progress must not move backwards");
        file.advance_progress(100);
        assert_eq!(file.progress, 99, "only success reaches 100");
        file.mark_success(sample_summary());
        assert_eq!(file.progress, 100);
        assert_eq!(file.status, ImportStatus::Success);
        assert!(file.completed_at.is_some());
    }

    #[test]
    fn test_error_keeps_message_and_allows_fresh_attempt() {
        let mut file = ImportFile::new(Uuid::new_v4(), "inventory.csv", 1024);
        file.mark_uploading();
        file.advance_progress(70);
        file.mark_error("inventory store unavailable");
        assert_eq!(file.status, ImportStatus::Error);
        assert_eq!(file.error.as_deref(), Some("inventory store unavailable"));
        assert!(file.progress < 100);

        // Operator retry: error -> uploading with a clean slate.
        file.mark_uploading();
        assert_eq!(file.status, ImportStatus::Uploading);
        assert_eq!(file.progress, 0);
        assert!(file.error.is_none());
        assert!(file.completed_at.is_none());
    }

    #[test]
    fn test_success_retains_summary() {
        let mut file = ImportFile::new(Uuid::new_v4(), "inventory_2024-03-01.csv", 2048);
        file.mark_uploading();
        file.mark_success(sample_summary());
        let summary = file.summary.expect("summary retained");
        assert_eq!(summary.processed, 3);
        assert_eq!(summary.valid, 1);
        assert_eq!(summary.invalid, 2);
        assert_eq!(summary.separator, ';');
    }
}
