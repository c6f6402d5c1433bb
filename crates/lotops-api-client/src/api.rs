//! Domain methods for the LotOps API client.
//!
//! Response types are re-exported from `lotops_core::models` where possible.
//! Wrapper types match the API handler shapes.

use crate::{api_prefix, ApiClient};
use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use lotops_core::models::{Dealer, DealerPreference, ImportFile, ScheduleShift, Vehicle};
use lotops_core::VinAnalysis;
use uuid::Uuid;

/// One file the server refused at registration.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct RejectedUpload {
    pub filename: String,
    pub reason: String,
}

/// Registration response: per-file admit/reject split.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct RegisterImportsResponse {
    pub admitted: Vec<ImportFile>,
    pub rejected: Vec<RejectedUpload>,
}

/// Import listing (files, count). Matches API handler shape.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ImportListResponse {
    pub files: Vec<ImportFile>,
    pub count: usize,
}

/// Inventory page plus the unpaged total.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct InventoryListResponse {
    pub vehicles: Vec<Vehicle>,
    pub count: usize,
    pub total: i64,
}

/// Shift listing (shifts, count). Matches API handler shape.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ShiftListResponse {
    pub shifts: Vec<ScheduleShift>,
    pub count: usize,
}

/// Shift body for create and full-replace update.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ShiftPayload {
    pub employee_id: Uuid,
    pub shift_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub kiosk: Option<String>,
    pub break_minutes: i32,
    pub break_paid: bool,
    pub grace_early_minutes: i32,
    pub grace_late_minutes: i32,
    pub notes: Option<String>,
}

/// Window to test against the stored schedule without writing anything.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ConflictProbe {
    pub employee_id: Uuid,
    pub shift_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub exclude_shift_id: Option<Uuid>,
}

#[derive(Debug, serde::Deserialize)]
struct ConflictCheckResponse {
    conflict: bool,
}

/// VIN analysis result. A malformed VIN is `valid: false`, not an error.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct VinCheckResponse {
    pub vin: String,
    pub valid: bool,
    pub reason: Option<String>,
    pub analysis: Option<VinAnalysis>,
}

impl ApiClient {
    /// Create a dealer.
    pub async fn create_dealer(&self, name: &str) -> Result<Dealer> {
        let body = serde_json::json!({ "name": name });
        self.post_json(&format!("{}/dealers", api_prefix()), &body)
            .await
    }

    /// Get a dealer by id.
    pub async fn get_dealer(&self, dealer_id: Uuid) -> Result<Dealer> {
        self.get(&format!("{}/dealers/{}", api_prefix(), dealer_id), &[])
            .await
    }

    /// Register an inventory feed from a local file path.
    pub async fn register_import_file(
        &self,
        dealer_id: Uuid,
        file_path: &str,
    ) -> Result<RegisterImportsResponse> {
        use std::io::Read;

        let path = std::path::Path::new(file_path);
        if path
            .components()
            .any(|c| c == std::path::Component::ParentDir)
        {
            return Err(anyhow::anyhow!("Invalid input: {}", path.display()));
        }
        let mut file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open file: {}", file_path))?;

        let mut buffer = Vec::new();
        file.read_to_end(&mut buffer)
            .with_context(|| format!("Failed to read file: {}", file_path))?;

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("feed.csv");

        let form = reqwest::multipart::Form::new().part(
            "files",
            reqwest::multipart::Part::bytes(buffer)
                .file_name(filename.to_string())
                .mime_str("text/csv")
                .context("Failed to set part content type")?,
        );

        self.post_multipart(
            &format!("{}/dealers/{}/imports", api_prefix(), dealer_id),
            form,
        )
        .await
    }

    /// Process everything the dealer has pending, returning the final records.
    pub async fn process_imports(&self, dealer_id: Uuid) -> Result<ImportListResponse> {
        self.post_empty(&format!(
            "{}/dealers/{}/imports/process",
            api_prefix(),
            dealer_id
        ))
        .await
    }

    /// List the dealer's import records, newest last.
    pub async fn list_imports(&self, dealer_id: Uuid) -> Result<ImportListResponse> {
        self.get(
            &format!("{}/dealers/{}/imports", api_prefix(), dealer_id),
            &[],
        )
        .await
    }

    /// Get one import record.
    pub async fn get_import(&self, dealer_id: Uuid, import_id: Uuid) -> Result<ImportFile> {
        self.get(
            &format!("{}/dealers/{}/imports/{}", api_prefix(), dealer_id, import_id),
            &[],
        )
        .await
    }

    /// Re-run a failed import.
    pub async fn retry_import(&self, dealer_id: Uuid, import_id: Uuid) -> Result<ImportFile> {
        self.post_empty(&format!(
            "{}/dealers/{}/imports/{}/retry",
            api_prefix(),
            dealer_id,
            import_id
        ))
        .await
    }

    /// Remove a pending import before it is processed.
    pub async fn remove_import(&self, dealer_id: Uuid, import_id: Uuid) -> Result<()> {
        self.delete(&format!(
            "{}/dealers/{}/imports/{}",
            api_prefix(),
            dealer_id,
            import_id
        ))
        .await
    }

    /// List inventory with pagination and optional status filter.
    pub async fn list_inventory(
        &self,
        dealer_id: Uuid,
        limit: i64,
        offset: i64,
        status: Option<&str>,
    ) -> Result<InventoryListResponse> {
        let mut query = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
        if let Some(s) = status {
            query.push(("status", s.to_string()));
        }
        self.get(
            &format!("{}/dealers/{}/inventory", api_prefix(), dealer_id),
            &query,
        )
        .await
    }

    /// Get a single vehicle by stock number.
    pub async fn get_vehicle(&self, dealer_id: Uuid, stock_number: &str) -> Result<Vehicle> {
        self.get(
            &format!(
                "{}/dealers/{}/inventory/{}",
                api_prefix(),
                dealer_id,
                stock_number
            ),
            &[],
        )
        .await
    }

    /// Create a shift. Conflicting windows are refused by the server.
    pub async fn create_shift(
        &self,
        dealer_id: Uuid,
        payload: &ShiftPayload,
    ) -> Result<ScheduleShift> {
        self.post_json(
            &format!("{}/dealers/{}/shifts", api_prefix(), dealer_id),
            payload,
        )
        .await
    }

    /// Replace a shift.
    pub async fn update_shift(
        &self,
        dealer_id: Uuid,
        shift_id: Uuid,
        payload: &ShiftPayload,
    ) -> Result<ScheduleShift> {
        self.put_json(
            &format!("{}/dealers/{}/shifts/{}", api_prefix(), dealer_id, shift_id),
            payload,
        )
        .await
    }

    /// Delete a shift.
    pub async fn delete_shift(&self, dealer_id: Uuid, shift_id: Uuid) -> Result<()> {
        self.delete(&format!(
            "{}/dealers/{}/shifts/{}",
            api_prefix(),
            dealer_id,
            shift_id
        ))
        .await
    }

    /// Get one shift.
    pub async fn get_shift(&self, dealer_id: Uuid, shift_id: Uuid) -> Result<ScheduleShift> {
        self.get(
            &format!("{}/dealers/{}/shifts/{}", api_prefix(), dealer_id, shift_id),
            &[],
        )
        .await
    }

    /// List shifts, optionally narrowed to one employee and/or date.
    pub async fn list_shifts(
        &self,
        dealer_id: Uuid,
        employee_id: Option<Uuid>,
        date: Option<NaiveDate>,
    ) -> Result<ShiftListResponse> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(e) = employee_id {
            query.push(("employee_id", e.to_string()));
        }
        if let Some(d) = date {
            query.push(("date", d.to_string()));
        }
        self.get(
            &format!("{}/dealers/{}/shifts", api_prefix(), dealer_id),
            &query,
        )
        .await
    }

    /// Check a window against the stored schedule without writing anything.
    pub async fn check_shift_conflict(
        &self,
        dealer_id: Uuid,
        probe: &ConflictProbe,
    ) -> Result<bool> {
        let response: ConflictCheckResponse = self
            .post_json(
                &format!("{}/dealers/{}/shifts/conflicts", api_prefix(), dealer_id),
                probe,
            )
            .await?;
        Ok(response.conflict)
    }

    /// Get a dealer preference. Unset keys are an API error (404).
    pub async fn get_preference(&self, dealer_id: Uuid, key: &str) -> Result<DealerPreference> {
        self.get(
            &format!("{}/dealers/{}/preferences/{}", api_prefix(), dealer_id, key),
            &[],
        )
        .await
    }

    /// Set (or overwrite) a dealer preference.
    pub async fn set_preference(
        &self,
        dealer_id: Uuid,
        key: &str,
        value: &str,
    ) -> Result<DealerPreference> {
        let body = serde_json::json!({ "value": value });
        self.put_json(
            &format!("{}/dealers/{}/preferences/{}", api_prefix(), dealer_id, key),
            &body,
        )
        .await
    }

    /// Analyze a VIN.
    pub async fn check_vin(&self, vin: &str) -> Result<VinCheckResponse> {
        self.get(&format!("{}/vin/{}", api_prefix(), vin), &[])
            .await
    }
}
