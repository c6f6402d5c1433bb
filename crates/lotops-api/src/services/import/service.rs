//! Feed import service
//!
//! Orchestrates the import lifecycle over an in-memory registry:
//! register → process (detect → map → validate → submit) → summary,
//! plus retry, removal, and retention pruning of finished imports.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use lotops_core::models::{ImportFile, ImportStatus, ImportSummary};
use lotops_core::{AppError, Config, ErrorMetadata};
use lotops_db::{BatchOutcome, InventoryStore};
use lotops_ingest::{detect, detect_separator, map_table, preview_rows, validate_rows, ImportPolicy};

use super::types::{FileUpload, RegisterOutcome, RejectedFile};

/// Invalid rows echoed back in the summary are capped so a junk file with
/// a million bad rows cannot balloon the status payload.
const INVALID_SAMPLE_LIMIT: usize = 20;

struct ImportEntry {
    record: ImportFile,
    content: Bytes,
}

#[derive(Default)]
struct Registry {
    files: HashMap<Uuid, ImportEntry>,
    order: Vec<Uuid>,
}

/// Feed import service
///
/// Holds the admission policy, the inventory store handle, and the registry
/// of uploaded files. Cheap to clone; all clones share one registry.
#[derive(Clone)]
pub struct ImportService {
    policy: Arc<ImportPolicy>,
    preview_rows: usize,
    retention_seconds: u64,
    store: Arc<dyn InventoryStore>,
    registry: Arc<Mutex<Registry>>,
}

impl ImportService {
    pub fn new(config: &Config, store: Arc<dyn InventoryStore>) -> Self {
        let policy = ImportPolicy::new(
            config.max_import_file_size_bytes(),
            config.import_allowed_extensions().to_vec(),
            config.import_allowed_content_types().to_vec(),
            config.max_import_files_per_batch(),
        );

        Self {
            policy: Arc::new(policy),
            preview_rows: config.import_preview_rows(),
            retention_seconds: config.import_retention_seconds(),
            store,
            registry: Arc::new(Mutex::new(Registry::default())),
        }
    }

    /// Register a batch of uploaded files as pending imports.
    ///
    /// The whole batch is refused when it exceeds the per-request file cap.
    /// Below the cap each file is admitted or rejected on its own; one bad
    /// file never blocks its siblings.
    pub async fn register(
        &self,
        dealer_id: Uuid,
        uploads: Vec<FileUpload>,
    ) -> Result<RegisterOutcome, AppError> {
        self.policy
            .validate_batch_size(uploads.len())
            .map_err(|err| AppError::FileRejected(err.to_string()))?;

        let mut admitted = Vec::new();
        let mut rejected = Vec::new();
        let mut registry = self.registry.lock().await;

        for upload in uploads {
            if let Err(err) = self.policy.admit(
                &upload.filename,
                upload.content_type.as_deref(),
                upload.content.len(),
            ) {
                tracing::debug!(filename = %upload.filename, reason = %err, "import file rejected");
                rejected.push(RejectedFile {
                    filename: upload.filename,
                    reason: err.to_string(),
                });
                continue;
            }

            // 1. Detect separator and filename timestamp up front
            let text = String::from_utf8_lossy(&upload.content);
            let detected = detect(&text, &upload.filename);

            // 2. Capture a short preview for the registration response
            let preview = preview_rows(&text, detected.separator, self.preview_rows);
            drop(text);

            let mut record =
                ImportFile::new(dealer_id, upload.filename, upload.content.len() as u64);
            record.detected = Some(detected);
            record.preview = Some(preview);

            let entry = ImportEntry {
                record,
                content: upload.content,
            };
            registry.order.push(entry.record.id);
            admitted.push(entry.record.clone());
            registry.files.insert(entry.record.id, entry);
        }

        tracing::info!(
            dealer_id = %dealer_id,
            admitted = admitted.len(),
            rejected = rejected.len(),
            "import batch registered"
        );

        Ok(RegisterOutcome { admitted, rejected })
    }

    /// Process every pending file for one dealer, oldest first.
    ///
    /// The registry lock is held for the whole drain, so concurrent process
    /// calls for the same dealer serialize instead of double-submitting.
    pub async fn process_pending(&self, dealer_id: Uuid) -> Result<Vec<ImportFile>, AppError> {
        let mut registry = self.registry.lock().await;

        let pending: Vec<Uuid> = registry
            .order
            .iter()
            .copied()
            .filter(|id| {
                registry.files.get(id).is_some_and(|entry| {
                    entry.record.dealer_id == dealer_id
                        && entry.record.status == ImportStatus::Pending
                })
            })
            .collect();

        let mut results = Vec::with_capacity(pending.len());
        for id in pending {
            self.process_one(&mut registry, id).await;
            if let Some(entry) = registry.files.get(&id) {
                results.push(entry.record.clone());
            }
        }

        Ok(results)
    }

    /// Re-run one failed import. Only files in the error state qualify.
    pub async fn retry(&self, dealer_id: Uuid, import_id: Uuid) -> Result<ImportFile, AppError> {
        let mut registry = self.registry.lock().await;

        let status = registry
            .files
            .get(&import_id)
            .filter(|entry| entry.record.dealer_id == dealer_id)
            .map(|entry| entry.record.status)
            .ok_or_else(|| AppError::NotFound(format!("Import {} not found", import_id)))?;

        if !status.can_retry() {
            return Err(AppError::ImportNotRetryable {
                id: import_id,
                status: status.to_string(),
            });
        }

        self.process_one(&mut registry, import_id).await;

        registry
            .files
            .get(&import_id)
            .map(|entry| entry.record.clone())
            .ok_or_else(|| AppError::NotFound(format!("Import {} not found", import_id)))
    }

    /// Remove a pending import before processing starts. Anything past
    /// pending stays in the registry until retention prunes it.
    pub async fn remove(&self, dealer_id: Uuid, import_id: Uuid) -> Result<(), AppError> {
        let mut registry = self.registry.lock().await;

        let status = registry
            .files
            .get(&import_id)
            .filter(|entry| entry.record.dealer_id == dealer_id)
            .map(|entry| entry.record.status)
            .ok_or_else(|| AppError::NotFound(format!("Import {} not found", import_id)))?;

        if !status.can_remove() {
            return Err(AppError::ImportNotRemovable {
                id: import_id,
                status: status.to_string(),
            });
        }

        registry.files.remove(&import_id);
        registry.order.retain(|id| *id != import_id);
        tracing::info!(import_id = %import_id, "pending import removed");
        Ok(())
    }

    /// List this dealer's imports in registration order. Expired successes
    /// are pruned before the snapshot is taken.
    pub async fn list(&self, dealer_id: Uuid) -> Vec<ImportFile> {
        let mut registry = self.registry.lock().await;
        Self::prune_expired(&mut registry, self.retention_seconds);

        registry
            .order
            .iter()
            .filter_map(|id| registry.files.get(id))
            .filter(|entry| entry.record.dealer_id == dealer_id)
            .map(|entry| entry.record.clone())
            .collect()
    }

    /// Fetch one import by id.
    pub async fn get(&self, dealer_id: Uuid, import_id: Uuid) -> Result<ImportFile, AppError> {
        let mut registry = self.registry.lock().await;
        Self::prune_expired(&mut registry, self.retention_seconds);

        registry
            .files
            .get(&import_id)
            .filter(|entry| entry.record.dealer_id == dealer_id)
            .map(|entry| entry.record.clone())
            .ok_or_else(|| AppError::NotFound(format!("Import {} not found", import_id)))
    }

    /// Run one file through the pipeline, mutating its registry record.
    /// Store failures land in the record as an error state, never a panic
    /// or a dropped file.
    async fn process_one(&self, registry: &mut Registry, id: Uuid) {
        let Some(entry) = registry.files.get_mut(&id) else {
            return;
        };

        // 1. Move to uploading and decode the body
        entry.record.mark_uploading();
        entry.record.advance_progress(5);
        let text = String::from_utf8_lossy(&entry.content).into_owned();

        // 2. Resolve the separator (recorded at registration, else re-detected)
        let separator = entry
            .record
            .detected
            .as_ref()
            .map(|meta| meta.separator)
            .unwrap_or_else(|| detect_separator(&text));
        entry.record.advance_progress(25);

        // 3. Parse the body and map the header
        let table = map_table(&text, separator);
        entry.record.advance_progress(45);

        // 4. Classify rows
        let outcome = validate_rows(&table);
        entry.record.advance_progress(70);

        // 5. Submit valid records to the inventory store
        let batch = if outcome.records.is_empty() {
            BatchOutcome::default()
        } else {
            match self
                .store
                .upsert_batch(entry.record.dealer_id, &outcome.records)
                .await
            {
                Ok(batch) => batch,
                Err(err) => {
                    tracing::warn!(
                        import_id = %id,
                        error = %err,
                        "inventory store rejected import batch"
                    );
                    entry.record.mark_error(err.client_message());
                    return;
                }
            }
        };
        entry.record.advance_progress(90);

        // 6. Record the summary
        let valid = outcome.records.len();
        let invalid = outcome.invalid.len();
        let mut invalid_sample = outcome.invalid;
        invalid_sample.truncate(INVALID_SAMPLE_LIMIT);

        entry.record.mark_success(ImportSummary {
            processed: outcome.processed,
            valid,
            invalid,
            inserted: batch.inserted,
            updated: batch.updated,
            separator,
            column_mapping: table.mapping.by_name(),
            invalid_sample,
        });

        tracing::info!(
            import_id = %id,
            processed = outcome.processed,
            valid = valid,
            invalid = invalid,
            inserted = batch.inserted,
            updated = batch.updated,
            "import processed"
        );
    }

    fn prune_expired(registry: &mut Registry, retention_seconds: u64) {
        let cutoff = Utc::now() - chrono::Duration::seconds(retention_seconds as i64);
        registry.files.retain(|_, entry| {
            match (entry.record.status, entry.record.completed_at) {
                (ImportStatus::Success, Some(completed_at)) => completed_at > cutoff,
                _ => true,
            }
        });
        registry.order.retain(|id| registry.files.contains_key(id));
    }
}
