//! Types used by the feed import service

use bytes::Bytes;
use serde::Serialize;
use utoipa::ToSchema;

/// A file as extracted from the multipart request, before policy checks.
pub struct FileUpload {
    pub filename: String,
    pub content_type: Option<String>,
    pub content: Bytes,
}

/// A file refused during registration, with the reason it was turned away.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RejectedFile {
    pub filename: String,
    pub reason: String,
}

/// Outcome of registering a batch: files admitted as pending imports plus
/// the per-file rejections.
#[derive(Debug)]
pub struct RegisterOutcome {
    pub admitted: Vec<lotops_core::models::ImportFile>,
    pub rejected: Vec<RejectedFile>,
}
