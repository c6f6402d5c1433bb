mod service;
mod types;

pub use service::ImportService;
pub use types::{FileUpload, RegisterOutcome, RejectedFile};
