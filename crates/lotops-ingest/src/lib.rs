//! CSV ingestion pipeline: file admission policy, separator and
//! filename-timestamp detection, header mapping and row validation.
//!
//! Everything here is pure and synchronous. The service layer owns
//! orchestration, progress reporting and persistence; this crate only
//! turns raw file text into classified vehicle records.

pub mod detect;
pub mod mapping;
pub mod pipeline;
pub mod policy;
pub mod reader;
pub mod validate;

pub use detect::{detect, detect_filename_timestamp, detect_separator, FALLBACK_SEPARATOR};
pub use mapping::{map_header, normalize_header, ColumnMapping, TargetField};
pub use pipeline::{map_table, validate_rows, MappedTable, ValidationOutcome};
pub use policy::{ImportPolicy, PolicyError};
pub use reader::{parse_table, preview_rows, split_line, CsvTable};
pub use validate::{validate_row, RowValidationResult};
