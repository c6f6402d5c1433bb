//! Stage functions chaining parsing, mapping and row validation for one
//! file body. The service layer steps progress between stages; the CLI
//! runs them back to back for local dry runs.

use crate::mapping::{map_header, ColumnMapping};
use crate::reader::parse_table;
use crate::validate::{validate_row, RowValidationResult};
use lotops_core::models::{InvalidRowReport, ParsedRow, VehicleRecord};

/// A parsed file body with its header mapping resolved.
#[derive(Debug, Clone)]
pub struct MappedTable {
    pub separator: char,
    pub header: ParsedRow,
    pub mapping: ColumnMapping,
    pub rows: Vec<ParsedRow>,
}

/// Parse the file body on the detected separator and map its header.
pub fn map_table(text: &str, separator: char) -> MappedTable {
    let table = parse_table(text, separator);
    let mapping = map_header(&table.header);

    tracing::debug!(
        columns = table.header.len(),
        mapped = mapping.len(),
        rows = table.rows.len(),
        "header mapped"
    );

    MappedTable {
        separator,
        header: table.header,
        mapping,
        rows: table.rows,
    }
}

/// Row classification for a mapped table. `invalid` carries 1-based data
/// row numbers; `processed` always covers every data row.
#[derive(Debug, Clone, Default)]
pub struct ValidationOutcome {
    pub processed: usize,
    pub records: Vec<VehicleRecord>,
    pub invalid: Vec<InvalidRowReport>,
}

/// Classify every data row. Row failures are collected, never raised; a
/// file full of bad rows still validates to an outcome with zero records.
pub fn validate_rows(table: &MappedTable) -> ValidationOutcome {
    let mut outcome = ValidationOutcome::default();

    for (index, row) in table.rows.iter().enumerate() {
        outcome.processed += 1;
        match validate_row(row, &table.mapping) {
            RowValidationResult::Valid(record) => outcome.records.push(record),
            RowValidationResult::Invalid { reasons } => outcome.invalid.push(InvalidRowReport {
                row: index + 1,
                reasons,
            }),
        }
    }

    tracing::debug!(
        processed = outcome.processed,
        valid = outcome.records.len(),
        invalid = outcome.invalid.len(),
        "rows classified"
    );

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::detect_separator;

    #[test]
    fn test_semicolon_file_end_to_end() {
        let text = "stock;make;model;price\n\
                    A1;;Civic;15000\n\
                    A2;Honda;Accord;call us\n\
                    A3;Honda;CR-V;28500";

        let separator = detect_separator(text);
        assert_eq!(separator, ';');

        let table = map_table(text, separator);
        assert_eq!(table.mapping.len(), 4);

        let outcome = validate_rows(&table);
        assert_eq!(outcome.processed, 3);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.invalid.len(), 2);

        assert_eq!(outcome.records[0].stock_number, "A3");

        // The two rejected rows carry distinct reasons.
        assert_eq!(outcome.invalid[0].row, 1);
        assert!(outcome.invalid[0].reasons[0].contains("make"));
        assert_eq!(outcome.invalid[1].row, 2);
        assert!(outcome.invalid[1].reasons[0].contains("price"));
        assert_ne!(outcome.invalid[0].reasons, outcome.invalid[1].reasons);
    }

    #[test]
    fn test_empty_text_yields_empty_outcome() {
        let table = map_table("", ',');
        assert!(table.mapping.is_empty());

        let outcome = validate_rows(&table);
        assert_eq!(outcome.processed, 0);
        assert!(outcome.records.is_empty());
        assert!(outcome.invalid.is_empty());
    }

    #[test]
    fn test_unmapped_header_rejects_every_row() {
        let text = "colA,colB\nx,y\nz,w";
        let table = map_table(text, ',');
        assert!(table.mapping.is_empty());

        let outcome = validate_rows(&table);
        assert_eq!(outcome.processed, 2);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.invalid.len(), 2);
        for report in &outcome.invalid {
            assert!(report.reasons.iter().any(|reason| reason.contains("stock_number")));
        }
    }
}
