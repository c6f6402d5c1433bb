use crate::mapping::{ColumnMapping, TargetField};
use chrono::{Datelike, Utc};
use lotops_core::models::VehicleRecord;
use lotops_core::vin;
use rust_decimal::Decimal;

/// Earliest model year row validation accepts. The upper bound floats two
/// years past the current calendar year for next-model-year stock.
const MIN_YEAR: i32 = 1900;

/// Classification of one data row: a candidate record, or the reasons it
/// was refused. Validation never fails outright; callers count both kinds
/// and keep going.
#[derive(Debug, Clone, PartialEq)]
pub enum RowValidationResult {
    Valid(VehicleRecord),
    Invalid { reasons: Vec<String> },
}

impl RowValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, RowValidationResult::Valid(_))
    }
}

/// Validate and coerce one data row against the resolved mapping.
///
/// Required fields (stock number, make, model) must be non-empty after
/// trimming. Numeric fields tolerate thousands separators, money fields a
/// leading `$`. Empty optional fields coerce to absent, never to zero; a
/// parse failure anywhere marks the whole row invalid. VINs are only
/// normalized here, never verified.
pub fn validate_row(row: &[String], mapping: &ColumnMapping) -> RowValidationResult {
    let mut reasons = Vec::new();

    let cell = |field: TargetField| -> Option<&str> {
        mapping
            .column(field)
            .and_then(|index| row.get(index))
            .map(|raw| raw.trim())
            .filter(|raw| !raw.is_empty())
    };

    let stock_number = require(TargetField::StockNumber, cell(TargetField::StockNumber), &mut reasons);
    let make = require(TargetField::Make, cell(TargetField::Make), &mut reasons);
    let model = require(TargetField::Model, cell(TargetField::Model), &mut reasons);

    let vin = cell(TargetField::Vin).map(vin::normalize_vin);
    let trim = cell(TargetField::Trim).map(str::to_string);
    let status = cell(TargetField::Status).map(str::to_string);
    let location = cell(TargetField::Location).map(str::to_string);

    let year = cell(TargetField::Year).and_then(|raw| parse_year(raw, &mut reasons));
    let mileage =
        cell(TargetField::Mileage).and_then(|raw| parse_count(TargetField::Mileage, raw, &mut reasons));
    let price =
        cell(TargetField::Price).and_then(|raw| parse_money(TargetField::Price, raw, &mut reasons));
    let msrp =
        cell(TargetField::Msrp).and_then(|raw| parse_money(TargetField::Msrp, raw, &mut reasons));
    let age_days =
        cell(TargetField::AgeDays).and_then(|raw| parse_count(TargetField::AgeDays, raw, &mut reasons));
    let certified =
        cell(TargetField::Certified).and_then(|raw| parse_flag(TargetField::Certified, raw, &mut reasons));
    let leads =
        cell(TargetField::Leads).and_then(|raw| parse_count(TargetField::Leads, raw, &mut reasons));
    let market_day_supply = cell(TargetField::MarketDaySupply)
        .and_then(|raw| parse_count(TargetField::MarketDaySupply, raw, &mut reasons));

    match (stock_number, make, model) {
        (Some(stock_number), Some(make), Some(model)) if reasons.is_empty() => {
            RowValidationResult::Valid(VehicleRecord {
                stock_number: stock_number.to_string(),
                vin,
                make: make.to_string(),
                model: model.to_string(),
                trim,
                year,
                mileage,
                price,
                msrp,
                status,
                age_days,
                location,
                certified,
                leads,
                market_day_supply,
            })
        }
        _ => RowValidationResult::Invalid { reasons },
    }
}

fn require<'a>(
    field: TargetField,
    value: Option<&'a str>,
    reasons: &mut Vec<String>,
) -> Option<&'a str> {
    if value.is_none() {
        reasons.push(format!("{} is required", field));
    }
    value
}

fn parse_count(field: TargetField, raw: &str, reasons: &mut Vec<String>) -> Option<i32> {
    let cleaned: String = raw.chars().filter(|c| *c != ',').collect();
    match cleaned.parse::<i32>() {
        Ok(value) if value >= 0 => Some(value),
        Ok(value) => {
            reasons.push(format!("{} must not be negative: {}", field, value));
            None
        }
        Err(_) => {
            reasons.push(format!("{} is not a number: '{}'", field, raw));
            None
        }
    }
}

fn parse_year(raw: &str, reasons: &mut Vec<String>) -> Option<i32> {
    let max_year = Utc::now().year() + 2;
    match raw.parse::<i32>() {
        Ok(value) if (MIN_YEAR..=max_year).contains(&value) => Some(value),
        Ok(value) => {
            reasons.push(format!(
                "year {} is out of range ({}..={})",
                value, MIN_YEAR, max_year
            ));
            None
        }
        Err(_) => {
            reasons.push(format!("year is not a number: '{}'", raw));
            None
        }
    }
}

fn parse_money(field: TargetField, raw: &str, reasons: &mut Vec<String>) -> Option<Decimal> {
    let cleaned: String = raw
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    match cleaned.trim().parse::<Decimal>() {
        Ok(value) if !value.is_sign_negative() => Some(value),
        Ok(value) => {
            reasons.push(format!("{} must not be negative: {}", field, value));
            None
        }
        Err(_) => {
            reasons.push(format!("{} is not a number: '{}'", field, raw));
            None
        }
    }
}

fn parse_flag(field: TargetField, raw: &str, reasons: &mut Vec<String>) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => {
            reasons.push(format!("{} is not a yes/no value: '{}'", field, raw));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::map_header;
    use rust_decimal::Decimal;

    fn mapping_for(cells: &[&str]) -> ColumnMapping {
        let header: Vec<String> = cells.iter().map(|cell| cell.to_string()).collect();
        map_header(&header)
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    fn reasons(result: RowValidationResult) -> Vec<String> {
        match result {
            RowValidationResult::Valid(record) => panic!("expected invalid, got {:?}", record),
            RowValidationResult::Invalid { reasons } => reasons,
        }
    }

    #[test]
    fn test_full_row_classifies_valid() {
        let mapping = mapping_for(&[
            "stock", "vin", "make", "model", "year", "mileage", "price", "certified",
        ]);
        let result = validate_row(
            &row(&[
                "A123",
                " 1hgcm82633a004352 ",
                "Honda",
                "Accord",
                "2021",
                "12,034",
                "$24,990.50",
                "yes",
            ]),
            &mapping,
        );

        match result {
            RowValidationResult::Valid(record) => {
                assert_eq!(record.stock_number, "A123");
                assert_eq!(record.vin.as_deref(), Some("1HGCM82633A004352"));
                assert_eq!(record.make, "Honda");
                assert_eq!(record.model, "Accord");
                assert_eq!(record.year, Some(2021));
                assert_eq!(record.mileage, Some(12_034));
                assert_eq!(record.price, Some(Decimal::new(2_499_050, 2)));
                assert_eq!(record.certified, Some(true));
                assert_eq!(record.msrp, None);
            }
            RowValidationResult::Invalid { reasons } => panic!("unexpected reasons: {:?}", reasons),
        }
    }

    #[test]
    fn test_missing_required_field_names_it() {
        let mapping = mapping_for(&["stock", "make", "model"]);
        let reasons = reasons(validate_row(&row(&["A123", "", "Civic"]), &mapping));
        assert_eq!(reasons, vec!["make is required".to_string()]);
    }

    #[test]
    fn test_short_row_reports_missing_fields() {
        let mapping = mapping_for(&["stock", "make", "model"]);
        let reasons = reasons(validate_row(&row(&["A123"]), &mapping));
        assert_eq!(reasons.len(), 2);
        assert!(reasons[0].contains("make"));
        assert!(reasons[1].contains("model"));
    }

    #[test]
    fn test_non_numeric_price_is_invalid() {
        let mapping = mapping_for(&["stock", "make", "model", "price"]);
        let reasons = reasons(validate_row(
            &row(&["A123", "Honda", "Civic", "call us"]),
            &mapping,
        ));
        assert_eq!(reasons, vec!["price is not a number: 'call us'".to_string()]);
    }

    #[test]
    fn test_negative_mileage_is_invalid() {
        let mapping = mapping_for(&["stock", "make", "model", "mileage"]);
        let reasons = reasons(validate_row(
            &row(&["A123", "Honda", "Civic", "-5"]),
            &mapping,
        ));
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("mileage"));
        assert!(reasons[0].contains("negative"));
    }

    #[test]
    fn test_year_out_of_range() {
        let mapping = mapping_for(&["stock", "make", "model", "year"]);
        let reasons = reasons(validate_row(
            &row(&["A123", "Ford", "Model T", "1776"]),
            &mapping,
        ));
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("year 1776"));
    }

    #[test]
    fn test_certified_flag_spellings() {
        let mapping = mapping_for(&["stock", "make", "model", "certified"]);
        for (raw, expected) in [
            ("true", true),
            ("YES", true),
            ("y", true),
            ("1", true),
            ("false", false),
            ("No", false),
            ("n", false),
            ("0", false),
        ] {
            let result = validate_row(&row(&["A123", "Honda", "Civic", raw]), &mapping);
            match result {
                RowValidationResult::Valid(record) => {
                    assert_eq!(record.certified, Some(expected), "{}", raw)
                }
                RowValidationResult::Invalid { reasons } => {
                    panic!("{} rejected: {:?}", raw, reasons)
                }
            }
        }

        let reasons = reasons(validate_row(
            &row(&["A123", "Honda", "Civic", "maybe"]),
            &mapping,
        ));
        assert!(reasons[0].contains("certified"));
    }

    #[test]
    fn test_empty_optionals_stay_absent() {
        let mapping = mapping_for(&["stock", "make", "model", "mileage", "price", "trim"]);
        let result = validate_row(&row(&["A123", "Honda", "Civic", "", " ", ""]), &mapping);
        match result {
            RowValidationResult::Valid(record) => {
                assert_eq!(record.mileage, None);
                assert_eq!(record.price, None);
                assert_eq!(record.trim, None);
            }
            RowValidationResult::Invalid { reasons } => panic!("unexpected reasons: {:?}", reasons),
        }
    }

    #[test]
    fn test_zero_values_are_valid() {
        let mapping = mapping_for(&["stock", "make", "model", "mileage", "price"]);
        let result = validate_row(&row(&["A123", "Honda", "Civic", "0", "0"]), &mapping);
        match result {
            RowValidationResult::Valid(record) => {
                assert_eq!(record.mileage, Some(0));
                assert_eq!(record.price, Some(Decimal::ZERO));
            }
            RowValidationResult::Invalid { reasons } => panic!("unexpected reasons: {:?}", reasons),
        }
    }

    #[test]
    fn test_malformed_vin_does_not_invalidate_row() {
        let mapping = mapping_for(&["stock", "make", "model", "vin"]);
        let result = validate_row(&row(&["A123", "Honda", "Civic", "short-vin"]), &mapping);
        match result {
            RowValidationResult::Valid(record) => {
                assert_eq!(record.vin.as_deref(), Some("SHORT-VIN"));
            }
            RowValidationResult::Invalid { reasons } => panic!("unexpected reasons: {:?}", reasons),
        }
    }

    #[test]
    fn test_multiple_reasons_accumulate() {
        let mapping = mapping_for(&["stock", "make", "model", "price", "year"]);
        let reasons = reasons(validate_row(
            &row(&["A123", "", "Civic", "n/a", "soon"]),
            &mapping,
        ));
        assert_eq!(reasons.len(), 3);
        assert!(reasons.iter().any(|reason| reason.contains("make")));
        assert!(reasons.iter().any(|reason| reason.contains("price")));
        assert!(reasons.iter().any(|reason| reason.contains("year")));
    }
}
