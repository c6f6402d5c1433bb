//! VIN analysis
//!
//! Normalization and structural validation of 17-character Vehicle
//! Identification Numbers: alphabet check (no `I`, `O`, `Q`), ISO 3779
//! check-digit verification, and section breakdown for valid VINs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const VIN_LENGTH: usize = 17;

/// Position weights for the check-digit sum. Position 9 (the check digit
/// itself) carries weight 0.
const WEIGHTS: [u32; VIN_LENGTH] = [8, 7, 6, 5, 4, 3, 2, 10, 0, 9, 8, 7, 6, 5, 4, 3, 2];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VinError {
    #[error("VIN must be {VIN_LENGTH} characters, got {0}")]
    WrongLength(usize),

    #[error("VIN contains disallowed character '{ch}' at position {position}")]
    DisallowedChar { ch: char, position: usize },

    #[error("VIN check digit mismatch: expected '{expected}', found '{found}'")]
    CheckDigitMismatch { expected: char, found: char },
}

/// Breakdown of a structurally valid VIN.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VinAnalysis {
    /// Normalized (trimmed, uppercased) VIN.
    pub vin: String,
    /// World manufacturer identifier, positions 1-3.
    pub wmi: String,
    /// Vehicle descriptor section, positions 4-9.
    pub vds: String,
    /// Vehicle identifier section, positions 10-17.
    pub vis: String,
    /// Model year code, position 10.
    pub model_year_code: char,
    /// Verified check digit, position 9.
    pub check_digit: char,
}

/// Trim and uppercase a raw VIN as entered by an operator or a CSV feed.
pub fn normalize_vin(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// Transliteration value for the check-digit sum. `None` for characters
/// outside the VIN alphabet (including `I`, `O`, `Q`).
fn transliterate(ch: char) -> Option<u32> {
    match ch {
        '0'..='9' => Some(ch as u32 - '0' as u32),
        'A' => Some(1),
        'B' => Some(2),
        'C' => Some(3),
        'D' => Some(4),
        'E' => Some(5),
        'F' => Some(6),
        'G' => Some(7),
        'H' => Some(8),
        'J' => Some(1),
        'K' => Some(2),
        'L' => Some(3),
        'M' => Some(4),
        'N' => Some(5),
        'P' => Some(7),
        'R' => Some(9),
        'S' => Some(2),
        'T' => Some(3),
        'U' => Some(4),
        'V' => Some(5),
        'W' => Some(6),
        'X' => Some(7),
        'Y' => Some(8),
        'Z' => Some(9),
        _ => None,
    }
}

fn check_digit_char(remainder: u32) -> char {
    if remainder == 10 {
        'X'
    } else {
        char::from_digit(remainder, 10).unwrap_or('0')
    }
}

/// Analyze a VIN: normalize, verify alphabet and check digit, and break out
/// the WMI/VDS/VIS sections.
pub fn analyze_vin(raw: &str) -> Result<VinAnalysis, VinError> {
    let vin = normalize_vin(raw);
    let chars: Vec<char> = vin.chars().collect();

    if chars.len() != VIN_LENGTH {
        return Err(VinError::WrongLength(chars.len()));
    }

    let mut sum = 0u32;
    for (i, &ch) in chars.iter().enumerate() {
        let value = transliterate(ch).ok_or(VinError::DisallowedChar {
            ch,
            position: i + 1,
        })?;
        sum += value * WEIGHTS[i];
    }

    let expected = check_digit_char(sum % 11);
    let found = chars[8];
    if expected != found {
        return Err(VinError::CheckDigitMismatch { expected, found });
    }

    Ok(VinAnalysis {
        wmi: chars[0..3].iter().collect(),
        vds: chars[3..9].iter().collect(),
        vis: chars[9..17].iter().collect(),
        model_year_code: chars[9],
        check_digit: found,
        vin,
    })
}
