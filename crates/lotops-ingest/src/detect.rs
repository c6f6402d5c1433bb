use chrono::NaiveDate;
use lotops_core::models::DetectedMeta;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Number of leading non-empty lines sampled for separator detection.
const SAMPLE_LINES: usize = 10;

/// Candidate delimiters in tie-break preference order.
const CANDIDATES: [char; 3] = [',', ';', '\t'];

/// Delimiter assumed when no candidate splits the sample consistently.
pub const FALLBACK_SEPARATOR: char = ',';

static ISO_DASHED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").expect("regex: iso date"));
static ISO_COMPACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9])(\d{4})(\d{2})(\d{2})(?:[^0-9]|$)").expect("regex: compact date")
});
static US_SLASHED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})[-/](\d{1,2})[-/](\d{4})").expect("regex: us date"));
static EU_DOTTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{1,2})\.(\d{1,2})\.(\d{4})").expect("regex: eu date"));

/// Guess the field delimiter from the first sampled non-empty lines.
///
/// A candidate counts as consistent when every sampled line splits into
/// the same number of fields and that number is at least two. Among
/// consistent candidates the widest wins; a full tie prefers comma, then
/// semicolon, then tab. No consistent candidate falls back to comma.
pub fn detect_separator(text: &str) -> char {
    let sample: Vec<&str> = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();

    if sample.is_empty() {
        return FALLBACK_SEPARATOR;
    }

    let mut best: Option<(char, usize)> = None;
    for candidate in CANDIDATES {
        let counts: Vec<usize> = sample
            .iter()
            .map(|line| line.split(candidate).count())
            .collect();
        let width = counts[0];
        let consistent = width >= 2 && counts.iter().all(|count| *count == width);
        if consistent && best.map_or(true, |(_, best_width)| width > best_width) {
            best = Some((candidate, width));
        }
    }

    match best {
        Some((separator, _)) => separator,
        None => {
            tracing::debug!("no consistent delimiter in sample, assuming comma");
            FALLBACK_SEPARATOR
        }
    }
}

/// Extract a date embedded in a feed filename.
///
/// Conventions are tried in order: `YYYY-MM-DD`, `YYYYMMDD`, `MM-DD-YYYY`
/// (slashes too), `DD.MM.YYYY`. The first match that forms a real
/// calendar date wins; anything else is `None`.
pub fn detect_filename_timestamp(filename: &str) -> Option<NaiveDate> {
    for caps in ISO_DASHED.captures_iter(filename) {
        if let Some(date) = date_from(&caps, 1, 2, 3) {
            return Some(date);
        }
    }
    for caps in ISO_COMPACT.captures_iter(filename) {
        if let Some(date) = date_from(&caps, 1, 2, 3) {
            return Some(date);
        }
    }
    for caps in US_SLASHED.captures_iter(filename) {
        if let Some(date) = date_from(&caps, 3, 1, 2) {
            return Some(date);
        }
    }
    for caps in EU_DOTTED.captures_iter(filename) {
        if let Some(date) = date_from(&caps, 3, 2, 1) {
            return Some(date);
        }
    }
    None
}

fn date_from(caps: &Captures<'_>, year: usize, month: usize, day: usize) -> Option<NaiveDate> {
    let year: i32 = caps.get(year)?.as_str().parse().ok()?;
    let month: u32 = caps.get(month)?.as_str().parse().ok()?;
    let day: u32 = caps.get(day)?.as_str().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Run both detectors over one file.
pub fn detect(text: &str, filename: &str) -> DetectedMeta {
    DetectedMeta {
        separator: detect_separator(text),
        timestamp: detect_filename_timestamp(filename),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_comma() {
        let text = "stock,make,model\nA1,Honda,Civic\nA2,Ford,F-150";
        assert_eq!(detect_separator(text), ',');
    }

    #[test]
    fn test_detect_semicolon() {
        let text = "stock;make;model\nA1;Honda;Civic";
        assert_eq!(detect_separator(text), ';');
    }

    #[test]
    fn test_detect_tab() {
        let text = "stock\tmake\tmodel\nA1\tHonda\tCivic";
        assert_eq!(detect_separator(text), '\t');
    }

    #[test]
    fn test_detect_prefers_widest_consistent_candidate() {
        // Semicolon splits into three fields on every line, comma into two.
        let text = "a;b;c,x\nd;e;f,y";
        assert_eq!(detect_separator(text), ';');
    }

    #[test]
    fn test_detect_tie_prefers_comma() {
        let text = "a,b;c\nd,e;f";
        assert_eq!(detect_separator(text), ',');
    }

    #[test]
    fn test_detect_falls_back_to_comma() {
        let text = "a,b\nc\nd,e,f";
        assert_eq!(detect_separator(text), ',');
    }

    #[test]
    fn test_detect_empty_text_falls_back() {
        assert_eq!(detect_separator(""), ',');
        assert_eq!(detect_separator("\n\n"), ',');
    }

    #[test]
    fn test_detect_skips_blank_lines() {
        let text = "\n\nstock;make\n\nA1;Honda\n";
        assert_eq!(detect_separator(text), ';');
    }

    #[test]
    fn test_detect_samples_leading_lines_only() {
        // Ten consistent semicolon lines, then a line that would break it.
        let mut text = String::new();
        for i in 0..10 {
            text.push_str(&format!("a{i};b{i}\n"));
        }
        text.push_str("garbage,with,commas,only\n");
        assert_eq!(detect_separator(&text), ';');
    }

    #[test]
    fn test_detect_is_idempotent() {
        let text = "stock;make;model\nA1;Honda;Civic";
        let first = detect_separator(text);
        let second = detect_separator(text);
        assert_eq!(first, second);
    }

    #[test]
    fn test_timestamp_iso_dashed() {
        assert_eq!(
            detect_filename_timestamp("inventory-2024-01-15.csv"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn test_timestamp_iso_compact() {
        assert_eq!(
            detect_filename_timestamp("inventory_20240115.csv"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn test_timestamp_us_dashed_and_slashed() {
        assert_eq!(
            detect_filename_timestamp("feed-01-15-2024.csv"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(
            detect_filename_timestamp("feed 1/5/2024.csv"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
    }

    #[test]
    fn test_timestamp_eu_dotted() {
        assert_eq!(
            detect_filename_timestamp("stock_31.12.2024.csv"),
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
    }

    #[test]
    fn test_timestamp_none_for_plain_name() {
        assert_eq!(detect_filename_timestamp("inventory.csv"), None);
        assert_eq!(detect_filename_timestamp("feed_v2.csv"), None);
    }

    #[test]
    fn test_timestamp_skips_impossible_dates() {
        // The dashed match is not a real date; the compact one is.
        assert_eq!(
            detect_filename_timestamp("feed-2024-13-40_20240115.csv"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        assert_eq!(detect_filename_timestamp("feed-2024-13-40.csv"), None);
    }

    #[test]
    fn test_timestamp_iso_wins_over_us() {
        assert_eq!(
            detect_filename_timestamp("2024-01-15_01-02-2024.csv"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn test_detect_combines_both() {
        let meta = detect("a;b\nc;d", "lot_2024-06-01.csv");
        assert_eq!(meta.separator, ';');
        assert_eq!(meta.timestamp, NaiveDate::from_ymd_opt(2024, 6, 1));
    }
}
