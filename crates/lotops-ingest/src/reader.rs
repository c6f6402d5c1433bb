use lotops_core::models::ParsedRow;

/// Split one line on the separator. No quoting rules; dealership feeds
/// are plain delimiter-separated exports.
pub fn split_line(line: &str, separator: char) -> ParsedRow {
    line.split(separator).map(|field| field.to_string()).collect()
}

/// Parsed file body: the header row plus data rows, blank lines dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub header: ParsedRow,
    pub rows: Vec<ParsedRow>,
}

impl CsvTable {
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }
}

/// Split file text into a header row and data rows.
pub fn parse_table(text: &str, separator: char) -> CsvTable {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let header = match lines.next() {
        Some(line) => split_line(line, separator),
        None => return CsvTable::default(),
    };
    let rows = lines.map(|line| split_line(line, separator)).collect();

    CsvTable { header, rows }
}

/// First `limit` parsed rows of the file, header included, for the upload
/// preview shown while a file sits pending.
pub fn preview_rows(text: &str, separator: char, limit: usize) -> Vec<ParsedRow> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .take(limit)
        .map(|line| split_line(line, separator))
        .collect()
}
