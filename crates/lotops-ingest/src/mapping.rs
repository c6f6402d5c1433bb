use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Fixed vehicle-attribute schema that header columns map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TargetField {
    StockNumber,
    Vin,
    Make,
    Model,
    Trim,
    Year,
    Mileage,
    Price,
    Msrp,
    Status,
    AgeDays,
    Location,
    Certified,
    Leads,
    MarketDaySupply,
}

impl TargetField {
    pub const ALL: [TargetField; 15] = [
        TargetField::StockNumber,
        TargetField::Vin,
        TargetField::Make,
        TargetField::Model,
        TargetField::Trim,
        TargetField::Year,
        TargetField::Mileage,
        TargetField::Price,
        TargetField::Msrp,
        TargetField::Status,
        TargetField::AgeDays,
        TargetField::Location,
        TargetField::Certified,
        TargetField::Leads,
        TargetField::MarketDaySupply,
    ];

    /// Snake-case name as it appears in summaries and rejection reasons.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetField::StockNumber => "stock_number",
            TargetField::Vin => "vin",
            TargetField::Make => "make",
            TargetField::Model => "model",
            TargetField::Trim => "trim",
            TargetField::Year => "year",
            TargetField::Mileage => "mileage",
            TargetField::Price => "price",
            TargetField::Msrp => "msrp",
            TargetField::Status => "status",
            TargetField::AgeDays => "age_days",
            TargetField::Location => "location",
            TargetField::Certified => "certified",
            TargetField::Leads => "leads",
            TargetField::MarketDaySupply => "market_day_supply",
        }
    }

    /// Rows missing any of these classify invalid.
    pub fn is_required(&self) -> bool {
        matches!(
            self,
            TargetField::StockNumber | TargetField::Make | TargetField::Model
        )
    }

    /// Accepted header spellings, stored pre-normalized.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            TargetField::StockNumber => &["stocknumber", "stock", "stock#", "stockno", "stocknum"],
            TargetField::Vin => &["vin", "vin#", "vinnumber", "serialnumber"],
            TargetField::Make => &["make", "manufacturer", "brand"],
            TargetField::Model => &["model"],
            TargetField::Trim => &["trim", "trimlevel", "series"],
            TargetField::Year => &["year", "modelyear", "yr"],
            TargetField::Mileage => &["mileage", "miles", "odometer", "odometerreading"],
            TargetField::Price => &[
                "price",
                "listprice",
                "sellingprice",
                "askingprice",
                "internetprice",
            ],
            TargetField::Msrp => &["msrp", "sticker", "stickerprice", "retailprice"],
            TargetField::Status => &["status", "inventorystatus", "vehiclestatus"],
            TargetField::AgeDays => &["age", "agedays", "daysinstock", "dis"],
            TargetField::Location => &["location", "lot", "lotlocation"],
            TargetField::Certified => &["certified", "cpo", "iscertified", "certifiedpreowned"],
            TargetField::Leads => &["leads", "leadcount", "totalleads"],
            TargetField::MarketDaySupply => &[
                "marketdaysupply",
                "mds",
                "daysupply",
                "marketdayssupply",
            ],
        }
    }
}

impl Display for TargetField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// Resolved target-field to source-column mapping for one header row.
///
/// Targets with no matching column are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMapping {
    columns: BTreeMap<TargetField, usize>,
}

impl ColumnMapping {
    pub fn column(&self, field: TargetField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TargetField, usize)> + '_ {
        self.columns.iter().map(|(field, index)| (*field, *index))
    }

    /// Mapping keyed by field name, the shape retained in import summaries.
    pub fn by_name(&self) -> BTreeMap<String, usize> {
        self.columns
            .iter()
            .map(|(field, index)| (field.as_str().to_string(), *index))
            .collect()
    }
}

/// Lowercase a header cell and drop whitespace, underscores and hyphens,
/// so `Stock Number`, `STOCK_NUMBER` and `stocknumber` all compare equal.
pub fn normalize_header(cell: &str) -> String {
    cell.chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Match a header row against the target schema.
///
/// Matching is case-insensitive and tolerant of spaces, underscores and
/// hyphens. Unmatched targets are left out of the mapping; duplicate
/// matches keep the leftmost column.
pub fn map_header(header: &[String]) -> ColumnMapping {
    let mut columns = BTreeMap::new();

    for (index, cell) in header.iter().enumerate() {
        let normalized = normalize_header(cell);
        if normalized.is_empty() {
            continue;
        }
        for field in TargetField::ALL {
            if field.aliases().contains(&normalized.as_str()) {
                columns.entry(field).or_insert(index);
                break;
            }
        }
    }

    ColumnMapping { columns }
}
