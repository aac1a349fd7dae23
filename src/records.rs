use serde::Deserialize;

/// One data row of the verses CSV: numeric index, human-readable reference,
/// and the verse text itself. Fields are positional, so the names in the
/// CSV header row do not matter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerseRecord {
    pub index: i32,
    pub reference: String,
    pub verse: String,
}

impl VerseRecord {
    /// Decode a raw CSV row by field position.
    pub fn from_csv_row(row: &csv::StringRecord) -> Result<Self, csv::Error> {
        row.deserialize(None)
    }
}
