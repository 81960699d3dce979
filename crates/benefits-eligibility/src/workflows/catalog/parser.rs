use csv::{ByteRecord, StringRecord};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use tracing::debug;

use super::CatalogError;

const NAME_HEADERS: [&str; 2] = ["Program Name", "Program"];

/// One spreadsheet row with every cell read as text. Absent columns and
/// blank cells become empty strings.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ProgramRow {
    #[serde(rename = "Program Name", alias = "Program", default)]
    pub(crate) name: String,
    #[serde(rename = "Administering Agency", alias = "Agency", default)]
    pub(crate) agency: String,
    #[serde(rename = "Description", default)]
    pub(crate) description: String,
    #[serde(rename = "Application Link", alias = "Link", default)]
    pub(crate) application_link: String,
    #[serde(rename = "Last Updated", default)]
    pub(crate) last_updated: String,
    #[serde(rename = "Eligibility Criteria", alias = "Eligibility", default)]
    pub(crate) eligibility_criteria: String,
    #[serde(rename = "Update Source URLs", alias = "Update Sources", default)]
    pub(crate) update_sources: String,
    #[serde(
        rename = "Eligibility Tags",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub(crate) tags: Option<String>,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<ProgramRow>, CatalogError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = decode_record(csv_reader.byte_headers()?);
    if !headers.iter().any(|header| NAME_HEADERS.contains(&header)) {
        return Err(CatalogError::MissingNameColumn);
    }

    let mut rows = Vec::new();
    for (index, record) in csv_reader.byte_records().enumerate() {
        let record = record?;
        if record.iter().any(|field| std::str::from_utf8(field).is_err()) {
            debug!(row = index + 1, "catalog row has invalid UTF-8; replacing bad bytes");
        }

        let mut record = decode_record(&record);
        record.truncate(headers.len());
        while record.len() < headers.len() {
            record.push_field("");
        }
        rows.push(record.deserialize::<ProgramRow>(Some(&headers))?);
    }

    Ok(rows)
}

/// Cells are decoded lossily so one bad byte never costs the whole sheet.
fn decode_record(record: &ByteRecord) -> StringRecord {
    record
        .iter()
        .map(|field| String::from_utf8_lossy(field).trim().to_string())
        .collect()
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn missing_columns_read_as_empty_strings() {
        let rows = parse_rows(Cursor::new("Program Name,Description\nIHSS,In-home care\n"))
            .expect("rows parse");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "IHSS");
        assert_eq!(rows[0].eligibility_criteria, "");
        assert!(rows[0].tags.is_none());
    }

    #[test]
    fn short_rows_are_tolerated() {
        let rows = parse_rows(Cursor::new(
            "Program Name,Administering Agency,Eligibility Criteria\nCalFresh,SSA\n",
        ))
        .expect("rows parse");
        assert_eq!(rows[0].agency, "SSA");
        assert_eq!(rows[0].eligibility_criteria, "");
    }

    #[test]
    fn trailing_cells_may_be_missing_entirely() {
        let rows = parse_rows(Cursor::new(
            "Program Name,Administering Agency,Description,Application Link,Last Updated,Eligibility Criteria,Update Source URLs\n\
WIC,OC Health Care Agency\n\
CalFresh,SSA,Food,,,income,https://www.cdss.ca.gov,extra\n",
        ))
        .expect("rows parse");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "WIC");
        assert_eq!(rows[0].update_sources, "");
        assert_eq!(rows[1].eligibility_criteria, "income");
        assert_eq!(rows[1].update_sources, "https://www.cdss.ca.gov");
    }

    #[test]
    fn invalid_utf8_degrades_instead_of_failing() {
        let bytes: &[u8] =
            b"Program Name,Eligibility Criteria\nWIC,preg\xff\xfenant\nCalFresh,income\n";
        let rows = parse_rows(bytes).expect("rows parse");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "WIC");
        assert!(rows[0].eligibility_criteria.starts_with("preg"));
        assert_eq!(rows[1].name, "CalFresh");
        assert_eq!(rows[1].eligibility_criteria, "income");
    }

    #[test]
    fn sheets_without_a_name_column_are_rejected() {
        let error = parse_rows(Cursor::new("Title,Eligibility Criteria\nIHSS,disabled\n"))
            .expect_err("name column required");
        assert!(matches!(error, CatalogError::MissingNameColumn));
    }
}
