use crate::data::company::Company;
use crate::data::record::{Field, Record};
use anyhow::{Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;

//flat csv row; every cell is kept as text and parsed later by the table engine
#[derive(Debug, Deserialize, Serialize)]
struct CsvRecord {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    open: Option<String>,
    #[serde(default)]
    close: Option<String>,
    #[serde(default)]
    low: Option<String>,
    #[serde(default)]
    high: Option<String>,
    #[serde(default)]
    volume: Option<String>,
}

impl From<CsvRecord> for Record {
    fn from(row: CsvRecord) -> Self {
        let cell = |value: Option<String>| {
            value
                .filter(|text| !text.trim().is_empty())
                .map(Field::Text)
        };

        Record {
            date: row.date.filter(|text| !text.trim().is_empty()),
            open: cell(row.open),
            close: cell(row.close),
            low: cell(row.low),
            high: cell(row.high),
            volume: cell(row.volume),
        }
    }
}

impl From<&Record> for CsvRecord {
    fn from(record: &Record) -> Self {
        let cell = |value: &Option<Field>| value.as_ref().map(|field| field.to_string());

        CsvRecord {
            date: record.date.clone(),
            open: cell(&record.open),
            close: cell(&record.close),
            low: cell(&record.low),
            high: cell(&record.high),
            volume: cell(&record.volume),
        }
    }
}

//parses a price history json array
pub fn parse_records_json(json: &str) -> Result<Vec<Record>> {
    serde_json::from_str(json).context("Failed to parse price history JSON")
}

//parses a company list json array
pub fn parse_companies_json(json: &str) -> Result<Vec<Company>> {
    serde_json::from_str(json).context("Failed to parse company list JSON")
}

//loads price history from a json or csv file, chosen by extension
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        load_records_csv(path)
    } else {
        let contents = std::fs::read_to_string(path)
            .context(format!("Failed to read price history file: {:?}", path))?;
        parse_records_json(&contents)
    }
}

//loads price history from a csv file with a date,open,close,low,high,volume header
pub fn load_records_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context(format!("Failed to open CSV file: {:?}", path))?;

    let mut records = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let row: CsvRecord =
            result.context(format!("Failed to parse CSV record at line {}", index + 2))?;
        records.push(Record::from(row));
    }

    Ok(records)
}

//loads a company list from a json file
pub fn load_companies<P: AsRef<Path>>(path: P) -> Result<Vec<Company>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .context(format!("Failed to read company file: {:?}", path))?;
    parse_companies_json(&contents)
}

//writes records to csv in their current order, keeping raw field text
pub fn write_records_csv<P: AsRef<Path>>(records: &[Record], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(format!("Failed to create CSV file: {:?}", path))?;

    for record in records {
        writer.serialize(CsvRecord::from(record))?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn csv_cells_become_text_fields() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "date,open,close,low,high,volume").unwrap();
        writeln!(file, "2019-01-02,154.89,157.92,154.11,158.85,\"$37,039,700\"").unwrap();
        writeln!(file, "2019-01-03,143.98,142.19,,145.72,91312200").unwrap();
        file.flush().unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].volume, Some(Field::from("$37,039,700")));
        assert_eq!(records[1].low, None);
        assert_eq!(records[1].open, Some(Field::from("143.98")));
    }

    #[test]
    fn json_file_loads_by_default() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"[{{"date":"2019-01-02","open":1,"close":2,"low":0.5,"high":2.5,"volume":10}}]"#
        )
        .unwrap();
        file.flush().unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records, vec![Record::new("2019-01-02", 1.0, 2.0, 0.5, 2.5, 10.0)]);
    }

    #[test]
    fn csv_export_preserves_order_and_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sorted.csv");
        let records = vec![
            Record::new("2020-01-02", 8.0, 9.0, 7.0, 10.0, "$200"),
            Record::new("2020-01-01", 10.0, 12.0, 9.0, 13.0, "$100"),
        ];

        write_records_csv(&records, &path).unwrap();
        let reloaded = load_records_csv(&path).unwrap();

        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded[0].date.as_deref(), Some("2020-01-02"));
        assert_eq!(reloaded[1].volume, Some(Field::from("$100")));
        assert_eq!(reloaded[0].open, Some(Field::from("8")));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_records_json("{not json").is_err());
        assert!(parse_companies_json("[{\"symbol\": 1}]").is_err());
    }
}
