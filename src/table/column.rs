use crate::data::Record;
use crate::table::error::TableError;
use crate::table::numeric::{parse_date, parse_decimal};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

//identifies a column of the price history table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Date,
    Open,
    Close,
    Low,
    High,
    Volume,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Date,
        Column::Open,
        Column::Close,
        Column::Low,
        Column::High,
        Column::Volume,
    ];

    //columns that carry summary statistics
    pub const NUMERIC: [Column; 5] = [
        Column::Open,
        Column::Close,
        Column::Low,
        Column::High,
        Column::Volume,
    ];

    //parse column identifier from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "date" => Some(Column::Date),
            "open" => Some(Column::Open),
            "close" => Some(Column::Close),
            "low" => Some(Column::Low),
            "high" => Some(Column::High),
            "volume" | "vol" => Some(Column::Volume),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Column::Date => "date",
            Column::Open => "open",
            Column::Close => "close",
            Column::Low => "low",
            Column::High => "high",
            Column::Volume => "volume",
        }
    }

    //header text for display only; never used to pick comparison rules
    pub fn label(self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::Open => "Open",
            Column::Close => "Close",
            Column::Low => "Low",
            Column::High => "High",
            Column::Volume => "Volume",
        }
    }

    //parsed numeric value of this column for one record
    pub fn value(self, record: &Record, index: usize) -> Result<f64, TableError> {
        let field = match self {
            Column::Date => {
                return Err(TableError::InvalidInput(
                    "date is not a numeric column".to_string(),
                ))
            }
            Column::Open => record.open.as_ref(),
            Column::Close => record.close.as_ref(),
            Column::Low => record.low.as_ref(),
            Column::High => record.high.as_ref(),
            Column::Volume => record.volume.as_ref(),
        };

        let field = field.ok_or_else(|| TableError::missing_field(self, index))?;
        parse_decimal(self, field)
    }

    //comparable key of this column for one record
    pub fn key(self, record: &Record, index: usize) -> Result<SortKey, TableError> {
        match self {
            Column::Date => {
                let raw = record
                    .date
                    .as_deref()
                    .ok_or_else(|| TableError::missing_field(self, index))?;
                Ok(SortKey::Date(parse_date(raw)?))
            }
            _ => Ok(SortKey::Number(self.value(record, index)?)),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//a parsed, totally ordered column value
#[derive(Debug, Clone, Copy)]
pub enum SortKey {
    Date(NaiveDate),
    Number(f64),
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Date(a), SortKey::Date(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            //a single column never mixes kinds; dates first keeps the order total
            (SortKey::Date(_), SortKey::Number(_)) => Ordering::Less,
            (SortKey::Number(_), SortKey::Date(_)) => Ordering::Greater,
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_columns() {
        assert_eq!(Column::parse("Open"), Some(Column::Open));
        assert_eq!(Column::parse(" volume "), Some(Column::Volume));
        assert_eq!(Column::parse("vol"), Some(Column::Volume));
        assert_eq!(Column::parse("price"), None);

        for column in Column::ALL {
            assert_eq!(Column::parse(column.as_str()), Some(column));
        }
    }

    #[test]
    fn value_reports_missing_fields() {
        let record = Record {
            date: Some("2020-01-01".to_string()),
            ..Record::default()
        };

        let err = Column::Close.value(&record, 3).unwrap_err();
        assert_eq!(
            err,
            TableError::InvalidInput("record 3 is missing the close field".to_string())
        );
    }

    #[test]
    fn keys_compare_by_parsed_value() {
        let a = Record::new("2020-01-09", 9.5, 0.0, 0.0, 0.0, "$900");
        let b = Record::new("2020-01-10", 10.0, 0.0, 0.0, 0.0, "$1,000");

        assert!(Column::Date.key(&a, 0).unwrap() < Column::Date.key(&b, 1).unwrap());
        assert!(Column::Open.key(&a, 0).unwrap() < Column::Open.key(&b, 1).unwrap());
        assert!(Column::Volume.key(&a, 0).unwrap() < Column::Volume.key(&b, 1).unwrap());
    }
}
