pub mod column;
pub mod error;
pub mod numeric;
pub mod sort;
pub mod summary;

pub use column::{Column, SortKey};
pub use error::TableError;
pub use numeric::{parse_date, parse_decimal};
pub use sort::{sort_by, SortState};
pub use summary::{summarize, ColumnSummary, Summary};

use crate::data::Record;
use chrono::NaiveDate;

//price history of a single company, held for as long as that company is displayed
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesTable {
    records: Vec<Record>,
}

impl TimeSeriesTable {
    //creates a table; an empty history is rejected
    pub fn new(records: Vec<Record>) -> Result<Self, TableError> {
        if records.is_empty() {
            return Err(TableError::InvalidInput(
                "price history contains no records".to_string(),
            ));
        }
        Ok(TimeSeriesTable { records })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn sorted_by(&self, column: Column) -> Result<Vec<Record>, TableError> {
        sort_by(&self.records, column)
    }

    pub fn summarize(&self) -> Result<Summary, TableError> {
        summarize(&self.records)
    }

    //earliest and latest parsed dates
    pub fn date_range(&self) -> Result<(NaiveDate, NaiveDate), TableError> {
        let mut dates = self
            .records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .date
                    .as_deref()
                    .ok_or_else(|| TableError::missing_field(Column::Date, index))
                    .and_then(parse_date)
            });

        let first = dates.next().ok_or_else(|| {
            TableError::InvalidInput("price history contains no records".to_string())
        })??;

        dates.try_fold((first, first), |(earliest, latest), date| {
            let date = date?;
            Ok::<_, TableError>((earliest.min(date), latest.max(date)))
        })
    }
}
