use crate::data::Record;
use crate::table::column::Column;
use crate::table::error::TableError;
use serde::{Deserialize, Serialize};

//returns a new vector holding `records` in ascending order of `column`
//
//every key is parsed before any reordering, so a malformed field fails the
//whole call and the caller never sees a partially sorted table. equal keys
//keep their input order
pub fn sort_by(records: &[Record], column: Column) -> Result<Vec<Record>, TableError> {
    if records.is_empty() {
        return Err(TableError::InvalidInput(
            "cannot sort an empty record sequence".to_string(),
        ));
    }

    let mut keyed = records
        .iter()
        .enumerate()
        .map(|(index, record)| column.key(record, index).map(|key| (key, index)))
        .collect::<Result<Vec<_>, _>>()?;

    keyed.sort_by(|a, b| a.0.cmp(&b.0));

    Ok(keyed
        .into_iter()
        .map(|(_, index)| records[index].clone())
        .collect())
}

//column currently ordering a displayed table; ordering is always ascending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: Column,
}

impl SortState {
    pub fn new(column: Column) -> Self {
        SortState { column }
    }

    pub fn apply(&self, records: &[Record]) -> Result<Vec<Record>, TableError> {
        sort_by(records, self.column)
    }
}

impl Default for SortState {
    fn default() -> Self {
        SortState::new(Column::Date)
    }
}
