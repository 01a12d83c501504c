use crate::table::column::Column;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TableError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Malformed numeric value '{value}' in column {column}")]
    MalformedNumericField { column: Column, value: String },
    #[error("Malformed date '{value}', expected YYYY-MM-DD")]
    MalformedDate { value: String },
}

impl TableError {
    pub(crate) fn missing_field(column: Column, index: usize) -> Self {
        TableError::InvalidInput(format!("record {} is missing the {} field", index, column))
    }
}
