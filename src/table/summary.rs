use crate::data::Record;
use crate::table::column::Column;
use crate::table::error::TableError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

//aggregates of one numeric column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub average: f64,
    pub minimum: f64,
    pub maximum: f64,
    //sample standard deviation; absent for a single record
    pub std_dev: Option<f64>,
}

impl ColumnSummary {
    fn from_values(values: &[f64]) -> Self {
        let minimum = values.iter().copied().fold(f64::INFINITY, f64::min);
        let maximum = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        //rounding in the sum can push the mean of equal values past the extrema
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let average = mean.clamp(minimum, maximum);
        let std_dev = if values.len() > 1 {
            Some(values.std_dev())
        } else {
            None
        };

        ColumnSummary {
            average,
            minimum,
            maximum,
            std_dev,
        }
    }

    pub fn range(&self) -> f64 {
        self.maximum - self.minimum
    }
}

//summary statistics for every numeric column, in display order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub count: usize,
    pub columns: IndexMap<Column, ColumnSummary>,
}

impl Summary {
    pub fn get(&self, column: Column) -> Option<&ColumnSummary> {
        self.columns.get(&column)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Column, &ColumnSummary)> {
        self.columns.iter()
    }
}

//computes average, minimum and maximum for open, close, low, high and volume
pub fn summarize(records: &[Record]) -> Result<Summary, TableError> {
    if records.is_empty() {
        return Err(TableError::InvalidInput(
            "cannot summarize an empty record sequence".to_string(),
        ));
    }

    let mut columns = IndexMap::with_capacity(Column::NUMERIC.len());

    for column in Column::NUMERIC {
        let values = records
            .iter()
            .enumerate()
            .map(|(index, record)| column.value(record, index))
            .collect::<Result<Vec<f64>, _>>()?;

        columns.insert(column, ColumnSummary::from_values(&values));
    }

    Ok(Summary {
        count: records.len(),
        columns,
    })
}
