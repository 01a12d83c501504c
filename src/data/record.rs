use serde::{Deserialize, Serialize};
use std::fmt;

//a raw field value as the api supplies it: a json number or (possibly currency formatted) text
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Field {
    Number(f64),
    Text(String),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Number(value) => write!(f, "{}", value),
            Field::Text(text) => f.write_str(text),
        }
    }
}

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        Field::Number(value)
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::Text(value.to_string())
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::Text(value)
    }
}

//represents a single trading day of price history for one company
//
//fields stay optional and unparsed here; the table engine validates them when
//it needs a comparable or numeric value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Record {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub close: Option<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Field>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<Field>,
}

impl Record {
    //creates a fully populated record
    pub fn new(
        date: impl Into<String>,
        open: impl Into<Field>,
        close: impl Into<Field>,
        low: impl Into<Field>,
        high: impl Into<Field>,
        volume: impl Into<Field>,
    ) -> Self {
        Record {
            date: Some(date.into()),
            open: Some(open.into()),
            close: Some(close.into()),
            low: Some(low.into()),
            high: Some(high.into()),
            volume: Some(volume.into()),
        }
    }
}
