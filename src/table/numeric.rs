use crate::data::Field;
use crate::table::column::Column;
use crate::table::error::TableError;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

//date layouts accepted besides rfc3339, tried in order
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m-%d-%Y"];

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

//parses a numeric field, accepting a leading currency symbol and thousands separators
pub fn parse_decimal(column: Column, field: &Field) -> Result<f64, TableError> {
    match field {
        Field::Number(value) if value.is_finite() => Ok(*value),
        Field::Number(value) => Err(TableError::MalformedNumericField {
            column,
            value: value.to_string(),
        }),
        Field::Text(text) => parse_decimal_text(column, text),
    }
}

pub fn parse_decimal_text(column: Column, text: &str) -> Result<f64, TableError> {
    let malformed = || TableError::MalformedNumericField {
        column,
        value: text.to_string(),
    };

    let cleaned = normalize_decimal(text).ok_or_else(malformed)?;

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(malformed()),
    }
}

//reduces `[-+][$]digits[,ddd]*[.digits]` (sign may also follow the `$`) to plain
//decimal text; any other shape is rejected rather than guessed at
fn normalize_decimal(text: &str) -> Option<String> {
    let mut rest = text.trim();
    let mut negative = false;

    if let Some(unsigned) = rest.strip_prefix('-') {
        negative = true;
        rest = unsigned;
    } else if let Some(unsigned) = rest.strip_prefix('+') {
        rest = unsigned;
    }

    rest = rest.strip_prefix('$').unwrap_or(rest);

    if !negative {
        if let Some(unsigned) = rest.strip_prefix('-') {
            negative = true;
            rest = unsigned;
        }
    }

    let (integer, fraction) = match rest.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rest, None),
    };

    if integer.is_empty() && fraction.map_or(true, str::is_empty) {
        return None;
    }

    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());

    //commas are only valid as thousands separators in the integer part
    let groups: Vec<&str> = integer.split(',').collect();
    if groups.len() > 1 {
        let leading_ok = !groups[0].is_empty() && groups[0].len() <= 3;
        if !leading_ok || groups[1..].iter().any(|group| group.len() != 3) {
            return None;
        }
    }
    if !groups.iter().all(|group| all_digits(group)) {
        return None;
    }
    if !fraction.map_or(true, all_digits) {
        return None;
    }

    let mut cleaned = String::with_capacity(rest.len() + 1);
    if negative {
        cleaned.push('-');
    }
    cleaned.extend(groups);
    if let Some(fraction) = fraction {
        cleaned.push('.');
        cleaned.push_str(fraction);
    }
    Some(cleaned)
}

//lenient variant for display-only figures (financials, coordinates)
pub fn parse_number(field: &Field) -> Option<f64> {
    parse_decimal(Column::Volume, field).ok()
}

//chrono's %Y also takes one or two digit years, which would turn 12/31/19 into year 19
fn with_full_year(date: NaiveDate) -> Option<NaiveDate> {
    (1000..=9999).contains(&date.year()).then_some(date)
}

//parses a calendar date from the formats the history endpoint has been seen to use
pub fn parse_date(raw: &str) -> Result<NaiveDate, TableError> {
    let trimmed = raw.trim();

    for format in DATE_FORMATS {
        if let Some(date) = NaiveDate::parse_from_str(trimmed, format)
            .ok()
            .and_then(with_full_year)
        {
            return Ok(date);
        }
    }

    if let Some(date) = DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .and_then(|timestamp| with_full_year(timestamp.date_naive()))
    {
        return Ok(date);
    }

    for format in DATETIME_FORMATS {
        if let Some(date) = NaiveDateTime::parse_from_str(trimmed, format)
            .ok()
            .and_then(|timestamp| with_full_year(timestamp.date()))
        {
            return Ok(date);
        }
    }

    Err(TableError::MalformedDate {
        value: raw.to_string(),
    })
}
