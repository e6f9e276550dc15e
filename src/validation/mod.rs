//! The one place where values are checked against column types.
//!
//! Anything that ingests a value, be it a table validating a row, the loader
//! reading a document or the shell reading a command, goes through these
//! functions. Nothing here has side effects; the same input always yields the
//! same outcome.
//!
//! | type           | accepted input                               |
//! |----------------|----------------------------------------------|
//! | `Integer`      | base-10 whole number fitting an `i64`        |
//! | `Real`         | finite decimal number, `.` as the separator  |
//! | `Char`         | exactly one character                        |
//! | `String`       | any text, kept verbatim                      |
//! | `Date`         | `yyyy-MM-dd`                                 |
//! | `DateInterval` | `yyyy-MM-dd - yyyy-MM-dd`, start before end  |

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::persistence::{DataType, DateInterval, Value};

/// The pattern every date is parsed with and written back in.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The separator between the two halves of a [`DataType::DateInterval`].
pub const INTERVAL_SEPARATOR: &str = " - ";

pub fn expected_shape(data_type: DataType) -> &'static str {
    //! A short human description of what `data_type` accepts, used in
    //! error messages and the shell's help.

    match data_type {
        DataType::Integer => "a whole number",
        DataType::Real => "a decimal number",
        DataType::Char => "exactly one character",
        DataType::String => "any text",
        DataType::Date => "yyyy-MM-dd",
        DataType::DateInterval => "yyyy-MM-dd - yyyy-MM-dd",
    }
}

fn parse_error(raw: &str, data_type: DataType) -> ValidationError {
    ValidationError::Parse {
        raw: raw.to_string(),
        data_type,
        expected: expected_shape(data_type),
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    // chrono accepts unpadded months and days, the canonical form does not.
    let trimmed = raw.trim();
    let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()?;
    (date.format(DATE_FORMAT).to_string() == trimmed).then_some(date)
}

pub fn parse(raw: &str, data_type: DataType) -> Result<Value, ValidationError> {
    //! Parse raw text into the canonical [`Value`] for `data_type`.

    match data_type {
        DataType::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|_| parse_error(raw, data_type)),
        DataType::Real => match raw.trim().parse::<f64>() {
            Ok(real) if real.is_finite() => Ok(Value::Real(real)),
            _ => Err(parse_error(raw, data_type)),
        },
        DataType::Char => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Ok(Value::Char(c)),
                _ => Err(parse_error(raw, data_type)),
            }
        }
        DataType::String => Ok(Value::String(raw.to_string())),
        DataType::Date => parse_date(raw)
            .map(Value::Date)
            .ok_or_else(|| parse_error(raw, data_type)),
        DataType::DateInterval => parse_interval(raw).map(Value::DateInterval),
    }
}

pub fn parse_interval(raw: &str) -> Result<DateInterval, ValidationError> {
    let parts: Vec<&str> = raw.split(INTERVAL_SEPARATOR).collect();
    let [start, end] = parts.as_slice() else {
        return Err(parse_error(raw, DataType::DateInterval));
    };

    let (Some(start), Some(end)) = (parse_date(start), parse_date(end)) else {
        return Err(parse_error(raw, DataType::DateInterval));
    };

    DateInterval::new(start, end).ok_or_else(|| ValidationError::InvertedInterval {
        raw: raw.to_string(),
    })
}

pub fn coerce(value: &Value, data_type: DataType) -> Result<Value, ValidationError> {
    //! Check an in-memory value against `data_type`, returning its canonical
    //! form.
    //!
    //! A value of the matching variant is kept as is. Raw text held in a
    //! [`Value::String`] is parsed with [`parse`]. The only widenings are
    //! `Integer` into `Real` and `Char` into `String`.

    match (value, data_type) {
        (Value::Integer(_), DataType::Integer)
        | (Value::Char(_), DataType::Char)
        | (Value::String(_), DataType::String)
        | (Value::Date(_), DataType::Date)
        | (Value::DateInterval(_), DataType::DateInterval) => Ok(value.clone()),
        (Value::Real(real), DataType::Real) if real.is_finite() => Ok(value.clone()),
        (Value::Integer(integer), DataType::Real) => Ok(Value::Real(*integer as f64)),
        (Value::Char(c), DataType::String) => Ok(Value::String(c.to_string())),
        (Value::String(raw), _) => parse(raw, data_type),
        (other, _) => Err(parse_error(&other.to_string(), data_type)),
    }
}

pub fn from_json(json: &serde_json::Value, data_type: DataType) -> Result<Value, ValidationError> {
    //! Read a value out of a persisted document. The document does not carry
    //! types next to values, so the field's `data_type` decides.

    match (json, data_type) {
        (serde_json::Value::Number(number), DataType::Integer) => number
            .as_i64()
            .map(Value::Integer)
            .ok_or_else(|| parse_error(&number.to_string(), data_type)),
        (serde_json::Value::Number(number), DataType::Real) => number
            .as_f64()
            .map(Value::Real)
            .ok_or_else(|| parse_error(&number.to_string(), data_type)),
        (serde_json::Value::String(raw), _) => parse(raw, data_type),
        (other, _) => Err(parse_error(&other.to_string(), data_type)),
    }
}
