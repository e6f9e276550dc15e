use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::validation::DATE_FORMAT;

use super::schema::DataType;

/// An inclusive range of calendar dates. The constructor refuses a range that
/// ends before it starts, so every interval held by a row is well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<DateInterval> {
        if start <= end {
            Some(DateInterval { start, end })
        } else {
            None
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Display for DateInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// A single cell of a [`super::Row`].
///
/// One variant per [`DataType`]. Rows accepted by a table only ever hold the
/// variant their field declares; a `String` holding raw text is how user input
/// reaches [`crate::validation::coerce`] before it is checked.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Char(char),
    String(String),
    Date(NaiveDate),
    DateInterval(DateInterval),
}

impl Value {
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Integer(_) => DataType::Integer,
            Value::Real(_) => DataType::Real,
            Value::Char(_) => DataType::Char,
            Value::String(_) => DataType::String,
            Value::Date(_) => DataType::Date,
            Value::DateInterval(_) => DataType::DateInterval,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Integer(value) => write!(f, "{}", value),
            // Shortest text that parses back to the same number.
            Value::Real(value) => write!(f, "{:?}", value),
            Value::Char(value) => write!(f, "{}", value),
            Value::String(value) => write!(f, "{}", value),
            Value::Date(value) => write!(f, "{}", value.format(DATE_FORMAT)),
            Value::DateInterval(value) => write!(f, "{}", value),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        //! Numbers stay numbers, everything else is written in its canonical
        //! text form. Reading a value back needs its field's [`DataType`],
        //! see [`crate::validation::from_json`].

        match self {
            Value::Integer(value) => serializer.serialize_i64(*value),
            Value::Real(value) => serializer.serialize_f64(*value),
            Value::String(value) => serializer.serialize_str(value),
            other => serializer.collect_str(other),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<NaiveDate> for Value {
    fn from(value: NaiveDate) -> Self {
        Value::Date(value)
    }
}

impl From<DateInterval> for Value {
    fn from(value: DateInterval) -> Self {
        Value::DateInterval(value)
    }
}
