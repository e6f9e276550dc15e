use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// The closed set of column types a [`Field`] may declare.
///
/// A datatype decides how a raw value is parsed and checked by
/// [`crate::validation`], never how it is stored on disk. Everything on disk
/// is either a JSON number or text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Integer,
    Real,
    Char,
    String,
    Date,
    DateInterval,
}

impl DataType {
    pub const ALL: [DataType; 6] = [
        DataType::Integer,
        DataType::Real,
        DataType::Char,
        DataType::String,
        DataType::Date,
        DataType::DateInterval,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DataType::Integer => "Integer",
            DataType::Real => "Real",
            DataType::Char => "Char",
            DataType::String => "String",
            DataType::Date => "Date",
            DataType::DateInterval => "DateInterval",
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DataType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        //! Parse a datatype name, ignoring case. The short aliases `int`,
        //! `float`, `text` and `interval` are accepted as well.

        let datatype = match s.trim().to_lowercase().as_str() {
            "integer" | "int" => DataType::Integer,
            "real" | "float" => DataType::Real,
            "char" => DataType::Char,
            "string" | "text" => DataType::String,
            "date" => DataType::Date,
            "dateinterval" | "interval" => DataType::DateInterval,
            other => {
                return Err(format!("invalid datatype {}: not supported", other));
            }
        };
        Ok(datatype)
    }
}

/// A named, typed column of a [`super::Table`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub(super) name: String,
    #[serde(rename = "type")]
    pub(super) data_type: DataType,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Field {
        Field {
            name: name.into(),
            data_type,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.data_type)
    }
}

/// How table and field names are compared when checking uniqueness and
/// looking them up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NameMatching {
    #[default]
    Exact,
    IgnoreCase,
}

impl NameMatching {
    pub fn matches(&self, left: &str, right: &str) -> bool {
        match self {
            NameMatching::Exact => left == right,
            NameMatching::IgnoreCase => left.to_lowercase() == right.to_lowercase(),
        }
    }
}

impl FromStr for NameMatching {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "exact" => Ok(NameMatching::Exact),
            "ignore-case" | "ignore_case" | "ignorecase" => Ok(NameMatching::IgnoreCase),
            other => Err(format!(
                "invalid name matching {}: expected exact or ignore-case",
                other
            )),
        }
    }
}

/// What a [`super::Table`] does with row keys that name no declared field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExtraKeys {
    /// Leave them out of the stored row.
    #[default]
    Drop,
    /// Fail validation on the first one.
    Reject,
}

impl FromStr for ExtraKeys {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drop" => Ok(ExtraKeys::Drop),
            "reject" => Ok(ExtraKeys::Reject),
            other => Err(format!(
                "invalid extra keys policy {}: expected drop or reject",
                other
            )),
        }
    }
}

/// The deployment-level choices a [`super::Database`] hands down to each of
/// its tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchemaPolicy {
    pub names: NameMatching,
    pub extra_keys: ExtraKeys,
}
