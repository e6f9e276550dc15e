use std::fmt::Display;

use indexmap::IndexMap;
use serde::Serialize;

use super::schema::Field;
use super::value::Value;
use crate::validation;

/// One record of a [`super::Table`]: a mapping of field names to values.
///
/// Keys keep their insertion order so a stored row serializes in field
/// declaration order, but equality ignores order. Two rows are equal when they
/// hold the same keys and every value compares equal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Row {
    values: IndexMap<String, Value>,
}

impl Row {
    pub fn new() -> Row {
        Row {
            values: IndexMap::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Row {
        //! Builder style insert, handy for assembling a row in one expression.

        self.values.insert(name.into(), value.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.values.insert(name.into(), value.into())
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.values.shift_remove(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn equivalent(&self, other: &Row, fields: &[Field]) -> bool {
        //! Compare two rows through the eyes of a schema.
        //!
        //! Each declared field must be present in both rows and both values
        //! must canonicalize under the field's type to the same value, so a
        //! raw `"2024-01-01"` equals a stored date. Keys outside `fields`
        //! are ignored.

        fields.iter().all(|field| {
            let (Some(left), Some(right)) = (self.get(&field.name), other.get(&field.name)) else {
                return false;
            };

            match (
                validation::coerce(left, field.data_type),
                validation::coerce(right, field.data_type),
            ) {
                (Ok(left), Ok(right)) => left == right,
                _ => false,
            }
        })
    }

    pub(super) fn rename_key(&mut self, old_name: &str, new_name: &str) {
        //! Move the value stored under `old_name` to `new_name`, keeping its
        //! position among the other keys.

        if !self.values.contains_key(old_name) {
            return;
        }

        self.values = std::mem::take(&mut self.values)
            .into_iter()
            .map(|(name, value)| {
                if name == old_name {
                    (new_name.to_string(), value)
                } else {
                    (name, value)
                }
            })
            .collect();
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Row {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let row: Vec<String> = self.values.values().map(|value| value.to_string()).collect();
        write!(f, "{}", row.join(" | "))
    }
}
