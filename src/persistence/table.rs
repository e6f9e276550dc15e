use super::row::Row;
use super::schema::{ExtraKeys, Field, SchemaPolicy};

use std::fmt::Display;

use log::{debug, warn};
use serde::Serialize;

use crate::error::{EngineError, Entity, Result, ViolationReason};
use crate::validation;

/// A named set of [`Field`]s and the [`Row`]s that satisfy them.
///
/// The table is the gatekeeper of its own data: every row goes through
/// [`Table::validate_row`] before it is stored, and what gets stored is the
/// canonical row that validation returns. As a result, every stored row has
/// exactly one value per field, in field order, of the field's type.
///
/// Rows are addressed by position. Positions are not stable identifiers;
/// deleting a row shifts everything after it down by one.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    name: String,
    fields: Vec<Field>,
    rows: Vec<Row>,
    #[serde(skip)]
    pub(super) policy: SchemaPolicy,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Table {
        //! Create an empty table with no fields.

        Table {
            name: name.into(),
            fields: vec![],
            rows: vec![],
            policy: SchemaPolicy::default(),
        }
    }

    pub fn with_fields(name: impl Into<String>, fields: Vec<Field>) -> Result<Table> {
        //! Create a table and declare all of `fields` in order.
        //!
        //! Fails on the first duplicate field name.

        let mut table = Table::new(name);
        for field in fields {
            table.add_field(field)?;
        }
        Ok(table)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn policy(&self) -> SchemaPolicy {
        self.policy
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        //! Look a field up by name under the table's name matching policy.

        self.fields
            .iter()
            .find(|field| self.policy.names.matches(&field.name, name))
    }

    fn field_position(&self, name: &str) -> Option<usize> {
        self.fields
            .iter()
            .position(|field| self.policy.names.matches(&field.name, name))
    }

    pub fn add_field(&mut self, field: Field) -> Result<()> {
        //! Append a field to the schema.
        //!
        //! Fields can only be declared while the table holds no rows, since
        //! existing rows would have no value for the new field.

        if self.field(&field.name).is_some() {
            return Err(EngineError::duplicate(Entity::Field, field.name));
        }

        if !self.rows.is_empty() {
            return Err(EngineError::violation(
                &self.name,
                field.name,
                ViolationReason::Missing,
            ));
        }

        debug!("table '{}': declared field {}", self.name, field);
        self.fields.push(field);
        Ok(())
    }

    pub fn validate_row(&self, row: &Row) -> Result<Row> {
        //! Check `row` against every declared field and build its canonical
        //! form.
        //!
        //! - Every field must have a value under its exact name.
        //! - Every value must pass [`validation::coerce`] for the field's type.
        //! - Keys that name no field are dropped or rejected, depending on the
        //! table's [`ExtraKeys`] policy.
        //!
        //! Returns the canonical row, holding one value per field in
        //! declaration order.

        let mut canonical = Row::new();

        for field in self.fields.iter() {
            let value = row.get(&field.name).ok_or_else(|| {
                EngineError::violation(&self.name, &field.name, ViolationReason::Missing)
            })?;

            let value = validation::coerce(value, field.data_type).map_err(|error| {
                EngineError::violation(&self.name, &field.name, ViolationReason::InvalidType(error))
            })?;

            canonical.insert(field.name.clone(), value);
        }

        let extra_keys: Vec<&str> = row
            .keys()
            .filter(|key| !self.fields.iter().any(|field| field.name == *key))
            .collect();

        if let Some(key) = extra_keys.first() {
            match self.policy.extra_keys {
                ExtraKeys::Reject => {
                    return Err(EngineError::violation(
                        &self.name,
                        *key,
                        ViolationReason::Unexpected,
                    ));
                }
                ExtraKeys::Drop => {
                    warn!(
                        "table '{}': dropping undeclared keys {:?}",
                        self.name, extra_keys
                    );
                }
            }
        }

        Ok(canonical)
    }

    pub fn add_row(&mut self, row: Row) -> Result<usize> {
        //! Validate and append a row.
        //!
        //! Returns the index the row was stored at.

        let row = self.validate_row(&row)?;
        self.rows.push(row);

        debug!("table '{}': inserted row {}", self.name, self.rows.len() - 1);
        Ok(self.rows.len() - 1)
    }

    pub fn update_row(&mut self, index: usize, row: Row) -> Result<Row> {
        //! Replace the row at `index` with `row` as a whole; values are not
        //! merged.
        //!
        //! Returns the row that was replaced.

        if index >= self.rows.len() {
            return Err(EngineError::IndexOutOfRange {
                index,
                len: self.rows.len(),
            });
        }

        let row = self.validate_row(&row)?;
        let replaced = std::mem::replace(&mut self.rows[index], row);

        debug!("table '{}': updated row {}", self.name, index);
        Ok(replaced)
    }

    pub fn delete_row(&mut self, index: usize) -> Result<Row> {
        //! Remove the row at `index`. Rows after it shift down by one.

        if index >= self.rows.len() {
            return Err(EngineError::IndexOutOfRange {
                index,
                len: self.rows.len(),
            });
        }

        debug!("table '{}': deleted row {}", self.name, index);
        Ok(self.rows.remove(index))
    }

    pub fn rename_column(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        //! Rename a field and move every row's value along with it.
        //!
        //! Both names are checked before anything is touched; past that point
        //! nothing can fail, so either the field and all rows are migrated or
        //! nothing is.

        let position = self
            .field_position(old_name)
            .ok_or_else(|| EngineError::not_found(Entity::Field, old_name))?;

        if let Some(existing) = self.field_position(new_name) {
            // Changing only the case of a name is fine when names ignore case.
            if existing != position || self.fields[position].name == new_name {
                return Err(EngineError::duplicate(Entity::Field, new_name));
            }
        }

        let stored_name = std::mem::replace(&mut self.fields[position].name, new_name.to_string());

        for row in self.rows.iter_mut() {
            row.rename_key(&stored_name, new_name);
        }

        debug!(
            "table '{}': renamed field {} to {} across {} rows",
            self.name,
            stored_name,
            new_name,
            self.rows.len()
        );
        Ok(())
    }

    pub fn same_structure(&self, other: &Table) -> bool {
        //! Two tables share a structure when they declare the same field
        //! names with the same types in the same order.

        self.fields == other.fields
    }

    pub fn contains_row(&self, row: &Row) -> bool {
        self.rows
            .iter()
            .any(|stored| stored.equivalent(row, &self.fields))
    }

    pub(super) fn renamed(&self, name: String) -> Table {
        //! An empty copy of this table's schema under another name.

        Table {
            name,
            fields: self.fields.clone(),
            rows: vec![],
            policy: self.policy,
        }
    }
}

impl PartialEq for Table {
    fn eq(&self, other: &Self) -> bool {
        // The policy is a deployment setting, not part of the data.
        self.name == other.name && self.fields == other.fields && self.rows == other.rows
    }
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let schema: Vec<String> = self.fields.iter().map(|field| field.to_string()).collect();
        let rows: Vec<String> = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| format!("{:3} | {}", index, row))
            .collect();

        writeln!(f, "{:3} | {}", "#", schema.join(" | "))?;
        if !rows.is_empty() {
            writeln!(f, "{}", rows.join("\n"))?;
        }
        Ok(())
    }
}
