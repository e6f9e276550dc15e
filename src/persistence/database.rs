use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Entity, Result, ViolationReason};
use crate::validation;

use super::row::Row;
use super::schema::{Field, SchemaPolicy};
use super::table::Table;
use super::value::Value;

/// The collective of multiple [`Table`] objects.
///
/// A [`Database`] owns its tables outright and keeps them in insertion order.
/// It is responsible for keeping table names unique and for turning the whole
/// store into a single document and back. [`Table`] does the per-row work of
/// verifying data before storing it.
///
/// Everything runs on the caller's thread. A database is meant to be owned by
/// one session at a time; two sessions saving the same document will simply
/// overwrite each other (last writer wins).
#[derive(Debug, Clone, Default, Serialize)]
pub struct Database {
    tables: Vec<Table>,
    #[serde(skip)]
    policy: SchemaPolicy,
}

/// The shape of a persisted document, used only while reading. Row values
/// cannot be typed until their table's fields are known.
#[derive(Deserialize)]
struct DatabaseDocument {
    #[serde(default)]
    tables: Vec<TableDocument>,
}

#[derive(Deserialize)]
struct TableDocument {
    name: String,
    #[serde(default)]
    fields: Vec<Field>,
    #[serde(default)]
    rows: Vec<RowDocument>,
}

#[derive(Deserialize)]
struct RowDocument {
    #[serde(default)]
    values: IndexMap<String, serde_json::Value>,
}

impl PartialEq for Database {
    fn eq(&self, other: &Self) -> bool {
        self.tables == other.tables
    }
}

impl Database {
    pub fn new() -> Database {
        //! Create a new database with no tables.

        Database::default()
    }

    pub fn with_policy(policy: SchemaPolicy) -> Database {
        Database {
            tables: vec![],
            policy,
        }
    }

    pub fn policy(&self) -> SchemaPolicy {
        self.policy
    }

    fn position(&self, table_name: &str) -> Option<usize> {
        self.tables
            .iter()
            .position(|table| self.policy.names.matches(table.name(), table_name))
    }

    pub fn add_table(&mut self, mut table: Table) -> Result<()> {
        //! Store `table` at the end of the database. The table adopts the
        //! database's [`SchemaPolicy`].

        if self.contains_table(table.name()) {
            return Err(EngineError::duplicate(Entity::Table, table.name()));
        }

        // The table may have been built under a looser policy than ours.
        let fields = table.fields();
        for (position, field) in fields.iter().enumerate() {
            if fields[..position]
                .iter()
                .any(|earlier| self.policy.names.matches(earlier.name(), field.name()))
            {
                return Err(EngineError::duplicate(Entity::Field, field.name()));
            }
        }

        table.policy = self.policy;
        debug!("created table '{}'", table.name());
        self.tables.push(table);
        Ok(())
    }

    pub fn delete_table(&mut self, table_name: &str) -> Result<Table> {
        //! Remove a table and everything in it.
        //!
        //! Returns the removed table.

        let position = self
            .position(table_name)
            .ok_or_else(|| EngineError::not_found(Entity::Table, table_name))?;

        debug!("dropped table '{}'", table_name);
        Ok(self.tables.remove(position))
    }

    pub fn get_table(&self, table_name: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|table| self.policy.names.matches(table.name(), table_name))
    }

    pub fn get_table_mut(&mut self, table_name: &str) -> Option<&mut Table> {
        let names = self.policy.names;
        self.tables
            .iter_mut()
            .find(|table| names.matches(table.name(), table_name))
    }

    pub fn table(&self, table_name: &str) -> Result<&Table> {
        //! Like [`Database::get_table`], for callers that treat a missing
        //! table as an error.

        self.get_table(table_name)
            .ok_or_else(|| EngineError::not_found(Entity::Table, table_name))
    }

    pub fn table_mut(&mut self, table_name: &str) -> Result<&mut Table> {
        self.get_table_mut(table_name)
            .ok_or_else(|| EngineError::not_found(Entity::Table, table_name))
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn list_tables(&self) -> Vec<&str> {
        //! Names of all tables, in the order they were added.

        self.tables.iter().map(|table| table.name()).collect()
    }

    pub fn contains_table(&self, table_name: &str) -> bool {
        self.position(table_name).is_some()
    }

    pub fn difference(&self, left: &str, right: &str) -> Result<Table> {
        //! Rows of `left` that have no equivalent row in `right`.
        //!
        //! Both tables must share a structure. The result is a new, detached
        //! table named `<left>-<right>` with `left`'s fields; it is not added
        //! to the database.

        let left = self.table(left)?;
        let right = self.table(right)?;

        if !left.same_structure(right) {
            return Err(EngineError::SchemaMismatch {
                left: left.name().to_string(),
                right: right.name().to_string(),
            });
        }

        let mut difference = left.renamed(format!("{}-{}", left.name(), right.name()));
        for row in left.rows().iter().filter(|row| !right.contains_row(row)) {
            difference.add_row(row.clone())?;
        }

        Ok(difference)
    }

    pub fn to_json(&self) -> Result<Vec<u8>> {
        //! Serialize the whole database into a single document.
        //!
        //! The output is deterministic: tables in insertion order, fields in
        //! declaration order and row values in field order.

        let document = serde_json::to_vec_pretty(self)?;
        info!(
            "serialized {} tables into {} bytes",
            self.tables.len(),
            document.len()
        );
        Ok(document)
    }

    pub fn from_json(bytes: &[u8]) -> Result<Database> {
        Database::from_json_with_policy(bytes, SchemaPolicy::default())
    }

    pub fn from_json_with_policy(bytes: &[u8], policy: SchemaPolicy) -> Result<Database> {
        //! Rebuild a database from a document written by [`Database::to_json`].
        //!
        //! An empty document is an empty database. Every table and row is
        //! re-added through the regular operations, so a document that breaks
        //! any rule (duplicate names, values of the wrong type) is refused as
        //! a whole with [`EngineError::Deserialization`].

        let mut database = Database::with_policy(policy);

        if bytes.iter().all(|byte| byte.is_ascii_whitespace()) {
            return Ok(database);
        }

        let document: DatabaseDocument = serde_json::from_slice(bytes)
            .map_err(|error| EngineError::Deserialization(error.to_string()))?;

        for table_document in document.tables {
            database
                .load_table(table_document)
                .map_err(|error| EngineError::Deserialization(error.to_string()))?;
        }

        info!("loaded {} tables", database.tables.len());
        Ok(database)
    }

    fn load_table(&mut self, document: TableDocument) -> Result<()> {
        let mut table = Table::new(document.name);
        table.policy = self.policy;

        for field in document.fields {
            table.add_field(field)?;
        }

        for row_document in document.rows {
            let mut row = Row::new();
            for (name, json) in row_document.values {
                // Keys outside the schema are left as raw text for the policy to judge.
                let value = match table.fields().iter().find(|field| field.name() == name) {
                    Some(field) => validation::from_json(&json, field.data_type()).map_err(|error| {
                        EngineError::violation(table.name(), &name, ViolationReason::InvalidType(error))
                    })?,
                    None => match json {
                        serde_json::Value::String(raw) => Value::String(raw),
                        other => Value::String(other.to_string()),
                    },
                };
                row.insert(name, value);
            }
            table.add_row(row)?;
        }

        self.add_table(table)
    }
}
