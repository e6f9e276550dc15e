//! This module is where all the shell commands are stored.
//!
//! Tabula command line syntax:
//!
//! - tabula --help | Command Line Help
//! - tabula | Run the shell on the configured database.
//!
//! Once the user is inside the shell, each line is one command, and each
//! command is carried out by exactly one operation of the engine:
//!
//! - tables;
//! - create table name:type*;
//! - drop table;
//! - show table;
//! - insert table | name=value*;
//! - update table index | name=value*;
//! - delete table index;
//! - rename table old new;
//! - diff left right;
//! - save; reload;
//!
//! Here * means more than one such values separated by a space (fields)
//! or a `|` (values).

use std::fmt::Display;

use crate::error::Result;
use crate::persistence::{Field, Row, Table, Value};
use crate::sessions::Session;

/// A parsed shell command, ready to be executed against a [`Session`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ListTables,
    CreateTable {
        name: String,
        fields: Vec<Field>,
    },
    DropTable {
        name: String,
    },
    ShowTable {
        name: String,
    },
    Insert {
        table: String,
        values: Vec<(String, String)>,
    },
    Update {
        table: String,
        index: usize,
        values: Vec<(String, String)>,
    },
    Delete {
        table: String,
        index: usize,
    },
    Rename {
        table: String,
        old_name: String,
        new_name: String,
    },
    Difference {
        left: String,
        right: String,
    },
    Save,
    Reload,
}

/// After a command runs and completes its execution, the result needs to be
/// displayed on the terminal.
///
/// The [`CommandResult`] is a simple struct that carries a displayable
/// [`Table`] and a short message back to the shell loop.
#[derive(Debug, Default)]
pub struct CommandResult {
    pub table: Option<Table>,
    pub message: Option<String>,
    pub n_rows_processed: Option<usize>,
}

impl CommandResult {
    fn message(message: String) -> CommandResult {
        CommandResult {
            message: Some(message),
            ..Default::default()
        }
    }

    fn rows(message: String, n_rows_processed: usize) -> CommandResult {
        CommandResult {
            message: Some(message),
            n_rows_processed: Some(n_rows_processed),
            ..Default::default()
        }
    }
}

impl Display for CommandResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(message) = &self.message {
            writeln!(f, "{}", message)?;
        }
        if let Some(table) = &self.table {
            write!(f, "{}", table)?;
        }
        Ok(())
    }
}

/// Runs one [`Command`] against a [`Session`].
///
/// The executor does no checking of its own: it adapts the command into the
/// shape the engine expects and reports the outcome. Mutating commands go
/// through [`Session::mutate`] so the database is saved after each of them.
pub struct CommandExecutor<'s> {
    session: &'s mut Session,
}

impl<'s> CommandExecutor<'s> {
    pub fn new(session: &'s mut Session) -> CommandExecutor<'s> {
        CommandExecutor { session }
    }

    pub fn execute(mut self, command: Command) -> Result<CommandResult> {
        match command {
            Command::ListTables => {
                let names = self.session.database().list_tables();
                let message = if names.is_empty() {
                    "There are no tables in the database yet.".to_string()
                } else {
                    names
                        .iter()
                        .enumerate()
                        .map(|(index, name)| format!("{:5}. {}", index + 1, name))
                        .collect::<Vec<_>>()
                        .join("\n")
                };
                Ok(CommandResult::message(message))
            }
            Command::CreateTable { name, fields } => {
                let table = Table::with_fields(name.clone(), fields)?;
                self.session.mutate(|database| database.add_table(table))?;
                Ok(CommandResult::message(format!("Table {} created.", name)))
            }
            Command::DropTable { name } => {
                let table = self
                    .session
                    .mutate(|database| database.delete_table(&name))?;
                Ok(CommandResult::rows(
                    format!("Table {} dropped.", table.name()),
                    table.len(),
                ))
            }
            Command::ShowTable { name } => {
                let table = self.session.database().table(&name)?.clone();
                Ok(CommandResult {
                    n_rows_processed: Some(table.len()),
                    table: Some(table),
                    message: None,
                })
            }
            Command::Insert { table, values } => {
                let index = self.session.mutate(|database| {
                    let table = database.table_mut(&table)?;
                    let row = build_row(table, values);
                    table.add_row(row)
                })?;
                Ok(CommandResult::rows(format!("Row {} inserted.", index), 1))
            }
            Command::Update {
                table,
                index,
                values,
            } => {
                self.session.mutate(|database| {
                    let table = database.table_mut(&table)?;
                    let row = build_row(table, values);
                    table.update_row(index, row)
                })?;
                Ok(CommandResult::rows(format!("Row {} updated.", index), 1))
            }
            Command::Delete { table, index } => {
                self.session
                    .mutate(|database| database.table_mut(&table)?.delete_row(index))?;
                Ok(CommandResult::rows(format!("Row {} deleted.", index), 1))
            }
            Command::Rename {
                table,
                old_name,
                new_name,
            } => {
                let n_rows = self.session.mutate(|database| {
                    let table = database.table_mut(&table)?;
                    table.rename_column(&old_name, &new_name)?;
                    Ok(table.len())
                })?;
                Ok(CommandResult::rows(
                    format!("Field {} renamed to {}.", old_name, new_name),
                    n_rows,
                ))
            }
            Command::Difference { left, right } => {
                let difference = self.session.database().difference(&left, &right)?;
                Ok(CommandResult {
                    n_rows_processed: Some(difference.len()),
                    table: Some(difference),
                    message: None,
                })
            }
            Command::Save => {
                self.session.save()?;
                Ok(CommandResult::message(format!(
                    "Saved to {}.",
                    self.session.store_description()
                )))
            }
            Command::Reload => {
                self.session.reload()?;
                Ok(CommandResult::message(format!(
                    "Reloaded from {}.",
                    self.session.store_description()
                )))
            }
        }
    }
}

fn build_row(table: &Table, values: Vec<(String, String)>) -> Row {
    //! Assemble a row of raw text. Names are resolved to the stored spelling
    //! of their field; checking the text is left to the table.

    values
        .into_iter()
        .map(|(name, raw)| {
            let name = table
                .field(&name)
                .map(|field| field.name().to_string())
                .unwrap_or(name);
            (name, Value::String(raw))
        })
        .collect()
}
