//! The place where the CLI argument parser and the shell command parser are
//! defined.
//!
//! Shell commands are one line each. The first word names the command and
//! is matched without regard to case; table and field names are taken as
//! written. Row values are separated by `|` so they may contain spaces:
//!
//! ```text
//! insert People | Id=1 | Name=Ann Lee | Stay=2024-10-10 - 2024-11-11
//! ```

use std::path::PathBuf;

use clap::{Parser, arg, command};

use crate::cli::commands::Command;
use crate::cli::messages::{highlight_argument, system_message};
use crate::persistence::{DataType, Field};

#[derive(Parser)]
#[command(name = "tabula")]
#[command(about = "A schema-on-write table store in a single JSON document", long_about = None)]
pub struct CliParser {
    /// Path of the database document; overrides TABULA_DATABASE.
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// Keep the session in memory and never write to disk.
    #[arg(long)]
    pub in_memory: bool,

    /// Skip the splash screen.
    #[arg(long)]
    pub no_splash: bool,
}

const VALUE_DELIMITER: char = '|';

/// Turns a line typed into the shell into a [`Command`].
pub struct CommandParser;

impl CommandParser {
    pub fn parse(line: &str) -> Result<Command, String> {
        //! Parse one command line.
        //!
        //! Returns the [`Command`] or a formatted message explaining what is
        //! wrong with the line.

        let (head, values) = match line.split_once(VALUE_DELIMITER) {
            Some((head, values)) => (head, Some(values)),
            None => (line, None),
        };

        let words: Vec<&str> = head.split_whitespace().collect();
        let Some((keyword, arguments)) = words.split_first() else {
            return Err(parser_error("Empty command."));
        };

        let keyword = keyword.to_lowercase();
        let command = match (keyword.as_str(), arguments) {
            ("tables", []) => Command::ListTables,
            ("create", [table, fields @ ..]) if !fields.is_empty() => Command::CreateTable {
                name: table.to_string(),
                fields: fields
                    .iter()
                    .map(|field| parse_field(field))
                    .collect::<Result<_, _>>()?,
            },
            ("drop", [table]) => Command::DropTable {
                name: table.to_string(),
            },
            ("show", [table]) => Command::ShowTable {
                name: table.to_string(),
            },
            ("insert", [table]) => Command::Insert {
                table: table.to_string(),
                values: parse_values(values)?,
            },
            ("update", [table, index]) => Command::Update {
                table: table.to_string(),
                index: parse_index(index)?,
                values: parse_values(values)?,
            },
            ("delete", [table, index]) => Command::Delete {
                table: table.to_string(),
                index: parse_index(index)?,
            },
            ("rename", [table, old_name, new_name]) => Command::Rename {
                table: table.to_string(),
                old_name: old_name.to_string(),
                new_name: new_name.to_string(),
            },
            ("diff", [left, right]) => Command::Difference {
                left: left.to_string(),
                right: right.to_string(),
            },
            ("save", []) => Command::Save,
            ("reload", []) => Command::Reload,
            (keyword, _) => {
                return Err(parser_error(&format!(
                    "Could not understand {}. Try {}.",
                    highlight_argument(keyword),
                    highlight_argument("help")
                )));
            }
        };

        if values.is_some() && !matches!(command, Command::Insert { .. } | Command::Update { .. }) {
            return Err(parser_error("Only insert and update take values."));
        }

        Ok(command)
    }
}

fn parser_error(message: &str) -> String {
    system_message("parser", message.to_string())
}

fn parse_field(definition: &str) -> Result<Field, String> {
    //! `Name:Type`, for instance `Birth:Date`.

    let (name, datatype) = definition.split_once(':').ok_or_else(|| {
        parser_error(&format!(
            "Invalid field {}; write it as {}.",
            highlight_argument(definition),
            highlight_argument("name:type")
        ))
    })?;

    if name.is_empty() {
        return Err(parser_error(&format!(
            "Invalid field {}; the name is empty.",
            highlight_argument(definition)
        )));
    }

    let datatype: DataType = datatype
        .parse()
        .map_err(|error: String| parser_error(&error))?;

    Ok(Field::new(name, datatype))
}

fn parse_index(index: &str) -> Result<usize, String> {
    index.parse::<usize>().map_err(|_| {
        parser_error(&format!(
            "Invalid row index {}; expected a non-negative number.",
            highlight_argument(index)
        ))
    })
}

fn parse_values(values: Option<&str>) -> Result<Vec<(String, String)>, String> {
    //! Split `| name=value | name=value` into pairs. Both sides are trimmed;
    //! the value is otherwise kept as typed, to be checked by the table.

    let Some(values) = values else {
        return Err(parser_error(&format!(
            "No values given; write them as {}.",
            highlight_argument("| name=value | name=value")
        )));
    };

    values
        .split(VALUE_DELIMITER)
        .filter(|pair| !pair.trim().is_empty())
        .map(|pair| {
            let (name, value) = pair.split_once('=').ok_or_else(|| {
                parser_error(&format!(
                    "Invalid value {}; write it as {}.",
                    highlight_argument(pair.trim()),
                    highlight_argument("name=value")
                ))
            })?;
            Ok((name.trim().to_string(), value.trim().to_string()))
        })
        .collect()
}
