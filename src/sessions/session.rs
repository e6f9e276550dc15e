//! The only point of truth for all information that is related to the
//! current user session in the engine. A session owns the open database, the
//! store it was loaded from and the command history of the user.
//!
//! # Save points
//! Every mutation goes through [`Session::mutate`], which saves the whole
//! database back to the store as soon as the mutation succeeds. A failed
//! mutation, or a mutation whose save fails, leaves the database untouched.
//!
//! # Concurrency
//! A session assumes it is the only writer of its document. Two sessions on
//! the same file will overwrite each other's changes on save (last writer
//! wins); nothing here detects that.

use std::{fmt::Display, time::SystemTime};

use chrono::{DateTime, Local};
use log::debug;

use crate::error::Result;
use crate::persistence::{Database, DocumentStore};

struct CommandHistory {
    command: String,
    command_time: SystemTime,
}

impl CommandHistory {
    pub fn command_time_string(&self) -> String {
        let datetime: DateTime<Local> = self.command_time.into();
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

impl Display for CommandHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.command_time_string(), self.command)
    }
}

pub struct Session {
    command_history: Vec<CommandHistory>,
    start_time: SystemTime,
    database: Database,
    store: Box<dyn DocumentStore>,
}

impl Session {
    pub fn open(store: Box<dyn DocumentStore>) -> Result<Session> {
        //! Start a session on the database held by `store`.

        let database = store.load()?;

        Ok(Session {
            command_history: vec![],
            start_time: SystemTime::now(),
            database,
            store,
        })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn store_description(&self) -> String {
        self.store.describe()
    }

    pub fn mutate<T, F>(&mut self, operation: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T>,
    {
        //! Run a mutating operation and save the database if it succeeds.
        //!
        //! The operation works on a copy. The copy replaces the session's
        //! database only once it is saved, so a failed operation or a failed
        //! save leaves the session as it was.

        let mut working = self.database.clone();
        let outcome = operation(&mut working)?;
        self.store.save(&working)?;
        self.database = working;

        debug!("session saved to {}", self.store.describe());
        Ok(outcome)
    }

    pub fn save(&mut self) -> Result<()> {
        self.store.save(&self.database)
    }

    pub fn reload(&mut self) -> Result<()> {
        //! Throw away the in-memory database and read the stored one again.
        //! On failure the current database is kept.

        self.database = self.store.load()?;
        Ok(())
    }

    pub fn add_to_command_history(&mut self, command: &str) {
        self.command_history.push(CommandHistory {
            command: command.to_string(),
            command_time: SystemTime::now(),
        });
    }

    pub fn start_time_string(&self) -> String {
        //! Convert the [`SystemTime`] object into a string representation
        //! to be more readable.

        let datetime: DateTime<Local> = self.start_time.into();
        datetime.format("%Y-%m-%d %H:%M:%S").to_string()
    }

    pub fn command_history(&self, n_prev: Option<usize>) -> Vec<String> {
        //! The most recent commands first, formatted with their time.
        //! Use `n_prev` to limit the number of commands you get.

        let limit = n_prev.unwrap_or(self.command_history.len());

        self.command_history
            .iter()
            .rev()
            .take(limit)
            .map(|command| command.to_string())
            .collect()
    }

    pub fn get_last_command(&self, nth_back: usize) -> Option<&str> {
        //! Gets the `nth_back`th last command from the history, if there is
        //! one that far back.

        if nth_back == 0 {
            return None;
        }

        self.command_history
            .iter()
            .nth_back(nth_back - 1)
            .map(|cmd| cmd.command.as_str())
    }
}
