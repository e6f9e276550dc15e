use std::{
    fs,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use log::{info, warn};

use crate::error::Result;

use super::database::Database;
use super::schema::SchemaPolicy;

/// Where a [`Database`] document lives between sessions.
///
/// The store always moves the whole document at once. Locking or any other
/// coordination between writers belongs behind this trait, not in the core.
pub trait DocumentStore {
    /// Read the stored database. A store that holds nothing yet yields an
    /// empty database.
    fn load(&self) -> Result<Database>;

    /// Replace the stored document with `database`.
    fn save(&mut self, database: &Database) -> Result<()>;

    /// A short description of the store for user facing messages.
    fn describe(&self) -> String;
}

/// A database document on the local file system.
pub struct FileStore {
    path: PathBuf,
    policy: SchemaPolicy,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> FileStore {
        FileStore {
            path: path.into(),
            policy: SchemaPolicy::default(),
        }
    }

    pub fn with_policy(path: impl Into<PathBuf>, policy: SchemaPolicy) -> FileStore {
        FileStore {
            path: path.into(),
            policy,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

impl DocumentStore for FileStore {
    fn load(&self) -> Result<Database> {
        //! A missing file is a new database, not an error. Any other failure
        //! to read is reported, so that a later save cannot silently replace
        //! a document that merely could not be opened.

        match fs::read(&self.path) {
            Ok(bytes) => {
                info!("loading database from {}", self.path.display());
                Database::from_json_with_policy(&bytes, self.policy)
            }
            Err(error) if error.kind() == ErrorKind::NotFound => {
                warn!(
                    "no database at {}, starting with an empty one",
                    self.path.display()
                );
                Ok(Database::with_policy(self.policy))
            }
            Err(error) => Err(error.into()),
        }
    }

    fn save(&mut self, database: &Database) -> Result<()> {
        //! Write to a sibling staging file first and then move it over the
        //! target, so readers only ever see a complete document.

        let document = database.to_json()?;
        let staging = self.staging_path();

        {
            let mut file = fs::File::create(&staging)?;
            file.write_all(&document)?;
            file.sync_all()?;
        }
        fs::rename(&staging, &self.path)?;

        info!("saved database to {}", self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A store that keeps the last saved document in memory.
#[derive(Default)]
pub struct MemoryStore {
    document: Option<Vec<u8>>,
    policy: SchemaPolicy,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }

    pub fn with_policy(policy: SchemaPolicy) -> MemoryStore {
        MemoryStore {
            document: None,
            policy,
        }
    }

    pub fn document(&self) -> Option<&[u8]> {
        self.document.as_deref()
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<Database> {
        match &self.document {
            Some(bytes) => Database::from_json_with_policy(bytes, self.policy),
            None => Ok(Database::with_policy(self.policy)),
        }
    }

    fn save(&mut self, database: &Database) -> Result<()> {
        self.document = Some(database.to_json()?);
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory store".to_string()
    }
}
