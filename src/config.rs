//! Engine settings, read from the environment.
//!
//! A `.env` file in the working directory is loaded first (if there is one),
//! then these variables are read:
//!
//! - `TABULA_DATABASE`: path of the database document (default `database.json`)
//! - `TABULA_NAME_MATCHING`: `exact` (default) or `ignore-case`
//! - `TABULA_EXTRA_KEYS`: `drop` (default) or `reject`
//!
//! Command line flags win over all of these.

use std::path::{Path, PathBuf};

use crate::persistence::{ExtraKeys, NameMatching, SchemaPolicy};

pub const DEFAULT_DATABASE_PATH: &str = "database.json";

pub const DATABASE_VAR: &str = "TABULA_DATABASE";
pub const NAME_MATCHING_VAR: &str = "TABULA_NAME_MATCHING";
pub const EXTRA_KEYS_VAR: &str = "TABULA_EXTRA_KEYS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
    pub policy: SchemaPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            policy: SchemaPolicy::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Config, String> {
        //! Load `.env` (a missing file is fine) and read the process
        //! environment. A `.env` that exists but cannot be read is an error.

        env_file_loaded(".env", dotenvy::dotenv())?;
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_env_file(path: impl AsRef<Path>) -> Result<Config, String> {
        //! Same as [`Config::from_env`] with an explicit env file.

        let path = path.as_ref();
        env_file_loaded(&path.display().to_string(), dotenvy::from_path(path))?;
        Config::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        //! Build a config from any key to value source. Unset keys take their
        //! defaults; a set but unrecognized value is an error.

        let mut config = Config::default();

        if let Some(path) = lookup(DATABASE_VAR).filter(|path| !path.trim().is_empty()) {
            config.database_path = PathBuf::from(path);
        }

        if let Some(names) = lookup(NAME_MATCHING_VAR) {
            config.policy.names = names
                .parse::<NameMatching>()
                .map_err(|e| format!("{}: {}", NAME_MATCHING_VAR, e))?;
        }

        if let Some(extra_keys) = lookup(EXTRA_KEYS_VAR) {
            config.policy.extra_keys = extra_keys
                .parse::<ExtraKeys>()
                .map_err(|e| format!("{}: {}", EXTRA_KEYS_VAR, e))?;
        }

        Ok(config)
    }
}

fn env_file_loaded<T>(name: &str, outcome: dotenvy::Result<T>) -> Result<(), String> {
    match outcome {
        Ok(_) => Ok(()),
        Err(error) if error.not_found() => Ok(()),
        Err(error) => Err(format!("{}: {}", name, error)),
    }
}
