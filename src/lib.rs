pub mod cli;
pub mod config;
pub mod error;
pub mod persistence;
pub mod sessions;
pub mod validation;

pub use error::{EngineError, Result};
