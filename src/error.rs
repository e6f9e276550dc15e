//! Errors raised by the engine.
//!
//! Every failure is recoverable: an operation that returns an [`EngineError`]
//! has left the [`crate::persistence::Database`] exactly as it found it.

use std::fmt::Display;

use thiserror::Error;

use crate::persistence::DataType;

pub type Result<T> = std::result::Result<T, EngineError>;

/// The kind of named thing an error talks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Table,
    Field,
}

impl Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Entity::Table => write!(f, "table"),
            Entity::Field => write!(f, "field"),
        }
    }
}

/// A value that does not satisfy the rule of a [`DataType`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid value '{raw}': not compatible with type {data_type}, expected {expected}")]
    Parse {
        raw: String,
        data_type: DataType,
        expected: &'static str,
    },

    #[error("invalid interval '{raw}': start is after end")]
    InvertedInterval { raw: String },
}

impl ValidationError {
    pub fn raw(&self) -> &str {
        match self {
            ValidationError::Parse { raw, .. } => raw,
            ValidationError::InvertedInterval { raw } => raw,
        }
    }
}

/// Why a row was refused by a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViolationReason {
    #[error("missing value")]
    Missing,

    #[error("invalid type; {0}")]
    InvalidType(ValidationError),

    #[error("not declared in the table")]
    Unexpected,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("integrity violation; {entity} '{name}' already exists")]
    DuplicateName { entity: Entity, name: String },

    #[error("does not exist: {entity} '{name}'")]
    NotFound { entity: Entity, name: String },

    #[error("out of bound; row index {index} (table has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("schema violation on '{table}.{field}': {reason}")]
    SchemaViolation {
        table: String,
        field: String,
        reason: ViolationReason,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("tables '{left}' and '{right}' do not share the same structure")]
    SchemaMismatch { left: String, right: String },

    #[error("could not read database document: {0}")]
    Deserialization(String),

    #[error("could not write database document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub fn duplicate(entity: Entity, name: impl Into<String>) -> Self {
        Self::DuplicateName {
            entity,
            name: name.into(),
        }
    }

    pub fn not_found(entity: Entity, name: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            name: name.into(),
        }
    }

    pub fn violation(
        table: impl Into<String>,
        field: impl Into<String>,
        reason: ViolationReason,
    ) -> Self {
        Self::SchemaViolation {
            table: table.into(),
            field: field.into(),
            reason,
        }
    }
}
