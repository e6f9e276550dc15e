//! Persistence as tables needs to have the following components
//! - Schema (the ordered, typed fields of a table, plus the naming policy)
//! - Value (one typed cell, one variant per datatype)
//! - Row (field name to value, validated by the table before it is stored)
//! - Table (made of many Rows, owns validation and mutation)
//! - Database (ordered tables, serialized as one document)
//! - Store (where that document lives between sessions)
//!

//  All modules of this lib
mod database;
mod row;
mod schema;
mod store;
mod table;
mod value;

//  External API
pub use database::Database;
pub use row::Row;
pub use schema::{DataType, ExtraKeys, Field, NameMatching, SchemaPolicy};
pub use store::{DocumentStore, FileStore, MemoryStore};
pub use table::Table;
pub use value::{DateInterval, Value};
