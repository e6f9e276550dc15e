use std::fs;

use tabula_engine::EngineError;
use tabula_engine::persistence::{
    DataType, Database, DocumentStore, Field, FileStore, MemoryStore, NameMatching, Row,
    SchemaPolicy, Table,
};

fn _sample_database() -> Database {
    let mut database = Database::new();
    let mut table = Table::with_fields(
        "People",
        vec![
            Field::new("Id", DataType::Integer),
            Field::new("Name", DataType::String),
        ],
    )
    .unwrap();
    table
        .add_row(Row::new().with("Id", 1).with("Name", "Ann"))
        .unwrap();
    database.add_table(table).unwrap();
    database
}

#[test]
fn file_store_missing_file_is_empty_database() {
    let directory = tempfile::tempdir().unwrap();
    let store = FileStore::new(directory.path().join("database.json"));

    let database = store.load().unwrap();

    assert!(database.list_tables().is_empty());
}

#[test]
fn file_store_save_then_load() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("database.json");
    let mut store = FileStore::new(&path);
    let database = _sample_database();

    store.save(&database).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded, database);
    assert!(path.exists());
    assert!(!directory.path().join("database.json.tmp").exists());
}

#[test]
fn file_store_save_overwrites_whole_document() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("database.json");
    let mut store = FileStore::new(&path);

    store.save(&_sample_database()).unwrap();
    store.save(&Database::new()).unwrap();

    assert!(store.load().unwrap().list_tables().is_empty());
}

#[test]
fn file_store_malformed_document() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("database.json");
    fs::write(&path, "not json").unwrap();

    let result = FileStore::new(&path).load();

    assert!(matches!(result, Err(EngineError::Deserialization(_))));
}

#[test]
fn file_store_applies_its_policy() {
    let directory = tempfile::tempdir().unwrap();
    let path = directory.path().join("database.json");
    FileStore::new(&path).save(&_sample_database()).unwrap();

    let store = FileStore::with_policy(
        &path,
        SchemaPolicy {
            names: NameMatching::IgnoreCase,
            ..Default::default()
        },
    );
    let database = store.load().unwrap();

    assert!(database.get_table("people").is_some());
}

#[test]
fn memory_store_round_trip() {
    let mut store = MemoryStore::new();
    assert!(store.load().unwrap().list_tables().is_empty());
    assert!(store.document().is_none());

    let database = _sample_database();
    store.save(&database).unwrap();

    assert_eq!(store.load().unwrap(), database);
    assert!(store.document().is_some());
}
