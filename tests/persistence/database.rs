use tabula_engine::EngineError;
use tabula_engine::error::Entity;
use tabula_engine::persistence::{
    DataType, Database, Field, NameMatching, Row, SchemaPolicy, Table, Value,
};

fn _prepare_database() -> Database {
    Database::new()
}

fn _create_table(
    database: &mut Database,
    name: &str,
    fields: Vec<(&str, DataType)>,
    data: Vec<Row>,
) -> Result<(), EngineError> {
    let table = Table::with_fields(
        name,
        fields
            .into_iter()
            .map(|(name, datatype)| Field::new(name, datatype))
            .collect(),
    )?;
    database.add_table(table)?;

    let table = database.table_mut(name)?;
    for row in data {
        table.add_row(row)?;
    }
    Ok(())
}

fn _people_rows(people: &[(i64, &str)]) -> Vec<Row> {
    people
        .iter()
        .map(|(id, name)| Row::new().with("Id", *id).with("Name", *name))
        .collect()
}

#[test]
fn database_create_table() {
    let mut database = _prepare_database();
    let rows = _people_rows(&[(1, "Jansen"), (2, "Bonega"), (3, "Maharashtra")]);

    _create_table(
        &mut database,
        "test_tb1",
        vec![("Id", DataType::Integer), ("Name", DataType::String)],
        rows,
    )
    .unwrap();

    assert_eq!(database.list_tables(), vec!["test_tb1"]);
    assert_eq!(database.get_table("test_tb1").unwrap().len(), 3);
}

#[test]
fn database_add_table_duplicate_name() {
    let mut database = _prepare_database();
    database.add_table(Table::new("People")).unwrap();
    database.add_table(Table::new("Places")).unwrap();

    let result = database.add_table(Table::new("People"));

    assert!(matches!(
        result,
        Err(EngineError::DuplicateName { entity: Entity::Table, .. })
    ));
    assert_eq!(database.list_tables(), vec!["People", "Places"]);
}

#[test]
fn database_names_are_case_sensitive_by_default() {
    let mut database = _prepare_database();
    database.add_table(Table::new("People")).unwrap();

    database.add_table(Table::new("people")).unwrap();

    assert!(database.get_table("PEOPLE").is_none());
    assert_eq!(database.list_tables().len(), 2);
}

#[test]
fn database_names_ignore_case_when_asked() {
    let mut database = Database::with_policy(SchemaPolicy {
        names: NameMatching::IgnoreCase,
        ..Default::default()
    });
    database.add_table(Table::new("People")).unwrap();

    assert!(matches!(
        database.add_table(Table::new("PEOPLE")),
        Err(EngineError::DuplicateName { .. })
    ));
    assert_eq!(database.get_table("people").unwrap().name(), "People");
}

#[test]
fn database_refuses_fields_clashing_under_its_policy() {
    let mut database = Database::with_policy(SchemaPolicy {
        names: NameMatching::IgnoreCase,
        ..Default::default()
    });
    let table = Table::with_fields(
        "People",
        vec![
            Field::new("name", DataType::String),
            Field::new("Name", DataType::String),
        ],
    )
    .unwrap();

    assert!(matches!(
        database.add_table(table),
        Err(EngineError::DuplicateName { entity: Entity::Field, .. })
    ));
    assert!(database.list_tables().is_empty());
}

#[test]
fn database_delete_table() {
    let mut database = _prepare_database();
    database.add_table(Table::new("People")).unwrap();
    database.add_table(Table::new("Places")).unwrap();

    let deleted = database.delete_table("People").unwrap();

    assert_eq!(deleted.name(), "People");
    assert_eq!(database.list_tables(), vec!["Places"]);
}

#[test]
fn database_delete_missing_table() {
    let mut database = _prepare_database();
    database.add_table(Table::new("People")).unwrap();

    let result = database.delete_table("Places");

    assert!(matches!(
        result,
        Err(EngineError::NotFound { entity: Entity::Table, .. })
    ));
    assert_eq!(database.list_tables(), vec!["People"]);
}

#[test]
fn database_get_missing_table_is_none() {
    let database = _prepare_database();

    assert!(database.get_table("People").is_none());
    assert!(!database.contains_table("People"));
    assert!(database.table("People").is_err());
}

#[test]
fn database_round_trip() {
    let mut database = _prepare_database();
    _create_table(
        &mut database,
        "Everything",
        vec![
            ("Id", DataType::Integer),
            ("Score", DataType::Real),
            ("Grade", DataType::Char),
            ("Name", DataType::String),
            ("Birth", DataType::Date),
            ("Stay", DataType::DateInterval),
        ],
        vec![
            Row::new()
                .with("Id", 1)
                .with("Score", 2.0)
                .with("Grade", 'A')
                .with("Name", "Ann \"the\" first")
                .with("Birth", "2000-01-01")
                .with("Stay", "2024-10-10 - 2024-11-11"),
            Row::new()
                .with("Id", -7)
                .with("Score", "0.125")
                .with("Grade", "b")
                .with("Name", "")
                .with("Birth", "1999-12-31")
                .with("Stay", "2024-01-01 - 2024-01-01"),
        ],
    )
    .unwrap();
    _create_table(&mut database, "Empty", vec![], vec![]).unwrap();

    let document = database.to_json().unwrap();
    let loaded = Database::from_json(&document).unwrap();

    assert_eq!(loaded, database);
    assert_eq!(loaded.list_tables(), vec!["Everything", "Empty"]);
    assert_eq!(loaded.to_json().unwrap(), document);
}

#[test]
fn database_document_shape() {
    let mut database = _prepare_database();
    _create_table(
        &mut database,
        "People",
        vec![("Id", DataType::Integer), ("Birth", DataType::Date)],
        vec![Row::new().with("Birth", "2000-01-01").with("Id", 1)],
    )
    .unwrap();

    let document: serde_json::Value =
        serde_json::from_slice(&database.to_json().unwrap()).unwrap();

    assert_eq!(
        document,
        serde_json::json!({
            "tables": [{
                "name": "People",
                "fields": [
                    { "name": "Id", "type": "Integer" },
                    { "name": "Birth", "type": "Date" }
                ],
                "rows": [{ "values": { "Id": 1, "Birth": "2000-01-01" } }]
            }]
        })
    );
}

#[test]
fn database_from_empty_document() {
    let database = Database::from_json(b"  \n").unwrap();

    assert!(database.list_tables().is_empty());
}

#[test]
fn database_from_malformed_document() {
    let result = Database::from_json(b"{ \"tables\": [ { \"name\": ");

    assert!(matches!(result, Err(EngineError::Deserialization(_))));
}

#[test]
fn database_from_document_with_invalid_value() {
    let document = br#"{
        "tables": [{
            "name": "People",
            "fields": [{ "name": "Id", "type": "Integer" }],
            "rows": [{ "values": { "Id": "one" } }]
        }]
    }"#;

    let result = Database::from_json(document);

    assert!(matches!(result, Err(EngineError::Deserialization(_))));
}

#[test]
fn database_from_document_with_unknown_type() {
    let document = br#"{ "tables": [{ "name": "People", "fields": [{ "name": "Id", "type": "Time" }] }] }"#;

    assert!(matches!(
        Database::from_json(document),
        Err(EngineError::Deserialization(_))
    ));
}

#[test]
fn database_from_document_with_duplicate_tables() {
    let document = br#"{ "tables": [{ "name": "People" }, { "name": "People" }] }"#;

    assert!(matches!(
        Database::from_json(document),
        Err(EngineError::Deserialization(_))
    ));
}

#[test]
fn database_difference() {
    let mut database = _prepare_database();
    let fields = vec![("Id", DataType::Integer), ("Name", DataType::String)];
    _create_table(
        &mut database,
        "Left",
        fields.clone(),
        _people_rows(&[(1, "Ann"), (2, "Bob"), (3, "Cid")]),
    )
    .unwrap();
    _create_table(
        &mut database,
        "Right",
        fields,
        _people_rows(&[(2, "Bob"), (4, "Dan")]),
    )
    .unwrap();

    let difference = database.difference("Left", "Right").unwrap();

    assert_eq!(difference.name(), "Left-Right");
    assert_eq!(difference.len(), 2);
    assert_eq!(difference.row(0).unwrap().get("Name"), Some(&Value::from("Ann")));
    assert_eq!(difference.row(1).unwrap().get("Name"), Some(&Value::from("Cid")));
    assert_eq!(database.list_tables(), vec!["Left", "Right"]);
}

#[test]
fn database_difference_needs_same_structure() {
    let mut database = _prepare_database();
    _create_table(
        &mut database,
        "Left",
        vec![("Id", DataType::Integer)],
        vec![],
    )
    .unwrap();
    _create_table(
        &mut database,
        "Right",
        vec![("Id", DataType::Real)],
        vec![],
    )
    .unwrap();

    assert!(matches!(
        database.difference("Left", "Right"),
        Err(EngineError::SchemaMismatch { .. })
    ));
    assert!(matches!(
        database.difference("Left", "Nowhere"),
        Err(EngineError::NotFound { .. })
    ));
}

#[test]
fn database_round_trip_keeps_every_real_bit() {
    let mut database = _prepare_database();
    _create_table(&mut database, "Reals", vec![("Score", DataType::Real)], vec![]).unwrap();

    let mut reals = vec![
        0.1,
        1.0 / 3.0,
        std::f64::consts::PI,
        1e-300,
        5e-324,
        f64::MIN_POSITIVE,
        f64::MAX,
        -f64::MAX,
        0.0010715660391465826,
    ];
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    while reals.len() < 2_000 {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let real = f64::from_bits(state);
        if real.is_finite() {
            reals.push(real);
        }
    }

    let table = database.table_mut("Reals").unwrap();
    for real in reals.iter() {
        table.add_row(Row::new().with("Score", *real)).unwrap();
    }

    let loaded = Database::from_json(&database.to_json().unwrap()).unwrap();

    let loaded_reals = loaded.table("Reals").unwrap().rows();
    for (real, row) in reals.iter().zip(loaded_reals) {
        assert_eq!(row.get("Score"), Some(&Value::Real(*real)));
    }
    assert_eq!(loaded, database);
}
