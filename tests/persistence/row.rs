use tabula_engine::persistence::{DataType, Field, Row, Value};

#[test]
fn row_equality_ignores_key_order() {
    let left = Row::new().with("Id", 1).with("Name", "Ann");
    let right = Row::new().with("Name", "Ann").with("Id", 1);

    assert_eq!(left, right);
}

#[test]
fn row_equality_needs_same_keys() {
    let left = Row::new().with("Id", 1).with("Name", "Ann");
    let right = Row::new().with("Id", 1);

    assert_ne!(left, right);
    assert_ne!(right, left);
}

#[test]
fn row_equality_compares_values() {
    let left = Row::new().with("Id", 1);

    assert_ne!(left, Row::new().with("Id", 2));
    assert_ne!(left, Row::new().with("Id", "1"));
}

#[test]
fn row_equivalent_through_schema() {
    let fields = vec![
        Field::new("Id", DataType::Integer),
        Field::new("Stay", DataType::DateInterval),
    ];
    let raw = Row::new()
        .with("Id", "7")
        .with("Stay", "2024-10-10 -  2024-11-11");
    let typed: Row = [
        ("Id", Value::Integer(7)),
        (
            "Stay",
            tabula_engine::validation::parse("2024-10-10 - 2024-11-11", DataType::DateInterval)
                .unwrap(),
        ),
    ]
    .into_iter()
    .collect();

    assert!(raw.equivalent(&typed, &fields));
    assert!(typed.equivalent(&raw, &fields));
    assert!(!raw.equivalent(&Row::new().with("Id", 7), &fields));
}

#[test]
fn row_remove_and_insert() {
    let mut row = Row::new().with("Id", 1).with("Name", "Ann");

    assert_eq!(row.remove("Name"), Some(Value::from("Ann")));
    assert_eq!(row.insert("Id", 2), Some(Value::Integer(1)));
    assert_eq!(row.len(), 1);
    assert_eq!(row.to_string(), "2");
}

#[test]
fn row_display_keeps_reals_short() {
    let row = Row::new()
        .with("Tiny", 1e-300)
        .with("Huge", 1e300)
        .with("Plain", 2.5);

    assert_eq!(row.to_string(), "1e-300 | 1e300 | 2.5");
    assert_eq!(Value::Real(0.1).to_string(), "0.1");
}
