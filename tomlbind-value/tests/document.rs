use tomlbind_value::{Datetime, Document, Kind, Table, Value, ValueType};

fn sample() -> Document {
    let mut hello = Table::new();
    hello.insert(
        "world".into(),
        Document::Array(vec![1i64.into(), 2i64.into(), 3i64.into()]),
    );
    hello.insert(
        "since".into(),
        Document::Datetime("1979-05-27".parse().unwrap()),
    );

    let mut root = Table::new();
    root.insert("hello".into(), Document::Table(hello));
    root.insert("name".into(), "x".into());
    Document::Table(root)
}

#[test]
fn dynamic_representation_follows_document_kind() {
    let value = Value::from(&sample());
    assert_eq!(value.value_type(), ValueType::Map);

    let hello = value.get("hello").unwrap();
    assert_eq!(
        hello.get("world").and_then(Value::as_seq),
        Some(&[Value::Int(1), Value::Int(2), Value::Int(3)][..])
    );
    assert_eq!(
        hello.get("since").and_then(Value::as_datetime),
        Some(&Datetime::local_date(1979, 5, 27))
    );
    assert_eq!(value.get("name").and_then(Value::as_str), Some("x"));
}

#[test]
fn map_equality_ignores_order() {
    let a: Value = [("x", 1i64), ("y", 2)].into_iter().collect();
    let b: Value = [("y", 2i64), ("x", 1)].into_iter().collect();
    assert_eq!(a, b);
}

#[test]
fn kinds_have_diagnostic_names() {
    let doc = sample();
    assert_eq!(doc.kind(), Kind::Table);
    assert_eq!(doc.get("name").map(|d| d.kind().name()), Some("string"));
    assert_eq!(Kind::Datetime.to_string(), "datetime");
    assert_eq!(Document::default(), Document::Table(Table::new()));
}
