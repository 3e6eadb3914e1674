//! TOML text into a [`Document`], via `toml_edit`.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use log::trace;
use toml_edit::{DocumentMut, InlineTable, Item, TomlError, Value};
use tomlbind_core::{Datetime, Document, Table};

use crate::{DecodeError, DecodeErrorKind};

/// Parses TOML text into a document tree.
///
/// ```
/// let doc = tomlbind::parse_document("[server]\nport = 8080").unwrap();
/// assert_eq!(doc.get("server").and_then(|s| s.get("port")), Some(&8080i64.into()));
/// ```
pub fn parse_document(input: &str) -> Result<Document, DecodeError> {
    let parsed: DocumentMut = input
        .parse()
        .map_err(|e: TomlError| parse_error(input, e.message().to_string(), e.span()))?;
    trace!("parsed {} top-level keys", parsed.len());
    convert_table(parsed.as_table().iter(), input)
}

fn parse_error(input: &str, message: String, span: Option<core::ops::Range<usize>>) -> DecodeError {
    let err = DecodeError::new(DecodeErrorKind::Parse(message)).with_source(input);
    match span {
        Some(span) => err.with_span(span.into()),
        None => err,
    }
}

fn convert_table<'a>(
    entries: impl Iterator<Item = (&'a str, &'a Item)>,
    input: &str,
) -> Result<Document, DecodeError> {
    let mut table = Table::new();
    for (key, item) in entries {
        if let Some(doc) = convert_item(item, input).map_err(|e| e.key(key))? {
            table.insert(key.to_string(), doc);
        }
    }
    Ok(Document::Table(table))
}

fn convert_item(item: &Item, input: &str) -> Result<Option<Document>, DecodeError> {
    let doc = match item {
        Item::None => return Ok(None),
        Item::Value(value) => convert_value(value, input)?,
        Item::Table(table) => convert_table(table.iter(), input)?,
        Item::ArrayOfTables(tables) => {
            let mut items = Vec::with_capacity(tables.len());
            for (index, table) in tables.iter().enumerate() {
                items.push(convert_table(table.iter(), input).map_err(|e| e.index(index))?);
            }
            Document::Array(items)
        }
    };
    Ok(Some(doc))
}

fn convert_value(value: &Value, input: &str) -> Result<Document, DecodeError> {
    Ok(match value {
        Value::String(s) => Document::String(s.value().clone()),
        Value::Integer(n) => Document::Integer(*n.value()),
        Value::Float(x) => Document::Float(*x.value()),
        Value::Boolean(b) => Document::Boolean(*b.value()),
        Value::Datetime(dt) => {
            let text = dt.value().to_string();
            let parsed = text
                .parse::<Datetime>()
                .map_err(|e| parse_error(input, e.to_string(), dt.span()))?;
            Document::Datetime(parsed)
        }
        Value::Array(array) => {
            let mut items = Vec::with_capacity(array.len());
            for (index, item) in array.iter().enumerate() {
                items.push(convert_value(item, input).map_err(|e| e.index(index))?);
            }
            Document::Array(items)
        }
        Value::InlineTable(table) => convert_inline(table, input)?,
    })
}

fn convert_inline(table: &InlineTable, input: &str) -> Result<Document, DecodeError> {
    let mut out = Table::new();
    for (key, value) in table.iter() {
        let doc = convert_value(value, input).map_err(|e| e.key(key))?;
        out.insert(key.to_string(), doc);
    }
    Ok(Document::Table(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tomlbind_core::{DatetimeKind, Kind};

    #[test]
    fn tables_arrays_and_inline_tables() {
        let doc = parse_document(
            r#"
            title = "demo"
            ratio = 0.5
            ports = [80, 443]
            owner = { name = "ops", active = true }

            [[servers]]
            host = "a"

            [[servers]]
            host = "b"
            "#,
        )
        .unwrap();

        assert_eq!(doc.get("title"), Some(&Document::from("demo")));
        assert_eq!(doc.get("ratio"), Some(&Document::Float(0.5)));
        assert_eq!(
            doc.get("ports"),
            Some(&Document::Array(vec![80i64.into(), 443i64.into()]))
        );
        assert_eq!(
            doc.get("owner").and_then(|o| o.get("active")),
            Some(&Document::Boolean(true))
        );

        let servers = doc.get("servers").and_then(Document::as_array).unwrap();
        assert_eq!(servers.len(), 2);
        assert_eq!(servers[1].get("host"), Some(&Document::from("b")));
    }

    #[test]
    fn keys_keep_document_order() {
        let doc = parse_document("zeta = 1\nalpha = 2\nmid = 3").unwrap();
        let keys: Vec<_> = doc.as_table().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn datetimes_keep_their_kind() {
        let doc = parse_document(
            "at = 1979-05-27T07:32:00Z\nday = 1979-05-27\nclock = 07:32:00",
        )
        .unwrap();
        let kind_of = |key: &str| match doc.get(key) {
            Some(Document::Datetime(dt)) => dt.kind,
            other => panic!("{key}: expected datetime, got {other:?}"),
        };
        assert_eq!(kind_of("at"), DatetimeKind::Offset { offset_minutes: 0 });
        assert_eq!(kind_of("day"), DatetimeKind::LocalDate);
        assert_eq!(kind_of("clock"), DatetimeKind::LocalTime);
    }

    #[test]
    fn syntax_errors_carry_a_span() {
        let err = parse_document("key = = 1").unwrap_err();
        assert_eq!(err.kind.code(), "tomlbind::parse");
        assert!(err.span.is_some());
        assert_eq!(err.source_code.as_deref(), Some("key = = 1"));
        assert!(err.path.is_empty());
    }

    #[test]
    fn empty_input_is_an_empty_table() {
        let doc = parse_document("").unwrap();
        assert_eq!(doc.kind(), Kind::Table);
        assert_eq!(doc.as_table().map(|t| t.len()), Some(0));
    }
}
