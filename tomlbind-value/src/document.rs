//! The parsed, in-memory document tree handed to the decoder.

use core::fmt;

use indexmap::IndexMap;

use crate::Datetime;

/// A table: string keys to documents, in the order the parser produced them.
pub type Table = IndexMap<String, Document>;

/// A node of a parsed configuration document.
///
/// Documents are produced by a parser front end and only ever read by the
/// decoder.
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    /// A table of key/value pairs
    Table(Table),
    /// An ordered sequence of documents
    Array(Vec<Document>),
    /// A string
    String(String),
    /// A 64-bit signed integer
    Integer(i64),
    /// A 64-bit float
    Float(f64),
    /// A boolean
    Boolean(bool),
    /// A date, time, or date-time
    Datetime(Datetime),
}

/// The kind of a [`Document`] node, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// [`Document::Table`]
    Table,
    /// [`Document::Array`]
    Array,
    /// [`Document::String`]
    String,
    /// [`Document::Integer`]
    Integer,
    /// [`Document::Float`]
    Float,
    /// [`Document::Boolean`]
    Boolean,
    /// [`Document::Datetime`]
    Datetime,
}

impl Kind {
    /// Lowercase name used in diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Table => "table",
            Kind::Array => "array",
            Kind::String => "string",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Boolean => "boolean",
            Kind::Datetime => "datetime",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Default for Document {
    /// An empty table, which is what an empty source text parses to.
    fn default() -> Self {
        Document::Table(Table::new())
    }
}

impl Document {
    /// Returns the kind of this node.
    pub fn kind(&self) -> Kind {
        match self {
            Document::Table(_) => Kind::Table,
            Document::Array(_) => Kind::Array,
            Document::String(_) => Kind::String,
            Document::Integer(_) => Kind::Integer,
            Document::Float(_) => Kind::Float,
            Document::Boolean(_) => Kind::Boolean,
            Document::Datetime(_) => Kind::Datetime,
        }
    }

    /// Returns the table if this is a [`Document::Table`].
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Document::Table(table) => Some(table),
            _ => None,
        }
    }

    /// Returns the elements if this is a [`Document::Array`].
    pub fn as_array(&self) -> Option<&[Document]> {
        match self {
            Document::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Looks up `key` if this is a table.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.as_table().and_then(|table| table.get(key))
    }
}

impl From<Table> for Document {
    fn from(table: Table) -> Self {
        Document::Table(table)
    }
}

impl From<Vec<Document>> for Document {
    fn from(items: Vec<Document>) -> Self {
        Document::Array(items)
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Document::String(s.to_string())
    }
}

impl From<String> for Document {
    fn from(s: String) -> Self {
        Document::String(s)
    }
}

impl From<i64> for Document {
    fn from(n: i64) -> Self {
        Document::Integer(n)
    }
}

impl From<f64> for Document {
    fn from(n: f64) -> Self {
        Document::Float(n)
    }
}

impl From<bool> for Document {
    fn from(b: bool) -> Self {
        Document::Boolean(b)
    }
}

impl From<Datetime> for Document {
    fn from(dt: Datetime) -> Self {
        Document::Datetime(dt)
    }
}

impl<K: Into<String>, V: Into<Document>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Document::Table(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
