//! The binder: walks a [`Document`] and a destination's [`Poke`] in lockstep.

use alloc::format;
use alloc::string::{String, ToString};

use log::{debug, trace};
use tomlbind_core::{
    Bind, Def, Document, Field, Poke, PokeArray, PokeList, PokeMap, PokeOption, PokeStruct, Shape,
    Value,
};

use crate::defaults::apply_defaults;
use crate::scalar::bind_scalar;
use crate::toml::parse_document;
use crate::{DecodeError, DecodeErrorKind, DecodeOptions, FieldMatching};

/// A decoder configured with [`DecodeOptions`].
///
/// The free functions ([`decode`](crate::decode), [`from_str`](crate::from_str),
/// ...) use `Decoder::default()`.
///
/// ```
/// use tomlbind::{Decoder, DecodeOptions, OverflowPolicy};
///
/// let decoder = Decoder::new(DecodeOptions::default().overflow(OverflowPolicy::Saturate));
/// let n: std::collections::HashMap<String, u8> = decoder.from_str("big = 1000").unwrap();
/// assert_eq!(n["big"], 255);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    options: DecodeOptions,
}

impl Decoder {
    /// Creates a decoder with the given options.
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    /// The options this decoder runs with.
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Decodes `doc` over an existing value.
    ///
    /// Declared defaults go into fields still holding their zero value, then
    /// the document is bound on top. Map entries absent from the document are
    /// kept; sequences present in the document are replaced. On error the
    /// target may be partially written.
    pub fn decode_into<T: Bind>(&self, doc: &Document, target: &mut T) -> Result<(), DecodeError> {
        debug!("decoding {} into {}", doc.kind(), T::SHAPE);
        let mut poke = target.poke();
        if self.options.apply_defaults {
            apply_defaults(&mut poke)?;
        }
        Binder {
            options: &self.options,
        }
        .bind(doc, poke)
    }

    /// Decodes `doc` into a fresh `T`, starting from its zero value.
    pub fn decode<T: Bind>(&self, doc: &Document) -> Result<T, DecodeError> {
        let mut target = T::zero();
        self.decode_into(doc, &mut target)?;
        Ok(target)
    }

    /// Parses TOML text and decodes it into a fresh `T`.
    pub fn from_str<T: Bind>(&self, input: &str) -> Result<T, DecodeError> {
        let doc = parse_document(input)?;
        self.decode(&doc).map_err(|e| e.with_source(input))
    }

    /// Parses TOML text and decodes it over an existing value.
    pub fn from_str_into<T: Bind>(&self, input: &str, target: &mut T) -> Result<(), DecodeError> {
        let doc = parse_document(input)?;
        self.decode_into(&doc, target)
            .map_err(|e| e.with_source(input))
    }
}

struct Binder<'o> {
    options: &'o DecodeOptions,
}

impl Binder<'_> {
    fn bind(&self, doc: &Document, target: Poke<'_>) -> Result<(), DecodeError> {
        match target {
            Poke::Scalar(slot) => bind_scalar(doc, slot, self.options.overflow),
            Poke::Struct(s) => self.bind_struct(doc, s),
            Poke::Map(m) => self.bind_map(doc, m),
            Poke::List(l) => self.bind_list(doc, l),
            Poke::Array(a) => self.bind_array(doc, a),
            Poke::Option(o) => self.bind_option(doc, o),
            Poke::Dynamic(v) => {
                bind_dynamic(doc, v);
                Ok(())
            }
            Poke::Opaque(shape) => Err(DecodeErrorKind::UnsupportedTarget {
                target: shape.type_identifier,
            }
            .into()),
        }
    }

    /// Binds into a location that was just created: a map value, a list
    /// element, a pointee. Such a location gets its declared defaults first.
    fn bind_fresh(&self, doc: &Document, mut target: Poke<'_>) -> Result<(), DecodeError> {
        if self.options.apply_defaults {
            apply_defaults(&mut target)?;
        }
        self.bind(doc, target)
    }

    fn bind_struct(&self, doc: &Document, s: &mut dyn PokeStruct) -> Result<(), DecodeError> {
        let shape = s.shape();
        let table = doc.as_table().ok_or_else(|| mismatch(shape, doc))?;
        trace!("struct {} <- table of {} keys", shape, table.len());

        let fields = s.fields();
        for (key, value) in table {
            let Some(index) = self.match_field(fields, key) else {
                trace!("no field of {} matches `{}`, skipping", shape, key);
                continue;
            };
            let Some(field) = s.field(index) else {
                continue;
            };
            self.bind(value, field).map_err(|e| e.key(key))?;
        }
        Ok(())
    }

    fn match_field(&self, fields: &[Field], key: &str) -> Option<usize> {
        let exact = fields.iter().position(|f| f.name == key);
        match self.options.field_matching {
            FieldMatching::Exact => exact,
            FieldMatching::CaseInsensitiveFallback => {
                exact.or_else(|| fields.iter().position(|f| f.name.eq_ignore_ascii_case(key)))
            }
        }
    }

    fn bind_map(&self, doc: &Document, m: &mut dyn PokeMap) -> Result<(), DecodeError> {
        let shape = m.shape();
        let table = doc.as_table().ok_or_else(|| mismatch(shape, doc))?;
        trace!(
            "map {} ({} existing) <- table of {} keys",
            shape,
            m.len(),
            table.len()
        );

        for (key, value) in table {
            let entry = m
                .fresh_entry(key)
                .map_err(|e| DecodeError::from(e).key(key))?;
            self.bind_fresh(value, entry).map_err(|e| e.key(key))?;
        }
        Ok(())
    }

    fn bind_list(&self, doc: &Document, l: &mut dyn PokeList) -> Result<(), DecodeError> {
        let shape = l.shape();
        let items = doc.as_array().ok_or_else(|| mismatch(shape, doc))?;
        trace!("list {} <- array of {}", shape, items.len());

        l.clear();
        for (index, item) in items.iter().enumerate() {
            let slot = l.push_fresh();
            self.bind_fresh(item, slot).map_err(|e| e.index(index))?;
        }
        Ok(())
    }

    fn bind_array(&self, doc: &Document, a: &mut dyn PokeArray) -> Result<(), DecodeError> {
        let shape = a.shape();
        let items = doc.as_array().ok_or_else(|| mismatch(shape, doc))?;
        if items.len() != a.len() {
            return Err(DecodeErrorKind::TypeMismatch {
                expected: expected(shape),
                got: format!("array of {} elements", items.len()),
            }
            .into());
        }
        trace!("array {} <- array of {}", shape, items.len());

        for (index, item) in items.iter().enumerate() {
            let Some(slot) = a.fresh_element(index) else {
                break;
            };
            self.bind_fresh(item, slot).map_err(|e| e.index(index))?;
        }
        Ok(())
    }

    fn bind_option(&self, doc: &Document, o: &mut dyn PokeOption) -> Result<(), DecodeError> {
        trace!(
            "allocating {} ({})",
            o.shape(),
            if o.is_some() { "replacing" } else { "was empty" }
        );
        let pointee = o.allocate();
        self.bind_fresh(doc, pointee)
    }
}

/// A table over an existing `Value::Map` merges like any other map: the
/// document's keys overwrite, the rest are kept. Anything else replaces.
fn bind_dynamic(doc: &Document, target: &mut Value) {
    match (target, doc) {
        (Value::Map(map), Document::Table(table)) => {
            trace!(
                "dynamic map ({} existing) <- table of {} keys",
                map.len(),
                table.len()
            );
            for (key, child) in table {
                map.insert(key.clone(), Value::from(child));
            }
        }
        (target, doc) => {
            trace!("dynamic <- {}", doc.kind());
            *target = Value::from(doc);
        }
    }
}

fn mismatch(shape: &'static Shape, doc: &Document) -> DecodeError {
    DecodeErrorKind::TypeMismatch {
        expected: expected(shape),
        got: doc.kind().to_string(),
    }
    .into()
}

/// What a destination accepts, for error messages.
fn expected(shape: &'static Shape) -> String {
    match shape.def {
        Def::Struct(_) | Def::Map => format!("table (for {shape})"),
        Def::List => format!("array (for {shape})"),
        Def::Array { n } => format!("array of {n} elements"),
        _ => shape.type_identifier.to_string(),
    }
}
