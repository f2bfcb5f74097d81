//! Header block types.

use std::ops::Range;

use rustc_hash::FxHashMap;

/// A header value: a scalar or a bracketed / dashed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderValue {
    Scalar(String),
    List(Vec<String>),
}

impl HeaderValue {
    /// Empty scalars and empty lists count as absent.
    pub fn is_empty(&self) -> bool {
        match self {
            HeaderValue::Scalar(s) => s.is_empty(),
            HeaderValue::List(items) => items.is_empty(),
        }
    }
}

/// Typed view of one key. `Missing` covers both absent and empty values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    Scalar(&'a str),
    List(&'a [String]),
    Missing,
}

impl Field<'_> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }
}

/// A parsed header block.
#[derive(Debug, Clone, Default)]
pub struct Header {
    values: FxHashMap<String, HeaderValue>,
    keys: Vec<String>,
    /// Bytes of the whole block, both delimiters included.
    pub range: Range<usize>,
    /// Offset of the closing `---` line. New keys are inserted here.
    pub closing_offset: usize,
}

impl Header {
    pub(crate) fn new(range: Range<usize>, closing_offset: usize) -> Self {
        Self {
            values: FxHashMap::default(),
            keys: Vec::new(),
            range,
            closing_offset,
        }
    }

    /// Later duplicates replace earlier values.
    pub(crate) fn insert(&mut self, key: String, value: HeaderValue) {
        if !self.values.contains_key(&key) {
            self.keys.push(key.clone());
        }
        self.values.insert(key, value);
    }

    pub fn field(&self, key: &str) -> Field<'_> {
        match self.values.get(key) {
            Some(v) if v.is_empty() => Field::Missing,
            Some(HeaderValue::Scalar(s)) => Field::Scalar(s),
            Some(HeaderValue::List(items)) => Field::List(items),
            None => Field::Missing,
        }
    }

    pub fn scalar(&self, key: &str) -> Option<&str> {
        match self.field(key) {
            Field::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn list(&self, key: &str) -> Option<&[String]> {
        match self.field(key) {
            Field::List(items) => Some(items),
            _ => None,
        }
    }

    /// True when `key` has a non-empty value.
    pub fn has(&self, key: &str) -> bool {
        !self.field(key).is_missing()
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }

    /// Entries of `required` that are absent or empty.
    pub fn missing<'k>(&self, required: &'k [String]) -> Vec<&'k str> {
        required
            .iter()
            .filter(|k| !self.has(k))
            .map(String::as_str)
            .collect()
    }
}
