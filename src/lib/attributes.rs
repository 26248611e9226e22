use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smartstring::alias::String as Name;
use std::collections::BTreeMap;

/// A scalar feature property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Integer(i64),
    Float(f64),
    Timestamp(DateTime<FixedOffset>),
    String(String),
    Null,
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Float(f) => Some(*f),
            AttributeValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            AttributeValue::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, AttributeValue::Null)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<f64> for AttributeValue {
    fn from(f: f64) -> Self {
        AttributeValue::Float(f)
    }
}

impl From<i64> for AttributeValue {
    fn from(i: i64) -> Self {
        AttributeValue::Integer(i)
    }
}

impl From<DateTime<FixedOffset>> for AttributeValue {
    fn from(ts: DateTime<FixedOffset>) -> Self {
        AttributeValue::Timestamp(ts)
    }
}

impl<T: Into<AttributeValue>> From<Option<T>> for AttributeValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(AttributeValue::Null)
    }
}

/// Storage for the properties of a feature.
///
/// Names are unique. `iter` has to yield entries in the order the
/// implementation wants them written back out; the default [`Attributes`]
/// keeps insertion order.
pub trait AttributesTable {
    /// Stores `value` under `name`, returning the value it replaced.
    fn insert(&mut self, name: &str, value: AttributeValue) -> Option<AttributeValue>;
    fn get(&self, name: &str) -> Option<&AttributeValue>;
    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = (&'a str, &'a AttributeValue)> + 'a>;
    fn len(&self) -> usize;

    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Insertion-ordered attribute table.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attributes(IndexMap<Name, AttributeValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(|name| name.as_str())
    }
}

impl AttributesTable for Attributes {
    fn insert(&mut self, name: &str, value: AttributeValue) -> Option<AttributeValue> {
        self.0.insert(name.into(), value)
    }

    fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.0.get(name)
    }

    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = (&'a str, &'a AttributeValue)> + 'a> {
        Box::new(self.0.iter().map(|(name, value)| (name.as_str(), value)))
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

impl<N: AsRef<str>, V: Into<AttributeValue>> std::iter::FromIterator<(N, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let map = iter
            .into_iter()
            .map(|(name, value)| (name.as_ref().into(), value.into()))
            .collect();
        Attributes(map)
    }
}

/// Name-sorted storage, for callers that want deterministic output regardless
/// of the input's member order.
impl AttributesTable for BTreeMap<String, AttributeValue> {
    fn insert(&mut self, name: &str, value: AttributeValue) -> Option<AttributeValue> {
        BTreeMap::insert(self, name.to_string(), value)
    }

    fn get(&self, name: &str) -> Option<&AttributeValue> {
        BTreeMap::get(self, name)
    }

    fn iter<'a>(&'a self) -> Box<dyn Iterator<Item = (&'a str, &'a AttributeValue)> + 'a> {
        Box::new(BTreeMap::iter(self).map(|(name, value)| (name.as_str(), value)))
    }

    fn len(&self) -> usize {
        BTreeMap::len(self)
    }
}
