//! The report input model.
//!
//! Report data arrives as JSON and is converted into [`ReportValue`], a closed
//! recursive type whose records keep their input key order.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// An ordered mapping of field names to values.
pub type Record = IndexMap<String, ReportValue>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Number::Int(i) => i == 0,
            Number::Float(f) => f == 0.0,
        }
    }
}

impl fmt::Display for Number {
    /// Integers print as-is; floats always carry a fractional part (`3.0`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{:.1}", v),
            Number::Float(v) => write!(f, "{}", v),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ReportValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
    List(Vec<ReportValue>),
    Record(Record),
}

impl ReportValue {
    /// Whether the value counts as present. Null, `false`, zero and empty
    /// text, lists and records do not.
    pub fn is_truthy(&self) -> bool {
        match self {
            ReportValue::Null => false,
            ReportValue::Bool(b) => *b,
            ReportValue::Number(n) => !n.is_zero(),
            ReportValue::Text(s) => !s.is_empty(),
            ReportValue::List(items) => !items.is_empty(),
            ReportValue::Record(record) => !record.is_empty(),
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            ReportValue::Record(record) => Some(record),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ReportValue]> {
        match self {
            ReportValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            ReportValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, ReportValue::Bool(_))
    }
}

impl From<serde_json::Value> for ReportValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => ReportValue::Null,
            Value::Bool(b) => ReportValue::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => ReportValue::Number(Number::Int(i)),
                None => ReportValue::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            Value::String(s) => ReportValue::Text(s),
            Value::Array(items) => ReportValue::List(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                ReportValue::Record(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl<'de> Deserialize<'de> for ReportValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        serde_json::Value::deserialize(deserializer).map(Into::into)
    }
}

impl From<&str> for ReportValue {
    fn from(s: &str) -> Self {
        ReportValue::Text(s.to_string())
    }
}

impl From<i64> for ReportValue {
    fn from(i: i64) -> Self {
        ReportValue::Number(Number::Int(i))
    }
}

impl From<f64> for ReportValue {
    fn from(f: f64) -> Self {
        ReportValue::Number(Number::Float(f))
    }
}

impl From<bool> for ReportValue {
    fn from(b: bool) -> Self {
        ReportValue::Bool(b)
    }
}

/// The full generator input: an envelope whose `data` record holds the sections.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ReportInput {
    #[serde(default)]
    pub data: Option<ReportValue>,
}

impl ReportInput {
    pub fn new(sections: Record) -> Self {
        Self {
            data: Some(ReportValue::Record(sections)),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The section record. Absent or non-record `data` yields no sections.
    pub fn sections(&self) -> Option<&Record> {
        self.data.as_ref().and_then(ReportValue::as_record)
    }
}
