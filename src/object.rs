//! Value types consumed by the serializer.
//!
//! [`Value`] is a closed tagged union: callers decide at construction time whether a
//! string is a name, a text string or an already formatted token.

use chrono::{DateTime, Datelike, Timelike, Utc};
use indexmap::IndexMap;

/// Dictionary entries in insertion order.
pub type Dictionary = IndexMap<String, Value>;

/// A value that can be rendered into document syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Name token, written with a leading `/`
    Name(String),
    /// Text string, written as an escaped literal string
    Text(String),
    /// Binary data, written as a hex string
    Binary(Vec<u8>),
    /// Reference to an indirect object
    Reference(ObjectRef),
    /// UTC date, written as a `D:` literal string
    Date(PdfDate),
    /// Array of values
    Array(Vec<Value>),
    /// Dictionary (insertion order preserved)
    Dictionary(Dictionary),
    /// Number, rounded to six decimal places
    Number(f64),
    /// Boolean value
    Boolean(bool),
    /// Null object
    Null,
    /// Already formatted token, written verbatim
    Raw(String),
}

impl Value {
    /// Create a Name value.
    pub fn name(s: impl Into<String>) -> Self {
        Value::Name(s.into())
    }

    /// Create a Text value.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Create a Binary value.
    pub fn binary(data: impl Into<Vec<u8>>) -> Self {
        Value::Binary(data.into())
    }

    /// Create a Raw value.
    pub fn raw(s: impl Into<String>) -> Self {
        Value::Raw(s.into())
    }

    /// Create a Dictionary value from `(key, value)` pairs, keeping their order.
    pub fn dict<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Dictionary(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Get the type name of this value (without data).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Name(_) => "Name",
            Value::Text(_) => "Text",
            Value::Binary(_) => "Binary",
            Value::Reference(_) => "Reference",
            Value::Date(_) => "Date",
            Value::Array(_) => "Array",
            Value::Dictionary(_) => "Dictionary",
            Value::Number(_) => "Number",
            Value::Boolean(_) => "Boolean",
            Value::Null => "Null",
            Value::Raw(_) => "Raw",
        }
    }

    /// Try to cast to number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to cast to name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Value::Name(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<ObjectRef> for Value {
    fn from(r: ObjectRef) -> Self {
        Value::Reference(r)
    }
}

impl From<PdfDate> for Value {
    fn from(d: PdfDate) -> Self {
        Value::Date(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Dictionary> for Value {
    fn from(dict: Dictionary) -> Self {
        Value::Dictionary(dict)
    }
}

/// Reference to an indirect object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.id, self.gen)
    }
}

/// A calendar date and time in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdfDate {
    /// Year (four digits are written)
    pub year: u32,
    /// Month, 1-12
    pub month: u32,
    /// Day of month, 1-31
    pub day: u32,
    /// Hour, 0-23
    pub hour: u32,
    /// Minute, 0-59
    pub minute: u32,
    /// Second, 0-59
    pub second: u32,
}

impl PdfDate {
    /// Create a date from its components.
    pub fn new(year: u32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Render as `D:YYYYMMDDHHmmSSZ`.
    ///
    /// Each field keeps only as many trailing digits as its width allows.
    pub fn to_date_string(&self) -> String {
        format!(
            "D:{:04}{:02}{:02}{:02}{:02}{:02}Z",
            self.year % 10_000,
            self.month % 100,
            self.day % 100,
            self.hour % 100,
            self.minute % 100,
            self.second % 100
        )
    }
}

impl From<DateTime<Utc>> for PdfDate {
    fn from(d: DateTime<Utc>) -> Self {
        // Years before the common era have no four-digit form; keep the magnitude.
        Self::new(
            d.year().unsigned_abs(),
            d.month(),
            d.day(),
            d.hour(),
            d.minute(),
            d.second(),
        )
    }
}
