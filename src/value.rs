//! Data values and their InfluxQL literal forms.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, Local, Utc};

use crate::ast::ToInfluxQl;
use crate::duration::format_duration;
use crate::error::QueryResult;

/// Timestamp layout: RFC3339, second precision, always UTC.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A value substituted into a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text, rendered single-quoted.
    Text(String),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Elapsed time, rendered as a duration token (`10m`).
    Duration(Duration),
    /// Absolute time, rendered as a quoted RFC3339 UTC timestamp.
    Timestamp(DateTime<Utc>),
    /// Anything else, already converted to text. Rendered single-quoted.
    Other(String),
}

impl Value {
    /// Wrap any displayable value in the generic fallback form.
    pub fn other(v: impl fmt::Display) -> Self {
        Value::Other(v.to_string())
    }
}

/// String values are embedded verbatim: a single quote inside the text is not
/// escaped and will end the literal early.
impl ToInfluxQl for Value {
    fn to_influxql(&self) -> QueryResult<String> {
        Ok(match self {
            Value::Text(s) => format!("'{}'", s),
            Value::Int(n) => n.to_string(),
            Value::UInt(n) => n.to_string(),
            Value::Duration(d) => format_duration(*d),
            Value::Timestamp(t) => format!("'{}'", t.format(TIMESTAMP_FORMAT)),
            Value::Other(s) => format!("'{}'", s),
        })
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) | Value::Other(s) => write!(f, "{}", s),
            Value::Int(n) => write!(f, "{}", n),
            Value::UInt(n) => write!(f, "{}", n),
            Value::Duration(d) => write!(f, "{}", format_duration(*d)),
            Value::Timestamp(t) => write!(f, "{}", t.format(TIMESTAMP_FORMAT)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::Int(n as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(n: $t) -> Self {
                Value::UInt(n as u64)
            }
        })*
    };
}

macro_rules! impl_from_display {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::other(v)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);
impl_from_display!(f32, f64, bool, char);

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(t: DateTime<Utc>) -> Self {
        Value::Timestamp(t)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(t: DateTime<FixedOffset>) -> Self {
        Value::Timestamp(t.with_timezone(&Utc))
    }
}

impl From<DateTime<Local>> for Value {
    fn from(t: DateTime<Local>) -> Self {
        Value::Timestamp(t.with_timezone(&Utc))
    }
}

/// Build a `Vec<Value>` from values of mixed types.
///
/// ```
/// use influxql::{vals, Value};
///
/// let v = vals!["Toronto", 500];
/// assert_eq!(v, vec![Value::from("Toronto"), Value::Int(500)]);
/// ```
#[macro_export]
macro_rules! vals {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($v:expr),+ $(,)?) => {
        vec![$($crate::Value::from($v)),+]
    };
}
