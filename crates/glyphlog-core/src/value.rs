//! Loggable values.

use std::fmt;

/// A single loggable part passed to a logging method.
///
/// Sinks receive an ordered slice of these; a resolved prefix is always
/// inserted as a leading [`LogValue::Text`] part.
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    /// Absent value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Text, rendered verbatim.
    Text(String),
    /// Arbitrary structured data, rendered as compact JSON.
    Json(serde_json::Value),
}

impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::UInt(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
            Self::Json(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for LogValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for LogValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for LogValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for LogValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for LogValue {
            fn from(value: $ty) -> Self {
                Self::Int(i64::from(value))
            }
        })*
    };
}

macro_rules! from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for LogValue {
            fn from(value: $ty) -> Self {
                Self::UInt(u64::from(value))
            }
        })*
    };
}

from_signed!(i8, i16, i32, i64);
from_unsigned!(u8, u16, u32, u64);

impl From<usize> for LogValue {
    fn from(value: usize) -> Self {
        Self::UInt(u64::try_from(value).unwrap_or(u64::MAX))
    }
}

impl From<f32> for LogValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for LogValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<serde_json::Value> for LogValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// Builds a `Vec<LogValue>` from heterogeneous expressions.
///
/// ```ignore
/// let args = glyphlog_core::parts!["user", 42, true];
/// ```
#[macro_export]
macro_rules! parts {
    () => {
        ::std::vec::Vec::<$crate::LogValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::LogValue::from($value)),+]
    };
}
