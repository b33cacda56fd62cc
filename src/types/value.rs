//! Values stored in error data and context snapshots.

use crate::hidden::Hidden;
use core::fmt;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Flattened key/value map produced by [`Error::fill`](crate::Error::fill) and
/// context snapshots.
pub type ContextMap = BTreeMap<String, Value>;

/// A loosely typed value attached to an error.
///
/// Integers that fit in `i64` are always stored as [`Value::Int`], so `5u8`
/// and `5usize` compare equal once stored.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(untagged))]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    Hidden(Hidden),
}

impl Value {
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::UInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    #[inline]
    pub fn is_hidden(&self) -> bool {
        matches!(self, Self::Hidden(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::UInt(u) => write!(f, "{u}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
            Self::Hidden(h) => write!(f, "{h}"),
        }
    }
}

macro_rules! impl_from_lossless {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            #[inline]
            fn from(v: $t) -> Self {
                Self::Int(i64::from(v))
            }
        })*
    };
}

macro_rules! impl_from_wide_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            #[inline]
            fn from(v: $t) -> Self {
                match i64::try_from(v) {
                    Ok(i) => Self::Int(i),
                    Err(_) => Self::UInt(v as u64),
                }
            }
        })*
    };
}

impl_from_lossless!(i8, i16, i32, i64, u8, u16, u32);
impl_from_wide_unsigned!(u64, usize);

impl From<isize> for Value {
    #[inline]
    fn from(v: isize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    #[inline]
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(v: &str) -> Self {
        Self::Str(v.to_owned())
    }
}

impl From<String> for Value {
    #[inline]
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&String> for Value {
    #[inline]
    fn from(v: &String) -> Self {
        Self::Str(v.clone())
    }
}

impl From<Hidden> for Value {
    #[inline]
    fn from(v: Hidden) -> Self {
        Self::Hidden(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
