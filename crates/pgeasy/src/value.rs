//! Literal values carried by a query descriptor.
//!
//! Every value that ends up in a WHERE/AND predicate or in INSERT/UPDATE
//! column lists is stored as a [`Value`] and only turned into SQL text by
//! [`escape`](crate::escape::escape) at render time.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// A scalar (or list of scalars) to be inlined as a SQL literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL `NULL`
    Null,
    Bool(bool),
    Int(i64),
    /// Integer outside the `i64` range, kept as its decimal digits
    Numeric(String),
    Float(f64),
    Text(String),
    /// Timestamp without time zone
    Timestamp(NaiveDateTime),
    /// Timestamp with time zone, rendered with an explicit `+00:00` offset
    TimestampTz(DateTime<Utc>),
    Uuid(uuid::Uuid),
    /// JSON document, inlined as its text form
    Json(serde_json::Value),
    /// Parenthesised, comma-separated list for `IN` predicates
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    match i64::try_from(v) {
                        Ok(i) => Self::Int(i),
                        Err(_) => Self::Numeric(v.to_string()),
                    }
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, isize, i128, u128);

impl From<f32> for Value {
    /// Goes through the shortest `f32` representation so `0.1f32` stays `0.1`.
    fn from(v: f32) -> Self {
        Self::Float(v.to_string().parse().unwrap_or_else(|_| f64::from(v)))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&String> for Value {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Self::Timestamp(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Self::TimestampTz(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Self::Timestamp(v.and_time(chrono::NaiveTime::MIN))
    }
}

impl From<uuid::Uuid> for Value {
    fn from(v: uuid::Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Self::List(v.into_iter().map(Into::into).collect())
    }
}

/// JSON scalars map onto the matching scalar variant, arrays onto [`Value::List`],
/// and objects stay as [`Value::Json`].
impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match v {
            Json::Null => Self::Null,
            Json::Bool(b) => Self::Bool(b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if n.is_u64() {
                    Self::Numeric(n.to_string())
                } else {
                    Self::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Self::Text(s),
            Json::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            obj @ Json::Object(_) => Self::Json(obj),
        }
    }
}

/// Convert a JSON object into an ordered column/value list for
/// [`QueryBuilder::insert`](crate::QueryBuilder::insert) and
/// [`QueryBuilder::update`](crate::QueryBuilder::update).
///
/// Column order follows the map's iteration order. Non-object input yields an
/// empty list.
pub fn values_from_json(obj: serde_json::Value) -> Vec<(String, Value)> {
    match obj {
        serde_json::Value::Object(map) => map.into_iter().map(|(k, v)| (k, v.into())).collect(),
        _ => Vec::new(),
    }
}
