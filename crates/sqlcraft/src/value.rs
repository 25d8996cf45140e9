//! Literal values inlined into rendered SQL.
//!
//! Values are never bound as parameters: [`Value::write_sql`] formats them
//! through the active [`Dialect`] (string escaping, boolean spelling and
//! date/time layout are dialect decisions).

use crate::dialect::Dialect;
use crate::error::{SqlError, SqlResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt::Write;
use uuid::Uuid;

/// A literal SQL value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `NULL`
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    /// Must be finite; NaN and infinities fail at render time.
    Float(f64),
    String(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Uuid(Uuid),
    /// Rendered as a string literal holding the serialized document.
    Json(serde_json::Value),
    #[cfg(feature = "rust_decimal")]
    Decimal(rust_decimal::Decimal),
}

impl Value {
    /// Check if this value is `NULL`.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value renders as an unquoted number.
    pub fn is_numeric(&self) -> bool {
        match self {
            Value::Int(_) | Value::UInt(_) | Value::Float(_) => true,
            #[cfg(feature = "rust_decimal")]
            Value::Decimal(_) => true,
            _ => false,
        }
    }

    /// Write the literal using the dialect's formatting rules.
    pub fn write_sql(&self, dialect: &dyn Dialect, out: &mut String) -> SqlResult<()> {
        match self {
            Value::Null => out.push_str("NULL"),
            Value::Bool(b) => dialect.write_bool(out, *b),
            Value::Int(n) => {
                let _ = write!(out, "{n}");
            }
            Value::UInt(n) => {
                let _ = write!(out, "{n}");
            }
            Value::Float(f) => {
                if !f.is_finite() {
                    return Err(SqlError::InvalidLiteral(format!(
                        "{f} has no SQL representation"
                    )));
                }
                let _ = write!(out, "{f}");
            }
            Value::String(s) => dialect.write_string(out, s),
            Value::Date(d) => dialect.write_date(out, d),
            Value::DateTime(dt) => dialect.write_datetime(out, dt),
            Value::Uuid(u) => dialect.write_string(out, &u.hyphenated().to_string()),
            Value::Json(doc) => dialect.write_string(out, &doc.to_string()),
            #[cfg(feature = "rust_decimal")]
            Value::Decimal(d) => {
                let _ = write!(out, "{d}");
            }
        }
        Ok(())
    }
}

macro_rules! impl_from_int {
    ($variant:ident, $target:ty; $($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Self {
                    Value::$variant(<$target>::from(v))
                }
            }
        )*
    };
}

impl_from_int!(Int, i64; i8, i16, i32, i64);
impl_from_int!(UInt, u64; u8, u16, u32, u64);

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::UInt(v as u64)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::DateTime(v.naive_utc())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        Value::Json(v)
    }
}

#[cfg(feature = "rust_decimal")]
impl From<rust_decimal::Decimal> for Value {
    fn from(v: rust_decimal::Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
