//! Constant values carried by expression trees.

use crate::ty::{EnumDef, PrimitiveType, TypeRef};
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a date-time relates to UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateTimeKind {
    Unspecified,
    Utc,
    /// A fixed offset east of UTC, in seconds.
    Offset(i32),
}

/// A calendar date-time with its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateTimeValue {
    pub value: NaiveDateTime,
    pub kind: DateTimeKind,
}

impl DateTimeValue {
    pub fn unspecified(value: NaiveDateTime) -> Self {
        Self {
            value,
            kind: DateTimeKind::Unspecified,
        }
    }

    pub fn utc(value: NaiveDateTime) -> Self {
        Self {
            value,
            kind: DateTimeKind::Utc,
        }
    }

    pub fn with_offset(value: NaiveDateTime, offset_seconds: i32) -> Self {
        Self {
            value,
            kind: DateTimeKind::Offset(offset_seconds),
        }
    }
}

/// A compile-time constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f32),
    Double(f64),
    Decimal(Decimal),
    String(String),
    Char(char),
    DateTime(DateTimeValue),
    Guid(Uuid),
    Enum { def: EnumDef, raw: i64 },
    Type(TypeRef),
    Sequence(Vec<Value>),
}

impl Value {
    pub fn enum_symbol(def: &EnumDef, symbol: &str) -> Option<Self> {
        def.value_of(symbol).map(|raw| Value::Enum {
            def: def.clone(),
            raw,
        })
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The type a constant has when the caller does not state one.
    pub fn natural_type(&self) -> TypeRef {
        match self {
            Value::Null => TypeRef::object(),
            Value::Bool(_) => TypeRef::boolean(),
            Value::Int(_) => TypeRef::int32(),
            Value::Float(_) => TypeRef::single(),
            Value::Double(_) => TypeRef::double(),
            Value::Decimal(_) => TypeRef::decimal(),
            Value::String(_) => TypeRef::string(),
            Value::Char(_) => TypeRef::Primitive(PrimitiveType::Char),
            Value::DateTime(_) => TypeRef::date_time(),
            Value::Guid(_) => TypeRef::guid(),
            Value::Enum { def, .. } => TypeRef::Enum(def.clone()),
            Value::Type(_) => TypeRef::TypeLiteral,
            Value::Sequence(items) => TypeRef::sequence(
                items
                    .first()
                    .map(Value::natural_type)
                    .unwrap_or_else(TypeRef::object),
            ),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Value::Double(d)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Value::Float(f)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Decimal(d)
    }
}

impl From<Uuid> for Value {
    fn from(g: Uuid) -> Self {
        Value::Guid(g)
    }
}

impl From<DateTimeValue> for Value {
    fn from(dt: DateTimeValue) -> Self {
        Value::DateTime(dt)
    }
}
