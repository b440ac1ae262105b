//! Engine-typed value model.
//!
//! A [`Value`] is produced by scalar coercion or assembled by the engine's
//! evaluator and is immutable after construction. Scalar variants carry
//! their provenance through the variant tag itself; `String` and `Token`
//! hold the same payload under different scalar kinds.

use serde_json::Value as JsonValue;

use crate::error::{BridgeError, Result};

/// Identity of a supported scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Int,
    Int64,
    Float,
    Boolean,
    String,
    Token,
    Time,
    Uuid,
    Url,
}

/// Tagged engine value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i32),
    Int64(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    Token(String),
    List(Vec<Value>),
    Object(Vec<(String, Value)>),
}

/// Ordered field-argument list: resolved call arguments as produced by the
/// engine before a resolution call, consumed read-only by the bridge.
pub type ArgList = Vec<(String, Value)>;

impl Value {
    /// Scalar provenance of this value, if it is a scalar.
    pub fn kind(&self) -> Option<ScalarKind> {
        match self {
            Value::Int(_) => Some(ScalarKind::Int),
            Value::Int64(_) => Some(ScalarKind::Int64),
            Value::Float(_) => Some(ScalarKind::Float),
            Value::Boolean(_) => Some(ScalarKind::Boolean),
            Value::String(_) => Some(ScalarKind::String),
            Value::Token(_) => Some(ScalarKind::Token),
            Value::Null | Value::List(_) | Value::Object(_) => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Render this value as JSON. Object member order is preserved.
    pub fn to_json(&self) -> Result<JsonValue> {
        match self {
            Value::Null => Ok(JsonValue::Null),
            Value::Int(i) => Ok(JsonValue::Number((*i).into())),
            Value::Int64(i) => Ok(JsonValue::Number((*i).into())),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .ok_or_else(|| BridgeError::Eval(format!("non-finite float value: {f}"))),
            Value::Boolean(b) => Ok(JsonValue::Bool(*b)),
            Value::String(s) | Value::Token(s) => Ok(JsonValue::String(s.clone())),
            Value::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(item.to_json()?);
                }
                Ok(JsonValue::Array(out))
            }
            Value::Object(members) => {
                let mut map = serde_json::Map::with_capacity(members.len());
                for (name, member) in members {
                    map.insert(name.clone(), member.to_json()?);
                }
                Ok(JsonValue::Object(map))
            }
        }
    }
}
