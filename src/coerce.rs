//! Scalar coercion from host-native values into engine-typed values.

use crate::error::{BridgeError, Result};
use crate::host::HostValue;
use crate::schema::{TypeDef, TypeKind};
use crate::value::{ScalarKind, Value};

/// Convert a host value into a typed scalar [`Value`] for the given target
/// type.
///
/// A nil host value coerces to [`Value::Null`] for every scalar target.
/// Boolean accepts only host boolean literals; numeric and string truthiness
/// are rejected. Time, UUID, and URL targets fail explicitly rather than
/// producing a silent null.
pub fn coerce(value: &HostValue, target: Option<&TypeDef>) -> Result<Value> {
    let target = target
        .ok_or_else(|| BridgeError::Coercion("no target type for coercion".to_string()))?;

    let kind = match &target.kind {
        TypeKind::Scalar(kind) => *kind,
        _ => {
            return Err(BridgeError::Coercion(format!(
                "cannot coerce into non-scalar type {}",
                target.name
            )))
        }
    };

    if value.is_nil() {
        return Ok(Value::Null);
    }

    match kind {
        ScalarKind::Int => match value {
            HostValue::Int(i) => i32::try_from(*i).map(Value::Int).map_err(|_| {
                BridgeError::Coercion(format!("integer {i} does not fit in {}", target.name))
            }),
            HostValue::Float(f) if f.fract() == 0.0 && in_i32_range(*f) => {
                Ok(Value::Int(*f as i32))
            }
            _ => Err(mismatch(value, target)),
        },
        ScalarKind::Int64 => match value {
            HostValue::Int(i) => Ok(Value::Int64(*i)),
            HostValue::Float(f) if f.fract() == 0.0 && in_i64_range(*f) => {
                Ok(Value::Int64(*f as i64))
            }
            _ => Err(mismatch(value, target)),
        },
        ScalarKind::Float => match value {
            HostValue::Int(i) => Ok(Value::Float(*i as f64)),
            HostValue::Float(f) => Ok(Value::Float(*f)),
            _ => Err(mismatch(value, target)),
        },
        ScalarKind::Boolean => match value {
            HostValue::Boolean(b) => Ok(Value::Boolean(*b)),
            _ => Err(mismatch(value, target)),
        },
        ScalarKind::String => Ok(Value::String(stringify(value))),
        ScalarKind::Token => Ok(Value::Token(stringify(value))),
        ScalarKind::Time | ScalarKind::Uuid | ScalarKind::Url => Err(BridgeError::Coercion(
            format!("coercion into {} is not implemented", target.name),
        )),
    }
}

fn stringify(value: &HostValue) -> String {
    match value {
        HostValue::Text(s) => s.clone(),
        other => other.to_text(),
    }
}

fn in_i32_range(f: f64) -> bool {
    f >= i32::MIN as f64 && f <= i32::MAX as f64
}

// `i64::MAX as f64` rounds up to 2^63, which does not fit; the upper bound
// must be exclusive so the cast below cannot saturate.
fn in_i64_range(f: f64) -> bool {
    f >= i64::MIN as f64 && f < i64::MAX as f64
}

fn mismatch(value: &HostValue, target: &TypeDef) -> BridgeError {
    BridgeError::Coercion(format!(
        "failed to coerce a {} into a {}",
        value.type_label(),
        target.name
    ))
}
