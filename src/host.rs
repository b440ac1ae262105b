//! Host runtime object model, as seen from the bridge.
//!
//! The bridge never inspects host objects structurally; everything it needs
//! goes through the [`HostObject`] capability trait. A [`HostValue`] is the
//! dynamic value shape of the host runtime: nil, a primitive, or an opaque
//! object reference.

use std::fmt;
use std::sync::Arc;

/// Opaque, shared reference to a host object. Holding a clone keeps the
/// object alive; the schema root is pinned this way for the schema lifetime.
pub type HostRef = Arc<dyn HostObject>;

/// Failure raised by host-invoked code, carrying the host exception's class
/// name and message.
#[derive(Debug, Clone)]
pub struct HostFault {
    pub class_name: String,
    pub message: String,
}

impl HostFault {
    pub fn new(class_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for HostFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.class_name, self.message)
    }
}

/// Capability interface for dynamic dispatch onto a host object.
///
/// `invoke` dispatches a field resolution by name; arguments arrive in the
/// order the engine produced them, each paired with its argument name. An
/// unknown field name is reported as a fault, not a panic.
pub trait HostObject: Send + Sync {
    /// Runtime class name of this object.
    fn class_name(&self) -> &str;

    /// Invoke the named field on this object.
    fn invoke(
        &self,
        field_name: &str,
        args: &[(String, HostValue)],
    ) -> std::result::Result<HostValue, HostFault>;

    /// Generic stringify conversion for this object.
    fn to_text(&self) -> String {
        format!("#<{}>", self.class_name())
    }
}

/// A dynamic host-native value.
#[derive(Clone)]
pub enum HostValue {
    Nil,
    Boolean(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Object(HostRef),
}

impl HostValue {
    pub fn object(obj: impl HostObject + 'static) -> Self {
        HostValue::Object(Arc::new(obj))
    }

    pub fn as_object(&self) -> Option<&HostRef> {
        match self {
            HostValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, HostValue::Nil)
    }

    /// Runtime class label used in diagnostics.
    pub fn type_label(&self) -> &str {
        match self {
            HostValue::Nil => "nil",
            HostValue::Boolean(_) => "boolean",
            HostValue::Int(_) => "integer",
            HostValue::Float(_) => "float",
            HostValue::Text(_) => "string",
            HostValue::Object(obj) => obj.class_name(),
        }
    }

    /// The host's generic stringify conversion.
    pub fn to_text(&self) -> String {
        match self {
            HostValue::Nil => String::new(),
            HostValue::Boolean(b) => b.to_string(),
            HostValue::Int(i) => i.to_string(),
            HostValue::Float(f) => f.to_string(),
            HostValue::Text(s) => s.clone(),
            HostValue::Object(obj) => obj.to_text(),
        }
    }
}

impl fmt::Debug for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostValue::Nil => write!(f, "Nil"),
            HostValue::Boolean(b) => write!(f, "Boolean({b})"),
            HostValue::Int(i) => write!(f, "Int({i})"),
            HostValue::Float(v) => write!(f, "Float({v})"),
            HostValue::Text(s) => write!(f, "Text({s:?})"),
            HostValue::Object(obj) => write!(f, "Object({})", obj.class_name()),
        }
    }
}
