//! Error taxonomy for the host resolution bridge.
//!
//! Every collaborator failure is surfaced immediately to the direct caller;
//! the first error aborts the enclosing multi-step operation (schema
//! bootstrap, SDL load, evaluation). Host-runtime failures raised during
//! resolution are re-wrapped as [`BridgeError::Eval`] so they never cross
//! into the engine as raw host exceptions.

/// Errors produced by the bridge and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// A caller precondition was violated (missing root, missing bootstrap).
    #[error("usage error: {0}")]
    Usage(String),
    /// Unknown type or directive registration failure.
    #[error("schema error: {0}")]
    Schema(String),
    /// File open/read failure while loading SDL.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Value/type mismatch during scalar coercion.
    #[error("coercion error: {0}")]
    Coercion(String),
    /// Captured failure from host-invoked code during resolution or evaluation.
    #[error("eval error: {0}")]
    Eval(String),
    /// Schema failed post-load validation.
    #[error("validation error: {0}")]
    Validation(String),
    /// The wait for the host execution context exceeded its deadline.
    #[error("timeout: {0}")]
    Timeout(String),
}

impl BridgeError {
    /// Stable category tag for this error.
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::Usage(_) => "USAGE",
            BridgeError::Schema(_) => "SCHEMA",
            BridgeError::Io(_) => "IO",
            BridgeError::Coercion(_) => "COERCE",
            BridgeError::Eval(_) => "EVAL",
            BridgeError::Validation(_) => "VALIDATION",
            BridgeError::Timeout(_) => "TIMEOUT",
        }
    }

    /// Wire representation suitable for inclusion in a response envelope.
    pub fn to_wire(&self) -> WireError {
        WireError {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

/// Serializable `{code, message}` record for embedding servers.
#[derive(Debug, Clone, serde::Serialize)]
pub struct WireError {
    pub code: &'static str,
    pub message: String,
}

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;
