//! Resolution bridge between a schema-driven GraphQL engine and a
//! dynamically typed host runtime.
//!
//! The bridge binds schema types to host object classes through the
//! `@hostClass` directive, dispatches field resolution by name onto host
//! objects, coerces host-native values into the engine's typed scalar model,
//! and serializes every host interaction through the host runtime's single
//! active execution context.
//!
//! The GraphQL document/SDL parsers, validator, and evaluator are external
//! collaborators consumed through [`DocumentEngine`]; this crate supplies
//! the host-facing half of the system.

pub mod bridge;
pub mod coerce;
pub mod engine;
pub mod error;
pub mod gate;
pub mod host;
pub mod schema;
pub mod value;


pub use bridge::{Bootstrap, SchemaContext, SdlDumpOptions};
pub use engine::{DocumentEngine, FieldHooks};
pub use error::{BridgeError, Result, WireError};
pub use gate::HostGate;
pub use host::{HostFault, HostObject, HostRef, HostValue};
pub use schema::{
    ArgDef, DirectiveDef, DirectiveLocation, DirectiveUse, FieldDef, HostClassBinding,
    SchemaDelta, TypeDef, TypeKind, TypeRegistry, HOST_CLASS_DIRECTIVE,
};
pub use value::{ArgList, ScalarKind, Value};

/// Version information for the bridge.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
