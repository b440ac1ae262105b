//! Collaborator interfaces for the external GraphQL engine.
//!
//! Parsing, validation, SDL rendering, and document evaluation are black-box
//! concerns of the embedding engine. The bridge drives them through
//! [`DocumentEngine`] and hands the evaluator its callbacks through
//! [`FieldHooks`].

use crate::error::Result;
use crate::host::HostValue;
use crate::schema::{SchemaDelta, TypeDef, TypeRegistry};
use crate::value::{ArgList, Value};

/// The schema-driven query engine, as consumed by the bridge.
pub trait DocumentEngine: Send + Sync {
    /// Parse SDL text into registry additions.
    fn parse_sdl(&self, text: &str) -> Result<SchemaDelta>;

    /// Validate the loaded schema.
    fn validate(&self, registry: &TypeRegistry) -> Result<()>;

    /// Render the registry back to SDL text.
    fn render_sdl(&self, registry: &TypeRegistry, with_descriptions: bool, all: bool) -> String;

    /// Evaluate an executable document, resolving fields through `hooks`.
    fn evaluate(
        &self,
        registry: &TypeRegistry,
        document: &str,
        hooks: &dyn FieldHooks,
    ) -> Result<Value>;
}

/// Callbacks the evaluator uses to reach host objects.
///
/// Every call happens inside the host execution context already acquired for
/// the enclosing evaluation; implementations must not re-enter the gate.
pub trait FieldHooks {
    /// The pinned evaluation root.
    fn root(&self) -> HostValue;

    /// Resolve a field by dynamic dispatch on a host object.
    fn resolve(&self, target: &HostValue, field_name: &str, args: &ArgList) -> Result<HostValue>;

    /// Coerce a leaf host value into the target scalar type.
    fn coerce(&self, value: &HostValue, target: Option<&TypeDef>) -> Result<Value>;
}
