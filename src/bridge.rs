//! Schema bootstrap and field resolution against host objects.
//!
//! [`SchemaContext`] owns the type registry, the pinned root object, the
//! host gate, and the engine collaborator. Its lifecycle is
//! create-at-bootstrap, drop-at-teardown; concurrent `begin_schema` calls
//! must be externally serialized.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::coerce;
use crate::engine::{DocumentEngine, FieldHooks};
use crate::error::{BridgeError, Result};
use crate::gate::{capture_host_panic, HostGate};
use crate::host::{HostRef, HostValue};
use crate::schema::{
    ArgDef, DirectiveDef, DirectiveLocation, DirectiveUse, TypeDef, TypeRegistry,
    HOST_CLASS_DIRECTIVE,
};
use crate::value::{ArgList, Value};

/// Options for rendering the schema back to SDL.
#[derive(Debug, Clone, Copy)]
pub struct SdlDumpOptions {
    /// Include description strings.
    pub with_descriptions: bool,
    /// Include builtin types and directives, not only user-created ones.
    pub all: bool,
}

impl Default for SdlDumpOptions {
    fn default() -> Self {
        Self {
            with_descriptions: true,
            all: false,
        }
    }
}

/// A bootstrap callback, run between root registration and validation.
pub type Bootstrap<'a> = &'a mut dyn FnMut(&SchemaContext) -> Result<()>;

/// Binds a schema to a host object tree and executes documents against it.
pub struct SchemaContext {
    engine: Arc<dyn DocumentEngine>,
    registry: RwLock<TypeRegistry>,
    root: RwLock<Option<HostRef>>,
    gate: HostGate,
}

impl SchemaContext {
    pub fn new(engine: Arc<dyn DocumentEngine>) -> Self {
        Self {
            engine,
            registry: RwLock::new(TypeRegistry::new()),
            root: RwLock::new(None),
            gate: HostGate::new(),
        }
    }

    /// Bootstrap the schema: register `root` as the evaluation root, attach
    /// host-class bindings, run `bootstrap` (which loads SDL), then validate.
    ///
    /// Fails with [`BridgeError::Usage`] before touching the registry when no
    /// bootstrap is supplied. Each step short-circuits on first failure.
    pub fn begin_schema(&self, root: HostRef, bootstrap: Option<Bootstrap<'_>>) -> Result<()> {
        let bootstrap = bootstrap
            .ok_or_else(|| BridgeError::Usage("a bootstrap block is required".to_string()))?;

        {
            let mut registry = self.registry.write();
            *registry = TypeRegistry::new();
            registry.register_directive(host_class_directive());
        }
        *self.root.write() = Some(Arc::clone(&root));

        // Directive binding reads host class names, so it runs inside the
        // host execution context like every other host interaction.
        self.gate.run(|| -> Result<()> {
            self.bind_host_class("schema", &HostValue::Object(Arc::clone(&root)))?;
            for (accessor, type_name) in [
                ("query", "Query"),
                ("mutation", "Mutation"),
                ("subscription", "Subscription"),
            ] {
                self.bind_root_accessor(&root, accessor, type_name)?;
            }
            Ok(())
        })?;

        bootstrap(self)?;

        let registry = self.registry.read();
        self.engine.validate(&registry)
    }

    /// Convenience form of [`begin_schema`](Self::begin_schema) with an
    /// always-present bootstrap closure.
    pub fn schema(
        &self,
        root: HostRef,
        mut bootstrap: impl FnMut(&SchemaContext) -> Result<()>,
    ) -> Result<()> {
        self.begin_schema(root, Some(&mut bootstrap))
    }

    /// Load an SDL string into the registry. Requires a registered root.
    pub fn load(&self, sdl: &str) -> Result<()> {
        self.require_root()?;
        let delta = self.engine.parse_sdl(sdl)?;
        self.registry.write().apply(delta);
        Ok(())
    }

    /// Read an SDL file and load it as [`load`](Self::load).
    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<()> {
        self.require_root()?;
        let sdl = std::fs::read_to_string(path)?;
        self.load(&sdl)
    }

    /// Render the current schema registry back to SDL text.
    pub fn sdl_dump(&self, options: SdlDumpOptions) -> String {
        let registry = self.registry.read();
        self.engine
            .render_sdl(&registry, options.with_descriptions, options.all)
    }

    /// Evaluate an executable document against the bound host objects,
    /// blocking until the host execution context is available.
    pub fn execute(&self, document: &str) -> Result<Value> {
        self.execute_with_deadline(document, None)
    }

    /// As [`execute`](Self::execute), but abort the wait for the host
    /// execution context after `timeout`.
    pub fn execute_with_deadline(
        &self,
        document: &str,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        let root = self.require_root()?;
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, "evaluating document");

        self.gate.run_with_deadline(timeout, || {
            let registry = self.registry.read();
            let hooks = BridgeHooks {
                root,
                request_id,
            };
            capture_host_panic(|| self.engine.evaluate(&registry, document, &hooks))
        })
    }

    /// Read access to the registry, for embedders inspecting bindings.
    pub fn with_registry<T>(&self, f: impl FnOnce(&TypeRegistry) -> T) -> T {
        f(&self.registry.read())
    }

    fn require_root(&self) -> Result<HostRef> {
        self.root
            .read()
            .clone()
            .ok_or_else(|| BridgeError::Usage("root not set".to_string()))
    }

    /// Attach a host-class directive use to the named type and record the
    /// binding table entry.
    fn bind_host_class(&self, type_name: &str, host: &HostValue) -> Result<()> {
        let class = host.type_label().to_string();
        let mut registry = self.registry.write();
        registry.attach_directive(
            type_name,
            DirectiveUse::new(HOST_CLASS_DIRECTIVE)
                .with_arg("class", Value::String(class.clone())),
        )?;
        registry.bind_host_class(type_name, class);
        Ok(())
    }

    /// Call a root accessor; a non-nil result binds the named type. An
    /// absent accessor or a nil result means the schema has no such root.
    fn bind_root_accessor(&self, root: &HostRef, accessor: &str, type_name: &str) -> Result<()> {
        match root.invoke(accessor, &[]) {
            Ok(HostValue::Nil) => Ok(()),
            Ok(value) => self.bind_host_class(type_name, &value),
            Err(fault) => {
                tracing::debug!(accessor, %fault, "root accessor not exposed");
                Ok(())
            }
        }
    }
}

fn host_class_directive() -> DirectiveDef {
    DirectiveDef {
        name: HOST_CLASS_DIRECTIVE.to_string(),
        description: Some("Associates a host class with a GraphQL type.".to_string()),
        args: vec![ArgDef {
            name: "class".to_string(),
            type_name: "String".to_string(),
            required: true,
        }],
        locations: vec![DirectiveLocation::Schema, DirectiveLocation::Object],
    }
}

/// Convert an engine argument value into a host-native value.
pub(crate) fn value_to_host(value: &Value) -> Result<HostValue> {
    match value {
        Value::Null => Ok(HostValue::Nil),
        Value::Int(i) => Ok(HostValue::Int(i64::from(*i))),
        Value::Int64(i) => Ok(HostValue::Int(*i)),
        Value::Float(f) => Ok(HostValue::Float(*f)),
        Value::Boolean(b) => Ok(HostValue::Boolean(*b)),
        Value::String(s) | Value::Token(s) => Ok(HostValue::Text(s.clone())),
        Value::List(_) | Value::Object(_) => Err(BridgeError::Coercion(
            "composite argument values are not supported".to_string(),
        )),
    }
}

/// Evaluator callbacks for one document evaluation. Lives entirely inside
/// the gate scope acquired by `execute`.
struct BridgeHooks {
    root: HostRef,
    request_id: Uuid,
}

impl FieldHooks for BridgeHooks {
    fn root(&self) -> HostValue {
        HostValue::Object(Arc::clone(&self.root))
    }

    fn resolve(&self, target: &HostValue, field_name: &str, args: &ArgList) -> Result<HostValue> {
        let obj = target.as_object().ok_or_else(|| {
            BridgeError::Eval(format!(
                "cannot resolve field '{field_name}' on a {}",
                target.type_label()
            ))
        })?;

        let mut host_args = Vec::with_capacity(args.len());
        for (name, value) in args {
            host_args.push((name.clone(), value_to_host(value)?));
        }

        tracing::debug!(
            request_id = %self.request_id,
            class = obj.class_name(),
            field = field_name,
            "resolving field"
        );

        let outcome = capture_host_panic(|| {
            obj.invoke(field_name, &host_args)
                .map_err(|fault| BridgeError::Eval(fault.to_string()))
        });
        if let Err(err) = &outcome {
            tracing::warn!(
                request_id = %self.request_id,
                field = field_name,
                %err,
                "field resolution failed"
            );
        }
        outcome
    }

    fn coerce(&self, value: &HostValue, target: Option<&TypeDef>) -> Result<Value> {
        coerce::coerce(value, target)
    }
}
