//! Schema type registry, directive metadata, and the host-class binding table.
//!
//! The registry is created at bootstrap and read thereafter. SDL ingestion
//! produces a [`SchemaDelta`] that is merged into the registry; merging keeps
//! directive uses already attached to a placeholder type, because root
//! bindings are attached before any SDL is loaded.

use std::collections::HashMap;

use crate::error::{BridgeError, Result};
use crate::value::{ScalarKind, Value};

/// Name of the directive that associates a host class with a GraphQL type.
pub const HOST_CLASS_DIRECTIVE: &str = "hostClass";

/// Kind of a registered type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    Scalar(ScalarKind),
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
}

/// A field on an object type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub type_name: String,
    pub arguments: Vec<ArgDef>,
}

/// A declared field argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgDef {
    pub name: String,
    pub type_name: String,
    pub required: bool,
}

/// An attached directive use: a directive name plus ordered arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveUse {
    pub name: String,
    pub args: Vec<(String, Value)>,
}

impl DirectiveUse {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    pub fn with_arg(mut self, name: impl Into<String>, value: Value) -> Self {
        self.args.push((name.into(), value));
        self
    }

    pub fn arg(&self, name: &str) -> Option<&Value> {
        self.args
            .iter()
            .find(|(arg_name, _)| arg_name == name)
            .map(|(_, value)| value)
    }
}

/// Locations a directive may be declared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveLocation {
    Schema,
    Object,
    FieldDefinition,
}

/// A registered directive definition.
#[derive(Debug, Clone)]
pub struct DirectiveDef {
    pub name: String,
    pub description: Option<String>,
    pub args: Vec<ArgDef>,
    pub locations: Vec<DirectiveLocation>,
}

/// An engine-owned type descriptor.
#[derive(Debug, Clone)]
pub struct TypeDef {
    pub name: String,
    pub kind: TypeKind,
    pub description: Option<String>,
    pub fields: Vec<FieldDef>,
    pub directives: Vec<DirectiveUse>,
    /// Seeded at init rather than loaded from SDL.
    pub builtin: bool,
}

impl TypeDef {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
            fields: Vec::new(),
            directives: Vec::new(),
            builtin: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    fn builtin(mut self) -> Self {
        self.builtin = true;
        self
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.kind, TypeKind::Scalar(_))
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// First attached use of the named directive.
    pub fn directive_use(&self, name: &str) -> Option<&DirectiveUse> {
        self.directives.iter().find(|use_| use_.name == name)
    }
}

/// Host class associated with a schema type.
#[derive(Debug, Clone, PartialEq)]
pub struct HostClassBinding {
    pub class: String,
}

/// Additions produced by one SDL parse, merged into the registry.
#[derive(Debug, Clone, Default)]
pub struct SchemaDelta {
    pub types: Vec<TypeDef>,
}

/// The schema's type and directive registry plus the type-to-host-class
/// binding table.
#[derive(Debug)]
pub struct TypeRegistry {
    types: HashMap<String, TypeDef>,
    directives: HashMap<String, DirectiveDef>,
    bindings: HashMap<String, HostClassBinding>,
}

impl TypeRegistry {
    /// Fresh registry seeded with the builtin scalar types and the
    /// placeholder object types root bindings attach to before SDL loads.
    pub fn new() -> Self {
        let mut registry = Self {
            types: HashMap::new(),
            directives: HashMap::new(),
            bindings: HashMap::new(),
        };

        let scalars = [
            ("Int", ScalarKind::Int),
            ("Int64", ScalarKind::Int64),
            ("Float", ScalarKind::Float),
            ("String", ScalarKind::String),
            ("Boolean", ScalarKind::Boolean),
            ("Token", ScalarKind::Token),
            ("ID", ScalarKind::Token),
            ("Time", ScalarKind::Time),
            ("UUID", ScalarKind::Uuid),
            ("URL", ScalarKind::Url),
        ];
        for (name, kind) in scalars {
            registry.insert(TypeDef::new(name, TypeKind::Scalar(kind)).builtin());
        }
        for name in ["schema", "Query", "Mutation", "Subscription"] {
            registry.insert(TypeDef::new(name, TypeKind::Object).builtin());
        }
        registry
    }

    fn insert(&mut self, type_def: TypeDef) {
        self.types.insert(type_def.name.clone(), type_def);
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    /// All registered types, unordered.
    pub fn types(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }

    pub fn register_directive(&mut self, def: DirectiveDef) {
        self.directives.insert(def.name.clone(), def);
    }

    pub fn get_directive(&self, name: &str) -> Option<&DirectiveDef> {
        self.directives.get(name)
    }

    /// Attach a directive use to the named type.
    pub fn attach_directive(&mut self, type_name: &str, use_: DirectiveUse) -> Result<()> {
        let type_def = self
            .types
            .get_mut(type_name)
            .ok_or_else(|| BridgeError::Schema(format!("type '{type_name}' not found")))?;
        type_def.directives.push(use_);
        Ok(())
    }

    /// Record the host class bound to a type. Rebinding overwrites.
    pub fn bind_host_class(&mut self, type_name: &str, class: impl Into<String>) {
        self.bindings.insert(
            type_name.to_string(),
            HostClassBinding {
                class: class.into(),
            },
        );
    }

    pub fn host_class_of(&self, type_name: &str) -> Option<&HostClassBinding> {
        self.bindings.get(type_name)
    }

    /// Merge an SDL parse result into the registry.
    ///
    /// A type that already exists (a placeholder, or a prior load) takes the
    /// delta's fields, kind, and description; directive uses accumulate so
    /// pre-SDL bindings survive the load.
    pub fn apply(&mut self, delta: SchemaDelta) {
        for incoming in delta.types {
            match self.types.get_mut(&incoming.name) {
                Some(existing) => {
                    existing.kind = incoming.kind;
                    existing.fields = incoming.fields;
                    existing.builtin = incoming.builtin;
                    if incoming.description.is_some() {
                        existing.description = incoming.description;
                    }
                    existing.directives.extend(incoming.directives);
                }
                None => {
                    self.insert(incoming);
                }
            }
        }
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
