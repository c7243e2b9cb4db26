//! Body compiler.
//!
//! Compiles one classified body into an SDL fragment (`{\n\t...\n}`), hoisting
//! every nested shape it meets into a named dependency declaration.
//!
//! # Example
//!
//! ```
//! use schemax_compiler::body::compile;
//! use schemax_foundation::DeclarationKind;
//! use serde_json::json;
//!
//! let compiled = compile(&json!(["Peter", "Jacky"]), DeclarationKind::Enum).unwrap();
//! assert_eq!(compiled.body, "{\n\tJacky\n\tPeter\n}");
//! assert!(compiled.dependencies.is_empty());
//! ```

use std::fmt::Write;

use indexmap::IndexMap;
use serde_json::Value;

use schemax_foundation::{
    BodyShape, Callable, DeclarationKind, EnumShape, Field, FieldValue, ObjectShape, Result, Shape,
    TypeRef,
};

use crate::field;

/// Indentation of every line inside a declaration body.
pub const INDENT: &str = "\t";

/// Hoisted declarations keyed by name, in discovery order.
///
/// Inserting an existing name replaces its declaration but keeps its position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dependencies {
    entries: IndexMap<String, String>,
}

impl Dependencies {
    /// Creates an empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a declaration under `name`.
    pub fn insert(&mut self, name: impl Into<String>, declaration: impl Into<String>) {
        self.entries.insert(name.into(), declaration.into());
    }

    /// Merges another collector into this one, preserving discovery order.
    pub fn extend(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// Returns the declaration recorded under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Number of hoisted declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been hoisted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Hoisted names in discovery order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Consumes the collector, yielding declarations in discovery order.
    pub fn into_declarations(self) -> impl Iterator<Item = String> {
        self.entries.into_values()
    }
}

/// The result of compiling one body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompiledBody {
    /// Every declaration `body` refers to, transitively.
    pub dependencies: Dependencies,
    /// Explicit name from metadata.
    pub name: Option<String>,
    /// What the body declares.
    pub kind: DeclarationKind,
    /// References to this body are non-null.
    pub required: bool,
    /// List references have non-null items.
    pub no_empty: bool,
    /// The body was written as a single-element array.
    pub is_array: bool,
    /// SDL fragment, braces included.
    pub body: String,
}

/// Classifies and compiles a top-level body.
///
/// `kind` is the declaration the body belongs to; nested plain objects are
/// hoisted with that kind.
///
/// # Errors
///
/// Returns a shape validation error if the value is not a valid body.
pub fn compile(value: &Value, kind: DeclarationKind) -> Result<CompiledBody> {
    let shape = BodyShape::classify(value)?;
    Ok(compile_shape(&shape, kind))
}

/// Compiles an already classified body with a fresh dependency collector.
#[must_use]
pub fn compile_shape(shape: &BodyShape, kind: DeclarationKind) -> CompiledBody {
    let mut dependencies = Dependencies::new();
    let kind = shape.kind_in(kind);
    let body = BodyCompiler::new(&mut dependencies).body(shape, kind);
    let metadata = shape.metadata();

    CompiledBody {
        dependencies,
        name: metadata.name.clone(),
        kind,
        required: metadata.required,
        no_empty: metadata.no_empty,
        is_array: shape.is_array,
        body,
    }
}

/// Recursive compiler writing hoisted shapes into a borrowed collector.
pub(crate) struct BodyCompiler<'a> {
    dependencies: &'a mut Dependencies,
}

impl<'a> BodyCompiler<'a> {
    pub(crate) fn new(dependencies: &'a mut Dependencies) -> Self {
        Self { dependencies }
    }

    /// Compiles `shape` declared as `kind` into a braced fragment.
    pub(crate) fn body(&mut self, shape: &BodyShape, kind: DeclarationKind) -> String {
        match &shape.shape {
            Shape::Enum(shape) => enum_body(shape),
            Shape::Object(shape) => self.object_body(shape, kind),
        }
    }

    fn object_body(&mut self, shape: &ObjectShape, kind: DeclarationKind) -> String {
        let lines: Vec<String> = shape
            .fields
            .iter()
            .map(|field| self.field_line(field, kind))
            .collect();
        wrap(&lines)
    }

    fn field_line(&mut self, field: &Field, kind: DeclarationKind) -> String {
        let name = &field.name;
        match &field.value {
            FieldValue::Bare => name.clone(),
            FieldValue::Literal(ty) => format!("{name}: {ty}"),
            FieldValue::Callable(callable) => self.callable_line(name, callable),
            FieldValue::Nested(shape) => field::compile_field(name, shape, kind, self.dependencies),
        }
    }

    fn callable_line(&mut self, name: &str, callable: &Callable) -> String {
        let arguments: Vec<String> = callable
            .arguments
            .iter()
            .map(|arg| format!("{}: {}", arg.name, self.type_ref(&arg.ty, DeclarationKind::Input)))
            .collect();
        let returns = self.type_ref(&callable.returns, DeclarationKind::Type);

        if arguments.is_empty() {
            format!("{name}: {returns}")
        } else {
            format!("{name}({}): {returns}", arguments.join(", "))
        }
    }

    fn type_ref(&mut self, ty: &TypeRef, context: DeclarationKind) -> String {
        match ty {
            TypeRef::Literal(ty) => ty.clone(),
            TypeRef::Shape(shape) => field::hoist(shape, context, self.dependencies),
        }
    }
}

/// Enum values sorted ascending, one per line.
fn enum_body(shape: &EnumShape) -> String {
    let mut values = shape.values.clone();
    values.sort();
    wrap(&values)
}

fn wrap(lines: &[String]) -> String {
    let mut out = String::from("{\n");
    for line in lines {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{INDENT}{line}");
    }
    out.push('}');
    out
}
