//! Field compiler.
//!
//! Turns a nested shape into a reference to a hoisted declaration. The shape's
//! own body is compiled first, so its dependencies are discovered before it.

use schemax_foundation::{BodyShape, DeclarationKind, Metadata, hash_suffix};
use tracing::trace;

use crate::body::{BodyCompiler, Dependencies};

/// Compiles `field: Reference` for a nested shape, hoisting the shape.
///
/// Plain objects are hoisted with the `context` kind; enums always as `enum`.
pub fn compile_field(
    field: &str,
    shape: &BodyShape,
    context: DeclarationKind,
    dependencies: &mut Dependencies,
) -> String {
    format!("{field}: {}", hoist(shape, context, dependencies))
}

/// Hoists `shape` into `dependencies` and returns the decorated reference to it.
pub fn hoist(
    shape: &BodyShape,
    context: DeclarationKind,
    dependencies: &mut Dependencies,
) -> String {
    let kind = shape.kind_in(context);
    let body = BodyCompiler::new(dependencies).body(shape, kind);
    let metadata = shape.metadata();
    let name = metadata
        .name
        .clone()
        .unwrap_or_else(|| synthesize_name(kind, &body));

    trace!(name = %name, kind = kind.keyword(), "hoisted dependency");
    dependencies.insert(name.clone(), format!("{} {name} {body}", kind.keyword()));

    reference(&name, metadata, shape.is_array)
}

/// Name for an anonymous shape: `{Kind}_{hash of body text}`.
#[must_use]
pub fn synthesize_name(kind: DeclarationKind, body: &str) -> String {
    format!("{}_{}", kind.name_prefix(), hash_suffix(body)).replace('-', "")
}

/// Decorates a type name with list brackets and non-null markers.
///
/// `no_empty` adds `!` inside the brackets of a required list.
#[must_use]
pub fn reference(name: &str, metadata: &Metadata, is_array: bool) -> String {
    let mut out = String::with_capacity(name.len() + 3);
    if is_array {
        out.push('[');
        out.push_str(name);
        if metadata.required && metadata.no_empty {
            out.push('!');
        }
        out.push(']');
    } else {
        out.push_str(name);
    }
    if metadata.required {
        out.push('!');
    }
    out
}
