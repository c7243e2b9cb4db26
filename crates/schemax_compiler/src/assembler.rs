//! Schema assembler.
//!
//! Turns a raw item stream into SDL text:
//!
//! ```text
//! items ──flatten──▶ stream ──fold──▶ Registry ──resolve──▶ Registry
//!                                                      │
//!        ┌─────────────────────────────────────────────┘
//!        ▼
//!   compile each body ──▶ primary declarations + hoisted dependencies
//!        │
//!        ▼
//!   schema { query / mutation / subscription } ──▶ (validate) ──▶ SDL
//! ```

use serde_json::Value;
use tracing::debug;

use schemax_foundation::{DeclarationKind, Result};

use crate::body::{Dependencies, compile};
use crate::config::SchemaxConfig;
use crate::registry::Registry;
use crate::resolution::{TypeResolution, resolve};
use crate::validate::validate_sdl;

/// Separator between top-level declarations.
pub const DECLARATION_SEPARATOR: &str = "\n\n";

/// Assembles SDL from an item stream and resolution rules.
///
/// Returns an empty string when the stream is empty.
///
/// # Errors
///
/// Returns the first stream, shape, merge, or (when enabled) SDL validation error.
pub fn assemble(
    items: &[Value],
    rules: &[TypeResolution],
    config: &SchemaxConfig,
) -> Result<String> {
    let stream = flatten(items);
    if stream.is_empty() {
        return Ok(String::new());
    }

    let registry = Registry::fold(stream.iter().copied())?;
    debug!(
        items = stream.len(),
        declarations = registry.len(),
        rules = rules.len(),
        "assembling schema"
    );
    let registry = resolve(registry, rules)?;

    let mut declarations = Vec::with_capacity(registry.len());
    let mut dependencies = Dependencies::new();
    for (header, body) in registry.iter() {
        match body {
            None => declarations.push(header.to_string()),
            Some(body) => {
                let compiled = compile(body, DeclarationKind::from_header(header))
                    .map_err(|e| e.in_declaration(header))?;
                declarations.push(format!("{header} {}", compiled.body));
                dependencies.extend(compiled.dependencies);
            }
        }
    }

    let roots = RootOperations::detect(registry.headers());
    debug!(dependencies = dependencies.len(), "hoisted dependencies");
    declarations.extend(dependencies.into_declarations());

    if config.schema_block {
        if let Some(block) = roots.schema_block() {
            declarations.push(block);
        }
    }

    let sdl = declarations.join(DECLARATION_SEPARATOR);
    if config.validate {
        validate_sdl(&sdl)?;
    }
    Ok(sdl)
}

/// Splices grouped declarations into the outer stream.
///
/// An array is a group unless all of its elements are strings, in which case
/// it is an enum body and stays as one item.
#[must_use]
pub fn flatten(items: &[Value]) -> Vec<&Value> {
    let mut stream = Vec::with_capacity(items.len());
    flatten_into(items, &mut stream);
    stream
}

fn flatten_into<'a>(items: &'a [Value], stream: &mut Vec<&'a Value>) {
    for item in items {
        match item {
            Value::Array(group) if !is_enum_list(group) => flatten_into(group, stream),
            _ => stream.push(item),
        }
    }
}

fn is_enum_list(items: &[Value]) -> bool {
    items.iter().all(Value::is_string)
}

/// Root operation types declared at the top level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RootOperations {
    /// `type Query` is declared.
    pub query: bool,
    /// `type Mutation` is declared.
    pub mutation: bool,
    /// `type Subscription` is declared.
    pub subscription: bool,
}

impl RootOperations {
    /// Scans declaration headers for `type Query`, `type Mutation`, and
    /// `type Subscription`, with or without trailing directives.
    pub fn detect<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut roots = Self::default();
        for header in headers {
            match root_type_name(header) {
                Some("Query") => roots.query = true,
                Some("Mutation") => roots.mutation = true,
                Some("Subscription") => roots.subscription = true,
                _ => {}
            }
        }
        roots
    }

    /// Returns true if no root operation type is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.query || self.mutation || self.subscription)
    }

    /// The `schema { ... }` block listing present roots, in fixed order.
    #[must_use]
    pub fn schema_block(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let mut block = String::from("schema {\n");
        for (present, line) in [
            (self.query, "\tquery: Query\n"),
            (self.mutation, "\tmutation: Mutation\n"),
            (self.subscription, "\tsubscription: Subscription\n"),
        ] {
            if present {
                block.push_str(line);
            }
        }
        block.push('}');
        Some(block)
    }
}

/// Name declared by a `type` or `extend type` header, up to the first non-name character.
fn root_type_name(header: &str) -> Option<&str> {
    let header = header.trim_start();
    let header = strip_keyword(header, "extend").unwrap_or(header);
    let rest = strip_keyword(header, "type")?;
    let end = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Strips `keyword` and the whitespace after it. Fails if no whitespace follows.
fn strip_keyword<'a>(text: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = text.strip_prefix(keyword)?;
    rest.starts_with(char::is_whitespace).then(|| rest.trim_start())
}
