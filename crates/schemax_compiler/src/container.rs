//! The `Schemax` container.
//!
//! Holds the raw item stream and the type-resolution rules, and serializes them
//! to SDL on demand. Nothing is cached: every call to [`Schemax::to_sdl`]
//! re-reads the stream.
//!
//! # Example
//!
//! ```
//! use schemax_compiler::Schemax;
//! use serde_json::json;
//!
//! let mut schema = Schemax::from_items([json!("type Query"), json!({ "hello": "String" })]);
//! schema.add([json!("type Query"), json!({ "bye": "String" })]);
//!
//! assert_eq!(
//!     schema.to_sdl().unwrap(),
//!     "type Query {\n\thello: String\n\tbye: String\n}\n\nschema {\n\tquery: Query\n}"
//! );
//! ```

use serde::Deserialize;
use serde_json::Value;

use schemax_foundation::Result;

use crate::assembler::{assemble, flatten};
use crate::config::SchemaxConfig;
use crate::resolution::{ResolutionSpec, TypeResolution};

/// Item stream, resolution rules and configuration.
#[derive(Debug, Default)]
pub struct Schemax {
    items: Vec<Value>,
    resolutions: Vec<TypeResolution>,
    config: SchemaxConfig,
}

impl Schemax {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a container from items; grouped declarations are spliced in.
    #[must_use]
    pub fn from_items<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let mut schema = Self::new();
        schema.add(items);
        schema
    }

    /// Reads a JSON schema document.
    ///
    /// Accepts either a bare array (the item stream) or an object with
    /// `items`, optional `resolutions`, and optional `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON of either form, or if a
    /// resolution pattern does not compile.
    pub fn from_json(text: &str) -> Result<Self> {
        match serde_json::from_str::<JsonInput>(text)? {
            JsonInput::Stream(items) => Ok(Self::from_items(items)),
            JsonInput::Document(document) => Self::from_document(document),
        }
    }

    /// Builds a container from a deserialized document.
    ///
    /// # Errors
    ///
    /// Returns an error if a resolution pattern does not compile.
    pub fn from_document(document: SchemaDocument) -> Result<Self> {
        let resolutions = document
            .resolutions
            .into_iter()
            .map(TypeResolution::try_from)
            .collect::<Result<Vec<_>>>()?;
        let mut schema = Self::from_items(document.items).with_config(document.config);
        schema.add_type_resolutions(resolutions);
        Ok(schema)
    }

    /// Builder method to set the configuration.
    #[must_use]
    pub fn with_config(mut self, config: SchemaxConfig) -> Self {
        self.config = config;
        self
    }

    /// Appends items, splicing grouped declarations into the stream.
    pub fn add<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = Value>,
    {
        let items: Vec<Value> = items.into_iter().collect();
        self.items.extend(flatten(&items).into_iter().cloned());
        self
    }

    /// Appends type-resolution rules, applied in the order given.
    pub fn add_type_resolutions<I>(&mut self, rules: I) -> &mut Self
    where
        I: IntoIterator<Item = TypeResolution>,
    {
        self.resolutions.extend(rules);
        self
    }

    /// The flattened item stream.
    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// The type-resolution rules.
    #[must_use]
    pub fn resolutions(&self) -> &[TypeResolution] {
        &self.resolutions
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &SchemaxConfig {
        &self.config
    }

    /// Serializes the container to SDL.
    ///
    /// # Errors
    ///
    /// Returns the first stream, shape, merge, or validation error. The
    /// container is left unchanged.
    pub fn to_sdl(&self) -> Result<String> {
        assemble(&self.items, &self.resolutions, &self.config)
    }
}

impl Extend<Value> for Schemax {
    fn extend<I: IntoIterator<Item = Value>>(&mut self, iter: I) {
        self.add(iter);
    }
}

impl FromIterator<Value> for Schemax {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::from_items(iter)
    }
}

/// A JSON schema document.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SchemaDocument {
    /// The raw item stream.
    pub items: Vec<Value>,
    /// Serialized resolution rules.
    #[serde(default)]
    pub resolutions: Vec<ResolutionSpec>,
    /// Serialization settings.
    #[serde(default)]
    pub config: SchemaxConfig,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonInput {
    Stream(Vec<Value>),
    Document(SchemaDocument),
}
