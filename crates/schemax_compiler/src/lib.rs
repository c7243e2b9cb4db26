//! Body compiler, schema assembler, and type-resolution merger for Schemax.
//!
//! # Architecture
//!
//! ```text
//! Schemax { items, resolutions, config }
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   ASSEMBLER     │  flatten groups, fold (header, body) pairs
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   RESOLUTION    │  collapse headers matched by the same rule
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ BODY / FIELD    │  compile bodies, hoist nested shapes as dependencies
//! │ COMPILER        │
//! └─────────────────┘
//!          │
//!          ▼
//!   declarations + dependencies + schema { } ──▶ SDL
//! ```
//!
//! # Modules
//!
//! - [`body`] - Body compiler and the dependency collector
//! - [`field`] - Field compiler: hoisting and reference decoration
//! - [`registry`] - Header → body registry with repeat merging
//! - [`resolution`] - Type-resolution rules and the merger
//! - [`assembler`] - Full stream-to-SDL pipeline
//! - [`validate`] - SDL validation with `apollo-parser`
//! - [`config`] - Serialization settings
//! - [`container`] - The [`Schemax`] container

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod assembler;
pub mod body;
pub mod config;
pub mod container;
pub mod field;
pub mod registry;
pub mod resolution;
pub mod validate;


pub use assembler::{RootOperations, assemble};
pub use body::{CompiledBody, Dependencies, compile, compile_shape};
pub use config::SchemaxConfig;
pub use container::{SchemaDocument, Schemax};
pub use field::compile_field;
pub use registry::Registry;
pub use resolution::{HeaderMatcher, HeaderPolicy, Reducer, ResolutionSpec, TypeResolution};
pub use validate::validate_sdl;
