//! Schemax - compact JSON notation to GraphQL SDL
//!
//! This crate re-exports both layers of the Schemax system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: schemax_compiler   - Body compiler, assembler, type resolutions
//! Layer 0: schemax_foundation - Errors, shape classification, name hashing
//! ```
//!
//! # Example
//!
//! ```
//! use schemax::Schemax;
//! use serde_json::json;
//!
//! let schema = Schemax::from_items([json!("enum Order"), json!(["desc", "asc"])]);
//! assert_eq!(schema.to_sdl().unwrap(), "enum Order {\n\tasc\n\tdesc\n}");
//! ```

pub use schemax_compiler as compiler;
pub use schemax_foundation as foundation;

pub use schemax_compiler::{Schemax, SchemaxConfig, TypeResolution};
pub use schemax_foundation::{Error, ErrorKind, Result};
