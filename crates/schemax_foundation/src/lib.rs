//! Errors, hashing, and shape classification for Schemax.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`hash_code`] / [`hash_suffix`] - Stable hashing for synthesized names
//! - [`BodyShape`] - Classified body shapes with extracted [`Metadata`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod hash;
pub mod shape;

pub use error::{Error, ErrorContext, ErrorKind, json_type_name};
pub use hash::{hash_code, hash_suffix};
pub use shape::{
    Argument, BodyShape, CALLABLE_KEY, Callable, DeclarationKind, EnumShape, Field, FieldValue,
    Metadata, ObjectShape, Shape, TypeRef, is_callable, is_falsy, is_valid_enum_value,
};

/// Result type alias using the Schemax error type.
pub type Result<T> = std::result::Result<T, Error>;
