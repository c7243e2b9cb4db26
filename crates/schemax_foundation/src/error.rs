//! Error types for the Schemax system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// The main error type for Schemax operations.
///
/// Displays as the kind's message, followed by the declaration and field path
/// when those are known.
#[derive(Debug, Error)]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Records the declaration header the error surfaced under.
    ///
    /// Keeps any field path already collected.
    #[must_use]
    pub fn in_declaration(mut self, header: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_declaration(header));
        self
    }

    /// Prepends a field to the recorded field path.
    ///
    /// Called while unwinding, so the outermost field is pushed last and ends up first.
    #[must_use]
    pub fn in_field(mut self, field: impl Into<String>) -> Self {
        let context = self.context.take().unwrap_or_default();
        self.context = Some(context.with_field(field));
        self
    }

    /// Creates an invalid enum value error.
    #[must_use]
    pub fn invalid_enum_value(value: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidEnumValue(value.into()))
    }

    /// Creates an invalid header error for a stream position.
    #[must_use]
    pub fn invalid_header(index: usize, found: &'static str) -> Self {
        Self::new(ErrorKind::InvalidHeader { index, found })
    }

    /// Creates an invalid body error for a stream position.
    #[must_use]
    pub fn invalid_body_item(index: usize, found: &'static str) -> Self {
        Self::new(ErrorKind::InvalidBodyItem { index, found })
    }

    /// Creates an SDL validation error carrying the parser message.
    #[must_use]
    pub fn invalid_sdl(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidSdl(message.into()))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        match &self.context {
            Some(context) if !context.is_empty() => write!(f, " ({context})"),
            _ => Ok(()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorKind::Json(err.to_string()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A body was falsy where a shape was required.
    #[error("'body' is required.")]
    MissingBody,

    /// A body was neither an object nor an array.
    #[error("'body' must be an object. Found '{found}' instead.")]
    InvalidBody {
        /// JSON type name of the offending value.
        found: &'static str,
    },

    /// An enum body had no values once metadata tokens were removed.
    #[error("Invalid 'body'. Array cannot be empty.")]
    EmptyEnum,

    /// An enum body contained something other than a string.
    #[error("Invalid 'body' item. When 'body' is an array, all items must be strings.")]
    NonStringEnumValue,

    /// An enum token is not a valid GraphQL name.
    #[error(
        "Invalid enum '{0}'. Enums can only have letters, numbers, or underscores, and the first character can't be a number."
    )]
    InvalidEnumValue(String),

    /// An object body had no fields once metadata keys were removed.
    #[error("'body' must be an object with at least one property.")]
    EmptyObject,

    /// An object used as a callable descriptor does not end with the `:` key.
    #[error("Last object's property in field '{field}' must be ':'. Found '{found}' instead.")]
    MalformedCallable {
        /// The field holding the descriptor.
        field: String,
        /// The key found in last position.
        found: String,
    },

    /// A callable descriptor's `:` entry is falsy.
    #[error("Missing return type in field '{field}'.")]
    MissingReturnType {
        /// The field holding the descriptor.
        field: String,
    },

    /// A callable argument's type is falsy.
    #[error("Missing type on argument '{argument}' in field '{field}'.")]
    MissingArgumentType {
        /// The field holding the descriptor.
        field: String,
        /// The argument without a type.
        argument: String,
    },

    /// A callable descriptor's return value has an unsupported JSON type.
    #[error(
        "Unsupported return type in field '{field}'. Supported types are 'string' and 'object'. Found '{found}' instead."
    )]
    UnsupportedReturnType {
        /// The field holding the descriptor.
        field: String,
        /// JSON type name of the offending value.
        found: &'static str,
    },

    /// A callable argument has an unsupported JSON type.
    #[error(
        "Unsupported type on argument '{argument}' in field '{field}'. Supported types are 'string', 'object' and 'array'. Found '{found}' instead."
    )]
    UnsupportedArgumentType {
        /// The field holding the descriptor.
        field: String,
        /// The offending argument.
        argument: String,
        /// JSON type name of the offending value.
        found: &'static str,
    },

    /// A field value has an unsupported JSON type.
    #[error("Field '{field}' must be null, a string or an object. Found '{found}' instead.")]
    UnsupportedFieldValue {
        /// The offending field.
        field: String,
        /// JSON type name of the offending value.
        found: &'static str,
    },

    /// A header position in the item stream holds a falsy value.
    #[error("Schema item[{index}] cannot be falsy.")]
    FalsyHeader {
        /// Position in the flattened item stream.
        index: usize,
    },

    /// A header position in the item stream holds a non-string value.
    #[error("Schema item[{index}] must be a string (e.g., 'type Product'). Found '{found}' instead.")]
    InvalidHeader {
        /// Position in the flattened item stream.
        index: usize,
        /// JSON type name of the offending value.
        found: &'static str,
    },

    /// A body position in the item stream holds a scalar.
    #[error(
        "Schema item[{index}] must be an object (e.g., {{ id: 'ID!', name: 'String' }}). Found '{found}' instead."
    )]
    InvalidBodyItem {
        /// Position in the flattened item stream.
        index: usize,
        /// JSON type name of the offending value.
        found: &'static str,
    },

    /// An enum body and an object body were registered under one header.
    #[error("Cannot merge an enum body with an object body under '{header}'.")]
    IncompatibleMerge {
        /// The header both bodies were registered under.
        header: String,
    },

    /// A type-resolution pattern failed to compile.
    #[error("Invalid type resolution pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The pattern source.
        pattern: String,
        /// The regex compiler message.
        message: String,
    },

    /// The JSON schema document could not be read.
    #[error("Invalid JSON schema document: {0}")]
    Json(String),

    /// The assembled SDL failed to parse.
    #[error("{0}")]
    InvalidSdl(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Declaration header being compiled.
    pub declaration: Option<String>,
    /// Field path from the declaration down to the failure.
    pub path: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the declaration header.
    #[must_use]
    pub fn with_declaration(mut self, header: impl Into<String>) -> Self {
        self.declaration = Some(header.into());
        self
    }

    /// Returns true if neither a declaration nor a field is recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declaration.is_none() && self.path.is_empty()
    }

    /// Prepends a field to the path.
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.path.insert(0, field.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = self.declaration.iter().chain(self.path.iter());
        if let Some(first) = parts.next() {
            write!(f, "at {first}")?;
            for part in parts {
                write!(f, " > {part}")?;
            }
        }
        Ok(())
    }
}

/// Returns the JavaScript-style type name of a JSON value, as used in messages.
#[must_use]
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
