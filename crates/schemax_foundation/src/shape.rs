//! Shape classification.
//!
//! Caller-supplied bodies are loose JSON values. Before compilation they are
//! classified once into a closed set of variants, with the reserved metadata
//! keys and tokens pulled out into [`Metadata`]:
//!
//! | Meaning            | Object key          | Enum token             |
//! |--------------------|---------------------|------------------------|
//! | explicit name      | `__name`, `#`       | `__name:X`, `#X`       |
//! | non-null reference | `__required`, `!`   | `__required`, `!`      |
//! | non-empty list     | `__noempty`, `!0`   | `__noempty`, `!0`      |
//!
//! An object whose last key is `:` describes a callable field: the other keys
//! are arguments, the `:` value is the return type.

use serde_json::{Map, Value};

use crate::Result;
use crate::error::{Error, ErrorKind, json_type_name};

/// Key marking a callable descriptor's return type.
pub const CALLABLE_KEY: &str = ":";

const NAME_KEYS: [&str; 2] = ["__name", "#"];
const REQUIRED_KEYS: [&str; 2] = ["__required", "!"];
const NO_EMPTY_KEYS: [&str; 2] = ["__noempty", "!0"];

/// The kind of top-level declaration a shape compiles into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    /// `type Name { ... }`
    Type,
    /// `input Name { ... }`
    Input,
    /// `enum Name { ... }`
    Enum,
}

impl DeclarationKind {
    /// SDL keyword introducing the declaration.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Input => "input",
            Self::Enum => "enum",
        }
    }

    /// Prefix used when synthesizing a name.
    #[must_use]
    pub const fn name_prefix(self) -> &'static str {
        match self {
            Self::Type => "Type",
            Self::Input => "Input",
            Self::Enum => "Enum",
        }
    }

    /// Infers the kind from a declaration header such as `"input Where @dir"`.
    ///
    /// Anything that is not an `input` or `enum` header compiles nested
    /// shapes as output types.
    #[must_use]
    pub fn from_header(header: &str) -> Self {
        match header.split_whitespace().next() {
            Some("input") => Self::Input,
            Some("enum") => Self::Enum,
            _ => Self::Type,
        }
    }
}

/// Metadata extracted from reserved keys or tokens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    /// Explicit declaration name.
    pub name: Option<String>,
    /// Reference to this shape is non-null.
    pub required: bool,
    /// List items are non-null (only rendered for required arrays).
    pub no_empty: bool,
}

/// A classified body: an enum or object shape, possibly wrapped as a list.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyShape {
    /// The shape itself.
    pub shape: Shape,
    /// The shape was written as a single-element array (`[ {...} ]` or `[[...]]`).
    pub is_array: bool,
}

/// The two shapes a body can take.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// An ordered list of enum values.
    Enum(EnumShape),
    /// A field map.
    Object(ObjectShape),
}

/// Enum values with their metadata removed.
#[derive(Clone, Debug, PartialEq)]
pub struct EnumShape {
    /// Reserved-token metadata.
    pub metadata: Metadata,
    /// Values in declaration order, already validated.
    pub values: Vec<String>,
}

/// Object fields with their metadata removed.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectShape {
    /// Reserved-key metadata.
    pub metadata: Metadata,
    /// Fields in insertion order.
    pub fields: Vec<Field>,
}

/// One field of an object shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    /// Field name (or a bare token such as a directive).
    pub name: String,
    /// Classified value.
    pub value: FieldValue,
}

/// What a field value represents.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    /// Falsy value: the field name is printed alone.
    Bare,
    /// SDL type text printed verbatim.
    Literal(String),
    /// Field with an argument list and a return type.
    Callable(Callable),
    /// Anonymous or named shape hoisted into its own declaration.
    Nested(BodyShape),
}

/// A callable field descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct Callable {
    /// Arguments in declaration order.
    pub arguments: Vec<Argument>,
    /// Return type.
    pub returns: TypeRef,
}

/// A callable field argument.
#[derive(Clone, Debug, PartialEq)]
pub struct Argument {
    /// Argument name.
    pub name: String,
    /// Argument type.
    pub ty: TypeRef,
}

/// A type position: literal SDL text or a shape to hoist.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeRef {
    /// SDL type text printed verbatim.
    Literal(String),
    /// Shape hoisted into its own declaration.
    Shape(BodyShape),
}

impl BodyShape {
    /// Classifies a top-level declaration body.
    ///
    /// At top level every object-valued field must be a callable descriptor.
    ///
    /// # Errors
    ///
    /// Returns an error if the value or anything nested in it is not a valid shape.
    pub fn classify(value: &Value) -> Result<Self> {
        Self::classify_in(value, false)
    }

    /// Classifies a body that will be hoisted into its own declaration.
    ///
    /// Plain nested objects are accepted and hoisted in turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the value or anything nested in it is not a valid shape.
    pub fn classify_nested(value: &Value) -> Result<Self> {
        Self::classify_in(value, true)
    }

    fn classify_in(value: &Value, nested: bool) -> Result<Self> {
        if is_falsy(value) {
            return Err(Error::new(ErrorKind::MissingBody));
        }
        match value {
            Value::Array(items) => match items.as_slice() {
                [single @ (Value::Object(_) | Value::Array(_))] => Ok(Self {
                    shape: Shape::classify(single, nested)?,
                    is_array: true,
                }),
                _ => Ok(Self {
                    shape: Shape::Enum(EnumShape::classify(items)?),
                    is_array: false,
                }),
            },
            Value::Object(map) => Ok(Self {
                shape: Shape::Object(ObjectShape::classify(map, nested)?),
                is_array: false,
            }),
            other => Err(Error::new(ErrorKind::InvalidBody {
                found: json_type_name(other),
            })),
        }
    }

    /// Metadata of the wrapped shape.
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        match &self.shape {
            Shape::Enum(shape) => &shape.metadata,
            Shape::Object(shape) => &shape.metadata,
        }
    }

    /// Declaration kind for this shape when hoisted from a `context` position.
    ///
    /// Enum shapes are always enums; object shapes take the context's kind,
    /// falling back to `type` inside an enum context.
    #[must_use]
    pub fn kind_in(&self, context: DeclarationKind) -> DeclarationKind {
        match (&self.shape, context) {
            (Shape::Enum(_), _) => DeclarationKind::Enum,
            (Shape::Object(_), DeclarationKind::Enum) => DeclarationKind::Type,
            (Shape::Object(_), kind) => kind,
        }
    }
}

impl Shape {
    fn classify(value: &Value, nested: bool) -> Result<Self> {
        match value {
            Value::Array(items) => Ok(Self::Enum(EnumShape::classify(items)?)),
            Value::Object(map) => Ok(Self::Object(ObjectShape::classify(map, nested)?)),
            other => Err(Error::new(ErrorKind::InvalidBody {
                found: json_type_name(other),
            })),
        }
    }
}

impl EnumShape {
    fn classify(items: &[Value]) -> Result<Self> {
        let mut metadata = Metadata::default();
        let mut values = Vec::new();

        for item in items {
            if is_falsy(item) {
                continue;
            }
            let Some(token) = item.as_str() else {
                return Err(Error::new(ErrorKind::NonStringEnumValue));
            };
            if REQUIRED_KEYS.contains(&token) {
                metadata.required = true;
            } else if NO_EMPTY_KEYS.contains(&token) {
                metadata.no_empty = true;
            } else if token.starts_with(NAME_KEYS[0]) {
                metadata.name = token
                    .split_once(':')
                    .map(|(_, name)| name.to_string())
                    .filter(|name| !name.is_empty());
            } else if let Some(name) = token.strip_prefix(NAME_KEYS[1]) {
                metadata.name = Some(name.to_string()).filter(|name| !name.is_empty());
            } else {
                values.push(token.to_string());
            }
        }

        if values.is_empty() {
            return Err(Error::new(ErrorKind::EmptyEnum));
        }
        if let Some(invalid) = values.iter().find(|v| !is_valid_enum_value(v)) {
            return Err(Error::invalid_enum_value(invalid.clone()));
        }

        Ok(Self { metadata, values })
    }
}

impl ObjectShape {
    fn classify(map: &Map<String, Value>, nested: bool) -> Result<Self> {
        let mut metadata = Metadata::default();
        let mut fields = Vec::new();

        for (key, value) in map {
            let key = key.as_str();
            if NAME_KEYS.contains(&key) {
                metadata.name = value
                    .as_str()
                    .filter(|name| !name.is_empty())
                    .map(str::to_string);
            } else if REQUIRED_KEYS.contains(&key) {
                metadata.required = !is_falsy(value);
            } else if NO_EMPTY_KEYS.contains(&key) {
                metadata.no_empty = !is_falsy(value);
            } else if key.starts_with("__") {
                // Unknown reserved keys are dropped.
            } else {
                let value = FieldValue::classify(key, value, nested).map_err(|e| e.in_field(key))?;
                fields.push(Field {
                    name: key.to_string(),
                    value,
                });
            }
        }

        if fields.is_empty() {
            return Err(Error::new(ErrorKind::EmptyObject));
        }

        Ok(Self { metadata, fields })
    }
}

impl FieldValue {
    fn classify(field: &str, value: &Value, nested: bool) -> Result<Self> {
        if is_falsy(value) {
            return Ok(Self::Bare);
        }
        match value {
            Value::String(ty) => Ok(Self::Literal(ty.clone())),
            Value::Object(map) if !nested || is_callable(map) => {
                Ok(Self::Callable(Callable::classify(field, map)?))
            }
            Value::Object(_) | Value::Array(_) => {
                Ok(Self::Nested(BodyShape::classify_nested(value)?))
            }
            other => Err(Error::new(ErrorKind::UnsupportedFieldValue {
                field: field.to_string(),
                found: json_type_name(other),
            })),
        }
    }
}

impl Callable {
    fn classify(field: &str, map: &Map<String, Value>) -> Result<Self> {
        let mut entries = map.iter();
        let malformed = |found: &str| {
            Error::new(ErrorKind::MalformedCallable {
                field: field.to_string(),
                found: found.to_string(),
            })
        };

        let (last, return_value) = entries.next_back().ok_or_else(|| malformed("undefined"))?;
        if last != CALLABLE_KEY {
            return Err(malformed(last));
        }

        let arguments = entries
            .map(|(name, value)| {
                Argument::classify(field, name, value).map_err(|e| e.in_field(name.as_str()))
            })
            .collect::<Result<Vec<_>>>()?;

        let returns = match return_value {
            v if is_falsy(v) => {
                return Err(Error::new(ErrorKind::MissingReturnType {
                    field: field.to_string(),
                }));
            }
            Value::String(ty) => TypeRef::Literal(ty.clone()),
            Value::Object(_) | Value::Array(_) => {
                TypeRef::Shape(BodyShape::classify_nested(return_value)?)
            }
            other => {
                return Err(Error::new(ErrorKind::UnsupportedReturnType {
                    field: field.to_string(),
                    found: json_type_name(other),
                }));
            }
        };

        Ok(Self { arguments, returns })
    }
}

impl Argument {
    fn classify(field: &str, name: &str, value: &Value) -> Result<Self> {
        let ty = match value {
            v if is_falsy(v) => {
                return Err(Error::new(ErrorKind::MissingArgumentType {
                    field: field.to_string(),
                    argument: name.to_string(),
                }));
            }
            Value::String(ty) => TypeRef::Literal(ty.clone()),
            Value::Object(_) | Value::Array(_) => {
                TypeRef::Shape(BodyShape::classify_nested(value)?)
            }
            other => {
                return Err(Error::new(ErrorKind::UnsupportedArgumentType {
                    field: field.to_string(),
                    argument: name.to_string(),
                    found: json_type_name(other),
                }));
            }
        };
        Ok(Self {
            name: name.to_string(),
            ty,
        })
    }
}

/// Returns true if the object's last key is the callable marker `:`.
#[must_use]
pub fn is_callable(map: &Map<String, Value>) -> bool {
    map.keys().next_back().is_some_and(|k| k == CALLABLE_KEY)
}

/// JavaScript truthiness: `null`, `false`, `0` and `""` are falsy.
#[must_use]
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Returns true if `value` is a valid GraphQL enum value name.
///
/// Letters, digits and underscores only, not starting with a digit.
#[must_use]
pub fn is_valid_enum_value(value: &str) -> bool {
    let mut chars = value.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
