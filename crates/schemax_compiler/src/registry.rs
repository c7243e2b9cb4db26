//! Declaration registry.
//!
//! Folds the flat `(header, body)` stream into one entry per header, in
//! first-seen order, merging the bodies of repeated headers.

use indexmap::IndexMap;
use serde_json::Value;

use schemax_foundation::{Error, ErrorKind, Result, is_falsy, json_type_name};

/// Header → merged body, in first-seen order.
///
/// A `None` body marks a directive-only declaration such as
/// `directive @auth on FIELD_DEFINITION`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Registry {
    entries: IndexMap<String, Option<Value>>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds a flattened item stream (headers at even positions) into a registry.
    ///
    /// A trailing header with no body is registered as directive-only.
    ///
    /// # Errors
    ///
    /// Returns a position-aware error if a header is falsy or not a string, if a
    /// body is a scalar, or if two incompatible bodies share a header.
    pub fn fold<'a>(stream: impl IntoIterator<Item = &'a Value>) -> Result<Self> {
        let mut registry = Self::new();
        let mut pending: Option<String> = None;

        for (index, item) in stream.into_iter().enumerate() {
            match pending.take() {
                None => {
                    if is_falsy(item) {
                        return Err(Error::new(ErrorKind::FalsyHeader { index }));
                    }
                    let Value::String(header) = item else {
                        return Err(Error::invalid_header(index, json_type_name(item)));
                    };
                    pending = Some(header.trim().to_string());
                }
                Some(header) => {
                    if is_falsy(item) {
                        registry.register(header, None)?;
                    } else if item.is_object() || item.is_array() {
                        registry.register(header, Some(item.clone()))?;
                    } else {
                        return Err(Error::invalid_body_item(index, json_type_name(item)));
                    }
                }
            }
        }

        if let Some(header) = pending {
            registry.register(header, None)?;
        }

        Ok(registry)
    }

    /// Registers a body under `header`, merging with any existing body.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::IncompatibleMerge`] when an enum and an object body meet.
    pub fn register(&mut self, header: String, body: Option<Value>) -> Result<()> {
        match self.entries.get_mut(&header) {
            None => {
                self.entries.insert(header, body);
            }
            Some(slot) => {
                if let Some(body) = body {
                    let merged = match slot.take() {
                        None => body,
                        Some(existing) => merge_bodies(&header, existing, body)?,
                    };
                    *slot = Some(merged);
                }
            }
        }
        Ok(())
    }

    /// Number of distinct headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no header has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Headers in first-seen order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Body registered under `header`; `Some(None)` for directive-only entries.
    #[must_use]
    pub fn get(&self, header: &str) -> Option<Option<&Value>> {
        self.entries.get(header).map(Option::as_ref)
    }

    /// `(header, body)` pairs in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.entries.iter().map(|(h, b)| (h.as_str(), b.as_ref()))
    }

    /// Consumes the registry, yielding `(header, body)` pairs in order.
    pub fn into_entries(self) -> impl Iterator<Item = (String, Option<Value>)> {
        self.entries.into_iter()
    }
}

/// Merges two bodies registered under the same header.
///
/// Objects: shallow union, later keys overwrite earlier ones in place.
/// Enums: order-preserving union of tokens.
///
/// # Errors
///
/// Returns [`ErrorKind::IncompatibleMerge`] for an enum meeting an object.
pub fn merge_bodies(header: &str, existing: Value, next: Value) -> Result<Value> {
    match (existing, next) {
        (Value::Object(mut acc), Value::Object(next)) => {
            for (key, value) in next {
                acc.insert(key, value);
            }
            Ok(Value::Object(acc))
        }
        (Value::Array(mut acc), Value::Array(next)) => {
            for value in next {
                if !acc.contains(&value) {
                    acc.push(value);
                }
            }
            Ok(Value::Array(acc))
        }
        _ => Err(Error::new(ErrorKind::IncompatibleMerge {
            header: header.to_string(),
        })),
    }
}
