//! Accessors for the attribute tree produced by an [`XmlAdapter`](crate::xml::XmlAdapter).
//!
//! The tree mirrors the manifest XML: attributes and child elements are keys of an object,
//! and an element that may repeat is either a single object or an array of objects depending
//! on how many times it occurred. Everything reading the tree goes through [`one_or_many`] so
//! that this ambiguity is resolved in one place.

use serde_json::{Map, Value};

use crate::error::ManifestError;

pub type AttributeTree = Value;

pub type Object = Map<String, Value>;

/// Normalizes a value that may be a single item or an array of items into a sequence.
pub fn one_or_many(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

/// Like [`one_or_many`], but every item must be an object.
pub(crate) fn objects<'a>(
    value: &'a Value,
    field: &'static str,
) -> Result<Vec<&'a Object>, ManifestError> {
    one_or_many(value)
        .into_iter()
        .map(|item| object(item, field))
        .collect()
}

pub(crate) fn object<'a>(
    value: &'a Value,
    field: &'static str,
) -> Result<&'a Object, ManifestError> {
    value.as_object().ok_or(ManifestError::UnexpectedShape {
        field,
        expected: "an element",
    })
}

pub(crate) fn required<'a>(
    object: &'a Object,
    field: &'static str,
    parent: &'static str,
) -> Result<&'a Value, ManifestError> {
    object
        .get(field)
        .ok_or(ManifestError::MissingField { field, parent })
}

pub(crate) fn string<'a>(value: &'a Value, field: &'static str) -> Result<&'a str, ManifestError> {
    value.as_str().ok_or(ManifestError::UnexpectedShape {
        field,
        expected: "a string",
    })
}

/// Reads a non-negative base 10 integer. Attribute values may or may not have been converted
/// to numbers by the adapter, so numeric strings are accepted as well.
pub(crate) fn integer(value: &Value, field: &'static str) -> Result<u64, ManifestError> {
    let parsed = match value {
        Value::Number(number) => number.as_u64(),
        Value::String(literal) => literal.trim().parse::<u64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| ManifestError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

pub(crate) fn optional_integer(
    object: &Object,
    field: &'static str,
) -> Result<Option<u64>, ManifestError> {
    object
        .get(field)
        .map(|value| integer(value, field))
        .transpose()
}
