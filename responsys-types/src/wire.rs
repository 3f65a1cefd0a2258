//! Wire-format values and structures.
//!
//! These are the shapes handed to and received from the SOAP transport. A
//! [`WireStruct`] is always created through a [`StructFactory`] so the
//! transport decides what an "empty" structure of a given type looks like.

use crate::adapter::to_camel_case;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A single value on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<WireValue>),
    Struct(WireStruct),
}

impl WireValue {
    /// Returns true for [`WireValue::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[WireValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&WireStruct> {
        match self {
            Self::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Short name of the variant, used in shape errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Struct(_) => "struct",
        }
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(_) => write!(f, "{self:?}"),
        }
    }
}

impl From<bool> for WireValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for WireValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for WireValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for WireValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for WireValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for WireValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<WireStruct> for WireValue {
    fn from(value: WireStruct) -> Self {
        Self::Struct(value)
    }
}

impl<T: Into<WireValue>> From<Option<T>> for WireValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl<T: Into<WireValue>> From<Vec<T>> for WireValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

/// A named wire structure with camelCase field names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WireStruct {
    #[serde(rename = "type")]
    type_name: String,
    fields: BTreeMap<String, WireValue>,
}

impl WireStruct {
    /// Creates an empty structure of the given wire type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field assignment by wire name.
    #[must_use]
    pub fn with(mut self, wire_name: impl Into<String>, value: impl Into<WireValue>) -> Self {
        self.set(wire_name, value);
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Sets a field by its wire name, replacing any previous value.
    pub fn set(&mut self, wire_name: impl Into<String>, value: impl Into<WireValue>) {
        self.fields.insert(wire_name.into(), value.into());
    }

    /// Looks a field up by its wire name.
    pub fn get(&self, wire_name: &str) -> Option<&WireValue> {
        self.fields.get(wire_name)
    }

    pub fn has_field(&self, wire_name: &str) -> bool {
        self.fields.contains_key(wire_name)
    }

    /// Iterates the fields in wire-name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &WireValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Reads the field exposed locally as `local_name`.
    ///
    /// The lookup uses the camelCase wire name; an absent field reads as
    /// `Null`, so optional targets come back as `None` and required targets
    /// fail with [`Error::MissingWireField`].
    pub fn read<T: FromWireValue>(&self, local_name: &str) -> Result<T> {
        let wire_name = to_camel_case(local_name);
        let value = self.fields.get(&wire_name).unwrap_or(&WireValue::Null);
        T::from_wire_value(value).map_err(|err| err.for_field(&self.type_name, &wire_name))
    }
}

/// Creates empty wire structures by type name.
pub trait StructFactory {
    fn create(&self, type_name: &str) -> WireStruct;
}

/// A factory producing bare [`WireStruct`]s with no preset fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFactory;

impl StructFactory for PlainFactory {
    fn create(&self, type_name: &str) -> WireStruct {
        WireStruct::new(type_name)
    }
}

/// Why a wire value could not be read as the requested type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    Missing,
    Mismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl ShapeError {
    fn for_field(self, type_name: &str, field: &str) -> Error {
        match self {
            Self::Missing => Error::MissingWireField {
                type_name: type_name.to_string(),
                field: field.to_string(),
            },
            Self::Mismatch { expected, found } => Error::WireShape {
                type_name: type_name.to_string(),
                field: field.to_string(),
                expected,
                found,
            },
        }
    }
}

/// Typed extraction from a [`WireValue`].
pub trait FromWireValue: Sized {
    fn from_wire_value(value: &WireValue) -> std::result::Result<Self, ShapeError>;
}

fn mismatch(expected: &'static str, value: &WireValue) -> ShapeError {
    match value {
        WireValue::Null => ShapeError::Missing,
        other => ShapeError::Mismatch {
            expected,
            found: other.kind(),
        },
    }
}

impl FromWireValue for WireValue {
    fn from_wire_value(value: &WireValue) -> std::result::Result<Self, ShapeError> {
        Ok(value.clone())
    }
}

impl FromWireValue for String {
    fn from_wire_value(value: &WireValue) -> std::result::Result<Self, ShapeError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| mismatch("text", value))
    }
}

impl FromWireValue for bool {
    fn from_wire_value(value: &WireValue) -> std::result::Result<Self, ShapeError> {
        value.as_bool().ok_or_else(|| mismatch("bool", value))
    }
}

impl FromWireValue for i64 {
    fn from_wire_value(value: &WireValue) -> std::result::Result<Self, ShapeError> {
        value.as_i64().ok_or_else(|| mismatch("int", value))
    }
}

impl FromWireValue for Vec<String> {
    fn from_wire_value(value: &WireValue) -> std::result::Result<Self, ShapeError> {
        let items = value.as_list().ok_or_else(|| mismatch("list", value))?;
        items.iter().map(String::from_wire_value).collect()
    }
}

impl<T: FromWireValue> FromWireValue for Option<T> {
    fn from_wire_value(value: &WireValue) -> std::result::Result<Self, ShapeError> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_wire_value(value).map(Some)
        }
    }
}
