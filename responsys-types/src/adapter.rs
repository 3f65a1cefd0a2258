//! Local object to wire structure adapter.
//!
//! Every type that travels to the service declares an ordered list of
//! snake_case attributes. Marshaling asks the transport's factory for an
//! empty structure of the declared wire type and copies each attribute
//! onto the camelCase field of the same name. Nothing outside the
//! declared list is ever written.

use crate::Result;
use crate::wire::{StructFactory, WireStruct, WireValue};
use indexmap::IndexMap;

/// Converts a snake_case attribute name to its camelCase wire name.
///
/// Purely lexical: split on `_`, capitalize every word after the first,
/// concatenate.
///
/// ```
/// use responsys_types::to_camel_case;
///
/// assert_eq!(to_camel_case("match_column_name_1"), "matchColumnName1");
/// assert_eq!(to_camel_case("folder_name"), "folderName");
/// ```
pub fn to_camel_case(name: &str) -> String {
    let mut words = name.split('_');
    let mut out = String::with_capacity(name.len());
    if let Some(first) = words.next() {
        out.push_str(first);
    }
    for word in words {
        let mut chars = word.chars();
        if let Some(head) = chars.next() {
            out.extend(head.to_uppercase());
            out.extend(chars.flat_map(char::to_lowercase));
        }
    }
    out
}

/// Builds a wire structure from `(local_name, value)` attribute pairs.
pub fn marshal<'a, I>(factory: &dyn StructFactory, wire_type: &str, attributes: I) -> WireStruct
where
    I: IntoIterator<Item = (&'a str, WireValue)>,
{
    let mut wire = factory.create(wire_type);
    for (name, value) in attributes {
        wire.set(to_camel_case(name), value);
    }
    wire
}

/// A local type with a fixed wire contract.
pub trait WireObject {
    /// Type name passed to the structure factory.
    fn wire_type(&self) -> &str;

    /// The registered attributes in declaration order.
    ///
    /// Nested wire objects are converted through `factory` here so the
    /// returned values are already in wire form.
    fn attributes(&self, factory: &dyn StructFactory) -> Vec<(&str, WireValue)>;

    fn to_wire(&self, factory: &dyn StructFactory) -> WireStruct {
        marshal(factory, self.wire_type(), self.attributes(factory))
    }
}

/// A local type built from a structure returned by the service.
pub trait FromWire: Sized {
    fn from_wire(wire: &WireStruct) -> Result<Self>;
}

/// A dynamic wire object whose attributes are registered at runtime.
///
/// Useful for request structures outside the fixed type catalog. The wire
/// type name defaults to `"InteractType"`.
///
/// ```
/// use responsys_types::{InteractType, PlainFactory, WireObject, WireValue};
///
/// let mut obj = InteractType::new();
/// obj.register("red_fish", true);
/// let wire = obj.to_wire(&PlainFactory);
/// assert_eq!(wire.get("redFish"), Some(&WireValue::Bool(true)));
/// assert!(!wire.has_field("red_fish"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InteractType {
    wire_type: String,
    attributes: IndexMap<String, WireValue>,
}

impl Default for InteractType {
    fn default() -> Self {
        Self::with_wire_type("InteractType")
    }
}

impl InteractType {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_wire_type(wire_type: impl Into<String>) -> Self {
        Self {
            wire_type: wire_type.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Marks `name` as part of the wire contract and assigns its value.
    ///
    /// Registering an existing name overwrites the value in place.
    pub fn register(&mut self, name: impl Into<String>, value: impl Into<WireValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&WireValue> {
        self.attributes.get(name)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    /// Registered attribute names in registration order.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }
}

impl WireObject for InteractType {
    fn wire_type(&self) -> &str {
        &self.wire_type
    }

    fn attributes(&self, _factory: &dyn StructFactory) -> Vec<(&str, WireValue)> {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camel_case_single_word_unchanged() {
        assert_eq!(to_camel_case("success"), "success");
    }

    #[test]
    fn camel_case_lowercases_word_tails() {
        assert_eq!(to_camel_case("optin_VALUE"), "optinValue");
    }

    #[test]
    fn camel_case_skips_empty_words() {
        assert_eq!(to_camel_case("customer__id"), "customerId");
    }

    #[test]
    fn register_overwrites_existing() {
        let mut obj = InteractType::new();
        obj.register("foo", 1);
        obj.register("foo", 2);
        assert_eq!(obj.get("foo"), Some(&WireValue::Int(2)));
        assert_eq!(obj.attribute_names().count(), 1);
    }
}
