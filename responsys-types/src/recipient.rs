//! Message recipients and custom event triggers.

use crate::adapter::{WireObject, marshal};
use crate::object::InteractObject;
use crate::wire::{StructFactory, WireValue};
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Preferred email format of a recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmailFormat {
    #[default]
    #[serde(rename = "TEXT_FORMAT")]
    Text,
    #[serde(rename = "HTML_FORMAT")]
    Html,
    #[serde(rename = "MULTIPART_FORMAT")]
    Multipart,
    #[serde(rename = "NO_FORMAT")]
    None,
}

impl EmailFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT_FORMAT",
            Self::Html => "HTML_FORMAT",
            Self::Multipart => "MULTIPART_FORMAT",
            Self::None => "NO_FORMAT",
        }
    }
}

impl From<EmailFormat> for WireValue {
    fn from(value: EmailFormat) -> Self {
        WireValue::Text(value.as_str().to_string())
    }
}

/// A message target on a list.
///
/// At least one of recipient id, customer id, email address or mobile
/// number is always set; use [`Recipient::builder`].
#[derive(Debug, Clone, PartialEq)]
pub struct Recipient {
    list_name: InteractObject,
    recipient_id: Option<i64>,
    customer_id: Option<String>,
    email_address: Option<String>,
    mobile_number: Option<String>,
    email_format: EmailFormat,
}

impl Recipient {
    pub fn builder(list_name: InteractObject) -> RecipientBuilder {
        RecipientBuilder {
            list_name,
            recipient_id: None,
            customer_id: None,
            email_address: None,
            mobile_number: None,
            email_format: EmailFormat::default(),
        }
    }

    pub fn list_name(&self) -> &InteractObject {
        &self.list_name
    }

    pub fn recipient_id(&self) -> Option<i64> {
        self.recipient_id
    }

    pub fn customer_id(&self) -> Option<&str> {
        self.customer_id.as_deref()
    }

    pub fn email_address(&self) -> Option<&str> {
        self.email_address.as_deref()
    }

    pub fn mobile_number(&self) -> Option<&str> {
        self.mobile_number.as_deref()
    }

    pub fn email_format(&self) -> EmailFormat {
        self.email_format
    }
}

impl WireObject for Recipient {
    fn wire_type(&self) -> &str {
        "Recipient"
    }

    fn attributes(&self, factory: &dyn StructFactory) -> Vec<(&str, WireValue)> {
        vec![
            ("list_name", self.list_name.to_wire(factory).into()),
            ("recipient_id", self.recipient_id.into()),
            ("customer_id", self.customer_id.clone().into()),
            ("email_address", self.email_address.clone().into()),
            ("mobile_number", self.mobile_number.clone().into()),
            ("email_format", self.email_format.into()),
        ]
    }
}

/// Builder for [`Recipient`].
#[derive(Debug, Clone)]
pub struct RecipientBuilder {
    list_name: InteractObject,
    recipient_id: Option<i64>,
    customer_id: Option<String>,
    email_address: Option<String>,
    mobile_number: Option<String>,
    email_format: EmailFormat,
}

impl RecipientBuilder {
    pub fn recipient_id(mut self, id: i64) -> Self {
        self.recipient_id = Some(id);
        self
    }

    pub fn customer_id(mut self, id: impl Into<String>) -> Self {
        self.customer_id = Some(id.into());
        self
    }

    pub fn email_address(mut self, address: impl Into<String>) -> Self {
        self.email_address = Some(address.into());
        self
    }

    pub fn mobile_number(mut self, number: impl Into<String>) -> Self {
        self.mobile_number = Some(number.into());
        self
    }

    pub fn email_format(mut self, format: EmailFormat) -> Self {
        self.email_format = format;
        self
    }

    /// Fails with [`Error::MissingRecipientKey`] unless some identifying
    /// key is set. Empty strings and a zero id do not count.
    pub fn build(self) -> Result<Recipient> {
        let present = |s: &Option<String>| s.as_deref().is_some_and(|s| !s.is_empty());
        let identified = self.recipient_id.is_some_and(|id| id != 0)
            || present(&self.customer_id)
            || present(&self.email_address)
            || present(&self.mobile_number);
        if !identified {
            return Err(Error::MissingRecipientKey);
        }

        Ok(Recipient {
            list_name: self.list_name,
            recipient_id: self.recipient_id,
            customer_id: self.customer_id,
            email_address: self.email_address,
            mobile_number: self.mobile_number,
            email_format: self.email_format,
        })
    }
}

/// Extra personalization values sent with a triggered message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OptionalData(IndexMap<String, String>);

impl OptionalData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// One `OptionalData` structure per pair, or `Null` when there are none.
    pub fn to_wire(&self, factory: &dyn StructFactory) -> WireValue {
        if self.0.is_empty() {
            return WireValue::Null;
        }
        let entries = self
            .0
            .iter()
            .map(|(name, value)| {
                WireValue::Struct(marshal(
                    factory,
                    "OptionalData",
                    [
                        ("name", WireValue::from(name.as_str())),
                        ("value", WireValue::from(value.as_str())),
                    ],
                ))
            })
            .collect();
        WireValue::List(entries)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OptionalData {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A recipient paired with its optional personalization data.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipientData {
    pub recipient: Recipient,
    pub optional_data: OptionalData,
}

impl RecipientData {
    pub fn new(recipient: Recipient, optional_data: OptionalData) -> Self {
        Self {
            recipient,
            optional_data,
        }
    }
}

impl From<Recipient> for RecipientData {
    fn from(recipient: Recipient) -> Self {
        Self::new(recipient, OptionalData::default())
    }
}

impl WireObject for RecipientData {
    fn wire_type(&self) -> &str {
        "RecipientData"
    }

    fn attributes(&self, factory: &dyn StructFactory) -> Vec<(&str, WireValue)> {
        vec![
            ("recipient", self.recipient.to_wire(factory).into()),
            ("optional_data", self.optional_data.to_wire(factory)),
        ]
    }
}

/// A custom event that triggers a program on the service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomEvent {
    pub event_name: Option<String>,
    pub event_id: Option<i64>,
    pub event_string_data_mapping: Option<String>,
    pub event_date_data_mapping: Option<String>,
    pub event_number_data_mapping: Option<String>,
}

impl CustomEvent {
    pub fn named(event_name: impl Into<String>) -> Self {
        Self {
            event_name: Some(event_name.into()),
            ..Default::default()
        }
    }

    pub fn with_id(event_id: i64) -> Self {
        Self {
            event_id: Some(event_id),
            ..Default::default()
        }
    }
}

impl WireObject for CustomEvent {
    fn wire_type(&self) -> &str {
        "CustomEvent"
    }

    fn attributes(&self, _factory: &dyn StructFactory) -> Vec<(&str, WireValue)> {
        vec![
            ("event_name", self.event_name.clone().into()),
            ("event_id", self.event_id.into()),
            (
                "event_string_data_mapping",
                self.event_string_data_mapping.clone().into(),
            ),
            (
                "event_date_data_mapping",
                self.event_date_data_mapping.clone().into(),
            ),
            (
                "event_number_data_mapping",
                self.event_number_data_mapping.clone().into(),
            ),
        ]
    }
}
