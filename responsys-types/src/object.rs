//! Remote resource addressing.

use crate::adapter::{FromWire, WireObject};
use crate::wire::{StructFactory, WireStruct, WireValue};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Addresses a list, table, profile extension or folder on the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InteractObject {
    pub folder_name: String,
    pub object_name: String,
}

impl InteractObject {
    pub fn new(folder_name: impl Into<String>, object_name: impl Into<String>) -> Self {
        Self {
            folder_name: folder_name.into(),
            object_name: object_name.into(),
        }
    }
}

impl WireObject for InteractObject {
    fn wire_type(&self) -> &str {
        "InteractObject"
    }

    fn attributes(&self, _factory: &dyn StructFactory) -> Vec<(&str, WireValue)> {
        vec![
            ("folder_name", self.folder_name.clone().into()),
            ("object_name", self.object_name.clone().into()),
        ]
    }
}

impl FromWire for InteractObject {
    fn from_wire(wire: &WireStruct) -> Result<Self> {
        Ok(Self {
            folder_name: wire.read("folder_name")?,
            object_name: wire.read("object_name")?,
        })
    }
}

/// Column used to match ids in list, table and profile extension queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryColumn {
    #[default]
    Riid,
    EmailAddress,
    CustomerId,
    MobileNumber,
}

impl QueryColumn {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Riid => "RIID",
            Self::EmailAddress => "EMAIL_ADDRESS",
            Self::CustomerId => "CUSTOMER_ID",
            Self::MobileNumber => "MOBILE_NUMBER",
        }
    }
}

impl fmt::Display for QueryColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryColumn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "RIID" => Ok(Self::Riid),
            "EMAIL_ADDRESS" => Ok(Self::EmailAddress),
            "CUSTOMER_ID" => Ok(Self::CustomerId),
            "MOBILE_NUMBER" => Ok(Self::MobileNumber),
            other => Err(Error::UnknownQueryColumn(other.to_string())),
        }
    }
}

impl From<QueryColumn> for WireValue {
    fn from(column: QueryColumn) -> Self {
        WireValue::Text(column.as_str().to_string())
    }
}
