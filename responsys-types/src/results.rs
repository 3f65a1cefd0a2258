//! Read-only projections of service responses.

use crate::Result;
use crate::adapter::FromWire;
use crate::wire::{WireStruct, WireValue};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static FAILED_RECORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Record ([0-9]*) =").expect("failed-record pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResult {
    pub session_id: String,
}

impl FromWire for LoginResult {
    fn from_wire(wire: &WireStruct) -> Result<Self> {
        Ok(Self {
            session_id: wire.read("session_id")?,
        })
    }
}

/// Response to `authenticateServer`, the first half of certificate login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerAuthResult {
    pub auth_session_id: String,
    pub encrypted_client_challenge: Option<String>,
    pub server_challenge: Option<String>,
}

impl FromWire for ServerAuthResult {
    fn from_wire(wire: &WireStruct) -> Result<Self> {
        Ok(Self {
            auth_session_id: wire.read("auth_session_id")?,
            encrypted_client_challenge: wire.read("encrypted_client_challenge")?,
            server_challenge: wire.read("server_challenge")?,
        })
    }
}

/// A record index pulled out of a merge error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailedRecord {
    Index(u64),
    /// The text between `Record` and `=` when it is not a number.
    Raw(String),
}

impl From<u64> for FailedRecord {
    fn from(index: u64) -> Self {
        Self::Index(index)
    }
}

/// Counts returned by list and table merges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeResult {
    pub insert_count: i64,
    pub update_count: i64,
    pub rejected_count: i64,
    pub total_count: i64,
    pub error_message: Option<String>,
}

impl MergeResult {
    /// Records the service reported as failed, in message order.
    ///
    /// ```
    /// use responsys_types::{FailedRecord, MergeResult};
    ///
    /// let result = MergeResult {
    ///     insert_count: 1,
    ///     update_count: 1,
    ///     rejected_count: 2,
    ///     total_count: 4,
    ///     error_message: Some("These failed: Record 1 = Test, Record 2 = What".into()),
    /// };
    /// assert_eq!(result.failed(), vec![FailedRecord::Index(1), FailedRecord::Index(2)]);
    /// ```
    pub fn failed(&self) -> Vec<FailedRecord> {
        let Some(message) = self.error_message.as_deref() else {
            return Vec::new();
        };
        FAILED_RECORD
            .captures_iter(message)
            .map(|caps| {
                let text = &caps[1];
                text.parse::<u64>()
                    .map(FailedRecord::Index)
                    .unwrap_or_else(|_| FailedRecord::Raw(text.to_string()))
            })
            .collect()
    }
}

impl FromWire for MergeResult {
    fn from_wire(wire: &WireStruct) -> Result<Self> {
        Ok(Self {
            insert_count: wire.read("insert_count")?,
            update_count: wire.read("update_count")?,
            rejected_count: wire.read("rejected_count")?,
            total_count: wire.read("total_count")?,
            error_message: wire.read("error_message")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResult {
    pub error_message: Option<String>,
    pub success: bool,
    pub exception_code: Option<String>,
    /// The deleted id as the service echoes it back.
    pub id: WireValue,
}

impl FromWire for DeleteResult {
    fn from_wire(wire: &WireStruct) -> Result<Self> {
        Ok(Self {
            error_message: wire.read("error_message")?,
            success: wire.read("success")?,
            exception_code: wire.read("exception_code")?,
            id: wire.read("id")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientResult {
    pub recipient_id: Option<i64>,
    pub error_message: Option<String>,
}

impl FromWire for RecipientResult {
    fn from_wire(wire: &WireStruct) -> Result<Self> {
        Ok(Self {
            recipient_id: wire.read("recipient_id")?,
            error_message: wire.read("error_message")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerResult {
    pub recipient_id: Option<i64>,
    pub success: bool,
    pub error_message: Option<String>,
}

impl FromWire for TriggerResult {
    fn from_wire(wire: &WireStruct) -> Result<Self> {
        Ok(Self {
            recipient_id: wire.read("recipient_id")?,
            success: wire.read("success")?,
            error_message: wire.read("error_message")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderResult {
    pub name: String,
}

impl FromWire for FolderResult {
    fn from_wire(wire: &WireStruct) -> Result<Self> {
        Ok(Self {
            name: wire.read("name")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merge_with(message: Option<&str>) -> MergeResult {
        MergeResult {
            insert_count: 0,
            update_count: 0,
            rejected_count: 0,
            total_count: 0,
            error_message: message.map(str::to_string),
        }
    }

    #[test]
    fn failed_empty_message() {
        assert!(merge_with(Some("")).failed().is_empty());
        assert!(merge_with(None).failed().is_empty());
    }

    #[test]
    fn failed_passes_non_numeric_through() {
        assert_eq!(
            merge_with(Some("Record  = blank, Record 7 = bad")).failed(),
            vec![FailedRecord::Raw(String::new()), FailedRecord::Index(7)]
        );
    }
}
