//! List merge policy.

use crate::adapter::WireObject;
use crate::wire::{StructFactory, WireValue};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// What to do with an existing member that matches an incoming record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpdateOnMatch {
    #[default]
    ReplaceAll,
    NoUpdate,
}

impl UpdateOnMatch {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReplaceAll => "REPLACE_ALL",
            Self::NoUpdate => "NO_UPDATE",
        }
    }
}

impl From<UpdateOnMatch> for WireValue {
    fn from(value: UpdateOnMatch) -> Self {
        WireValue::Text(value.as_str().to_string())
    }
}

/// How multiple match columns combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchOperator {
    #[default]
    None,
    And,
}

impl MatchOperator {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::And => "AND",
        }
    }
}

impl From<MatchOperator> for WireValue {
    fn from(value: MatchOperator) -> Self {
        WireValue::Text(value.as_str().to_string())
    }
}

/// Permission status given to newly inserted members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PermissionStatus {
    #[default]
    Optin,
    Optout,
}

impl PermissionStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Optin => "OPTIN",
            Self::Optout => "OPTOUT",
        }
    }
}

impl From<PermissionStatus> for WireValue {
    fn from(value: PermissionStatus) -> Self {
        WireValue::Text(value.as_str().to_string())
    }
}

/// Merge behavior for `mergeListMembers`.
///
/// Defaults mirror the service documentation; override per call with
/// struct update syntax:
///
/// ```
/// use responsys_types::{ListMergeRule, UpdateOnMatch};
///
/// let rule = ListMergeRule {
///     update_on_match: UpdateOnMatch::NoUpdate,
///     ..Default::default()
/// };
/// assert_eq!(rule.match_column_name_1, "Customer_Id_");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListMergeRule {
    pub insert_on_no_match: bool,
    pub update_on_match: UpdateOnMatch,
    pub match_column_name_1: String,
    pub match_column_name_2: Option<String>,
    pub match_column_name_3: Option<String>,
    pub match_operator: MatchOperator,
    pub optin_value: String,
    pub optout_value: String,
    pub html_value: String,
    pub text_value: String,
    pub reject_record_if_channel_empty: String,
    pub default_permission_status: PermissionStatus,
}

impl Default for ListMergeRule {
    fn default() -> Self {
        Self {
            insert_on_no_match: true,
            update_on_match: UpdateOnMatch::ReplaceAll,
            match_column_name_1: "Customer_Id_".to_string(),
            match_column_name_2: None,
            match_column_name_3: None,
            match_operator: MatchOperator::None,
            optin_value: "I".to_string(),
            optout_value: "O".to_string(),
            html_value: "H".to_string(),
            text_value: "T".to_string(),
            reject_record_if_channel_empty: "E".to_string(),
            default_permission_status: PermissionStatus::Optin,
        }
    }
}

impl ListMergeRule {
    /// The first match column is required by the service.
    pub fn validate(&self) -> Result<()> {
        if self.match_column_name_1.trim().is_empty() {
            return Err(Error::MissingMatchColumn);
        }
        Ok(())
    }
}

impl WireObject for ListMergeRule {
    fn wire_type(&self) -> &str {
        "ListMergeRule"
    }

    fn attributes(&self, _factory: &dyn StructFactory) -> Vec<(&str, WireValue)> {
        vec![
            ("insert_on_no_match", self.insert_on_no_match.into()),
            ("update_on_match", self.update_on_match.into()),
            ("match_column_name_1", self.match_column_name_1.clone().into()),
            ("match_column_name_2", self.match_column_name_2.clone().into()),
            ("match_column_name_3", self.match_column_name_3.clone().into()),
            ("match_operator", self.match_operator.into()),
            ("optin_value", self.optin_value.clone().into()),
            ("optout_value", self.optout_value.clone().into()),
            ("html_value", self.html_value.clone().into()),
            ("text_value", self.text_value.clone().into()),
            (
                "reject_record_if_channel_empty",
                self.reject_record_if_channel_empty.clone().into(),
            ),
            (
                "default_permission_status",
                self.default_permission_status.into(),
            ),
        ]
    }
}
