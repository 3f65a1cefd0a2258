//! Wire marshaling and value types for the Responsys Interact SOAP API.
//!
//! This crate holds everything that does not talk to the network:
//! - Wire values and structures as the SOAP transport sees them
//! - The adapter that maps snake_case attributes onto camelCase wire fields
//! - Request types (objects, merge rules, record sets, recipients, events)
//! - Response projections (login, merge, delete, recipient, trigger results)
//!
//! The transport itself and the session handling live in `responsys-client`.

mod adapter;
mod merge_rule;
mod object;
mod recipient;
mod record;
mod results;
mod wire;

pub use adapter::{FromWire, InteractType, WireObject, marshal, to_camel_case};
pub use merge_rule::{ListMergeRule, MatchOperator, PermissionStatus, UpdateOnMatch};
pub use object::{InteractObject, QueryColumn};
pub use recipient::{
    CustomEvent, EmailFormat, OptionalData, Recipient, RecipientBuilder, RecipientData,
};
pub use record::{Record, RecordData, Row};
pub use results::{
    DeleteResult, FailedRecord, FolderResult, LoginResult, MergeResult, RecipientResult,
    ServerAuthResult, TriggerResult,
};
pub use wire::{FromWireValue, PlainFactory, ShapeError, StructFactory, WireStruct, WireValue};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or reading wire types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("record set must contain at least one record")]
    EmptyRecordSet,

    #[error("row {row} is missing field {field:?}")]
    MissingField { row: usize, field: String },

    #[error("field {0:?} appears more than once")]
    DuplicateField(String),

    #[error("record {index} has {found} values, expected {expected}")]
    RecordLength {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error(
        "at least one of recipient_id, customer_id, email_address or mobile_number must be provided"
    )]
    MissingRecipientKey,

    #[error("match_column_name_1 is required")]
    MissingMatchColumn,

    #[error("unknown query column: {0}")]
    UnknownQueryColumn(String),

    #[error("{type_name} is missing field {field}")]
    MissingWireField { type_name: String, field: String },

    #[error("{type_name}.{field}: expected {expected}, found {found}")]
    WireShape {
        type_name: String,
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}
