//! Client error types.
//!
//! Remote faults are classified purely by their fault name. Connectivity
//! failures never look like faults, so callers can pick a retry strategy
//! per kind.

use responsys_types::WireValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type for client operations.
pub type InteractResult<T> = Result<T, InteractError>;

/// A fault declared by the remote service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fault {
    /// The fault string, e.g. `"TableFault"` or `"API_LIMIT_EXCEEDED"`.
    pub name: String,
    /// The fault detail payload as the transport decoded it.
    pub detail: WireValue,
}

impl Fault {
    pub fn new(name: impl Into<String>, detail: impl Into<WireValue>) -> Self {
        Self {
            name: name.into(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.detail)
    }
}

/// Errors that can occur talking to the Interact service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InteractError {
    /// The service could not be reached or timed out.
    #[error("connection failed: {0}")]
    Connection(String),

    /// Credentials were rejected (`AccountFault`).
    #[error("authentication failed: {detail}")]
    Authentication { detail: WireValue },

    /// The account's API rate limit was hit (`API_LIMIT_EXCEEDED`).
    #[error("API limit exceeded: {detail}")]
    ApiLimitExceeded { detail: WireValue },

    #[error("table fault: {detail}")]
    TableFault { detail: WireValue },

    #[error("list fault: {detail}")]
    ListFault { detail: WireValue },

    /// Any other remote fault, with the original payload.
    #[error("service fault {0}")]
    Service(Fault),

    /// Arguments or responses that do not fit the wire contract.
    #[error("validation error: {0}")]
    Validation(#[from] responsys_types::Error),

    /// The transport returned a result of the wrong shape.
    #[error("unexpected {method} response: expected {expected}, found {found}")]
    UnexpectedResponse {
        method: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl InteractError {
    /// Maps a remote fault to its local error kind by fault name.
    pub fn from_fault(fault: Fault) -> Self {
        match fault.name.as_str() {
            "TableFault" => Self::TableFault {
                detail: fault.detail,
            },
            "ListFault" => Self::ListFault {
                detail: fault.detail,
            },
            "API_LIMIT_EXCEEDED" => Self::ApiLimitExceeded {
                detail: fault.detail,
            },
            "AccountFault" => Self::Authentication {
                detail: fault.detail,
            },
            _ => Self::Service(fault),
        }
    }

    /// Whether a caller may retry the same request later.
    ///
    /// The client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::ApiLimitExceeded { .. })
    }

    /// True for errors the remote service raised.
    pub fn is_fault(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. }
                | Self::ApiLimitExceeded { .. }
                | Self::TableFault { .. }
                | Self::ListFault { .. }
                | Self::Service(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_display() {
        let fault = Fault::new("UnexpectedErrorFault", "boom");
        assert_eq!(fault.to_string(), r#"UnexpectedErrorFault: "boom""#);
    }

    #[test]
    fn test_retryable_errors() {
        assert!(InteractError::Connection("timed out".into()).is_retryable());
        assert!(
            InteractError::ApiLimitExceeded {
                detail: WireValue::Null
            }
            .is_retryable()
        );
        assert!(
            !InteractError::Authentication {
                detail: WireValue::Null
            }
            .is_retryable()
        );
        assert!(!InteractError::Service(Fault::new("X", WireValue::Null)).is_retryable());
    }

    #[test]
    fn test_connection_is_not_a_fault() {
        assert!(!InteractError::Connection("unreachable".into()).is_fault());
        assert!(
            InteractError::TableFault {
                detail: WireValue::Null
            }
            .is_fault()
        );
    }
}
