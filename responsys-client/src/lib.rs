//! Session-managed client for the Responsys Interact SOAP API.
//!
//! The client sits on top of any [`Transport`] that can invoke a SOAP
//! method by name. It provides:
//! - **Session handling**: login on demand, reuse of a live session, renewal
//!   after expiry, and logout only when a session is expired or abandoned
//! - **Marshaling**: request arguments go through the wire adapter in
//!   `responsys-types`; raw results come back as typed projections
//! - **Fault translation**: remote faults map to [`InteractError`] kinds by
//!   fault name; connectivity failures stay distinct
//!
//! # Example
//!
//! ```
//! use responsys_client::{InteractClient, InteractConfig, MockTransport, Pod};
//! use responsys_types::{InteractObject, QueryColumn, WireStruct};
//!
//! let mut transport = MockTransport::new();
//! transport.respond(
//!     "deleteListMembers",
//!     WireStruct::new("DeleteResult").with("success", true).with("id", "42"),
//! );
//!
//! let config = InteractConfig::new("user", "secret", Pod::Ws5);
//! let mut client = InteractClient::new(config, transport);
//!
//! let list = InteractObject::new("folder", "list");
//! let results = client
//!     .session_scope()
//!     .unwrap()
//!     .delete_list_members(&list, QueryColumn::Riid, &["42"])
//!     .unwrap();
//! assert!(results[0].success);
//! ```

mod api;
mod client;
pub mod config;
mod error;
pub mod session;
pub mod transport;

pub use client::{InteractClient, SessionScope};
pub use config::{DEFAULT_SESSION_LIFETIME_SECS, DEFAULT_TIMEOUT_SECS, InteractConfig, Pod};
pub use error::{Fault, InteractError, InteractResult};
pub use session::{Session, SessionManager, SessionState};
pub use transport::mock::{Invocation, MockTransport};
pub use transport::{Transport, TransportError};
