//! Transport layer abstraction.
//!
//! The SOAP codec (WSDL handling, envelopes, HTTP) lives outside this
//! crate. The client only needs a way to invoke a service method by name,
//! a factory for empty wire structures, and a slot for the outgoing
//! session header.

use crate::error::{Fault, InteractError};
use responsys_types::{StructFactory, WireStruct, WireValue};

/// Failure reported by a transport.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The service answered with a declared fault.
    Fault(Fault),
    /// The service could not be reached (timeout, DNS, TLS, refused).
    Connection(String),
}

impl From<TransportError> for InteractError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Fault(fault) => InteractError::from_fault(fault),
            TransportError::Connection(reason) => InteractError::Connection(reason),
        }
    }
}

/// A SOAP transport bound to one service endpoint.
pub trait Transport: StructFactory {
    /// Invokes `method` with positional arguments and returns the raw result.
    fn invoke(&mut self, method: &str, args: Vec<WireValue>) -> Result<WireValue, TransportError>;

    /// Sets or clears the `SessionHeader` attached to later invocations.
    fn set_session_header(&mut self, header: Option<WireStruct>);
}

/// A scripted transport for testing.
pub mod mock {
    use super::*;
    use std::collections::{HashMap, VecDeque};

    /// One recorded invocation.
    #[derive(Debug, Clone, PartialEq)]
    pub struct Invocation {
        pub method: String,
        pub args: Vec<WireValue>,
    }

    /// A transport that replays queued results per method.
    ///
    /// Without a queued result, `login` answers with a fresh
    /// `LoginResult` (`mock-session-1`, `mock-session-2`, ...), `logout`
    /// answers `true`, and every other method answers `Null`.
    #[derive(Debug, Default)]
    pub struct MockTransport {
        queued: HashMap<String, VecDeque<Result<WireValue, TransportError>>>,
        calls: Vec<Invocation>,
        session_header: Option<WireStruct>,
        header_changes: Vec<Option<WireStruct>>,
        logins: usize,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Queues a successful result for the next call to `method`.
        pub fn respond(&mut self, method: &str, result: impl Into<WireValue>) -> &mut Self {
            self.enqueue(method, Ok(result.into()))
        }

        /// Queues a fault for the next call to `method`.
        pub fn fault(&mut self, method: &str, fault: Fault) -> &mut Self {
            self.enqueue(method, Err(TransportError::Fault(fault)))
        }

        /// Queues a connectivity failure for the next call to `method`.
        pub fn unreachable(&mut self, method: &str, reason: &str) -> &mut Self {
            self.enqueue(method, Err(TransportError::Connection(reason.to_string())))
        }

        fn enqueue(
            &mut self,
            method: &str,
            result: Result<WireValue, TransportError>,
        ) -> &mut Self {
            self.queued
                .entry(method.to_string())
                .or_default()
                .push_back(result);
            self
        }

        /// All invocations in call order.
        pub fn calls(&self) -> &[Invocation] {
            &self.calls
        }

        pub fn call_count(&self, method: &str) -> usize {
            self.calls.iter().filter(|c| c.method == method).count()
        }

        /// Arguments of the most recent call to `method`.
        pub fn last_args(&self, method: &str) -> Option<&[WireValue]> {
            self.calls
                .iter()
                .rev()
                .find(|c| c.method == method)
                .map(|c| c.args.as_slice())
        }

        /// The header currently attached to outgoing calls.
        pub fn session_header(&self) -> Option<&WireStruct> {
            self.session_header.as_ref()
        }

        /// Every header assignment, oldest first.
        pub fn header_changes(&self) -> &[Option<WireStruct>] {
            &self.header_changes
        }

        fn default_result(&mut self, method: &str) -> WireValue {
            match method {
                "login" => {
                    self.logins += 1;
                    WireStruct::new("LoginResult")
                        .with("sessionId", format!("mock-session-{}", self.logins))
                        .into()
                }
                "logout" => WireValue::Bool(true),
                _ => WireValue::Null,
            }
        }
    }

    impl StructFactory for MockTransport {
        fn create(&self, type_name: &str) -> WireStruct {
            WireStruct::new(type_name)
        }
    }

    impl Transport for MockTransport {
        fn invoke(
            &mut self,
            method: &str,
            args: Vec<WireValue>,
        ) -> Result<WireValue, TransportError> {
            self.calls.push(Invocation {
                method: method.to_string(),
                args,
            });
            match self.queued.get_mut(method).and_then(VecDeque::pop_front) {
                Some(result) => result,
                None => Ok(self.default_result(method)),
            }
        }

        fn set_session_header(&mut self, header: Option<WireStruct>) {
            self.header_changes.push(header.clone());
            self.session_header = header;
        }
    }
}
