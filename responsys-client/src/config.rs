//! Client configuration.

use crate::error::{InteractError, InteractResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default session lifetime before the client logs in again (10 minutes).
pub const DEFAULT_SESSION_LIFETIME_SECS: i64 = 60 * 10;

/// Default transport timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Deployment the account lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pod {
    #[serde(rename = "2")]
    Ws2,
    #[serde(rename = "5")]
    Ws5,
    /// Triggered-message pod.
    #[serde(rename = "rtm4")]
    Rtm4,
    /// Triggered-message pod.
    #[serde(rename = "rtm4b")]
    Rtm4b,
}

impl Pod {
    pub const ALL: [Pod; 4] = [Pod::Ws2, Pod::Ws5, Pod::Rtm4, Pod::Rtm4b];

    /// The pod identifier as used in account settings.
    pub const fn id(&self) -> &'static str {
        match self {
            Self::Ws2 => "2",
            Self::Ws5 => "5",
            Self::Rtm4 => "rtm4",
            Self::Rtm4b => "rtm4b",
        }
    }

    /// Location of the service description.
    pub const fn wsdl(&self) -> &'static str {
        match self {
            Self::Ws2 => "https://ws2.responsys.net/webservices/wsdl/ResponsysWS_Level1.wsdl",
            Self::Ws5 => "https://ws5.responsys.net/webservices/wsdl/ResponsysWS_Level1.wsdl",
            Self::Rtm4 => "https://rtm4.responsys.net/tmws/services/TriggeredMessageWS?wsdl",
            Self::Rtm4b => "https://rtm4b.responsys.net/tmws/services/TriggeredMessageWS?wsdl",
        }
    }

    /// Service endpoint requests are posted to.
    pub const fn endpoint(&self) -> &'static str {
        match self {
            Self::Ws2 => "https://ws2.responsys.net/webservices/services/ResponsysWSService",
            Self::Ws5 => "https://ws5.responsys.net/webservices/services/ResponsysWSService",
            Self::Rtm4 => "http://rtm4.responsys.net:80/tmws/services/TriggeredMessageWS",
            Self::Rtm4b => "http://rtm4b.responsys.net:80/tmws/services/TriggeredMessageWS",
        }
    }
}

impl fmt::Display for Pod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Pod {
    type Err = InteractError;

    fn from_str(s: &str) -> InteractResult<Self> {
        Self::ALL
            .into_iter()
            .find(|pod| pod.id() == s)
            .ok_or_else(|| InteractError::Config(format!("unknown pod: {s}")))
    }
}

/// Account credentials and session settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct InteractConfig {
    pub username: String,
    pub password: String,
    pub pod: Pod,
    /// Seconds a session is reused before logging in again. Zero or a
    /// negative value makes every session count as expired; values past
    /// what a timestamp can hold mean the session never expires.
    #[serde(default = "default_session_lifetime")]
    pub session_lifetime_secs: i64,
    /// Timeout a transport should apply to each request.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_session_lifetime() -> i64 {
    DEFAULT_SESSION_LIFETIME_SECS
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl InteractConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>, pod: Pod) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            pod,
            session_lifetime_secs: DEFAULT_SESSION_LIFETIME_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn wsdl(&self) -> &'static str {
        self.pod.wsdl()
    }

    pub fn endpoint(&self) -> &'static str {
        self.pod.endpoint()
    }

    /// The session lifetime, saturated to the range `chrono` can represent.
    pub fn session_lifetime(&self) -> chrono::Duration {
        let secs = self.session_lifetime_secs;
        chrono::Duration::try_seconds(secs).unwrap_or(if secs < 0 {
            chrono::Duration::MIN
        } else {
            chrono::Duration::MAX
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for InteractConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("pod", &self.pod)
            .field("session_lifetime_secs", &self.session_lifetime_secs)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
