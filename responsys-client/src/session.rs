//! Session lifecycle.
//!
//! The service caps concurrent sessions per account, so a session is
//! reused until it expires instead of logging in for every connect. The
//! manager holds at most one session; installing or clearing it arms or
//! disarms the transport's session header in the same step.

use crate::transport::Transport;
use chrono::{DateTime, Duration, Utc};

/// An authenticated session token and its validity window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    issued_at: DateTime<Utc>,
    lifetime: Duration,
}

impl Session {
    pub fn new(token: impl Into<String>, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        Self {
            token: token.into(),
            issued_at,
            lifetime,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// `None` when the expiry falls outside the representable time range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.issued_at.checked_add_signed(self.lifetime)
    }

    /// An expiry past the end of time never arrives; one before the start
    /// of time has already passed.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at() {
            Some(expires_at) => now >= expires_at,
            None => self.lifetime < Duration::zero(),
        }
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Where the client stands with the service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(Session),
}

/// Owns the client's single session and its connected marker.
#[derive(Debug)]
pub struct SessionManager {
    lifetime: Duration,
    state: SessionState,
    connected_at: Option<DateTime<Utc>>,
}

impl SessionManager {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            state: SessionState::Unauthenticated,
            connected_at: None,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            SessionState::Authenticated(session) => Some(session),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Changes the lifetime for new sessions and for the live one.
    pub fn set_lifetime(&mut self, lifetime: Duration) {
        self.lifetime = lifetime;
        if let SessionState::Authenticated(session) = &mut self.state {
            session.lifetime = lifetime;
        }
    }

    /// True when there is no session or the current one has expired.
    pub fn needs_login(&self, now: DateTime<Utc>) -> bool {
        self.session().is_none_or(|session| session.is_expired_at(now))
    }

    /// True when a live session exists and has expired.
    pub fn has_expired_session(&self, now: DateTime<Utc>) -> bool {
        self.session().is_some_and(|session| session.is_expired_at(now))
    }

    /// Stores a new session and attaches its header to the transport.
    pub fn install<T: Transport + ?Sized>(
        &mut self,
        transport: &mut T,
        token: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        let session = Session::new(token, now, self.lifetime);
        let header = transport
            .create("SessionHeader")
            .with("sessionId", session.token());
        transport.set_session_header(Some(header));
        self.state = SessionState::Authenticated(session);
    }

    /// Drops the session and detaches the header from the transport.
    pub fn clear<T: Transport + ?Sized>(&mut self, transport: &mut T) -> Option<Session> {
        transport.set_session_header(None);
        match std::mem::take(&mut self.state) {
            SessionState::Authenticated(session) => Some(session),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn connected_at(&self) -> Option<DateTime<Utc>> {
        self.connected_at
    }

    pub fn mark_connected(&mut self, at: DateTime<Utc>) {
        self.connected_at = Some(at);
    }

    pub fn mark_disconnected(&mut self) {
        self.connected_at = None;
    }
}
