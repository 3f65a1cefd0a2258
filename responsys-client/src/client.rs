//! Interact client: fault translation, connect/disconnect, scoped use.

use crate::config::InteractConfig;
use crate::error::{InteractError, InteractResult};
use crate::session::{Session, SessionManager};
use crate::transport::Transport;
use chrono::{DateTime, Utc};
use responsys_types::WireValue;
use std::ops::{Deref, DerefMut};
use tracing::{debug, error, info, warn};

/// Client for the Responsys Interact API over a caller-supplied transport.
///
/// One client owns one session. Calls are blocking and must not be issued
/// concurrently against the same client.
///
/// ```
/// use responsys_client::{InteractClient, InteractConfig, MockTransport, Pod};
///
/// let config = InteractConfig::new("user", "secret", Pod::Ws5);
/// let mut client = InteractClient::new(config, MockTransport::new());
/// client.with_session(|client| {
///     assert!(client.session().is_some());
///     Ok(())
/// }).unwrap();
/// ```
pub struct InteractClient<T: Transport> {
    config: InteractConfig,
    transport: T,
    sessions: SessionManager,
}

impl<T: Transport> InteractClient<T> {
    pub fn new(config: InteractConfig, transport: T) -> Self {
        let sessions = SessionManager::new(config.session_lifetime());
        Self {
            config,
            transport,
            sessions,
        }
    }

    pub fn config(&self) -> &InteractConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// WSDL location for the configured pod.
    pub fn wsdl(&self) -> &'static str {
        self.config.wsdl()
    }

    /// Service endpoint for the configured pod.
    pub fn endpoint(&self) -> &'static str {
        self.config.endpoint()
    }

    /// The current session, expired or not.
    pub fn session(&self) -> Option<&Session> {
        self.sessions.session()
    }

    pub fn session_lifetime(&self) -> chrono::Duration {
        self.sessions.lifetime()
    }

    /// Changes the session lifetime, including for the live session.
    pub fn set_session_lifetime(&mut self, lifetime: chrono::Duration) {
        self.config.session_lifetime_secs = lifetime.num_seconds();
        self.sessions.set_lifetime(lifetime);
    }

    /// Time of the last successful [`connect`](Self::connect), cleared by
    /// [`disconnect`](Self::disconnect).
    pub fn connected(&self) -> Option<DateTime<Utc>> {
        self.sessions.connected_at()
    }

    /// Installs an existing session token, e.g. one restored from storage.
    pub fn resume_session(&mut self, token: impl Into<String>) {
        self.sessions.install(&mut self.transport, token, Utc::now());
    }

    /// Invokes a service method and translates transport failures.
    pub fn call(&mut self, method: &str, args: Vec<WireValue>) -> InteractResult<WireValue> {
        debug!("Invoking Interact method {}", method);
        self.transport.invoke(method, args).map_err(|err| {
            let err = InteractError::from(err);
            match &err {
                InteractError::Connection(reason) => {
                    warn!("Request to {} failed to connect: {}", method, reason)
                }
                other => debug!("{} raised {}", method, other),
            }
            err
        })
    }

    /// Ensures an authenticated session and returns the connection time.
    ///
    /// A live session is reused without contacting the service. An expired
    /// one is logged out first so it does not count against the account's
    /// concurrent session limit. Rejected credentials are returned as
    /// [`InteractError::Authentication`] without retrying.
    pub fn connect(&mut self) -> InteractResult<DateTime<Utc>> {
        if self.sessions.has_expired_session(Utc::now()) {
            info!("Session expired, abandoning it before logging in again");
            // The service has usually dropped an expired session already;
            // disconnect has logged the failure and cleared local state.
            if let Err(err) = self.disconnect(true) {
                debug!("Ignoring logout failure for expired session: {}", err);
            }
        }

        if self.sessions.needs_login(Utc::now()) {
            let username = self.config.username.clone();
            let password = self.config.password.clone();
            let login = match self.login(&username, &password) {
                Ok(login) => login,
                Err(err @ InteractError::Authentication { .. }) => {
                    error!("Login failed, invalid username or password");
                    return Err(err);
                }
                Err(err) => return Err(err),
            };
            self.sessions.install(&mut self.transport, login.session_id, Utc::now());
            info!("Established Interact session on pod {}", self.config.pod);
        }

        let now = Utc::now();
        self.sessions.mark_connected(now);
        Ok(now)
    }

    /// Releases the connection.
    ///
    /// The session is logged out and cleared only when it has expired or
    /// `abandon` is set; otherwise it stays installed for the next
    /// [`connect`](Self::connect). Local state is cleared even when the
    /// logout call fails; that failure is still returned.
    pub fn disconnect(&mut self, abandon: bool) -> InteractResult<()> {
        self.sessions.mark_disconnected();

        let Some(session) = self.sessions.session() else {
            return Ok(());
        };
        if !abandon && !session.is_expired() {
            return Ok(());
        }

        let outcome = self.logout().map(|_| ());
        if let Err(err) = &outcome {
            warn!(
                "Logout call to Interact failed, session may not have been terminated: {}",
                err
            );
        }
        self.sessions.clear(&mut self.transport);
        outcome
    }

    /// Connects and returns a guard that disconnects when dropped.
    pub fn session_scope(&mut self) -> InteractResult<SessionScope<'_, T>> {
        self.connect()?;
        Ok(SessionScope {
            client: self,
            released: false,
        })
    }

    /// Runs `f` between a connect and a disconnect.
    ///
    /// The disconnect happens on every exit path, unwinding included; an
    /// error from `f` wins over an error from the disconnect.
    pub fn with_session<R>(
        &mut self,
        f: impl FnOnce(&mut Self) -> InteractResult<R>,
    ) -> InteractResult<R> {
        let mut scope = self.session_scope()?;
        let result = f(&mut *scope);
        let released = scope.release();
        let value = result?;
        released?;
        Ok(value)
    }

    /// Connects if there is no live session.
    pub(crate) fn ensure_session(&mut self) -> InteractResult<()> {
        if self.sessions.needs_login(Utc::now()) {
            self.connect()?;
        }
        Ok(())
    }
}

/// A connected client that disconnects (without abandoning) on drop.
pub struct SessionScope<'a, T: Transport> {
    client: &'a mut InteractClient<T>,
    released: bool,
}

impl<T: Transport> SessionScope<'_, T> {
    /// Disconnects now and reports the outcome instead of logging it.
    pub fn release(mut self) -> InteractResult<()> {
        self.released = true;
        self.client.disconnect(false)
    }
}

impl<T: Transport> Deref for SessionScope<'_, T> {
    type Target = InteractClient<T>;

    fn deref(&self) -> &Self::Target {
        self.client
    }
}

impl<T: Transport> DerefMut for SessionScope<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.client
    }
}

impl<T: Transport> Drop for SessionScope<'_, T> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(err) = self.client.disconnect(false) {
            warn!("Disconnect on scope exit failed: {}", err);
        }
    }
}
