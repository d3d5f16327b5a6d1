pub mod errors;
pub mod session;
pub mod transport;
mod readings;
#[cfg(test)]
pub(crate) mod testing;

use std::thread;
use std::time::Duration;
use log::{debug, error, warn};
use serde_json::{Map, Value};
use crate::config::SemsParameters;
use crate::manager_sems::errors::SemsError;
use crate::manager_sems::session::{Credentials, Session};
use crate::manager_sems::transport::{Transport, UreqTransport};
use crate::models::sems_envelope::Envelope;

/// Number of attempts made for one logical call before giving up
const MAX_ATTEMPTS: u32 = 3;

/// Backoff after attempt i is BACKOFF_UNIT * i^3
const BACKOFF_UNIT: Duration = Duration::from_secs(1);

/// Client for the GoodWe SEMS cloud, one instance per power station
pub struct SemsClient<T: Transport = UreqTransport> {
    transport: T,
    session: Session,
    backoff_unit: Duration,
}

impl SemsClient {
    /// Returns a new client talking to the SEMS cloud over https
    ///
    /// # Arguments
    ///
    /// * 'config' - station id, account and password
    pub fn new(config: &SemsParameters) -> Self {
        SemsClient::with_transport(UreqTransport::new(), Credentials::from(config))
    }
}

impl<T: Transport> SemsClient<T> {
    /// Returns a new client using the given transport
    ///
    /// # Arguments
    ///
    /// * 'transport' - anything able to post a form to an url
    /// * 'credentials' - station id, account and password
    pub fn with_transport(transport: T, credentials: Credentials) -> Self {
        Self { transport, session: Session::new(credentials), backoff_unit: BACKOFF_UNIT }
    }

    /// Replaces the backoff unit, the sleep after attempt i is unit * i^3
    ///
    /// # Arguments
    ///
    /// * 'unit' - the new backoff unit
    pub fn with_backoff_unit(mut self, unit: Duration) -> Self {
        self.backoff_unit = unit;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn system_id(&self) -> &str {
        &self.session.credentials().system_id
    }

    /// Calls the given api path and returns the data part of the response.
    ///
    /// Never fails: if all attempts are used up an error is logged and an empty
    /// json object is returned. Use `try_call` to tell such a failure apart from
    /// an empty, but successful, response.
    ///
    /// # Arguments
    ///
    /// * 'path' - api path relative to the current api host
    /// * 'payload' - form fields to post
    pub fn call(&mut self, path: &str, payload: &[(&str, String)]) -> Value {
        self.try_call(path, payload).unwrap_or_else(|e| {
            error!("Failed to call GoodWe API: {}", e);
            Value::Object(Map::new())
        })
    }

    /// Calls the given api path with retries and re-authentication.
    ///
    /// Up to three attempts are made. A transport error is logged and retried, an envelope
    /// not reporting success triggers a new login before the next attempt. After each
    /// unsuccessful attempt i the thread sleeps backoff unit * i^3.
    ///
    /// # Arguments
    ///
    /// * 'path' - api path relative to the current api host
    /// * 'payload' - form fields to post
    pub fn try_call(&mut self, path: &str, payload: &[(&str, String)]) -> Result<Value, SemsError> {
        for attempt in 1..=MAX_ATTEMPTS {
            match self.attempt(path, payload) {
                Ok(Some(data)) => return Ok(data),
                Ok(None) => {
                    if let Err(e) = self.session.refresh(&self.transport) {
                        warn!("Login failed: {}", e);
                    }
                }
                Err(e) => warn!("{}", e),
            }

            thread::sleep(self.backoff_unit * attempt.pow(3));
        }

        Err(SemsError::Exhausted { path: path.to_string(), attempts: MAX_ATTEMPTS })
    }

    /// Makes one single request with the current session.
    /// Returns None if the envelope didn't report success with data.
    ///
    /// # Arguments
    ///
    /// * 'path' - api path relative to the current api host
    /// * 'payload' - form fields to post
    fn attempt(&self, path: &str, payload: &[(&str, String)]) -> Result<Option<Value>, SemsError> {
        let url = format!("{}{}", self.session.base_url(), path);

        let json = self.transport.post_form(&url, self.session.token(), payload)?;
        debug!("{}", json);

        let envelope: Envelope = serde_json::from_str(&json)?;

        Ok(envelope.into_success_data())
    }
}
