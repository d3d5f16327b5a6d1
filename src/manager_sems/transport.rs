use std::time::Duration;
use ureq::Agent;
use crate::manager_sems::errors::SemsError;

/// The SEMS cloud only answers clients that present themselves as the PV Master app
const USER_AGENT: &str = "PVMaster/2.0.4 (iPhone; iOS 11.4.1; Scale/2.00)";

/// Timeout for one single http attempt
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A single form encoded POST towards the SEMS cloud
pub trait Transport {
    /// Posts the form to the given url and returns the raw response body.
    /// Connection errors, timeouts and non-success http statuses are all reported as errors.
    ///
    /// # Arguments
    ///
    /// * 'url' - full url including the api path
    /// * 'token' - session token, sent as is in the Token header
    /// * 'form' - key/value pairs to send form encoded
    fn post_form(&self, url: &str, token: &str, form: &[(&str, String)]) -> Result<String, SemsError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post_form(&self, url: &str, token: &str, form: &[(&str, String)]) -> Result<String, SemsError> {
        (**self).post_form(url, token, form)
    }
}

/// Blocking transport on top of a ureq agent
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build();

        let agent = agent_config.into();

        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn post_form(&self, url: &str, token: &str, form: &[(&str, String)]) -> Result<String, SemsError> {
        let json = self.agent
            .post(url)
            .header("User-Agent", USER_AGENT)
            .header("Token", token)
            .send_form(form.iter().map(|(k, v)| (*k, v.as_str())))?
            .body_mut()
            .read_to_string()?;

        Ok(json)
    }
}
