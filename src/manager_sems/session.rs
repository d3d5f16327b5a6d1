use crate::config::SemsParameters;
use crate::manager_sems::errors::SemsError;
use crate::manager_sems::transport::Transport;
use crate::models::sems_envelope::Envelope;

/// Host used for login and as the api host until the first successful login
pub const GLOBAL_URL: &str = "https://globalapi.sems.com.cn/api/";

const LOGIN_PATH: &str = "v1/Common/CrossLogin";

/// Token presented before any login has been made
const BOOTSTRAP_TOKEN: &str = r#"{"version":"v2.0.4","client":"ios","language":"en"}"#;

#[derive(Clone, Debug)]
pub struct Credentials {
    pub system_id: String,
    pub account: String,
    pub password: String,
}

impl From<&SemsParameters> for Credentials {
    fn from(p: &SemsParameters) -> Self {
        Credentials {
            system_id: p.system_id.to_string(),
            account: p.account.to_string(),
            password: p.password.to_string(),
        }
    }
}

/// Outcome of a successful login
#[derive(Debug, PartialEq)]
pub struct SessionUpdate {
    pub base_url: String,
    pub token: String,
}

/// Authentication context for one power station.
///
/// The session is only ever mutated through `refresh`, which takes `&mut self`. A client
/// polling several stations in parallel must therefore hold one session per station.
pub struct Session {
    base_url: String,
    token: String,
    credentials: Credentials,
}

impl Session {
    /// Returns a session pointing at the global host with the bootstrap token
    ///
    /// # Arguments
    ///
    /// * 'credentials' - station id and account used for logging in
    pub fn new(credentials: Credentials) -> Session {
        Session {
            base_url: GLOBAL_URL.to_string(),
            token: BOOTSTRAP_TOKEN.to_string(),
            credentials,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Logs in again with the stored credentials and swaps in the new api host and token.
    /// On any failure the session is left exactly as it was.
    ///
    /// # Arguments
    ///
    /// * 'transport' - the transport to send the login request with
    pub fn refresh(&mut self, transport: &impl Transport) -> Result<(), SemsError> {
        let update = login(transport, &self.token, &self.credentials)?;
        self.base_url = update.base_url;
        self.token = update.token;

        Ok(())
    }
}

/// Issues a cross login towards the global host.
///
/// # Arguments
///
/// * 'transport' - the transport to send the login request with
/// * 'token' - the token currently held, sent along as the Token header
/// * 'credentials' - account and password to log in with
pub fn login(transport: &impl Transport, token: &str, credentials: &Credentials) -> Result<SessionUpdate, SemsError> {
    let url = format!("{}{}", GLOBAL_URL, LOGIN_PATH);
    let form = [
        ("account", credentials.account.clone()),
        ("pwd", credentials.password.clone()),
    ];

    let json = transport.post_form(&url, token, &form)?;
    let envelope: Envelope = serde_json::from_str(&json)?;

    let base_url = envelope.api
        .ok_or_else(|| SemsError::Rejected(format!("login without api host, msg: {}", envelope.msg)))?;
    let data = envelope.data
        .ok_or_else(|| SemsError::Rejected(format!("login without token, msg: {}", envelope.msg)))?;

    Ok(SessionUpdate { base_url, token: serde_json::to_string(&data)? })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager_sems::testing::{ScriptedTransport, login_ok};

    fn credentials() -> Credentials {
        Credentials {
            system_id: "station-1".to_string(),
            account: "me@example.com".to_string(),
            password: "secret".to_string(),
        }
    }

    #[test]
    fn test_new_session_uses_bootstrap() {
        let session = Session::new(credentials());
        assert_eq!(session.base_url(), GLOBAL_URL);
        assert_eq!(session.token(), BOOTSTRAP_TOKEN);
    }

    #[test]
    fn test_refresh_swaps_host_and_token() {
        let transport = ScriptedTransport::new(vec![Ok(login_ok("https://eu.semsportal.com/api/"))]);
        let mut session = Session::new(credentials());

        session.refresh(&transport).unwrap();

        assert_eq!(session.base_url(), "https://eu.semsportal.com/api/");
        let token: serde_json::Value = serde_json::from_str(session.token()).unwrap();
        assert_eq!(token["token"], "abc");

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, "https://globalapi.sems.com.cn/api/v1/Common/CrossLogin");
        assert_eq!(calls[0].token, BOOTSTRAP_TOKEN);
        assert!(calls[0].form.contains(&("account".to_string(), "me@example.com".to_string())));
        assert!(calls[0].form.contains(&("pwd".to_string(), "secret".to_string())));
    }

    #[test]
    fn test_refresh_failure_keeps_state() {
        let transport = ScriptedTransport::new(vec![
            Err(SemsError::Transport("connection refused".to_string())),
            Ok(r#"{"msg":"Email or password error.","data":null}"#.to_string()),
        ]);
        let mut session = Session::new(credentials());

        assert!(matches!(session.refresh(&transport), Err(SemsError::Transport(_))));
        assert!(matches!(session.refresh(&transport), Err(SemsError::Rejected(_))));
        assert_eq!(session.base_url(), GLOBAL_URL);
        assert_eq!(session.token(), BOOTSTRAP_TOKEN);
    }
}
