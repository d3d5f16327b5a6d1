use std::cell::RefCell;
use std::collections::VecDeque;
use crate::manager_sems::errors::SemsError;
use crate::manager_sems::transport::Transport;

pub const LOGIN_URL: &str = "https://globalapi.sems.com.cn/api/v1/Common/CrossLogin";

#[derive(Clone, Debug)]
pub struct Call {
    pub url: String,
    pub token: String,
    pub form: Vec<(String, String)>,
}

/// Transport replaying a fixed list of outcomes, one per request, and recording every request
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<String, SemsError>>>,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<Result<String, SemsError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn login_count(&self) -> usize {
        self.calls.borrow().iter().filter(|c| c.url == LOGIN_URL).count()
    }

    pub fn data_count(&self) -> usize {
        self.calls.borrow().iter().filter(|c| c.url != LOGIN_URL).count()
    }
}

impl Transport for ScriptedTransport {
    fn post_form(&self, url: &str, token: &str, form: &[(&str, String)]) -> Result<String, SemsError> {
        self.calls.borrow_mut().push(Call {
            url: url.to_string(),
            token: token.to_string(),
            form: form.iter().map(|(k, v)| (k.to_string(), v.clone())).collect(),
        });

        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(SemsError::Transport("script exhausted".to_string())))
    }
}

pub fn login_ok(api: &str) -> String {
    format!(
        r#"{{"msg":"success","api":"{}","data":{{"uid":"u-1","timestamp":1729000000000,"token":"abc","client":"ios","version":"v2.0.4","language":"en"}}}}"#,
        api
    )
}

pub fn success(data: &str) -> String {
    format!(r#"{{"msg":"success","data":{}}}"#, data)
}

pub fn expired() -> String {
    r#"{"msg":"The authorization has expired, please log in again.","data":null}"#.to_string()
}
