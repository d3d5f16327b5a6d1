use serde::Deserialize;
use serde_json::Value;

/// Wrapper around every SEMS response. The login response also carries
/// the api host to use for all subsequent calls.
///
/// Failure envelopes are not consistent about `msg`, it may be null or missing, so it is
/// kept as a raw json value and only compared against "success".
#[derive(Deserialize, Debug)]
pub struct Envelope {
    #[serde(default)]
    pub msg: Value,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub api: Option<String>,
}

impl Envelope {
    /// Returns the payload if, and only if, the envelope reports success and carries data
    pub fn into_success_data(self) -> Option<Value> {
        if self.msg == "success" {
            self.data
        } else {
            None
        }
    }
}
