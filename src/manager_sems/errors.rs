use thiserror::Error;

#[derive(Error, Debug)]
pub enum SemsError {
    #[error("SemsError::Transport: {0}")]
    Transport(String),
    #[error("SemsError::Document: {0}")]
    Document(String),
    #[error("SemsError::Rejected: {0}")]
    Rejected(String),
    #[error("SemsError::Exhausted: gave up on {path} after {attempts} attempts")]
    Exhausted { path: String, attempts: u32 },
}
impl From<serde_json::Error> for SemsError {
    fn from(e: serde_json::Error) -> SemsError {
        SemsError::Document(format!("json document error: {}", e))
    }
}
impl From<ureq::Error> for SemsError {
    fn from(e: ureq::Error) -> SemsError {
        SemsError::Transport(format!("http request error: {}", e))
    }
}
impl From<&str> for SemsError {
    fn from(e: &str) -> SemsError { SemsError::Document(e.to_string()) }
}
