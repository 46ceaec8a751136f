use thiserror::Error;

/// Any failed call to moviecards-service.
///
/// `status` and `body` are only present when the service answered with an
/// HTTP error; transport failures (refused connection, timeout, undecodable
/// payload) leave them empty and carry the underlying cause as text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message} (url: {url})")]
pub struct ServiceClientError {
    pub message: String,
    pub url: String,
    pub status: Option<u16>,
    pub body: Option<String>,
    pub cause: Option<String>,
}

impl ServiceClientError {
    pub fn transport(message: impl Into<String>, url: &str, cause: impl std::fmt::Display) -> Self {
        Self {
            message: message.into(),
            url: url.to_string(),
            status: None,
            body: None,
            cause: Some(cause.to_string()),
        }
    }

    pub fn http(message: impl Into<String>, url: &str, status: u16, body: String) -> Self {
        Self {
            message: message.into(),
            url: url.to_string(),
            status: Some(status),
            body: Some(body),
            cause: None,
        }
    }

    /// The service answered, but with a 4xx/5xx status.
    pub fn is_http(&self) -> bool {
        self.status.is_some()
    }
}
