use reqwest::StatusCode;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// A non-2xx reply from `api.php`.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    /// Value of the `x-request-id` response header, when the wiki sends one.
    pub request_id: Option<String>,
    pub message: Option<String>,
    pub body: Option<Value>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status.as_u16())?;
        if let Some(msg) = &self.message {
            write!(f, ": {msg}")?;
        }
        if let Some(id) = &self.request_id {
            write!(f, " (request {id})")?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum HttpApiError {
    #[error("bad request: {0}")]
    BadRequest(ApiError),
    #[error("forbidden: {0}")]
    Forbidden(ApiError),
    #[error("not found: {0}")]
    NotFound(ApiError),
    #[error("too many requests: {0}")]
    TooManyRequests(ApiError),
    #[error("server error: {0}")]
    InternalServer(ApiError),
    #[error("unexpected status: {0}")]
    Other(ApiError),
}

impl From<ApiError> for HttpApiError {
    fn from(err: ApiError) -> Self {
        match err.status.as_u16() {
            400 => Self::BadRequest(err),
            403 => Self::Forbidden(err),
            404 => Self::NotFound(err),
            429 => Self::TooManyRequests(err),
            s if s >= 500 => Self::InternalServer(err),
            _ => Self::Other(err),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("\"{0}\" does not match any pages")]
    PageNotFound(String),

    #[error("\"{title}\" is a disambiguation page ({url})")]
    Disambiguation { title: String, url: String },

    #[error("\"{title}\" resulted in a redirect; set redirect to follow it")]
    Redirect { title: String },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("MediaWiki API error {code}: {info}")]
    Api { code: String, info: String },

    #[error(transparent)]
    Http(#[from] HttpApiError),

    #[error("request timed out")]
    Timeout,

    #[error(transparent)]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Url(#[from] url::ParseError),

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}
