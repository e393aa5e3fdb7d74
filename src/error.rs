use http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;
pub type EncodingResult<T> = std::result::Result<T, EncodingError>;
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("percent-encoding failed : {0}")]
    Encoding(#[from] EncodingError),
    #[error("OAuth protocol failure : {0}")]
    Protocol(#[from] ProtocolError),
    #[error("invalid authorization state : {0}")]
    State(#[from] StateError),
    #[error("callback rejected : {0}")]
    Security(#[from] SecurityError),
}

impl Error {
    /// Returns `true` when the error indicates a forged or stale callback
    /// rather than a transient failure.
    pub fn is_security_incident(&self) -> bool {
        matches!(self, Error::Security(_))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("decoded bytes of {0:?} are not valid UTF-8")]
    InvalidUtf8(String),
}

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("transport failed : {0}")]
    Transport(#[source] BoxError),
    #[error("provider answered {status} : {body}")]
    Status { status: StatusCode, body: String },
    #[error("response is not form-encoded : {0}")]
    Malformed(#[from] serde_urlencoded::de::Error),
    #[error("response has malformed format: not found {0} in {1}")]
    TokenKeyNotFound(&'static str, String),
    #[error("callback does not carry {0}")]
    MissingCallbackParameter(&'static str),
    #[error("invalid url {0} : {1}")]
    InvalidUrl(String, url::ParseError),
    #[error("could not build request : {0}")]
    Request(#[from] http::Error),
}

impl ProtocolError {
    pub(crate) fn transport<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ProtocolError::Transport(Box::new(err))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StateError {
    #[error("no request token has been obtained yet")]
    NoRequestToken,
    #[error("request token was already obtained")]
    RequestTokenPending,
    #[error("access token was already obtained")]
    AlreadyAuthorized,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecurityError {
    #[error("callback token {returned} does not match the pending request token")]
    TokenMismatch { returned: String },
}
