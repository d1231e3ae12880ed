use reqwest::StatusCode;

/// Every public operation fails in exactly one of two ways: the transport or
/// the response decoding broke locally (`Client`), or the server answered
/// with a status this SDK does not handle (`Http`).
#[derive(Debug)]
pub enum Error {
    /// Local fault: network unreachable, timeout, malformed response body.
    /// Always wraps the underlying cause.
    Client(anyhow::Error),
    /// The server rejected the request with a non-2xx status that has no
    /// special handling.
    Http(StatusCode),
}

pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Client(err) => write!(f, "client error: {}", err),
            Error::Http(status) => write!(f, "unexpected http status: {}", status),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Client(err) => Some(err.as_ref()),
            Error::Http(_) => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Client(err.into())
    }
}

impl Error {
    /// Status code of the rejected request, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Client(_) => None,
            Error::Http(status) => Some(*status),
        }
    }
}
