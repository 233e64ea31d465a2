use std::{error::Error, fmt, io};

use comms::CodecErr;
use ml_core::MlError;
use reqwest::StatusCode;

/// The parameter client's result type.
pub type Result<T> = std::result::Result<T, ClientErr>;

/// Failures of a single round trip against the parameter server.
#[derive(Debug)]
pub enum ClientErr {
    /// The base URL can't be parsed or can't carry path segments.
    InvalidUrl(String),
    /// The request never got a response.
    Transport(reqwest::Error),
    /// The response body isn't a valid vector encoding.
    Codec(CodecErr),
    /// The server's vectors don't match the local variables.
    IncompatibleDimensions {
        what: String,
        got: usize,
        expected: usize,
    },
    /// The gradient has no entry for one of the listed variables.
    MissingGradient { name: String },
    /// The server answered with a non success status.
    RemoteRejected { status: StatusCode, message: String },
}

impl fmt::Display for ClientErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientErr::InvalidUrl(url) => write!(f, "invalid base url: {url}"),
            ClientErr::Transport(e) => write!(f, "transport error: {e}"),
            ClientErr::Codec(e) => write!(f, "malformed response: {e}"),
            ClientErr::IncompatibleDimensions {
                what,
                got,
                expected,
            } => write!(
                f,
                "incompatible vector dimensions for {what}: got {got}, expected {expected}"
            ),
            ClientErr::MissingGradient { name } => {
                write!(f, "missing gradient for variable {name}")
            }
            ClientErr::RemoteRejected { status, message } => {
                write!(f, "server rejected the request ({status}): {message}")
            }
        }
    }
}

impl Error for ClientErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ClientErr::Transport(e) => Some(e),
            ClientErr::Codec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientErr {
    fn from(value: reqwest::Error) -> Self {
        Self::Transport(value)
    }
}

impl From<CodecErr> for ClientErr {
    fn from(value: CodecErr) -> Self {
        Self::Codec(value)
    }
}

impl From<MlError> for ClientErr {
    fn from(value: MlError) -> Self {
        match value {
            MlError::ShapeMismatch {
                what,
                got,
                expected,
            } => Self::IncompatibleDimensions {
                what,
                got,
                expected,
            },
        }
    }
}

/// Boundary conversion for binaries / I/O APIs.
impl From<ClientErr> for io::Error {
    fn from(value: ClientErr) -> Self {
        match value {
            ClientErr::InvalidUrl(_) => io::Error::new(io::ErrorKind::InvalidInput, value),
            other => io::Error::other(other),
        }
    }
}
