use std::{
    error::Error,
    fmt::{self, Display},
};

use comms::CodecErr;

/// The specific result type for the storage module.
pub type Result<T> = std::result::Result<T, ServerErr>;

/// Error returned when a write can't be applied to the canonical parameters.
///
/// In every case the parameters are left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerErr {
    /// The payload is not a valid vector encoding.
    Codec(CodecErr),
    /// The payload's shape doesn't match the canonical parameters.
    DimensionMismatch {
        what: String,
        got: usize,
        expected: usize,
    },
}

impl Display for ServerErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerErr::Codec(e) => write!(f, "invalid payload: {e}"),
            ServerErr::DimensionMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "incompatible vector dimensions for {what}: got {got}, expected {expected}"
            ),
        }
    }
}

impl Error for ServerErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ServerErr::Codec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CodecErr> for ServerErr {
    fn from(value: CodecErr) -> Self {
        Self::Codec(value)
    }
}
