use std::{
    error::Error,
    fmt::{self, Display},
    io,
};

/// The result type of the decoding functions.
pub type Result<T> = std::result::Result<T, CodecErr>;

/// Error returned while decoding a vector payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecErr {
    /// A declared count would require reading past the end of the buffer.
    Truncated { needed: usize, remaining: usize },
}

impl Display for CodecErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecErr::Truncated { needed, remaining } => write!(
                f,
                "truncated input: needed {needed} bytes but only {remaining} remain"
            ),
        }
    }
}

impl Error for CodecErr {}

/// Boundary conversion for binaries / I/O APIs.
impl From<CodecErr> for io::Error {
    fn from(value: CodecErr) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, value)
    }
}
