use std::{env, io, path::PathBuf};

use crate::service::DEFAULT_MAX_PAYLOAD_BYTES;

const DEFAULT_HOST: &str = "127.0.0.1";

/// Runtime settings of the parameter server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: String,
    pub spec_path: PathBuf,
    pub max_payload_bytes: usize,
}

impl ServerConfig {
    /// Reads the configuration from the environment.
    ///
    /// `HOST` defaults to `127.0.0.1`, `PORT` and `SPEC` are required and
    /// `MAX_PAYLOAD_BYTES` falls back to the default body limit.
    ///
    /// # Returns
    /// The configuration or an io error if a variable is missing or invalid.
    pub fn from_env() -> io::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Arguments
    /// * `lookup` - Returns the value of a variable, if set.
    ///
    /// # Returns
    /// The configuration or an io error if a variable is missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> io::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = required(&lookup, "PORT")?;
        let spec_path = required(&lookup, "SPEC")?.into();

        let max_payload_bytes = match lookup("MAX_PAYLOAD_BYTES") {
            Some(raw) => raw.parse().map_err(|e| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("invalid MAX_PAYLOAD_BYTES {raw:?}: {e}"),
                )
            })?,
            None => DEFAULT_MAX_PAYLOAD_BYTES,
        };

        Ok(Self {
            addr: format!("{host}:{port}"),
            spec_path,
            max_payload_bytes,
        })
    }
}

fn required<F>(lookup: &F, key: &str) -> io::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("missing environment variable {key}"),
        )
    })
}
