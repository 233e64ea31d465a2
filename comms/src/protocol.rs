//! The HTTP resource layout spoken between workers and the parameter server.

/// Path of the `GET` endpoint returning the canonical parameters.
pub const READ_PARAMS_PATH: &str = "/read_params";

/// Path of the `POST` endpoint receiving gradients.
pub const WRITE_PARAMS_PATH: &str = "/write_params";

/// Body of a successful write response.
pub const WRITE_SUCCESS: &str = "success";

/// Content type of encoded vector payloads.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Content type of textual responses.
pub const TEXT_PLAIN: &str = "text/plain";
