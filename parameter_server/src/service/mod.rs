mod builder;
mod router;
mod server;

pub use builder::ServerBuilder;
pub use router::router;
pub use server::{DEFAULT_MAX_PAYLOAD_BYTES, ParameterServer};
