//! Wire-level pieces shared by the parameter server and its workers: the
//! vector codec, the HTTP resource layout and the serializable specs used to
//! configure a server.

mod deserialize;
mod error;
pub mod protocol;
mod serialize;
pub mod specs;

pub use deserialize::decode_vectors;
pub use error::{CodecErr, Result};
pub use serialize::{encode_into, encode_vectors, encoded_len};

type LenType = u64;
const LEN_TYPE_SIZE: usize = size_of::<LenType>();
const VALUE_SIZE: usize = size_of::<f64>();
