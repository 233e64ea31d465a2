use bytes::BufMut;

use crate::{LEN_TYPE_SIZE, LenType, VALUE_SIZE};

/// Computes the size in bytes of the encoding of `vecs`.
///
/// # Arguments
/// * `vecs` - The vectors to be encoded.
///
/// # Returns
/// The exact amount of bytes `encode_into` will write.
pub fn encoded_len<V: AsRef<[f64]>>(vecs: &[V]) -> usize {
    vecs.iter()
        .fold(LEN_TYPE_SIZE, |acc, v| acc + LEN_TYPE_SIZE + v.as_ref().len() * VALUE_SIZE)
}

/// Writes the big endian encoding of `vecs` into `buf`.
///
/// The layout is a `u64` vector count followed, for every vector, by a `u64`
/// element count and the elements as `f64`s.
///
/// # Arguments
/// * `vecs` - The vectors to encode.
/// * `buf` - The destination buffer.
pub fn encode_into<V, B>(vecs: &[V], buf: &mut B)
where
    V: AsRef<[f64]>,
    B: BufMut,
{
    buf.put_u64(vecs.len() as LenType);

    for v in vecs {
        let v = v.as_ref();
        buf.put_u64(v.len() as LenType);
        v.iter().for_each(|&x| buf.put_f64(x));
    }
}

/// Encodes `vecs` into a freshly allocated buffer.
///
/// # Arguments
/// * `vecs` - The vectors to encode.
///
/// # Returns
/// The encoded bytes.
pub fn encode_vectors<V: AsRef<[f64]>>(vecs: &[V]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len(vecs));
    encode_into(vecs, &mut buf);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_is_only_the_count() {
        let vecs: [Vec<f64>; 0] = [];
        assert_eq!(encode_vectors(&vecs), 0u64.to_be_bytes());
    }

    #[test]
    fn layout_is_big_endian() {
        let enc = encode_vectors(&[[1.5]]);

        let mut expected = Vec::new();
        expected.extend_from_slice(&1u64.to_be_bytes());
        expected.extend_from_slice(&1u64.to_be_bytes());
        expected.extend_from_slice(&1.5f64.to_be_bytes());

        assert_eq!(enc, expected);
    }

    #[test]
    fn encoded_len_matches_output() {
        let vecs = vec![vec![1., 2., 3.], vec![], vec![4.]];
        assert_eq!(encoded_len(&vecs), encode_vectors(&vecs).len());
    }
}
