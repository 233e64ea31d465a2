use bytes::Buf;

use crate::{CodecErr, LEN_TYPE_SIZE, Result, VALUE_SIZE};

/// Decodes a buffer produced by `encode_vectors`.
///
/// Every declared count is checked against the remaining bytes before any
/// allocation takes place, so corrupt or hostile payloads can't request more
/// memory than their own size justifies. Trailing bytes are ignored.
///
/// # Arguments
/// * `buf` - The encoded vectors.
///
/// # Returns
/// The decoded vectors or `CodecErr::Truncated` if the buffer ends early.
pub fn decode_vectors(mut buf: &[u8]) -> Result<Vec<Vec<f64>>> {
    let count = read_len(&mut buf)?;

    // Each vector needs at least its own length field.
    ensure_fits(count, LEN_TYPE_SIZE, buf.remaining())?;
    let mut vecs = Vec::with_capacity(count);

    for _ in 0..count {
        let len = read_len(&mut buf)?;
        ensure_fits(len, VALUE_SIZE, buf.remaining())?;

        let v: Vec<f64> = (0..len).map(|_| buf.get_f64()).collect();
        vecs.push(v);
    }

    Ok(vecs)
}

/// Reads a length field, failing if the buffer can't hold one.
fn read_len(buf: &mut &[u8]) -> Result<usize> {
    let remaining = buf.remaining();
    if remaining < LEN_TYPE_SIZE {
        return Err(CodecErr::Truncated {
            needed: LEN_TYPE_SIZE,
            remaining,
        });
    }

    let len = buf.get_u64();
    usize::try_from(len).map_err(|_| CodecErr::Truncated {
        needed: usize::MAX,
        remaining: buf.remaining(),
    })
}

/// Checks that `count` items of `item_size` bytes fit in `remaining` bytes.
fn ensure_fits(count: usize, item_size: usize, remaining: usize) -> Result<()> {
    match count.checked_mul(item_size) {
        Some(needed) if needed <= remaining => Ok(()),
        needed => Err(CodecErr::Truncated {
            needed: needed.unwrap_or(usize::MAX),
            remaining,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode_vectors;

    #[test]
    fn round_trip() {
        let vecs = vec![vec![1., -2.5, f64::MAX], vec![], vec![0.1]];
        assert_eq!(decode_vectors(&encode_vectors(&vecs)).unwrap(), vecs);
    }

    #[test]
    fn round_trip_empty_list() {
        let vecs: Vec<Vec<f64>> = Vec::new();
        assert_eq!(decode_vectors(&encode_vectors(&vecs)).unwrap(), vecs);
    }

    #[test]
    fn four_bytes_are_truncated() {
        let err = decode_vectors(&[0, 0, 0, 1]).unwrap_err();
        assert_eq!(
            err,
            CodecErr::Truncated {
                needed: 8,
                remaining: 4
            }
        );
    }

    #[test]
    fn every_strict_prefix_is_truncated() {
        let enc = encode_vectors(&[vec![1., 2.], vec![], vec![3.]]);

        for end in 0..enc.len() {
            let res = decode_vectors(&enc[..end]);
            assert!(
                matches!(res, Err(CodecErr::Truncated { .. })),
                "prefix of {end} bytes decoded as {res:?}"
            );
        }
    }

    #[test]
    fn huge_vector_count_is_rejected_before_allocating() {
        let buf = u64::MAX.to_be_bytes();
        assert!(matches!(
            decode_vectors(&buf),
            Err(CodecErr::Truncated { .. })
        ));
    }

    #[test]
    fn huge_element_count_is_rejected_before_allocating() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&1u64.to_be_bytes());
        buf.extend_from_slice(&(u64::MAX / 2).to_be_bytes());
        buf.extend_from_slice(&[0; 16]);

        assert!(matches!(
            decode_vectors(&buf),
            Err(CodecErr::Truncated { .. })
        ));
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut enc = encode_vectors(&[[7.]]);
        enc.extend_from_slice(&[0xff; 3]);
        assert_eq!(decode_vectors(&enc).unwrap(), vec![vec![7.]]);
    }
}
