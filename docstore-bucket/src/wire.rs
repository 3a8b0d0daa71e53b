//! Fixed-width wire form of a bucket id.
//!
//! A bucket id travels as its raw `u64` in native byte order, 8 bytes, with
//! no framing. It is embedded as a plain field in replicated bucket records
//! and inter-node messages, so the enclosing record owns versioning.
//!
//! Decoding validates the word (precision range and canonical form); a
//! corrupted field is rejected rather than routed.

use crate::bucket_id::BucketId;
use crate::error::{Error, Result};

/// Encoded size of a bucket id, in bytes.
pub const WIRE_SIZE: usize = std::mem::size_of::<u64>();

/// Encode as 8 native-order bytes.
#[inline]
pub fn encode(id: BucketId) -> [u8; WIRE_SIZE] {
    id.raw().to_ne_bytes()
}

/// Decode from 8 native-order bytes.
#[inline]
pub fn decode(bytes: [u8; WIRE_SIZE]) -> Result<BucketId> {
    BucketId::from_raw(u64::from_ne_bytes(bytes))
}

/// Append the encoded id to `buf`.
#[inline]
pub fn write_to(id: BucketId, buf: &mut Vec<u8>) {
    buf.extend_from_slice(&encode(id));
}

/// Read an id at `*pos`, advancing `pos` past it.
pub fn read_from(data: &[u8], pos: &mut usize) -> Result<BucketId> {
    let have = data.len().saturating_sub(*pos);
    if have < WIRE_SIZE {
        tracing::debug!(pos = *pos, have, "truncated bucket id field");
        return Err(Error::truncated(WIRE_SIZE, have));
    }
    let mut bytes = [0u8; WIRE_SIZE];
    bytes.copy_from_slice(&data[*pos..*pos + WIRE_SIZE]);
    let id = decode(bytes)?;
    *pos += WIRE_SIZE;
    Ok(id)
}
