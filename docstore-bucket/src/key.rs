//! Bit-reversal mapping between location keys and bucket ids.
//!
//! A location key is a document's 64-bit location hash with the desired
//! precision embedded in its top [`COUNT_BITS`] bits:
//!
//! ```text
//! key:        [ used_bits (6) | location hash bits 57..0 ]
//! bucket id:  [ reverse(hash bits) ........ | used_bits (6) ]
//! ```
//!
//! Reversing the key puts hash bit 0 at the top of the location field, hash
//! bit 1 below it, and so on. Split `n` (going from depth `n` to `n + 1`)
//! therefore always examines hash bit `n`, no matter how deep the corpus has
//! already been split. Every node derives the same split tree from the hash
//! alone.

use crate::bucket_id::BucketId;
use crate::error::{Error, Result};
use crate::mask::{self, COUNT_BITS, COUNT_MASK, MAX_USED_BITS};

/// Bits of a key reserved for the embedded precision.
const KEY_COUNT_MASK: u64 = COUNT_MASK << MAX_USED_BITS;

/// Reverse the bit order of a 64-bit word.
///
/// Swaps adjacent bits, then bit pairs, then nibbles, and finishes with a
/// byte swap. `reverse(reverse(x)) == x`.
#[inline]
pub fn reverse(x: u64) -> u64 {
    let x = ((x & 0x5555_5555_5555_5555) << 1) | ((x & 0xAAAA_AAAA_AAAA_AAAA) >> 1);
    let x = ((x & 0x3333_3333_3333_3333) << 2) | ((x & 0xCCCC_CCCC_CCCC_CCCC) >> 2);
    let x = ((x & 0x0F0F_0F0F_0F0F_0F0F) << 4) | ((x & 0xF0F0_F0F0_F0F0_F0F0) >> 4);
    x.swap_bytes()
}

/// Map a location key to its canonical bucket id.
///
/// The precision is read from the top [`COUNT_BITS`] bits of `key`. Fails if
/// that precision exceeds [`MAX_USED_BITS`].
#[inline]
pub fn key_to_bucket_id(key: u64) -> Result<BucketId> {
    let used_bits = (key >> MAX_USED_BITS) as u32;
    if used_bits > MAX_USED_BITS {
        tracing::debug!(key = %format_args!("0x{key:016x}"), used_bits, "location key precision out of range");
        return Err(Error::invalid_used_bits(used_bits, MAX_USED_BITS));
    }
    let reversed = reverse(key);
    let raw = (reversed & !COUNT_MASK) | used_bits as u64;
    Ok(BucketId::from_canonical(mask::tables().strip(raw, used_bits)))
}

/// Map a bucket id back to a location key.
///
/// Inverse of [`key_to_bucket_id`]: location bits beyond the id's precision
/// come back as zero hash bits.
#[inline]
pub fn bucket_id_to_key(id: BucketId) -> u64 {
    reverse(id.raw() & !COUNT_MASK) | ((id.used_bits() as u64) << MAX_USED_BITS)
}

/// Embed `used_bits` into the top bits of a raw location hash.
///
/// The hash bits displaced by the precision field sit past the deepest
/// possible split, so no bucket ever examines them.
pub fn location_key(location_hash: u64, used_bits: u32) -> Result<u64> {
    if used_bits > MAX_USED_BITS {
        tracing::debug!(used_bits, max = MAX_USED_BITS, "rejected location key precision");
        return Err(Error::invalid_used_bits(used_bits, MAX_USED_BITS));
    }
    Ok((location_hash & !KEY_COUNT_MASK) | ((used_bits as u64) << (u64::BITS - COUNT_BITS)))
}
