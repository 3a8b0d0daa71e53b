//! Hierarchical 64-bit bucket identifier.
//!
//! A `BucketId` names a subset of the document key space: all documents whose
//! reversed location hash starts with the id's `used_bits` location bits.
//!
//! ```text
//! bits 63..6   location (left-aligned, bits past used_bits are zero)
//! bits  5..0   used_bits
//! ```
//!
//! ## Lineage
//!
//! Splitting a bucket adds one location bit, so a depth-`d` bucket has exactly
//! two depth-`d + 1` children (next bit 0 or 1) and exactly one parent. All of
//! these are pure arithmetic on the raw word; no registry is consulted.
//!
//! ## Ordering
//!
//! Equality, ordering and hashing use the raw word. Because the count field
//! is in the low bits, a bucket sorts immediately before all of its
//! descendants, and sibling subtrees are contiguous in sorted order.

use crate::error::{Error, Result};
use crate::key;
use crate::mask::{self, COUNT_MASK, MAX_USED_BITS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Canonical bucket identifier.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Default)]
#[repr(transparent)]
pub struct BucketId(u64);

impl BucketId {
    /// The root bucket (zero used bits), containing every other bucket.
    pub const ROOT: Self = Self(0);

    /// Create a bucket id at `used_bits` precision from a raw location word.
    ///
    /// The count field of `location` and every location bit past `used_bits`
    /// are discarded.
    pub fn new(used_bits: u32, location: u64) -> Result<Self> {
        if used_bits > MAX_USED_BITS {
            tracing::debug!(used_bits, max = MAX_USED_BITS, "rejected bucket precision");
            return Err(Error::invalid_used_bits(used_bits, MAX_USED_BITS));
        }
        Ok(Self::at(used_bits, location))
    }

    /// Bucket for a location key; see [`key::key_to_bucket_id`].
    #[inline]
    pub fn from_key(key: u64) -> Result<Self> {
        key::key_to_bucket_id(key)
    }

    /// Validate a raw word read back from storage or the wire.
    ///
    /// Rejects precisions past [`MAX_USED_BITS`] and words carrying location
    /// bits past their own precision.
    pub fn from_raw(raw: u64) -> Result<Self> {
        let used_bits = (raw & COUNT_MASK) as u32;
        if used_bits > MAX_USED_BITS {
            tracing::debug!(raw = %format_args!("0x{raw:016x}"), used_bits, "raw bucket id precision out of range");
            return Err(Error::invalid_used_bits(used_bits, MAX_USED_BITS));
        }
        if mask::tables().strip(raw, used_bits) != raw {
            tracing::debug!(raw = %format_args!("0x{raw:016x}"), "raw bucket id not canonical");
            return Err(Error::non_canonical(raw));
        }
        Ok(Self(raw))
    }

    /// Wrap a word that is already canonical.
    #[inline]
    pub(crate) const fn from_canonical(raw: u64) -> Self {
        Self(raw)
    }

    /// Canonical id for a precision known to be in range.
    #[inline]
    fn at(used_bits: u32, location: u64) -> Self {
        debug_assert!(used_bits <= MAX_USED_BITS);
        Self((location & mask::tables().used_mask(used_bits)) | used_bits as u64)
    }

    /// Precision (split depth) of this bucket.
    #[inline]
    pub fn used_bits(self) -> u32 {
        (self.0 & COUNT_MASK) as u32
    }

    /// Location field, count bits cleared.
    #[inline]
    pub fn location(self) -> u64 {
        self.0 & !COUNT_MASK
    }

    /// Raw `u64` value (location and count field).
    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }

    /// Location key for this bucket; see [`key::bucket_id_to_key`].
    #[inline]
    pub fn to_key(self) -> u64 {
        key::bucket_id_to_key(self)
    }

    /// Returns `true` for the root bucket.
    #[inline]
    pub fn is_root(self) -> bool {
        self.0 == 0
    }

    /// Re-express the location at another precision.
    ///
    /// Fewer bits yields an ancestor. More bits yields the descendant along
    /// the all-zero path, which is rarely what routing wants; prefer
    /// [`child`](Self::child) for splits.
    pub fn with_used_bits(self, used_bits: u32) -> Result<Self> {
        Self::new(used_bits, self.location())
    }

    /// Ancestor at `used_bits` precision.
    ///
    /// Saturates at the id's own precision, so `truncate(n)` for
    /// `n >= used_bits()` returns `self`.
    #[inline]
    pub fn truncate(self, used_bits: u32) -> Self {
        Self::at(used_bits.min(self.used_bits()), self.0)
    }

    /// Returns `true` if `other` is this bucket or one of its descendants.
    ///
    /// A finer bucket never contains a coarser one.
    #[inline]
    pub fn contains(self, other: BucketId) -> bool {
        let used_bits = self.used_bits();
        if other.used_bits() < used_bits {
            return false;
        }
        Self::at(used_bits, other.0) == self
    }

    /// Location bit examined by the split from depth `depth` to `depth + 1`.
    ///
    /// Returns `None` if this bucket has not been split that deep.
    #[inline]
    pub fn split_bit(self, depth: u32) -> Option<bool> {
        if depth >= self.used_bits() {
            return None;
        }
        Some(self.0 & (1 << (u64::BITS - 1 - depth)) != 0)
    }

    /// Parent bucket (one fewer used bit). `None` for the root.
    #[inline]
    pub fn parent(self) -> Option<Self> {
        match self.used_bits() {
            0 => None,
            n => Some(Self::at(n - 1, self.0)),
        }
    }

    /// The other child of this bucket's parent. `None` for the root.
    #[inline]
    pub fn sibling(self) -> Option<Self> {
        match self.used_bits() {
            0 => None,
            n => Some(Self(self.0 ^ (1 << (u64::BITS - n)))),
        }
    }

    /// Child bucket whose next location bit is `bit`.
    ///
    /// `None` if this bucket is already at [`MAX_USED_BITS`].
    #[inline]
    pub fn child(self, bit: bool) -> Option<Self> {
        let used_bits = self.used_bits();
        if used_bits >= MAX_USED_BITS {
            return None;
        }
        let next = used_bits + 1;
        let location = self.location() | ((bit as u64) << (u64::BITS - next));
        Some(Self(location | next as u64))
    }

    /// Both children of a split, `(bit 0, bit 1)`.
    #[inline]
    pub fn children(self) -> Option<(Self, Self)> {
        Some((self.child(false)?, self.child(true)?))
    }

    /// Iterate from this bucket up to and including the root.
    pub fn ancestors(self) -> Ancestors {
        Ancestors { next: Some(self) }
    }
}

/// Iterator over a bucket and its ancestors, finest first.
#[derive(Debug, Clone)]
pub struct Ancestors {
    next: Option<BucketId>,
}

impl Iterator for Ancestors {
    type Item = BucketId;

    fn next(&mut self) -> Option<BucketId> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.next.map_or(0, |id| id.used_bits() as usize + 1);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Ancestors {}

impl Hash for BucketId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.0);
    }
}

impl fmt::Debug for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BucketId(0x{:016x})", self.0)
    }
}

impl From<BucketId> for u64 {
    #[inline]
    fn from(id: BucketId) -> Self {
        id.0
    }
}

impl TryFrom<u64> for BucketId {
    type Error = Error;

    fn try_from(raw: u64) -> Result<Self> {
        Self::from_raw(raw)
    }
}

// === Serde: serialize as u64 ===

impl Serialize for BucketId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BucketId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = u64::deserialize(deserializer)?;
        Self::from_raw(raw).map_err(serde::de::Error::custom)
    }
}
