//! Container hashing for bucket ids.
//!
//! The raw word is a poor hash-table index on its own: the low bits are the
//! count field (a handful of distinct values) and the high bits are sparse
//! hierarchical coordinates. Containers therefore hash ids through a mixing
//! function. The default mixer is XXH3-64 over the raw word's little-endian
//! bytes, which is stable across processes and platforms, so persisted ids
//! land in the same slots when reloaded.
//!
//! The mixer is a [`MixHash`] type parameter, so tests and alternative
//! deployments can substitute their own.

use crate::bucket_id::BucketId;
use std::hash::{BuildHasher, Hasher};
use xxhash_rust::xxh3::xxh3_64;

/// Pure `u64 -> u64` mixing function.
pub trait MixHash {
    fn mix(&self, raw: u64) -> u64;
}

/// XXH3-64 over the little-endian bytes of the word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Xxh3Mix;

impl MixHash for Xxh3Mix {
    #[inline]
    fn mix(&self, raw: u64) -> u64 {
        xxh3_64(&raw.to_le_bytes())
    }
}

impl<F: Fn(u64) -> u64> MixHash for F {
    #[inline]
    fn mix(&self, raw: u64) -> u64 {
        self(raw)
    }
}

impl BucketId {
    /// Mixing hash of this id under the default mixer.
    #[inline]
    pub fn mix_hash(self) -> u64 {
        Xxh3Mix.mix(self.raw())
    }

    /// Mixing hash of this id under `mixer`.
    #[inline]
    pub fn mix_hash_with<M: MixHash>(self, mixer: &M) -> u64 {
        mixer.mix(self.raw())
    }
}

/// [`Hasher`] fed by [`BucketId`]'s `Hash` impl.
///
/// A lone `write_u64` (what `BucketId` emits) finishes to exactly
/// `mixer.mix(raw)`. Further writes fold into the running state, so the
/// hasher stays usable for composite keys such as `(BucketId, u32)`.
#[derive(Debug, Clone)]
pub struct BucketIdHasher<M = Xxh3Mix> {
    mixer: M,
    state: u64,
    written: bool,
}

impl<M: MixHash> BucketIdHasher<M> {
    pub fn new(mixer: M) -> Self {
        Self {
            mixer,
            state: 0,
            written: false,
        }
    }
}

impl<M: MixHash> Hasher for BucketIdHasher<M> {
    #[inline]
    fn finish(&self) -> u64 {
        self.state
    }

    #[inline]
    fn write_u64(&mut self, value: u64) {
        let input = if self.written {
            self.state.rotate_left(31) ^ value
        } else {
            value
        };
        self.state = self.mixer.mix(input);
        self.written = true;
    }

    fn write(&mut self, bytes: &[u8]) {
        let mut chunks = bytes.chunks_exact(8);
        for chunk in &mut chunks {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            self.write_u64(u64::from_le_bytes(word));
        }
        let rest = chunks.remainder();
        if !rest.is_empty() {
            let mut word = [0u8; 8];
            word[..rest.len()].copy_from_slice(rest);
            // Tag the tail with its length so "ab" and "ab\0" differ.
            self.write_u64(u64::from_le_bytes(word) ^ ((rest.len() as u64) << 56));
        }
    }
}

/// [`BuildHasher`] producing [`BucketIdHasher`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildBucketHasher<M = Xxh3Mix> {
    mixer: M,
}

impl<M: MixHash> BuildBucketHasher<M> {
    pub fn with_mixer(mixer: M) -> Self {
        Self { mixer }
    }
}

impl<M: MixHash + Clone> BuildHasher for BuildBucketHasher<M> {
    type Hasher = BucketIdHasher<M>;

    #[inline]
    fn build_hasher(&self) -> Self::Hasher {
        BucketIdHasher::new(self.mixer.clone())
    }
}

/// Hash set of bucket ids keyed through the mixing hash.
pub type BucketIdSet = hashbrown::HashSet<BucketId, BuildBucketHasher>;

/// Hash map from bucket ids keyed through the mixing hash.
pub type BucketIdMap<V> = hashbrown::HashMap<BucketId, V, BuildBucketHasher>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::hash::Hash;

    fn hash_of<M: MixHash + Clone>(id: BucketId, build: &BuildBucketHasher<M>) -> u64 {
        let mut h = build.build_hasher();
        id.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_hasher_matches_functor() {
        let build: BuildBucketHasher = BuildBucketHasher::default();
        for raw_loc in [0u64, 0x8000_0000_0000_0000, 0x1234_5678_9ABC_DEC0] {
            let id = BucketId::new(20, raw_loc).unwrap();
            assert_eq!(hash_of(id, &build), id.mix_hash());
            assert_eq!(build.hash_one(id), id.mix_hash());
        }
    }

    #[test]
    fn test_default_mixer_is_xxh3_of_le_bytes() {
        let id = BucketId::new(3, 0xA000_0000_0000_0000).unwrap();
        assert_eq!(id.mix_hash(), xxh3_64(&id.raw().to_le_bytes()));
        // Stable across runs: same input, same output.
        assert_eq!(id.mix_hash(), BucketId::from_raw(id.raw()).unwrap().mix_hash());
    }

    #[test]
    fn test_mixer_is_injectable() {
        let identity = BuildBucketHasher::with_mixer(|raw: u64| raw);
        let id = BucketId::new(4, 0xF000_0000_0000_0000).unwrap();
        assert_eq!(hash_of(id, &identity), id.raw());
        assert_eq!(id.mix_hash_with(&|raw: u64| !raw), !id.raw());
    }

    #[test]
    fn test_composite_keys_differ() {
        let build: BuildBucketHasher = BuildBucketHasher::default();
        let id = BucketId::new(8, 0xAB00_0000_0000_0000).unwrap();
        let a = build.hash_one((id, 1u32));
        let b = build.hash_one((id, 2u32));
        assert_ne!(a, b);
    }

    #[test]
    fn test_byte_tail_length_matters() {
        let build: BuildBucketHasher = BuildBucketHasher::default();
        assert_ne!(build.hash_one(&b"ab"[..]), build.hash_one(&b"ab\0"[..]));
    }

    #[test]
    fn test_set_and_map() {
        let parent = BucketId::new(1, 0).unwrap();
        let (a, b) = parent.children().unwrap();

        let mut set = BucketIdSet::default();
        assert!(set.insert(a));
        assert!(set.insert(b));
        assert!(!set.insert(a));
        assert_eq!(set.len(), 2);

        let mut owners: BucketIdMap<&str> = BucketIdMap::default();
        owners.insert(a, "node-1");
        owners.insert(b, "node-2");
        assert_eq!(owners.get(&a), Some(&"node-1"));
        assert_eq!(owners.get(&parent), None);
    }
}
