//! # Docstore Bucket
//!
//! Bucket addressing for the docstore content layer.
//!
//! This crate provides:
//! - [`BucketId`]: a 64-bit, self-describing partition coordinate
//! - Location key mapping (bit reversal) from document location hashes
//! - O(1) containment, lineage (parent / sibling / children) and ordering
//! - A fixed 8-byte wire form and a stable container mixing hash
//!
//! ## Design Principles
//!
//! 1. **Pure arithmetic**: no I/O, no cluster state, no locks after init
//! 2. **Canonical values**: every `BucketId` is masked to its own precision
//! 3. **Coordination-free splits**: the split order is a function of the
//!    location hash alone
//!
//! ## Example
//!
//! ```
//! use docstore_bucket::{location_key, BucketId};
//!
//! let key = location_key(0x9E37_79B9_7F4A_7C15, 16)?;
//! let bucket = BucketId::from_key(key)?;
//! let superbucket = bucket.truncate(8);
//! assert!(superbucket.contains(bucket));
//! assert!(!bucket.contains(superbucket));
//! # Ok::<(), docstore_bucket::Error>(())
//! ```

pub mod bucket_id;
pub mod error;
pub mod hash;
pub mod key;
pub mod mask;
pub mod wire;

pub use bucket_id::{Ancestors, BucketId};
pub use error::{Error, Result};
pub use hash::{BucketIdHasher, BucketIdMap, BucketIdSet, BuildBucketHasher, MixHash, Xxh3Mix};
pub use key::{bucket_id_to_key, key_to_bucket_id, location_key, reverse};
pub use mask::{COUNT_BITS, COUNT_MASK, MAX_USED_BITS};
