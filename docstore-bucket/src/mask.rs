//! Per-precision mask tables.
//!
//! A bucket id word is laid out as:
//!
//! ```text
//! bits 63..6   location field (reversed location hash, `used_bits` significant)
//! bits  5..0   count field (used_bits, 0..=MAX_USED_BITS)
//! ```
//!
//! For every precision `u` the table holds:
//!
//! - `used[u]`: keeps exactly the top `u` bits (the significant location bits).
//! - `strip[u]`: `used[u]` plus the count field, so a raw word can be
//!   canonicalized without losing its embedded precision.
//!
//! The table is built once per process behind a `OnceLock` and never mutated
//! afterwards, so readers on any thread go straight to the arrays.

use std::sync::OnceLock;

/// Width of the count field holding `used_bits`.
pub const COUNT_BITS: u32 = 6;

/// Maximum precision (split depth) of a bucket id.
pub const MAX_USED_BITS: u32 = u64::BITS - COUNT_BITS;

/// Mask isolating the count field.
pub const COUNT_MASK: u64 = (1 << COUNT_BITS) - 1;

const TABLE_LEN: usize = MAX_USED_BITS as usize + 1;

/// Precomputed used/strip masks, indexed by precision.
#[derive(Debug)]
pub struct MaskTables {
    used: [u64; TABLE_LEN],
    strip: [u64; TABLE_LEN],
}

impl MaskTables {
    fn build() -> Self {
        let mut used = [0u64; TABLE_LEN];
        let mut strip = [0u64; TABLE_LEN];
        for bits in 0..=MAX_USED_BITS {
            let mask = used_mask_for(bits);
            used[bits as usize] = mask;
            strip[bits as usize] = mask | COUNT_MASK;
        }
        tracing::trace!(precisions = TABLE_LEN, "built bucket mask tables");
        Self { used, strip }
    }

    /// Mask keeping the `used_bits` significant location bits.
    ///
    /// # Panics
    ///
    /// Panics if `used_bits` exceeds [`MAX_USED_BITS`].
    #[inline]
    pub fn used_mask(&self, used_bits: u32) -> u64 {
        self.used[used_bits as usize]
    }

    /// [`used_mask`](Self::used_mask) plus the count field.
    ///
    /// # Panics
    ///
    /// Panics if `used_bits` exceeds [`MAX_USED_BITS`].
    #[inline]
    pub fn strip_mask(&self, used_bits: u32) -> u64 {
        self.strip[used_bits as usize]
    }

    /// Clear every location bit past `used_bits`, leaving the count field
    /// untouched.
    ///
    /// # Panics
    ///
    /// Panics if `used_bits` exceeds [`MAX_USED_BITS`].
    #[inline]
    pub fn strip(&self, raw: u64, used_bits: u32) -> u64 {
        raw & self.strip_mask(used_bits)
    }
}

#[inline]
fn used_mask_for(used_bits: u32) -> u64 {
    if used_bits == 0 {
        0
    } else {
        u64::MAX << (u64::BITS - used_bits)
    }
}

static TABLES: OnceLock<MaskTables> = OnceLock::new();

/// Process-wide mask tables, built on first access.
#[inline]
pub fn tables() -> &'static MaskTables {
    TABLES.get_or_init(MaskTables::build)
}

/// Build the mask tables eagerly, e.g. at process start.
///
/// Calling this is optional and idempotent; [`tables`] initializes lazily.
pub fn initialize() {
    tables();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(COUNT_BITS, 6);
        assert_eq!(MAX_USED_BITS, 58);
        assert_eq!(COUNT_MASK, 0x3f);
    }

    #[test]
    fn test_zero_precision_keeps_only_count() {
        let t = tables();
        assert_eq!(t.used_mask(0), 0);
        assert_eq!(t.strip_mask(0), COUNT_MASK);
    }

    #[test]
    fn test_used_mask_keeps_high_bits() {
        let t = tables();
        assert_eq!(t.used_mask(1), 0x8000_0000_0000_0000);
        assert_eq!(t.used_mask(4), 0xF000_0000_0000_0000);
        assert_eq!(t.used_mask(MAX_USED_BITS), !COUNT_MASK);
        for bits in 0..=MAX_USED_BITS {
            assert_eq!(t.used_mask(bits).count_ones(), bits);
            assert_eq!(t.used_mask(bits) & COUNT_MASK, 0, "used mask overlaps count field");
        }
    }

    #[test]
    fn test_strip_mask_preserves_count() {
        let t = tables();
        for bits in 0..=MAX_USED_BITS {
            let raw = u64::MAX & !COUNT_MASK | bits as u64;
            let stripped = t.strip(raw, bits);
            assert_eq!(stripped & COUNT_MASK, bits as u64);
            assert_eq!(stripped & !COUNT_MASK, t.used_mask(bits));
        }
    }

    #[test]
    #[should_panic]
    fn test_used_mask_past_max_panics() {
        tables().used_mask(MAX_USED_BITS + 1);
    }

    #[test]
    #[should_panic]
    fn test_strip_past_max_panics() {
        tables().strip(u64::MAX, 63);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        initialize();
        let first = tables() as *const MaskTables;
        initialize();
        assert_eq!(first, tables() as *const MaskTables);
    }

    #[test]
    fn test_concurrent_readers_see_same_table() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| tables() as *const MaskTables as usize))
            .collect();
        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
    }
}
