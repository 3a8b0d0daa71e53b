//! Property-based tests for bucket id arithmetic
//!
//! These verify the invariants routing and split planning rely on, over
//! arbitrary location hashes and precisions.

use docstore_bucket::mask::tables;
use docstore_bucket::{
    bucket_id_to_key, key_to_bucket_id, location_key, reverse, wire, BucketId, Error,
    MAX_USED_BITS,
};
use proptest::prelude::*;

// Any key whose embedded precision is in range.
fn valid_key() -> impl Strategy<Value = u64> {
    (any::<u64>(), 0..=MAX_USED_BITS).prop_map(|(hash, used)| location_key(hash, used).unwrap())
}

fn bucket() -> impl Strategy<Value = BucketId> {
    valid_key().prop_map(|key| key_to_bucket_id(key).unwrap())
}

proptest! {
    #[test]
    fn reverse_is_an_involution(x in any::<u64>()) {
        prop_assert_eq!(reverse(reverse(x)), x);
        prop_assert_eq!(reverse(x), x.reverse_bits());
    }

    #[test]
    fn precision_round_trips_through_key(key in valid_key()) {
        let id = key_to_bucket_id(key).unwrap();
        prop_assert_eq!(id.used_bits() as u64, key >> MAX_USED_BITS);
    }

    #[test]
    fn out_of_range_precision_is_rejected(hash in any::<u64>(), used in (MAX_USED_BITS + 1)..64) {
        let key = (hash & (u64::MAX >> 6)) | ((used as u64) << MAX_USED_BITS);
        prop_assert_eq!(
            key_to_bucket_id(key).unwrap_err(),
            Error::InvalidUsedBits { requested: used, max: MAX_USED_BITS }
        );
    }

    #[test]
    fn masking_is_idempotent(id in bucket()) {
        prop_assert_eq!(tables().strip(id.raw(), id.used_bits()), id.raw());
        prop_assert_eq!(BucketId::new(id.used_bits(), id.raw()).unwrap(), id);
        prop_assert_eq!(BucketId::from_raw(id.raw()).unwrap(), id);
    }

    #[test]
    fn key_mapping_inverts(id in bucket()) {
        prop_assert_eq!(key_to_bucket_id(bucket_id_to_key(id)).unwrap(), id);
    }

    #[test]
    fn truncation_yields_ancestor(id in bucket(), m in 0..=MAX_USED_BITS) {
        let ancestor = id.truncate(m);
        prop_assert!(ancestor.used_bits() <= id.used_bits());
        prop_assert!(ancestor.contains(id));
        if ancestor.used_bits() < id.used_bits() {
            prop_assert!(!id.contains(ancestor));
        }
    }

    #[test]
    fn split_is_disjoint_and_covering(id in bucket()) {
        prop_assume!(id.used_bits() < MAX_USED_BITS);
        let (zero, one) = id.children().unwrap();
        prop_assert_ne!(zero, one);
        prop_assert!(id.contains(zero) && id.contains(one));
        prop_assert!(!zero.contains(one) && !one.contains(zero));
        prop_assert_eq!(zero.parent(), Some(id));
        prop_assert_eq!(one.parent(), Some(id));
        prop_assert_eq!(zero.truncate(id.used_bits()), id);
        prop_assert_eq!(one.sibling(), Some(zero));
    }

    #[test]
    fn every_hash_falls_in_exactly_one_child(hash in any::<u64>(), d in 0..MAX_USED_BITS) {
        let parent = key_to_bucket_id(location_key(hash, d).unwrap()).unwrap();
        let leaf = key_to_bucket_id(location_key(hash, d + 1).unwrap()).unwrap();
        let (zero, one) = parent.children().unwrap();
        prop_assert!(zero.contains(leaf) ^ one.contains(leaf));
        prop_assert_eq!(leaf.parent(), Some(parent));
        // The split examined hash bit `d`.
        prop_assert_eq!(leaf.split_bit(d), Some(hash & (1 << d) != 0));
    }

    #[test]
    fn containment_is_asymmetric(a in bucket(), b in bucket()) {
        if a.used_bits() > b.used_bits() {
            prop_assert!(!a.contains(b));
            prop_assert_eq!(b.contains(a), a.truncate(b.used_bits()) == b);
        }
        if a.contains(b) && b.contains(a) {
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn wire_round_trip(id in bucket()) {
        prop_assert_eq!(wire::decode(wire::encode(id)).unwrap().raw(), id.raw());
    }

    #[test]
    fn sorted_order_keeps_subtrees_contiguous(ids in prop::collection::vec(bucket(), 1..64), pick in any::<prop::sample::Index>()) {
        let mut sorted = ids.clone();
        sorted.sort();
        let root = *pick.get(&ids);
        let members: Vec<usize> = sorted
            .iter()
            .enumerate()
            .filter(|(_, id)| root.contains(**id))
            .map(|(i, _)| i)
            .collect();
        prop_assert!(!members.is_empty());
        prop_assert_eq!(members.last().unwrap() - members[0] + 1, members.len());
    }
}

#[test]
fn construction_bounds() {
    for used in 0..=MAX_USED_BITS {
        assert!(BucketId::new(used, u64::MAX).is_ok(), "used_bits {used} should be accepted");
    }
    for used in 59..64 {
        let err = BucketId::new(used, 0).unwrap_err();
        assert_eq!(err, Error::InvalidUsedBits { requested: used, max: 58 });
        assert_eq!(
            err.to_string(),
            format!("Failed to set used bits to {used}, max is 58.")
        );
    }
}

#[test]
fn fourth_examined_bit_separates_siblings() {
    let h: u64 = 0x0C00_0000_0000_0000;
    assert_eq!(key_to_bucket_id(h).unwrap().used_bits(), 3);

    let h2 = h ^ (1 << 3);
    let a = key_to_bucket_id(h).unwrap();
    let b = key_to_bucket_id(h2).unwrap();
    assert_eq!(a.truncate(3), b.truncate(3));

    let a4 = key_to_bucket_id(location_key(h, 4).unwrap()).unwrap();
    let b4 = key_to_bucket_id(location_key(h2, 4).unwrap()).unwrap();
    assert_ne!(a4, b4);
    assert_eq!(a4.sibling(), Some(b4));
    assert!(a.contains(a4) && a.contains(b4));
}

#[test]
fn self_containment_is_reflexive() {
    for id in [
        BucketId::ROOT,
        BucketId::new(1, 0).unwrap(),
        BucketId::new(MAX_USED_BITS, u64::MAX).unwrap(),
    ] {
        assert!(id.contains(id));
    }
}
