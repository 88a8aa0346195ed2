//! Deterministic pseudo-randomness for the regression suite.
//!
//! Two independent pieces live here: a fixed 64-bit avalanche mixer used both
//! to derive seeds and to merge per-hand results into a single regression
//! hash, and `mostly_random_set`, which turns one 64-bit seed into a 7-card
//! `CardSet` via a "min_bit" collision rule. Neither is allowed to change
//! once anchors are pinned against it.

use crate::cards::CardSet;

/// splitmix64 finalizer. Good avalanche, bijective, the standard choice when
/// you need "mix these bits up" and nothing fancier.
#[inline]
fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^= x >> 31;
    x
}

/// Hash a single 64-bit value.
pub fn hash(x: u64) -> u64 {
    mix64(x)
}

/// Hash two 64-bit values together; order matters.
pub fn hash2(a: u64, b: u64) -> u64 {
    mix64(a ^ mix64(b).wrapping_add(0x9e37_79b9_7f4a_7c15))
}

/// Hash three 64-bit values together; order matters.
pub fn hash3(a: u64, b: u64, c: u64) -> u64 {
    hash2(hash2(a, b), mix64(c))
}

/// Lowest set bit of `x`, or 0 if `x == 0`.
#[inline]
fn min_bit(x: u64) -> u64 {
    x & x.wrapping_neg()
}

/// Produce a 7-card `CardSet` deterministically from a 64-bit seed.
///
/// Draws 7 indices, 6 bits each, from successive slices of `seed`, reduced
/// mod 52. A collision (the drawn index is already in the set) is resolved
/// by taking the lowest still-free card rather than redrawing — kept
/// verbatim because the exact resolution rule is part of the distribution
/// contract the hash anchors are pinned against.
pub fn mostly_random_set(seed: u64) -> CardSet {
    const CARD_MASK: u64 = (1u64 << 52) - 1;
    let mut cards: u64 = 0;
    for slot in 0..7u32 {
        let i = (seed >> (6 * slot)) & 0x3f;
        let i = i % 52;
        let b = 1u64 << i;
        cards |= if cards & b != 0 { min_bit(!cards & CARD_MASK) } else { b };
    }
    debug_assert_eq!(cards.count_ones(), 7);
    CardSet(cards)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mostly_random_set_always_has_seven_cards() {
        for seed in [0u64, 1, 0xffff_ffff_ffff_ffff, 0x1234_5678_9abc_def0, 42] {
            assert_eq!(mostly_random_set(seed).popcount(), 7);
        }
    }

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash(123), hash(123));
        assert_eq!(hash2(1, 2), hash2(1, 2));
        assert_ne!(hash2(1, 2), hash2(2, 1));
    }

    #[test]
    fn hash3_is_order_sensitive() {
        assert_ne!(hash3(1, 2, 3), hash3(3, 2, 1));
    }
}
