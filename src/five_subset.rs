//! Precomputed table of every 5-subset of `[0,48)`: the shared board
//! positions drawn from a matchup's 48-card free table. Built once,
//! read-only thereafter, shared across every worker.

use once_cell::sync::Lazy;

/// `C(48,5)`.
pub const NUM_FIVE_SUBSETS: usize = 1_712_304;

/// Pack five strictly-decreasing 6-bit indices `i0>i1>i2>i3>i4` into a 30-bit
/// word: `i0 | i1<<6 | i2<<12 | i3<<18 | i4<<24`.
#[inline]
pub fn pack_subset(i0: u32, i1: u32, i2: u32, i3: u32, i4: u32) -> u32 {
    i0 | (i1 << 6) | (i2 << 12) | (i3 << 18) | (i4 << 24)
}

/// Unpack a subset word back into its five indices, high-to-low.
#[inline]
pub fn unpack_subset(word: u32) -> [u32; 5] {
    [
        word & 0x3F,
        (word >> 6) & 0x3F,
        (word >> 12) & 0x3F,
        (word >> 18) & 0x3F,
        (word >> 24) & 0x3F,
    ]
}

/// All `C(48,5)` subset words, lexicographic on `(i0,i1,i2,i3,i4)`. Built
/// once by direct combination advance (no recursion), same idiom as picking
/// the next lexicographic k-combination in place.
pub static FIVE_SUBSETS: Lazy<Vec<u32>> = Lazy::new(build_five_subsets);

fn build_five_subsets() -> Vec<u32> {
    let mut out = Vec::with_capacity(NUM_FIVE_SUBSETS);
    let mut idx = [0u32, 1, 2, 3, 4];
    loop {
        // idx is ascending; the packing wants i0>i1>...>i4, so reverse.
        out.push(pack_subset(idx[4], idx[3], idx[2], idx[1], idx[0]));

        let mut i = 4usize;
        loop {
            if idx[i] < 47 - (4 - i) as u32 {
                idx[i] += 1;
                for j in (i + 1)..5 {
                    idx[j] = idx[j - 1] + 1;
                }
                break;
            }
            if i == 0 {
                return out;
            }
            i -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_matches_choose_48_5() {
        assert_eq!(FIVE_SUBSETS.len(), NUM_FIVE_SUBSETS);
    }

    #[test]
    fn every_entry_is_strictly_decreasing_in_range() {
        for &word in FIVE_SUBSETS.iter().take(10_000) {
            let idx = unpack_subset(word);
            for w in idx.windows(2) {
                assert!(w[0] > w[1]);
            }
            assert!(idx[0] < 48);
        }
    }

    #[test]
    fn pack_unpack_roundtrip() {
        let word = pack_subset(47, 10, 9, 3, 0);
        assert_eq!(unpack_subset(word), [47, 10, 9, 3, 0]);
    }

    #[test]
    fn no_duplicate_subsets() {
        use std::collections::HashSet;
        let sample: HashSet<u32> = FIVE_SUBSETS.iter().take(50_000).copied().collect();
        assert_eq!(sample.len(), 50_000.min(FIVE_SUBSETS.len()));
    }
}
