//! Suit-symmetry memoiser: for one (Alice, Bob) canonical matchup, fixes
//! Alice's suits, sweeps Bob's admissible suit pairs, and reuses the
//! board-enumeration kernel's result across suit pairs that are equivalent
//! up to relabelling.

use itertools::iproduct;

use crate::card_encoding::free_table;
use crate::cards::{Card, CardSet, Hand, ALL_SUITS};
use crate::device::ComputeDevice;
use crate::error::EngineError;
use crate::five_subset::NUM_FIVE_SUBSETS;
use crate::kernel::unpack_wins;

/// Win/tie/loss tally for one matchup (`outcomes_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcomes {
    pub alice: u64,
    pub bob: u64,
    pub tie: u64,
}

impl Outcomes {
    pub fn total(&self) -> u64 {
        self.alice + self.bob + self.tie
    }
}

/// 4-bit cache key: which of Alice's two fixed suits each of Bob's two
/// candidate suits happens to equal.
fn signature(sa0: bool, sa1: bool, sb0: bool, sb1: bool) -> usize {
    (sa0 as usize) | (sa1 as usize) << 1 | (sb0 as usize) << 2 | (sb1 as usize) << 3
}

/// Compute outcomes for one canonical matchup, dispatching each distinct
/// suit pattern to `device` at most once.
///
/// Fixes Alice's suits to `(spades, spades if suited else hearts)` — a
/// canonical choice that makes the 4-bit signature a complete equivalence
/// class identifier.
pub fn compare_hands(
    device: &dyn ComputeDevice,
    alice: Hand,
    bob: Hand,
    nop: bool,
) -> Result<Outcomes, EngineError> {
    let (a_hi, a_lo) = alice.canonical_cards();
    let sa0 = a_hi.suit;
    let sa1 = a_lo.suit;
    let alice_cards = CardSet::single(a_hi).union(CardSet::single(a_lo));

    let mut cache: [Option<u64>; 16] = [None; 16];
    let mut wins: u64 = 0;
    let mut total: u64 = 0;

    for (sb0, sb1) in iproduct!(ALL_SUITS, ALL_SUITS) {
        if (sb0 == sb1) != bob.suited {
            continue;
        }
        let bob_cards = CardSet::single(Card::new(bob.hi, sb0)).union(CardSet::single(Card::new(bob.lo, sb1)));
        let combined = alice_cards.union(bob_cards);
        if combined.popcount() < 4 {
            continue;
        }

        let sig = signature(sa0 == sb0, sa0 == sb1, sa1 == sb0, sa1 == sb1);
        let packed = match cache[sig] {
            Some(p) => p,
            None => {
                let free = free_table(combined);
                let p = device.enumerate(alice_cards, bob_cards, &free, nop);
                cache[sig] = Some(p);
                p
            }
        };
        wins += packed;
        total += NUM_FIVE_SUBSETS as u64;
    }

    let (alice_wins, bob_wins) = unpack_wins(wins);
    let outcomes = Outcomes { alice: alice_wins as u64, bob: bob_wins as u64, tie: total - alice_wins as u64 - bob_wins as u64 };

    if alice == bob && outcomes.alice != outcomes.bob {
        return Err(EngineError::InvariantViolation(format!(
            "self-matchup {alice} produced alice={} bob={} (should be equal)",
            outcomes.alice, outcomes.bob
        )));
    }

    Ok(outcomes)
}
