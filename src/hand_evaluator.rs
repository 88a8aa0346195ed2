//! Maps any 7-card `CardSet` to a totally ordered `Score`.
//!
//! Built from four 13-bit per-suit rank masks plus the combined rank mask.
//! Straights are found with the "5-in-a-row" test against a 14-bit word
//! that repeats bit 12 into bit 0 so the wheel (A-2-3-4-5) matches the same
//! test as every other straight.
//!
//! Packing: class occupies the top byte (bits 56-63, values 0..8), kickers
//! fill five 4-bit fields below it (ranks 2..14 fit in 4 bits). Numerical
//! `<` on the resulting `u64` agrees with poker ranking — that's the whole
//! contract, the exact field widths are not otherwise meaningful.

use once_cell::sync::Lazy;

use crate::cards::{Card, CardSet};
use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    Trips = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    Quads = 7,
    StraightFlush = 8,
}

impl HandCategory {
    fn from_class(class: u64) -> HandCategory {
        match class {
            0 => HandCategory::HighCard,
            1 => HandCategory::Pair,
            2 => HandCategory::TwoPair,
            3 => HandCategory::Trips,
            4 => HandCategory::Straight,
            5 => HandCategory::Flush,
            6 => HandCategory::FullHouse,
            7 => HandCategory::Quads,
            _ => HandCategory::StraightFlush,
        }
    }
}

/// `score_t`: higher is better, total order agrees with showdown ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(pub u64);

impl Score {
    pub fn category(self) -> HandCategory {
        HandCategory::from_class(self.0 >> 56)
    }
}

/// For a 13-bit rank mask (bit 0 = Two .. bit 12 = Ace), the highest
/// straight's high-card rank value (5-14), or 0 if none. Indexed by a
/// 13-bit mask, built once.
static STRAIGHT_TABLE: Lazy<[u8; 8192]> = Lazy::new(|| {
    let mut table = [0u8; 8192];
    for mask in 0u16..8192 {
        let mut best = 0u8;
        for high_bit in 4..=12u8 {
            let pat = 0x1Fu16 << (high_bit - 4);
            if mask & pat == pat {
                best = high_bit + 2;
            }
        }
        let wheel: u16 = (1 << 12) | 0b1111;
        if mask & wheel == wheel && best == 0 {
            best = 5;
        }
        table[mask as usize] = best;
    }
    table
});

fn pack(class: u64, kickers: &[u8]) -> Score {
    let mut v = class << 56;
    let shifts = [16u32, 12, 8, 4, 0];
    for (i, &k) in kickers.iter().enumerate().take(5) {
        v |= (k as u64) << shifts[i];
    }
    Score(v)
}

fn top_n_from_mask(mask: u16, n: usize) -> [u8; 5] {
    let mut out = [0u8; 5];
    let mut count = 0;
    for bit in (0..13u8).rev() {
        if mask & (1 << bit) != 0 {
            out[count] = bit + 2;
            count += 1;
            if count == n {
                break;
            }
        }
    }
    out
}

/// Evaluate a `CardSet` with `popcount == 7` into its best-5-of-7 `Score`.
pub fn evaluate(cards: CardSet) -> Score {
    debug_assert_eq!(cards.popcount(), 7, "evaluator requires exactly 7 cards");

    let mut rank_counts = [0u8; 13];
    let mut suit_masks = [0u16; 4];
    let mut suit_counts = [0u8; 4];

    for c in cards.cards() {
        let rank = c.rank as usize;
        let suit = c.suit as usize;
        rank_counts[rank] += 1;
        suit_masks[suit] |= 1 << rank;
        suit_counts[suit] += 1;
    }

    if let Some(suit) = suit_counts.iter().position(|&n| n >= 5) {
        let fmask = suit_masks[suit];
        let sf_high = STRAIGHT_TABLE[fmask as usize];
        if sf_high > 0 {
            return pack(8, &[sf_high]);
        }
        let ranks = top_n_from_mask(fmask, 5);
        return pack(5, &ranks);
    }

    evaluate_non_flush(&rank_counts)
}

fn evaluate_non_flush(rc: &[u8; 13]) -> Score {
    let mut quad = [0u8; 1];
    let mut nq = 0usize;
    let mut trip = [0u8; 2];
    let mut nt = 0usize;
    let mut pair = [0u8; 3];
    let mut np = 0usize;
    let mut sing = [0u8; 7];
    let mut ns = 0usize;

    for idx in (0..13usize).rev() {
        let rv = idx as u8 + 2;
        match rc[idx] {
            4 => { quad[nq] = rv; nq += 1; }
            3 => { trip[nt] = rv; nt += 1; }
            2 => { pair[np] = rv; np += 1; }
            1 => { sing[ns] = rv; ns += 1; }
            _ => {}
        }
    }

    if nq >= 1 {
        // The 3 non-quad cards are either one trip, or a pair plus a single,
        // or three singles -- trip and pair/single never coexist (both would
        // need more than 3 cards). When a pair and a single both remain, the
        // kicker is whichever outranks the other, not the pair by default.
        let kick = if nt > 0 {
            trip[0]
        } else {
            match (np > 0, ns > 0) {
                (true, true) => pair[0].max(sing[0]),
                (true, false) => pair[0],
                (false, true) => sing[0],
                (false, false) => 0,
            }
        };
        return pack(7, &[quad[0], kick]);
    }

    if nt >= 1 && (np >= 1 || nt >= 2) {
        let pr = if nt >= 2 { trip[1] } else { pair[0] };
        return pack(6, &[trip[0], pr]);
    }

    let rank_mask: u16 = (0..13).fold(0u16, |m, i| if rc[i] > 0 { m | (1 << i) } else { m });
    let sh = STRAIGHT_TABLE[rank_mask as usize];
    if sh > 0 {
        return pack(4, &[sh]);
    }

    if nt >= 1 {
        return pack(3, &[trip[0], sing[0], sing[1]]);
    }

    if np >= 2 {
        let kick = if np >= 3 && pair[2] > sing.get(0).copied().unwrap_or(0) {
            pair[2]
        } else {
            sing.get(0).copied().unwrap_or(0)
        };
        return pack(2, &[pair[0], pair[1], kick]);
    }

    if np == 1 {
        return pack(1, &[pair[0], sing[0], sing[1], sing[2]]);
    }

    pack(0, &[sing[0], sing[1], sing[2], sing[3], sing[4]])
}

/// Convenience: evaluate 2 hole cards plus a board, `&[Card]`-based call site
/// for the CLI and for tests.
pub struct Evaluation {
    pub score: Score,
    pub category: HandCategory,
}

pub fn evaluate_hand(hole: &[Card], board: &[Card]) -> Result<Evaluation, EngineError> {
    let set = CardSet::from_cards(hole).union(CardSet::from_cards(board));
    if set.popcount() != 7 {
        return Err(EngineError::DuplicateCard(format!("{:?} + {:?}", hole, board)));
    }
    let score = evaluate(set);
    Ok(Evaluation { score, category: score.category() })
}

/// Compare two holdings on a shared board: 1 if hand1 wins, -1 if hand2
/// wins, 0 on a tie.
pub fn compare_hands(hand1: &[Card], hand2: &[Card], board: &[Card]) -> Result<i32, EngineError> {
    let s1 = evaluate_hand(hand1, board)?.score;
    let s2 = evaluate_hand(hand2, board)?.score;
    Ok(match s1.cmp(&s2) {
        std::cmp::Ordering::Greater => 1,
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
    })
}
