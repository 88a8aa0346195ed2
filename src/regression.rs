//! The test harness: a fixed classifier table covering every hand class and
//! its tie-breaking edge cases, plus two hash-based regression tests (score
//! and matchup) run at a caller-supplied size knob.

use crate::cards::parse_board;
use crate::device::ComputeDevice;
use crate::error::EngineError;
use crate::hand_evaluator::{compare_hands, evaluate, evaluate_hand, HandCategory};
use crate::matchup;
use crate::rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Winner {
    Alice,
    Bob,
    Tie,
}

struct ClassifierCase {
    alice: &'static str,
    bob: &'static str,
    shared: &'static str,
    alice_class: HandCategory,
    bob_class: HandCategory,
    winner: Winner,
}

use HandCategory::*;
use Winner::*;

/// Fixed-capacity: every hand class, the wheel and steel-wheel edge cases,
/// kicker-count boundaries, and irrelevance of extra pairs/suits beyond the
/// best five.
const CLASSIFIER_CASES: [ClassifierCase; 47] = [
    ClassifierCase { alice: "As2d", bob: "KsTc", shared: "Qh3h7h9d4c", alice_class: HighCard, bob_class: HighCard, winner: Alice },
    ClassifierCase { alice: "Ks2d", bob: "AsTc", shared: "Qh3h7h9d4c", alice_class: HighCard, bob_class: HighCard, winner: Bob },
    ClassifierCase { alice: "4s2d", bob: "5s3c", shared: "QhAh7h9dTc", alice_class: HighCard, bob_class: HighCard, winner: Tie },
    ClassifierCase { alice: "4s3d", bob: "5s3c", shared: "QhAh7h9d2c", alice_class: HighCard, bob_class: HighCard, winner: Bob },
    ClassifierCase { alice: "4s3d", bob: "4d3c", shared: "QhAh7h9d2c", alice_class: HighCard, bob_class: HighCard, winner: Tie },
    ClassifierCase { alice: "As2d", bob: "KsTc", shared: "Qh3h7h9d2c", alice_class: Pair, bob_class: HighCard, winner: Alice },
    ClassifierCase { alice: "Ks2d", bob: "AsTc", shared: "Qh3h7h9d2c", alice_class: Pair, bob_class: HighCard, winner: Alice },
    ClassifierCase { alice: "Ks2d", bob: "AsTc", shared: "KhAh7h9d3c", alice_class: Pair, bob_class: Pair, winner: Bob },
    ClassifierCase { alice: "Ks2d", bob: "KdTc", shared: "KhAh7h9d3c", alice_class: Pair, bob_class: Pair, winner: Bob },
    ClassifierCase { alice: "KsTd", bob: "Kd2c", shared: "KhAh7h9d3c", alice_class: Pair, bob_class: Pair, winner: Alice },
    ClassifierCase { alice: "Ks3d", bob: "Kd2c", shared: "KhAh7h9d6c", alice_class: Pair, bob_class: Pair, winner: Tie },
    ClassifierCase { alice: "7s6d", bob: "5d4c", shared: "KhKdJh9d8c", alice_class: Pair, bob_class: Pair, winner: Tie },
    ClassifierCase { alice: "7s6d", bob: "5d4c", shared: "7d5h4hAdKc", alice_class: Pair, bob_class: TwoPair, winner: Bob },
    ClassifierCase { alice: "2s6d", bob: "5d4c", shared: "2d5h4hAdKc", alice_class: Pair, bob_class: TwoPair, winner: Bob },
    ClassifierCase { alice: "7s2d", bob: "5d4c", shared: "2h5h4h7dKc", alice_class: TwoPair, bob_class: TwoPair, winner: Alice },
    ClassifierCase { alice: "7s2d", bob: "7d2c", shared: "2h5h4h7hKc", alice_class: TwoPair, bob_class: TwoPair, winner: Tie },
    ClassifierCase { alice: "7sAd", bob: "7dQc", shared: "Kh5h4h7hKc", alice_class: TwoPair, bob_class: TwoPair, winner: Alice },
    ClassifierCase { alice: "KsAd", bob: "QdAc", shared: "JhJcThTc2c", alice_class: TwoPair, bob_class: TwoPair, winner: Tie },
    ClassifierCase { alice: "JsAd", bob: "QdAc", shared: "AhJcKhKc2c", alice_class: TwoPair, bob_class: TwoPair, winner: Bob },
    ClassifierCase { alice: "JsAd", bob: "QdKc", shared: "JhJcQhKs2c", alice_class: Trips, bob_class: TwoPair, winner: Alice },
    ClassifierCase { alice: "JsAd", bob: "QdKc", shared: "ThTcTs3s2c", alice_class: Trips, bob_class: Trips, winner: Alice },
    ClassifierCase { alice: "9s8d", bob: "7d6c", shared: "ThTcTsAsKc", alice_class: Trips, bob_class: Trips, winner: Tie },
    ClassifierCase { alice: "Ts8d", bob: "QdJc", shared: "ThTc2sAsKc", alice_class: Trips, bob_class: Straight, winner: Bob },
    ClassifierCase { alice: "Ts8d", bob: "QdJc", shared: "2h3c4s5s6c", alice_class: Straight, bob_class: Straight, winner: Tie },
    ClassifierCase { alice: "Ah5c", bob: "Tc2h", shared: "6d7h8c9dAs", alice_class: Straight, bob_class: Straight, winner: Bob },
    ClassifierCase { alice: "AhJc", bob: "5cKh", shared: "2d3h4c5d5h", alice_class: Straight, bob_class: Trips, winner: Alice },
    ClassifierCase { alice: "AhJc", bob: "6cKh", shared: "2d3h4c5d5h", alice_class: Straight, bob_class: Straight, winner: Bob },
    ClassifierCase { alice: "AhJc", bob: "6c2d", shared: "Th3h4h5d5h", alice_class: Flush, bob_class: Straight, winner: Alice },
    ClassifierCase { alice: "AhJc", bob: "6h2d", shared: "Th3h4h5d5h", alice_class: Flush, bob_class: Flush, winner: Alice },
    ClassifierCase { alice: "7h6c", bob: "6h2d", shared: "AhKhQh9h8h", alice_class: Flush, bob_class: Flush, winner: Tie },
    ClassifierCase { alice: "7h6h", bob: "5h2h", shared: "AhKhQh9h8h", alice_class: Flush, bob_class: Flush, winner: Tie },
    ClassifierCase { alice: "7d6d", bob: "5h2h", shared: "7h7c6hTh8h", alice_class: FullHouse, bob_class: Flush, winner: Alice },
    ClassifierCase { alice: "7d6d", bob: "6c6s", shared: "7h7c6h9h8h", alice_class: FullHouse, bob_class: FullHouse, winner: Alice },
    ClassifierCase { alice: "7d7s", bob: "6c6s", shared: "7h2c6h9h9s", alice_class: FullHouse, bob_class: FullHouse, winner: Alice },
    ClassifierCase { alice: "7d7s", bob: "6c6s", shared: "9c2c6h9h9s", alice_class: FullHouse, bob_class: FullHouse, winner: Alice },
    ClassifierCase { alice: "AdKd", bob: "QcJs", shared: "9c6c6h9h9s", alice_class: FullHouse, bob_class: FullHouse, winner: Tie },
    ClassifierCase { alice: "AdKd", bob: "AcQs", shared: "AsAhQhQdKs", alice_class: FullHouse, bob_class: FullHouse, winner: Alice },
    ClassifierCase { alice: "2d2c", bob: "AcQs", shared: "AsAhQh2h2s", alice_class: Quads, bob_class: FullHouse, winner: Alice },
    ClassifierCase { alice: "2d2c", bob: "3c3s", shared: "3d3hQh2h2s", alice_class: Quads, bob_class: Quads, winner: Bob },
    ClassifierCase { alice: "Ad7c", bob: "Qc3s", shared: "2d2cQh2h2s", alice_class: Quads, bob_class: Quads, winner: Alice },
    ClassifierCase { alice: "AdKc", bob: "AcQs", shared: "2d2cQh2h2s", alice_class: Quads, bob_class: Quads, winner: Tie },
    ClassifierCase { alice: "2d3d", bob: "AcAs", shared: "AdAh4d5d6d", alice_class: StraightFlush, bob_class: Quads, winner: Alice },
    ClassifierCase { alice: "Ts8s", bob: "QsJs", shared: "2s3s4s5s6s", alice_class: StraightFlush, bob_class: StraightFlush, winner: Tie },
    ClassifierCase { alice: "Ah5c", bob: "Tc2h", shared: "6c7c8c9cKh", alice_class: StraightFlush, bob_class: StraightFlush, winner: Bob },
    ClassifierCase { alice: "AhJc", bob: "5c5s", shared: "2h3h4h5d5h", alice_class: StraightFlush, bob_class: Quads, winner: Alice },
    ClassifierCase { alice: "AhJc", bob: "6hKh", shared: "2h3h4h5h5d", alice_class: StraightFlush, bob_class: StraightFlush, winner: Bob },
    ClassifierCase { alice: "7d8h", bob: "7h2c", shared: "2h3h4h5h6h", alice_class: StraightFlush, bob_class: StraightFlush, winner: Bob },
];

/// Every classifier case must match its expected class and winner exactly.
/// Prints a diff of expected vs. got and returns an error on the first
/// mismatch.
pub fn run_classifier_tests() -> Result<(), EngineError> {
    for (i, case) in CLASSIFIER_CASES.iter().enumerate() {
        let alice_cards = parse_board(case.alice)?;
        let bob_cards = parse_board(case.bob)?;
        let shared_cards = parse_board(case.shared)?;

        let alice_eval = evaluate_hand(&alice_cards, &shared_cards)?;
        let bob_eval = evaluate_hand(&bob_cards, &shared_cards)?;
        let cmp = compare_hands(&alice_cards, &bob_cards, &shared_cards)?;
        let winner = match cmp {
            1 => Alice,
            -1 => Bob,
            _ => Tie,
        };

        if alice_eval.category != case.alice_class || bob_eval.category != case.bob_class || winner != case.winner {
            println!(
                "classifier test {} ({} {} {}): expected {:?}/{:?}/{:?}, got {:?}/{:?}/{:?}",
                i, case.alice, case.bob, case.shared,
                case.alice_class, case.bob_class, case.winner,
                alice_eval.category, bob_eval.category, winner,
            );
            return Err(EngineError::InvariantViolation(format!("classifier test {i} failed")));
        }
    }
    println!("classifier test passed!");
    Ok(())
}

/// Stored anchors for the score-hash regression at known sizes.
///
/// Empty: the anchors this regression is pinned against were computed by the
/// original program's own mixer (in `score.h`, not part of this tree), and
/// `rng::mix64` is a from-scratch replacement per spec. Per the "switching
/// mixers requires refreshing the anchors simultaneously" rule, a fresh
/// anchor belongs here once it has actually been observed from this mixer
/// at a given size; until then every size takes the non-fatal
/// "unknown regression" path below.
const EXPECTED_SCORE_HASH: &[(usize, u64)] = &[];

/// Stored anchors for the matchup-hash regression at known sizes. Empty for
/// the same reason as `EXPECTED_SCORE_HASH`.
const EXPECTED_MATCHUP_HASH: &[(usize, u64)] = &[];

/// Score `multiple * 2^17` deterministic pseudo-random 7-card hands, hash
/// the scores together, and compare to the stored anchor for `multiple` if
/// one is known.
pub fn run_score_regression(multiple: usize) -> Result<(), EngineError> {
    let count = multiple << 17;
    println!("score test: scoring {count} hands");

    let mut merged: u64 = 0;
    for i in 0..count as u64 {
        let cards = rng::mostly_random_set(rng::hash(i));
        let score = evaluate(cards);
        merged = rng::hash2(merged, score.0);
    }

    report_hash_result("score", multiple, merged, EXPECTED_SCORE_HASH)
}

/// Enumerate `n+1` deterministically sampled matchups (first forced to a
/// self-match), hash the resulting `(alice,bob,tie)` triples together, and
/// compare to the stored anchor for `n` if one is known.
pub fn run_matchup_regression(devices: &[Box<dyn ComputeDevice>], n: usize, nop: bool) -> Result<(), EngineError> {
    let pairs = matchup::regression_sample_pairs(n);
    println!("compare test: comparing {} random pairs of hands, including at least one matched pair", pairs.len());

    let outcomes = matchup::run_matchups(devices, &pairs, nop, |_, _, _, _| {})?;

    let mut signature: u64 = 0;
    for o in &outcomes {
        signature = rng::hash2(signature, rng::hash3(o.alice, o.bob, o.tie));
    }

    report_hash_result("compare", n, signature, EXPECTED_MATCHUP_HASH)
}

fn report_hash_result(label: &str, n: usize, got: u64, anchors: &[(usize, u64)]) -> Result<(), EngineError> {
    match anchors.iter().find(|(k, _)| *k == n) {
        Some((_, expected)) if *expected == got => {
            println!("{label} test passed!");
            Ok(())
        }
        Some((_, expected)) => {
            println!("{label} test: expected 0x{expected:016x}, got 0x{got:016x}");
            Err(EngineError::InvariantViolation(format!("{label} regression hash mismatch at n={n}")))
        }
        None => {
            // Unknown-size path: report, don't fail.
            println!("{label} test: expected value for n = {n} not known, got 0x{got:016x}");
            Ok(())
        }
    }
}
