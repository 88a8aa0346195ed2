//! Exact heads-up Texas Hold'em preflop equity: given two starting hands,
//! enumerate every possible board and tally win/loss/tie outcomes over a
//! 7-card evaluator. See `cli` for the executable surface.

pub mod card_encoding;
pub mod cards;
pub mod cli;
pub mod device;
pub mod display;
pub mod error;
pub mod five_subset;
pub mod hand_evaluator;
pub mod kernel;
pub mod matchup;
pub mod memoiser;
pub mod regression;
pub mod rng;
pub mod timing;
