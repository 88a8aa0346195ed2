//! The matchup driver: turns a list of (Alice, Bob) pairs into a list of
//! `Outcomes`, dispatching across the discovered devices with a shared job
//! cursor and streaming results to the caller in input order even though
//! workers may finish jobs out of order.

use std::sync::Mutex;

use crate::cards::{Hand, CANONICAL_HANDS};
use crate::device::ComputeDevice;
use crate::error::EngineError;
use crate::memoiser::{self, Outcomes};
use crate::rng;
use crate::timing;

/// All `169*170/2 = 14365` unordered matchups, including self-matchups.
/// Order: `(hands[i], hands[j])` for `j <= i`, i.e. Alice's index never
/// trails Bob's.
pub fn all_pairs() -> Vec<(Hand, Hand)> {
    let hands = &*CANONICAL_HANDS;
    let mut pairs = Vec::with_capacity(hands.len() * (hands.len() + 1) / 2);
    for i in 0..hands.len() {
        for j in 0..=i {
            pairs.push((hands[i], hands[j]));
        }
    }
    pairs
}

/// `n` deterministically sampled (Alice, Bob) pairs, independently drawn
/// (no forced self-match), for the `some` subcommand.
pub fn sample_pairs(n: usize) -> Vec<(Hand, Hand)> {
    let hands = &*CANONICAL_HANDS;
    (0..n)
        .map(|k| {
            let alice = hands[(rng::hash(2 * k as u64) as usize) % hands.len()];
            let bob = hands[(rng::hash(2 * k as u64 + 1) as usize) % hands.len()];
            (alice, bob)
        })
        .collect()
}

/// `n+1` deterministically sampled pairs for the matchup regression test,
/// with the first pair forced to a self-match.
pub fn regression_sample_pairs(n: usize) -> Vec<(Hand, Hand)> {
    let hands = &*CANONICAL_HANDS;
    (0..=n)
        .map(|i| {
            let alice = hands[(rng::hash2(i as u64, 0) as usize) % hands.len()];
            let bob = if i == 0 { alice } else { hands[(rng::hash2(i as u64, 1) as usize) % hands.len()] };
            (alice, bob)
        })
        .collect()
}

struct State {
    next_job: usize,
    results: Vec<Option<Outcomes>>,
    next_to_show: usize,
}

/// Run every pair in `pairs` across `devices`, in input order as far as the
/// caller can tell: `on_show` fires once per pair, strictly in increasing
/// index order, as soon as that pair's result (and every earlier one) is
/// ready. Returns all outcomes in input order.
///
/// A fatal error from any worker (self-consistency violation, device
/// failure) stops every worker and is returned to the caller; nothing is
/// retried.
pub fn run_matchups<F>(
    devices: &[Box<dyn ComputeDevice>],
    pairs: &[(Hand, Hand)],
    nop: bool,
    on_show: F,
) -> Result<Vec<Outcomes>, EngineError>
where
    F: FnMut(usize, Hand, Hand, &Outcomes) + Send,
{
    let n = pairs.len();
    timing::set_disabled(devices.len() > 1);

    let state = Mutex::new(State { next_job: 0, results: vec![None; n], next_to_show: 0 });
    let on_show = Mutex::new(on_show);
    let error: Mutex<Option<EngineError>> = Mutex::new(None);

    std::thread::scope(|scope| {
        for device in devices {
            scope.spawn(|| worker(device.as_ref(), pairs, nop, &state, &on_show, &error));
        }
    });

    if let Some(e) = error.into_inner().unwrap() {
        return Err(e);
    }

    let results = state.into_inner().unwrap().results;
    Ok(results.into_iter().map(|o| o.expect("every job completes before run_matchups returns")).collect())
}

fn worker<F>(
    device: &dyn ComputeDevice,
    pairs: &[(Hand, Hand)],
    nop: bool,
    state: &Mutex<State>,
    on_show: &Mutex<F>,
    error: &Mutex<Option<EngineError>>,
) where
    F: FnMut(usize, Hand, Hand, &Outcomes) + Send,
{
    let n = pairs.len();
    loop {
        if error.lock().unwrap().is_some() {
            return;
        }

        let job = {
            let mut st = state.lock().unwrap();
            if st.next_job >= n {
                return;
            }
            let job = st.next_job;
            st.next_job += 1;
            job
        };

        let (alice, bob) = pairs[job];
        let outcomes = {
            let _t = timing::scope("compare hands");
            memoiser::compare_hands(device, alice, bob, nop)
        };

        let outcomes = match outcomes {
            Ok(o) => o,
            Err(e) => {
                *error.lock().unwrap() = Some(e);
                return;
            }
        };

        let mut ready = Vec::new();
        {
            let mut st = state.lock().unwrap();
            st.results[job] = Some(outcomes);
            while st.next_to_show < n {
                let idx = st.next_to_show;
                match st.results[idx] {
                    Some(o) => {
                        ready.push((idx, pairs[idx].0, pairs[idx].1, o));
                        st.next_to_show += 1;
                    }
                    None => break,
                }
            }
        }

        if !ready.is_empty() {
            let mut cb = on_show.lock().unwrap();
            for (idx, a, b, o) in &ready {
                cb(*idx, *a, *b, o);
            }
        }
    }
}
