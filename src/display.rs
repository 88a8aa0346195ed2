//! Textual output: the exact `hands = ...` and per-matchup win/tie/lose
//! grammar downstream tooling parses, plus a couple of harmless niceties
//! (color, a closing summary table) layered on top.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};

use crate::cards::CANONICAL_HANDS;
use crate::memoiser::Outcomes;

/// `hands = <169 canonical hand names space-separated>`.
pub fn print_hands_line() {
    let names: Vec<String> = CANONICAL_HANDS.iter().map(|h| h.to_string()).collect();
    println!("hands = {}", names.join(" "));
}

/// One matchup's verbose form: a header line plus the three
/// `Label: w/t = f` lines.
pub fn print_matchup<A, B>(alice: A, bob: B, outcomes: &Outcomes)
where
    A: std::fmt::Display,
    B: std::fmt::Display,
{
    let total = outcomes.total();
    println!("{} vs. {}:", alice.to_string().cyan(), bob.to_string().magenta());
    print_outcome_line("Alice", outcomes.alice, total);
    print_outcome_line("Bob", outcomes.bob, total);
    print_outcome_line("Tie", outcomes.tie, total);
}

fn print_outcome_line(label: &str, count: u64, total: u64) {
    let ratio = count as f64 / total as f64;
    println!("  {label}: {count}/{total} = {ratio}");
}

/// A final aggregate table for batched runs (`some`/`all`): a summary for
/// humans watching a long sweep finish.
pub fn print_summary(label: &str, outcomes: &[Outcomes]) {
    if outcomes.is_empty() {
        return;
    }
    let total_alice: u64 = outcomes.iter().map(|o| o.alice).sum();
    let total_bob: u64 = outcomes.iter().map(|o| o.bob).sum();
    let total_tie: u64 = outcomes.iter().map(|o| o.tie).sum();
    let grand_total = total_alice + total_bob + total_tie;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["matchups", "alice wins", "bob wins", "ties"]);
    table.add_row(vec![
        outcomes.len().to_string(),
        format!("{:.4}%", 100.0 * total_alice as f64 / grand_total as f64),
        format!("{:.4}%", 100.0 * total_bob as f64 / grand_total as f64),
        format!("{:.4}%", 100.0 * total_tie as f64 / grand_total as f64),
    ]);
    println!("\n{} summary:", label.bold());
    println!("{table}");
}
