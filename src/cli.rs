//! Command-line surface: global device-selection/`--nop` flags plus the
//! `hands` / `test` / `some` / `all` subcommands.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

use crate::device::{discover_devices, DeviceSelection};
use crate::display;
use crate::error::EngineError;
use crate::matchup;
use crate::regression;
use crate::timing;

#[derive(Parser, Debug)]
#[command(name = "holdem-equity", about = "Exact heads-up Texas Hold'em preflop equity")]
struct Cli {
    /// Use all compute devices (default).
    #[arg(short = 'a', long = "all", group = "device")]
    all: bool,

    /// GPU devices only.
    #[arg(short = 'g', long = "gpu", group = "device")]
    gpu: bool,

    /// CPU devices only.
    #[arg(short = 'c', long = "cpu", group = "device")]
    cpu: bool,

    /// Run the full traversal but skip per-subset evaluation (overhead-only).
    #[arg(short = 'n', long = "nop")]
    nop: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the 169 canonical starting hands.
    Hands,
    /// Run the classifier and hash-regression test suite at size `n`.
    Test { n: Option<usize> },
    /// Compute equities for `n` deterministically sampled random matchups.
    Some { n: Option<usize> },
    /// Compute equities for all 14,365 unordered matchups.
    All,
}

impl Cli {
    fn device_selection(&self) -> DeviceSelection {
        if self.gpu {
            DeviceSelection::Gpu
        } else if self.cpu {
            DeviceSelection::Cpu
        } else {
            DeviceSelection::All
        }
    }
}

/// Parse arguments and run. Returns the process exit code rather than
/// calling `process::exit` directly so the whole thing stays testable.
pub fn run() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // clap's own Display already includes usage; exit 1 for usage
            // errors rather than clap's default of 2, matching every other
            // failure this binary can report.
            eprint!("{e}");
            return ExitCode::from(1);
        }
    };

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn execute(cli: &Cli) -> Result<(), EngineError> {
    let _timer = timing::scope("all");
    let devices = discover_devices(cli.device_selection())?;

    match &cli.command {
        Command::Hands => {
            display::print_hands_line();
            Ok(())
        }
        Command::Test { n } => {
            let n = n.unwrap_or(1);
            regression::run_classifier_tests()?;
            regression::run_matchup_regression(&devices, n, cli.nop)?;
            regression::run_score_regression(n)
        }
        Command::Some { n } => {
            let n = n.unwrap_or(10);
            let pairs = matchup::sample_pairs(n);
            let outcomes = matchup::run_matchups(&devices, &pairs, cli.nop, |_, alice, bob, o| {
                display::print_matchup(alice, bob, o);
            })?;
            display::print_summary("some", &outcomes);
            Ok(())
        }
        Command::All => {
            let pairs = matchup::all_pairs();
            let outcomes = matchup::run_matchups(&devices, &pairs, cli.nop, |_, alice, bob, o| {
                display::print_matchup(alice, bob, o);
            })?;
            display::print_summary("all", &outcomes);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_selection_defaults_to_all() {
        let cli = Cli::try_parse_from(["holdem-equity", "hands"]).unwrap();
        assert_eq!(cli.device_selection(), DeviceSelection::All);
    }

    #[test]
    fn gpu_flag_selects_gpu() {
        let cli = Cli::try_parse_from(["holdem-equity", "-g", "hands"]).unwrap();
        assert_eq!(cli.device_selection(), DeviceSelection::Gpu);
    }

    #[test]
    fn gpu_and_cpu_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["holdem-equity", "-g", "-c", "hands"]).is_err());
    }

    #[test]
    fn unknown_command_is_a_usage_error() {
        assert!(Cli::try_parse_from(["holdem-equity", "bogus"]).is_err());
    }

    #[test]
    fn test_subcommand_accepts_optional_size() {
        let cli = Cli::try_parse_from(["holdem-equity", "test", "5"]).unwrap();
        match cli.command {
            Command::Test { n } => assert_eq!(n, Some(5)),
            _ => panic!("expected Test"),
        }
    }
}
