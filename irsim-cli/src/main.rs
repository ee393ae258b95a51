//! irsim CLI: load a three-address IR program and run it.
//!
//! Exit codes:
//! - 0: Normal exit (leftover input only warns)
//! - 1: Usage error, unreadable file or load failure
//! - 2: Illegal memory access
//! - 3: Program counter out of bounds
//! - 4: Timeout
//! - 5: Input exhausted

mod commands;
mod report;
mod trace;

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(
    name = "irsim",
    version,
    about = "Run a three-address IR program",
    long_about = "Run a three-address IR program.

NUMBERS are queued as input for READ, consumed left to right.
Division rounds toward negative infinity unless -c/--cdiv is given.
Division by zero yields 0."
)]
pub struct Cli {
    /// IR source file.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Input values for READ.
    #[arg(value_name = "NUMBERS", allow_negative_numbers = true)]
    pub numbers: Vec<i32>,

    /// Use C-style division, truncating toward zero.
    #[arg(short = 'c', long = "cdiv", action = ArgAction::SetTrue)]
    pub cdiv: bool,

    /// Wall-clock budget in seconds.
    #[arg(long, value_name = "SECS", value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Print executed instructions, calls and returns to stderr.
    #[arg(long, action = ArgAction::SetTrue)]
    pub trace: bool,
}

fn parse_timeout(text: &str) -> Result<Duration, String> {
    let secs: f64 = text
        .parse()
        .map_err(|_| format!("'{text}' is not a number of seconds"))?;
    if secs <= 0.0 {
        return Err(format!("timeout must be positive, got {text}"));
    }
    Duration::try_from_secs_f64(secs).map_err(|e| e.to_string())
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // clap's own usage exit code would collide with ours.
            process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };

    if let Err(code) = commands::run(&cli) {
        process::exit(code);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_parsing() {
        assert_eq!(parse_timeout("2"), Ok(Duration::from_secs(2)));
        assert_eq!(parse_timeout("0.5"), Ok(Duration::from_millis(500)));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("-1").is_err());
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    fn negative_numbers_are_input() {
        let cli = Cli::try_parse_from(["irsim", "prog.ir", "3", "-4", "-c"]).unwrap();
        assert_eq!(cli.numbers, vec![3, -4]);
        assert!(cli.cdiv);
        assert!(!cli.trace);
        assert_eq!(cli.timeout, None);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
