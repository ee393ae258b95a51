//! IR simulator: executes programs produced by `irsim-loader`.
//!
//! The machine has:
//! - 1 MiB of word-addressed memory, zeroed on every run
//! - A symbol table binding each variable to a byte offset, rebound on `CALL`
//! - A call stack of saved bindings, and a LIFO argument stack for `ARG`/`PARAM`
//!
//! # Usage
//!
//! ```
//! use irsim_vm::{run, Config};
//!
//! let program = irsim_loader::load("FUNCTION main :\nREAD x\nWRITE x\nRETURN #0\n").unwrap();
//! let exit = run(&program, vec![7], Config::default()).unwrap();
//! assert_eq!(exit.output, vec![7]);
//! assert_eq!(exit.instructions, 3);
//! ```

pub mod config;
pub mod error;
pub mod execute;
pub mod machine;
pub mod memory;
pub mod outcome;
pub mod trace;

pub use config::{Config, DivisionMode, DEFAULT_TIMEOUT};
pub use error::RuntimeError;
pub use execute::arith;
pub use machine::{CallFrame, Simulator, State};
pub use memory::{Memory, MemoryFault};
pub use outcome::{Exit, Outcome};
pub use trace::{NoTrace, TraceMask, TraceSink};

use irsim_common::Program;

/// Run a program once with the given input.
///
/// # Errors
///
/// Returns [`RuntimeError`] if the run halts for any reason other than
/// `main` returning.
pub fn run(program: &Program, input: Vec<i32>, config: Config) -> Result<Exit, RuntimeError> {
    Simulator::new(program, input, config).run()
}
