//! The `irsim` run command.

use std::fs;

use irsim_vm::{Config, Simulator};

use crate::report;
use crate::trace::TraceLog;
use crate::Cli;

/// Load and run the program named on the command line.
pub fn run(cli: &Cli) -> Result<(), i32> {
    let path = cli.input.display();
    let text = fs::read_to_string(&cli.input).map_err(|e| {
        eprintln!("error: cannot read '{path}': {e}");
        report::EXIT_LOAD
    })?;

    let program = irsim_loader::load(&text).map_err(|e| {
        eprintln!("error: {e}");
        report::EXIT_LOAD
    })?;

    let mut config = Config::default();
    if cli.cdiv {
        config = config.truncating();
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(timeout);
    }

    let mut sim = Simulator::new(&program, cli.numbers.clone(), config);
    let result = if cli.trace {
        sim.run_traced(&mut TraceLog::stderr())
    } else {
        sim.run()
    };

    match result {
        Ok(exit) => {
            if let Some(warning) = report::leftover_input(&exit) {
                eprintln!("{warning}");
            }
            print!("{}", report::normal_exit(&exit));
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", report::failure(&e));
            Err(report::exit_code(e.outcome()))
        }
    }
}
