//! Console text and exit codes for run results.

use irsim_vm::{Exit, Outcome, RuntimeError};

/// Exit code for unreadable files and load failures.
pub const EXIT_LOAD: i32 = 1;

/// Process exit code for a halting classification.
pub fn exit_code(outcome: Outcome) -> i32 {
    match outcome {
        Outcome::NormalExit => 0,
        Outcome::IllegalMemoryAccess => 2,
        Outcome::ProgramCounterOutOfBounds => 3,
        Outcome::Timeout => 4,
        Outcome::InputExhausted => 5,
    }
}

/// Stdout report for a normal exit.
pub fn normal_exit(exit: &Exit) -> String {
    format!(
        "Program has exited gracefully.\nTotal instructions = {}\nOutput: {}\n",
        exit.instructions,
        exit.output_text()
    )
}

/// Warning for input no `READ` consumed.
pub fn leftover_input(exit: &Exit) -> Option<String> {
    if exit.remaining_input.is_empty() {
        return None;
    }
    let values: Vec<String> = exit.remaining_input.iter().map(i32::to_string).collect();
    Some(format!(
        "warning: program exited with input remaining: {}",
        values.join(" ")
    ))
}

/// Stderr report for a run that did not exit normally.
pub fn failure(err: &RuntimeError) -> String {
    match err {
        RuntimeError::ProgramCounterOutOfBounds { .. } => {
            format!("error: {err}; the program was terminated")
        }
        RuntimeError::Timeout { .. } => {
            format!("error: {err}; check for an endless loop or pass a larger --timeout")
        }
        _ => format!("error: {err}"),
    }
}
