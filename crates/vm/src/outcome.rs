//! Halting classification and the result of a normal exit.

use std::fmt;

use crate::error::RuntimeError;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// `RETURN` from `main`.
    NormalExit,
    IllegalMemoryAccess,
    ProgramCounterOutOfBounds,
    Timeout,
    InputExhausted,
}

impl Outcome {
    /// Classify a run result.
    pub fn of(result: &Result<Exit, RuntimeError>) -> Self {
        match result {
            Ok(_) => Outcome::NormalExit,
            Err(e) => e.outcome(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Outcome::NormalExit => "normal exit",
            Outcome::IllegalMemoryAccess => "illegal memory access",
            Outcome::ProgramCounterOutOfBounds => "program counter out of bounds",
            Outcome::Timeout => "timeout",
            Outcome::InputExhausted => "input exhausted",
        };
        f.write_str(name)
    }
}

/// What a program leaves behind when `main` returns.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Exit {
    /// Instructions dispatched, including the final `RETURN`.
    pub instructions: u64,
    /// Values written by `WRITE`, in order.
    pub output: Vec<i32>,
    /// Input values no `READ` consumed.
    pub remaining_input: Vec<i32>,
}

impl Exit {
    /// Output as space-separated decimal text.
    pub fn output_text(&self) -> String {
        self.output
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_results() {
        assert_eq!(Outcome::of(&Ok(Exit::default())), Outcome::NormalExit);
        assert_eq!(
            Outcome::of(&Err(RuntimeError::IllegalAccess { line: 1, offset: 0 })),
            Outcome::IllegalMemoryAccess
        );
    }

    #[test]
    fn output_text_joins_values() {
        let exit = Exit {
            instructions: 4,
            output: vec![5, -3, 0],
            remaining_input: vec![],
        };
        assert_eq!(exit.output_text(), "5 -3 0");
        assert_eq!(Exit::default().output_text(), "");
    }
}
