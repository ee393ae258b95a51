//! Runtime errors for the IR simulator.
//!
//! Every error ends the run. Errors raised by an instruction carry its
//! 1-based source line.

use std::time::Duration;

use thiserror::Error;

use crate::outcome::Outcome;

/// Conditions that halt a run before `main` returns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// A load or store touched a word outside physical memory.
    #[error("illegal memory access at offset {offset} (line {line})")]
    IllegalAccess { line: usize, offset: i32 },

    /// `PARAM` with nothing on the argument stack.
    #[error("PARAM without a pending argument at line {line}")]
    ArgumentUnderflow { line: usize },

    /// The instruction pointer left the program.
    #[error("program counter {pc} went out of bounds")]
    ProgramCounterOutOfBounds { pc: i64 },

    /// A jump or call named a label the program does not define.
    ///
    /// Only reachable for programs that were not built by the loader.
    #[error("jump to unknown label {name} at line {line}")]
    UnknownLabel { line: usize, name: String },

    /// The wall-clock budget ran out.
    #[error("program ran for more than {limit:?}")]
    Timeout { limit: Duration },

    /// `READ` with an empty input queue.
    #[error("input exhausted at line {line}")]
    InputExhausted { line: usize },
}

impl RuntimeError {
    /// Halting classification of this error.
    pub fn outcome(&self) -> Outcome {
        match self {
            RuntimeError::IllegalAccess { .. } | RuntimeError::ArgumentUnderflow { .. } => {
                Outcome::IllegalMemoryAccess
            }
            RuntimeError::ProgramCounterOutOfBounds { .. } | RuntimeError::UnknownLabel { .. } => {
                Outcome::ProgramCounterOutOfBounds
            }
            RuntimeError::Timeout { .. } => Outcome::Timeout,
            RuntimeError::InputExhausted { .. } => Outcome::InputExhausted,
        }
    }

    /// Source line of the faulting instruction, if there is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            RuntimeError::IllegalAccess { line, .. }
            | RuntimeError::ArgumentUnderflow { line }
            | RuntimeError::UnknownLabel { line, .. }
            | RuntimeError::InputExhausted { line } => Some(*line),
            RuntimeError::ProgramCounterOutOfBounds { .. } | RuntimeError::Timeout { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats() {
        assert_eq!(
            RuntimeError::IllegalAccess {
                line: 5,
                offset: -1
            }
            .to_string(),
            "illegal memory access at offset -1 (line 5)"
        );
        assert_eq!(
            RuntimeError::ProgramCounterOutOfBounds { pc: 3 }.to_string(),
            "program counter 3 went out of bounds"
        );
        assert_eq!(
            RuntimeError::Timeout {
                limit: Duration::from_secs(10)
            }
            .to_string(),
            "program ran for more than 10s"
        );
    }

    #[test]
    fn classification() {
        assert_eq!(
            RuntimeError::ArgumentUnderflow { line: 1 }.outcome(),
            Outcome::IllegalMemoryAccess
        );
        assert_eq!(
            RuntimeError::UnknownLabel {
                line: 1,
                name: "x".to_string()
            }
            .outcome(),
            Outcome::ProgramCounterOutOfBounds
        );
        assert_eq!(
            RuntimeError::InputExhausted { line: 2 }.outcome(),
            Outcome::InputExhausted
        );
    }

    #[test]
    fn line_accessor() {
        assert_eq!(RuntimeError::InputExhausted { line: 9 }.line(), Some(9));
        assert_eq!(
            RuntimeError::ProgramCounterOutOfBounds { pc: -1 }.line(),
            None
        );
    }
}
