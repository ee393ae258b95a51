//! Error types for the IR loader.

use irsim_common::ADDRESS_SPACE;
use thiserror::Error;

/// Errors produced while loading IR text.
///
/// Every load error is fatal: loading stops at the first one. Line-bearing
/// variants carry the 1-based source line and its text (trimmed).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    /// The line does not match any instruction form.
    #[error("syntax error at line {line} ({reason}): {text}")]
    Syntax {
        line: usize,
        text: String,
        reason: String,
    },

    /// A label or function name was declared twice.
    #[error("duplicated label {name} at line {line}: {text}")]
    DuplicateLabel {
        name: String,
        line: usize,
        text: String,
    },

    /// `DEC` of a name that is already in the symbol table.
    #[error("duplicated variable {name} at line {line}: {text}")]
    DuplicateVariable {
        name: String,
        line: usize,
        text: String,
    },

    /// An instruction appeared before the first `FUNCTION`.
    #[error("line {line} does not belong to any function: {text}")]
    OutsideFunction { line: usize, text: String },

    /// `GOTO`, `IF` or `CALL` names a label that was never declared.
    #[error("undefined label {name} at line {line}: {text}")]
    UndefinedLabel {
        name: String,
        line: usize,
        text: String,
    },

    /// No `FUNCTION main :` in the program.
    #[error("cannot find program entrance; make sure the 'main' function exists")]
    MissingEntry,

    /// `main`'s static layout does not fit in the address space.
    #[error(
        "static data needs {size} bytes, more than the {limit}-byte address space",
        limit = ADDRESS_SPACE
    )]
    OffsetOverflow { size: i32 },
}

impl LoadError {
    /// Source line of the failure, if it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoadError::Syntax { line, .. }
            | LoadError::DuplicateLabel { line, .. }
            | LoadError::DuplicateVariable { line, .. }
            | LoadError::OutsideFunction { line, .. }
            | LoadError::UndefinedLabel { line, .. } => Some(*line),
            LoadError::MissingEntry | LoadError::OffsetOverflow { .. } => None,
        }
    }
}
