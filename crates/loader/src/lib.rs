//! IR loader: validates IR text and builds a runnable [`Program`].
//!
//! Loading is fail-fast: the first problem aborts the whole load.
//!
//! # Usage
//!
//! ```
//! use irsim_loader::load;
//!
//! let program = load("FUNCTION main :\nREAD x\nWRITE x\nRETURN #0\n").unwrap();
//! assert_eq!(program.entry, 0);
//! assert_eq!(program.len(), 4);
//! ```
//!
//! # Passes
//!
//! 1. **Validation**: each non-blank line is matched against the grammar;
//!    symbols, labels and function locals are registered as a side effect
//! 2. **Entry**: `FUNCTION main :` must exist
//! 3. **Resolution**: every jump and call target must be a declared label
//! 4. **Layout**: `main`'s static data must fit in the address space

pub mod error;

mod lexer;
mod parser;
mod resolve;

pub use error::LoadError;

use irsim_common::Program;
use lexer::source_lines;
use parser::Parser;

/// Load IR text into a program.
///
/// Returns the first error encountered.
pub fn load(text: &str) -> Result<Program, LoadError> {
    let mut parser = Parser::new();
    for line in source_lines(text) {
        parser.parse_line(&line)?;
    }
    let parsed = parser.finish();

    let entry = parsed.entry.ok_or(LoadError::MissingEntry)?;
    resolve::check_labels(&parsed.statements, &parsed.labels)?;
    resolve::check_layout(parsed.static_size)?;

    Ok(Program {
        statements: parsed.statements,
        symbols: parsed.symbols,
        labels: parsed.labels,
        functions: parsed.functions,
        entry,
        static_size: parsed.static_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use irsim_common::{Instruction, Opcode};

    #[test]
    fn load_minimal() {
        let program = load("FUNCTION main :\nRETURN #0\n").unwrap();
        assert_eq!(program.len(), 2);
        assert_eq!(program.entry, 0);
        assert_eq!(program.statements[1].instruction.opcode(), Opcode::Return);
    }

    #[test]
    fn entry_after_other_functions() {
        let program =
            load("FUNCTION f :\nRETURN #1\n\nFUNCTION main :\nx := CALL f\nRETURN #0\n").unwrap();
        assert_eq!(program.entry, 2);
        assert_eq!(program.label("f"), Some(0));
    }

    #[test]
    fn labels_index_instructions_not_lines() {
        let program = load("FUNCTION main :\n\n\nLABEL l1 :\nGOTO l1\n").unwrap();
        assert_eq!(program.label("l1"), Some(1));
        assert_eq!(program.statements[1].line, 4);
    }

    #[test]
    fn forward_reference_resolves() {
        let program = load("FUNCTION main :\nGOTO end\nLABEL end :\nRETURN #0\n").unwrap();
        assert_eq!(program.label("end"), Some(2));
    }

    #[test]
    fn error_missing_entry() {
        assert_eq!(load(""), Err(LoadError::MissingEntry));
        assert_eq!(
            load("FUNCTION f :\nRETURN #0\n"),
            Err(LoadError::MissingEntry)
        );
    }

    #[test]
    fn error_undefined_label() {
        let err = load("FUNCTION main :\nGOTO undefined_label\nRETURN #0\n").unwrap_err();
        assert_eq!(
            err,
            LoadError::UndefinedLabel {
                name: "undefined_label".to_string(),
                line: 2,
                text: "GOTO undefined_label".to_string(),
            }
        );
    }

    #[test]
    fn error_undefined_call_target() {
        let err = load("FUNCTION main :\nr := CALL nowhere\nRETURN r\n").unwrap_err();
        assert!(matches!(err, LoadError::UndefinedLabel { line: 2, .. }));
    }

    #[test]
    fn syntax_error_beats_missing_entry() {
        let err = load("FUNCTION f :\nx := \n").unwrap_err();
        assert!(matches!(err, LoadError::Syntax { line: 2, .. }));
    }

    #[test]
    fn error_offset_overflow() {
        let err = load("FUNCTION main :\nDEC big 1048576\nx := #1\nRETURN #0\n").unwrap_err();
        assert_eq!(err, LoadError::OffsetOverflow { size: 1_048_580 });
    }

    #[test]
    fn whole_address_space_usable() {
        let program = load("FUNCTION main :\nDEC big 1048576\nRETURN #0\n").unwrap();
        assert_eq!(program.static_size, 1_048_576);
    }

    #[test]
    fn listing_round_trips() {
        let text = "FUNCTION main :\nREAD n\nIF n == #0 GOTO done\nt1 := n * #2\nWRITE t1\nLABEL done :\nRETURN #0\n";
        let program = load(text).unwrap();
        assert_eq!(program.to_string(), text);
        assert!(matches!(
            program.statements[2].instruction,
            Instruction::If { .. }
        ));
    }
}
