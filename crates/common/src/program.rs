//! A loaded IR program: instruction list plus symbol, label and function
//! tables.

use std::collections::HashMap;
use std::fmt;

use crate::instruction::Instruction;
use crate::symbol::Symbol;

/// An instruction together with where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub instruction: Instruction,
    /// 1-based raw source line number.
    pub line: usize,
    /// Source text of the line, without the line terminator.
    pub text: String,
}

/// A validated, label-resolved IR program.
///
/// Built by the loader and immutable afterwards. The VM copies `symbols` at
/// the start of each run and mutates its copy as frames come and go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    /// Instructions in source order. Index is the jump target space.
    pub statements: Vec<Statement>,
    /// Load-time symbol table. Only `main` variables are placed.
    pub symbols: HashMap<String, Symbol>,
    /// Label and function name → instruction index.
    pub labels: HashMap<String, usize>,
    /// Function name → variables first referenced in its body, in order.
    pub functions: HashMap<String, Vec<String>>,
    /// Instruction index of `FUNCTION main :`.
    pub entry: usize,
    /// Bytes used by `main`'s static layout; where the bump allocator starts.
    pub static_size: i32,
}

impl Program {
    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Instruction index of a label or function.
    pub fn label(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }

    /// Variables owned by a function, in first-reference order.
    pub fn locals(&self, function: &str) -> &[String] {
        self.functions
            .get(function)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Canonical listing, one instruction per line.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for stmt in &self.statements {
            writeln!(f, "{}", stmt.instruction)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operand::Operand;

    fn program() -> Program {
        let statements = vec![
            Statement {
                instruction: Instruction::Label {
                    name: "main".to_string(),
                    function: true,
                },
                line: 1,
                text: "FUNCTION main :".to_string(),
            },
            Statement {
                instruction: Instruction::Return {
                    value: Operand::Imm(0),
                },
                line: 3,
                text: "  RETURN   #0".to_string(),
            },
        ];
        Program {
            statements,
            labels: HashMap::from([("main".to_string(), 0)]),
            functions: HashMap::from([("main".to_string(), Vec::new())]),
            ..Program::default()
        }
    }

    #[test]
    fn empty_program() {
        let p = Program::default();
        assert!(p.is_empty());
        assert_eq!(p.len(), 0);
        assert_eq!(p.to_string(), "");
    }

    #[test]
    fn lookups() {
        let p = program();
        assert_eq!(p.len(), 2);
        assert_eq!(p.label("main"), Some(0));
        assert_eq!(p.label("nope"), None);
        assert!(p.locals("main").is_empty());
        assert!(p.locals("nope").is_empty());
    }

    #[test]
    fn listing_is_canonical() {
        assert_eq!(program().to_string(), "FUNCTION main :\nRETURN #0\n");
    }
}
