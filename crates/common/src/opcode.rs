//! Opcode tags for the IR instruction set.

use std::fmt;

/// Identifies the kind of an [`Instruction`](crate::Instruction).
///
/// `FUNCTION` and `LABEL` lines both produce [`Opcode::Label`]; assignment
/// lines produce [`Opcode::Mov`], [`Opcode::Arith`] or [`Opcode::Call`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Jump target or function entry. No-op at run time.
    Label,
    /// Unconditional jump.
    Goto,
    /// Return from the current function, or exit from `main`.
    Return,
    /// Pop the next input value into a variable.
    Read,
    /// Append a value to the output.
    Write,
    /// Push an argument for the next call.
    Arg,
    /// Pop an argument into a parameter variable.
    Param,
    /// Array declaration. No-op at run time.
    Dec,
    /// Conditional jump.
    If,
    /// `dst := src`
    Mov,
    /// `dst := a op b`
    Arith,
    /// `dst := CALL fn`
    Call,
}

/// All opcodes, in definition order.
pub const ALL_OPCODES: [Opcode; 12] = [
    Opcode::Label,
    Opcode::Goto,
    Opcode::Return,
    Opcode::Read,
    Opcode::Write,
    Opcode::Arg,
    Opcode::Param,
    Opcode::Dec,
    Opcode::If,
    Opcode::Mov,
    Opcode::Arith,
    Opcode::Call,
];

impl Opcode {
    /// Upper-case mnemonic used in traces and diagnostics.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Label => "LABEL",
            Opcode::Goto => "GOTO",
            Opcode::Return => "RETURN",
            Opcode::Read => "READ",
            Opcode::Write => "WRITE",
            Opcode::Arg => "ARG",
            Opcode::Param => "PARAM",
            Opcode::Dec => "DEC",
            Opcode::If => "IF",
            Opcode::Mov => "MOV",
            Opcode::Arith => "ARITH",
            Opcode::Call => "CALL",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn mnemonics_are_unique() {
        let names: HashSet<_> = ALL_OPCODES.iter().map(|op| op.mnemonic()).collect();
        assert_eq!(names.len(), ALL_OPCODES.len());
    }

    #[test]
    fn display_uses_mnemonic() {
        assert_eq!(Opcode::Arith.to_string(), "ARITH");
        assert_eq!(Opcode::Label.to_string(), "LABEL");
    }
}
