//! Typed IR instructions.
//!
//! One instruction per non-blank source line. The `Display` impl renders the
//! canonical source form, which the loader accepts back unchanged.

use std::fmt;

use crate::opcode::Opcode;
use crate::operand::{Dest, Operand};
use crate::operator::{ArithOp, RelOp};

/// A single validated IR instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `LABEL name :` or, with `function` set, `FUNCTION name :`.
    Label { name: String, function: bool },
    /// `GOTO target`
    Goto { target: String },
    /// `RETURN value`
    Return { value: Operand },
    /// `READ dst`
    Read { dst: String },
    /// `WRITE value`
    Write { value: Operand },
    /// `ARG value`
    Arg { value: Operand },
    /// `PARAM dst`
    Param { dst: String },
    /// `DEC name size`
    Dec { name: String, size: i32 },
    /// `IF lhs op rhs GOTO target`
    If {
        lhs: Operand,
        op: RelOp,
        rhs: Operand,
        target: String,
    },
    /// `dst := src`
    Mov { dst: Dest, src: Operand },
    /// `dst := lhs op rhs`
    Arith {
        dst: Dest,
        lhs: Operand,
        op: ArithOp,
        rhs: Operand,
    },
    /// `dst := CALL function`
    Call { dst: Dest, function: String },
}

impl Instruction {
    /// The opcode tag of this instruction.
    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Label { .. } => Opcode::Label,
            Instruction::Goto { .. } => Opcode::Goto,
            Instruction::Return { .. } => Opcode::Return,
            Instruction::Read { .. } => Opcode::Read,
            Instruction::Write { .. } => Opcode::Write,
            Instruction::Arg { .. } => Opcode::Arg,
            Instruction::Param { .. } => Opcode::Param,
            Instruction::Dec { .. } => Opcode::Dec,
            Instruction::If { .. } => Opcode::If,
            Instruction::Mov { .. } => Opcode::Mov,
            Instruction::Arith { .. } => Opcode::Arith,
            Instruction::Call { .. } => Opcode::Call,
        }
    }

    /// The label or function this instruction may transfer control to.
    pub fn jump_target(&self) -> Option<&str> {
        match self {
            Instruction::Goto { target } | Instruction::If { target, .. } => Some(target),
            Instruction::Call { function, .. } => Some(function),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::Label { name, function } => {
                let kw = if *function { "FUNCTION" } else { "LABEL" };
                write!(f, "{kw} {name} :")
            }
            Instruction::Goto { target } => write!(f, "GOTO {target}"),
            Instruction::Return { value } => write!(f, "RETURN {value}"),
            Instruction::Read { dst } => write!(f, "READ {dst}"),
            Instruction::Write { value } => write!(f, "WRITE {value}"),
            Instruction::Arg { value } => write!(f, "ARG {value}"),
            Instruction::Param { dst } => write!(f, "PARAM {dst}"),
            Instruction::Dec { name, size } => write!(f, "DEC {name} {size}"),
            Instruction::If {
                lhs,
                op,
                rhs,
                target,
            } => write!(f, "IF {lhs} {op} {rhs} GOTO {target}"),
            Instruction::Mov { dst, src } => write!(f, "{dst} := {src}"),
            Instruction::Arith { dst, lhs, op, rhs } => write!(f, "{dst} := {lhs} {op} {rhs}"),
            Instruction::Call { dst, function } => write!(f, "{dst} := CALL {function}"),
        }
    }
}
