//! Relational and arithmetic operator tables.

use std::fmt;
use std::str::FromStr;

use crate::error::OperandError;

/// Relational operator of an `IF` instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelOp {
    Gt,
    Lt,
    Ge,
    Le,
    Eq,
    Ne,
}

/// All relational operators, in source-table order.
pub const ALL_RELOPS: [RelOp; 6] = [
    RelOp::Gt,
    RelOp::Lt,
    RelOp::Ge,
    RelOp::Le,
    RelOp::Eq,
    RelOp::Ne,
];

impl RelOp {
    /// Source spelling.
    pub fn symbol(self) -> &'static str {
        match self {
            RelOp::Gt => ">",
            RelOp::Lt => "<",
            RelOp::Ge => ">=",
            RelOp::Le => "<=",
            RelOp::Eq => "==",
            RelOp::Ne => "!=",
        }
    }

    /// Evaluate `lhs op rhs`.
    pub fn holds(self, lhs: i32, rhs: i32) -> bool {
        match self {
            RelOp::Gt => lhs > rhs,
            RelOp::Lt => lhs < rhs,
            RelOp::Ge => lhs >= rhs,
            RelOp::Le => lhs <= rhs,
            RelOp::Eq => lhs == rhs,
            RelOp::Ne => lhs != rhs,
        }
    }
}

/// Arithmetic operator of an assignment.
///
/// Evaluation lives in the VM because division depends on the configured
/// rounding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// All arithmetic operators, in source-table order.
pub const ALL_ARITH_OPS: [ArithOp; 4] = [ArithOp::Add, ArithOp::Sub, ArithOp::Mul, ArithOp::Div];

impl ArithOp {
    /// Source spelling.
    pub fn symbol(self) -> &'static str {
        match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        }
    }
}

impl FromStr for RelOp {
    type Err = OperandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_RELOPS
            .iter()
            .find(|op| op.symbol() == s)
            .copied()
            .ok_or_else(|| OperandError::UnknownOperator(s.to_string()))
    }
}

impl FromStr for ArithOp {
    type Err = OperandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_ARITH_OPS
            .iter()
            .find(|op| op.symbol() == s)
            .copied()
            .ok_or_else(|| OperandError::UnknownOperator(s.to_string()))
    }
}

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
