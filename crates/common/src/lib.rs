//! IRSim common types.
//!
//! This crate provides the data model shared by the loader and the VM:
//!
//! - [`Instruction`]: the closed set of IR instructions
//! - [`Opcode`]: instruction tags
//! - [`Operand`] / [`Dest`]: addressing modes
//! - [`RelOp`] / [`ArithOp`]: operator tables
//! - [`Symbol`]: variable storage descriptors
//! - [`Program`]: instructions plus symbol, label and function tables
//! - [`OperandError`]: token-level parse errors

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod operand;
pub mod operator;
pub mod program;
pub mod symbol;

pub use error::OperandError;
pub use instruction::Instruction;
pub use opcode::Opcode;
pub use operand::{Dest, Operand};
pub use operator::{ArithOp, RelOp};
pub use program::{Program, Statement};
pub use symbol::Symbol;

/// Bytes per memory word.
pub const WORD_SIZE: i32 = 4;

/// Number of words of physical memory.
pub const MEMORY_WORDS: usize = 262_144;

/// Largest static layout, in bytes, that `main` may claim.
pub const ADDRESS_SPACE: i32 = 1_048_576;
