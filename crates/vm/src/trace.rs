//! Tracing hooks for the simulator.
//!
//! The simulator only emits events requested by a sink's [`TraceMask`].
//! Pass a sink to [`Simulator::run_traced`]; [`Simulator::run`] traces
//! nothing.
//!
//! [`Simulator::run_traced`]: crate::Simulator::run_traced
//! [`Simulator::run`]: crate::Simulator::run

use irsim_common::Statement;

use crate::outcome::Outcome;

/// A set of trace events requested by a [`TraceSink`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TraceMask(u8);

impl std::ops::BitOr for TraceMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl TraceMask {
    /// No tracing.
    pub const NONE: Self = Self(0);
    /// [`TraceSink::run_start`] and [`TraceSink::run_end`].
    pub const RUN: Self = Self(1 << 0);
    /// [`TraceSink::instr`] for every dispatched instruction.
    pub const INSTR: Self = Self(1 << 1);
    /// [`TraceSink::call`] and [`TraceSink::ret`].
    pub const CALL: Self = Self(1 << 2);
    pub const ALL: Self = Self(Self::RUN.0 | Self::INSTR.0 | Self::CALL.0);

    /// Returns `true` if this mask includes all bits in `other`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

/// Receiver for simulator events.
pub trait TraceSink {
    /// Events this sink wants.
    fn mask(&self) -> TraceMask {
        TraceMask::NONE
    }

    /// A run is starting at instruction `entry`.
    fn run_start(&mut self, _entry: usize) {}

    /// Instruction `pc` is about to be dispatched.
    fn instr(&mut self, _pc: usize, _stmt: &Statement) {}

    /// `function` was entered with its frame placed at `frame_base`.
    /// `depth` is the call depth after the call.
    fn call(&mut self, _function: &str, _frame_base: i32, _depth: usize) {}

    /// A function returned `value`; `depth` is the call depth after the
    /// return.
    fn ret(&mut self, _value: i32, _depth: usize) {}

    /// The run halted after `instructions` dispatches.
    fn run_end(&mut self, _outcome: Outcome, _instructions: u64) {}
}

/// A sink that wants nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTrace;

impl TraceSink for NoTrace {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_union() {
        let mask = TraceMask::RUN | TraceMask::CALL;
        assert!(mask.contains(TraceMask::RUN));
        assert!(mask.contains(TraceMask::CALL));
        assert!(!mask.contains(TraceMask::INSTR));
        assert!(TraceMask::ALL.contains(mask));
        assert!(mask.contains(TraceMask::NONE));
    }

    #[test]
    fn no_trace_wants_nothing() {
        assert_eq!(NoTrace.mask(), TraceMask::NONE);
    }
}
