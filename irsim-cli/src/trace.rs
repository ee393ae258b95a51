//! `--trace` output: one line per simulator event.

use std::io::{self, Write};

use irsim_common::Statement;
use irsim_vm::{Outcome, TraceMask, TraceSink};

/// Writes trace events as text. Write errors are ignored.
pub struct TraceLog<W: Write> {
    out: W,
}

impl TraceLog<io::Stderr> {
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> TraceLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> TraceSink for TraceLog<W> {
    fn mask(&self) -> TraceMask {
        TraceMask::ALL
    }

    fn run_start(&mut self, entry: usize) {
        let _ = writeln!(self.out, "[trace] enter main at {entry}");
    }

    fn instr(&mut self, pc: usize, stmt: &Statement) {
        let _ = writeln!(
            self.out,
            "[trace] {pc:>5} line {:<5} {:<6} {}",
            stmt.line,
            stmt.instruction.opcode().mnemonic(),
            stmt.instruction
        );
    }

    fn call(&mut self, function: &str, frame_base: i32, depth: usize) {
        let _ = writeln!(
            self.out,
            "[trace] call {function} frame={frame_base} depth={depth}"
        );
    }

    fn ret(&mut self, value: i32, depth: usize) {
        let _ = writeln!(self.out, "[trace] return {value} depth={depth}");
    }

    fn run_end(&mut self, outcome: Outcome, instructions: u64) {
        let _ = writeln!(
            self.out,
            "[trace] {outcome} after {instructions} instructions"
        );
    }
}
