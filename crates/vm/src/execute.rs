//! Main execution loop and instruction dispatch.

use irsim_common::{ArithOp, Instruction};

use crate::config::DivisionMode;
use crate::error::RuntimeError;
use crate::machine::{CallFrame, Simulator, State};
use crate::memory::MemoryFault;
use crate::outcome::{Exit, Outcome};
use crate::trace::{NoTrace, TraceMask, TraceSink};

/// Where control goes after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Next,
    /// Continue after the label at this index.
    Jump(usize),
    Exit,
}

/// A failed instruction, before the source line is attached.
#[derive(Debug)]
enum Fault {
    Memory(MemoryFault),
    InputExhausted,
    ArgumentUnderflow,
    UnknownLabel(String),
}

impl From<MemoryFault> for Fault {
    fn from(fault: MemoryFault) -> Self {
        Fault::Memory(fault)
    }
}

impl Fault {
    fn at(self, line: usize) -> RuntimeError {
        match self {
            Fault::Memory(MemoryFault { offset }) => RuntimeError::IllegalAccess { line, offset },
            Fault::InputExhausted => RuntimeError::InputExhausted { line },
            Fault::ArgumentUnderflow => RuntimeError::ArgumentUnderflow { line },
            Fault::UnknownLabel(name) => RuntimeError::UnknownLabel { line, name },
        }
    }
}

impl<'a> Simulator<'a> {
    /// Run the program from `main` until it exits or halts.
    pub fn run(&mut self) -> Result<Exit, RuntimeError> {
        self.run_traced(&mut NoTrace)
    }

    /// Like [`Simulator::run`], reporting events to `sink`.
    pub fn run_traced(&mut self, sink: &mut dyn TraceSink) -> Result<Exit, RuntimeError> {
        if self.state != State::Ready {
            self.stop();
        }
        let mask = sink.mask();
        let entry = self.program.entry;
        if mask.contains(TraceMask::RUN) {
            sink.run_start(entry);
        }

        self.state = State::Running;
        self.started = std::time::Instant::now();
        // Entering main behaves like a jump to its label.
        self.pc = entry as i64 + 1;
        let result = self.execute(sink, mask);

        let outcome = Outcome::of(&result);
        self.state = State::Halted(outcome);
        if mask.contains(TraceMask::RUN) {
            sink.run_end(outcome, self.instructions);
        }
        result
    }

    fn execute(&mut self, sink: &mut dyn TraceSink, mask: TraceMask) -> Result<Exit, RuntimeError> {
        let program = self.program;
        loop {
            let pc = usize::try_from(self.pc)
                .ok()
                .filter(|&pc| pc < program.len())
                .ok_or(RuntimeError::ProgramCounterOutOfBounds { pc: self.pc })?;
            let stmt = &program.statements[pc];
            if mask.contains(TraceMask::INSTR) {
                sink.instr(pc, stmt);
            }

            self.instructions += 1;
            let step = self.dispatch(pc, &stmt.instruction, sink, mask);

            // A timed-out step halts as a timeout whatever it did.
            if self.started.elapsed() > self.config.timeout {
                return Err(RuntimeError::Timeout {
                    limit: self.config.timeout,
                });
            }

            match step.map_err(|fault| fault.at(stmt.line))? {
                Flow::Next => self.pc += 1,
                Flow::Jump(target) => self.pc = target as i64 + 1,
                Flow::Exit => {
                    return Ok(Exit {
                        instructions: self.instructions,
                        output: self.output.clone(),
                        remaining_input: self.pending.iter().copied().collect(),
                    })
                }
            }
        }
    }

    fn dispatch(
        &mut self,
        pc: usize,
        instr: &'a Instruction,
        sink: &mut dyn TraceSink,
        mask: TraceMask,
    ) -> Result<Flow, Fault> {
        match instr {
            Instruction::Label { .. } | Instruction::Dec { .. } => {}
            Instruction::Goto { target } => return self.jump(target),
            Instruction::If {
                lhs,
                op,
                rhs,
                target,
            } => {
                if op.holds(self.value(lhs)?, self.value(rhs)?) {
                    return self.jump(target);
                }
            }
            Instruction::Read { dst } => {
                let value = self.pending.pop_front().ok_or(Fault::InputExhausted)?;
                self.assign(dst, value)?;
            }
            Instruction::Write { value } => {
                let value = self.value(value)?;
                self.output.push(value);
            }
            Instruction::Arg { value } => {
                let value = self.value(value)?;
                self.args.push(value);
            }
            Instruction::Param { dst } => {
                let value = self.args.pop().ok_or(Fault::ArgumentUnderflow)?;
                self.assign(dst, value)?;
            }
            Instruction::Mov { dst, src } => {
                let value = self.value(src)?;
                self.store(dst, value)?;
            }
            Instruction::Arith { dst, lhs, op, rhs } => {
                let value = arith(*op, self.value(lhs)?, self.value(rhs)?, self.config.division);
                self.store(dst, value)?;
            }
            Instruction::Call { dst, function } => {
                let target = self
                    .program
                    .label(function)
                    .ok_or_else(|| Fault::UnknownLabel(function.clone()))?;
                let (saved, base) = self.enter_frame(function);
                self.call_stack.push(CallFrame {
                    return_pc: pc,
                    target: dst,
                    saved,
                    saved_bump: base,
                });
                if mask.contains(TraceMask::CALL) {
                    sink.call(function, base, self.call_stack.len());
                }
                return Ok(Flow::Jump(target));
            }
            Instruction::Return { value } => {
                let Some(frame) = self.call_stack.pop() else {
                    return Ok(Flow::Exit);
                };
                // The value is read in the callee's frame, stored in the caller's.
                let value = self.value(value)?;
                let (return_pc, target) = (frame.return_pc, frame.target);
                self.leave_frame(frame);
                self.store(target, value)?;
                if mask.contains(TraceMask::CALL) {
                    sink.ret(value, self.call_stack.len());
                }
                return Ok(Flow::Jump(return_pc));
            }
        }
        Ok(Flow::Next)
    }

    fn jump(&self, label: &str) -> Result<Flow, Fault> {
        self.program
            .label(label)
            .map(Flow::Jump)
            .ok_or_else(|| Fault::UnknownLabel(label.to_string()))
    }
}

/// Apply a binary operator with 32-bit wrapping semantics.
///
/// Division by zero yields 0.
pub fn arith(op: ArithOp, lhs: i32, rhs: i32, mode: DivisionMode) -> i32 {
    match op {
        ArithOp::Add => lhs.wrapping_add(rhs),
        ArithOp::Sub => lhs.wrapping_sub(rhs),
        ArithOp::Mul => lhs.wrapping_mul(rhs),
        ArithOp::Div if rhs == 0 => 0,
        ArithOp::Div => match mode {
            DivisionMode::Floor => floor_div(lhs, rhs),
            DivisionMode::Truncate => truncate_div(lhs, rhs),
        },
    }
}

fn floor_div(lhs: i32, rhs: i32) -> i32 {
    let q = lhs.wrapping_div(rhs);
    if lhs.wrapping_rem(rhs) != 0 && ((lhs < 0) != (rhs < 0)) {
        q - 1
    } else {
        q
    }
}

fn truncate_div(lhs: i32, rhs: i32) -> i32 {
    let q = (lhs.unsigned_abs() / rhs.unsigned_abs()) as i32;
    if (lhs < 0) != (rhs < 0) {
        q.wrapping_neg()
    } else {
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn wrapping_arithmetic() {
        let floor = DivisionMode::Floor;
        assert_eq!(arith(ArithOp::Add, i32::MAX, 1, floor), i32::MIN);
        assert_eq!(arith(ArithOp::Sub, i32::MIN, 1, floor), i32::MAX);
        assert_eq!(arith(ArithOp::Mul, 1 << 30, 4, floor), 0);
        assert_eq!(arith(ArithOp::Mul, -6, 7, floor), -42);
    }

    #[test]
    fn floor_division() {
        let floor = DivisionMode::Floor;
        assert_eq!(arith(ArithOp::Div, 7, 2, floor), 3);
        assert_eq!(arith(ArithOp::Div, -7, 2, floor), -4);
        assert_eq!(arith(ArithOp::Div, 7, -2, floor), -4);
        assert_eq!(arith(ArithOp::Div, -7, -2, floor), 3);
        assert_eq!(arith(ArithOp::Div, -8, 2, floor), -4);
        assert_eq!(arith(ArithOp::Div, i32::MIN, -1, floor), i32::MIN);
    }

    #[test]
    fn truncating_division() {
        let trunc = DivisionMode::Truncate;
        assert_eq!(arith(ArithOp::Div, 7, 2, trunc), 3);
        assert_eq!(arith(ArithOp::Div, -7, 2, trunc), -3);
        assert_eq!(arith(ArithOp::Div, 7, -2, trunc), -3);
        assert_eq!(arith(ArithOp::Div, -7, -2, trunc), 3);
        assert_eq!(arith(ArithOp::Div, i32::MIN, -1, trunc), i32::MIN);
        assert_eq!(arith(ArithOp::Div, i32::MIN, 1, trunc), i32::MIN);
    }

    #[test]
    fn division_by_zero_is_zero() {
        for mode in [DivisionMode::Floor, DivisionMode::Truncate] {
            assert_eq!(arith(ArithOp::Div, 5, 0, mode), 0);
            assert_eq!(arith(ArithOp::Div, -5, 0, mode), 0);
            assert_eq!(arith(ArithOp::Div, 0, 0, mode), 0);
        }
    }

    proptest! {
        #[test]
        fn floor_matches_reference(a in any::<i32>(), b in any::<i32>().prop_filter("nonzero", |b| *b != 0)) {
            let expected = (a as f64 / b as f64).floor() as i64;
            prop_assume!(expected <= i32::MAX as i64);
            prop_assert_eq!(arith(ArithOp::Div, a, b, DivisionMode::Floor) as i64, expected);
        }

        #[test]
        fn truncate_matches_reference(a in any::<i32>(), b in any::<i32>().prop_filter("nonzero", |b| *b != 0)) {
            let expected = a as i64 / b as i64;
            prop_assume!(expected <= i32::MAX as i64);
            prop_assert_eq!(arith(ArithOp::Div, a, b, DivisionMode::Truncate) as i64, expected);
        }
    }
}
