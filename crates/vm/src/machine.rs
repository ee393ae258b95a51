//! Simulator state: memory, live symbol bindings, call and argument stacks.

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use irsim_common::{Dest, Operand, Program, Symbol};

use crate::config::Config;
use crate::memory::{Memory, MemoryFault};
use crate::outcome::Outcome;

/// Lifecycle of a [`Simulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Loaded or stopped; the next `run` starts from scratch.
    Ready,
    Running,
    Halted(Outcome),
}

/// A call frame, pushed by `CALL` and popped by `RETURN`.
#[derive(Debug, Clone)]
pub struct CallFrame<'a> {
    /// Index of the `CALL` instruction.
    pub return_pc: usize,
    /// Caller variable that receives the return value.
    pub target: &'a Dest,
    /// Bindings of the callee's variables before the call.
    pub saved: Vec<(&'a str, Symbol)>,
    /// Bump allocator position before the call.
    pub saved_bump: i32,
}

/// The IR simulator.
///
/// Borrows a loaded [`Program`] and owns everything a run mutates. A
/// simulator can run its program any number of times; each run starts from
/// the state [`Simulator::stop`] leaves behind.
pub struct Simulator<'a> {
    pub(crate) program: &'a Program,
    pub(crate) config: Config,
    /// Input as supplied; each run consumes a fresh copy.
    input: Vec<i32>,
    pub(crate) pending: VecDeque<i32>,
    pub(crate) output: Vec<i32>,
    pub(crate) memory: Memory,
    /// Live bindings. Starts as the load-time table; `CALL` rebinds.
    pub(crate) symbols: HashMap<&'a str, Symbol>,
    pub(crate) call_stack: Vec<CallFrame<'a>>,
    pub(crate) args: Vec<i32>,
    /// Next free frame offset.
    pub(crate) bump: i32,
    /// Instruction pointer, -1 when not running.
    pub(crate) pc: i64,
    pub(crate) instructions: u64,
    pub(crate) started: Instant,
    pub(crate) state: State,
}

impl<'a> Simulator<'a> {
    /// Create a simulator for `program`, reading `input` with `READ`.
    pub fn new(program: &'a Program, input: Vec<i32>, config: Config) -> Self {
        let mut sim = Self {
            program,
            config,
            pending: VecDeque::new(),
            input,
            output: Vec::new(),
            memory: Memory::new(),
            symbols: HashMap::new(),
            call_stack: Vec::new(),
            args: Vec::new(),
            bump: 0,
            pc: -1,
            instructions: 0,
            started: Instant::now(),
            state: State::Ready,
        };
        sim.stop();
        sim
    }

    /// Reset all run state, keeping the program and the supplied input.
    pub fn stop(&mut self) {
        self.pc = -1;
        self.instructions = 0;
        self.memory.clear();
        self.call_stack.clear();
        self.args.clear();
        self.symbols = self
            .program
            .symbols
            .iter()
            .map(|(name, sym)| (name.as_str(), *sym))
            .collect();
        self.bump = self.program.static_size;
        self.pending = self.input.iter().copied().collect();
        self.output.clear();
        self.started = Instant::now();
        self.state = State::Ready;
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Current binding of a variable.
    pub fn symbol(&self, name: &str) -> Option<Symbol> {
        self.symbols.get(name).copied()
    }

    /// Next free frame offset.
    pub fn bump_offset(&self) -> i32 {
        self.bump
    }

    pub fn call_depth(&self) -> usize {
        self.call_stack.len()
    }

    /// Instructions dispatched so far in the current or last run.
    pub fn instruction_count(&self) -> u64 {
        self.instructions
    }

    /// Values written so far in the current or last run.
    pub fn output(&self) -> &[i32] {
        &self.output
    }

    /// Byte offset a variable is bound to. Unknown names are unplaced.
    pub(crate) fn slot(&self, name: &str) -> i32 {
        self.symbols
            .get(name)
            .map_or(Symbol::UNASSIGNED, |sym| sym.offset)
    }

    /// Resolve an operand to its value.
    pub(crate) fn value(&self, operand: &Operand) -> Result<i32, MemoryFault> {
        match operand {
            Operand::Imm(n) => Ok(*n),
            Operand::AddrOf(name) => Ok(self.slot(name)),
            Operand::Var(name) => self.memory.load(self.slot(name)),
            Operand::Deref(name) => {
                let ptr = self.memory.load(self.slot(name))?;
                self.memory.load(ptr)
            }
        }
    }

    /// Store into a plain variable.
    pub(crate) fn assign(&mut self, name: &str, value: i32) -> Result<(), MemoryFault> {
        self.memory.store(self.slot(name), value)
    }

    /// Store into an assignment destination.
    pub(crate) fn store(&mut self, dst: &Dest, value: i32) -> Result<(), MemoryFault> {
        match dst {
            Dest::Var(name) => self.assign(name, value),
            Dest::Deref(name) => {
                let ptr = self.memory.load(self.slot(name))?;
                self.memory.store(ptr, value)
            }
        }
    }

    /// Give every local of `function` a fresh frame slot.
    ///
    /// Returns the previous bindings, in the function's declaration order,
    /// and the frame base.
    pub(crate) fn enter_frame(&mut self, function: &str) -> (Vec<(&'a str, Symbol)>, i32) {
        let program = self.program;
        let base = self.bump;
        let mut saved = Vec::new();
        for name in program.locals(function) {
            if let Some(sym) = self.symbols.get_mut(name.as_str()) {
                saved.push((name.as_str(), *sym));
                *sym = sym.placed_at(self.bump);
                self.bump = self.bump.saturating_add(sym.size);
            }
        }
        (saved, base)
    }

    /// Undo [`Simulator::enter_frame`].
    pub(crate) fn leave_frame(&mut self, frame: CallFrame<'a>) {
        for (name, sym) in frame.saved {
            self.symbols.insert(name, sym);
        }
        self.bump = frame.saved_bump;
    }
}
