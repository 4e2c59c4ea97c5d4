use crate::direction::Direction;
use crate::eval::{self, Opcode};
use crate::grid::Grid;
use crate::random::{RandomSource, StdRandom};
use crate::snapshot::MachineSnapshot;
use crate::state::State;
use crate::value::Value;
use crate::MachineConfig;

/// Step-driven interpreter over a fixed toroidal grid.
///
/// The machine never schedules itself: each call to [`Machine::tick`]
/// performs exactly one ingest/advance pair. Accessors return owned copies
/// or shared borrows, so no observer can change state between ticks.
#[derive(Clone, Debug)]
pub struct Machine<R = StdRandom> {
    state: State,
    random: R,
    ticks: u64,
    trace: bool,
}

impl Default for Machine<StdRandom> {
    fn default() -> Self {
        Self::new("")
    }
}

impl Machine<StdRandom> {
    pub fn new(source: &str) -> Self {
        Self::with_config(source, MachineConfig::default())
    }

    pub fn with_config(source: &str, config: MachineConfig) -> Self {
        let mut machine = Self::with_random(source, StdRandom::new(config.seed));
        machine.trace = config.trace;
        machine
    }
}

impl<R: RandomSource> Machine<R> {
    pub fn with_random(source: &str, random: R) -> Self {
        Self {
            state: State::new(Grid::from_source(source)),
            random,
            ticks: 0,
            trace: MachineConfig::trace_from_env(),
        }
    }

    pub fn set_trace(&mut self, enabled: bool) {
        self.trace = enabled;
    }

    /// One atomic execution step: ingest the current cell, then advance.
    pub fn tick(&mut self) {
        if self.state.halted {
            return;
        }
        if self.trace {
            self.trace_tick();
        }
        self.ingest();
        self.advance();
        self.ticks += 1;
        if self.trace && self.state.halted {
            let (x, y) = self.state.pos;
            eprintln!(
                "[funge-trace] halted tick={ticks} pos=({x},{y}) output_len={len}",
                ticks = self.ticks,
                len = self.state.output.len(),
            );
        }
    }

    /// Applies the cell under the pointer without moving it.
    pub fn ingest(&mut self) {
        eval::ingest(&mut self.state, &mut self.random);
    }

    /// Moves the pointer one cell along the active direction.
    pub fn advance(&mut self) {
        self.state.advance();
    }

    fn trace_tick(&self) {
        let (x, y) = self.state.pos;
        let cell = self.state.current_cell().display();
        let mode = if self.state.string_mode {
            "string"
        } else {
            match Opcode::decode(cell) {
                Opcode::Unknown(_) => "unknown",
                _ => "op",
            }
        };
        eprintln!(
            "[funge-trace] tick={tick} pos=({x},{y}) cell={cell:?} mode={mode} dir={dir} depth={depth}",
            tick = self.ticks,
            dir = self.state.dir,
            depth = self.state.stack.len(),
        );
    }

    pub fn is_halted(&self) -> bool {
        self.state.halted
    }

    /// Alias of [`Machine::is_halted`] matching the board's naming.
    pub fn ended(&self) -> bool {
        self.is_halted()
    }

    /// Grid serialized back to newline-joined rows.
    pub fn program(&self) -> String {
        self.state.grid.to_text()
    }

    pub fn grid(&self) -> &Grid {
        &self.state.grid
    }

    /// Pointer as `(column, row)`.
    pub fn pos(&self) -> (usize, usize) {
        self.state.pos
    }

    pub fn direction(&self) -> Direction {
        self.state.dir
    }

    /// Copy of the operand stack, bottom first.
    pub fn stack(&self) -> Vec<Value> {
        self.state.stack.clone()
    }

    pub fn output(&self) -> &str {
        &self.state.output
    }

    pub fn string_mode(&self) -> bool {
        self.state.string_mode
    }

    /// Number of ticks that ingested a cell.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            program: self.program(),
            pos: self.state.pos,
            direction: self.state.dir,
            stack: self.stack(),
            output: self.state.output.clone(),
            string_mode: self.state.string_mode,
            halted: self.state.halted,
            ticks: self.ticks,
        }
    }
}
