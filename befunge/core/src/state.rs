use crate::direction::Direction;
use crate::grid::{Cell, Grid};
use crate::value::Value;

/// Everything a tick can mutate. Owned by a single `Machine`; observers
/// only ever see copies through its accessors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub grid: Grid,
    pub pos: (usize, usize),
    pub dir: Direction,
    pub stack: Vec<Value>,
    pub output: String,
    pub string_mode: bool,
    pub halted: bool,
}

impl Default for State {
    fn default() -> Self {
        Self::new(Grid::blank())
    }
}

impl State {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            pos: (0, 0),
            dir: Direction::default(),
            stack: Vec::new(),
            output: String::new(),
            string_mode: false,
            halted: false,
        }
    }

    pub fn current_cell(&self) -> Cell {
        let (x, y) = self.pos;
        self.grid.cell(x, y)
    }

    /// Pops the top value; an empty stack yields `Value::Undefined`.
    pub fn pop(&mut self) -> Value {
        self.stack.pop().unwrap_or(Value::Undefined)
    }

    pub fn push(&mut self, value: Value) {
        self.stack.push(value);
    }

    /// Moves the pointer one cell along the active direction with
    /// toroidal wraparound. No-op once halted.
    pub fn advance(&mut self) {
        if self.halted {
            return;
        }
        self.pos = self.dir.step(self.pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{HEIGHT, WIDTH};

    #[test]
    fn pop_on_empty_stack_is_undefined() {
        let mut state = State::default();
        assert_eq!(state.pop(), Value::Undefined);
        assert!(state.stack.is_empty());
    }

    #[test]
    fn advance_wraps_left_edge() {
        let mut state = State::default();
        state.dir = Direction::Left;
        state.advance();
        assert_eq!(state.pos, (WIDTH - 1, 0));
        state.dir = Direction::Up;
        state.advance();
        assert_eq!(state.pos, (WIDTH - 1, HEIGHT - 1));
    }

    #[test]
    fn advance_is_frozen_when_halted() {
        let mut state = State::default();
        state.halted = true;
        state.advance();
        assert_eq!(state.pos, (0, 0));
    }
}
