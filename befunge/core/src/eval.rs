//! Instruction dispatch: decoding a cell into an [`Opcode`] and applying its
//! effect to the machine [`State`]. Nothing here moves the pointer except
//! the bridge opcode's extra step.

use crate::direction::Direction;
use crate::grid::{Grid, PLACEHOLDER};
use crate::random::RandomSource;
use crate::state::State;
use crate::value::Value;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    Noop,
    Halt,
    Add,
    Sub,
    Mul,
    Div,
    Not,
    Greater,
    Dup,
    Swap,
    Discard,
    OutputInt,
    OutputChar,
    Go(Direction),
    Bridge,
    Random,
    BranchHorizontal,
    BranchVertical,
    Get,
    Put,
    ToggleString,
    Digit(u8),
    Unknown(char),
}

impl Opcode {
    pub fn decode(ch: char) -> Opcode {
        match ch {
            ' ' => Opcode::Noop,
            '@' => Opcode::Halt,
            '+' => Opcode::Add,
            '-' => Opcode::Sub,
            '*' => Opcode::Mul,
            '/' => Opcode::Div,
            '!' => Opcode::Not,
            '`' => Opcode::Greater,
            ':' => Opcode::Dup,
            '\\' => Opcode::Swap,
            '$' => Opcode::Discard,
            '.' => Opcode::OutputInt,
            ',' => Opcode::OutputChar,
            '>' => Opcode::Go(Direction::Right),
            'v' => Opcode::Go(Direction::Down),
            '<' => Opcode::Go(Direction::Left),
            '^' => Opcode::Go(Direction::Up),
            '#' => Opcode::Bridge,
            '?' => Opcode::Random,
            '_' => Opcode::BranchHorizontal,
            '|' => Opcode::BranchVertical,
            'g' => Opcode::Get,
            'p' => Opcode::Put,
            '"' => Opcode::ToggleString,
            '0'..='9' => Opcode::Digit(ch as u8 - b'0'),
            other => Opcode::Unknown(other),
        }
    }
}

/// Applies the cell under the pointer to `state`. A halted state is left
/// untouched.
pub fn ingest<R: RandomSource + ?Sized>(state: &mut State, random: &mut R) {
    if state.halted {
        return;
    }
    // Stored values without a glyph dispatch as an unrecognized cell.
    let glyph = state.current_cell().glyph();
    let op = Opcode::decode(glyph.unwrap_or(PLACEHOLDER));

    // `$` and `"` take effect regardless of string mode.
    match op {
        Opcode::Discard => {
            state.pop();
            return;
        }
        Opcode::ToggleString => {
            state.string_mode = !state.string_mode;
            return;
        }
        _ => {}
    }
    if state.string_mode {
        state.push(glyph.map(Value::Char).unwrap_or(Value::Undefined));
        return;
    }
    execute(op, state, random);
}

fn execute<R: RandomSource + ?Sized>(op: Opcode, state: &mut State, random: &mut R) {
    match op {
        Opcode::Noop => {}
        Opcode::Halt => state.halted = true,
        Opcode::Add => binary(state, |b, a| Some(b.wrapping_add(a))),
        Opcode::Sub => binary(state, |b, a| Some(b.wrapping_sub(a))),
        Opcode::Mul => binary(state, |b, a| Some(b.wrapping_mul(a))),
        // Integer division already truncates toward zero; a zero divisor
        // and MIN / -1 both come back as None.
        Opcode::Div => binary(state, i64::checked_div),
        Opcode::Greater => binary(state, |b, a| Some((a < b) as i64)),
        Opcode::Not => {
            let v = state.pop();
            let result = v
                .as_int()
                .map(|n| Value::from_bool(n == 0))
                .unwrap_or(Value::Undefined);
            state.push(result);
        }
        Opcode::Dup => {
            let v = state.pop();
            state.push(v);
            state.push(v);
        }
        Opcode::Swap => {
            let a = state.pop();
            let b = state.pop();
            state.push(a);
            state.push(b);
        }
        Opcode::OutputInt => {
            if let Some(n) = state.pop().as_int() {
                state.output.push_str(&n.to_string());
            }
        }
        Opcode::OutputChar => {
            let glyph = match state.pop() {
                Value::Char(ch) => Some(ch),
                Value::Int(n) => u32::try_from(n).ok().and_then(char::from_u32),
                Value::Undefined => None,
            };
            if let Some(ch) = glyph {
                state.output.push(ch);
            }
        }
        Opcode::Go(dir) => state.dir = dir,
        Opcode::Bridge => state.advance(),
        Opcode::Random => state.dir = random.next_direction(),
        Opcode::BranchHorizontal => {
            state.dir = if state.pop().is_zero() {
                Direction::Right
            } else {
                Direction::Left
            };
        }
        Opcode::BranchVertical => {
            state.dir = if state.pop().is_zero() {
                Direction::Down
            } else {
                Direction::Up
            };
        }
        Opcode::Get => {
            let y = state.pop();
            let x = state.pop();
            let result = match (x.as_int(), y.as_int()) {
                (Some(x), Some(y)) => {
                    let (x, y) = Grid::wrap(x, y);
                    state.grid.load(x, y)
                }
                _ => Value::Undefined,
            };
            state.push(result);
        }
        Opcode::Put => {
            let y = state.pop();
            let x = state.pop();
            let value = state.pop();
            if let (Some(x), Some(y)) = (x.as_int(), y.as_int()) {
                let (x, y) = Grid::wrap(x, y);
                state.grid.store(x, y, value);
            }
        }
        Opcode::Digit(d) => state.push(Value::Int(d as i64)),
        Opcode::Unknown(_) => state.push(Value::Undefined),
        // Handled ahead of string mode in `ingest`.
        Opcode::Discard | Opcode::ToggleString => {}
    }
}

/// Pops `a` then `b` and pushes `op(b, a)`.
fn binary(state: &mut State, op: impl FnOnce(i64, i64) -> Option<i64>) {
    let a = state.pop();
    let b = state.pop();
    state.push(Value::combine(b, a, op));
}
