use crate::value::Value;

pub const WIDTH: usize = 80;
pub const HEIGHT: usize = 25;
pub const BLANK: char = ' ';
/// Shown for cells whose stored value has no printable glyph.
pub const PLACEHOLDER: char = '\u{FFFD}';

/// One grid cell. Source text loads as glyphs; `p` stores the raw stack
/// value so `g` can hand it back unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Glyph(char),
    Stored(Value),
}

impl Cell {
    /// Character the dispatcher sees, if the cell has one.
    pub fn glyph(self) -> Option<char> {
        match self {
            Cell::Glyph(ch) => Some(ch),
            Cell::Stored(Value::Int(n @ 0..=9)) => char::from_digit(n as u32, 10),
            Cell::Stored(Value::Int(n)) => u32::try_from(n).ok().and_then(char::from_u32),
            Cell::Stored(Value::Char(ch)) => Some(ch),
            Cell::Stored(Value::Undefined) => None,
        }
    }

    /// Printable form used by program text and the board.
    pub fn display(self) -> char {
        match self.glyph() {
            Some(ch) if !ch.is_control() => ch,
            _ => PLACEHOLDER,
        }
    }

    /// Value pushed by `g`: digit glyphs read as their digit, other glyphs
    /// as their scalar value, stored values as themselves.
    pub fn value(self) -> Value {
        match self {
            Cell::Glyph(ch) => match ch.to_digit(10) {
                Some(digit) => Value::Int(digit as i64),
                None => Value::Int(ch as i64),
            },
            Cell::Stored(value) => value,
        }
    }
}

/// Fixed 80x25 program memory. Every cell is always populated; the
/// dimensions never change after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::blank()
    }
}

impl Grid {
    pub fn blank() -> Self {
        Self {
            cells: vec![Cell::Glyph(BLANK); WIDTH * HEIGHT],
        }
    }

    /// Normalizes arbitrary source text into a full grid: case-folded, at most
    /// `HEIGHT` lines, each padded or truncated to `WIDTH` characters.
    pub fn from_source(source: &str) -> Self {
        let mut grid = Self::blank();
        let folded = source.to_lowercase();
        for (y, line) in folded.split('\n').take(HEIGHT).enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            for (x, ch) in line.chars().take(WIDTH).enumerate() {
                grid.cells[Self::offset(x, y)] = Cell::Glyph(ch);
            }
        }
        grid
    }

    fn offset(x: usize, y: usize) -> usize {
        (y % HEIGHT) * WIDTH + x % WIDTH
    }

    /// Maps any integer coordinate pair onto the torus.
    pub fn wrap(x: i64, y: i64) -> (usize, usize) {
        (
            x.rem_euclid(WIDTH as i64) as usize,
            y.rem_euclid(HEIGHT as i64) as usize,
        )
    }

    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.cells[Self::offset(x, y)]
    }

    /// Printable character at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> char {
        self.cell(x, y).display()
    }

    pub fn set(&mut self, x: usize, y: usize, ch: char) {
        self.cells[Self::offset(x, y)] = Cell::Glyph(ch);
    }

    pub fn load(&self, x: usize, y: usize) -> Value {
        self.cell(x, y).value()
    }

    pub fn store(&mut self, x: usize, y: usize, value: Value) {
        self.cells[Self::offset(x, y)] = Cell::Stored(value);
    }

    /// Serializes the grid back to newline-joined rows of printable cells.
    pub fn to_text(&self) -> String {
        self.cells
            .chunks(WIDTH)
            .map(|row| row.iter().map(|cell| cell.display()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
