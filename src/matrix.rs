// Matrix geometry
pub const COLUMN_COUNT: usize = 8;
pub const ROW_COUNT: usize = 9;
pub const KEY_COUNT: usize = COLUMN_COUNT * ROW_COUNT;

/// One-hot byte selecting a single column line on the shift register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnPattern(u8);

// Bit n drives column n
pub const COLUMN_PATTERNS: [ColumnPattern; COLUMN_COUNT] = [
    ColumnPattern(0b0000_0001),
    ColumnPattern(0b0000_0010),
    ColumnPattern(0b0000_0100),
    ColumnPattern(0b0000_1000),
    ColumnPattern(0b0001_0000),
    ColumnPattern(0b0010_0000),
    ColumnPattern(0b0100_0000),
    ColumnPattern(0b1000_0000),
];

impl ColumnPattern {
    pub fn for_column(column: usize) -> Option<Self> {
        COLUMN_PATTERNS.get(column).copied()
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn column(self) -> usize {
        self.0.trailing_zeros() as usize
    }
}

/// Index of a physical row input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RowLine(usize);

impl RowLine {
    pub fn new(index: usize) -> Option<Self> {
        if index < ROW_COUNT {
            Some(Self(index))
        } else {
            None
        }
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn all() -> impl Iterator<Item = RowLine> {
        (0..ROW_COUNT).map(RowLine)
    }
}

/// Latest complete sweep, indexed `[column][row]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatrixSnapshot {
    state: [[bool; ROW_COUNT]; COLUMN_COUNT],
}

impl MatrixSnapshot {
    pub fn new() -> Self {
        Self {
            state: [[false; ROW_COUNT]; COLUMN_COUNT],
        }
    }

    pub fn get(&self, column: usize, row: usize) -> bool {
        self.state[column][row]
    }

    pub fn set(&mut self, column: usize, row: usize, pressed: bool) {
        self.state[column][row] = pressed;
    }

    pub fn column(&self, column: usize) -> &[bool; ROW_COUNT] {
        &self.state[column]
    }

    pub fn pressed_count(&self) -> usize {
        self.pressed().count()
    }

    /// Pressed `(column, row)` pairs in column-major order.
    pub fn pressed(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.state.iter().enumerate().flat_map(|(column, rows)| {
            rows.iter()
                .enumerate()
                .filter(|(_, pressed)| **pressed)
                .map(move |(row, _)| (column, row))
        })
    }
}

impl Default for MatrixSnapshot {
    fn default() -> Self {
        Self::new()
    }
}
