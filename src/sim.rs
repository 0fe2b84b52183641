//! Software stand-in for the scanning hardware.
//!
//! Models an 8-bit serial-in/parallel-out register with a storage latch and a
//! diode-isolated contact grid behind it, exposed through embedded-hal pins so
//! the real driver and row reader run against it unchanged.

use std::{cell::RefCell, convert::Infallible, rc::Rc};

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use rand::Rng;

use crate::{
    matrix::{COLUMN_COUNT, ROW_COUNT},
    timing::Cadence,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Line {
    Data,
    Clock,
    Latch,
}

struct BoardState {
    shift: u8,
    storage: u8,
    data: bool,
    clock: bool,
    latch: bool,
    contacts: [[bool; ROW_COUNT]; COLUMN_COUNT],
}

impl BoardState {
    fn drive(&mut self, line: Line, high: bool) {
        match line {
            Line::Data => self.data = high,
            Line::Clock => {
                if high && !self.clock {
                    // The first bit in ends up on the column 0 output
                    self.shift = (self.shift >> 1) | ((self.data as u8) << 7);
                }
                self.clock = high;
            }
            Line::Latch => {
                if high && !self.latch {
                    self.storage = self.shift;
                }
                self.latch = high;
            }
        }
    }

    fn row_level(&self, row: usize) -> bool {
        (0..COLUMN_COUNT)
            .filter(|&column| self.storage & (1 << column) != 0)
            .any(|column| self.contacts[column][row])
    }
}

/// Shared handle to the simulated board. Clones observe the same hardware.
#[derive(Clone)]
pub struct SimBoard {
    state: Rc<RefCell<BoardState>>,
}

impl SimBoard {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(BoardState {
                shift: 0,
                storage: 0,
                data: false,
                clock: false,
                latch: true,
                contacts: [[false; ROW_COUNT]; COLUMN_COUNT],
            })),
        }
    }

    /// Data, clock and latch lines, in that order.
    pub fn output_pins(&self) -> (SimOutputPin, SimOutputPin, SimOutputPin) {
        (
            self.output_pin(Line::Data),
            self.output_pin(Line::Clock),
            self.output_pin(Line::Latch),
        )
    }

    pub fn row_pins(&self) -> [SimRowPin; ROW_COUNT] {
        let mut row = 0;
        [(); ROW_COUNT].map(|_| {
            let pin = SimRowPin {
                row,
                state: self.state.clone(),
            };
            row += 1;
            pin
        })
    }

    pub fn press(&self, column: usize, row: usize) {
        self.state.borrow_mut().contacts[column][row] = true;
    }

    pub fn release(&self, column: usize, row: usize) {
        self.state.borrow_mut().contacts[column][row] = false;
    }

    pub fn toggle(&self, column: usize, row: usize) -> bool {
        let mut state = self.state.borrow_mut();
        let contact = &mut state.contacts[column][row];
        *contact = !*contact;
        *contact
    }

    pub fn release_all(&self) {
        self.state.borrow_mut().contacts = [[false; ROW_COUNT]; COLUMN_COUNT];
    }

    pub fn is_pressed(&self, column: usize, row: usize) -> bool {
        self.state.borrow().contacts[column][row]
    }

    /// Byte currently committed to the parallel outputs.
    pub fn latched_outputs(&self) -> u8 {
        self.state.borrow().storage
    }

    fn output_pin(&self, line: Line) -> SimOutputPin {
        SimOutputPin {
            line,
            state: self.state.clone(),
        }
    }
}

impl Default for SimBoard {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SimOutputPin {
    line: Line,
    state: Rc<RefCell<BoardState>>,
}

impl ErrorType for SimOutputPin {
    type Error = Infallible;
}

impl OutputPin for SimOutputPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.state.borrow_mut().drive(self.line, false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.state.borrow_mut().drive(self.line, true);
        Ok(())
    }
}

/// Row input with pull-down: low unless a contact on an energized column closes it.
pub struct SimRowPin {
    row: usize,
    state: Rc<RefCell<BoardState>>,
}

impl ErrorType for SimRowPin {
    type Error = Infallible;
}

impl InputPin for SimRowPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.state.borrow().row_level(self.row))
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        self.is_high().map(|high| !high)
    }
}

/// Flips a random contact on the board every interval.
pub struct RandomTypist {
    cadence: Cadence,
    rng: rand::rngs::ThreadRng,
}

impl RandomTypist {
    pub fn new(interval_ms: u64, start_ms: u64) -> Self {
        Self {
            cadence: Cadence::new(interval_ms, start_ms),
            rng: rand::thread_rng(),
        }
    }

    /// Returns the toggled contact and its new state, if one was due.
    pub fn maybe_type(&mut self, now_ms: u64, board: &SimBoard) -> Option<(usize, usize, bool)> {
        if !self.cadence.is_due(now_ms) {
            return None;
        }
        self.cadence.mark(now_ms);

        let column = self.rng.gen_range(0..COLUMN_COUNT);
        let row = self.rng.gen_range(0..ROW_COUNT);
        let pressed = board.toggle(column, row);
        log::debug!(
            "typist {} contact ({}, {})",
            if pressed { "closed" } else { "opened" },
            column,
            row
        );
        Some((column, row, pressed))
    }
}
