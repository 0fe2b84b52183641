use std::convert::Infallible;

use embedded_hal::digital::OutputPin;

use crate::{matrix::ColumnPattern, unwrap_infallible};

const BITS_PER_BYTE: u32 = 8;

/// Output side of the matrix: energizes column lines.
pub trait ColumnDriver {
    fn activate_column(&mut self, pattern: ColumnPattern);
    fn clear_all_columns(&mut self);
}

/// Serial-in/parallel-out register driven over data, clock and latch lines.
pub struct ShiftRegister<D, C, L> {
    data: D,
    clock: C,
    latch: L,
}

impl<D, C, L> ShiftRegister<D, C, L>
where
    D: OutputPin<Error = Infallible>,
    C: OutputPin<Error = Infallible>,
    L: OutputPin<Error = Infallible>,
{
    pub fn new(data: D, clock: C, latch: L) -> Self {
        Self { data, clock, latch }
    }

    /// Shifts `byte` out LSB first and commits it to the parallel outputs.
    pub fn write_byte(&mut self, byte: u8) {
        unwrap_infallible(self.latch.set_low());
        for bit in 0..BITS_PER_BYTE {
            self.shift_bit(byte & (1 << bit) != 0);
        }
        unwrap_infallible(self.latch.set_high());
    }

    #[inline]
    fn shift_bit(&mut self, high: bool) {
        unwrap_infallible(self.data.set_state(high.into()));
        unwrap_infallible(self.clock.set_high());
        unwrap_infallible(self.clock.set_low());
    }
}

impl<D, C, L> ColumnDriver for ShiftRegister<D, C, L>
where
    D: OutputPin<Error = Infallible>,
    C: OutputPin<Error = Infallible>,
    L: OutputPin<Error = Infallible>,
{
    fn activate_column(&mut self, pattern: ColumnPattern) {
        log::trace!("activating column {}", pattern.column());
        self.write_byte(pattern.bits());
    }

    fn clear_all_columns(&mut self) {
        self.write_byte(0);
    }
}
