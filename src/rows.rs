use std::convert::Infallible;

use embedded_hal::digital::InputPin;

use crate::{
    matrix::{RowLine, ROW_COUNT},
    unwrap_infallible,
};

/// Input side of the matrix: samples row lines.
pub trait RowReader {
    /// Instantaneous level of `line`, true while a closed contact drives it high.
    fn read_row(&mut self, line: RowLine) -> bool;
}

/// Row lines backed by pull-down inputs, one pin per row.
pub struct PinRows<P> {
    pins: [P; ROW_COUNT],
}

impl<P> PinRows<P>
where
    P: InputPin<Error = Infallible>,
{
    pub fn new(pins: [P; ROW_COUNT]) -> Self {
        Self { pins }
    }
}

impl<P> RowReader for PinRows<P>
where
    P: InputPin<Error = Infallible>,
{
    fn read_row(&mut self, line: RowLine) -> bool {
        unwrap_infallible(self.pins[line.index()].is_high())
    }
}
