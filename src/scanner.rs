use embedded_hal::delay::DelayNs;

use crate::{
    matrix::{MatrixSnapshot, RowLine},
    rows::RowReader,
    sequencer::ColumnSequence,
    shift_register::ColumnDriver,
};

/// Drives one column at a time and samples every row while it is active.
///
/// The scanner is the only writer of its snapshot. Readers borrow it between
/// sweeps, so they always observe one complete sweep.
pub struct MatrixScanner<D, R, T> {
    driver: D,
    rows: R,
    delay: T,
    settle_us: u32,
    snapshot: MatrixSnapshot,
}

impl<D, R, T> MatrixScanner<D, R, T>
where
    D: ColumnDriver,
    R: RowReader,
    T: DelayNs,
{
    pub fn new(driver: D, rows: R, delay: T, settle_us: u32) -> Self {
        Self {
            driver,
            rows,
            delay,
            settle_us,
            snapshot: MatrixSnapshot::new(),
        }
    }

    /// Runs one full sweep and returns the refreshed snapshot.
    pub fn sweep(&mut self) -> &MatrixSnapshot {
        for pattern in ColumnSequence::new() {
            let column = pattern.column();
            self.driver.activate_column(pattern);
            // Row lines need time to settle after the column switches
            self.delay.delay_us(self.settle_us);
            for line in RowLine::all() {
                let pressed = self.rows.read_row(line);
                self.snapshot.set(column, line.index(), pressed);
            }
        }
        self.driver.clear_all_columns();

        &self.snapshot
    }

    pub fn snapshot(&self) -> &MatrixSnapshot {
        &self.snapshot
    }

    pub fn settle_us(&self) -> u32 {
        self.settle_us
    }
}
