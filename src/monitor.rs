use std::io::Write;

use embedded_hal::delay::DelayNs;

use crate::{
    matrix::MatrixSnapshot,
    reporter::SnapshotReporter,
    rows::RowReader,
    scanner::MatrixScanner,
    shift_register::ColumnDriver,
    timing::Clock,
};

// Microseconds the row lines get after a column switches
pub const SETTLE_DELAY_US: u32 = 10;
// Milliseconds between printed snapshots
pub const REPORT_INTERVAL_MS: u64 = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanConfig {
    pub settle_us: u32,
    pub report_interval_ms: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            settle_us: SETTLE_DELAY_US,
            report_interval_ms: REPORT_INTERVAL_MS,
        }
    }
}

/// Main loop context: sweeps the matrix, then reports when the cadence allows.
pub struct KeyMonitor<D, R, T, C, W> {
    scanner: MatrixScanner<D, R, T>,
    reporter: SnapshotReporter,
    clock: C,
    out: W,
    sweeps_since_report: u64,
}

impl<D, R, T, C, W> KeyMonitor<D, R, T, C, W>
where
    D: ColumnDriver,
    R: RowReader,
    T: DelayNs,
    C: Clock,
    W: Write,
{
    pub fn new(config: ScanConfig, driver: D, rows: R, delay: T, clock: C, out: W) -> Self {
        log::info!(
            "scanning with {}us settle delay, reporting every {}ms",
            config.settle_us,
            config.report_interval_ms
        );

        let start = clock.now_ms();
        Self {
            scanner: MatrixScanner::new(driver, rows, delay, config.settle_us),
            reporter: SnapshotReporter::new(config.report_interval_ms, start),
            clock,
            out,
            sweeps_since_report: 0,
        }
    }

    /// One sweep, then the report gate. Returns whether a report went out.
    pub fn handle_update(&mut self) -> bool {
        self.scanner.sweep();
        self.sweeps_since_report += 1;

        let now = self.clock.now_ms();
        match self
            .reporter
            .maybe_report(now, self.scanner.snapshot(), &mut self.out)
        {
            Ok(false) => false,
            Ok(true) => {
                log::debug!(
                    "reported after {} sweeps, {} keys down",
                    self.sweeps_since_report,
                    self.scanner.snapshot().pressed_count()
                );
                self.sweeps_since_report = 0;
                true
            }
            Err(err) => {
                log::error!("failed to write report: {}", err);
                self.sweeps_since_report = 0;
                false
            }
        }
    }

    pub fn snapshot(&self) -> &MatrixSnapshot {
        self.scanner.snapshot()
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn output(&self) -> &W {
        &self.out
    }
}
