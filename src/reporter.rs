use std::io::{self, Write};

use crate::{
    matrix::{MatrixSnapshot, COLUMN_COUNT, ROW_COUNT},
    timing::Cadence,
};

const HEADER: &str = "Key matrix state:";
const LABEL_WIDTH: usize = 4;
const CELL_WIDTH: usize = 3;

/// Prints the latest snapshot at a fixed cadence.
pub struct SnapshotReporter {
    cadence: Cadence,
}

impl SnapshotReporter {
    pub fn new(interval_ms: u64, start_ms: u64) -> Self {
        Self {
            cadence: Cadence::new(interval_ms, start_ms),
        }
    }

    pub fn interval_ms(&self) -> u64 {
        self.cadence.interval_ms
    }

    /// Writes the snapshot if a full interval has passed since the last report.
    ///
    /// The report counts as sent even if writing fails, so a broken sink is
    /// retried on the next interval rather than after every sweep.
    pub fn maybe_report<W: Write>(
        &mut self,
        now_ms: u64,
        snapshot: &MatrixSnapshot,
        out: &mut W,
    ) -> io::Result<bool> {
        if !self.cadence.is_due(now_ms) {
            return Ok(false);
        }
        self.cadence.mark(now_ms);
        render(snapshot, out)?;
        Ok(true)
    }
}

/// Rows outer, columns inner. Storage stays `[column][row]`.
pub fn render<W: Write>(snapshot: &MatrixSnapshot, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", HEADER)?;

    write!(out, "{:width$}", "", width = LABEL_WIDTH)?;
    for column in 0..COLUMN_COUNT {
        write!(out, "{:>width$}", format!("C{}", column), width = CELL_WIDTH)?;
    }
    writeln!(out)?;

    for row in 0..ROW_COUNT {
        write!(out, "{:<width$}", format!("R{}:", row), width = LABEL_WIDTH)?;
        for column in 0..COLUMN_COUNT {
            let cell = if snapshot.get(column, row) { 1 } else { 0 };
            write!(out, "{:>width$}", cell, width = CELL_WIDTH)?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", "-".repeat(LABEL_WIDTH + COLUMN_COUNT * CELL_WIDTH))?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use proptest::prelude::*;

    use super::{render, SnapshotReporter};
    use crate::matrix::{MatrixSnapshot, ROW_COUNT};

    fn rendered(snapshot: &MatrixSnapshot) -> String {
        let mut out: Vec<u8> = Vec::new();
        render(snapshot, &mut out).expect("Vec sink failed");
        String::from_utf8(out).expect("Report is not utf-8")
    }

    #[test]
    fn render_layout() {
        let mut snapshot = MatrixSnapshot::new();
        snapshot.set(3, 5, true);
        let text = rendered(&snapshot);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + 1 + ROW_COUNT + 1);
        assert_eq!(lines[0], "Key matrix state:");
        assert_eq!(lines[1], "     C0 C1 C2 C3 C4 C5 C6 C7");
        assert_eq!(lines[2], "R0:   0  0  0  0  0  0  0  0");
        assert_eq!(lines[7], "R5:   0  0  0  1  0  0  0  0");
        assert_eq!(lines[10], "R8:   0  0  0  0  0  0  0  0");
        assert_eq!(lines[11], "-".repeat(28));
    }

    #[test]
    fn render_transposes_storage() {
        let mut snapshot = MatrixSnapshot::new();
        snapshot.set(0, 8, true);
        let text = rendered(&snapshot);
        let last_row = text.lines().nth(2 + 8).expect("Missing row 8");

        let cells: Vec<&str> = last_row.split_whitespace().skip(1).collect();
        assert_eq!(cells, vec!["1", "0", "0", "0", "0", "0", "0", "0"]);
    }

    #[test]
    fn first_report_after_one_interval() {
        let snapshot = MatrixSnapshot::new();
        let mut reporter = SnapshotReporter::new(1000, 0);
        let mut out: Vec<u8> = Vec::new();

        assert!(!reporter.maybe_report(0, &snapshot, &mut out).unwrap());
        assert!(!reporter.maybe_report(999, &snapshot, &mut out).unwrap());
        assert!(out.is_empty());
        assert!(reporter.maybe_report(1000, &snapshot, &mut out).unwrap());
        assert!(!out.is_empty());
        assert!(!reporter.maybe_report(1500, &snapshot, &mut out).unwrap());
        assert_eq!(reporter.interval_ms(), 1000);
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_write_still_consumes_interval() {
        let snapshot = MatrixSnapshot::new();
        let mut reporter = SnapshotReporter::new(1000, 0);

        assert!(reporter.maybe_report(1000, &snapshot, &mut BrokenSink).is_err());
        assert!(!reporter.maybe_report(1001, &snapshot, &mut BrokenSink).unwrap());
    }

    proptest! {
        #[test]
        fn reports_only_after_full_interval(
            steps in prop::collection::vec(0u64..400, 1..300)
        ) {
            let snapshot = MatrixSnapshot::new();
            let mut reporter = SnapshotReporter::new(1000, 0);
            let mut now = 0;
            let mut last = 0;
            for step in steps {
                now += step;
                let mut out: Vec<u8> = Vec::new();
                let emitted = reporter.maybe_report(now, &snapshot, &mut out).unwrap();
                prop_assert_eq!(emitted, now - last >= 1000);
                prop_assert_eq!(emitted, !out.is_empty());
                if emitted {
                    last = now;
                }
            }
        }
    }
}
