use std::io;

use keyscan::{
    monitor::{KeyMonitor, ScanConfig},
    rows::PinRows,
    shift_register::ShiftRegister,
    sim::{RandomTypist, SimBoard},
    timing::{SpinDelay, SystemClock},
};

// Milliseconds between simulated key flips
const TYPIST_INTERVAL_MS: u64 = 2500;

fn main() {
    env_logger::init();

    let board = SimBoard::new();
    let (data, clock, latch) = board.output_pins();

    let mut monitor = KeyMonitor::new(
        ScanConfig::default(),
        ShiftRegister::new(data, clock, latch),
        PinRows::new(board.row_pins()),
        SpinDelay::new(),
        SystemClock::new(),
        io::stdout(),
    );
    let mut typist = RandomTypist::new(TYPIST_INTERVAL_MS, monitor.now_ms());

    loop {
        typist.maybe_type(monitor.now_ms(), &board);
        monitor.handle_update();
    }
}
