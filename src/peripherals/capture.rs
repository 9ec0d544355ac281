use core::cell::Cell;

use critical_section::Mutex;

/// Pulse widths (in microseconds) captured in interrupt context.
///
/// Input-capture interrupts call [`record`](Self::record); readers get the
/// newest width of each channel.
pub struct PulseCapture<const N: usize> {
    widths: Mutex<Cell<[u16; N]>>,
}

impl<const N: usize> PulseCapture<N> {
    pub const fn new() -> Self {
        Self {
            widths: Mutex::new(Cell::new([0; N])),
        }
    }

    pub fn record(&self, chan: usize, width_us: u16) {
        if chan >= N {
            return;
        }
        critical_section::with(|cs| {
            let cell = self.widths.borrow(cs);
            let mut widths = cell.get();
            widths[chan] = width_us;
            cell.set(widths);
        })
    }

    /// Newest width of `chan`, 0 if never captured or out of range.
    pub fn width(&self, chan: usize) -> u16 {
        critical_section::with(|cs| self.widths.borrow(cs).get())
            .get(chan)
            .copied()
            .unwrap_or(0)
    }
}

impl<const N: usize> Default for PulseCapture<N> {
    fn default() -> Self {
        Self::new()
    }
}
