use core::cell::Cell;

use critical_section::Mutex;

use super::{ImuDriver, ImuScale, SensorSample};

#[derive(Clone, Copy)]
struct Slot {
    seq: u32,
    sample: SensorSample,
}

/// Latest-value-wins handoff of samples from interrupt context.
///
/// The producer (a DMA-complete or data-ready interrupt) calls
/// [`publish`](Self::publish); the main loop reads through a [`CellDriver`].
/// Readers always observe a complete sample.
pub struct SampleCell {
    slot: Mutex<Cell<Slot>>,
}

impl SampleCell {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Cell::new(Slot {
                seq: 0,
                sample: SensorSample::new([0; 3], [0; 3]),
            })),
        }
    }

    /// Replace the stored sample. Any sample not yet read is dropped.
    pub fn publish(&self, sample: SensorSample) {
        critical_section::with(|cs| {
            let cell = self.slot.borrow(cs);
            let seq = match cell.get().seq.wrapping_add(1) {
                // 0 marks "never published"
                0 => 1,
                seq => seq,
            };
            cell.set(Slot { seq, sample });
        })
    }

    /// The newest sample with its sequence number, if any was published.
    pub fn latest(&self) -> Option<(u32, SensorSample)> {
        let slot = critical_section::with(|cs| self.slot.borrow(cs).get());
        (slot.seq != 0).then_some((slot.seq, slot.sample))
    }
}

impl Default for SampleCell {
    fn default() -> Self {
        Self::new()
    }
}

/// An [`ImuDriver`] reading from a [`SampleCell`] filled elsewhere.
pub struct CellDriver<'a> {
    cell: &'a SampleCell,
    scale: ImuScale,
    seen: u32,
}

impl<'a> CellDriver<'a> {
    pub fn new(cell: &'a SampleCell, scale: ImuScale) -> Self {
        Self {
            cell,
            scale,
            seen: 0,
        }
    }
}

impl ImuDriver for CellDriver<'_> {
    fn configure(&mut self) -> ImuScale {
        self.scale
    }

    fn sample(&mut self) -> Option<SensorSample> {
        let (seq, sample) = self.cell.latest()?;
        if seq == self.seen {
            return None;
        }
        self.seen = seq;
        Some(sample)
    }
}
