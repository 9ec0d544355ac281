//! The capability contract between the flight-control core and a board.

use crate::config::LoopTiming;
use crate::imu::{Imu, ImuScale};
use crate::peripherals::{Barometer, Receiver, Sonar, StatusIndicator};
use crate::serial::{ChannelId, SerialChannel};
use crate::Error;

mod flight;
pub use flight::FlightBoard;

/// Vendor bring-up and reset services.
pub trait Platform {
    /// Bring up clocks, buses and pins.
    fn init_buses(&mut self) -> Result<(), Error>;

    /// Stop after an unrecoverable bring-up failure.
    fn halt(&mut self, error: Error) -> !;

    /// Reset into a bootloader-capable state.
    fn reset_to_bootloader(&mut self) -> !;
}

/// A flight-controller board.
///
/// All calls are made by the core from its loop; a board never calls back.
/// Apart from [`delay_ms`](Board::delay_ms), [`reboot`](Board::reboot) and
/// serial flushing, every method returns promptly.
///
/// Optional peripherals come from the [`Barometer`], [`Sonar`], [`Receiver`]
/// and [`StatusIndicator`] supertraits, whose defaults report "unsupported".
pub trait Board: Barometer + Sonar + Receiver + StatusIndicator {
    /// Bring up the board and return the loop and calibration timing.
    ///
    /// Calling this again returns the same timing without repeating bring-up.
    fn init(&mut self) -> LoopTiming;

    /// This board's IMU.
    fn imu(&mut self) -> Imu<'_>;

    fn imu_init(&mut self) -> ImuScale {
        self.imu().imu_init()
    }

    /// Number of motor channels.
    fn motor_count(&self) -> usize;

    /// Command motor `index` to `value` in [0, 1]. Out of range indices are ignored.
    fn write_motor(&mut self, index: u8, value: f32);

    fn last_motor(&self, index: u8) -> Option<f32>;

    fn delay_ms(&mut self, ms: u32);

    /// Block for a fractional number of seconds. Non-positive values return at once.
    fn delay_seconds(&mut self, sec: f32) {
        if sec > 0. {
            self.delay_ms((sec * 1000.) as u32);
        }
    }

    /// Microseconds since boot.
    fn micros(&mut self) -> u32;

    /// Flush serial output and reset into the bootloader.
    fn reboot(&mut self) -> !;

    fn serial(&mut self, id: ChannelId) -> Option<&mut dyn SerialChannel>;

    /// The channel that receives [`debug_byte`](Self::debug_byte), if any.
    fn debug_channel(&self) -> Option<ChannelId> {
        None
    }

    /// Write one byte of debug output. Dropped without a debug channel.
    fn debug_byte(&mut self, byte: u8) {
        let Some(id) = self.debug_channel() else {
            return;
        };
        if let Some(port) = self.serial(id) {
            port.write(byte);
        }
    }

    fn set_status_indicator(&mut self, id: u8, on: bool) {
        self.set_led(id, on);
    }
}
