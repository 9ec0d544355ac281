//! Polling byte-stream transport.
//!
//! Every channel starts unopened and opens with [`SerialChannel::begin`].
//! Only [`flush`](SerialChannel::flush) and [`printf`](SerialChannel::printf)
//! block; neither belongs in the control loop.

use core::fmt;

mod format;
pub use format::{render, Truncating, PRINTF_CAPACITY};

mod port;
pub use port::SerialPort;

/// Identifier of a hardware serial port, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId(pub u8);

impl ChannelId {
    pub const SERIAL1: Self = Self(1);
    pub const SERIAL2: Self = Self(2);
    pub const SERIAL3: Self = Self(3);

    /// The zero-based slot of this channel in a board's port array.
    pub fn index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

pub trait SerialChannel {
    fn id(&self) -> ChannelId;

    /// Open the channel, or reconfigure it if already open.
    fn begin(&mut self, baud: u32);

    fn is_open(&self) -> bool;

    /// Number of received bytes ready to [`read`](Self::read). Never blocks.
    fn available(&mut self) -> usize;

    /// Take one received byte.
    ///
    /// Callers check [`available`](Self::available) first. With nothing
    /// pending this returns 0.
    fn read(&mut self) -> u8;

    /// Queue one byte for transmission.
    fn write(&mut self, byte: u8);

    /// Block until every written byte has left the transmitter.
    fn flush(&mut self);

    /// Render `args` into a bounded buffer, write it out and flush.
    ///
    /// Output past [`PRINTF_CAPACITY`] bytes is dropped.
    fn printf(&mut self, args: fmt::Arguments<'_>) {
        let message = render::<PRINTF_CAPACITY>(args);
        for byte in message.as_str().bytes() {
            self.write(byte);
        }
        self.flush();
    }
}

impl<T: SerialChannel + ?Sized> SerialChannel for &mut T {
    fn id(&self) -> ChannelId {
        (**self).id()
    }

    fn begin(&mut self, baud: u32) {
        (**self).begin(baud)
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn available(&mut self) -> usize {
        (**self).available()
    }

    fn read(&mut self) -> u8 {
        (**self).read()
    }

    fn write(&mut self, byte: u8) {
        (**self).write(byte)
    }

    fn flush(&mut self) {
        (**self).flush()
    }

    fn printf(&mut self, args: fmt::Arguments<'_>) {
        (**self).printf(args)
    }
}

/// Formatted, blocking output on a [`SerialChannel`].
///
/// ```ignore
/// serial_printf!(port, "gyro {} {} {}\r\n", gx, gy, gz);
/// ```
#[macro_export]
macro_rules! serial_printf {
    ($channel:expr, $($arg:tt)*) => {
        $crate::serial::SerialChannel::printf(&mut $channel, format_args!($($arg)*))
    };
}
