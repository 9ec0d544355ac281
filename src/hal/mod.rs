pub mod esc;
pub use esc::{Builder, PwmEsc, ESC};

use crate::Error;

pub trait Actuator {
    /// Output a normalized command in [0, 1].
    ///
    /// On error the hardware output is unchanged.
    fn output(&mut self, output: f32) -> Result<(), Error>;
}

impl<T: Actuator + ?Sized> Actuator for &mut T {
    fn output(&mut self, output: f32) -> Result<(), Error> {
        (**self).output(output)
    }
}

/// Vendor UART configuration.
pub trait BaudRate {
    fn set_baud_rate(&mut self, baud: u32);
}
