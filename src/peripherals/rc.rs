use super::{PulseCapture, Receiver};

/// A receiver wired to one PWM input per channel.
pub struct PwmReceiver<'a, const N: usize> {
    capture: &'a PulseCapture<N>,
}

impl<'a, const N: usize> PwmReceiver<'a, N> {
    pub fn new(capture: &'a PulseCapture<N>) -> Self {
        Self { capture }
    }
}

impl<const N: usize> Receiver for PwmReceiver<'_, N> {
    fn rc_read_pwm(&mut self, chan: u8) -> u16 {
        self.capture.width(chan as usize)
    }
}
