use embedded_hal::digital::v2::OutputPin;

use super::StatusIndicator;

/// LED showing the armed state.
pub const ARMED_LED: u8 = 0;

/// LED lit while an auxiliary mode is active.
pub const AUX_LED: u8 = 1;

/// Status LEDs on output pins.
pub struct LedIndicator<P, const N: usize> {
    leds: [P; N],
    active_low: bool,
}

impl<P: OutputPin, const N: usize> LedIndicator<P, N> {
    pub fn new(leds: [P; N]) -> Self {
        Self {
            leds,
            active_low: false,
        }
    }

    /// LEDs wired to light when the pin is driven low.
    pub fn active_low(leds: [P; N]) -> Self {
        Self {
            leds,
            active_low: true,
        }
    }
}

impl<P: OutputPin, const N: usize> StatusIndicator for LedIndicator<P, N> {
    fn set_led(&mut self, id: u8, on: bool) {
        let Some(led) = self.leds.get_mut(id as usize) else {
            return;
        };

        let result = if on != self.active_low {
            led.set_high()
        } else {
            led.set_low()
        };
        if result.is_err() {
            log::debug!("failed to drive led {}", id);
        }
    }

    fn show_armed_status(&mut self, armed: bool) {
        self.set_led(ARMED_LED, armed);
    }

    fn show_aux_status(&mut self, status: u8) {
        self.set_led(AUX_LED, status > 0);
    }
}
