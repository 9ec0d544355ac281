use embedded_hal::blocking::delay::DelayMs;
use embedded_time::{duration::Microseconds, Clock};

use crate::Error;

/// Monotonic time and blocking delays.
pub trait Timing {
    /// Microseconds since boot. Wraps at `u32::MAX`.
    fn micros(&mut self) -> u32;

    /// Block for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Block for a fractional number of seconds.
    fn delay_seconds(&mut self, sec: f32) {
        if sec > 0. {
            self.delay_ms((sec * 1000.) as u32);
        }
    }
}

/// Read the time since the clock's epoch.
pub fn micros_since_epoch<C>(clock: &C) -> Result<Microseconds<u32>, Error>
where
    C: Clock<T = u32>,
{
    let instant = clock.try_now()?;
    Microseconds::try_from(instant.duration_since_epoch()).map_err(Into::into)
}

/// [`Timing`] from a vendor clock and delay provider.
pub struct SystemTimer<C, D> {
    clock: C,
    delay: D,
    last_us: u32,
}

impl<C, D> SystemTimer<C, D>
where
    C: Clock<T = u32>,
    D: DelayMs<u32>,
{
    pub fn new(clock: C, delay: D) -> Self {
        Self {
            clock,
            delay,
            last_us: 0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C, D> Timing for SystemTimer<C, D>
where
    C: Clock<T = u32>,
    D: DelayMs<u32>,
{
    fn micros(&mut self) -> u32 {
        match micros_since_epoch(&self.clock) {
            Ok(now) => {
                self.last_us = now.0;
            }
            // Hold the last reading so callers never see time go backwards
            Err(error) => log::warn!("clock read failed: {:?}", error),
        }
        self.last_us
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }
}
