use embedded_hal::PwmPin;

use super::PwmEsc;
use crate::Error;

/// Pulse settings of a [`PwmEsc`], checked against each other on [`build`](Self::build).
pub struct Builder<T> {
    arm: T,
    min: T,
    max: Option<T>,
}

impl<T: Default> Default for Builder<T> {
    fn default() -> Self {
        Self {
            arm: T::default(),
            min: T::default(),
            max: None,
        }
    }
}

impl<T: Copy + PartialOrd> Builder<T> {
    /// Duty written while arming.
    pub fn arm(mut self, arm: T) -> Self {
        self.arm = arm;
        self
    }

    /// Duty of a zero command.
    pub fn min(mut self, min: T) -> Self {
        self.min = min;
        self
    }

    /// Duty of a full command. Defaults to the pin's maximum duty.
    pub fn max(mut self, max: T) -> Self {
        self.max = Some(max);
        self
    }

    pub fn build<P>(self, pin: P) -> Result<PwmEsc<P>, Error>
    where
        P: PwmPin<Duty = T>,
    {
        let max = self.max.unwrap_or_else(|| pin.get_max_duty());
        if self.min >= max {
            return Err(Error::InvalidConfig("esc min duty must be below max"));
        }
        if self.arm > max {
            return Err(Error::InvalidConfig("esc arm duty exceeds max"));
        }

        Ok(PwmEsc {
            arm: self.arm,
            min: self.min,
            max,
            pin,
        })
    }
}
