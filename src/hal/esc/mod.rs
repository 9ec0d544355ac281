mod builder;
pub use builder::Builder;

use embedded_hal::PwmPin;
use num_traits::{NumCast, ToPrimitive};

use super::Actuator;
use crate::Error;

/// Electronic speed controller
pub trait ESC: Actuator {
    /// Arm this ESC.
    fn arm(&mut self);
}

impl<T: ESC + ?Sized> ESC for &mut T {
    fn arm(&mut self) {
        (**self).arm()
    }
}

/// An ESC driven by a PWM pin with a linear duty range.
///
/// A command of `0.0` maps to `min` and `1.0` maps to `max`.
pub struct PwmEsc<T: PwmPin> {
    arm: T::Duty,
    min: T::Duty,
    max: T::Duty,
    pin: T,
}

impl<T> PwmEsc<T>
where
    T: PwmPin,
    T::Duty: Copy + NumCast + ToPrimitive,
{
    pub fn new(arm: T::Duty, min: T::Duty, max: T::Duty, pin: T) -> Self {
        Self { arm, min, max, pin }
    }

    pub fn builder() -> Builder<T::Duty>
    where
        T::Duty: Default,
    {
        Builder::default()
    }

    pub fn pin(&self) -> &T {
        &self.pin
    }

    /// Duty for `output`, kept inside `min..=max`.
    ///
    /// Computed in `f64` so every 32-bit duty is exact.
    fn duty(&self, output: f32) -> Option<T::Duty> {
        let min = self.min.to_f64()?;
        let max = self.max.to_f64()?;
        let duty = min + <f64 as From<f32>>::from(output) * (max - min);
        <T::Duty as NumCast>::from(duty.max(min).min(max))
    }
}

impl<T> Actuator for PwmEsc<T>
where
    T: PwmPin,
    T::Duty: Copy + NumCast + ToPrimitive,
{
    fn output(&mut self, output: f32) -> Result<(), Error> {
        let duty = self.duty(output).ok_or(Error::DutyRange)?;
        self.pin.set_duty(duty);
        Ok(())
    }
}

impl<T> ESC for PwmEsc<T>
where
    T: PwmPin,
    T::Duty: Copy + NumCast + ToPrimitive,
{
    fn arm(&mut self) {
        self.pin.set_duty(self.arm)
    }
}
