use crate::hal::ESC;

/// Per-channel motor output with the last commanded value of each channel.
pub trait MotorOutput {
    /// Number of motor channels on this board.
    fn count(&self) -> usize;

    /// Command motor `index` to `value` in [0, 1].
    ///
    /// An index past [`count`](Self::count) is ignored, as is a command the
    /// ESC could not output.
    fn write_motor(&mut self, index: u8, value: f32);

    /// The last value commanded to motor `index`.
    fn last_motor(&self, index: u8) -> Option<f32>;

    /// Arm every motor.
    fn arm(&mut self);
}

/// A fixed set of `N` ESCs.
pub struct Motors<E, const N: usize> {
    escs: [E; N],
    last: [f32; N],
}

impl<E, const N: usize> Motors<E, N> {
    pub fn new(escs: [E; N]) -> Self {
        Self {
            escs,
            last: [0.; N],
        }
    }

    pub fn escs(&self) -> &[E; N] {
        &self.escs
    }
}

impl<E: ESC> Motors<E, 4> {
    pub fn quad(a: E, b: E, c: E, d: E) -> Self {
        Self::new([a, b, c, d])
    }
}

/// Clamp a command to [0, 1]. NaN turns the motor off.
fn constrain_command(value: f32) -> f32 {
    if value.is_nan() {
        return 0.;
    }
    value.max(0.).min(1.)
}

impl<E: ESC, const N: usize> MotorOutput for Motors<E, N> {
    fn count(&self) -> usize {
        N
    }

    fn write_motor(&mut self, index: u8, value: f32) {
        let index = index as usize;
        let Some(esc) = self.escs.get_mut(index) else {
            log::trace!("ignoring write to motor {} of {}", index, N);
            return;
        };

        let value = constrain_command(value);
        match esc.output(value) {
            Ok(()) => self.last[index] = value,
            Err(error) => log::warn!("motor {} rejected {}: {:?}", index, value, error),
        }
    }

    fn last_motor(&self, index: u8) -> Option<f32> {
        self.last.get(index as usize).copied()
    }

    fn arm(&mut self) {
        for esc in &mut self.escs {
            esc.arm();
        }
        self.last = [0.; N];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::{Actuator, PwmEsc};
    use crate::mock::{FakePwm, FakeWidePwm};
    use crate::Error;

    fn quad() -> (Motors<PwmEsc<FakePwm>, 4>, [FakePwm; 4]) {
        let pins = [
            FakePwm::new(2000),
            FakePwm::new(2000),
            FakePwm::new(2000),
            FakePwm::new(2000),
        ];
        let escs = pins
            .clone()
            .map(|pin| PwmEsc::new(1000, 1000, 2000, pin));
        (Motors::new(escs), pins)
    }

    #[test]
    fn out_of_range_index_is_ignored() {
        let (mut motors, pins) = quad();
        motors.write_motor(0, 0.25);
        motors.write_motor(3, 0.75);

        motors.write_motor(4, 1.0);
        motors.write_motor(u8::MAX, 1.0);

        assert_eq!(motors.last_motor(0), Some(0.25));
        assert_eq!(motors.last_motor(3), Some(0.75));
        assert_eq!(motors.last_motor(4), None);
        assert_eq!(pins[0].duty(), 1250);
        assert_eq!(pins[1].duty(), 0);
    }

    #[test]
    fn round_trips_at_domain_boundaries() {
        let (mut motors, _) = quad();
        for value in [0.0, 0.5, 1.0] {
            motors.write_motor(1, value);
            assert_eq!(motors.last_motor(1), Some(value));
        }
    }

    #[test]
    fn clamps_commands() {
        let (mut motors, pins) = quad();

        motors.write_motor(2, 1.5);
        assert_eq!(motors.last_motor(2), Some(1.0));
        assert_eq!(pins[2].duty(), 2000);

        motors.write_motor(2, -0.5);
        assert_eq!(motors.last_motor(2), Some(0.0));

        motors.write_motor(2, f32::NAN);
        assert_eq!(motors.last_motor(2), Some(0.0));
        assert_eq!(pins[2].duty(), 1000);
    }

    #[test]
    fn repeated_write_is_idempotent() {
        let (mut motors, pins) = quad();
        motors.write_motor(0, 0.6);
        let duty = pins[0].duty();
        motors.write_motor(0, 0.6);
        assert_eq!(pins[0].duty(), duty);
    }

    #[test]
    fn full_throttle_on_32_bit_timer_round_trips() {
        let pin = FakeWidePwm::default();
        let esc = PwmEsc::<FakeWidePwm>::builder()
            .min(0)
            .build(pin.clone())
            .unwrap();
        let mut motors = Motors::new([esc]);

        motors.write_motor(0, 0.5);
        let half = pin.duty();
        motors.write_motor(0, 1.0);

        assert!(pin.duty() > half);
        assert_eq!(pin.duty(), u32::MAX);
        assert_eq!(motors.last_motor(0), Some(1.0));
    }

    /// An ESC whose output stage refuses every command.
    struct Stuck;

    impl Actuator for Stuck {
        fn output(&mut self, _output: f32) -> Result<(), Error> {
            Err(Error::DutyRange)
        }
    }

    impl ESC for Stuck {
        fn arm(&mut self) {}
    }

    #[test]
    fn rejected_command_keeps_last_value() {
        let mut motors = Motors::new([Stuck]);
        motors.write_motor(0, 0.8);
        assert_eq!(motors.last_motor(0), Some(0.0));
    }
}
