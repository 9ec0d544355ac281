//! Optional peripherals.
//!
//! Every method has a default that reports the peripheral as unsupported:
//! `*_init` returns `false` and every query returns a neutral zero. The core
//! can poll the full set on any board.

mod baro;
pub use baro::{FilteredBarometer, PressureSensor};

mod capture;
pub use capture::PulseCapture;

mod rc;
pub use rc::PwmReceiver;

mod sonar;
pub use sonar::{EchoSonar, MAX_RANGE_CM};

mod status;
pub use status::{LedIndicator, ARMED_LED, AUX_LED};

pub trait Barometer {
    fn baro_init(&mut self) -> bool {
        false
    }

    fn baro_update(&mut self) {}

    /// Pressure in pascals, 0 when unsupported.
    fn baro_pressure(&self) -> i32 {
        0
    }
}

pub trait Sonar {
    fn sonar_init(&mut self, index: u8) -> bool {
        let _ = index;
        false
    }

    fn sonar_update(&mut self, index: u8) {
        let _ = index;
    }

    /// Distance in centimetres, 0 when unsupported.
    fn sonar_distance(&self, index: u8) -> u16 {
        let _ = index;
        0
    }
}

/// Write-only board status outputs.
pub trait StatusIndicator {
    fn set_led(&mut self, id: u8, on: bool) {
        let _ = (id, on);
    }

    fn show_armed_status(&mut self, armed: bool) {
        let _ = armed;
    }

    fn show_aux_status(&mut self, status: u8) {
        let _ = status;
    }
}

/// Pilot receiver input.
pub trait Receiver {
    /// `true` for serial receivers, `false` for per-channel PWM inputs.
    fn rc_use_serial(&self) -> bool {
        false
    }

    /// A fresh serial frame has been decoded.
    fn rc_serial_ready(&mut self) -> bool {
        false
    }

    fn rc_read_serial(&mut self, chan: u8) -> u16 {
        let _ = chan;
        0
    }

    /// Pulse width (in microseconds) of PWM input `chan`.
    fn rc_read_pwm(&mut self, chan: u8) -> u16 {
        let _ = chan;
        0
    }

    /// Read `chan` from whichever input kind this board has.
    fn rc_read(&mut self, chan: u8) -> u16 {
        if self.rc_use_serial() {
            self.rc_read_serial(chan)
        } else {
            self.rc_read_pwm(chan)
        }
    }
}

/// A peripheral that isn't populated on this board.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unsupported;

impl Barometer for Unsupported {}

impl Sonar for Unsupported {}

impl StatusIndicator for Unsupported {}

impl Receiver for Unsupported {}

/// The optional peripheral set of a board.
#[derive(Debug, Default)]
pub struct Peripherals<B = Unsupported, S = Unsupported, R = Unsupported, L = Unsupported> {
    pub baro: B,
    pub sonar: S,
    pub rc: R,
    pub status: L,
}

impl<B, S, R, L> Peripherals<B, S, R, L> {
    pub fn new(baro: B, sonar: S, rc: R, status: L) -> Self {
        Self {
            baro,
            sonar,
            rc,
            status,
        }
    }
}

impl Peripherals {
    /// A board with no optional peripherals.
    pub fn none() -> Self {
        Self::default()
    }
}

impl<B: Barometer, S, R, L> Barometer for Peripherals<B, S, R, L> {
    fn baro_init(&mut self) -> bool {
        self.baro.baro_init()
    }

    fn baro_update(&mut self) {
        self.baro.baro_update()
    }

    fn baro_pressure(&self) -> i32 {
        self.baro.baro_pressure()
    }
}

impl<B, S: Sonar, R, L> Sonar for Peripherals<B, S, R, L> {
    fn sonar_init(&mut self, index: u8) -> bool {
        self.sonar.sonar_init(index)
    }

    fn sonar_update(&mut self, index: u8) {
        self.sonar.sonar_update(index)
    }

    fn sonar_distance(&self, index: u8) -> u16 {
        self.sonar.sonar_distance(index)
    }
}

impl<B, S, R: Receiver, L> Receiver for Peripherals<B, S, R, L> {
    fn rc_use_serial(&self) -> bool {
        self.rc.rc_use_serial()
    }

    fn rc_serial_ready(&mut self) -> bool {
        self.rc.rc_serial_ready()
    }

    fn rc_read_serial(&mut self, chan: u8) -> u16 {
        self.rc.rc_read_serial(chan)
    }

    fn rc_read_pwm(&mut self, chan: u8) -> u16 {
        self.rc.rc_read_pwm(chan)
    }
}

impl<B, S, R, L: StatusIndicator> StatusIndicator for Peripherals<B, S, R, L> {
    fn set_led(&mut self, id: u8, on: bool) {
        self.status.set_led(id, on)
    }

    fn show_armed_status(&mut self, armed: bool) {
        self.status.show_armed_status(armed)
    }

    fn show_aux_status(&mut self, status: u8) {
        self.status.show_aux_status(status)
    }
}
