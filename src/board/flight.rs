use super::{Board, Platform};
use crate::config::{BoardConfig, LoopTiming};
use crate::imu::{Imu, ImuVariant};
use crate::motor::MotorOutput;
use crate::peripherals::{Barometer, Receiver, Sonar, StatusIndicator};
use crate::serial::{ChannelId, SerialChannel};
use crate::time::Timing;

/// A [`Board`] assembled from its parts.
///
/// - `P`: vendor bring-up and reset
/// - `I`: the IMU, either a [`SampledImu`](crate::imu::SampledImu) or a
///   [`SoftwareQuaternion`](crate::imu::SoftwareQuaternion)
/// - `T`: clock and delays
/// - `M`: motor outputs
/// - `S`: serial ports, `K` of them, reachable as channels `1..=K`
/// - `X`: optional peripherals, see [`Peripherals`](crate::peripherals::Peripherals)
pub struct FlightBoard<P, I, T, M, S, X, const K: usize> {
    platform: P,
    imu: I,
    timer: T,
    motors: M,
    serials: [S; K],
    peripherals: X,
    config: BoardConfig,
    is_initialised: bool,
}

impl<P, I, T, M, S, X, const K: usize> FlightBoard<P, I, T, M, S, X, K>
where
    P: Platform,
    I: ImuVariant,
    T: Timing,
    M: MotorOutput,
    S: SerialChannel,
    X: Barometer + Sonar + Receiver + StatusIndicator,
{
    pub fn new(
        config: BoardConfig,
        platform: P,
        imu: I,
        timer: T,
        motors: M,
        serials: [S; K],
        peripherals: X,
    ) -> Self {
        Self {
            platform,
            imu,
            timer,
            motors,
            serials,
            peripherals,
            config,
            is_initialised: false,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn is_initialised(&self) -> bool {
        self.is_initialised
    }

    /// The concrete IMU, for variant specific queries like gyro rates.
    pub fn imu_variant(&self) -> &I {
        &self.imu
    }

    pub fn peripherals_mut(&mut self) -> &mut X {
        &mut self.peripherals
    }

    pub fn arm_motors(&mut self) {
        self.motors.arm();
    }
}

impl<P, I, T, M, S, X, const K: usize> Barometer for FlightBoard<P, I, T, M, S, X, K>
where
    X: Barometer,
{
    fn baro_init(&mut self) -> bool {
        self.peripherals.baro_init()
    }

    fn baro_update(&mut self) {
        self.peripherals.baro_update()
    }

    fn baro_pressure(&self) -> i32 {
        self.peripherals.baro_pressure()
    }
}

impl<P, I, T, M, S, X, const K: usize> Sonar for FlightBoard<P, I, T, M, S, X, K>
where
    X: Sonar,
{
    fn sonar_init(&mut self, index: u8) -> bool {
        self.peripherals.sonar_init(index)
    }

    fn sonar_update(&mut self, index: u8) {
        self.peripherals.sonar_update(index)
    }

    fn sonar_distance(&self, index: u8) -> u16 {
        self.peripherals.sonar_distance(index)
    }
}

impl<P, I, T, M, S, X, const K: usize> Receiver for FlightBoard<P, I, T, M, S, X, K>
where
    X: Receiver,
{
    fn rc_use_serial(&self) -> bool {
        self.peripherals.rc_use_serial()
    }

    fn rc_serial_ready(&mut self) -> bool {
        self.peripherals.rc_serial_ready()
    }

    fn rc_read_serial(&mut self, chan: u8) -> u16 {
        self.peripherals.rc_read_serial(chan)
    }

    fn rc_read_pwm(&mut self, chan: u8) -> u16 {
        self.peripherals.rc_read_pwm(chan)
    }
}

impl<P, I, T, M, S, X, const K: usize> StatusIndicator for FlightBoard<P, I, T, M, S, X, K>
where
    X: StatusIndicator,
{
    fn set_led(&mut self, id: u8, on: bool) {
        self.peripherals.set_led(id, on)
    }

    fn show_armed_status(&mut self, armed: bool) {
        self.peripherals.show_armed_status(armed)
    }

    fn show_aux_status(&mut self, status: u8) {
        self.peripherals.show_aux_status(status)
    }
}

impl<P, I, T, M, S, X, const K: usize> Board for FlightBoard<P, I, T, M, S, X, K>
where
    P: Platform,
    I: ImuVariant,
    T: Timing,
    M: MotorOutput,
    S: SerialChannel,
    X: Barometer + Sonar + Receiver + StatusIndicator,
{
    fn init(&mut self) -> LoopTiming {
        if self.is_initialised {
            log::warn!("board already initialized");
            return self.config.timing;
        }

        if let Err(error) = self.platform.init_buses() {
            log::error!("board bring-up failed: {:?}", error);
            self.platform.halt(error);
        }
        self.is_initialised = true;

        let timing = self.config.timing;
        log::info!(
            "board up: loop {}us, gyro calibration {}ms, {} motors",
            timing.loop_time_us,
            timing.calibration_ms,
            self.motors.count()
        );
        timing
    }

    fn imu(&mut self) -> Imu<'_> {
        self.imu.as_imu()
    }

    fn motor_count(&self) -> usize {
        self.motors.count()
    }

    fn write_motor(&mut self, index: u8, value: f32) {
        self.motors.write_motor(index, value)
    }

    fn last_motor(&self, index: u8) -> Option<f32> {
        self.motors.last_motor(index)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.timer.delay_ms(ms)
    }

    fn delay_seconds(&mut self, sec: f32) {
        self.timer.delay_seconds(sec)
    }

    fn micros(&mut self) -> u32 {
        self.timer.micros()
    }

    fn reboot(&mut self) -> ! {
        for port in self.serials.iter_mut().filter(|port| port.is_open()) {
            port.flush();
        }
        log::info!("rebooting to bootloader");
        self.platform.reset_to_bootloader()
    }

    fn serial(&mut self, id: ChannelId) -> Option<&mut dyn SerialChannel> {
        let port = self.serials.get_mut(id.index()?)?;
        Some(port as &mut dyn SerialChannel)
    }

    fn debug_channel(&self) -> Option<ChannelId> {
        self.config.debug_channel
    }
}
