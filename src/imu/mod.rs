//! Inertial measurement acquisition.
//!
//! A board exposes its IMU as one of two variants, see [`Imu`]:
//! - [`RawImu`] delivers raw accelerometer and gyroscope samples.
//! - [`FusedImu`] additionally folds every sample into an orientation estimate.

use nalgebra::UnitQuaternion;

mod cell;
pub use cell::{CellDriver, SampleCell};

mod fusion;
pub use fusion::{FusionConfig, SoftwareQuaternion};

mod raw;
pub use raw::SampledImu;

/// Gyro scale (rad/s per LSB) of an MPU-6xxx at its 2000 dps full scale.
pub const MPU_GYRO_SCALE: f32 = (1. / 16.4) * (core::f32::consts::PI / 180.);

/// Raw accelerometer reading of 1 g at the MPU-6xxx 8 g full scale.
pub const MPU_ACC_1G: u16 = 4096;

/// One raw accelerometer and gyroscope reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SensorSample {
    pub accel: [i16; 3],
    pub gyro: [i16; 3],
}

impl SensorSample {
    pub const fn new(accel: [i16; 3], gyro: [i16; 3]) -> Self {
        Self { accel, gyro }
    }
}

/// Conversion from raw samples to physical units, fixed at [`imu_init`](RawImu::imu_init).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImuScale {
    /// Raw accelerometer reading of 1 g.
    pub acc_1g: u16,

    /// Radians per second per raw gyroscope LSB.
    pub gyro_scale: f32,
}

impl ImuScale {
    pub const MPU6500: Self = Self {
        acc_1g: MPU_ACC_1G,
        gyro_scale: MPU_GYRO_SCALE,
    };
}

/// Vendor IMU driver.
pub trait ImuDriver {
    /// Configure full-scale ranges and return the resulting scale.
    fn configure(&mut self) -> ImuScale;

    /// The newest sample, or `None` if nothing arrived since the last call.
    ///
    /// Must not block.
    fn sample(&mut self) -> Option<SensorSample>;
}

impl<T: ImuDriver + ?Sized> ImuDriver for &mut T {
    fn configure(&mut self) -> ImuScale {
        (**self).configure()
    }

    fn sample(&mut self) -> Option<SensorSample> {
        (**self).sample()
    }
}

/// An IMU exposing raw samples only.
pub trait RawImu {
    fn imu_init(&mut self) -> ImuScale;

    /// Fill `accel` and `gyro` with the newest sample.
    ///
    /// Re-delivers the previous sample when nothing new is pending.
    fn imu_read(&mut self, accel: &mut [i16; 3], gyro: &mut [i16; 3]);
}

/// An IMU maintaining an orientation estimate in software.
pub trait FusedImu {
    fn imu_init(&mut self) -> ImuScale;

    /// Fold a new sample into the estimate.
    ///
    /// Returns `false` when no new estimate was produced this call. The
    /// previous orientation then remains valid and unchanged.
    fn imu_read(&mut self) -> bool;

    /// The current estimate, or `None` before the first valid sample.
    fn orientation(&self) -> Option<UnitQuaternion<f32>>;

    fn is_ready(&self) -> bool {
        self.orientation().is_some()
    }
}

/// The IMU variant a board was built with.
pub enum Imu<'a> {
    Raw(&'a mut dyn RawImu),
    Fused(&'a mut dyn FusedImu),
}

impl Imu<'_> {
    pub fn imu_init(&mut self) -> ImuScale {
        match self {
            Imu::Raw(imu) => imu.imu_init(),
            Imu::Fused(imu) => imu.imu_init(),
        }
    }

    pub fn is_fused(&self) -> bool {
        matches!(self, Imu::Fused(_))
    }
}

/// Concrete IMU types a board can own.
pub trait ImuVariant {
    fn as_imu(&mut self) -> Imu<'_>;
}
