use embedded_time::Clock;
use nalgebra::{UnitQuaternion, Vector3};
use num_traits::Float;

use super::{FusedImu, Imu, ImuDriver, ImuScale, ImuVariant, SensorSample};
use crate::config::DEFAULT_IMU_LOOPTIME_USEC;
use crate::time::micros_since_epoch;

/// Gains of the complementary filter.
#[derive(Debug, Clone, Copy)]
pub struct FusionConfig {
    /// Proportional gain pulling the estimate towards the measured gravity vector.
    pub kp: f32,

    /// Integral gain estimating gyro bias. Zero disables bias estimation.
    pub ki: f32,

    /// Time step (in seconds) used when the clock can't be read.
    pub nominal_dt: f32,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            kp: 1.0,
            ki: 0.0,
            nominal_dt: DEFAULT_IMU_LOOPTIME_USEC as f32 * 1e-6,
        }
    }
}

/// A [`FusedImu`] running a complementary filter over raw samples.
///
/// The estimate rotates body frame vectors into an earth frame with z up.
/// It stays `None` until a sample with a usable gravity vector arrives,
/// which seeds roll and pitch (yaw starts at zero).
pub struct SoftwareQuaternion<D, C> {
    driver: D,
    clock: C,
    config: FusionConfig,
    scale: Option<ImuScale>,
    orientation: Option<UnitQuaternion<f32>>,
    integral: Vector3<f32>,
    gyro: Vector3<f32>,
    last: SensorSample,
    last_us: Option<u32>,
}

impl<D, C> SoftwareQuaternion<D, C>
where
    D: ImuDriver,
    C: Clock<T = u32>,
{
    pub fn new(driver: D, clock: C, config: FusionConfig) -> Self {
        Self {
            driver,
            clock,
            config,
            scale: None,
            orientation: None,
            integral: Vector3::zeros(),
            gyro: Vector3::zeros(),
            last: SensorSample::default(),
            last_us: None,
        }
    }

    /// Angular rate (rad/s) of the last sample.
    pub fn gyro_rates(&self) -> Vector3<f32> {
        self.gyro
    }

    pub fn last_sample(&self) -> SensorSample {
        self.last
    }

    fn now_us(&self) -> Option<u32> {
        match micros_since_epoch(&self.clock) {
            Ok(now) => Some(now.0),
            Err(error) => {
                log::warn!("fusion clock read failed: {:?}", error);
                None
            }
        }
    }

    fn step(&mut self, q: UnitQuaternion<f32>, accel: Vector3<f32>, dt: f32) -> UnitQuaternion<f32> {
        let mut omega = self.gyro;

        let norm = accel.norm();
        if norm > f32::EPSILON {
            let measured = accel / norm;
            let estimated = q.inverse_transform_vector(&Vector3::z());
            let error = measured.cross(&estimated);

            if self.config.ki > 0. {
                self.integral += error * self.config.ki * dt;
                omega += self.integral;
            }
            omega += error * self.config.kp;
        }

        let mut q = q * UnitQuaternion::from_scaled_axis(omega * dt);
        q.renormalize();
        q
    }
}

/// Roll and pitch from a gravity vector in the body frame.
fn level_from_gravity(accel: &Vector3<f32>) -> Option<UnitQuaternion<f32>> {
    if accel.norm() <= f32::EPSILON {
        return None;
    }
    let roll = Float::atan2(accel.y, accel.z);
    let pitch = Float::atan2(-accel.x, Float::sqrt(accel.y * accel.y + accel.z * accel.z));
    Some(UnitQuaternion::from_euler_angles(roll, pitch, 0.))
}

impl<D, C> FusedImu for SoftwareQuaternion<D, C>
where
    D: ImuDriver,
    C: Clock<T = u32>,
{
    fn imu_init(&mut self) -> ImuScale {
        if let Some(scale) = self.scale {
            log::warn!("imu already initialized");
            return scale;
        }

        let scale = self.driver.configure();
        log::info!(
            "fused imu configured: acc_1g={} gyro_scale={}",
            scale.acc_1g,
            scale.gyro_scale
        );
        self.scale = Some(scale);
        scale
    }

    fn imu_read(&mut self) -> bool {
        let Some(scale) = self.scale else {
            return false;
        };
        let Some(sample) = self.driver.sample() else {
            return false;
        };

        let accel = Vector3::from(sample.accel.map(f32::from)) / scale.acc_1g as f32;
        self.gyro = Vector3::from(sample.gyro.map(f32::from)) * scale.gyro_scale;
        self.last = sample;

        let now = self.now_us();
        let dt = match (now, self.last_us) {
            (Some(now), Some(last)) => now.wrapping_sub(last) as f32 * 1e-6,
            _ => self.config.nominal_dt,
        };
        if now.is_some() {
            self.last_us = now;
        }

        let q = match self.orientation {
            Some(q) => self.step(q, accel, dt),
            None => match level_from_gravity(&accel) {
                Some(q) => {
                    log::info!("orientation estimate ready");
                    q
                }
                None => return false,
            },
        };
        self.orientation = Some(q);

        true
    }

    fn orientation(&self) -> Option<UnitQuaternion<f32>> {
        self.orientation
    }
}

impl<D, C> ImuVariant for SoftwareQuaternion<D, C>
where
    D: ImuDriver,
    C: Clock<T = u32>,
{
    fn as_imu(&mut self) -> Imu<'_> {
        Imu::Fused(self)
    }
}
