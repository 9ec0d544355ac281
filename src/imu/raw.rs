use super::{Imu, ImuDriver, ImuScale, ImuVariant, RawImu, SensorSample};

/// A [`RawImu`] that re-delivers its last sample when the driver has nothing new.
pub struct SampledImu<D> {
    driver: D,
    scale: Option<ImuScale>,
    last: SensorSample,
}

impl<D: ImuDriver> SampledImu<D> {
    pub fn new(driver: D) -> Self {
        Self {
            driver,
            scale: None,
            last: SensorSample::default(),
        }
    }

    pub fn scale(&self) -> Option<ImuScale> {
        self.scale
    }

    pub fn last_sample(&self) -> SensorSample {
        self.last
    }
}

impl<D: ImuDriver> RawImu for SampledImu<D> {
    fn imu_init(&mut self) -> ImuScale {
        if let Some(scale) = self.scale {
            log::warn!("imu already initialized");
            return scale;
        }

        let scale = self.driver.configure();
        log::info!(
            "imu configured: acc_1g={} gyro_scale={}",
            scale.acc_1g,
            scale.gyro_scale
        );
        self.scale = Some(scale);
        scale
    }

    fn imu_read(&mut self, accel: &mut [i16; 3], gyro: &mut [i16; 3]) {
        // Before init the zeroed default sample is delivered
        if self.scale.is_some() {
            if let Some(sample) = self.driver.sample() {
                self.last = sample;
            }
        }

        *accel = self.last.accel;
        *gyro = self.last.gyro;
    }
}

impl<D: ImuDriver> ImuVariant for SampledImu<D> {
    fn as_imu(&mut self) -> Imu<'_> {
        Imu::Raw(self)
    }
}
