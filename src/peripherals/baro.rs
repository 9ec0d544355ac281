use super::Barometer;
use crate::filter::LowPassFilter;

/// Vendor pressure sensor driver.
pub trait PressureSensor {
    /// Probe and configure the sensor. `false` if it isn't present.
    fn init(&mut self) -> bool;

    /// Newest pressure reading in pascals, if a conversion finished.
    fn read_pressure(&mut self) -> Option<i32>;
}

/// A [`Barometer`] smoothing its sensor with a low pass filter.
pub struct FilteredBarometer<P> {
    sensor: P,
    filter: LowPassFilter,
    is_present: bool,
}

impl<P: PressureSensor> FilteredBarometer<P> {
    /// `update_hz` is the rate the core calls [`baro_update`](Barometer::baro_update).
    pub fn new(sensor: P, update_hz: f32, cutoff_hz: f32) -> Self {
        Self {
            sensor,
            filter: LowPassFilter::with_sample_rate_and_cutoff(update_hz, cutoff_hz),
            is_present: false,
        }
    }
}

impl<P: PressureSensor> Barometer for FilteredBarometer<P> {
    fn baro_init(&mut self) -> bool {
        self.is_present = self.sensor.init();
        if !self.is_present {
            log::info!("no barometer found");
        }
        self.is_present
    }

    fn baro_update(&mut self) {
        if !self.is_present {
            return;
        }
        if let Some(pressure) = self.sensor.read_pressure() {
            self.filter.apply(pressure as f32);
        }
    }

    fn baro_pressure(&self) -> i32 {
        if self.is_present && self.filter.is_initialised() {
            self.filter.output() as i32
        } else {
            0
        }
    }
}
