//! Per-board-family timing constants.

use crate::serial::ChannelId;
use crate::Error;

/// Main loop period used by most STM32F3 class boards.
pub const DEFAULT_IMU_LOOPTIME_USEC: u32 = 3500;

/// Startup window during which the core samples gyro bias.
pub const DEFAULT_GYRO_CALIBRATION_MSEC: u32 = 3500;

/// Loop and calibration timing returned by [`Board::init`](crate::Board::init).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopTiming {
    /// Period of the control loop (in microseconds).
    pub loop_time_us: u32,

    /// Duration of the startup gyro calibration (in milliseconds).
    pub calibration_ms: u32,
}

/// Compile-time configuration of a board family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub timing: LoopTiming,

    /// Serial channel behind [`Board::debug_byte`](crate::Board::debug_byte).
    pub debug_channel: Option<ChannelId>,
}

impl BoardConfig {
    pub const DEFAULT: Self = Self::new(DEFAULT_IMU_LOOPTIME_USEC, DEFAULT_GYRO_CALIBRATION_MSEC);

    pub const fn new(loop_time_us: u32, calibration_ms: u32) -> Self {
        Self {
            timing: LoopTiming {
                loop_time_us,
                calibration_ms,
            },
            debug_channel: None,
        }
    }

    pub const fn with_debug_channel(self, id: ChannelId) -> Self {
        Self {
            debug_channel: Some(id),
            ..self
        }
    }

    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Loop rate in hz derived from the loop period.
    pub fn loop_rate_hz(&self) -> f32 {
        1.0e6 / self.timing.loop_time_us as f32
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub struct Builder {
    loop_time_us: u32,
    calibration_ms: u32,
    debug_channel: Option<ChannelId>,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            loop_time_us: DEFAULT_IMU_LOOPTIME_USEC,
            calibration_ms: DEFAULT_GYRO_CALIBRATION_MSEC,
            debug_channel: None,
        }
    }
}

impl Builder {
    pub fn loop_time_us(mut self, us: u32) -> Self {
        self.loop_time_us = us;
        self
    }

    pub fn calibration_ms(mut self, ms: u32) -> Self {
        self.calibration_ms = ms;
        self
    }

    pub fn debug_channel(mut self, id: ChannelId) -> Self {
        self.debug_channel = Some(id);
        self
    }

    pub fn build(self) -> Result<BoardConfig, Error> {
        if self.loop_time_us == 0 {
            return Err(Error::InvalidConfig("loop time must be positive"));
        }
        if self.calibration_ms == 0 {
            return Err(Error::InvalidConfig("calibration window must be positive"));
        }
        if let Some(id) = self.debug_channel {
            if id.index().is_none() {
                return Err(Error::InvalidConfig("debug channels start at 1"));
            }
        }

        let config = BoardConfig::new(self.loop_time_us, self.calibration_ms);
        Ok(BoardConfig {
            debug_channel: self.debug_channel,
            ..config
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_rejects_zero_calibration() {
        let result = BoardConfig::builder().calibration_ms(0).build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn builder_defaults_match_constant() {
        let config = BoardConfig::builder().build().unwrap();
        assert_eq!(config, BoardConfig::DEFAULT);
        assert_eq!(config.timing.calibration_ms, DEFAULT_GYRO_CALIBRATION_MSEC);
    }

    #[test]
    fn loop_rate_from_period() {
        let config = BoardConfig::builder().loop_time_us(2500).build().unwrap();
        approx::assert_relative_eq!(config.loop_rate_hz(), 400.0);
    }

    #[test]
    fn builder_rejects_channel_zero_for_debug() {
        let result = BoardConfig::builder().debug_channel(ChannelId(0)).build();
        assert!(matches!(result, Err(Error::InvalidConfig(_))));

        let config = BoardConfig::builder()
            .debug_channel(ChannelId::SERIAL2)
            .build()
            .unwrap();
        assert_eq!(config.debug_channel, Some(ChannelId::SERIAL2));
        assert_eq!(BoardConfig::DEFAULT.debug_channel, None);
    }
}
