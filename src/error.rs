use embedded_time::{clock, ConversionError};

/// The bus that failed to come up during board bring-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bus {
    I2c(u8),
    Spi(u8),
}

/// A board error caused by timing, bring-up or actuator output
#[derive(Debug)]
pub enum Error {
    Clock(clock::Error),
    Time(ConversionError),
    Bus(Bus),
    InvalidConfig(&'static str),
    /// A motor command has no representable duty.
    DutyRange,
}

impl From<clock::Error> for Error {
    fn from(clock_error: clock::Error) -> Self {
        Error::Clock(clock_error)
    }
}

impl From<ConversionError> for Error {
    fn from(time_error: ConversionError) -> Self {
        Error::Time(time_error)
    }
}

impl From<Bus> for Error {
    fn from(bus: Bus) -> Self {
        Error::Bus(bus)
    }
}
