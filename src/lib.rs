//! # embedded-flight-board
//! A `#![no_std]` board abstraction layer for flight controllers.
//!
//! A flight-control core is written once against the [`Board`] trait and
//! runs on any board implementing it. The core pulls everything from its
//! loop: time from [`Board::micros`], samples through [`Board::imu`],
//! motor commands into [`Board::write_motor`], and bytes from
//! [`Board::serial`] channels.
//!
//! # Components
//! [`imu`] holds the two IMU variants: raw samples ([`imu::SampledImu`]) or a
//! software orientation estimate ([`imu::SoftwareQuaternion`]).
//!
//! [`serial`] contains the polling byte transport and bounded `printf`.
//!
//! [`motor`] and [`hal`] map normalized motor commands onto PWM pulses.
//!
//! [`peripherals`] contains barometer, sonar, receiver and status LED support.
//! Anything a board lacks reads as unsupported with neutral values.
//!
//! [`FlightBoard`] assembles a [`Board`] from these parts:
//! ```ignore
//! use embedded_flight_board::{Board, BoardConfig, FlightBoard, Imu};
//! use embedded_flight_board::imu::{SoftwareQuaternion, FusionConfig};
//! use embedded_flight_board::motor::Motors;
//! use embedded_flight_board::peripherals::Peripherals;
//!
//! let mut board = FlightBoard::new(
//!     BoardConfig::DEFAULT,
//!     platform,
//!     SoftwareQuaternion::new(mpu, clock, FusionConfig::default()),
//!     timer,
//!     Motors::quad(m1, m2, m3, m4),
//!     [serial1, serial2],
//!     Peripherals::none(),
//! );
//!
//! let timing = board.init();
//! let scale = board.imu_init();
//! loop {
//!     if let Imu::Fused(imu) = board.imu() {
//!         if imu.imu_read() { /* new orientation */ }
//!     }
//!     board.write_motor(0, 0.1);
//! }
//! ```

#![cfg_attr(not(test), no_std)]

pub mod board;
pub use board::{Board, FlightBoard, Platform};

pub mod config;
pub use config::{BoardConfig, LoopTiming};

mod error;
pub use error::{Bus, Error};

pub mod filter;

pub mod hal;
pub use hal::{Actuator, ESC};

pub mod imu;
pub use imu::Imu;

pub mod motor;

pub mod peripherals;

pub mod serial;

pub mod time;
pub use time::Timing;

#[cfg(test)]
mod mock;
