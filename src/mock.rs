//! In-memory stand-ins for vendor services, for host tests.
//!
//! Every fake is a cheap handle over shared state, so a test keeps a clone
//! to inspect what the board did with the one it owns.

use core::cell::{Cell, RefCell};
use core::convert::Infallible;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;
use embedded_hal::serial;
use embedded_hal::PwmPin;
use embedded_time::{clock, rate::Fraction, Clock, Instant};

use crate::board::Platform;
use crate::hal::BaudRate;
use crate::imu::{ImuDriver, ImuScale, SensorSample};
use crate::peripherals::PressureSensor;
use crate::Error;

/// A microsecond clock moved by hand.
#[derive(Clone, Default)]
pub struct FakeClock {
    now: Rc<Cell<u32>>,
    failing: Rc<Cell<bool>>,
}

impl FakeClock {
    pub fn set(&self, us: u32) {
        self.now.set(us);
    }

    pub fn advance(&self, us: u32) {
        self.now.set(self.now.get().wrapping_add(us));
    }

    pub fn fail(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl Clock for FakeClock {
    type T = u32;

    const SCALING_FACTOR: Fraction = Fraction::new(1, 1_000_000);

    fn try_now(&self) -> Result<Instant<Self>, clock::Error> {
        if self.failing.get() {
            return Err(clock::Error::NotRunning);
        }
        Ok(Instant::new(self.now.get()))
    }
}

/// A delay that only records how long it was asked to wait.
#[derive(Clone, Default)]
pub struct FakeDelay {
    total_ms: Rc<Cell<u32>>,
}

impl FakeDelay {
    pub fn total_ms(&self) -> u32 {
        self.total_ms.get()
    }
}

impl DelayMs<u32> for FakeDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.total_ms.set(self.total_ms.get() + ms);
    }
}

#[derive(Clone)]
pub struct FakePwm {
    duty: Rc<Cell<u16>>,
    max: u16,
}

impl FakePwm {
    pub fn new(max: u16) -> Self {
        Self {
            duty: Rc::default(),
            max,
        }
    }

    pub fn duty(&self) -> u16 {
        self.duty.get()
    }
}

impl PwmPin for FakePwm {
    type Duty = u16;

    fn disable(&mut self) {}

    fn enable(&mut self) {}

    fn get_duty(&self) -> u16 {
        self.duty.get()
    }

    fn get_max_duty(&self) -> u16 {
        self.max
    }

    fn set_duty(&mut self, duty: u16) {
        self.duty.set(duty);
    }
}

/// A PWM channel on a 32-bit timer running at full period.
#[derive(Clone, Default)]
pub struct FakeWidePwm {
    duty: Rc<Cell<u32>>,
}

impl FakeWidePwm {
    pub fn duty(&self) -> u32 {
        self.duty.get()
    }
}

impl PwmPin for FakeWidePwm {
    type Duty = u32;

    fn disable(&mut self) {}

    fn enable(&mut self) {}

    fn get_duty(&self) -> u32 {
        self.duty.get()
    }

    fn get_max_duty(&self) -> u32 {
        u32::MAX
    }

    fn set_duty(&mut self, duty: u32) {
        self.duty.set(duty);
    }
}

#[derive(Clone, Default)]
pub struct FakePin {
    high: Rc<Cell<bool>>,
}

impl FakePin {
    pub fn is_high(&self) -> bool {
        self.high.get()
    }
}

impl OutputPin for FakePin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Infallible> {
        self.high.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.high.set(true);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartEvent {
    Write(u8),
    Flush,
}

#[derive(Default)]
struct UartState {
    // `None` marks a framing error
    rx: VecDeque<Option<u8>>,
    events: Vec<UartEvent>,
    baud: Option<u32>,
    stalled_writes: u32,
    stalled_flushes: u32,
}

/// A UART recording everything written to it.
#[derive(Clone, Default)]
pub struct FakeUart {
    state: Rc<RefCell<UartState>>,
}

impl FakeUart {
    pub fn receive(&self, bytes: &[u8]) {
        self.state
            .borrow_mut()
            .rx
            .extend(bytes.iter().copied().map(Some));
    }

    pub fn receive_error(&self) {
        self.state.borrow_mut().rx.push_back(None);
    }

    /// Report a full transmit FIFO for the next `n` writes.
    pub fn stall_writes(&self, n: u32) {
        self.state.borrow_mut().stalled_writes = n;
    }

    /// Report a busy transmitter for the next `n` flush polls.
    pub fn stall_flush(&self, n: u32) {
        self.state.borrow_mut().stalled_flushes = n;
    }

    pub fn events(&self) -> Vec<UartEvent> {
        self.state.borrow().events.clone()
    }

    pub fn written(&self) -> Vec<u8> {
        self.state
            .borrow()
            .events
            .iter()
            .filter_map(|event| match event {
                UartEvent::Write(byte) => Some(*byte),
                UartEvent::Flush => None,
            })
            .collect()
    }

    pub fn baud(&self) -> Option<u32> {
        self.state.borrow().baud
    }
}

impl serial::Read<u8> for FakeUart {
    type Error = ();

    fn read(&mut self) -> nb::Result<u8, ()> {
        match self.state.borrow_mut().rx.pop_front() {
            Some(Some(byte)) => Ok(byte),
            Some(None) => Err(nb::Error::Other(())),
            None => Err(nb::Error::WouldBlock),
        }
    }
}

impl serial::Write<u8> for FakeUart {
    type Error = ();

    fn write(&mut self, byte: u8) -> nb::Result<(), ()> {
        let mut state = self.state.borrow_mut();
        if state.stalled_writes > 0 {
            state.stalled_writes -= 1;
            return Err(nb::Error::WouldBlock);
        }
        state.events.push(UartEvent::Write(byte));
        Ok(())
    }

    fn flush(&mut self) -> nb::Result<(), ()> {
        let mut state = self.state.borrow_mut();
        if state.stalled_flushes > 0 {
            state.stalled_flushes -= 1;
            return Err(nb::Error::WouldBlock);
        }
        state.events.push(UartEvent::Flush);
        Ok(())
    }
}

impl BaudRate for FakeUart {
    fn set_baud_rate(&mut self, baud: u32) {
        self.state.borrow_mut().baud = Some(baud);
    }
}

#[derive(Default)]
struct ImuState {
    samples: VecDeque<SensorSample>,
    configure_calls: u32,
}

/// An IMU driver fed sample by sample.
#[derive(Clone, Default)]
pub struct FakeImuDriver {
    state: Rc<RefCell<ImuState>>,
}

impl FakeImuDriver {
    pub fn push(&self, sample: SensorSample) {
        self.state.borrow_mut().samples.push_back(sample);
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().samples.len()
    }

    pub fn configure_calls(&self) -> u32 {
        self.state.borrow().configure_calls
    }
}

impl ImuDriver for FakeImuDriver {
    fn configure(&mut self) -> ImuScale {
        self.state.borrow_mut().configure_calls += 1;
        ImuScale::MPU6500
    }

    fn sample(&mut self) -> Option<SensorSample> {
        self.state.borrow_mut().samples.pop_front()
    }
}

#[derive(Default)]
struct PlatformState {
    bring_ups: u32,
    failure: Option<Error>,
    rebooted: bool,
}

/// Bring-up that succeeds unless told otherwise. Halting and resetting panic.
#[derive(Clone, Default)]
pub struct FakePlatform {
    state: Rc<RefCell<PlatformState>>,
}

impl FakePlatform {
    pub fn fail_with(&self, error: Error) {
        self.state.borrow_mut().failure = Some(error);
    }

    pub fn bring_ups(&self) -> u32 {
        self.state.borrow().bring_ups
    }

    pub fn rebooted(&self) -> bool {
        self.state.borrow().rebooted
    }
}

impl Platform for FakePlatform {
    fn init_buses(&mut self) -> Result<(), Error> {
        let mut state = self.state.borrow_mut();
        state.bring_ups += 1;
        match state.failure.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn halt(&mut self, error: Error) -> ! {
        panic!("halted: {:?}", error)
    }

    fn reset_to_bootloader(&mut self) -> ! {
        self.state.borrow_mut().rebooted = true;
        panic!("reset to bootloader")
    }
}

#[derive(Clone)]
pub struct FakePressure {
    is_present: bool,
    readings: Rc<RefCell<VecDeque<i32>>>,
}

impl FakePressure {
    pub fn present() -> Self {
        Self {
            is_present: true,
            readings: Rc::default(),
        }
    }

    pub fn absent() -> Self {
        Self {
            is_present: false,
            readings: Rc::default(),
        }
    }

    pub fn push(&self, pascals: i32) {
        self.readings.borrow_mut().push_back(pascals);
    }
}

impl PressureSensor for FakePressure {
    fn init(&mut self) -> bool {
        self.is_present
    }

    fn read_pressure(&mut self) -> Option<i32> {
        self.readings.borrow_mut().pop_front()
    }
}
