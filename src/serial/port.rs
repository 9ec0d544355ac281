use embedded_hal::serial::{Read, Write};
use heapless::Deque;

use super::{ChannelId, SerialChannel};
use crate::hal::BaudRate;

/// A [`SerialChannel`] over a non-blocking UART with an `RX` byte receive queue.
///
/// [`available`](SerialChannel::available) moves whatever the UART holds into
/// the queue, so bytes are counted exactly once and each
/// [`read`](SerialChannel::read) takes one.
pub struct SerialPort<U, const RX: usize = 64> {
    id: ChannelId,
    uart: U,
    rx: Deque<u8, RX>,
    baud: Option<u32>,
}

impl<U, const RX: usize> SerialPort<U, RX>
where
    U: Read<u8> + Write<u8> + BaudRate,
{
    pub fn new(id: ChannelId, uart: U) -> Self {
        Self {
            id,
            uart,
            rx: Deque::new(),
            baud: None,
        }
    }

    pub fn baud(&self) -> Option<u32> {
        self.baud
    }

    pub fn uart(&self) -> &U {
        &self.uart
    }

    fn poll_rx(&mut self) {
        // Bounded by the queue so a streaming UART can't stall the caller
        for _ in 0..RX {
            if self.rx.is_full() {
                log::trace!("serial{} receive queue full", self.id.0);
                break;
            }

            match self.uart.read() {
                Ok(byte) => {
                    // Can't fail, the queue isn't full
                    let _ = self.rx.push_back(byte);
                }
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(_)) => {
                    log::warn!("serial{} receive error", self.id.0);
                }
            }
        }
    }
}

impl<U, const RX: usize> SerialChannel for SerialPort<U, RX>
where
    U: Read<u8> + Write<u8> + BaudRate,
{
    fn id(&self) -> ChannelId {
        self.id
    }

    fn begin(&mut self, baud: u32) {
        self.uart.set_baud_rate(baud);
        self.baud = Some(baud);
        log::debug!("serial{} open at {} baud", self.id.0, baud);
    }

    fn is_open(&self) -> bool {
        self.baud.is_some()
    }

    fn available(&mut self) -> usize {
        if !self.is_open() {
            return 0;
        }
        self.poll_rx();
        self.rx.len()
    }

    fn read(&mut self) -> u8 {
        self.rx.pop_front().unwrap_or(0)
    }

    fn write(&mut self, byte: u8) {
        if !self.is_open() {
            log::trace!("serial{} not open, dropping byte", self.id.0);
            return;
        }
        if nb::block!(self.uart.write(byte)).is_err() {
            log::warn!("serial{} transmit error", self.id.0);
        }
    }

    fn flush(&mut self) {
        if !self.is_open() {
            return;
        }
        if nb::block!(self.uart.flush()).is_err() {
            log::warn!("serial{} flush error", self.id.0);
        }
    }
}
