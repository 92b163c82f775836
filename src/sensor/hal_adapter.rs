// src/sensor/hal_adapter.rs

//! Adapters from `embedded-hal` 1.0 traits to the driver's bus and timer traits.

use crate::common::hal_traits::{Shtc3Bus, Shtc3Timer};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c, NoAcknowledgeSource};

/// Wraps any blocking `embedded_hal::i2c::I2c` bus.
///
/// While converting, the SHTC3 does not acknowledge its read header; that
/// NACK is reported to the driver as `WouldBlock`. A read NACK with source
/// `NoAcknowledgeSource::Unknown` is treated the same way. On a HAL that
/// reports every NACK as `Unknown`, a device that acknowledges writes but
/// never its reads therefore ends in `Shtc3Error::Timeout`, not
/// `Shtc3Error::Bus`. An absent device still fails the preceding wake write,
/// so `read_sample` reports `Shtc3Error::Bus` for it. A data-phase NACK is
/// always a bus error.
#[derive(Debug)]
pub struct HalBus<I2C> {
    i2c: I2C,
}

impl<I2C: I2c> HalBus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        HalBus { i2c }
    }

    pub fn release(self) -> I2C {
        self.i2c
    }
}

fn is_not_ready(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address | NoAcknowledgeSource::Unknown)
    )
}

impl<I2C: I2c> Shtc3Bus for HalBus<I2C> {
    type Error = I2C::Error;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.i2c.write(address, bytes)
    }

    fn read(&mut self, address: u8, buffer: &mut [u8]) -> nb::Result<(), Self::Error> {
        match self.i2c.read(address, buffer) {
            Ok(()) => Ok(()),
            Err(e) if is_not_ready(e.kind()) => Err(nb::Error::WouldBlock),
            Err(e) => Err(nb::Error::Other(e)),
        }
    }

    fn write_read(&mut self, address: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
        self.i2c.write_read(address, bytes, buffer)
    }
}

/// Wraps any `embedded_hal::delay::DelayNs` provider.
#[derive(Debug)]
pub struct HalDelay<D> {
    delay: D,
}

impl<D: DelayNs> HalDelay<D> {
    pub fn new(delay: D) -> Self {
        HalDelay { delay }
    }

    pub fn release(self) -> D {
        self.delay
    }
}

impl<D: DelayNs> Shtc3Timer for HalDelay<D> {
    fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us)
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms)
    }
}
