// src/common/hal_traits.rs

use core::fmt::Debug;
use core::time::Duration;

/// Abstraction for the blocking delays the sensor protocol requires.
///
/// With the `impl-hal` feature any `embedded_hal::delay::DelayNs` can be used
/// through `sensor::HalDelay`.
pub trait Shtc3Timer {
    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Delay for at least `duration`, rounded up to whole microseconds.
    fn delay(&mut self, duration: Duration) {
        let us = duration.as_micros() + u128::from(duration.subsec_nanos() % 1_000 != 0);
        if us <= u128::from(u32::MAX) {
            self.delay_us(us as u32);
        } else {
            let ms = us.div_ceil(1_000);
            self.delay_ms(u32::try_from(ms).unwrap_or(u32::MAX));
        }
    }
}

/// Abstraction for an addressed two-wire bus master.
///
/// Every call is one complete transaction of known length. Implementations
/// do not retry.
pub trait Shtc3Bus {
    /// Associated error type for failed transactions.
    type Error: Debug;

    /// Writes `bytes` to the device at `address`.
    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Reads exactly `buffer.len()` bytes from the device at `address`.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if the device is not ready yet
    /// (it did not acknowledge the read header). Partial reads are not
    /// a valid outcome.
    fn read(&mut self, address: u8, buffer: &mut [u8]) -> nb::Result<(), Self::Error>;

    /// Writes `bytes` then reads `buffer.len()` bytes, with no other bus
    /// traffic in between.
    fn write_read(&mut self, address: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error>;
}

impl<T: Shtc3Timer + ?Sized> Shtc3Timer for &mut T {
    fn delay_us(&mut self, us: u32) {
        (**self).delay_us(us)
    }

    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}

impl<T: Shtc3Bus + ?Sized> Shtc3Bus for &mut T {
    type Error = T::Error;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, bytes)
    }

    fn read(&mut self, address: u8, buffer: &mut [u8]) -> nb::Result<(), Self::Error> {
        (**self).read(address, buffer)
    }

    fn write_read(&mut self, address: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
        (**self).write_read(address, bytes, buffer)
    }
}
