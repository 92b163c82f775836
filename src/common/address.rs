// src/common/address.rs

use super::error::Shtc3Error;
use core::convert::TryFrom;
use core::fmt;

/// A 7-bit two-wire bus address.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct BusAddress(u8);

impl BusAddress {
    /// The fixed address of the SHTC3.
    pub const SHTC3: BusAddress = BusAddress(0x70);

    /// Creates a new `BusAddress` if `address` fits in 7 bits.
    pub fn new(address: u8) -> Result<Self, Shtc3Error<()>> {
        if Self::is_valid(address) {
            Ok(BusAddress(address))
        } else {
            Err(Shtc3Error::InvalidAddress(address))
        }
    }

    #[inline]
    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_valid(address: u8) -> bool {
        address <= 0x7F
    }
}

impl Default for BusAddress {
    fn default() -> Self {
        Self::SHTC3
    }
}

impl TryFrom<u8> for BusAddress {
    type Error = Shtc3Error<()>;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BusAddress> for u8 {
    fn from(value: BusAddress) -> Self {
        value.0
    }
}

impl fmt::Display for BusAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}
