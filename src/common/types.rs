// src/common/types.rs

use core::fmt;

// --- Power mode ---

/// Measurement power mode.
///
/// Low-power conversions finish in under 1 ms at the cost of repeatability;
/// normal conversions take up to 12.1 ms.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum PowerMode {
    #[default]
    Normal,
    LowPower,
}

// --- Fixed-point transfer functions ---

/// Converts a raw temperature code to hundredths of a degree Celsius.
///
/// `T = -45 + 175 * raw / 2^16`, evaluated as `((4375 * raw) >> 14) - 4500`.
#[inline]
pub const fn temperature_centi_celsius(raw: u16) -> i32 {
    (((4375 * raw as u32) >> 14) as i32) - 4500
}

/// Converts a raw humidity code to hundredths of a percent relative humidity.
///
/// `RH = 100 * raw / 2^16`, evaluated as `(625 * raw) >> 12`.
#[inline]
pub const fn humidity_centi_percent(raw: u16) -> u32 {
    (625 * raw as u32) >> 12
}

// --- Readings ---

/// Raw codes of a validated measurement frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RawSample {
    pub temperature: u16,
    pub humidity: u16,
}

impl RawSample {
    pub fn to_measurement(self) -> Measurement {
        Measurement {
            temperature_centi: temperature_centi_celsius(self.temperature),
            humidity_centi: humidity_centi_percent(self.humidity),
        }
    }
}

/// A converted reading, held in the sensor's native hundredths.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Measurement {
    temperature_centi: i32,
    humidity_centi: u32,
}

impl Measurement {
    /// Temperature in degrees Celsius.
    pub fn temperature(&self) -> f32 {
        self.temperature_centi as f32 / 100.0
    }

    /// Relative humidity in percent.
    pub fn humidity(&self) -> f32 {
        self.humidity_centi as f32 / 100.0
    }

    pub const fn temperature_centi(&self) -> i32 {
        self.temperature_centi
    }

    pub const fn humidity_centi(&self) -> u32 {
        self.humidity_centi
    }
}

impl From<Measurement> for (f32, f32) {
    fn from(m: Measurement) -> Self {
        (m.temperature(), m.humidity())
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} °C / {:.2} %RH", self.temperature(), self.humidity())
    }
}

// --- Identity ---

/// Contents of the identity register.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Identity(u16);

impl Identity {
    /// Bits of the register that carry the product code.
    const PRODUCT_MASK: u16 = 0x083F;
    const SHTC3_PRODUCT_CODE: u16 = 0x0807;

    pub const fn new(raw: u16) -> Self {
        Identity(raw)
    }

    pub const fn raw(&self) -> u16 {
        self.0
    }

    /// True if the product code bits identify an SHTC3.
    pub const fn is_shtc3(&self) -> bool {
        self.0 & Self::PRODUCT_MASK == Self::SHTC3_PRODUCT_CODE
    }
}

impl From<Identity> for u16 {
    fn from(id: Identity) -> Self {
        id.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}
