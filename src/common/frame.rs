// src/common/frame.rs

use super::crc::verify_word;
use super::error::Shtc3Error;
use super::types::{Identity, RawSample};

/// Bytes returned for one measurement: `[T_msb, T_lsb, T_crc, RH_msb, RH_lsb, RH_crc]`.
pub const MEASUREMENT_FRAME_LEN: usize = 6;
/// Bytes returned for the identity register: `[ID_msb, ID_lsb, ID_crc]`.
pub const IDENTITY_FRAME_LEN: usize = 3;

/// A raw measurement frame as read off the bus.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MeasurementFrame(pub [u8; MEASUREMENT_FRAME_LEN]);

impl MeasurementFrame {
    /// Checks both halves and yields the raw codes.
    ///
    /// Both checksums are checked before anything is decoded, so a frame with
    /// one bad half never yields a value for the other.
    pub fn validate<E: core::fmt::Debug>(&self) -> Result<RawSample, Shtc3Error<E>> {
        let [t0, t1, t2, h0, h1, h2] = self.0;
        let temperature = verify_word(&[t0, t1, t2])?;
        let humidity = verify_word(&[h0, h1, h2])?;
        Ok(RawSample { temperature, humidity })
    }
}

/// A raw identity frame as read off the bus.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct IdentityFrame(pub [u8; IDENTITY_FRAME_LEN]);

impl IdentityFrame {
    pub fn validate<E: core::fmt::Debug>(&self) -> Result<Identity, Shtc3Error<E>> {
        verify_word(&self.0).map(Identity::new)
    }
}
