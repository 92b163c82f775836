// src/common/error.rs

/// Errors surfaced by the SHTC3 protocol layer.
///
/// Generic over the transport's own error type so that the caller can still
/// inspect what the bus reported.
#[derive(Debug, thiserror::Error)]
pub enum Shtc3Error<E = ()>
where
    E: core::fmt::Debug,
{
    /// The bus transport reported a failed transaction.
    #[error("bus error: {0:?}")]
    Bus(E),

    /// A frame arrived but its checksum byte did not match the payload.
    #[error("checksum mismatch: received {expected:#04x}, calculated {calculated:#04x}")]
    ChecksumMismatch { expected: u8, calculated: u8 },

    /// The sensor never reported data ready within the poll budget.
    #[error("sensor not ready after {attempts} read attempts")]
    Timeout { attempts: u8 },

    /// The identity register could not be read when the driver was built.
    #[error("sensor identity unavailable")]
    IdentityUnavailable,

    /// Not a valid 7-bit bus address.
    #[error("invalid 7-bit bus address: {0:#04x}")]
    InvalidAddress(u8),
}

impl<E: core::fmt::Debug> Shtc3Error<E> {
    /// True for failures that leave the sensor usable for another attempt.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Shtc3Error::Bus(_) | Shtc3Error::Timeout { .. } | Shtc3Error::ChecksumMismatch { .. }
        )
    }
}

// Allow `?` on raw transport results.
impl<E: core::fmt::Debug> From<E> for Shtc3Error<E> {
    fn from(e: E) -> Self {
        Shtc3Error::Bus(e)
    }
}
