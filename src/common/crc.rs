// src/common/crc.rs

use super::error::Shtc3Error;
use crc::{Algorithm, Crc};

/// CRC-8 used by Sensirion humidity sensors (catalogued as CRC-8/NRSC-5).
/// Polynomial: 0x31 (x^8 + x^5 + x^4 + 1)
/// Initial Value: 0xFF
/// Input Reflected: false
/// Output Reflected: false
/// Final XOR: 0x00
/// Check Value: 0xF7 (for "123456789")
pub const SHTC3_CRC: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x31,
    init: 0xFF,
    refin: false,
    refout: false,
    xorout: 0x00,
    check: 0xF7,
    residue: 0x00,
};

// Table-driven (256 entries) instance, built at compile time.
const CRC_COMPUTER: Crc<u8> = Crc::<u8>::new(&SHTC3_CRC);

/// Calculates the CRC-8 over `data`.
///
/// The sensor sends one checksum per 2-byte word, so `data` is normally a
/// single big-endian word.
#[inline]
pub fn calculate_crc8(data: &[u8]) -> u8 {
    CRC_COMPUTER.checksum(data)
}

/// Verifies one `[msb, lsb, crc]` triplet as sent by the sensor.
///
/// # Returns
///
/// * `Ok(word)` with the big-endian payload if the checksum matches.
/// * `Err(Shtc3Error::ChecksumMismatch)` otherwise.
pub fn verify_word<E>(triplet: &[u8; 3]) -> Result<u16, Shtc3Error<E>>
where
    E: core::fmt::Debug,
{
    let calculated = calculate_crc8(&triplet[..2]);
    let received = triplet[2];

    if calculated == received {
        Ok(u16::from_be_bytes([triplet[0], triplet[1]]))
    } else {
        Err(Shtc3Error::ChecksumMismatch { expected: received, calculated })
    }
}

/// Builds a valid triplet for `word`. Used by simulated sensors.
pub fn encode_word(word: u16) -> [u8; 3] {
    let [msb, lsb] = word.to_be_bytes();
    [msb, lsb, calculate_crc8(&[msb, lsb])]
}
