// src/common/command.rs

//! SHTC3 command words.
//!
//! Every command is a 16-bit word sent MSB first. Measurement commands are the
//! "temperature first" variants, so the temperature half always leads the
//! returned frame.

use core::fmt;

use super::types::PowerMode;

/// A command understood by the SHTC3.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Command {
    /// Leave sleep; the sensor needs a short settle time before the next command.
    Wake = 0x3517,
    /// Enter sleep (lowest supply current).
    Sleep = 0xB098,
    /// Soft reset.
    SoftReset = 0x805D,
    /// Read the 16-bit identity register.
    ReadIdentity = 0xEFC8,
    /// Normal-power measurement, clock stretching disabled.
    MeasureNormal = 0x7866,
    /// Low-power measurement, clock stretching disabled.
    MeasureLowPower = 0x609C,
    /// Normal-power measurement, clock stretching enabled.
    MeasureNormalStretch = 0x7CA2,
    /// Low-power measurement, clock stretching enabled.
    MeasureLowPowerStretch = 0x6458,
}

impl Command {
    /// Selects the measurement command for a power mode.
    pub const fn measure(mode: PowerMode, clock_stretching: bool) -> Self {
        match (mode, clock_stretching) {
            (PowerMode::Normal, false) => Command::MeasureNormal,
            (PowerMode::LowPower, false) => Command::MeasureLowPower,
            (PowerMode::Normal, true) => Command::MeasureNormalStretch,
            (PowerMode::LowPower, true) => Command::MeasureLowPowerStretch,
        }
    }

    #[inline]
    pub const fn word(self) -> u16 {
        self as u16
    }

    /// The two bytes put on the wire.
    #[inline]
    pub const fn to_bytes(self) -> [u8; 2] {
        self.word().to_be_bytes()
    }

    /// Looks up a command from its wire word.
    pub fn from_word(word: u16) -> Option<Self> {
        match word {
            0x3517 => Some(Command::Wake),
            0xB098 => Some(Command::Sleep),
            0x805D => Some(Command::SoftReset),
            0xEFC8 => Some(Command::ReadIdentity),
            0x7866 => Some(Command::MeasureNormal),
            0x609C => Some(Command::MeasureLowPower),
            0x7CA2 => Some(Command::MeasureNormalStretch),
            0x6458 => Some(Command::MeasureLowPowerStretch),
            _ => None,
        }
    }

    pub fn from_bytes(bytes: [u8; 2]) -> Option<Self> {
        Self::from_word(u16::from_be_bytes(bytes))
    }

    pub const fn is_measurement(self) -> bool {
        matches!(
            self,
            Command::MeasureNormal
                | Command::MeasureLowPower
                | Command::MeasureNormalStretch
                | Command::MeasureLowPowerStretch
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Wake => "wake",
            Command::Sleep => "sleep",
            Command::SoftReset => "soft-reset",
            Command::ReadIdentity => "read-identity",
            Command::MeasureNormal => "measure-normal",
            Command::MeasureLowPower => "measure-low-power",
            Command::MeasureNormalStretch => "measure-normal-stretch",
            Command::MeasureLowPowerStretch => "measure-low-power-stretch",
        };
        write!(f, "{} ({:#06x})", name, self.word())
    }
}
