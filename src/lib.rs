// src/lib.rs

#![cfg_attr(not(test), no_std)]

//! Protocol layer for the Sensirion SHTC3 humidity and temperature sensor.
//!
//! * [`sensor::Shtc3`] drives one sensor through its power cycle and returns
//!   checksum-verified readings.
//! * [`acquisition::Acquisition`] samples periodically with a bounded number
//!   of attempts and forwards readings to a [`acquisition::ReadingSink`].
//! * [`common`] holds the command words, CRC, fixed-point conversion and the
//!   bus/timer traits the driver is generic over.

pub mod acquisition;
pub mod common;
pub mod sensor;

// Re-export key types for convenience
pub use acquisition::{Acquisition, AcquisitionConfig, ReadingSink};
pub use common::{BusAddress, Measurement, PowerMode, Shtc3Bus, Shtc3Error, Shtc3Timer};
pub use sensor::{PollConfig, Shtc3};
