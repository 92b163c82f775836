// src/sensor/io_helpers.rs

use super::Shtc3;
use crate::common::{
    command::Command,
    error::Shtc3Error,
    frame::{IdentityFrame, MeasurementFrame, IDENTITY_FRAME_LEN, MEASUREMENT_FRAME_LEN},
    hal_traits::{Shtc3Bus, Shtc3Timer},
    types::Identity,
};
use nb::Result as NbResult;

// Implementation block for bus transaction helpers
impl<BUS, T> Shtc3<BUS, T>
where
    BUS: Shtc3Bus,
    T: Shtc3Timer,
{
    /// Sends one 16-bit command word.
    pub(super) fn write_command(&mut self, command: Command) -> Result<(), Shtc3Error<BUS::Error>> {
        self.bus
            .write(self.address.as_u8(), &command.to_bytes())
            .map_err(Shtc3Error::Bus)
    }

    /// Reads the identity register in one combined transaction.
    pub(super) fn read_identity_frame(&mut self) -> Result<Identity, Shtc3Error<BUS::Error>> {
        let mut buffer = [0u8; IDENTITY_FRAME_LEN];
        self.bus
            .write_read(
                self.address.as_u8(),
                &Command::ReadIdentity.to_bytes(),
                &mut buffer,
            )
            .map_err(Shtc3Error::Bus)?;
        IdentityFrame(buffer).validate()
    }

    /// Reads the measurement frame, retrying while the sensor is still converting.
    pub(super) fn poll_measurement_frame(&mut self) -> Result<MeasurementFrame, Shtc3Error<BUS::Error>> {
        let mut buffer = [0u8; MEASUREMENT_FRAME_LEN];
        let address = self.address.as_u8();
        self.execute_bounded_io(|bus| bus.read(address, &mut buffer))?;
        Ok(MeasurementFrame(buffer))
    }

    /// Executes a non-blocking bus operation (`f`) until it stops returning
    /// `WouldBlock`, at most `poll.max_attempts` times, waiting `poll.interval`
    /// between attempts.
    pub(super) fn execute_bounded_io<FN, R>(&mut self, mut f: FN) -> Result<R, Shtc3Error<BUS::Error>>
    where
        FN: FnMut(&mut BUS) -> NbResult<R, BUS::Error>,
    {
        let attempts = self.poll.max_attempts.max(1);

        for attempt in 1..=attempts {
            match f(&mut self.bus) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if attempt < attempts {
                        self.timer.delay(self.poll.interval);
                    }
                }
                Err(nb::Error::Other(e)) => return Err(Shtc3Error::Bus(e)),
            }
        }

        Err(Shtc3Error::Timeout { attempts })
    }
}
