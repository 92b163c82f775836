// src/sensor/sim.rs

//! Simulated SHTC3 shared by the driver and acquisition tests.

use crate::common::{
    command::Command,
    crc::encode_word,
    hal_traits::{Shtc3Bus, Shtc3Timer},
};
use std::cell::RefCell;
use std::rc::Rc;

pub const LOG_CAPACITY: usize = 256;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Event {
    Write(Command),
    Read,
    WriteRead(Command),
    Delay(u32),
}

pub type EventLog = heapless::Vec<Event, LOG_CAPACITY>;
pub type SharedLog = Rc<RefCell<EventLog>>;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MockBusError;

pub fn measurement_frame(temperature: u16, humidity: u16) -> [u8; 6] {
    let t = encode_word(temperature);
    let h = encode_word(humidity);
    [t[0], t[1], t[2], h[0], h[1], h[2]]
}

pub fn log_without_delays(events: &[Event]) -> EventLog {
    events
        .iter()
        .filter(|e| !matches!(e, Event::Delay(_)))
        .copied()
        .collect()
}

/// Bus side of the simulated sensor. Records every transaction into the shared log.
#[derive(Debug)]
pub struct SimSensor {
    log: SharedLog,
    last_address: Option<u8>,
    pub identity: [u8; 3],
    pub frame: [u8; 6],
    /// Reads answered with `WouldBlock` before data is delivered.
    pub not_ready_reads: u8,
    /// Reads that fail outright (`u8::MAX` = every read).
    pub fail_reads: u8,
    /// Reads that deliver `frame` with its humidity checksum flipped.
    pub corrupt_frames: u8,
    pub fail_write: Option<Command>,
    pub fail_identity: bool,
}

impl SimSensor {
    pub fn new() -> Self {
        SimSensor {
            log: Rc::new(RefCell::new(EventLog::new())),
            last_address: None,
            identity: encode_word(0x0807),
            frame: measurement_frame(0x6666, 0x8000),
            not_ready_reads: 0,
            fail_reads: 0,
            corrupt_frames: 0,
            fail_write: None,
            fail_identity: false,
        }
    }

    pub fn log(&self) -> SharedLog {
        self.log.clone()
    }

    pub fn events(&self) -> EventLog {
        self.log.borrow().clone()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }

    pub fn last_address(&self) -> Option<u8> {
        self.last_address
    }

    fn record(&mut self, address: u8, event: Event) {
        self.last_address = Some(address);
        self.log.borrow_mut().push(event).expect("event log full");
    }
}

fn decode(bytes: &[u8]) -> Command {
    assert_eq!(bytes.len(), 2, "commands are two bytes");
    Command::from_bytes([bytes[0], bytes[1]]).expect("unknown command word")
}

fn consume(counter: &mut u8) -> bool {
    match *counter {
        0 => false,
        u8::MAX => true,
        _ => {
            *counter -= 1;
            true
        }
    }
}

impl Shtc3Bus for SimSensor {
    type Error = MockBusError;

    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        let command = decode(bytes);
        self.record(address, Event::Write(command));
        if self.fail_write == Some(command) {
            Err(MockBusError)
        } else {
            Ok(())
        }
    }

    fn read(&mut self, address: u8, buffer: &mut [u8]) -> nb::Result<(), Self::Error> {
        self.record(address, Event::Read);
        if consume(&mut self.fail_reads) {
            return Err(nb::Error::Other(MockBusError));
        }
        if consume(&mut self.not_ready_reads) {
            return Err(nb::Error::WouldBlock);
        }
        assert_eq!(buffer.len(), self.frame.len(), "measurement reads are six bytes");
        buffer.copy_from_slice(&self.frame);
        if consume(&mut self.corrupt_frames) {
            buffer[5] ^= 0x01;
        }
        Ok(())
    }

    fn write_read(&mut self, address: u8, bytes: &[u8], buffer: &mut [u8]) -> Result<(), Self::Error> {
        let command = decode(bytes);
        self.record(address, Event::WriteRead(command));
        if self.fail_identity {
            return Err(MockBusError);
        }
        assert_eq!(command, Command::ReadIdentity);
        buffer.copy_from_slice(&self.identity);
        Ok(())
    }
}

/// Timer that records each wait into the shared log instead of sleeping.
#[derive(Debug)]
pub struct SimTimer {
    log: SharedLog,
}

impl SimTimer {
    pub fn new(log: SharedLog) -> Self {
        SimTimer { log }
    }
}

impl Shtc3Timer for SimTimer {
    fn delay_us(&mut self, us: u32) {
        self.log.borrow_mut().push(Event::Delay(us)).expect("event log full");
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delay_us(ms.saturating_mul(1_000));
    }
}
