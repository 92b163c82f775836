// src/sensor/mod.rs

//! Blocking SHTC3 driver.
//!
//! One [`Shtc3::read_sample`] call runs the full power cycle
//! `wake → trigger → poll-read → validate → convert → sleep`; the sleep
//! command goes out on every exit path.

mod io_helpers;

#[cfg(feature = "impl-hal")]
mod hal_adapter;

#[cfg(feature = "impl-hal")]
pub use hal_adapter::{HalBus, HalDelay};

use crate::common::{
    address::BusAddress,
    command::Command,
    error::Shtc3Error,
    hal_traits::{Shtc3Bus, Shtc3Timer},
    timing,
    types::{Identity, Measurement, PowerMode},
};
use core::time::Duration;

/// Bounds the poll-read loop that waits for a conversion to finish.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PollConfig {
    /// Frame reads before giving up with `Shtc3Error::Timeout` (minimum 1).
    pub max_attempts: u8,
    /// Wait between two reads that found the sensor busy.
    pub interval: Duration,
}

impl PollConfig {
    pub fn new(max_attempts: u8, interval: Duration) -> Self {
        PollConfig { max_attempts, interval }
    }

    pub fn max_attempts(mut self, max_attempts: u8) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        PollConfig {
            max_attempts: timing::POLL_MAX_ATTEMPTS,
            interval: timing::POLL_INTERVAL,
        }
    }
}

/// SHTC3 humidity and temperature sensor on a two-wire bus.
#[derive(Debug)]
pub struct Shtc3<BUS, T> {
    bus: BUS,
    timer: T,
    address: BusAddress,
    mode: PowerMode,
    clock_stretching: bool,
    poll: PollConfig,
    // Captured once by `new`, never refreshed.
    identity: Option<Identity>,
}

impl<BUS, T> Shtc3<BUS, T>
where
    BUS: Shtc3Bus,
    T: Shtc3Timer,
{
    /// Brings the sensor to a known state and reads its identity.
    ///
    /// The sensor may be asleep, awake or mid-conversion when this runs, so
    /// failures of the wake and reset commands are tolerated. A failed
    /// identity read only makes [`read_identity`](Self::read_identity)
    /// unavailable; the driver stays usable.
    pub fn new(bus: BUS, timer: T, address: BusAddress, mode: PowerMode) -> Self {
        let mut sensor = Shtc3 {
            bus,
            timer,
            address,
            mode,
            clock_stretching: false,
            poll: PollConfig::default(),
            identity: None,
        };

        let _ = sensor.write_command(Command::Wake);
        sensor.timer.delay(timing::STARTUP_WAKE_DELAY);
        let _ = sensor.soft_reset();
        sensor.identity = sensor.read_identity_frame().ok();

        sensor
    }

    /// Same as [`new`](Self::new) at the default address `0x70`.
    pub fn new_default(bus: BUS, timer: T, mode: PowerMode) -> Self {
        Self::new(bus, timer, BusAddress::SHTC3, mode)
    }

    /// Replaces the poll budget used by [`read_sample`](Self::read_sample).
    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    pub fn release(self) -> (BUS, T) {
        (self.bus, self.timer)
    }

    /// The identity read at construction.
    ///
    /// Never touches the bus.
    pub fn read_identity(&self) -> Result<u16, Shtc3Error<BUS::Error>> {
        self.identity
            .map(u16::from)
            .ok_or(Shtc3Error::IdentityUnavailable)
    }

    pub fn identity(&self) -> Option<Identity> {
        self.identity
    }

    /// Takes effect on the next sample.
    pub fn set_power_mode(&mut self, mode: PowerMode) {
        self.mode = mode;
    }

    pub fn power_mode(&self) -> PowerMode {
        self.mode
    }

    /// Selects the clock-stretching measurement commands.
    ///
    /// The sensor then holds the clock line until the conversion is done,
    /// so the bus master must tolerate stretching of up to the conversion time.
    pub fn set_clock_stretching(&mut self, enabled: bool) {
        self.clock_stretching = enabled;
    }

    pub fn clock_stretching(&self) -> bool {
        self.clock_stretching
    }

    pub fn set_poll_config(&mut self, poll: PollConfig) {
        self.poll = poll;
    }

    pub fn poll_config(&self) -> PollConfig {
        self.poll
    }

    pub fn address(&self) -> BusAddress {
        self.address
    }

    /// Issues a soft reset and waits for the sensor to settle.
    ///
    /// Does not re-read the identity.
    pub fn soft_reset(&mut self) -> Result<(), Shtc3Error<BUS::Error>> {
        let result = self.write_command(Command::SoftReset);
        self.timer.delay(timing::SOFT_RESET_SETTLE);
        result
    }

    /// Runs one measurement and returns the converted reading.
    ///
    /// The sleep command is issued before returning on every path. A failure
    /// to enter sleep after a valid frame does not discard the reading.
    pub fn read_sample(&mut self) -> Result<Measurement, Shtc3Error<BUS::Error>> {
        let result = self.measure_awake();
        let _ = self.write_command(Command::Sleep);
        result
    }

    fn measure_awake(&mut self) -> Result<Measurement, Shtc3Error<BUS::Error>> {
        self.write_command(Command::Wake)?;
        self.timer.delay(timing::WAKE_SETTLE);

        let command = Command::measure(self.mode, self.clock_stretching);
        self.write_command(command)?;
        self.timer.delay(conversion_time(self.mode));

        let frame = self.poll_measurement_frame()?;
        let raw = frame.validate()?;
        Ok(raw.to_measurement())
    }
}

/// Minimum wait between the measure command and the first frame read.
pub fn conversion_time(mode: PowerMode) -> Duration {
    match mode {
        PowerMode::Normal => timing::MEASURE_NORMAL_DELAY,
        PowerMode::LowPower => timing::MEASURE_LOW_POWER_DELAY,
    }
}

#[cfg(test)]
pub(crate) mod sim;

#[cfg(test)]
mod tests {
    use super::sim::{log_without_delays, measurement_frame, Event, MockBusError, SimSensor, SimTimer};
    use super::*;
    use crate::common::crc::encode_word;

    fn build(sim: SimSensor) -> Shtc3<SimSensor, SimTimer> {
        let timer = SimTimer::new(sim.log());
        let sensor = Shtc3::new_default(sim, timer, PowerMode::Normal);
        sensor.bus.clear_log();
        sensor
    }

    fn sleep_count(sensor: &Shtc3<SimSensor, SimTimer>) -> usize {
        sensor
            .bus
            .events()
            .iter()
            .filter(|e| **e == Event::Write(Command::Sleep))
            .count()
    }

    #[test]
    fn test_construction_sequence() {
        let sim = SimSensor::new();
        let log = sim.log();
        let timer = SimTimer::new(log.clone());
        let sensor = Shtc3::new_default(sim, timer, PowerMode::Normal);

        assert_eq!(
            sensor.bus.events().as_slice(),
            &[
                Event::Write(Command::Wake),
                Event::Delay(10_000),
                Event::Write(Command::SoftReset),
                Event::Delay(1_000),
                Event::WriteRead(Command::ReadIdentity),
            ]
        );
        assert_eq!(sensor.read_identity().unwrap(), 0x0807);
        assert!(sensor.identity().unwrap().is_shtc3());
    }

    #[test]
    fn test_construction_tolerates_failed_wake() {
        let mut sim = SimSensor::new();
        sim.fail_write = Some(Command::Wake);
        let timer = SimTimer::new(sim.log());
        let sensor = Shtc3::new_default(sim, timer, PowerMode::Normal);
        assert_eq!(sensor.read_identity().unwrap(), 0x0807);
    }

    #[test]
    fn test_construction_tolerates_failed_soft_reset() {
        let mut sim = SimSensor::new();
        sim.fail_write = Some(Command::SoftReset);
        let timer = SimTimer::new(sim.log());
        let mut sensor = Shtc3::new_default(sim, timer, PowerMode::Normal);

        // Settle delay and identity read still follow the failed reset
        assert_eq!(
            sensor.bus.events().as_slice(),
            &[
                Event::Write(Command::Wake),
                Event::Delay(10_000),
                Event::Write(Command::SoftReset),
                Event::Delay(1_000),
                Event::WriteRead(Command::ReadIdentity),
            ]
        );
        assert_eq!(sensor.read_identity().unwrap(), 0x0807);
        assert!(sensor.read_sample().is_ok());
    }

    #[test]
    fn test_identity_round_trip() {
        let mut sim = SimSensor::new();
        sim.identity = encode_word(0xBEEF);
        let sensor = build(sim);
        assert_eq!(sensor.read_identity().unwrap(), 0xBEEF);
        assert!(!sensor.identity().unwrap().is_shtc3());
    }

    #[test]
    fn test_corrupted_identity_is_unavailable() {
        let mut sim = SimSensor::new();
        sim.identity = [0x08, 0x07, 0x22];
        let sensor = build(sim);

        assert!(matches!(sensor.read_identity(), Err(Shtc3Error::IdentityUnavailable)));
        assert!(sensor.identity().is_none());
        // Accessor is bus-free
        assert!(sensor.bus.events().is_empty());
    }

    #[test]
    fn test_identity_bus_failure_is_not_fatal() {
        let mut sim = SimSensor::new();
        sim.fail_identity = true;
        sim.frame = measurement_frame(0x6666, 0x8000);
        let mut sensor = build(sim);

        assert!(matches!(sensor.read_identity(), Err(Shtc3Error::IdentityUnavailable)));
        let m = sensor.read_sample().unwrap();
        assert_eq!(m.temperature(), 24.99);
        assert_eq!(m.humidity(), 50.0);
    }

    #[test]
    fn test_successful_sample_command_order() {
        let mut sim = SimSensor::new();
        sim.frame = measurement_frame(0x6666, 0x8000);
        let mut sensor = build(sim);

        let m = sensor.read_sample().unwrap();
        assert_eq!(<(f32, f32)>::from(m), (24.99, 50.0));
        assert_eq!(
            sensor.bus.events().as_slice(),
            &[
                Event::Write(Command::Wake),
                Event::Delay(250),
                Event::Write(Command::MeasureNormal),
                Event::Delay(20_000),
                Event::Read,
                Event::Write(Command::Sleep),
            ]
        );
    }

    #[test]
    fn test_low_power_mode_is_idempotent() {
        let mut sim = SimSensor::new();
        sim.frame = measurement_frame(0x6666, 0x8000);
        let mut sensor = build(sim);

        sensor.set_power_mode(PowerMode::LowPower);
        sensor.set_power_mode(PowerMode::LowPower);
        assert_eq!(sensor.power_mode(), PowerMode::LowPower);
        sensor.read_sample().unwrap();

        let events = sensor.bus.events();
        assert_eq!(events[2], Event::Write(Command::MeasureLowPower));
        assert_eq!(events[3], Event::Delay(1_000));
        assert!(!events.contains(&Event::Write(Command::MeasureNormal)));
    }

    #[test]
    fn test_clock_stretching_commands() {
        let mut sim = SimSensor::new();
        sim.frame = measurement_frame(0x6666, 0x8000);
        let mut sensor = build(sim);

        sensor.set_clock_stretching(true);
        sensor.read_sample().unwrap();
        assert_eq!(sensor.bus.events()[2], Event::Write(Command::MeasureNormalStretch));

        sensor.bus.clear_log();
        sensor.set_power_mode(PowerMode::LowPower);
        sensor.read_sample().unwrap();
        assert_eq!(sensor.bus.events()[2], Event::Write(Command::MeasureLowPowerStretch));
    }

    #[test]
    fn test_not_ready_reads_are_retried() {
        let mut sim = SimSensor::new();
        sim.frame = measurement_frame(0x6666, 0x8000);
        sim.not_ready_reads = 2;
        let mut sensor = build(sim);

        assert!(sensor.read_sample().is_ok());
        assert_eq!(
            log_without_delays(&sensor.bus.events()).as_slice(),
            &[
                Event::Write(Command::Wake),
                Event::Write(Command::MeasureNormal),
                Event::Read,
                Event::Read,
                Event::Read,
                Event::Write(Command::Sleep),
            ]
        );
        let events = sensor.bus.events();
        assert_eq!(events[5], Event::Delay(1_000));
        assert_eq!(events[7], Event::Delay(1_000));
    }

    #[test]
    fn test_poll_budget_exhaustion_times_out() {
        let mut sim = SimSensor::new();
        sim.not_ready_reads = u8::MAX;
        let mut sensor = build(sim).with_poll_config(PollConfig::default().max_attempts(3));

        let result = sensor.read_sample();
        assert!(matches!(result, Err(Shtc3Error::Timeout { attempts: 3 })));

        let reads = sensor.bus.events().iter().filter(|e| **e == Event::Read).count();
        assert_eq!(reads, 3);
        assert_eq!(sleep_count(&sensor), 1);
        assert_eq!(sensor.bus.events().last(), Some(&Event::Write(Command::Sleep)));
    }

    #[test]
    fn test_zero_attempts_still_reads_once() {
        let mut sim = SimSensor::new();
        sim.frame = measurement_frame(0x0000, 0x0000);
        let mut sensor = build(sim).with_poll_config(PollConfig::new(0, Duration::from_millis(1)));
        assert!(sensor.read_sample().is_ok());
    }

    #[test]
    fn test_read_failure_still_sleeps_once() {
        let mut sim = SimSensor::new();
        sim.fail_reads = u8::MAX;
        let mut sensor = build(sim);

        assert!(matches!(sensor.read_sample(), Err(Shtc3Error::Bus(MockBusError))));
        assert_eq!(sleep_count(&sensor), 1);
        assert_eq!(sensor.bus.events().last(), Some(&Event::Write(Command::Sleep)));
    }

    #[test]
    fn test_trigger_failure_skips_read_and_sleeps() {
        let mut sim = SimSensor::new();
        sim.fail_write = Some(Command::MeasureNormal);
        let mut sensor = build(sim);

        assert!(matches!(sensor.read_sample(), Err(Shtc3Error::Bus(_))));
        let events = sensor.bus.events();
        assert!(!events.contains(&Event::Read));
        assert_eq!(sleep_count(&sensor), 1);
    }

    #[test]
    fn test_wake_failure_skips_trigger_and_sleeps() {
        let mut sim = SimSensor::new();
        sim.fail_write = Some(Command::Wake);
        let mut sensor = build(sim);

        assert!(matches!(sensor.read_sample(), Err(Shtc3Error::Bus(_))));
        assert_eq!(
            log_without_delays(&sensor.bus.events()).as_slice(),
            &[Event::Write(Command::Wake), Event::Write(Command::Sleep)]
        );
    }

    #[test]
    fn test_flipped_humidity_checksum_rejects_whole_frame() {
        let mut sim = SimSensor::new();
        let mut bytes = measurement_frame(0x6666, 0x8000);
        bytes[5] ^= 0x01;
        sim.frame = bytes;
        let mut sensor = build(sim);

        let result = sensor.read_sample();
        assert!(matches!(result, Err(Shtc3Error::ChecksumMismatch { .. })));
        assert_eq!(sleep_count(&sensor), 1);
    }

    #[test]
    fn test_failures_leave_state_untouched() {
        let mut sim = SimSensor::new();
        sim.fail_reads = u8::MAX;
        let mut sensor = build(sim);
        sensor.set_power_mode(PowerMode::LowPower);

        assert!(sensor.read_sample().is_err());
        assert_eq!(sensor.power_mode(), PowerMode::LowPower);
        assert_eq!(sensor.read_identity().unwrap(), 0x0807);
    }

    #[test]
    fn test_sleep_failure_keeps_valid_reading() {
        let mut sim = SimSensor::new();
        sim.frame = measurement_frame(0xFFFF, 0xFFFF);
        sim.fail_write = Some(Command::Sleep);
        let mut sensor = build(sim);

        let m = sensor.read_sample().unwrap();
        assert!(m.temperature() < 130.0);
        assert!(m.humidity() < 100.0);
    }

    #[test]
    fn test_transfer_function_boundaries() {
        let mut sim = SimSensor::new();
        sim.frame = measurement_frame(0x0000, 0x0000);
        let mut sensor = build(sim);

        let m = sensor.read_sample().unwrap();
        assert_eq!(m.temperature(), -45.0);
        assert_eq!(m.humidity(), 0.0);
    }

    #[test]
    fn test_soft_reset() {
        let mut sensor = build(SimSensor::new());
        sensor.soft_reset().unwrap();
        assert_eq!(
            sensor.bus.events().as_slice(),
            &[Event::Write(Command::SoftReset), Event::Delay(1_000)]
        );
    }

    #[test]
    fn test_soft_reset_failure_is_reported() {
        let mut sim = SimSensor::new();
        sim.fail_write = Some(Command::SoftReset);
        let mut sensor = build(sim);

        assert!(matches!(sensor.soft_reset(), Err(Shtc3Error::Bus(MockBusError))));
        assert_eq!(
            sensor.bus.events().as_slice(),
            &[Event::Write(Command::SoftReset), Event::Delay(1_000)]
        );
        // Cached identity survives
        assert_eq!(sensor.read_identity().unwrap(), 0x0807);
    }

    #[test]
    fn test_custom_address() {
        let sim = SimSensor::new();
        let timer = SimTimer::new(sim.log());
        let address = BusAddress::new(0x71).unwrap();
        let sensor = Shtc3::new(sim, timer, address, PowerMode::Normal);
        assert_eq!(sensor.address(), address);
        let (bus, _timer) = sensor.release();
        assert_eq!(bus.last_address(), Some(0x71));
    }
}
