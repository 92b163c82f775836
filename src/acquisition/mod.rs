// src/acquisition/mod.rs

//! Periodic sampling with a bounded number of attempts per cycle.
//!
//! The driver itself never retries or logs; this loop owns both. A cycle
//! that runs out of attempts is skipped: the sink is told about the failure
//! and no reading is forwarded.

pub mod config;

pub use config::{AcquisitionConfig, ChecksumPolicy};

use crate::common::{
    error::Shtc3Error,
    hal_traits::{Shtc3Bus, Shtc3Timer},
    resource::{Claim, ResourceError, ResourceId, ResourceRegistry},
    types::Measurement,
};
use crate::sensor::Shtc3;
use core::fmt::Debug;
use log::{debug, info, warn};

/// Coarse classification of a failed sample, for sinks and retry policy.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FailureKind {
    Bus,
    Checksum,
    Timeout,
    Other,
}

impl FailureKind {
    pub fn of<E: Debug>(error: &Shtc3Error<E>) -> Self {
        match error {
            Shtc3Error::Bus(_) => FailureKind::Bus,
            Shtc3Error::ChecksumMismatch { .. } => FailureKind::Checksum,
            Shtc3Error::Timeout { .. } => FailureKind::Timeout,
            _ => FailureKind::Other,
        }
    }
}

/// Downstream consumer of readings (display, message bus publisher, ...).
pub trait ReadingSink {
    /// Called once per cycle that produced a reading.
    fn deliver(&mut self, cycle: u32, measurement: &Measurement);

    /// Called once per cycle that ran out of attempts.
    fn report_failure(&mut self, _cycle: u32, _failure: FailureKind) {}
}

impl<S: ReadingSink + ?Sized> ReadingSink for &mut S {
    fn deliver(&mut self, cycle: u32, measurement: &Measurement) {
        (**self).deliver(cycle, measurement)
    }

    fn report_failure(&mut self, cycle: u32, failure: FailureKind) {
        (**self).report_failure(cycle, failure)
    }
}

// Display first, then publisher.
impl<A: ReadingSink, B: ReadingSink> ReadingSink for (A, B) {
    fn deliver(&mut self, cycle: u32, measurement: &Measurement) {
        self.0.deliver(cycle, measurement);
        self.1.deliver(cycle, measurement);
    }

    fn report_failure(&mut self, cycle: u32, failure: FailureKind) {
        self.0.report_failure(cycle, failure);
        self.1.report_failure(cycle, failure);
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum CycleOutcome {
    Delivered { cycle: u32, attempts: u8, measurement: Measurement },
    Skipped { cycle: u32, attempts: u8, failure: FailureKind },
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RunSummary {
    pub delivered: u32,
    pub skipped: u32,
}

/// Drives one sensor and forwards its readings to a sink.
#[derive(Debug)]
pub struct Acquisition<BUS, T, S> {
    sensor: Shtc3<BUS, T>,
    sink: S,
    config: AcquisitionConfig,
    cycle: u32,
    claim: Option<Claim>,
}

impl<BUS, T, S> Acquisition<BUS, T, S>
where
    BUS: Shtc3Bus,
    T: Shtc3Timer,
    S: ReadingSink,
{
    pub fn new(sensor: Shtc3<BUS, T>, sink: S, config: AcquisitionConfig) -> Self {
        match sensor.identity() {
            Some(id) => info!("sensor {} identity {}", sensor.address(), id),
            None => warn!("sensor {} identity could not be determined", sensor.address()),
        }
        Acquisition {
            sensor,
            sink,
            config,
            cycle: 0,
            claim: None,
        }
    }

    /// Like [`new`](Self::new), but first claims the sensor's address on
    /// `bus` so no second loop can drive the same device.
    pub fn attach<const N: usize>(
        registry: &mut ResourceRegistry<N>,
        bus: u8,
        sensor: Shtc3<BUS, T>,
        sink: S,
        config: AcquisitionConfig,
    ) -> Result<Self, ResourceError> {
        let id = ResourceId::Device { bus, address: sensor.address().as_u8() };
        let claim = registry.claim(id)?;
        let mut acquisition = Self::new(sensor, sink, config);
        acquisition.claim = Some(claim);
        Ok(acquisition)
    }

    /// Gives back the sensor and sink, releasing the device claim if one was taken.
    ///
    /// If `registry` did not issue the claim, nothing is released and the
    /// acquisition is returned unchanged with the error.
    pub fn detach<const N: usize>(
        mut self,
        registry: &mut ResourceRegistry<N>,
    ) -> Result<(Shtc3<BUS, T>, S), (ResourceError, Self)> {
        if let Some(claim) = self.claim.take() {
            if let Err((error, claim)) = registry.release(claim) {
                self.claim = Some(claim);
                return Err((error, self));
            }
        }
        Ok((self.sensor, self.sink))
    }

    /// The device claim taken by [`attach`](Self::attach), if any.
    pub fn claim(&self) -> Option<&Claim> {
        self.claim.as_ref()
    }

    pub fn sensor(&mut self) -> &mut Shtc3<BUS, T> {
        &mut self.sensor
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn config(&self) -> &AcquisitionConfig {
        &self.config
    }

    /// Number of the next cycle.
    pub fn cycle(&self) -> u32 {
        self.cycle
    }

    /// Samples until one attempt succeeds or the budget is spent, then
    /// forwards the result.
    pub fn run_cycle(&mut self) -> CycleOutcome {
        let cycle = self.cycle;
        self.cycle = self.cycle.wrapping_add(1);

        let max_attempts = self.config.max_attempts.max(1);
        let mut attempts = 0;
        let mut failure = FailureKind::Other;

        while attempts < max_attempts {
            attempts += 1;
            debug!("cycle {}: sample attempt {}/{}", cycle, attempts, max_attempts);

            match self.sensor.read_sample() {
                Ok(measurement) => {
                    info!("cycle {}: {}", cycle, measurement);
                    self.sink.deliver(cycle, &measurement);
                    return CycleOutcome::Delivered { cycle, attempts, measurement };
                }
                Err(e) => {
                    warn!("cycle {}: attempt {} failed: {}", cycle, attempts, e);
                    failure = FailureKind::of(&e);
                    if !self.should_retry(failure) {
                        break;
                    }
                }
            }
        }

        warn!("cycle {}: sensor read failed after {} attempts", cycle, attempts);
        self.sink.report_failure(cycle, failure);
        CycleOutcome::Skipped { cycle, attempts, failure }
    }

    /// Runs `cycles` cycles, waiting the configured period after each.
    pub fn run<D: Shtc3Timer>(&mut self, timer: &mut D, cycles: u32) -> RunSummary {
        let mut summary = RunSummary::default();
        for _ in 0..cycles {
            match self.run_cycle() {
                CycleOutcome::Delivered { .. } => summary.delivered += 1,
                CycleOutcome::Skipped { .. } => summary.skipped += 1,
            }
            timer.delay(self.config.period);
        }
        summary
    }

    fn should_retry(&self, failure: FailureKind) -> bool {
        match failure {
            FailureKind::Bus | FailureKind::Timeout => true,
            FailureKind::Checksum => self.config.checksum_policy == ChecksumPolicy::Retry,
            FailureKind::Other => false,
        }
    }
}
