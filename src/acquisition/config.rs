// src/acquisition/config.rs

use crate::common::timing;
use core::time::Duration;

/// What to do when a sample fails its checksum.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum ChecksumPolicy {
    /// Take another sample within the same cycle, like a bus error.
    #[default]
    Retry,
    /// Give up on the cycle straight away.
    Abandon,
}

/// Settings of the periodic acquisition loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AcquisitionConfig {
    /// Time between the end of one cycle and the start of the next.
    pub period: Duration,
    /// Sample attempts per cycle (minimum 1).
    pub max_attempts: u8,
    pub checksum_policy: ChecksumPolicy,
}

impl AcquisitionConfig {
    /// Creates a new `AcquisitionConfig`.
    ///
    /// # Arguments
    ///
    /// * `period` - Wait between two cycles.
    /// * `max_attempts` - Sample attempts per cycle.
    pub fn new(period: Duration, max_attempts: u8) -> Self {
        AcquisitionConfig {
            period,
            max_attempts,
            checksum_policy: ChecksumPolicy::default(),
        }
    }

    pub fn period(mut self, period: Duration) -> Self {
        self.period = period;
        self
    }

    pub fn max_attempts(mut self, max_attempts: u8) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn checksum_policy(mut self, policy: ChecksumPolicy) -> Self {
        self.checksum_policy = policy;
        self
    }
}

impl Default for AcquisitionConfig {
    /// 30 s period, 4 attempts, checksum failures retried.
    fn default() -> Self {
        AcquisitionConfig {
            period: timing::ACQUISITION_PERIOD,
            max_attempts: timing::ACQUISITION_MAX_ATTEMPTS,
            checksum_policy: ChecksumPolicy::Retry,
        }
    }
}
