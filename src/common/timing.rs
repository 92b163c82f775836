// src/common/timing.rs

use core::time::Duration;

// Datasheet maxima, rounded up to a coarser delay granularity.

// === Power-up / wake ===

/// Wait after the wake command issued during construction.
pub const STARTUP_WAKE_DELAY: Duration = Duration::from_millis(10);
/// Wait after the wake command issued before each measurement (datasheet: 240 µs max).
pub const WAKE_SETTLE: Duration = Duration::from_micros(250);

// === Reset ===

/// Wait after a soft reset before the sensor accepts commands (datasheet: 240 µs max).
pub const SOFT_RESET_SETTLE: Duration = Duration::from_millis(1);

// === Conversion ===

/// Conversion time for normal-power measurements (datasheet: 12.1 ms max).
pub const MEASURE_NORMAL_DELAY: Duration = Duration::from_millis(20);
/// Conversion time for low-power measurements (datasheet: 0.8 ms max).
pub const MEASURE_LOW_POWER_DELAY: Duration = Duration::from_millis(1);

// === Polling ===

/// Default wait between two "not ready" frame reads.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1);
/// Default number of frame reads before giving up.
pub const POLL_MAX_ATTEMPTS: u8 = 10;

// === Acquisition ===

/// Default time between two acquisition cycles.
pub const ACQUISITION_PERIOD: Duration = Duration::from_secs(30);
/// Default number of sample attempts per acquisition cycle.
pub const ACQUISITION_MAX_ATTEMPTS: u8 = 4;
