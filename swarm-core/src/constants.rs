use std::time::Duration;

/// Default number of virtual users.
pub const DEFAULT_USERS: usize = 10;

/// Default total run duration.
pub const DEFAULT_DURATION: Duration = Duration::from_secs(60);

/// Ramp-up is disabled unless requested.
pub const DEFAULT_RAMP_UP: Duration = Duration::ZERO;

/// Default cadence of progress reports.
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(5);

/// Default per-request client timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fraction of completed requests which incur injected jitter.
pub const DEFAULT_JITTER_PROBABILITY: f64 = 0.10;

pub const DEFAULT_JITTER_MIN: Duration = Duration::from_millis(100);
pub const DEFAULT_JITTER_MAX: Duration = Duration::from_millis(500);

/// Upper bound on how long the control loop waits for a single completion
/// before re-checking the ramp and the deadline.
pub const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Idle sleep of the control loop when nothing is in flight.
pub const IDLE_SLEEP: Duration = Duration::from_millis(20);

/// The only status counted as a success.
pub const SUCCESS_STATUS: u16 = 200;

/// Above this many samples the p95 is read by index, otherwise the max is used.
pub const PERCENTILE_MIN_SAMPLES: usize = 10;

/// Success rate (percent) above which a run is considered healthy.
pub const NOMINAL_SUCCESS_RATE: f64 = 95.;

/// Success rate (percent) above which a run is degraded rather than critical.
pub const WARNING_SUCCESS_RATE: f64 = 80.;
