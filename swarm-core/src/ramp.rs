use std::time::Duration;

/// Linear ramp of permitted concurrency from 1 up to the configured user limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ramp {
    limit: usize,
    window: Duration,
}

impl Ramp {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self { limit, window }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn is_enabled(&self) -> bool {
        !self.window.is_zero()
    }

    /// Number of in-flight requests allowed `elapsed` after the run started.
    pub fn permitted(&self, elapsed: Duration) -> usize {
        permitted_concurrency(elapsed, self.window, self.limit)
    }
}

/// `min(limit, floor(elapsed / window * limit) + 1)`, or `limit` when the window is zero.
///
/// Computed on integer nanoseconds so that exact multiples of the step do not
/// land one short through float rounding.
pub fn permitted_concurrency(elapsed: Duration, window: Duration, limit: usize) -> usize {
    if window.is_zero() {
        return limit;
    }

    let steps = elapsed.as_nanos().saturating_mul(limit as u128) / window.as_nanos();
    let permitted = usize::try_from(steps)
        .unwrap_or(usize::MAX)
        .saturating_add(1);
    permitted.min(limit)
}
