use crate::{
    RequestOutcome, Status, NOMINAL_SUCCESS_RATE, PERCENTILE_MIN_SAMPLES, WARNING_SUCCESS_RATE,
};
use humantime::format_duration;
use std::fmt;
use std::time::Duration;
use tracing::error;

/// Aggregate of every outcome recorded during one run.
///
/// Owned and mutated by the control loop only; request tasks never touch it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunStats {
    total: u64,
    successful: u64,
    status_counts: Vec<(Status, u64)>,
    response_times: Vec<Duration>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: RequestOutcome) {
        self.total += 1;

        match self
            .status_counts
            .iter_mut()
            .find(|(status, _)| *status == outcome.status)
        {
            Some((_, count)) => *count += 1,
            None => self.status_counts.push((outcome.status, 1)),
        }

        if outcome.status.is_success() {
            self.successful += 1;
            self.response_times.push(outcome.elapsed);
        }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn successful(&self) -> u64 {
        self.successful
    }

    pub fn failed(&self) -> u64 {
        self.total - self.successful
    }

    /// Per-status counts in the order each status was first seen.
    pub fn status_counts(&self) -> &[(Status, u64)] {
        &self.status_counts
    }

    pub fn count(&self, status: Status) -> u64 {
        self.status_counts
            .iter()
            .find(|(s, _)| *s == status)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }

    /// Response times of successful requests, in completion order.
    pub fn response_times(&self) -> &[Duration] {
        &self.response_times
    }

    pub fn snapshot(&self, elapsed: Duration, remaining: Duration) -> Snapshot {
        self.build_snapshot(SnapshotKind::Progress, elapsed, remaining)
    }

    pub fn final_snapshot(&self, elapsed: Duration) -> Snapshot {
        self.build_snapshot(SnapshotKind::Final, elapsed, Duration::ZERO)
    }

    fn build_snapshot(&self, kind: SnapshotKind, elapsed: Duration, remaining: Duration) -> Snapshot {
        let success_rate = if self.total == 0 {
            0.
        } else {
            self.successful as f64 / self.total as f64 * 100.
        };

        let throughput = if elapsed.is_zero() {
            0.
        } else {
            self.total as f64 / elapsed.as_secs_f64()
        };

        let secs: Vec<f64> = self
            .response_times
            .iter()
            .map(Duration::as_secs_f64)
            .collect();

        Snapshot {
            kind,
            elapsed,
            remaining,
            total: self.total,
            successful: self.successful,
            success_rate,
            throughput,
            latency: LatencySummary {
                mean: to_duration(mean(&secs)),
                std_dev: to_duration(std_dev(&secs)),
                p95: to_duration(p95(&secs)),
            },
            status_counts: self.status_counts.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotKind {
    Progress,
    Final,
}

/// Derived metrics at a point in the run.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub kind: SnapshotKind,
    pub elapsed: Duration,
    pub remaining: Duration,
    pub total: u64,
    pub successful: u64,
    /// Percentage in `0..=100`.
    pub success_rate: f64,
    /// Requests per second over the whole elapsed time.
    pub throughput: f64,
    pub latency: LatencySummary,
    pub status_counts: Vec<(Status, u64)>,
}

impl Snapshot {
    pub fn is_final(&self) -> bool {
        self.kind == SnapshotKind::Final
    }

    pub fn health(&self) -> Health {
        Health::from_success_rate(self.success_rate)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Requests={}, Successful={}, SuccessRate={:.2}%, RPS={:.2}, mean={:?}, stdev={:?}, p95={:?}, Status=[",
            self.total,
            self.successful,
            self.success_rate,
            self.throughput,
            self.latency.mean,
            self.latency.std_dev,
            self.latency.p95,
        )?;
        for (idx, (status, count)) in self.status_counts.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{status}: {count}")?;
        }
        write!(f, "], Elapsed={}", format_duration(round_secs(self.elapsed)))
    }
}

/// Response time statistics over successful requests only.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LatencySummary {
    pub mean: Duration,
    pub std_dev: Duration,
    pub p95: Duration,
}

/// Coarse classification of a success rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Health {
    Nominal,
    Warning,
    Critical,
}

impl Health {
    pub fn from_success_rate(rate: f64) -> Self {
        if rate > NOMINAL_SUCCESS_RATE {
            Health::Nominal
        } else if rate > WARNING_SUCCESS_RATE {
            Health::Warning
        } else {
            Health::Critical
        }
    }
}

pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        0.
    } else {
        statistical::mean(samples)
    }
}

/// Sample (n - 1) standard deviation; 0 with fewer than two samples.
pub fn std_dev(samples: &[f64]) -> f64 {
    if samples.len() < 2 {
        0.
    } else {
        statistical::standard_deviation(samples, None)
    }
}

/// 95th percentile by index into the sorted samples, falling back to the
/// maximum when there are too few samples to index meaningfully.
pub fn p95(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.;
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    if sorted.len() > PERCENTILE_MIN_SAMPLES {
        // floor(0.95 * n) without float rounding
        sorted[sorted.len() * 95 / 100]
    } else {
        sorted[sorted.len() - 1]
    }
}

fn to_duration(secs: f64) -> Duration {
    if secs.is_finite() && secs >= 0. {
        Duration::from_secs_f64(secs)
    } else {
        error!("Invalid latency calculation: {secs}");
        Duration::ZERO
    }
}

fn round_secs(elapsed: Duration) -> Duration {
    Duration::from_secs(elapsed.as_secs())
}
