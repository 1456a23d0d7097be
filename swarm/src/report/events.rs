use super::Reporter;
use humantime::format_duration;
use std::time::Duration;
use swarm_core::{Health, RunConfig, Snapshot};
use tracing::{info, warn};

/// Emits every snapshot as a structured `tracing` event instead of drawing
/// to the terminal.
#[derive(Debug, Default)]
pub struct LogReporter;

impl LogReporter {
    pub fn new() -> Self {
        Self
    }

    fn emit(&self, kind: &str, snapshot: &Snapshot) {
        let statuses = snapshot
            .status_counts
            .iter()
            .map(|(status, count)| format!("{status}={count}"))
            .collect::<Vec<_>>()
            .join(",");

        let health = match snapshot.health() {
            Health::Nominal => "nominal",
            Health::Warning => "warning",
            Health::Critical => "critical",
        };

        info!(
            report = kind,
            elapsed_secs = snapshot.elapsed.as_secs_f64(),
            remaining_secs = snapshot.remaining.as_secs_f64(),
            total = snapshot.total,
            successful = snapshot.successful,
            success_rate = snapshot.success_rate,
            throughput = snapshot.throughput,
            mean_secs = snapshot.latency.mean.as_secs_f64(),
            stdev_secs = snapshot.latency.std_dev.as_secs_f64(),
            p95_secs = snapshot.latency.p95.as_secs_f64(),
            statuses = %statuses,
            health,
            "Load {kind}"
        );
    }
}

impl Reporter for LogReporter {
    fn start(&mut self, config: &RunConfig) {
        info!("Starting load: {config}");
    }

    fn progress(&mut self, snapshot: &Snapshot) {
        self.emit("progress", snapshot);
    }

    fn finished(&mut self, snapshot: &Snapshot) {
        self.emit("final", snapshot);
    }

    fn interrupted(&mut self, elapsed: Duration) {
        warn!(
            "Load test stopped by user after {}",
            format_duration(Duration::from_secs(elapsed.as_secs()))
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarm_core::{RequestOutcome, RunStats};

    #[tracing_test::traced_test]
    #[test]
    fn test_emits_fields() {
        let mut stats = RunStats::new();
        stats.record(RequestOutcome::http(0, 200, Duration::from_millis(40)));
        stats.record(RequestOutcome::http(1, 503, Duration::from_millis(5)));

        let mut reporter = LogReporter::new();
        reporter.finished(&stats.final_snapshot(Duration::from_secs(1)));
        reporter.interrupted(Duration::from_millis(2_500));

        assert!(logs_contain("report=\"final\""));
        assert!(logs_contain("total=2"));
        assert!(logs_contain("statuses=200=1,503=1"));
        assert!(logs_contain("health=\"critical\""));
        assert!(logs_contain("Load test stopped by user after 2s"));
    }
}
