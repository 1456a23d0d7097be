//! The load driver control loop.
use crate::jitter::Jitter;
use crate::pool::RequestPool;
use crate::recorder;
use crate::report::Reporter;
use crate::transport::{HttpTransport, Transport};
use crate::SwarmError;
use humantime::format_duration;
use std::future::Future;
use std::pin::pin;
use std::sync::Arc;
use std::time::Duration;
use swarm_core::{ConfigError, RequestOutcome, RunConfig, RunStats, POLL_TIMEOUT};
use tokio::time::{sleep, Instant};
#[allow(unused_imports)]
use tracing::{debug, error, info, instrument, trace, warn};

/// How a run ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The duration elapsed and every in-flight request drained.
    Finished { stats: RunStats, elapsed: Duration },
    /// Stopped by an external signal; in-flight requests were abandoned.
    Interrupted { stats: RunStats, elapsed: Duration },
}

impl RunOutcome {
    pub fn stats(&self) -> &RunStats {
        match self {
            RunOutcome::Finished { stats, .. } | RunOutcome::Interrupted { stats, .. } => stats,
        }
    }

    pub fn elapsed(&self) -> Duration {
        match self {
            RunOutcome::Finished { elapsed, .. } | RunOutcome::Interrupted { elapsed, .. } => {
                *elapsed
            }
        }
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, RunOutcome::Interrupted { .. })
    }
}

/// Drives a [`Transport`] with a pool of concurrent requests for the
/// configured duration.
pub struct LoadDriver<T> {
    config: RunConfig,
    transport: Arc<T>,
    jitter: Jitter,
}

impl<T: Transport> LoadDriver<T> {
    pub fn new(config: RunConfig, transport: T) -> Result<Self, ConfigError> {
        config.validate()?;
        let jitter = Jitter::new(config.jitter);
        Ok(Self {
            config,
            transport: Arc::new(transport),
            jitter,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Run to completion; only stops early if the process is killed.
    pub async fn run<R: Reporter>(&self, reporter: &mut R) -> RunOutcome {
        self.run_until(reporter, std::future::pending()).await
    }

    /// Run until the duration elapses and in-flight requests drain, or until
    /// `shutdown` resolves, whichever comes first.
    #[instrument(name = "load", skip_all, fields(target = %self.config.target))]
    pub async fn run_until<R, S>(&self, reporter: &mut R, shutdown: S) -> RunOutcome
    where
        R: Reporter,
        S: Future<Output = ()>,
    {
        info!("Running load with config {}", self.config);
        recorder::describe();
        reporter.start(&self.config);

        let ramp = self.config.ramp();
        let mut shutdown = pin!(shutdown);
        let mut pool = RequestPool::new(ramp.limit());
        let mut stats = RunStats::new();
        let mut next_id = 0;

        let start = Instant::now();
        let mut last_report = start;
        let mut permitted = ramp.permitted(Duration::ZERO);
        recorder::permitted(permitted);

        // NOTE: The first admission always fills every permitted slot; the
        // refill threshold only applies afterwards.
        self.fill(&mut pool, &mut next_id, permitted);

        let mut draining = false;
        loop {
            let elapsed = start.elapsed();
            if elapsed < self.config.duration {
                let current = ramp.permitted(elapsed);
                if current != permitted {
                    debug!("Permitted concurrency {permitted} -> {current}");
                    permitted = current;
                    recorder::permitted(permitted);
                }
                self.fill(&mut pool, &mut next_id, self.config.refill.limit(permitted));
            } else if pool.is_empty() {
                break;
            } else if !draining {
                draining = true;
                info!("Duration elapsed, draining {} in-flight requests", pool.len());
            }

            let wake = tokio::select! {
                biased;
                _ = &mut shutdown => Wake::Shutdown,
                completed = pool.next_completed(POLL_TIMEOUT) => Wake::Completed(completed),
            };

            match wake {
                Wake::Shutdown => {
                    let abandoned = pool.abandon();
                    let elapsed = start.elapsed();
                    warn!(
                        "Interrupted after {}, abandoned {abandoned} in-flight requests",
                        format_duration(Duration::from_millis(elapsed.as_millis() as u64))
                    );
                    reporter.interrupted(elapsed);
                    return RunOutcome::Interrupted { stats, elapsed };
                }
                Wake::Completed(Some(outcome)) => {
                    trace!("Request {} completed: {}", outcome.id, outcome.status);
                    recorder::completed(&outcome);
                    recorder::in_flight(pool.len());
                    stats.record(outcome);
                }
                Wake::Completed(None) => {}
            }

            if last_report.elapsed() >= self.config.report_interval {
                let elapsed = start.elapsed();
                let remaining = self.config.duration.saturating_sub(elapsed);
                reporter.progress(&stats.snapshot(elapsed, remaining));
                last_report = Instant::now();
            }
        }

        let elapsed = start.elapsed();
        let snapshot = stats.final_snapshot(elapsed);
        info!("Load complete: {snapshot}");
        reporter.finished(&snapshot);

        RunOutcome::Finished { stats, elapsed }
    }

    fn fill(&self, pool: &mut RequestPool, next_id: &mut u64, target: usize) {
        while pool.len() < target {
            let id = *next_id;
            if !pool.spawn(issue(id, self.transport.clone(), self.jitter)) {
                break;
            }
            trace!("Issued request {id}");
            *next_id += 1;
        }
        recorder::in_flight(pool.len());
    }
}

enum Wake {
    Shutdown,
    Completed(Option<RequestOutcome>),
}

/// One request attempt. The elapsed time covers the call and any injected
/// jitter; transport failures become outcomes rather than errors.
async fn issue<T: Transport>(id: u64, transport: Arc<T>, jitter: Jitter) -> RequestOutcome {
    let start = Instant::now();
    let res = transport.get().await;

    let delay = jitter.sample(&mut rand::thread_rng());
    if let Some(delay) = delay {
        sleep(delay).await;
    }

    let elapsed = start.elapsed();
    match res {
        Ok(code) => RequestOutcome::http(id, code, elapsed),
        Err(err) => RequestOutcome::transport_error(id, elapsed, err.to_string()),
    }
}

/// Validate `config`, build a pooled HTTP client for its target and run a
/// [`LoadDriver`] until completion or `shutdown`.
pub async fn run_load<R, S>(
    config: RunConfig,
    reporter: &mut R,
    shutdown: S,
) -> Result<RunOutcome, SwarmError>
where
    R: Reporter,
    S: Future<Output = ()>,
{
    config.validate()?;
    let transport = HttpTransport::from_config(&config)?;
    let driver = LoadDriver::new(config, transport)?;
    Ok(driver.run_until(reporter, shutdown).await)
}
