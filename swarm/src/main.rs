use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
#[cfg(feature = "metrics")]
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;
use swarm::core::{DEFAULT_JITTER_PROBABILITY, DEFAULT_USERS};
use swarm::prelude::*;
#[allow(unused_imports)]
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Drive a target URL with concurrent GET requests and report live statistics.
#[derive(Parser, Debug)]
#[command(name = "swarm", version, about)]
struct Cli {
    /// URL every virtual user requests
    target: String,

    /// Maximum number of concurrent virtual users
    #[arg(short, long, env = "SWARM_USERS", default_value_t = DEFAULT_USERS)]
    users: usize,

    /// Total run duration in seconds
    #[arg(short, long, env = "SWARM_DURATION", default_value_t = 60)]
    duration: u64,

    /// Seconds over which users ramp from 1 to --users (0 disables ramp-up)
    #[arg(short, long, env = "SWARM_RAMP_UP", default_value_t = 0)]
    ramp_up: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Seconds between progress reports
    #[arg(long, default_value_t = 5)]
    report_interval: u64,

    /// Fraction of requests delayed by injected jitter (0 disables it)
    #[arg(long, default_value_t = DEFAULT_JITTER_PROBABILITY)]
    jitter_probability: f64,

    #[arg(long, default_value_t = 100)]
    jitter_min_ms: u64,

    #[arg(long, default_value_t = 500)]
    jitter_max_ms: u64,

    /// Keep in-flight requests at the permitted concurrency, or one below it
    #[arg(long, default_value_t = RefillThreshold::Permitted)]
    refill: RefillThreshold,

    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Serve Prometheus metrics on this address
    #[arg(long)]
    metrics_addr: Option<SocketAddr>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    /// Progress blocks on stdout
    Console,
    /// Structured log events
    Log,
}

impl Cli {
    fn run_config(&self) -> Result<RunConfig, swarm::core::ConfigError> {
        let config = RunConfig::new(&self.target)?
            .users(self.users)
            .duration(Duration::from_secs(self.duration))
            .ramp_up(Duration::from_secs(self.ramp_up))
            .request_timeout(Duration::from_secs(self.timeout))
            .report_interval(Duration::from_secs(self.report_interval))
            .jitter(JitterConfig {
                probability: self.jitter_probability,
                min: Duration::from_millis(self.jitter_min_ms),
                max: Duration::from_millis(self.jitter_max_ms),
            })
            .refill(self.refill);
        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("swarm=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = cli.run_config().context("Invalid configuration")?;

    if let Some(addr) = cli.metrics_addr {
        #[cfg(feature = "metrics")]
        PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
            .context("Unable to start the Prometheus exporter")?;

        #[cfg(not(feature = "metrics"))]
        warn!("Built without the `metrics` feature, ignoring --metrics-addr {addr}");
    }

    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Unable to listen for the interrupt signal: {err}");
            std::future::pending::<()>().await;
        }
    };

    // Interrupted runs have already printed their notice; both endings exit 0.
    match cli.report {
        ReportFormat::Console => {
            run_load(config, &mut ConsoleReporter::stdout(), shutdown).await?;
        }
        ReportFormat::Log => {
            run_load(config, &mut LogReporter::new(), shutdown).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["swarm", "http://localhost:3002/"]).unwrap();
        let config = cli.run_config().unwrap();
        assert_eq!(config.users, 10);
        assert_eq!(config.duration, Duration::from_secs(60));
        assert_eq!(config.ramp_up, Duration::ZERO);
        assert_eq!(config.refill, RefillThreshold::Permitted);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::try_parse_from([
            "swarm",
            "https://example.com/api",
            "-u",
            "25",
            "-d",
            "120",
            "-r",
            "30",
            "--refill",
            "lagging",
        ])
        .unwrap();
        let config = cli.run_config().unwrap();
        assert_eq!(config.users, 25);
        assert_eq!(config.duration, Duration::from_secs(120));
        assert_eq!(config.ramp_up, Duration::from_secs(30));
        assert_eq!(config.refill, RefillThreshold::Lagging);
    }

    #[test]
    fn test_cli_rejects_non_numeric_duration() {
        assert!(Cli::try_parse_from(["swarm", "http://localhost/", "-d", "soon"]).is_err());
    }

    #[test]
    fn test_cli_rejects_zero_users() {
        let cli = Cli::try_parse_from(["swarm", "http://localhost/", "-u", "0"]).unwrap();
        assert!(cli.run_config().is_err());
    }
}
