use super::Reporter;
use humantime::format_duration;
use std::io::{self, IsTerminal, Stdout, Write};
use std::time::Duration;
use swarm_core::{Health, RunConfig, Snapshot};
use tracing::warn;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// Human readable report blocks. On a terminal the progress block is redrawn
/// in place and the success rate is colored by [`Health`].
pub struct ConsoleReporter<W> {
    out: W,
    ansi: bool,
    drawn_lines: usize,
}

impl ConsoleReporter<Stdout> {
    pub fn stdout() -> Self {
        let ansi = io::stdout().is_terminal();
        Self::new(io::stdout(), ansi)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, ansi: bool) -> Self {
        Self {
            out,
            ansi,
            drawn_lines: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&self, snapshot: &Snapshot) -> Vec<String> {
        let header = if snapshot.is_final() {
            format!("Final report after {}", whole_secs(snapshot.elapsed))
        } else {
            format!(
                "Progress: {} elapsed, {} remaining",
                whole_secs(snapshot.elapsed),
                whole_secs(snapshot.remaining)
            )
        };

        let statuses = if snapshot.status_counts.is_empty() {
            "-".to_string()
        } else {
            snapshot
                .status_counts
                .iter()
                .map(|(status, count)| format!("{status}: {count}"))
                .collect::<Vec<_>>()
                .join(", ")
        };

        vec![
            self.paint(BOLD, &header),
            format!(
                "  Requests:      {} total, {} successful",
                snapshot.total, snapshot.successful
            ),
            format!(
                "  Success rate:  {}",
                self.paint(
                    health_color(snapshot.health()),
                    &format!("{:.2}%", snapshot.success_rate)
                )
            ),
            format!("  Throughput:    {:.2} req/s", snapshot.throughput),
            format!(
                "  Response time: mean {:.3}s, stdev {:.3}s, p95 {:.3}s",
                snapshot.latency.mean.as_secs_f64(),
                snapshot.latency.std_dev.as_secs_f64(),
                snapshot.latency.p95.as_secs_f64()
            ),
            format!("  Status codes:  {statuses}"),
        ]
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.ansi {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn draw(&mut self, lines: &[String], keep: bool) {
        if let Err(err) = self.try_draw(lines) {
            warn!("Unable to write report: {err}");
        }
        self.drawn_lines = if keep { 0 } else { lines.len() };
    }

    fn try_draw(&mut self, lines: &[String]) -> io::Result<()> {
        if self.ansi && self.drawn_lines > 0 {
            // Move to the start of the previous block and clear it.
            write!(self.out, "\x1b[{}F\x1b[J", self.drawn_lines)?;
        }
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn start(&mut self, config: &RunConfig) {
        let line = format!(
            "Loading {} with {} users for {} (ramp-up {})",
            config.target,
            config.users,
            format_duration(config.duration),
            format_duration(config.ramp_up),
        );
        self.draw(&[line], true);
    }

    fn progress(&mut self, snapshot: &Snapshot) {
        let lines = self.render(snapshot);
        self.draw(&lines, false);
    }

    fn finished(&mut self, snapshot: &Snapshot) {
        let lines = self.render(snapshot);
        self.draw(&lines, true);
    }

    fn interrupted(&mut self, elapsed: Duration) {
        let line = format!("Load test stopped by user after {}", whole_secs(elapsed));
        self.draw(&[String::new(), line], true);
    }
}

fn health_color(health: Health) -> &'static str {
    match health {
        Health::Nominal => "\x1b[32m",
        Health::Warning => "\x1b[33m",
        Health::Critical => "\x1b[31m",
    }
}

fn whole_secs(dur: Duration) -> humantime::FormattedDuration {
    format_duration(Duration::from_secs(dur.as_secs()))
}
