use crate::{
    ConfigError, Ramp, DEFAULT_DURATION, DEFAULT_JITTER_MAX, DEFAULT_JITTER_MIN,
    DEFAULT_JITTER_PROBABILITY, DEFAULT_RAMP_UP, DEFAULT_REPORT_INTERVAL,
    DEFAULT_REQUEST_TIMEOUT, DEFAULT_USERS,
};
use humantime::format_duration;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

/// Settings for a single load run. Immutable once the run starts.
///
/// Built with the consuming setters and checked with [`RunConfig::validate`]
/// before any request is issued.
///
/// # Example
/// ```
/// use swarm_core::RunConfig;
/// use std::time::Duration;
///
/// let config = RunConfig::new("http://127.0.0.1:3002/")
///     .unwrap()
///     .users(25)
///     .duration(Duration::from_secs(30))
///     .ramp_up(Duration::from_secs(10));
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub target: Url,
    pub users: usize,
    pub duration: Duration,
    pub ramp_up: Duration,
    pub report_interval: Duration,
    pub request_timeout: Duration,
    pub jitter: JitterConfig,
    pub refill: RefillThreshold,
}

impl RunConfig {
    pub fn new(target: &str) -> Result<Self, ConfigError> {
        let target = Url::parse(target)?;
        match target.scheme() {
            "http" | "https" => {}
            scheme => return Err(ConfigError::UnsupportedScheme(scheme.to_string())),
        }

        Ok(Self {
            target,
            users: DEFAULT_USERS,
            duration: DEFAULT_DURATION,
            ramp_up: DEFAULT_RAMP_UP,
            report_interval: DEFAULT_REPORT_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            jitter: JitterConfig::default(),
            refill: RefillThreshold::default(),
        })
    }

    pub fn users(mut self, users: usize) -> Self {
        self.users = users;
        self
    }

    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// A zero window disables ramp-up.
    pub fn ramp_up(mut self, ramp_up: Duration) -> Self {
        self.ramp_up = ramp_up;
        self
    }

    pub fn report_interval(mut self, interval: Duration) -> Self {
        self.report_interval = interval;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn jitter(mut self, jitter: JitterConfig) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn refill(mut self, refill: RefillThreshold) -> Self {
        self.refill = refill;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.users == 0 {
            return Err(ConfigError::NoUsers);
        }

        if self.duration.is_zero() {
            return Err(ConfigError::ZeroDuration);
        }

        if self.report_interval.is_zero() {
            return Err(ConfigError::ZeroReportInterval);
        }

        self.jitter.validate()
    }

    pub fn ramp(&self) -> Ramp {
        Ramp::new(self.users, self.ramp_up)
    }
}

impl fmt::Display for RunConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "target={}, users={}, duration={}, ramp_up={}, refill={}",
            self.target,
            self.users,
            format_duration(self.duration),
            format_duration(self.ramp_up),
            self.refill,
        )
    }
}

/// Artificial backend variability added on top of the measured request time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JitterConfig {
    pub probability: f64,
    pub min: Duration,
    pub max: Duration,
}

impl JitterConfig {
    pub fn disabled() -> Self {
        Self {
            probability: 0.,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.probability > 0.
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(0. ..=1.).contains(&self.probability) {
            return Err(ConfigError::JitterProbability(self.probability));
        }

        if self.min > self.max {
            return Err(ConfigError::JitterRange {
                min: self.min,
                max: self.max,
            });
        }

        Ok(())
    }
}

impl Default for JitterConfig {
    fn default() -> Self {
        Self {
            probability: DEFAULT_JITTER_PROBABILITY,
            min: DEFAULT_JITTER_MIN,
            max: DEFAULT_JITTER_MAX,
        }
    }
}

/// How many in-flight requests the driver keeps while refilling the pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RefillThreshold {
    /// Refill while in-flight < permitted concurrency.
    #[default]
    Permitted,
    /// Refill while in-flight < permitted concurrency - 1, leaving one slot of slack.
    Lagging,
}

impl RefillThreshold {
    pub fn limit(&self, permitted: usize) -> usize {
        match self {
            Self::Permitted => permitted,
            Self::Lagging => permitted.saturating_sub(1),
        }
    }
}

impl FromStr for RefillThreshold {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "permitted" => Ok(Self::Permitted),
            "lagging" => Ok(Self::Lagging),
            _ => Err(ConfigError::UnknownRefill(s.to_string())),
        }
    }
}

impl fmt::Display for RefillThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permitted => write!(f, "permitted"),
            Self::Lagging => write!(f, "lagging"),
        }
    }
}
