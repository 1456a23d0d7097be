use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid target URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Unsupported URL scheme `{0}`, expected http or https")]
    UnsupportedScheme(String),

    #[error("At least one virtual user is required")]
    NoUsers,

    #[error("Run duration must be greater than zero")]
    ZeroDuration,

    #[error("Report interval must be greater than zero")]
    ZeroReportInterval,

    #[error("Jitter probability must be within 0..=1, got {0}")]
    JitterProbability(f64),

    #[error("Jitter range is empty: min {min:?} exceeds max {max:?}")]
    JitterRange {
        min: std::time::Duration,
        max: std::time::Duration,
    },

    #[error("Unknown refill threshold `{0}`, expected `permitted` or `lagging`")]
    UnknownRefill(String),
}
