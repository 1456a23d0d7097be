#![cfg_attr(docsrs, feature(doc_cfg))]
//! Concurrent HTTP load driver.
//!
//! A [`LoadDriver`] keeps a pool of in-flight GET requests against a single
//! target, sized by the ramp-up schedule of its [`RunConfig`], and folds every
//! completed request into a [`RunStats`] aggregate. Progress and the final
//! summary are handed to a [`Reporter`].
//!
//! # Example
//! ```no_run
//! use swarm::prelude::*;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), SwarmError> {
//!     let config = RunConfig::new("http://127.0.0.1:3002/")?
//!         .users(20)
//!         .duration(Duration::from_secs(30))
//!         .ramp_up(Duration::from_secs(10));
//!
//!     let mut reporter = LogReporter::new();
//!     let outcome = swarm::run_load(config, &mut reporter, std::future::pending()).await?;
//!     println!("{} requests", outcome.stats().total());
//!     Ok(())
//! }
//! ```
pub mod driver;
pub mod error;
pub mod jitter;
pub mod report;
pub mod transport;

pub(crate) mod pool;
pub(crate) mod recorder;

pub use driver::{run_load, LoadDriver, RunOutcome};
pub use error::SwarmError;
pub use report::{ConsoleReporter, LogReporter, MemoryReporter, Reporter};
pub use transport::{HttpTransport, Transport, TransportError};

#[doc(inline)]
pub use swarm_core as core;

pub mod prelude {
    pub use crate::driver::{run_load, LoadDriver, RunOutcome};
    pub use crate::error::SwarmError;
    pub use crate::report::{ConsoleReporter, LogReporter, MemoryReporter, Reporter};
    pub use crate::transport::{HttpTransport, Transport, TransportError};
    pub use swarm_core::{
        JitterConfig, RefillThreshold, RequestOutcome, RunConfig, RunStats, Snapshot, Status,
    };
}
