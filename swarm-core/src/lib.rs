//! Data model shared by the swarm load driver: run configuration, request
//! outcomes, the ramp-up schedule and the statistics aggregate.
mod config;
mod constants;
mod error;
mod outcome;
mod ramp;
mod stats;

pub use config::*;
pub use constants::*;
pub use error::*;
pub use outcome::*;
pub use ramp::*;
pub use stats::*;
