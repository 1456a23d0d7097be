//! Injected response-time jitter simulating backend variability.
use rand::Rng;
use std::time::Duration;
use swarm_core::JitterConfig;

#[derive(Clone, Copy, Debug)]
pub struct Jitter {
    config: JitterConfig,
}

impl Jitter {
    pub fn new(config: JitterConfig) -> Self {
        Self { config }
    }

    /// Extra delay for one completed request, if it was selected for jitter.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Duration> {
        if !self.config.is_enabled() || !rng.gen_bool(self.config.probability) {
            return None;
        }

        let min = self.config.min.as_nanos() as u64;
        let max = self.config.max.as_nanos() as u64;
        Some(Duration::from_nanos(rng.gen_range(min..=max)))
    }
}
