//! Optional `metrics` instrumentation of the control loop.
use swarm_core::RequestOutcome;

#[cfg(feature = "metrics")]
mod enabled {
    use super::*;
    use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram, Unit};

    const REQUESTS: &str = "swarm_requests_total";
    const DURATION: &str = "swarm_request_duration_seconds";
    const IN_FLIGHT: &str = "swarm_in_flight";
    const PERMITTED: &str = "swarm_permitted_concurrency";

    pub(crate) fn describe() {
        describe_counter!(REQUESTS, Unit::Count, "Completed requests by status");
        describe_histogram!(DURATION, Unit::Seconds, "Request duration including injected jitter");
        describe_gauge!(IN_FLIGHT, Unit::Count, "Requests currently in flight");
        describe_gauge!(PERMITTED, Unit::Count, "Concurrency permitted by the ramp-up schedule");
    }

    pub(crate) fn completed(outcome: &RequestOutcome) {
        counter!(REQUESTS, "status" => outcome.status.to_string()).increment(1);
        histogram!(DURATION).record(outcome.elapsed.as_secs_f64());
    }

    pub(crate) fn in_flight(count: usize) {
        gauge!(IN_FLIGHT).set(count as f64);
    }

    pub(crate) fn permitted(count: usize) {
        gauge!(PERMITTED).set(count as f64);
    }
}

#[cfg(not(feature = "metrics"))]
mod enabled {
    use super::*;

    pub(crate) fn describe() {}
    pub(crate) fn completed(_outcome: &RequestOutcome) {}
    pub(crate) fn in_flight(_count: usize) {}
    pub(crate) fn permitted(_count: usize) {}
}

pub(crate) use enabled::*;
