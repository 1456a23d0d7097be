mod utils;
#[allow(unused)]
use utils::*;

mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use swarm::prelude::*;
    use tokio::time::sleep;

    #[tokio::test(flavor = "multi_thread")]
    #[ntest::timeout(10_000)]
    async fn interrupt_stops_without_final_report() {
        let base = init().await;
        let config = config(&format!("{base}/delay/ms/200"), 4, Duration::from_secs(30));

        let started = Instant::now();
        let mut reporter = MemoryReporter::new();
        let outcome = run_load(config, &mut reporter, sleep(Duration::from_millis(500)))
            .await
            .unwrap();

        assert!(outcome.is_interrupted());
        assert!(started.elapsed() < Duration::from_secs(2));
        assert!(reporter.finished.is_none());
        assert!(reporter.interrupted.is_some());
    }

    #[tokio::test(flavor = "multi_thread")]
    #[ntest::timeout(10_000)]
    async fn interrupt_abandons_slow_requests() {
        let base = init().await;
        let config = config(&format!("{base}/delay/ms/20000"), 3, Duration::from_secs(30));

        let started = Instant::now();
        let outcome = run_load(
            config,
            &mut ConsoleReporter::new(vec![], false),
            sleep(Duration::from_millis(300)),
        )
        .await
        .unwrap();

        assert!(outcome.is_interrupted());
        assert_eq!(outcome.stats().total(), 0);
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
