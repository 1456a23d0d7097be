mod utils;
#[allow(unused)]
use utils::*;

mod tests {
    use super::*;
    use std::time::Duration;
    use swarm::prelude::*;

    #[tokio::test(flavor = "multi_thread")]
    #[ntest::timeout(30_000)]
    async fn flaky_target_success_ratio() {
        let base = init().await;
        let config = config(&format!("{base}/flaky/80"), 5, Duration::from_secs(2));

        let mut reporter = MemoryReporter::new();
        let outcome = run_load(config, &mut reporter, std::future::pending())
            .await
            .unwrap();

        assert!(!outcome.is_interrupted());
        let stats = outcome.stats();
        assert_consistent(stats);
        assert!(stats.total() > 100, "only {} requests", stats.total());

        let ratio = stats.successful() as f64 / stats.total() as f64;
        assert!((ratio - 0.8).abs() < 0.1, "success ratio {ratio}");

        let mut statuses: Vec<_> = stats.status_counts().iter().map(|(s, _)| *s).collect();
        statuses.sort_by_key(|s| s.to_string());
        assert_eq!(statuses, vec![Status::Http(200), Status::Http(500)]);

        for snapshot in &reporter.progress {
            let non_success: u64 = snapshot
                .status_counts
                .iter()
                .filter(|(status, _)| !status.is_success())
                .map(|(_, count)| count)
                .sum();
            assert_eq!(snapshot.total, snapshot.successful + non_success);
        }

        let last = reporter.finished.unwrap();
        assert!(last.is_final());
        assert_eq!(last.total, stats.total());
        assert!(last.elapsed >= Duration::from_secs(2));
    }

    #[tokio::test(flavor = "multi_thread")]
    #[ntest::timeout(30_000)]
    async fn timeouts_are_transport_errors() {
        let base = init().await;
        let config = config(&format!("{base}/delay/ms/5000"), 3, Duration::from_secs(1))
            .request_timeout(Duration::from_millis(300));

        let mut reporter = MemoryReporter::new();
        let outcome = run_load(config, &mut reporter, std::future::pending())
            .await
            .unwrap();

        let stats = outcome.stats();
        assert_consistent(stats);
        assert!(stats.total() >= 3);
        assert_eq!(stats.successful(), 0);
        assert!(stats.response_times().is_empty());
        assert_eq!(
            stats.status_counts(),
            &[(Status::TransportError, stats.total())]
        );
        assert!(outcome.elapsed() < Duration::from_secs(3));

        let last = reporter.finished.unwrap();
        assert_eq!(last.successful, 0);
        assert_eq!(last.success_rate, 0.);
        assert_eq!(last.latency.mean, Duration::ZERO);
        assert_eq!(last.latency.std_dev, Duration::ZERO);
        assert_eq!(last.latency.p95, Duration::ZERO);
    }

    #[tokio::test(flavor = "multi_thread")]
    #[ntest::timeout(30_000)]
    async fn refused_connections_are_transport_errors() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let config = config(&format!("http://{addr}/"), 2, Duration::from_millis(500));
        let outcome = run_load(config, &mut MemoryReporter::new(), std::future::pending())
            .await
            .unwrap();

        let stats = outcome.stats();
        assert!(stats.total() > 0);
        assert_eq!(stats.count(Status::TransportError), stats.total());
    }

    #[tokio::test(flavor = "multi_thread")]
    #[ntest::timeout(30_000)]
    async fn non_success_statuses_are_bucketed() {
        let base = init().await;
        let config = config(&format!("{base}/status/404"), 2, Duration::from_millis(500));

        let outcome = run_load(config, &mut MemoryReporter::new(), std::future::pending())
            .await
            .unwrap();

        let stats = outcome.stats();
        assert_consistent(stats);
        assert_eq!(stats.successful(), 0);
        assert_eq!(stats.status_counts(), &[(Status::Http(404), stats.total())]);
    }

    #[tokio::test(flavor = "multi_thread")]
    #[ntest::timeout(30_000)]
    async fn ramp_up_run_completes() {
        let base = init().await;
        let config = config(&format!("{base}/delay/ms/50"), 8, Duration::from_secs(2))
            .ramp_up(Duration::from_secs(1));

        let outcome = run_load(config, &mut MemoryReporter::new(), std::future::pending())
            .await
            .unwrap();

        let stats = outcome.stats();
        assert_consistent(stats);
        // One user for the first 125ms, eight users for the second half.
        assert!(stats.total() > 100, "only {} requests", stats.total());
        assert!(stats.total() < 8 * 2_000 / 50);
        assert_eq!(stats.successful(), stats.total());
    }

    #[tokio::test(flavor = "multi_thread")]
    #[ntest::timeout(30_000)]
    async fn jitter_inflates_response_times() {
        let base = init().await;
        let config = config(&base, 4, Duration::from_secs(1)).jitter(JitterConfig::default());

        let outcome = run_load(config, &mut MemoryReporter::new(), std::future::pending())
            .await
            .unwrap();

        let times = outcome.stats().response_times();
        let jittered = times
            .iter()
            .filter(|t| **t >= Duration::from_millis(100))
            .count();
        assert!(jittered > 0);
        assert!(jittered < times.len());
    }

    #[tokio::test(flavor = "multi_thread")]
    #[ntest::timeout(30_000)]
    async fn console_report_is_rendered() {
        let base = init().await;
        let config = config(&base, 2, Duration::from_millis(1_200));

        let mut reporter = ConsoleReporter::new(vec![], false);
        run_load(config, &mut reporter, std::future::pending())
            .await
            .unwrap();

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(out.starts_with("Loading http://"));
        assert!(out.contains("Progress: "));
        assert!(out.contains("Final report after 1s"));
        assert!(out.contains("Status codes:  200: "));
    }

    #[tokio::test]
    async fn invalid_config_is_rejected_before_running() {
        let config = RunConfig::new("http://127.0.0.1:1/").unwrap().users(0);
        let res = run_load(config, &mut MemoryReporter::new(), std::future::pending()).await;
        assert!(matches!(res, Err(SwarmError::Config(_))));
    }
}
