use std::sync::OnceLock;
use std::time::Duration;
use swarm::prelude::*;
use tracing::error;
use tracing_subscriber::FmtSubscriber;

/// Install logging once per test binary and start a fresh mock service on an
/// ephemeral port, returning its base URL.
#[allow(unused)]
pub async fn init() -> String {
    static ONCE_LOCK: OnceLock<()> = OnceLock::new();

    ONCE_LOCK.get_or_init(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            default_panic(info);
            error!("Panic occurred: {info:?}");
        }));

        let _ = FmtSubscriber::builder()
            .with_env_filter("swarm=debug,mock_service=info")
            .with_test_writer()
            .try_init();
    });

    let addr = mock_service::spawn().await.unwrap();
    format!("http://{addr}")
}

#[allow(unused)]
pub fn config(url: &str, users: usize, duration: Duration) -> RunConfig {
    RunConfig::new(url)
        .unwrap()
        .users(users)
        .duration(duration)
        .report_interval(Duration::from_millis(500))
        .request_timeout(Duration::from_secs(5))
        .jitter(JitterConfig::disabled())
}

#[allow(unused)]
pub fn assert_consistent(stats: &RunStats) {
    let non_success: u64 = stats
        .status_counts()
        .iter()
        .filter(|(status, _)| !status.is_success())
        .map(|(_, count)| count)
        .sum();
    assert_eq!(stats.total(), stats.successful() + non_success);
    assert_eq!(stats.response_times().len() as u64, stats.successful());
}
