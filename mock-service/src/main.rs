use std::net::SocketAddr;
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter("mock_service=info,tower_http=warn")
        .init();

    tokio::task::spawn(mock_service::rps_measure_task());

    let addr: SocketAddr = "0.0.0.0:3002".parse()?;
    tracing::info!("Serving demo target on {addr}");
    mock_service::run(addr).await
}
