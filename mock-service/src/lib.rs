//! Demo target service for load runs and integration tests.
use axum::{debug_handler, extract::Path, http::StatusCode, routing::get, Router};
use rand::Rng;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::debug;

pub fn router() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/status/:code", get(status))
        .route("/flaky/:ok_percent", get(flaky))
        .route("/delay/ms/:delay_ms", get(delay))
        .layer(TraceLayer::new_for_http())
}

pub async fn run(addr: SocketAddr) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    serve(listener).await
}

pub async fn serve(listener: TcpListener) -> anyhow::Result<()> {
    axum::serve(listener, router()).await?;
    Ok(())
}

/// Bind an ephemeral local port and serve in the background.
pub async fn spawn() -> anyhow::Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(err) = serve(listener).await {
            tracing::error!("Mock service stopped: {err}");
        }
    });
    Ok(addr)
}

#[debug_handler]
pub async fn index() -> &'static str {
    REQUESTS.fetch_add(1, Ordering::Relaxed);
    "ok"
}

#[debug_handler]
pub async fn status(Path(code): Path<u16>) -> StatusCode {
    REQUESTS.fetch_add(1, Ordering::Relaxed);
    StatusCode::from_u16(code).unwrap_or(StatusCode::BAD_REQUEST)
}

#[debug_handler]
pub async fn flaky(Path(ok_percent): Path<u32>) -> StatusCode {
    REQUESTS.fetch_add(1, Ordering::Relaxed);
    let roll = rand::thread_rng().gen_range(0..100);
    if roll < ok_percent {
        StatusCode::OK
    } else {
        debug!("Flaky failure");
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[debug_handler]
pub async fn delay(Path(delay_ms): Path<u64>) -> &'static str {
    REQUESTS.fetch_add(1, Ordering::Relaxed);
    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    "ok"
}

/** RPS Printer **/

static REQUESTS: AtomicU64 = AtomicU64::new(0);

pub async fn rps_measure_task() {
    loop {
        tokio::time::sleep(Duration::from_millis(1000)).await;
        let requests = REQUESTS.swap(0, Ordering::Relaxed);
        println!("{requests} RPS");
    }
}
