use std::future::Future;
use std::time::Duration;
use swarm_core::{RequestOutcome, IDLE_SLEEP};
use tokio::task::JoinSet;
use tokio::time::{sleep, timeout};
#[allow(unused)]
use tracing::{debug, error, trace, warn};

/// Fixed-capacity set of in-flight request tasks.
pub(crate) struct RequestPool {
    tasks: JoinSet<RequestOutcome>,
    capacity: usize,
}

impl RequestPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            tasks: JoinSet::new(),
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns `false` without spawning when the pool is full.
    pub fn spawn<F>(&mut self, request: F) -> bool
    where
        F: Future<Output = RequestOutcome> + Send + 'static,
    {
        if self.tasks.len() >= self.capacity {
            return false;
        }
        self.tasks.spawn(request);
        true
    }

    /// Waits at most `wait` for one request to finish. An empty pool idles
    /// briefly instead.
    pub async fn next_completed(&mut self, wait: Duration) -> Option<RequestOutcome> {
        if self.tasks.is_empty() {
            sleep(IDLE_SLEEP).await;
            return None;
        }

        match timeout(wait, self.tasks.join_next()).await {
            Ok(Some(Ok(outcome))) => Some(outcome),
            Ok(Some(Err(err))) => {
                error!("Request task failed: {err}");
                None
            }
            Ok(None) | Err(_) => None,
        }
    }

    /// Aborts every in-flight request, returning how many were dropped.
    pub fn abandon(&mut self) -> usize {
        let count = self.tasks.len();
        self.tasks.abort_all();
        count
    }
}
