use crate::store::Store;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Refreshes the store's quotes every `period`, starting one period from now.
/// The initial generation is produced by the build itself.
pub fn spawn_refresher(store: Arc<Store>, period: Duration) -> JoinHandle<()> {
    info!(period_secs = period.as_secs_f64(), "Starting quote refresher");

    tokio::spawn(async move {
        let mut ticker = time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            debug!("Refreshing quotes");
            store.refresh();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{CountingMetrics, sample_rows};
    use std::sync::atomic::Ordering;

    #[tokio::test(start_paused = true)]
    async fn test_refresher_ticks_on_the_period() {
        let metrics = Arc::new(CountingMetrics::new());
        let store = Arc::new(Store::new(metrics.clone()));
        store.build(&sample_rows()).unwrap();
        let per_refresh = metrics.calls.load(Ordering::SeqCst);

        let handle = spawn_refresher(Arc::clone(&store), Duration::from_secs(60));

        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(metrics.calls.load(Ordering::SeqCst), per_refresh);

        time::sleep(Duration::from_secs(100)).await;
        assert_eq!(metrics.calls.load(Ordering::SeqCst), per_refresh * 3);

        handle.abort();
    }
}
