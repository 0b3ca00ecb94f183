use std::sync::Arc;
use std::time::Duration;
use tinyurl_core::Clock;
use tinyurl_storage::ExpiryReaper;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Spawns a task purging expired documents from `reaper` every `every`.
///
/// The first purge runs immediately. Failures are logged and retried on the
/// next tick.
pub fn spawn_reaper<R>(reaper: Arc<R>, clock: Arc<dyn Clock>, every: Duration) -> JoinHandle<()>
where
    R: ExpiryReaper + ?Sized,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match reaper.purge_expired(clock.now()).await {
                Ok(0) => debug!("no expired documents to purge"),
                Ok(purged) => info!(purged, "purged expired documents"),
                Err(e) => warn!(error = %e, "failed to purge expired documents"),
            }
        }
    })
}
