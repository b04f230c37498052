use std::{sync::Arc, time::Duration};

use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use tokio::{sync::watch, task::JoinHandle, time::MissedTickBehavior};
use tracing::{error, info, warn};

use crate::users::repo::UserStore;

/// Periodic store status check, run outside the request path.
pub struct Pinger {
    store: Arc<dyn UserStore>,
    interval: Duration,
}

/// Owns the running pinger task. [`PingerHandle::stop`] ends it and waits for
/// the in-flight check; dropping the handle also ends it, without waiting.
pub struct PingerHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl Pinger {
    pub fn new(store: Arc<dyn UserStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    pub fn start(self) -> PingerHandle {
        let (shutdown, mut stop) = watch::channel(false);
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(interval_secs = self.interval.as_secs(), "liveness pinger started");
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        ping_once(self.store.as_ref()).await;
                    }
                    _ = stop.changed() => break,
                }
            }
            info!("liveness pinger stopped");
        });
        PingerHandle { shutdown, task }
    }
}

impl PingerHandle {
    pub async fn stop(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            warn!(error = %e, "liveness pinger task ended abnormally");
        }
    }
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".into())
}

/// One status check. Never fails: errors are logged and dropped.
pub async fn ping_once(store: &dyn UserStore) -> bool {
    match store.ping().await {
        Ok(()) => {
            info!(at = %now_rfc3339(), "database ping ok");
            true
        }
        Err(e) => {
            error!(at = %now_rfc3339(), error = %format!("{e:#}"), "database ping failed");
            false
        }
    }
}
