//! Background tasks
//!
//! Supervises the two periodic loops: the announcement sweep and the invite
//! sync. Each runs on its own task and never overlaps itself.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::announcement::AnnouncementService;
use super::context::ServiceContext;
use super::sync::InviteSyncService;

/// Periodic sweep and sync loops
pub struct BackgroundTasks {
    ctx: ServiceContext,
    sweep_interval: Duration,
    sync_interval: Duration,
    running: Arc<AtomicBool>,
    shutdown: watch::Sender<bool>,
    handles: Mutex<Vec<JoinHandle<()>>>,
}

impl BackgroundTasks {
    pub fn new(ctx: ServiceContext, sweep_interval: Duration, sync_interval: Duration) -> Self {
        Self {
            ctx,
            sweep_interval,
            sync_interval,
            running: Arc::new(AtomicBool::new(false)),
            shutdown: watch::Sender::new(false),
            handles: Mutex::new(Vec::new()),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Spawn both loops
    ///
    /// The first tick of each loop comes one full period after start.
    pub fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Background tasks are already running");
            return;
        }
        self.shutdown.send_replace(false);

        let sweep_ctx = self.ctx.clone();
        let sweep = self.spawn_loop("announcement_sweep", self.sweep_interval, move || {
            let ctx = sweep_ctx.clone();
            async move {
                let now = ctx.clock().now();
                let report = AnnouncementService::new(&ctx).sweep(now).await;
                if report.total() > 0 {
                    info!(delivered = report.delivered, failed = report.failed, "Announcement sweep");
                }
            }
        });

        let sync_ctx = self.ctx.clone();
        let sync = self.spawn_loop("invite_sync", self.sync_interval, move || {
            let ctx = sync_ctx.clone();
            async move {
                InviteSyncService::new(&ctx).refresh_all().await;
            }
        });

        self.handles.lock().extend([sweep, sync]);

        info!(
            sweep_interval_secs = self.sweep_interval.as_secs(),
            sync_interval_secs = self.sync_interval.as_secs(),
            "Background tasks started"
        );
    }

    /// Stop scheduling new ticks and wait for in-flight ones to finish
    pub async fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        self.shutdown.send_replace(true);

        let handles: Vec<_> = self.handles.lock().drain(..).collect();
        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "Background task ended abnormally");
            }
        }

        info!("Background tasks stopped");
    }

    fn spawn_loop<F, Fut>(&self, name: &'static str, period: Duration, mut tick: F) -> JoinHandle<()>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let mut shutdown = self.shutdown.subscribe();

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = shutdown.changed() => break,
                }
                if *shutdown.borrow() {
                    break;
                }

                debug!(task = name, "Tick");
                tick().await;
            }

            debug!(task = name, "Loop ended");
        })
    }
}

impl Drop for BackgroundTasks {
    fn drop(&mut self) {
        self.shutdown.send_replace(true);
        for handle in self.handles.get_mut().drain(..) {
            handle.abort();
        }
    }
}
