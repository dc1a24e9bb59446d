//! Timer-driven refresh of the snapshot store and the displayed clock.
//!
//! A [`RefreshSession`] owns both timers. It is started once by the
//! composition root and stopped on shutdown (or when dropped).

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::config::RefreshConfig;
use crate::market::{regenerate, RandomSource};
use crate::store::SnapshotStore;

/// Wall-clock value shown in the dashboard header.
#[derive(Clone)]
pub struct WallClock {
    now: Arc<RwLock<DateTime<Local>>>,
}

impl Default for WallClock {
    fn default() -> Self {
        Self { now: Arc::new(RwLock::new(Local::now())) }
    }
}

impl WallClock {
    pub async fn get(&self) -> DateTime<Local> {
        *self.now.read().await
    }

    pub async fn set(&self, value: DateTime<Local>) {
        *self.now.write().await = value;
    }
}

/// Builds a fresh random source for each `start`.
pub type SourceFactory = Box<dyn Fn() -> Box<dyn RandomSource + Send> + Send + Sync>;

pub struct RefreshSession {
    store: SnapshotStore,
    clock: WallClock,
    snapshot_interval: Duration,
    clock_interval: Duration,
    make_source: SourceFactory,
    tasks: Option<(JoinHandle<()>, JoinHandle<()>)>,
}

impl RefreshSession {
    /// Session drawing from `StdRng`, seeded from `config.seed` when set.
    pub fn new(store: SnapshotStore, clock: WallClock, config: &RefreshConfig) -> Self {
        let seed = config.seed;
        let make_source: SourceFactory =
            Box::new(move || -> Box<dyn RandomSource + Send> {
                match seed {
                    | Some(s) => Box::new(StdRng::seed_from_u64(s)),
                    | None => Box::new(StdRng::from_entropy()),
                }
            });
        Self::with_source(store, clock, config, make_source)
    }

    /// Session with a caller-provided random source; `make_source` is called
    /// on every `start`.
    pub fn with_source(
        store: SnapshotStore, clock: WallClock, config: &RefreshConfig, make_source: SourceFactory,
    ) -> Self {
        Self {
            store,
            clock,
            snapshot_interval: Duration::from_millis(config.snapshot_interval_ms),
            clock_interval: Duration::from_millis(config.clock_interval_ms),
            make_source,
            tasks: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.tasks.is_some()
    }

    /// Spawn both timers. Must be called inside a Tokio runtime. Calling it on
    /// a running session does nothing.
    pub fn start(&mut self) {
        if self.is_running() {
            warn!("refresh session already running");
            return;
        }

        let snapshot_task = tokio::spawn(snapshot_loop(
            self.store.clone(),
            (self.make_source)(),
            self.snapshot_interval,
        ));
        let clock_task = tokio::spawn(clock_loop(self.clock.clone(), self.clock_interval));
        self.tasks = Some((snapshot_task, clock_task));

        info!(
            snapshot_ms = self.snapshot_interval.as_millis() as u64,
            clock_ms = self.clock_interval.as_millis() as u64,
            "refresh session started"
        );
    }

    /// Cancel both timers.
    pub fn stop(&mut self) {
        if let Some((snapshot_task, clock_task)) = self.tasks.take() {
            snapshot_task.abort();
            clock_task.abort();
            info!("refresh session stopped");
        }
    }
}

impl Drop for RefreshSession {
    fn drop(&mut self) {
        self.stop();
    }
}

fn ticker(period: Duration) -> tokio::time::Interval {
    // first tick one full period after start
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn snapshot_loop(
    store: SnapshotStore, mut rng: Box<dyn RandomSource + Send>, period: Duration,
) {
    let mut interval = ticker(period);
    loop {
        interval.tick().await;
        let prev = store.get().await;
        let next = regenerate(&prev, &mut *rng);
        store.replace(next).await;
        metrics::counter!("snapshot_refresh_total", 1);
        debug!(revision = store.revision(), "snapshot refreshed");
    }
}

async fn clock_loop(clock: WallClock, period: Duration) {
    let mut interval = ticker(period);
    loop {
        interval.tick().await;
        clock.set(Local::now()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::{seed_snapshot, FixedSequence};
    use chrono::Utc;

    fn config() -> RefreshConfig {
        RefreshConfig { snapshot_interval_ms: 2000, clock_interval_ms: 1000, seed: Some(1) }
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_on_period() {
        let store = SnapshotStore::new(seed_snapshot(Utc::now()));
        let mut session = RefreshSession::new(store.clone(), WallClock::default(), &config());
        session.start();
        assert!(session.is_running());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(store.revision(), 0);

        tokio::time::sleep(Duration::from_millis(5000)).await;
        assert_eq!(store.revision(), 3);

        session.stop();
        assert!(!session.is_running());
        tokio::time::sleep(Duration::from_millis(10_000)).await;
        assert_eq!(store.revision(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn start_twice_keeps_one_timer() {
        let store = SnapshotStore::new(seed_snapshot(Utc::now()));
        let mut session = RefreshSession::new(store.clone(), WallClock::default(), &config());
        session.start();
        session.start();
        tokio::time::sleep(Duration::from_millis(4500)).await;
        assert_eq!(store.revision(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_timers() {
        let store = SnapshotStore::new(seed_snapshot(Utc::now()));
        {
            let mut session =
                RefreshSession::new(store.clone(), WallClock::default(), &config());
            session.start();
            tokio::time::sleep(Duration::from_millis(2500)).await;
        }
        tokio::time::sleep(Duration::from_millis(10_000)).await;
        assert_eq!(store.revision(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn injected_source_drives_regeneration() {
        let seed = seed_snapshot(Utc::now());
        let store = SnapshotStore::new(seed.clone());
        let mut session = RefreshSession::with_source(
            store.clone(),
            WallClock::default(),
            &config(),
            Box::new(|| Box::new(FixedSequence::constant(0.5)) as Box<dyn RandomSource + Send>),
        );
        session.start();
        tokio::time::sleep(Duration::from_millis(2100)).await;

        let snap = store.get().await;
        assert_eq!(snap.assets, {
            let mut a = seed.assets.clone();
            for q in a.quotes_mut() {
                q.change = 0.0;
                q.change_percent = 0.0;
            }
            a
        });
        assert_eq!(snap.strategies.active, 150);
    }

    #[tokio::test(start_paused = true)]
    async fn clock_advances() {
        let clock = WallClock::default();
        let first = clock.get().await;
        let store = SnapshotStore::new(seed_snapshot(Utc::now()));
        let mut session = RefreshSession::new(store, clock.clone(), &config());
        session.start();
        // paused tokio time does not move the system clock, so only check it was written
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(clock.get().await >= first);
    }
}
