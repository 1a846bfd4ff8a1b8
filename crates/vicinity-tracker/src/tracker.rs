//! The tracking loop: movement-gated polling of the search endpoint with
//! rate-spaced concurrent detail fetches.
//!
//! One long-lived loop task per session. Detail-fetch tasks are detached:
//! stopping the loop prevents further cycles but lets in-flight fetches
//! complete and still report. Control flags live behind mutexes/atomics and
//! are never held across an await.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::Notify;
use vicinity_client::{DetailApi, SearchApi};
use vicinity_core::{geo, AppConfig, BusinessDetail, GeoSample};

use crate::sink::{ResultSink, TrackingState};
use crate::store::ResultStore;

/// Timing and movement thresholds for one tracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Delay between poll cycles.
    pub tick_interval: Duration,
    /// Minimum movement before a tick re-queries the search endpoint.
    pub min_distance_m: f64,
    /// Spacing between successive detail-fetch launches within one cycle.
    pub fetch_spacing: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(2000),
            min_distance_m: 10.0,
            fetch_spacing: Duration::from_millis(230),
        }
    }
}

impl TrackerConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            tick_interval: Duration::from_millis(config.tick_interval_ms),
            min_distance_m: config.min_distance_m,
            fetch_spacing: Duration::from_millis(config.fetch_spacing_ms),
        }
    }
}

/// Movement-gated polling orchestrator.
///
/// `A` is the remote API (search + detail), `S` the event sink. Cheap to
/// share: all state lives behind an `Arc`.
pub struct Tracker<A, S> {
    shared: Arc<Shared<A, S>>,
}

impl<A, S> Clone for Tracker<A, S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

struct Shared<A, S> {
    api: A,
    sink: S,
    store: ResultStore,
    config: TrackerConfig,
    state: Mutex<TrackingState>,
    /// Most recent sample from the location source.
    latest: Mutex<Option<GeoSample>>,
    /// The sample the last search consumed; `None` until the first search.
    previous: Mutex<Option<GeoSample>>,
    query: Mutex<String>,
    force_search: AtomicBool,
    stop_notify: Notify,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<A, S> Tracker<A, S>
where
    A: SearchApi + DetailApi + 'static,
    S: ResultSink,
{
    #[must_use]
    pub fn new(api: A, sink: S, config: TrackerConfig) -> Self {
        Self {
            shared: Arc::new(Shared {
                api,
                sink,
                store: ResultStore::new(),
                config,
                state: Mutex::new(TrackingState::Idle),
                latest: Mutex::new(None),
                previous: Mutex::new(None),
                query: Mutex::new(String::new()),
                force_search: AtomicBool::new(false),
                stop_notify: Notify::new(),
            }),
        }
    }

    /// Starts a tracking session at `initial`.
    ///
    /// Returns `false` without side effects if a session is already running
    /// or still winding down. A fresh session forgets the previously consumed
    /// location, so its first cycle always searches.
    pub fn start(&self, initial: GeoSample) -> bool {
        {
            let mut state = lock(&self.shared.state);
            match *state {
                TrackingState::Running | TrackingState::StopRequested => {
                    tracing::debug!(state = %*state, "start ignored");
                    return false;
                }
                TrackingState::Idle | TrackingState::Stopped => {
                    *state = TrackingState::Running;
                }
            }
        }

        *lock(&self.shared.latest) = Some(initial);
        *lock(&self.shared.previous) = None;
        self.shared
            .sink
            .on_tracking_state_changed(TrackingState::Running);
        tracing::info!(
            latitude = initial.latitude,
            longitude = initial.longitude,
            "tracking started"
        );

        let shared = Arc::clone(&self.shared);
        tokio::spawn(shared.run_loop());
        true
    }

    /// Asks the running session to stop after its current cycle.
    ///
    /// Returns `false` if no session is running. In-flight detail fetches
    /// are not cancelled; they may still insert and report.
    pub fn request_stop(&self) -> bool {
        {
            let mut state = lock(&self.shared.state);
            if *state != TrackingState::Running {
                tracing::debug!(state = %*state, "stop ignored");
                return false;
            }
            *state = TrackingState::StopRequested;
        }
        self.shared
            .sink
            .on_tracking_state_changed(TrackingState::StopRequested);
        self.shared.stop_notify.notify_one();
        tracing::info!("stop requested");
        true
    }

    /// Records a new sample from the location source. Cheap; called at the
    /// source's own cadence.
    pub fn on_location_update(&self, sample: GeoSample) {
        *lock(&self.shared.latest) = Some(sample);
    }

    /// Switches the session to a new committed query: drops all results,
    /// resets the visible count, and forces the next cycle to search
    /// regardless of movement.
    pub fn on_query_changed(&self, term: &str) {
        *lock(&self.shared.query) = term.to_owned();
        self.shared.store.clear();
        self.shared.sink.on_search_count_updated(0);
        self.shared.force_search.store(true, Ordering::SeqCst);
        tracing::info!(query = term, "query changed — results cleared");
    }

    #[must_use]
    pub fn state(&self) -> TrackingState {
        *lock(&self.shared.state)
    }

    /// Stored results in insertion order.
    #[must_use]
    pub fn results(&self) -> Vec<BusinessDetail> {
        self.shared.store.snapshot()
    }

    #[must_use]
    pub fn result_count(&self) -> usize {
        self.shared.store.count()
    }
}

impl<A, S> Shared<A, S>
where
    A: SearchApi + DetailApi + 'static,
    S: ResultSink,
{
    async fn run_loop(self: Arc<Self>) {
        loop {
            tokio::select! {
                () = tokio::time::sleep(self.config.tick_interval) => {}
                () = self.stop_notify.notified() => {}
            }
            if *lock(&self.state) == TrackingState::StopRequested {
                break;
            }

            Arc::clone(&self).run_cycle().await;
        }

        *lock(&self.state) = TrackingState::Stopped;
        self.sink.on_tracking_state_changed(TrackingState::Stopped);
        tracing::info!("tracking stopped");
    }

    async fn run_cycle(self: Arc<Self>) {
        let Some(latest) = *lock(&self.latest) else {
            return;
        };
        let previous = *lock(&self.previous);

        let moved = geo::should_trigger(previous.as_ref(), &latest, self.config.min_distance_m);
        let forced = self.force_search.load(Ordering::SeqCst);
        if !moved && !forced {
            tracing::trace!("tick without trigger");
            return;
        }
        self.force_search.store(false, Ordering::SeqCst);

        let term = lock(&self.query).clone();
        tracing::debug!(
            latitude = latest.latitude,
            longitude = latest.longitude,
            query = %term,
            forced,
            "searching"
        );

        let summaries = match self.api.search(&latest, &term).await {
            Ok(summaries) => summaries,
            Err(e) => {
                tracing::warn!(error = %e, "search failed — zero results this cycle");
                Vec::new()
            }
        };
        // This location is consumed whether or not the search (or any of the
        // per-id fetches below) succeeded.
        *lock(&self.previous) = Some(latest);

        let mut launched = 0usize;
        for summary in summaries {
            if self.store.has(&summary.id) {
                tracing::trace!(id = %summary.id, "already fetched — skipping");
                continue;
            }

            let shared = Arc::clone(&self);
            let id = summary.id;
            tokio::spawn(async move { shared.fetch_one(id).await });
            launched += 1;

            tokio::time::sleep(self.config.fetch_spacing).await;
        }
        if launched > 0 {
            tracing::debug!(launched, "issued detail fetches");
        }
    }

    async fn fetch_one(self: Arc<Self>, id: String) {
        match self.api.fetch_detail(&id).await {
            Ok(detail) => {
                if self.store.insert_if_absent(detail.clone()) {
                    let count = self.store.count();
                    self.sink.on_new_result(&detail, count);
                } else {
                    tracing::debug!(id = %id, "duplicate fetch result discarded");
                }
            }
            Err(e) => {
                // The id was never inserted, so a later cycle can retry it.
                tracing::warn!(id = %id, error = %e, "detail fetch failed — dropping this id");
            }
        }
    }
}
