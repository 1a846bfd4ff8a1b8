use vicinity_core::BusinessDetail;

/// Lifecycle of one tracking session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    /// Never started.
    Idle,
    /// The poll loop is live.
    Running,
    /// Stop was requested; the in-flight cycle is allowed to finish.
    StopRequested,
    /// The loop has exited. A new start is permitted.
    Stopped,
}

impl std::fmt::Display for TrackingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackingState::Idle => write!(f, "idle"),
            TrackingState::Running => write!(f, "running"),
            TrackingState::StopRequested => write!(f, "stop requested"),
            TrackingState::Stopped => write!(f, "stopped"),
        }
    }
}

/// Receiver of tracker output, implemented by the embedding surface (a UI, a
/// CLI printer, a test harness).
///
/// `on_new_result` events arrive in fetch-completion order, not in the search
/// endpoint's relevance order, and may be delivered from any worker thread.
pub trait ResultSink: Send + Sync + 'static {
    /// A business was fetched and inserted; `running_count` is the store size
    /// including it.
    fn on_new_result(&self, detail: &BusinessDetail, running_count: usize);

    /// The visible result count was reset (query change).
    fn on_search_count_updated(&self, count: usize);

    /// The session moved to `state`.
    fn on_tracking_state_changed(&self, state: TrackingState);
}
