pub mod debounce;
pub mod sink;
pub mod store;
pub mod tracker;

pub use debounce::QueryDebouncer;
pub use sink::{ResultSink, TrackingState};
pub use store::ResultStore;
pub use tracker::{Tracker, TrackerConfig};
