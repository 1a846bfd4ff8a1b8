/// Application configuration, loaded from `VICINITY_*` environment variables.
#[derive(Clone)]
pub struct AppConfig {
    /// Bearer token for the business-search API.
    pub api_key: String,
    /// Base URL of the business-search API.
    pub api_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Poll-loop tick interval in milliseconds.
    pub tick_interval_ms: u64,
    /// Minimum movement in meters before a tick re-queries the search API.
    pub min_distance_m: f64,
    /// Quiet period after the last keystroke before a query edit commits.
    pub debounce_quiet_ms: u64,
    /// Spacing between successive detail-fetch launches within one cycle.
    pub fetch_spacing_ms: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"[redacted]")
            .field("api_base_url", &self.api_base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("tick_interval_ms", &self.tick_interval_ms)
            .field("min_distance_m", &self.min_distance_m)
            .field("debounce_quiet_ms", &self.debounce_quiet_ms)
            .field("fetch_spacing_ms", &self.fetch_spacing_ms)
            .finish()
    }
}
