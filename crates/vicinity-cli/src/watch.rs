//! The `watch` command: a live tracking session driven by stdin.

use std::time::Duration;

use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader};
use vicinity_client::FusionClient;
use vicinity_core::{AppConfig, BusinessDetail, GeoSample};
use vicinity_tracker::{QueryDebouncer, ResultSink, Tracker, TrackerConfig, TrackingState};

/// Prints tracker events to stdout as they arrive.
struct ConsoleSink;

impl ResultSink for ConsoleSink {
    fn on_new_result(&self, detail: &BusinessDetail, running_count: usize) {
        let categories = if detail.categories.is_empty() {
            String::new()
        } else {
            format!(" [{}]", detail.categories.join(", "))
        };
        println!(
            "[{running_count}] {} — {}{categories} ({} reviews)",
            detail.name,
            detail.display_address(),
            detail.review_count
        );
    }

    fn on_search_count_updated(&self, count: usize) {
        println!("{count} results found");
    }

    fn on_tracking_state_changed(&self, state: TrackingState) {
        println!("tracking {state}");
    }
}

pub(crate) async fn run(
    config: &AppConfig,
    lat: f64,
    lng: f64,
    term: Option<String>,
) -> anyhow::Result<()> {
    let client = FusionClient::new(
        &config.api_key,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    let tracker = Tracker::new(client, ConsoleSink, TrackerConfig::from_app_config(config));

    if let Some(term) = term {
        tracker.on_query_changed(term.trim());
    }
    if !tracker.start(GeoSample::new(lat, lng, Utc::now())) {
        anyhow::bail!("tracking session failed to start");
    }

    let debouncer = {
        let tracker = tracker.clone();
        QueryDebouncer::new(Duration::from_millis(config.debounce_quiet_ms), move |q| {
            tracker.on_query_changed(&q);
        })
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim() == ":quit" {
                    break;
                }
                if let Some(rest) = line.strip_prefix(":loc") {
                    match parse_loc(rest) {
                        Some((lat, lng)) => {
                            tracker.on_location_update(GeoSample::new(lat, lng, Utc::now()));
                            println!("moved to {lat} {lng}");
                        }
                        None => eprintln!("usage: :loc <lat> <lng>"),
                    }
                    continue;
                }
                debouncer.on_text_changed(&line);
            }
        }
    }

    tracker.request_stop();
    while tracker.state() != TrackingState::Stopped {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    Ok(())
}

fn parse_loc(rest: &str) -> Option<(f64, f64)> {
    let mut parts = rest.split_whitespace();
    let lat = parts.next()?.parse().ok()?;
    let lng = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((lat, lng))
}
