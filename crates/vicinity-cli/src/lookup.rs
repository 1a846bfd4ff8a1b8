//! The `lookup` command: one-shot search + detail fan-out.
//!
//! Per-id fetch failures are logged and skipped rather than propagated, so a
//! single bad business does not abort the run.

use std::time::Duration;

use chrono::Utc;
use vicinity_client::FusionClient;
use vicinity_core::{AppConfig, BusinessDetail, GeoSample};

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

    let location = GeoSample::new(lat, lng, Utc::now());
    let term = term.unwrap_or_default();
    let summaries = client.search(&location, &term).await?;

    if summaries.is_empty() {
        println!("no businesses found");
        return Ok(());
    }

    let spacing = Duration::from_millis(config.fetch_spacing_ms);
    let mut found = 0usize;
    let mut is_first = true;

    for summary in summaries {
        if !is_first && !spacing.is_zero() {
            tokio::time::sleep(spacing).await;
        }
        is_first = false;

        match client.fetch_detail(&summary.id).await {
            Ok(detail) => {
                found += 1;
                print_detail(found, &detail);
            }
            Err(e) => {
                tracing::warn!(id = %summary.id, error = %e, "detail fetch failed — skipping");
            }
        }
    }

    println!("{found} results");
    Ok(())
}

fn print_detail(index: usize, detail: &BusinessDetail) {
    println!("{index}. {} — {}", detail.name, detail.display_address());
    if !detail.categories.is_empty() {
        println!("   {}", detail.categories.join(", "));
    }
    println!("   {} ({} reviews)", detail.url, detail.review_count);
    for review in &detail.reviews {
        println!("   {} {}: {}", review.rating, review.author_name, review.text);
    }
}
