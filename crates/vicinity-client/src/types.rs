//! Wire types for the business-search API.
//!
//! Only the fields the orchestrator consumes are modeled; everything else in
//! the vendor responses is ignored by serde. Fields required downstream are
//! non-optional so a missing or ill-typed value fails the whole response at
//! deserialization time.

use serde::Deserialize;

/// Response envelope of `GET /businesses/search`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub businesses: Vec<RawBusinessSummary>,
}

#[derive(Debug, Deserialize)]
pub struct RawBusinessSummary {
    pub id: String,
}

/// Response body of `GET /businesses/{id}`.
#[derive(Debug, Deserialize)]
pub struct RawBusinessDetail {
    pub id: String,
    pub name: String,
    pub location: RawLocation,
    pub url: String,
    pub photos: Vec<String>,
    pub categories: Vec<RawCategory>,
    pub review_count: u32,
}

#[derive(Debug, Deserialize)]
pub struct RawLocation {
    pub display_address: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawCategory {
    pub title: String,
}

/// Response envelope of `GET /businesses/{id}/reviews`.
#[derive(Debug, Deserialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<RawReview>,
}

#[derive(Debug, Deserialize)]
pub struct RawReview {
    pub user: RawUser,
    pub text: String,
    /// Half-step star rating; a number on the wire (`4.5`, `5`).
    pub rating: f64,
}

#[derive(Debug, Deserialize)]
pub struct RawUser {
    pub name: String,
    pub image_url: String,
}
