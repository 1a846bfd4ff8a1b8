//! HTTP client for the business-search API.
//!
//! Wraps `reqwest` with bearer authentication, typed error handling, and
//! response deserialization for the three endpoints the tracker consumes:
//! search, business detail, and business reviews.

use std::time::Duration;

use reqwest::{Client, Url};
use vicinity_core::{BusinessDetail, BusinessSummary, GeoSample};

use crate::error::ClientError;
use crate::normalize;
use crate::types::{RawBusinessDetail, RawReview, ReviewsResponse, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://api.yelp.com/v3";

/// Client for a Yelp-Fusion-shaped business-search API.
///
/// Use [`FusionClient::new`] for production or
/// [`FusionClient::with_base_url`] to point at a mock server in tests.
pub struct FusionClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl FusionClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` cannot serve as a base for endpoint paths.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise: strip any trailing slash so endpoint segments are pushed
        // onto a clean path.
        let parsed =
            Url::parse(base_url.trim_end_matches('/')).map_err(|e| ClientError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: e.to_string(),
            })?;
        if parsed.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                url: base_url.to_owned(),
                reason: "URL cannot be a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: parsed,
        })
    }

    /// Searches for businesses around `location`, optionally filtered by
    /// `term`. An empty (or whitespace-only) term is omitted from the request
    /// entirely rather than sent as an empty parameter.
    ///
    /// Result order is the API's relevance order.
    ///
    /// # Errors
    ///
    /// - [`ClientError::RateLimited`] — HTTP 429.
    /// - [`ClientError::NotFound`] — HTTP 404.
    /// - [`ClientError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ClientError::Http`] — network or TLS failure.
    /// - [`ClientError::Deserialize`] — body is not the expected shape.
    pub async fn search(
        &self,
        location: &GeoSample,
        term: &str,
    ) -> Result<Vec<BusinessSummary>, ClientError> {
        let mut url = self.endpoint(&["businesses", "search"]);
        {
            let mut pairs = url.query_pairs_mut();
            let term = term.trim();
            if !term.is_empty() {
                pairs.append_pair("term", term);
            }
            pairs
                .append_pair("latitude", &location.latitude.to_string())
                .append_pair("longitude", &location.longitude.to_string());
        }

        let body = self.request_text(url).await?;
        let parsed = serde_json::from_str::<SearchResponse>(&body).map_err(|e| {
            ClientError::Deserialize {
                context: "business search response".to_owned(),
                source: e,
            }
        })?;

        Ok(parsed
            .businesses
            .into_iter()
            .map(|b| BusinessSummary { id: b.id })
            .collect())
    }

    /// Fetches the full record for one business: the detail and review
    /// requests are issued concurrently and both must succeed; a failure in
    /// either fails the whole operation with no partial record.
    ///
    /// # Errors
    ///
    /// Propagates the first error from either sub-request; see [`Self::search`]
    /// for the variants.
    pub async fn fetch_detail(&self, id: &str) -> Result<BusinessDetail, ClientError> {
        let (raw, raw_reviews) = tokio::try_join!(self.get_business(id), self.get_reviews(id))?;
        Ok(normalize::business_detail(raw, raw_reviews))
    }

    async fn get_business(&self, id: &str) -> Result<RawBusinessDetail, ClientError> {
        let url = self.endpoint(&["businesses", id]);
        let body = self.request_text(url).await?;
        serde_json::from_str::<RawBusinessDetail>(&body).map_err(|e| ClientError::Deserialize {
            context: format!("business detail for {id}"),
            source: e,
        })
    }

    async fn get_reviews(&self, id: &str) -> Result<Vec<RawReview>, ClientError> {
        let url = self.endpoint(&["businesses", id, "reviews"]);
        let body = self.request_text(url).await?;
        let parsed = serde_json::from_str::<ReviewsResponse>(&body).map_err(|e| {
            ClientError::Deserialize {
                context: format!("business reviews for {id}"),
                source: e,
            }
        })?;
        Ok(parsed.reviews)
    }

    /// Issues a GET with bearer auth and maps non-success statuses to typed
    /// errors, returning the body text on success.
    async fn request_text(&self, url: Url) -> Result<String, ClientError> {
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(&self.api_key)
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(ClientError::RateLimited {
                url: url.to_string(),
                retry_after_secs,
            });
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound {
                url: url.to_string(),
            });
        }

        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }

    /// Appends path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected at construction, so this always
        // takes the Ok branch.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
