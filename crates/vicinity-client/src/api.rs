//! Trait seams over the remote API.
//!
//! The tracker consumes these contracts rather than [`FusionClient`]
//! directly so it can run against in-memory fakes in tests.

use async_trait::async_trait;
use vicinity_core::{BusinessDetail, BusinessSummary, GeoSample};

use crate::client::FusionClient;
use crate::error::ClientError;

/// The search endpoint: candidate businesses around a location.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Returns business summaries in the API's relevance order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or
    /// a malformed response body.
    async fn search(
        &self,
        location: &GeoSample,
        term: &str,
    ) -> Result<Vec<BusinessSummary>, ClientError>;
}

/// The per-business detail fetch: joined detail + reviews.
#[async_trait]
pub trait DetailApi: Send + Sync {
    /// Returns the full record for `id`, or an error if either sub-request
    /// fails — never a partial record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure, non-success status, or
    /// a malformed response body.
    async fn fetch_detail(&self, id: &str) -> Result<BusinessDetail, ClientError>;
}

#[async_trait]
impl SearchApi for FusionClient {
    async fn search(
        &self,
        location: &GeoSample,
        term: &str,
    ) -> Result<Vec<BusinessSummary>, ClientError> {
        FusionClient::search(self, location, term).await
    }
}

#[async_trait]
impl DetailApi for FusionClient {
    async fn fetch_detail(&self, id: &str) -> Result<BusinessDetail, ClientError> {
        FusionClient::fetch_detail(self, id).await
    }
}
