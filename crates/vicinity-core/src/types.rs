use serde::{Deserialize, Serialize};

/// The minimal shape the search endpoint returns per business, used only to
/// discover ids that have not been fetched yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessSummary {
    pub id: String,
}

/// A fully fetched business record, normalized from the detail and review
/// endpoints. Immutable once inserted into the result store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessDetail {
    pub id: String,
    pub name: String,
    /// Display address, one line per element, in the order the API returns.
    pub address_lines: Vec<String>,
    pub url: String,
    pub photo_urls: Vec<String>,
    pub categories: Vec<String>,
    pub review_count: u32,
    pub reviews: Vec<Review>,
}

/// A single review attached to a business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub author_name: String,
    pub author_image_url: String,
    pub text: String,
    /// Star rating as the API's discrete half-step value rendered with one
    /// decimal ("0.0" through "5.0"), passed through without reinterpretation.
    pub rating: String,
}

impl BusinessDetail {
    /// Single-line display address, joined with spaces.
    #[must_use]
    pub fn display_address(&self) -> String {
        self.address_lines.join(" ")
    }
}
