//! Conversion from wire types into the domain records the tracker stores.

use vicinity_core::{BusinessDetail, Review};

use crate::types::{RawBusinessDetail, RawReview};

/// Builds the domain record from the joined detail and review responses.
///
/// Review order is preserved; category titles are flattened; the numeric wire
/// rating is rendered with one decimal so the discrete half-step values come
/// out as "0.0" through "5.0".
pub(crate) fn business_detail(raw: RawBusinessDetail, raw_reviews: Vec<RawReview>) -> BusinessDetail {
    BusinessDetail {
        id: raw.id,
        name: raw.name,
        address_lines: raw.location.display_address,
        url: raw.url,
        photo_urls: raw.photos,
        categories: raw.categories.into_iter().map(|c| c.title).collect(),
        review_count: raw.review_count,
        reviews: raw_reviews.into_iter().map(review).collect(),
    }
}

fn review(raw: RawReview) -> Review {
    Review {
        author_name: raw.user.name,
        author_image_url: raw.user.image_url,
        text: raw.text,
        rating: format!("{:.1}", raw.rating),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
