//! Location samples and movement checks.
//!
//! Distances are great-circle (haversine) over a spherical Earth, which is
//! accurate to well under a percent at the ~10 m scale the tracker cares
//! about.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A single position report from the location source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoSample {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
}

impl GeoSample {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, timestamp: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
        }
    }

    /// Great-circle distance to `other` in meters.
    #[must_use]
    pub fn distance_m(&self, other: &GeoSample) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let delta_lat = (other.latitude - self.latitude).to_radians();
        let delta_lng = (other.longitude - self.longitude).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_M * c
    }
}

/// Decides whether enough movement occurred between two samples to justify a
/// fresh search.
///
/// A missing `previous` sample always triggers (first fetch). Otherwise the
/// distance must be strictly greater than `min_distance_m`; a distance exactly
/// equal to the threshold does not trigger.
#[must_use]
pub fn should_trigger(
    previous: Option<&GeoSample>,
    current: &GeoSample,
    min_distance_m: f64,
) -> bool {
    match previous {
        None => true,
        Some(prev) => prev.distance_m(current) > min_distance_m,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(lat: f64, lng: f64) -> GeoSample {
        GeoSample::new(lat, lng, DateTime::<Utc>::MIN_UTC)
    }

    #[test]
    fn distance_between_identical_samples_is_zero() {
        let a = sample(40.7128, -74.0060);
        assert!(a.distance_m(&a) < f64::EPSILON);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = sample(40.7128, -74.0060);
        let b = sample(40.7138, -74.0060);
        let d1 = a.distance_m(&b);
        let d2 = b.distance_m(&a);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let a = sample(40.0, -74.0);
        let b = sample(41.0, -74.0);
        let d = a.distance_m(&b);
        assert!(d > 110_000.0 && d < 112_000.0, "got {d}");
    }

    #[test]
    fn missing_previous_always_triggers() {
        let current = sample(40.7128, -74.0060);
        assert!(should_trigger(None, &current, 10.0));
    }

    #[test]
    fn identical_coordinates_do_not_trigger() {
        let a = sample(40.7128, -74.0060);
        assert!(!should_trigger(Some(&a), &a, 10.0));
    }

    #[test]
    fn movement_below_threshold_does_not_trigger() {
        let a = sample(40.7128, -74.0060);
        // ~5.5 m north — one degree of latitude is ~111,195 m.
        let b = sample(40.712_85, -74.0060);
        assert!(a.distance_m(&b) < 10.0);
        assert!(!should_trigger(Some(&a), &b, 10.0));
    }

    #[test]
    fn movement_above_threshold_triggers() {
        let a = sample(40.7128, -74.0060);
        // ~55 m north.
        let b = sample(40.7133, -74.0060);
        assert!(a.distance_m(&b) > 10.0);
        assert!(should_trigger(Some(&a), &b, 10.0));
    }

    #[test]
    fn distance_exactly_at_threshold_does_not_trigger() {
        let a = sample(40.7128, -74.0060);
        let b = sample(40.7133, -74.0060);
        let d = a.distance_m(&b);
        // Use the measured distance itself as the threshold: strict inequality.
        assert!(!should_trigger(Some(&a), &b, d));
    }
}
