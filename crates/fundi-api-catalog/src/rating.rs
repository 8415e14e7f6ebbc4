//! Read-time rating aggregation.
//!
//! There is no stored aggregate anywhere in the system: the summary is
//! recomputed from the underlying feedback rows on every read, so it can
//! never drift out of sync with them. The fold is order-independent, which
//! is why concurrent feedback inserts need no locking — each insert is
//! simply reflected in the next read that observes it.

use serde::Serialize;
use utoipa::ToSchema;

/// Derived rating statistics for one worker (or, for the admin dashboard,
/// the whole platform).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct RatingSummary {
    /// Arithmetic mean of the ratings, rounded to one decimal place.
    /// `None` when there are no ratings — never a fake zero.
    pub average: Option<f64>,

    /// Number of ratings the average is over.
    pub count: i64,
}

impl RatingSummary {
    /// Fold a collection of ratings into its summary.
    #[must_use]
    pub fn from_ratings(ratings: &[i32]) -> Self {
        if ratings.is_empty() {
            return Self {
                average: None,
                count: 0,
            };
        }

        let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
        let mean = sum as f64 / ratings.len() as f64;
        Self {
            average: Some((mean * 10.0).round() / 10.0),
            count: ratings.len() as i64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_collection_is_null_not_zero() {
        let summary = RatingSummary::from_ratings(&[]);
        assert_eq!(summary.average, None);
        assert_eq!(summary.count, 0);
    }

    #[test]
    fn test_mean_rounded_to_one_decimal() {
        let summary = RatingSummary::from_ratings(&[5, 4, 3]);
        assert_eq!(summary.average, Some(4.0));
        assert_eq!(summary.count, 3);
    }

    #[test]
    fn test_rounding_up() {
        // 5 + 4 + 4 = 13 / 3 = 4.333... -> 4.3
        let summary = RatingSummary::from_ratings(&[5, 4, 4]);
        assert_eq!(summary.average, Some(4.3));

        // 5 + 5 + 4 = 14 / 3 = 4.666... -> 4.7
        let summary = RatingSummary::from_ratings(&[5, 5, 4]);
        assert_eq!(summary.average, Some(4.7));
    }

    #[test]
    fn test_single_rating() {
        let summary = RatingSummary::from_ratings(&[2]);
        assert_eq!(summary.average, Some(2.0));
        assert_eq!(summary.count, 1);
    }

    #[test]
    fn test_fold_is_order_independent() {
        let a = RatingSummary::from_ratings(&[1, 3, 5, 2, 4]);
        let b = RatingSummary::from_ratings(&[5, 4, 3, 2, 1]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_null_average_serializes_as_json_null() {
        let summary = RatingSummary::from_ratings(&[]);
        let json = serde_json::to_value(summary).unwrap();
        assert!(json["average"].is_null());
        assert_eq!(json["count"], 0);
    }
}
