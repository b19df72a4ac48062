//! Aggregations derived from the branch and POI lists: headline metrics,
//! the type distribution and the rating histogram.

use crate::models::{Branch, Poi};
use std::collections::{BTreeMap, HashSet};

/// Labels for the five rating buckets, in bucket order.
pub const RATING_BUCKET_LABELS: [&str; 5] = ["1-2", "2-3", "3-4", "4-5", "5"];

/// Headline numbers for the branch overview panel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BranchMetrics {
    pub total: usize,
    pub distinct_cities: usize,
    /// max(latitude) - min(latitude), 0 when no branches are loaded.
    pub latitude_span: f64,
}

impl BranchMetrics {
    pub fn compute(branches: &[Branch]) -> Self {
        let distinct_cities = branches
            .iter()
            .map(|branch| branch.city.as_str())
            .collect::<HashSet<_>>()
            .len();

        let latitude_span = match branches.len() {
            0 => 0.0,
            _ => {
                let mut min = f64::INFINITY;
                let mut max = f64::NEG_INFINITY;
                for branch in branches {
                    min = min.min(branch.latitude);
                    max = max.max(branch.latitude);
                }
                max - min
            }
        };

        Self {
            total: branches.len(),
            distinct_cities,
            latitude_span,
        }
    }

    pub fn format_latitude_span(&self) -> String {
        format!("{:.2}°", self.latitude_span)
    }
}

/// Headline numbers for the POI result set.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PoiMetrics {
    pub total: usize,
    /// Mean over POIs that carry a rating; None when none do.
    pub average_rating: Option<f64>,
    /// Number of distinct primary types, type-less POIs counted as "Unknown".
    pub unique_types: usize,
}

impl PoiMetrics {
    pub fn compute(pois: &[Poi]) -> Self {
        let ratings: Vec<f64> = pois.iter().filter_map(|poi| poi.rating).collect();
        let average_rating = if ratings.is_empty() {
            None
        } else {
            Some(ratings.iter().sum::<f64>() / ratings.len() as f64)
        };

        let unique_types = pois
            .iter()
            .map(Poi::primary_type)
            .collect::<HashSet<_>>()
            .len();

        Self {
            total: pois.len(),
            average_rating,
            unique_types,
        }
    }
}

/// Count of POIs grouped by primary type, largest group first (ties broken
/// alphabetically so the ordering is stable across redraws).
pub fn type_distribution(pois: &[Poi]) -> Vec<(String, u64)> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for poi in pois {
        *counts.entry(poi.primary_type()).or_insert(0) += 1;
    }

    let mut distribution: Vec<(String, u64)> = counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect();
    distribution.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    distribution
}

/// Bucket rated POIs into [1,2), [2,3), [3,4), [4,5) and exactly 5.
/// POIs without a rating are excluded entirely, never counted as zero.
pub fn rating_histogram(pois: &[Poi]) -> [u64; 5] {
    let mut bins = [0u64; 5];
    for rating in pois.iter().filter_map(|poi| poi.rating) {
        if (1.0..2.0).contains(&rating) {
            bins[0] += 1;
        } else if (2.0..3.0).contains(&rating) {
            bins[1] += 1;
        } else if (3.0..4.0).contains(&rating) {
            bins[2] += 1;
        } else if (4.0..5.0).contains(&rating) {
            bins[3] += 1;
        } else if rating == 5.0 {
            bins[4] += 1;
        }
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch(name: &str, city: &str, latitude: f64, longitude: f64) -> Branch {
        Branch {
            name: name.to_string(),
            ifsc_code: String::new(),
            address: String::new(),
            city: city.to_string(),
            latitude,
            longitude,
        }
    }

    fn rated_poi(rating: Option<f64>) -> Poi {
        Poi {
            name: "poi".to_string(),
            rating,
            ..Poi::default()
        }
    }

    fn typed_poi(types: &[&str]) -> Poi {
        Poi {
            name: "poi".to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
            ..Poi::default()
        }
    }

    #[test]
    fn test_branch_metrics_scenario() {
        let branches = vec![branch("A", "X", 1.0, 1.0), branch("B", "Y", 3.0, 2.0)];
        let metrics = BranchMetrics::compute(&branches);
        assert_eq!(metrics.total, 2);
        assert_eq!(metrics.distinct_cities, 2);
        assert_eq!(metrics.format_latitude_span(), "2.00°");
    }

    #[test]
    fn test_distinct_cities_deduplicates() {
        let branches = vec![
            branch("A", "X", 1.0, 1.0),
            branch("B", "X", 2.0, 1.0),
            branch("C", "Y", 3.0, 1.0),
        ];
        assert_eq!(BranchMetrics::compute(&branches).distinct_cities, 2);
    }

    #[test]
    fn test_branch_metrics_empty() {
        let metrics = BranchMetrics::compute(&[]);
        assert_eq!(metrics.total, 0);
        assert_eq!(metrics.distinct_cities, 0);
        assert_eq!(metrics.format_latitude_span(), "0.00°");
    }

    #[test]
    fn test_rating_histogram_scenario() {
        // {rating:5}, {rating:2}, {} -> bins [0,1,0,0,1]
        let pois = vec![
            rated_poi(Some(5.0)),
            rated_poi(Some(2.0)),
            rated_poi(None),
        ];
        assert_eq!(rating_histogram(&pois), [0, 1, 0, 0, 1]);
        assert_eq!(PoiMetrics::compute(&pois).total, 3);
    }

    #[test]
    fn test_rating_of_five_counted_once() {
        let pois = vec![rated_poi(Some(5.0))];
        let bins = rating_histogram(&pois);
        assert_eq!(bins.iter().sum::<u64>(), 1);
        assert_eq!(bins[4], 1);
        assert_eq!(bins[3], 0);
    }

    #[test]
    fn test_rating_buckets_partition_rated_subset() {
        let pois = vec![
            rated_poi(Some(1.0)),
            rated_poi(Some(1.9)),
            rated_poi(Some(2.5)),
            rated_poi(Some(3.0)),
            rated_poi(Some(4.99)),
            rated_poi(Some(5.0)),
            rated_poi(None),
            rated_poi(None),
        ];
        let bins = rating_histogram(&pois);
        assert_eq!(bins, [2, 1, 1, 1, 1]);
        let rated = pois.iter().filter(|p| p.rating.is_some()).count() as u64;
        assert_eq!(bins.iter().sum::<u64>(), rated);
    }

    #[test]
    fn test_type_distribution_counts_missing_types_as_unknown() {
        let pois = vec![
            typed_poi(&["school", "education"]),
            typed_poi(&["school"]),
            typed_poi(&["hospital"]),
            typed_poi(&[]),
        ];
        let distribution = type_distribution(&pois);
        assert_eq!(distribution[0], ("school".to_string(), 2));
        assert!(distribution.contains(&("Unknown".to_string(), 1)));
        assert!(distribution.contains(&("hospital".to_string(), 1)));
        assert_eq!(PoiMetrics::compute(&pois).unique_types, 3);
    }

    #[test]
    fn test_type_distribution_ties_break_alphabetically() {
        let pois = vec![typed_poi(&["mall"]), typed_poi(&["cafe"])];
        let distribution = type_distribution(&pois);
        assert_eq!(distribution[0].0, "cafe");
        assert_eq!(distribution[1].0, "mall");
    }

    #[test]
    fn test_average_rating_skips_unrated() {
        let pois = vec![rated_poi(Some(4.0)), rated_poi(Some(2.0)), rated_poi(None)];
        let metrics = PoiMetrics::compute(&pois);
        assert_eq!(metrics.average_rating, Some(3.0));
    }

    #[test]
    fn test_average_rating_none_when_all_unrated() {
        let pois = vec![rated_poi(None)];
        assert_eq!(PoiMetrics::compute(&pois).average_rating, None);
    }
}
