//! Distance metrics over sketch slot arrays.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SpektError};

/// The distance metrics supported for sketch comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Jaccard,
    WeightedJaccard,
    BrayCurtis,
    Canberra,
    Euclidean,
}

impl FromStr for Metric {
    type Err = SpektError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "jaccard" => Ok(Metric::Jaccard),
            "weightedjaccard" => Ok(Metric::WeightedJaccard),
            "braycurtis" => Ok(Metric::BrayCurtis),
            "canberra" => Ok(Metric::Canberra),
            "euclidean" => Ok(Metric::Euclidean),
            other => Err(SpektError::bad_parameter(format!(
                "unknown distance metric: {} (expected jaccard/weightedjaccard/braycurtis/canberra/euclidean)",
                other
            ))),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::Jaccard => "jaccard",
            Metric::WeightedJaccard => "weightedjaccard",
            Metric::BrayCurtis => "braycurtis",
            Metric::Canberra => "canberra",
            Metric::Euclidean => "euclidean",
        };
        f.write_str(name)
    }
}

/// Jaccard distance by positional slot equality.
///
/// Slot arrays must be equal length (checked by the caller against the
/// envelope parameters).
pub fn jaccard_distance(a: &[u64], b: &[u64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    if a.is_empty() {
        return 0.0;
    }
    let intersect = a.iter().zip(b).filter(|(x, y)| x == y).count();
    1.0 - intersect as f64 / a.len() as f64
}

/// Weighted Jaccard distance over aligned slot/weight arrays.
///
/// Matching slots contribute min(|wa|, |wb|) to the intersection and
/// max(|wa|, |wb|) to the union; mismatched slots contribute only the
/// larger weight to the union.
pub fn weighted_jaccard_distance(
    slots_a: &[u64],
    weights_a: &[f64],
    slots_b: &[u64],
    weights_b: &[f64],
) -> f64 {
    debug_assert_eq!(slots_a.len(), slots_b.len());
    let mut intersect = 0.0;
    let mut union = 0.0;
    for i in 0..slots_a.len() {
        let wa = weights_a[i].abs();
        let wb = weights_b[i].abs();
        if slots_a[i] == slots_b[i] {
            intersect += wa.min(wb);
            union += wa.max(wb);
        } else {
            union += wa.max(wb);
        }
    }
    if union == 0.0 {
        return 0.0;
    }
    1.0 - intersect / union
}

/// Bray-Curtis dissimilarity.
pub fn bray_curtis_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    let mut diff = 0.0;
    let mut total = 0.0;
    for (x, y) in a.iter().zip(b) {
        diff += (x - y).abs();
        total += x + y;
    }
    if total == 0.0 {
        return 0.0;
    }
    diff / total
}

/// Canberra distance. Positions where both values are zero contribute
/// nothing.
pub fn canberra_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let denom = x.abs() + y.abs();
            if denom == 0.0 {
                0.0
            } else {
                (x - y).abs() / denom
            }
        })
        .sum()
}

/// Euclidean distance.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Convert a slot array to floats for the numeric metrics.
pub fn slots_as_floats(slots: &[u64]) -> Vec<f64> {
    slots.iter().map(|&s| s as f64).collect()
}
