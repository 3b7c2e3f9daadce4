//! Validated parameters for a sketching run.

use crate::constants::{MAX_KMER_SIZE, MAX_WINDOW_SIZE};
use crate::error::{Result, SpektError};

/// Parameters shared by every stage of the sketching pipeline.
///
/// Construction is the single validation point: a `SketchParams` that exists
/// is known to be internally consistent, so downstream code does not
/// re-check ranges.
#[derive(Debug, Clone)]
pub struct SketchParams {
    /// K-mer size (1..=31).
    pub k: usize,
    /// Minimizer window size in k-mers (1..=256).
    pub w: usize,
    /// Number of slots in each sketch (L).
    pub sketch_size: usize,
    /// Number of k-mer spectrum bins (S).
    pub spectrum_bins: i32,
    /// Decay ratio for concept drift; 1.0 disables decay.
    pub decay_ratio: f64,
    /// Flush interval in records; 0 disables interval flushing.
    pub interval: u64,
    /// Number of minimizer workers.
    pub workers: usize,
}

impl SketchParams {
    pub fn new(
        k: usize,
        w: usize,
        sketch_size: usize,
        spectrum_bins: i32,
        decay_ratio: f64,
        interval: u64,
        workers: usize,
    ) -> Result<Self> {
        if k < 1 || k > MAX_KMER_SIZE {
            return Err(SpektError::bad_parameter(format!(
                "k must be between 1 and {} (got {})",
                MAX_KMER_SIZE, k
            )));
        }
        if w < 1 || w > MAX_WINDOW_SIZE {
            return Err(SpektError::bad_parameter(format!(
                "window size must be between 1 and {} (got {})",
                MAX_WINDOW_SIZE, w
            )));
        }
        if sketch_size == 0 {
            return Err(SpektError::bad_parameter("sketch size must be non-zero"));
        }
        if spectrum_bins < 2 {
            return Err(SpektError::bad_parameter(format!(
                "spectrum must have at least 2 bins (got {})",
                spectrum_bins
            )));
        }
        if !(decay_ratio > 0.0 && decay_ratio <= 1.0) {
            return Err(SpektError::bad_parameter(format!(
                "decay ratio must be in (0, 1] (got {})",
                decay_ratio
            )));
        }
        if workers == 0 {
            return Err(SpektError::bad_parameter("worker count must be non-zero"));
        }
        Ok(SketchParams {
            k,
            w,
            sketch_size,
            spectrum_bins,
            decay_ratio,
            interval,
            workers,
        })
    }

    /// True when concept drift is enabled.
    pub fn concept_drift(&self) -> bool {
        self.decay_ratio != 1.0
    }

    /// The uniform scaling weight applied to spectrum counters, exp(-decay).
    /// Stored as 1.0 when concept drift is disabled so scaling is a no-op.
    pub fn decay_weight(&self) -> f64 {
        if self.concept_drift() {
            (-self.decay_ratio).exp()
        } else {
            1.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SketchParams {
        SketchParams::new(21, 9, 50, 1 << 16, 1.0, 0, 2).unwrap()
    }

    #[test]
    fn test_valid_params() {
        let p = base();
        assert!(!p.concept_drift());
        assert_eq!(p.decay_weight(), 1.0);
    }

    #[test]
    fn test_k_out_of_range() {
        assert!(SketchParams::new(32, 9, 50, 256, 1.0, 0, 2).is_err());
        assert!(SketchParams::new(0, 9, 50, 256, 1.0, 0, 2).is_err());
    }

    #[test]
    fn test_window_out_of_range() {
        assert!(SketchParams::new(21, 0, 50, 256, 1.0, 0, 2).is_err());
        assert!(SketchParams::new(21, 257, 50, 256, 1.0, 0, 2).is_err());
    }

    #[test]
    fn test_zero_sketch_size() {
        assert!(SketchParams::new(21, 9, 0, 256, 1.0, 0, 2).is_err());
    }

    #[test]
    fn test_too_few_bins() {
        assert!(SketchParams::new(21, 9, 50, 1, 1.0, 0, 2).is_err());
    }

    #[test]
    fn test_decay_ratio_range() {
        assert!(SketchParams::new(21, 9, 50, 256, 0.0, 0, 2).is_err());
        assert!(SketchParams::new(21, 9, 50, 256, 1.5, 0, 2).is_err());
        let p = SketchParams::new(21, 9, 50, 256, 0.5, 0, 2).unwrap();
        assert!(p.concept_drift());
        assert!((p.decay_weight() - (-0.5f64).exp()).abs() < 1e-12);
    }
}
