//! The k-mer spectrum: a histogram of hashed minimizer frequencies.
//!
//! Hashed minimizers are binned with the jump consistent hash so the mapping
//! is stable, uniform, and independent of the exact bin count. Counters are
//! floats because concept drift multiplies every counter by a decay weight
//! before each insert, giving exponential forgetting of old evidence.

mod bitvec;

pub use bitvec::BitVec;

use crate::error::{Result, SpektError};

/// A used spectrum bin, emitted on flush.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumBin {
    pub bin: i32,
    pub frequency: f64,
}

/// Jump consistent hash: map a 64-bit key to a bucket in `[0, num_buckets)`.
///
/// Stateless, uniform, and consistent: growing the bucket count moves a key
/// either nowhere or into one of the new buckets.
pub fn jump_consistent_hash(key: u64, num_buckets: i32) -> i32 {
    debug_assert!(num_buckets > 0);
    let mut key = key;
    let mut b: i64 = -1;
    let mut j: i64 = 0;
    while j < i64::from(num_buckets) {
        b = j;
        key = key.wrapping_mul(2_862_933_555_777_941_757).wrapping_add(1);
        j = ((b.wrapping_add(1) as f64) * ((1i64 << 31) as f64 / ((key >> 33).wrapping_add(1) as f64)))
            as i64;
    }
    b as i32
}

/// A fixed array of S frequency counters with a used-bin bit vector.
#[derive(Debug, Clone)]
pub struct KmerSpectrum {
    num_bins: i32,
    bins: Vec<f64>,
    used: BitVec,
    decay_weight: f64,
    scaling: bool,
}

impl KmerSpectrum {
    /// Create an empty spectrum of `num_bins` counters.
    ///
    /// `decay_weight` is the uniform scaling factor exp(-decayRatio); pass
    /// 1.0 to disable scaling entirely.
    pub fn new(num_bins: i32, decay_weight: f64) -> Result<Self> {
        if num_bins < 2 {
            return Err(SpektError::bad_parameter(format!(
                "spectrum must have at least 2 bins (got {})",
                num_bins
            )));
        }
        Ok(KmerSpectrum {
            num_bins,
            bins: vec![0.0; num_bins as usize],
            used: BitVec::new(num_bins as usize),
            decay_weight,
            scaling: decay_weight != 1.0,
        })
    }

    /// Number of bins.
    pub fn size(&self) -> i32 {
        self.num_bins
    }

    /// Number of bins incremented since the last wipe.
    pub fn cardinality(&self) -> usize {
        self.used.count_ones()
    }

    /// Add a hashed minimizer to the spectrum, returning the bin's new value.
    ///
    /// With concept drift enabled every counter is multiplied by the decay
    /// weight before the increment lands, so older evidence fades uniformly.
    pub fn insert(&mut self, hash: u64, increment: f64) -> f64 {
        if self.scaling {
            self.scale();
        }
        let bin = jump_consistent_hash(hash, self.num_bins) as usize;
        self.used.set(bin);
        self.bins[bin] += increment;
        self.bins[bin]
    }

    /// Emit every used bin as `(bin, frequency)` and reset the spectrum.
    pub fn drain(&mut self) -> Vec<SpectrumBin> {
        let mut out = Vec::with_capacity(self.cardinality());
        for bin in self.used.iter_ones() {
            let frequency = self.bins[bin];
            if frequency != 0.0 {
                out.push(SpectrumBin {
                    bin: bin as i32,
                    frequency,
                });
            }
        }
        self.wipe();
        out
    }

    /// Zero all counters and the used-bin bit vector.
    pub fn wipe(&mut self) {
        for bin in &mut self.bins {
            *bin = 0.0;
        }
        self.used.wipe();
    }

    /// Counter values (test and inspection hook).
    pub fn counters(&self) -> &[f64] {
        &self.bins
    }

    /// True when bin `i` has been incremented since the last wipe.
    pub fn is_used(&self, i: usize) -> bool {
        self.used.contains(i)
    }

    fn scale(&mut self) {
        for bin in &mut self.bins {
            *bin *= self.decay_weight;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_hash_in_range() {
        for key in [0u64, 1, 42, u64::MAX, 0xDEADBEEFCAFE] {
            for buckets in [2i32, 16, 255, 65536] {
                let b = jump_consistent_hash(key, buckets);
                assert!(b >= 0 && b < buckets);
            }
        }
    }

    #[test]
    fn test_jump_hash_consistency() {
        // growing the bucket count either leaves a key in place or moves it
        // into the newly added bucket
        for key in 0u64..500 {
            for buckets in 2i32..40 {
                let before = jump_consistent_hash(key, buckets);
                let after = jump_consistent_hash(key, buckets + 1);
                assert!(after == before || after == buckets);
            }
        }
    }

    #[test]
    fn test_insert_and_cardinality() {
        let mut ks = KmerSpectrum::new(256, 1.0).unwrap();
        assert_eq!(ks.cardinality(), 0);
        let v1 = ks.insert(12345, 1.0);
        assert_eq!(v1, 1.0);
        let v2 = ks.insert(12345, 1.0);
        assert_eq!(v2, 2.0);
        assert_eq!(ks.cardinality(), 1);
    }

    #[test]
    fn test_unused_bins_are_zero() {
        let mut ks = KmerSpectrum::new(64, 1.0).unwrap();
        for key in 0u64..20 {
            ks.insert(key, 1.0);
        }
        for i in 0..64 {
            if !ks.is_used(i) {
                assert_eq!(ks.counters()[i], 0.0);
            }
            assert!(ks.counters()[i] >= 0.0);
        }
    }

    #[test]
    fn test_drain_resets() {
        let mut ks = KmerSpectrum::new(128, 1.0).unwrap();
        ks.insert(7, 1.0);
        ks.insert(7, 1.0);
        ks.insert(99, 1.0);

        let bins = ks.drain();
        assert_eq!(bins.len(), 2);
        let total: f64 = bins.iter().map(|b| b.frequency).sum();
        assert_eq!(total, 3.0);

        assert_eq!(ks.cardinality(), 0);
        assert!(ks.counters().iter().all(|&c| c == 0.0));
        assert!(ks.drain().is_empty());
    }

    #[test]
    fn test_decay_scales_before_insert() {
        let weight = (-0.5f64).exp();
        let mut ks = KmerSpectrum::new(64, weight).unwrap();
        let first = ks.insert(42, 1.0);
        assert!((first - 1.0).abs() < 1e-12);
        // second insert into the same bin: the old count decays first
        let second = ks.insert(42, 1.0);
        assert!((second - (weight + 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_too_few_bins_rejected() {
        assert!(KmerSpectrum::new(1, 1.0).is_err());
        assert!(KmerSpectrum::new(2, 1.0).is_ok());
    }
}
