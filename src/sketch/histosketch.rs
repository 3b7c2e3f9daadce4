//! HistoSketch: similarity-preserving sketching of streaming histograms
//! by consistent weighted sampling (Yang et al., ICDM 2017).
//!
//! Three L x S sample matrices are drawn once from a seeded generator and
//! shared read-only for the life of the sketch: `r` from Gamma(2,1), `c` as
//! the log of Gamma(2,1) draws, and `b` from Uniform(0,1) pre-multiplied by
//! `r` so the per-update exponent needs one subtraction instead of a
//! multiply. For each incoming (bin, frequency) pair the CWS score A_ka is
//! computed per slot and admitted when it beats the slot's current minimum;
//! with concept drift the stored minimum is divided by the decay weight
//! first, so newer evidence displaces old minima more aggressively.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, SpektError};
use crate::params::SketchParams;

/// The pre-drawn consistent weighted samples.
///
/// Immutable after construction. Row j holds the samples for sketch slot j
/// across all S histogram bins.
#[derive(Debug, Clone)]
pub struct CwsSamples {
    length: usize,
    bins: usize,
    r: Vec<f64>,
    c: Vec<f64>,
    b: Vec<f64>,
}

impl CwsSamples {
    /// Draw the three L x S sample matrices from `seed`.
    pub fn new(length: usize, bins: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let total = length * bins;
        let mut r = Vec::with_capacity(total);
        let mut c = Vec::with_capacity(total);
        let mut b = Vec::with_capacity(total);
        for _ in 0..total {
            let r_sample = gamma_2_1(&mut rng);
            r.push(r_sample);
            c.push(gamma_2_1(&mut rng).ln());
            b.push(rng.gen::<f64>() * r_sample);
        }
        CwsSamples {
            length,
            bins,
            r,
            c,
            b,
        }
    }

    /// A_ka for histogram bin `bin` at sketch slot `slot`, given the bin's
    /// current frequency.
    #[inline]
    pub fn sample(&self, bin: usize, slot: usize, frequency: f64) -> f64 {
        debug_assert!(bin < self.bins && slot < self.length);
        let idx = slot * self.bins + bin;
        let y_ka = (frequency.ln() - self.b[idx]).exp();
        self.c[idx] / (y_ka * self.r[idx].exp())
    }
}

/// Gamma(2,1) as the sum of two unit-rate exponentials.
fn gamma_2_1(rng: &mut StdRng) -> f64 {
    let e1 = -(1.0 - rng.gen::<f64>()).ln();
    let e2 = -(1.0 - rng.gen::<f64>()).ln();
    e1 + e2
}

/// A similarity-preserving sketch of a streaming k-mer spectrum.
#[derive(Debug, Clone)]
pub struct HistoSketch {
    length: usize,
    bins: i32,
    seed: u64,
    decay_ratio: f64,
    decay_weight: f64,
    concept_drift: bool,
    samples: CwsSamples,
    slots: Vec<u64>,
    scores: Vec<f64>,
}

impl HistoSketch {
    /// Create an empty sketch for the given run parameters.
    ///
    /// All slots start at 0 with scores at the maximum float (the unset
    /// state, and unlike a true infinity it survives a JSON round trip);
    /// the first admission moves a slot from `Unset` to `Held`, after which
    /// only strictly smaller scores replace it.
    pub fn new(params: &SketchParams, seed: u64) -> Self {
        let length = params.sketch_size;
        let bins = params.spectrum_bins;
        HistoSketch {
            length,
            bins,
            seed,
            decay_ratio: params.decay_ratio,
            decay_weight: params.decay_weight(),
            concept_drift: params.concept_drift(),
            samples: CwsSamples::new(length, bins as usize, seed),
            slots: vec![0; length],
            scores: vec![f64::MAX; length],
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn bins(&self) -> i32 {
        self.bins
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn decay_ratio(&self) -> f64 {
        self.decay_ratio
    }

    pub fn concept_drift(&self) -> bool {
        self.concept_drift
    }

    /// The slot array (bin identifiers of the current minima).
    pub fn slots(&self) -> &[u64] {
        &self.slots
    }

    /// The CWS scores backing each slot.
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    /// Update the sketch with one histogram bin and its frequency.
    pub fn add_element(&mut self, bin: u64, frequency: f64) {
        debug_assert!(frequency > 0.0);
        for j in 0..self.length {
            let a_ka = self.samples.sample(bin as usize, j, frequency);
            // a bin decayed below float resolution yields a non-finite
            // score; it carries no evidence, so it cannot claim a slot
            if !a_ka.is_finite() {
                continue;
            }
            let current = if self.concept_drift {
                self.scores[j] / self.decay_weight
            } else {
                self.scores[j]
            };
            if a_ka < current {
                self.slots[j] = bin;
                self.scores[j] = a_ka;
            }
        }
    }

    /// Merge another sketch into this one by per-slot score minimum.
    ///
    /// Only sketches built over the same slot count, bin count, seed and
    /// decay configuration can be merged.
    pub fn merge(&mut self, other: &HistoSketch) -> Result<()> {
        if self.length != other.length
            || self.bins != other.bins
            || self.seed != other.seed
            || self.decay_ratio != other.decay_ratio
        {
            return Err(SpektError::incompatible(format!(
                "cannot merge histosketches: L {}/{}, S {}/{}, seed {}/{}, decay {}/{}",
                self.length,
                other.length,
                self.bins,
                other.bins,
                self.seed,
                other.seed,
                self.decay_ratio,
                other.decay_ratio
            )));
        }
        for j in 0..self.length {
            if other.scores[j] < self.scores[j] {
                self.scores[j] = other.scores[j];
                self.slots[j] = other.slots[j];
            }
        }
        Ok(())
    }
}
