//! Sketch data structures and their canonical on-disk envelope.

pub mod distance;
pub mod histosketch;
pub mod minhash;

pub use distance::Metric;
pub use histosketch::{CwsSamples, HistoSketch};
pub use minhash::{KhfSketch, KmvSketch};

use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::SKETCH_MAGIC;
use crate::error::{Result, SpektError};

/// The sketching algorithms a persisted envelope can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SketchAlgorithm {
    HistoSketch,
    Khf,
    Kmv,
}

impl SketchAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            SketchAlgorithm::HistoSketch => "histosketch",
            SketchAlgorithm::Khf => "khf",
            SketchAlgorithm::Kmv => "kmv",
        }
    }
}

impl FromStr for SketchAlgorithm {
    type Err = SpektError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "histosketch" => Ok(SketchAlgorithm::HistoSketch),
            "khf" => Ok(SketchAlgorithm::Khf),
            "kmv" => Ok(SketchAlgorithm::Kmv),
            other => Err(SpektError::serialization(format!(
                "unknown sketch algorithm: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for SketchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The canonical persisted form of a sketch: JSON with a magic header and
/// an algorithm tag.
///
/// `mins` is the slot array; `weights` carries the CWS scores and is only
/// present for histosketches. `md5sum` is the MD5 of the little-endian byte
/// image of `mins`, verified on load. The CWS `seed` is persisted so that
/// sketches generated under a different seed fail closed on comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SketchEnvelope {
    pub magic: String,
    pub algorithm: String,
    pub ksize: u32,
    pub num: u32,
    pub num_histogram_bins: i32,
    pub concept_drift: bool,
    pub decay_ratio: f64,
    pub seed: u64,
    pub mins: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weights: Vec<f64>,
    pub md5sum: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
}

/// MD5 of the little-endian byte image of a slot array, as lowercase hex.
pub fn md5_of_slots(slots: &[u64]) -> String {
    let mut bytes = Vec::with_capacity(8 * slots.len());
    for &value in slots {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    format!("{:x}", md5::compute(&bytes))
}

impl SketchEnvelope {
    /// Assemble an envelope, computing the slot-array checksum.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        algorithm: SketchAlgorithm,
        ksize: u32,
        num: u32,
        num_histogram_bins: i32,
        concept_drift: bool,
        decay_ratio: f64,
        seed: u64,
        mins: Vec<u64>,
        weights: Vec<f64>,
        banner: Option<String>,
    ) -> Self {
        let md5sum = md5_of_slots(&mins);
        SketchEnvelope {
            magic: SKETCH_MAGIC.to_string(),
            algorithm: algorithm.as_str().to_string(),
            ksize,
            num,
            num_histogram_bins,
            concept_drift,
            decay_ratio,
            seed,
            mins,
            weights,
            md5sum,
            banner,
        }
    }

    /// The parsed algorithm tag.
    pub fn algorithm(&self) -> Result<SketchAlgorithm> {
        self.algorithm.parse()
    }

    /// Write the envelope as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| SpektError::io(path, "create", e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// Read an envelope back, checking the magic tag and the checksum.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| SpektError::io(path, "open", e))?;
        let envelope: SketchEnvelope = serde_json::from_reader(BufReader::new(file))?;
        if envelope.magic != SKETCH_MAGIC {
            return Err(SpektError::serialization(format!(
                "'{}' is not a spekt sketch (magic '{}')",
                path.display(),
                envelope.magic
            )));
        }
        envelope.algorithm()?;
        let expected = md5_of_slots(&envelope.mins);
        if expected != envelope.md5sum {
            return Err(SpektError::serialization(format!(
                "'{}' is corrupt: stored md5 {} != computed {}",
                path.display(),
                envelope.md5sum,
                expected
            )));
        }
        Ok(envelope)
    }

    /// Check that two envelopes can be compared.
    ///
    /// Comparison fails closed: mismatched algorithm, k, sketch length,
    /// bin count or seed returns `SketchIncompatible` rather than a
    /// misleading similarity.
    pub fn check_compatibility(&self, other: &SketchEnvelope) -> Result<()> {
        if self.algorithm != other.algorithm {
            return Err(SpektError::incompatible(format!(
                "different algorithms ({} vs {})",
                self.algorithm, other.algorithm
            )));
        }
        if self.ksize != other.ksize {
            return Err(SpektError::incompatible(format!(
                "different k-mer sizes ({} vs {})",
                self.ksize, other.ksize
            )));
        }
        if self.num != other.num {
            return Err(SpektError::incompatible(format!(
                "different sketch lengths ({} vs {})",
                self.num, other.num
            )));
        }
        if self.num_histogram_bins != other.num_histogram_bins {
            return Err(SpektError::incompatible(format!(
                "different histogram bin counts ({} vs {})",
                self.num_histogram_bins, other.num_histogram_bins
            )));
        }
        if self.seed != other.seed {
            return Err(SpektError::incompatible(format!(
                "different sampling seeds ({} vs {})",
                self.seed, other.seed
            )));
        }
        Ok(())
    }

    /// Positional comparison needs aligned slot arrays. `check_compatibility`
    /// only compares the configured sketch length; a KMV sketch that saw
    /// fewer than L distinct hashes materialises short, so the stored arrays
    /// are checked separately before any position-by-position metric.
    fn check_slot_counts(&self, other: &SketchEnvelope) -> Result<()> {
        if self.mins.len() != other.mins.len() {
            return Err(SpektError::incompatible(format!(
                "different stored slot counts ({} vs {})",
                self.mins.len(),
                other.mins.len()
            )));
        }
        Ok(())
    }

    /// Algorithm-appropriate similarity estimate in [0, 1].
    ///
    /// HistoSketch and KHF compare slots positionally; KMV intersects the
    /// retained hash sets.
    pub fn similarity(&self, other: &SketchEnvelope) -> Result<f64> {
        self.check_compatibility(other)?;
        match self.algorithm()? {
            SketchAlgorithm::HistoSketch | SketchAlgorithm::Khf => {
                self.check_slot_counts(other)?;
                Ok(1.0 - distance::jaccard_distance(&self.mins, &other.mins))
            }
            SketchAlgorithm::Kmv => Ok(minhash::kmv_similarity(&self.mins, &other.mins)),
        }
    }

    /// Distance between two envelopes under the chosen metric.
    pub fn distance(&self, other: &SketchEnvelope, metric: Metric) -> Result<f64> {
        self.check_compatibility(other)?;
        match metric {
            Metric::Jaccard => match self.algorithm()? {
                SketchAlgorithm::Kmv => Ok(1.0 - minhash::kmv_similarity(&self.mins, &other.mins)),
                _ => {
                    self.check_slot_counts(other)?;
                    Ok(distance::jaccard_distance(&self.mins, &other.mins))
                }
            },
            Metric::WeightedJaccard => {
                self.check_slot_counts(other)?;
                if self.weights.len() != self.mins.len() || other.weights.len() != other.mins.len()
                {
                    return Err(SpektError::incompatible(
                        "weighted jaccard needs histosketch weights".to_string(),
                    ));
                }
                Ok(distance::weighted_jaccard_distance(
                    &self.mins,
                    &self.weights,
                    &other.mins,
                    &other.weights,
                ))
            }
            Metric::BrayCurtis => {
                self.check_slot_counts(other)?;
                Ok(distance::bray_curtis_distance(
                    &distance::slots_as_floats(&self.mins),
                    &distance::slots_as_floats(&other.mins),
                ))
            }
            Metric::Canberra => {
                self.check_slot_counts(other)?;
                Ok(distance::canberra_distance(
                    &distance::slots_as_floats(&self.mins),
                    &distance::slots_as_floats(&other.mins),
                ))
            }
            Metric::Euclidean => {
                self.check_slot_counts(other)?;
                Ok(distance::euclidean_distance(
                    &distance::slots_as_floats(&self.mins),
                    &distance::slots_as_floats(&other.mins),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn envelope(algorithm: SketchAlgorithm, mins: Vec<u64>, weights: Vec<f64>) -> SketchEnvelope {
        SketchEnvelope::new(
            algorithm,
            21,
            mins.len() as u32,
            1 << 14,
            false,
            1.0,
            1,
            mins,
            weights,
            None,
        )
    }

    #[test]
    fn test_md5_matches_known_layout() {
        // the checksum covers the little-endian byte image of the slots
        let a = md5_of_slots(&[1, 2, 3]);
        let b = md5_of_slots(&[1, 2, 3]);
        let c = md5_of_slots(&[3, 2, 1]);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn test_roundtrip_is_bit_exact() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sample.sketch");
        let mut env = envelope(
            SketchAlgorithm::HistoSketch,
            vec![9, 8, 7, 6],
            vec![0.1, f64::MIN_POSITIVE, 1e300, -3.5],
        );
        env.banner = Some("urban-metagenome".to_string());
        env.save(&path).unwrap();
        let back = SketchEnvelope::load(&path).unwrap();
        assert_eq!(env, back);
        // float weights survive the JSON round trip bit for bit
        for (a, b) in env.weights.iter().zip(&back.weights) {
            assert_eq!(a.to_bits(), b.to_bits());
        }
    }

    #[test]
    fn test_load_rejects_wrong_magic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.sketch");
        let mut env = envelope(SketchAlgorithm::Khf, vec![1, 2], vec![]);
        env.magic = "not-a-sketch".to_string();
        let file = File::create(&path).unwrap();
        serde_json::to_writer(file, &env).unwrap();
        assert!(SketchEnvelope::load(&path).is_err());
    }

    #[test]
    fn test_load_rejects_corrupt_checksum() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tampered.sketch");
        let mut env = envelope(SketchAlgorithm::Khf, vec![1, 2], vec![]);
        env.mins[0] = 99;
        let file = File::create(&path).unwrap();
        serde_json::to_writer(file, &env).unwrap();
        let err = SketchEnvelope::load(&path).unwrap_err();
        assert!(matches!(err, SpektError::Serialization(_)));
    }

    #[test]
    fn test_cross_algorithm_comparison_fails_closed() {
        let a = envelope(SketchAlgorithm::HistoSketch, vec![1, 2, 3], vec![]);
        let b = envelope(SketchAlgorithm::Khf, vec![1, 2, 3], vec![]);
        assert!(matches!(
            a.similarity(&b),
            Err(SpektError::SketchIncompatible(_))
        ));
    }

    #[test]
    fn test_mismatched_seed_fails_closed() {
        let a = envelope(SketchAlgorithm::HistoSketch, vec![1, 2, 3], vec![]);
        let mut b = a.clone();
        b.seed = 2;
        assert!(a.similarity(&b).is_err());
    }

    #[test]
    fn test_self_similarity_is_one() {
        let weights = vec![0.5, 0.25, 4.0];
        let h = envelope(SketchAlgorithm::HistoSketch, vec![1, 2, 3], weights);
        assert!((h.similarity(&h).unwrap() - 1.0).abs() < 1e-9);
        assert!((h.distance(&h, Metric::WeightedJaccard).unwrap()).abs() < 1e-9);

        let kmv = envelope(SketchAlgorithm::Kmv, vec![10, 20, 30], vec![]);
        assert!((kmv.similarity(&kmv).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_positional_metrics_reject_unequal_slot_counts() {
        // two KMV sketches configured for the same length, but one sample
        // retained fewer distinct hashes
        let mut a = envelope(SketchAlgorithm::Kmv, vec![10, 20, 30], vec![]);
        a.num = 8;
        let mut b = envelope(SketchAlgorithm::Kmv, vec![10, 20], vec![]);
        b.num = 8;

        // set intersection copes with the size difference
        assert!(a.distance(&b, Metric::Jaccard).is_ok());
        assert!(a.similarity(&b).is_ok());

        // position-by-position metrics must fail closed, not truncate
        for metric in [Metric::Euclidean, Metric::BrayCurtis, Metric::Canberra] {
            assert!(matches!(
                a.distance(&b, metric),
                Err(SpektError::SketchIncompatible(_))
            ));
        }
    }

    #[test]
    fn test_similarity_symmetry() {
        let a = envelope(SketchAlgorithm::Khf, vec![1, 2, 3, 4], vec![]);
        let b = envelope(SketchAlgorithm::Khf, vec![1, 9, 3, 8], vec![]);
        assert_eq!(a.similarity(&b).unwrap(), b.similarity(&a).unwrap());
        assert_eq!(a.similarity(&b).unwrap(), 0.5);
    }
}
