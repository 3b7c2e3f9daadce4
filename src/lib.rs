//! Spekt: streaming histosketching of k-mer spectra.
//!
//! Sequence reads are decomposed to canonical minimizers, binned into a
//! persistent k-mer frequency spectrum (optionally under concept-drift
//! decay), and folded into a fixed-size consistent-weighted-sampling
//! histosketch that preserves weighted Jaccard similarity between samples.

pub mod commands;
pub mod constants;
pub mod core;
pub mod error;
pub mod logging;
pub mod params;
pub mod pipeline;
pub mod sketch;
pub mod spectrum;

pub use constants::{CWS_SEED, MAX_KMER_SIZE, MAX_WINDOW_SIZE, RECORD_CHANNEL_SIZE};
pub use crate::core::{extract_into, MinimizerWorkspace};
pub use error::{Result, SpektError};
pub use params::SketchParams;
pub use pipeline::{PipelineReport, RecordFormat, RunOptions, SeqRecord, SketchedSample};
pub use sketch::{
    HistoSketch, KhfSketch, KmvSketch, Metric, SketchAlgorithm, SketchEnvelope,
};
pub use spectrum::{jump_consistent_hash, KmerSpectrum, SpectrumBin};
