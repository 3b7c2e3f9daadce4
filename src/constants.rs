//! Constants used throughout the spekt library.

/// Maximum k-mer size storable in a 2-bit packed u64.
pub const MAX_KMER_SIZE: usize = 31;

/// Maximum minimizer window size.
pub const MAX_WINDOW_SIZE: usize = 256;

/// Capacity of the bounded record channel between the reader thread and the
/// boss. Backpressure applies here: the reader blocks once the boss falls
/// this many records behind.
pub const RECORD_CHANNEL_SIZE: usize = 128;

/// Seed for the consistent weighted sampling matrices. Changing this value
/// breaks comparability with every sketch produced before the change, so it
/// is persisted in the sketch envelope and checked on comparison.
pub const CWS_SEED: u64 = 1;

/// Magic tag carried by every sketch envelope on disk.
pub const SKETCH_MAGIC: &str = "spekt/sketch/1";

/// File extension for sketch envelopes.
pub const SKETCH_EXT: &str = "sketch";
