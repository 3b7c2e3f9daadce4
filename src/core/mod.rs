//! Core sequence-level algorithms: 2-bit encoding, canonical k-mers, and
//! minimizer extraction.

pub mod encoding;
pub mod extraction;
pub mod workspace;

pub use encoding::{base_code, hash64, reverse_complement, KmerPair};
pub use extraction::extract_into;
pub use workspace::MinimizerWorkspace;
