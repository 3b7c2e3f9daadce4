//! Command-line argument definitions for the spekt CLI.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spekt")]
#[command(about = "Streaming histosketching of k-mer spectra")]
#[command(
    long_about = "Spekt: fixed-size, similarity-preserving sketches of streaming sequence data.

Sequence reads are decomposed to canonical minimizers, binned into a k-mer
frequency spectrum, and folded into a histosketch that preserves weighted
Jaccard similarity between samples. Two samples can then be compared in
constant time from their sketches alone, regardless of how much data was
streamed to produce them.

WORKFLOW:
  1. Sketch each sample:  spekt sketch -f reads.fq.gz -o sampleA
  2. Compare sketches:    spekt smash -d sketches/ -o comparison
                          spekt distance -1 sampleA.sketch -2 sampleB.sketch

INPUT FORMATS:
  FASTQ by default; FASTA with --fasta. Gzip-compressed files (.gz) are
  detected by extension and decompressed on the fly. With no -f files,
  records are read from stdin."
)]
#[command(after_help = "EXAMPLES:
  # Sketch a metagenome, flushing a snapshot every 100000 reads
  spekt sketch -f reads.fq.gz -o gut -i 100000

  # Sketch with concept drift so recent reads dominate
  spekt sketch -f reads.fq.gz -o gut-drift -x 0.2

  # Pairwise weighted Jaccard matrix over a directory of sketches
  spekt smash -d sketches/ -o all-vs-all -m weightedjaccard

  # Distance between two samples
  spekt distance -1 gut.sketch -2 soil.sketch -m jaccard")]
pub struct Cli {
    /// Enable verbose progress output with timestamps
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create histosketches from a stream of reads
    Sketch {
        /// FASTQ/FASTA file(s) to sketch (reads stdin when omitted).
        /// Can be given multiple times: -f a.fq -f b.fq
        #[arg(short = 'f', long = "fastx")]
        fastx: Vec<PathBuf>,

        /// Output basename; the final sketch lands at <output>.sketch
        #[arg(short, long, default_value = "spekt-sketch")]
        output: String,

        /// K-mer size (1-31)
        #[arg(short = 'k', long, default_value_t = 21)]
        kmer_size: usize,

        /// Minimizer window size in k-mers (1-256)
        #[arg(short = 'w', long, default_value_t = 9)]
        window: usize,

        /// Sketch length: the number of slots kept per sketch
        #[arg(short = 's', long, default_value_t = 50)]
        sketch_size: usize,

        /// Number of k-mer spectrum bins (use a power of 4 to mirror the
        /// full spectrum of small k)
        #[arg(short = 'S', long, default_value_t = 16384)]
        spectrum_bins: i32,

        /// Decay ratio for concept drift; 1.0 disables drift
        #[arg(short = 'x', long, default_value_t = 1.0)]
        decay_ratio: f64,

        /// Flush interval in records; 0 disables interval flushing
        #[arg(short = 'i', long, default_value_t = 0)]
        interval: u64,

        /// Number of minimizer workers (defaults to the available cores)
        #[arg(short = 'p', long)]
        processors: Option<usize>,

        /// Input is FASTA (entries of any length) rather than FASTQ
        #[arg(long)]
        fasta: bool,

        /// Print the slot array to stdout at every flush
        #[arg(long)]
        stream: bool,

        /// Also produce a K-hash-functions MinHash sketch (<output>.khf.sketch)
        #[arg(long)]
        khf: bool,

        /// Also produce a bottom-k MinHash sketch (<output>.kmv.sketch)
        #[arg(long)]
        kmv: bool,

        /// Optional label stored in the sketch envelope
        #[arg(short = 'b', long)]
        banner: Option<String>,
    },

    /// Smash a pile of sketches together into a pairwise similarity matrix
    Smash {
        /// Directory containing .sketch files to compare
        #[arg(short = 'd', long, default_value = "./")]
        sketch_dir: PathBuf,

        /// Recursively search the sketch directory
        #[arg(long)]
        recursive: bool,

        /// Explicit sketch files (overrides the directory scan)
        #[arg(short = 'f', long = "sketch")]
        sketches: Vec<PathBuf>,

        /// Output basename for the matrix CSV
        #[arg(short, long, default_value = "spekt-smash")]
        output: String,

        /// Comparison metric (jaccard/weightedjaccard/braycurtis/canberra/euclidean)
        #[arg(short, long, default_value = "jaccard")]
        metric: String,

        /// Also write an unpivoted, labelled slot matrix
        #[arg(long)]
        labelled: bool,

        /// Class label attached to every row of the labelled matrix
        #[arg(short = 'l', long, default_value = "0")]
        label: String,
    },

    /// Distance between exactly two sketches
    Distance {
        /// The first sketch
        #[arg(short = '1', long)]
        sketch1: PathBuf,

        /// The second sketch
        #[arg(short = '2', long)]
        sketch2: PathBuf,

        /// Distance metric (jaccard/weightedjaccard/braycurtis/canberra/euclidean)
        #[arg(short, long, default_value = "jaccard")]
        metric: String,
    },

    /// Print a sketch's slot array as CSV
    Print {
        /// The sketch to print
        #[arg(short = 'f', long)]
        sketch_file: PathBuf,
    },
}
