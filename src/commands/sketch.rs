//! The sketch subcommand: stream reads into sketches.

use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;
use std::thread;

use crate::params::SketchParams;
use crate::pipeline::{self, RunOptions};

#[allow(clippy::too_many_arguments)]
pub fn run(
    fastx: Vec<PathBuf>,
    output: String,
    kmer_size: usize,
    window: usize,
    sketch_size: usize,
    spectrum_bins: i32,
    decay_ratio: f64,
    interval: u64,
    processors: Option<usize>,
    fasta: bool,
    stream: bool,
    khf: bool,
    kmv: bool,
    banner: Option<String>,
) -> Result<()> {
    let workers = processors.unwrap_or_else(|| {
        thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    });
    let params = SketchParams::new(
        kmer_size,
        window,
        sketch_size,
        spectrum_bins,
        decay_ratio,
        interval,
        workers,
    )?;

    if fastx.is_empty() {
        info!("input: stdin");
    } else {
        info!("input files: {}", fastx.len());
    }
    info!("mode: {}", if fasta { "FASTA" } else { "FASTQ" });
    info!("k-mer size: {}", params.k);
    info!("window size: {}", params.w);
    info!("sketch size: {}", params.sketch_size);
    info!("spectrum bins: {}", params.spectrum_bins);
    if params.concept_drift() {
        info!("concept drift: enabled (decay ratio {})", params.decay_ratio);
    } else {
        info!("concept drift: disabled");
    }
    if params.interval > 0 {
        info!("flush interval: {} records", params.interval);
    }
    info!("minimizer workers: {}", params.workers);

    let opts = RunOptions {
        fasta,
        stream,
        khf,
        kmv,
        banner,
    };
    let sample = pipeline::run(&params, &fastx, &output, &opts)
        .with_context(|| format!("sketching '{}' failed", output))?;

    info!(
        "done: {} records, {} minimizers, {} flush(es)",
        sample.report.records,
        sample.report.minimizers,
        sample.report.interval_flushes + 1
    );
    Ok(())
}
