use anyhow::Result;
use clap::Parser;

use spekt::commands::{self, Cli, Commands};
use spekt::logging::init_logger;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    match cli.command {
        Commands::Sketch {
            fastx,
            output,
            kmer_size,
            window,
            sketch_size,
            spectrum_bins,
            decay_ratio,
            interval,
            processors,
            fasta,
            stream,
            khf,
            kmv,
            banner,
        } => commands::sketch::run(
            fastx,
            output,
            kmer_size,
            window,
            sketch_size,
            spectrum_bins,
            decay_ratio,
            interval,
            processors,
            fasta,
            stream,
            khf,
            kmv,
            banner,
        ),

        Commands::Smash {
            sketch_dir,
            recursive,
            sketches,
            output,
            metric,
            labelled,
            label,
        } => commands::smash::run(
            sketch_dir, recursive, sketches, output, metric, labelled, label,
        ),

        Commands::Distance {
            sketch1,
            sketch2,
            metric,
        } => commands::distance::run(sketch1, sketch2, metric),

        Commands::Print { sketch_file } => commands::print::run(sketch_file),
    }
}
