//! The print subcommand: emit a sketch's slot array as CSV.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::sketch::SketchEnvelope;

pub fn run(sketch_file: PathBuf) -> Result<()> {
    let envelope = SketchEnvelope::load(&sketch_file)
        .with_context(|| format!("loading sketch '{}'", sketch_file.display()))?;
    let cells: Vec<String> = envelope.mins.iter().map(|m| m.to_string()).collect();
    println!("{}", cells.join(","));
    Ok(())
}
