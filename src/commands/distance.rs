//! The distance subcommand: compare exactly two sketches.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::sketch::{Metric, SketchEnvelope};

pub fn run(sketch1: PathBuf, sketch2: PathBuf, metric: String) -> Result<()> {
    let metric: Metric = metric.parse()?;
    let a = SketchEnvelope::load(&sketch1)
        .with_context(|| format!("loading sketch '{}'", sketch1.display()))?;
    let b = SketchEnvelope::load(&sketch2)
        .with_context(|| format!("loading sketch '{}'", sketch2.display()))?;
    let distance = a.distance(&b, metric)?;
    println!("{}", distance);
    Ok(())
}
