//! The smash subcommand: pairwise similarity matrices over many sketches.

use anyhow::{anyhow, Context, Result};
use log::info;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::constants::SKETCH_EXT;
use crate::sketch::{Metric, SketchEnvelope};

#[allow(clippy::too_many_arguments)]
pub fn run(
    sketch_dir: PathBuf,
    recursive: bool,
    sketches: Vec<PathBuf>,
    output: String,
    metric: String,
    labelled: bool,
    label: String,
) -> Result<()> {
    let metric: Metric = metric.parse()?;

    let paths = if sketches.is_empty() {
        collect_sketch_files(&sketch_dir, recursive)?
    } else {
        sketches
    };
    if paths.len() < 2 {
        return Err(anyhow!(
            "need at least 2 sketches to smash (found {})",
            paths.len()
        ));
    }

    // BTreeMap keys give a deterministic row/column ordering
    let mut pile: BTreeMap<String, SketchEnvelope> = BTreeMap::new();
    for path in &paths {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let envelope = SketchEnvelope::load(path)
            .with_context(|| format!("loading sketch '{}'", path.display()))?;
        pile.insert(name, envelope);
    }
    info!("loaded {} sketches", pile.len());

    let ordering: Vec<&String> = pile.keys().collect();

    // pairwise similarity, one row per sketch
    let rows: Result<Vec<Vec<String>>> = ordering
        .par_iter()
        .map(|id| {
            let a = &pile[*id];
            ordering
                .iter()
                .map(|other| {
                    let b = &pile[*other];
                    let similarity = 1.0 - a.distance(b, metric)?;
                    Ok(format!("{:.4}", similarity))
                })
                .collect()
        })
        .collect();
    let rows = rows?;

    let matrix_path = format!("{}.{}-matrix.csv", output, metric);
    let mut writer = BufWriter::new(
        File::create(&matrix_path).with_context(|| format!("creating '{}'", matrix_path))?,
    );
    let header: Vec<String> = ordering.iter().map(|s| s.to_string()).collect();
    writeln!(writer, "{}", header.join(","))?;
    for row in rows {
        writeln!(writer, "{}", row.join(","))?;
    }
    writer.flush()?;
    info!("written similarity matrix: {}", matrix_path);

    if labelled {
        let labelled_path = format!("{}.labelled-matrix.csv", output);
        let mut writer = BufWriter::new(
            File::create(&labelled_path)
                .with_context(|| format!("creating '{}'", labelled_path))?,
        );
        for envelope in pile.values() {
            let mut cells: Vec<String> =
                envelope.mins.iter().map(|m| m.to_string()).collect();
            cells.push(label.clone());
            writeln!(writer, "{}", cells.join(","))?;
        }
        writer.flush()?;
        info!("written labelled matrix: {}", labelled_path);
    }

    Ok(())
}

/// Find every sketch envelope under `dir`.
fn collect_sketch_files(dir: &Path, recursive: bool) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    walk(dir, recursive, &mut found)
        .with_context(|| format!("scanning '{}' for sketches", dir.display()))?;
    found.sort();
    if found.is_empty() {
        return Err(anyhow!(
            "no .{} files found in '{}'",
            SKETCH_EXT,
            dir.display()
        ));
    }
    Ok(found)
}

fn walk(dir: &Path, recursive: bool, found: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            if recursive {
                walk(&path, recursive, found)?;
            }
        } else if path.extension().is_some_and(|ext| ext == SKETCH_EXT) {
            found.push(path);
        }
    }
    Ok(())
}
