//! Hand-rolled CSV ingestion: loading rows into a [`Dataset`] is an
//! external collaborator, not part of the engine's tested contract, so
//! it lives in the binary rather than the library.
//!
//! Expected layout: header row `T,X,Attr0,Attr1,...`; `T` holds the
//! timestamp, `X` the target series, and every remaining column a
//! binary (or missing) attribute.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use gnpminer::Dataset;

pub fn load_csv(path: &Path) -> Result<Dataset> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let mut lines = text.lines();
    let header = lines.next().context("dataset file is empty")?;
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let Some(t_idx) = columns.iter().position(|&c| c == "T") else {
        bail!("missing required `T` column in {}", path.display());
    };
    let Some(x_idx) = columns.iter().position(|&c| c == "X") else {
        bail!("missing required `X` column in {}", path.display());
    };
    let attr_columns: Vec<(usize, String)> = columns
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != t_idx && i != x_idx)
        .map(|(i, name)| (i, (*name).to_string()))
        .collect();

    let mut timestamps = Vec::new();
    let mut x = Vec::new();
    let mut attrs = Vec::new();
    for (row_no, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() != columns.len() {
            bail!(
                "{}: row {row_no} has {} fields, expected {}",
                path.display(),
                fields.len(),
                columns.len()
            );
        }
        timestamps.push(fields[t_idx].to_string());
        x.push(
            fields[x_idx]
                .parse::<f64>()
                .with_context(|| format!("{}: row {row_no} has non-numeric X", path.display()))?,
        );
        attrs.push(
            attr_columns
                .iter()
                .map(|&(i, _)| fields[i].parse::<u8>().unwrap_or(2))
                .collect(),
        );
    }

    let attr_names = attr_columns.into_iter().map(|(_, name)| name).collect();
    Ok(Dataset::new(attrs, x, timestamps, attr_names)?)
}
