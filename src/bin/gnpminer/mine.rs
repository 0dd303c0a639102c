use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gnpminer::logging::Logger;
use gnpminer::{Config, Engine, MiningConfig};
use indicatif::{ProgressBar, ProgressStyle};

use crate::loader::load_csv;

pub fn mine(data: &Path, config: Option<&Path>, out: &Path) -> Result<()> {
    let dataset = load_csv(data)?;
    let config = match config {
        Some(path) => MiningConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => MiningConfig::default(),
    };

    fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} trials done, {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut engine = Engine::new(dataset, config);
    let mut logger = gnpminer::logging::PrintLogger::new("gnpminer");
    let pool = engine.run_with_progress(&mut logger, &mut |fraction: f64, rules_found: usize| {
        bar.set_position((fraction * 100.0) as u64);
        bar.set_message(format!("{rules_found} rules"));
    });
    bar.finish_and_clear();

    let summary = gnpminer::summary::tsv_summary(engine.dataset(), pool.rules());
    fs::write(out.join("summary.tsv"), summary).with_context(|| "writing summary.tsv".to_string())?;

    let witness_dir = out.join("witnesses");
    fs::create_dir_all(&witness_dir)?;
    for (i, rule) in pool.rules().iter().enumerate() {
        let mut lines = vec![gnpminer::witness::witness_csv_header(rule)];
        lines.extend(gnpminer::witness::witness_csv_rows(engine.dataset(), rule));
        let path = witness_dir.join(format!("rule_{i}.csv"));
        if let Err(err) = fs::write(&path, lines.join("\n")) {
            logger.log(&format!("failed to emit {}: {err}", path.display()));
        }
    }

    println!("{} rules found, written to {}", pool.len(), out.display());
    Ok(())
}
