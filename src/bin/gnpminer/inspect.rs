use std::path::Path;

use anyhow::{Context, Result};
use gnpminer::{Config, MiningConfig};
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct ConfigRow {
    parameter: &'static str,
    value: String,
}

pub fn inspect(config: &Path) -> Result<()> {
    let cfg = MiningConfig::load(config).with_context(|| format!("loading {}", config.display()))?;

    let rows = vec![
        ConfigRow { parameter: "max_delay", value: cfg.max_delay.to_string() },
        ConfigRow { parameter: "horizon", value: cfg.horizon.to_string() },
        ConfigRow { parameter: "max_depth", value: cfg.max_depth.to_string() },
        ConfigRow { parameter: "min_attrs", value: cfg.min_attrs.to_string() },
        ConfigRow { parameter: "min_support_count", value: cfg.min_support_count.to_string() },
        ConfigRow { parameter: "min_support_rate", value: cfg.min_support_rate.to_string() },
        ConfigRow { parameter: "max_sigma", value: cfg.max_sigma.to_string() },
        ConfigRow { parameter: "min_mean", value: cfg.min_mean.to_string() },
        ConfigRow { parameter: "min_concentration", value: cfg.min_concentration.to_string() },
        ConfigRow { parameter: "trials", value: cfg.trials.to_string() },
        ConfigRow { parameter: "generations", value: cfg.generations.to_string() },
        ConfigRow { parameter: "population_size", value: cfg.population_size.to_string() },
        ConfigRow { parameter: "process_nodes", value: cfg.process_nodes.to_string() },
        ConfigRow { parameter: "judgement_nodes", value: cfg.judgement_nodes.to_string() },
        ConfigRow { parameter: "max_rules_per_trial", value: cfg.max_rules_per_trial.to_string() },
        ConfigRow { parameter: "seed", value: cfg.seed.to_string() },
        ConfigRow { parameter: "global_pool_capacity", value: cfg.global_pool_capacity().to_string() },
    ];

    println!("{}", Table::new(rows));
    Ok(())
}
