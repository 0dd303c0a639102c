//! Mining parameters and the `Config<Json>` load/save seam.

use std::fs::File;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::{de::DeserializeOwned, Serialize};

/// Marker for the JSON persistence strategy.
pub struct Json;

pub trait Config<T>: Sized {
    fn valid_path(path: &Path) -> bool;
    fn save(&self, path: &Path) -> Result<()>;
    fn load(path: &Path) -> Result<Self>;
}

impl<T> Config<Json> for T
where
    T: Serialize + DeserializeOwned,
{
    fn valid_path(path: &Path) -> bool {
        path.extension().is_some_and(|x| x.to_str() == Some("json"))
    }

    fn save(&self, path: &Path) -> Result<()> {
        if !Self::valid_path(path) {
            return Err(anyhow!("tried to write config to non-json file"));
        }
        let mut file = File::create(path)?;
        Ok(serde_json::to_writer_pretty(&mut file, self)?)
    }

    fn load(path: &Path) -> Result<Self> {
        if !Self::valid_path(path) {
            return Err(anyhow!("tried to read config from non-json file"));
        }
        let file = File::open(path)?;
        Ok(serde_json::from_reader(file)?)
    }
}

/// Bonus-step breakpoints for the fitness scorer (C6). Kept as their own
/// record so `MiningConfig::default()` stays readable.
#[derive(Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct FitnessWeights {
    pub w_attr: f64,
    pub w_sup: f64,
    pub w_sigma: f64,
    pub sigma_offset: f64,
    pub new_rule_bonus: f64,
    /// `(threshold, bonus)` pairs, evaluated in order, for quadrant
    /// concentration.
    pub concentration_steps: Vec<(f64, f64)>,
    /// `(threshold, bonus)` pairs for `max_h |mean_h|`.
    pub significance_steps: Vec<(f64, f64)>,
    /// `(threshold, bonus)` pairs for directional-imbalance consistency.
    pub consistency_steps: Vec<(f64, f64)>,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            w_attr: 1.0,
            w_sup: 10.0,
            w_sigma: 1.0,
            sigma_offset: 0.1,
            new_rule_bonus: 5.0,
            concentration_steps: vec![(0.9, 3.0), (0.75, 2.0), (0.6, 1.0)],
            significance_steps: vec![(1.0, 3.0), (0.5, 2.0), (0.2, 1.0)],
            consistency_steps: vec![(0.9, 2.0), (0.7, 1.0)],
        }
    }
}

/// The full parameter record consumed by the engine.
#[derive(Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct MiningConfig {
    /// `D_max`: maximum literal delay.
    pub max_delay: u32,
    /// `H`: future horizon.
    pub horizon: u32,
    /// `MaxDepth`: maximum judgement-node chain length.
    pub max_depth: u32,
    /// `MIN_ATTRS`: minimum distinct attributes for a cell to be
    /// considered.
    pub min_attrs: usize,
    pub min_support_count: u64,
    pub min_support_rate: f64,
    pub max_sigma: f64,
    pub min_mean: f64,
    pub min_concentration: f64,
    /// Delta below `max_sigma` that flags `low_variance`.
    pub low_variance_margin: f64,
    /// Delta above `min_support_rate` that flags `high_support`.
    pub high_support_margin: f64,

    /// `Ntry`: independent trials.
    pub trials: u32,
    /// `Generation`: generations per trial.
    pub generations: u32,
    /// `M`: population size.
    pub population_size: u32,
    /// `P`: process (start) nodes per individual.
    pub process_nodes: u32,
    /// `J`: judgement nodes per individual.
    pub judgement_nodes: u32,

    /// 1-in-r mutation rates.
    pub mutate_process_successor_rate: u32,
    pub mutate_judgement_successor_rate: u32,
    pub mutate_delay_rate: u32,
    pub mutate_attribute_rate: u32,

    /// `Nrulemax`: per-trial cap contributing to the global pool's
    /// `Nrulemax x Ntry` capacity.
    pub max_rules_per_trial: usize,

    pub fitness: FitnessWeights,

    pub seed: u64,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            max_delay: 3,
            horizon: 1,
            max_depth: 7,
            min_attrs: 2,
            min_support_count: 5,
            min_support_rate: 0.02,
            max_sigma: 1.5,
            min_mean: 0.1,
            min_concentration: 0.40,
            low_variance_margin: 1.0,
            high_support_margin: 0.02,
            trials: 10,
            generations: 201,
            population_size: 120,
            process_nodes: 10,
            judgement_nodes: 100,
            mutate_process_successor_rate: 1,
            mutate_judgement_successor_rate: 6,
            mutate_delay_rate: 6,
            mutate_attribute_rate: 6,
            max_rules_per_trial: 500,
            fitness: FitnessWeights::default(),
            seed: 1,
        }
    }
}

impl MiningConfig {
    /// Global pool capacity: `Nrulemax x Ntry`.
    #[must_use]
    pub fn global_pool_capacity(&self) -> usize {
        self.max_rules_per_trial * self.trials as usize
    }
}
