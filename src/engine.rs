//! Top-level engine: owns the dataset and master RNG, drives `Ntry`
//! independent trials, each running `Generation` generations of
//! evaluate -> extract -> evolve, and merges every trial's rule pool
//! into the [`GlobalPool`].

use crate::config::MiningConfig;
use crate::data::Dataset;
use crate::evaluator::evaluate_generation;
use crate::evolution::advance_generation;
use crate::extractor::{extract_generation, TrialPool};
use crate::fitness::FitnessAccumulator;
use crate::history::AdaptiveHistories;
use crate::logging::Logger;
use crate::pool::GlobalPool;
use crate::rng::Rng;
use crate::stats::StatsCube;

/// Reports run progress without tying the engine to a particular
/// progress-bar crate.
pub trait ProgressHandler: Send {
    fn update_progress(&mut self, fraction_completed: f64, rules_found: usize);
}

impl<F: FnMut(f64, usize) + Send> ProgressHandler for F {
    fn update_progress(&mut self, fraction_completed: f64, rules_found: usize) {
        self(fraction_completed, rules_found);
    }
}

pub struct Engine {
    dataset: Dataset,
    config: MiningConfig,
    rng: Rng,
}

impl Engine {
    #[must_use]
    pub fn new(dataset: Dataset, config: MiningConfig) -> Engine {
        let rng = Rng::from_seed(config.seed);
        Engine { dataset, config, rng }
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Runs every trial to completion and returns the merged, globally
    /// deduplicated rule pool.
    pub fn run(&mut self, logger: &mut impl Logger) -> GlobalPool {
        self.run_with_progress(logger, &mut |_, _| {})
    }

    /// Same as [`Engine::run`], additionally reporting fractional
    /// progress and the running rule count after every trial.
    pub fn run_with_progress(&mut self, logger: &mut impl Logger, progress: &mut impl ProgressHandler) -> GlobalPool {
        let mut global = GlobalPool::new(self.config.global_pool_capacity());
        let trials = self.config.trials;
        for trial in 0..trials {
            let mut trial_rng = self.rng.create_child();
            let trial_pool = self.run_trial(&mut trial_rng, logger);
            global.merge_trial(trial_pool, logger);
            progress.update_progress(f64::from(trial + 1) / f64::from(trials), global.len());
        }
        global
    }

    /// Runs one independent trial: a fresh random population, its own
    /// adaptive histories, `Generation` rounds of evaluate/extract, and
    /// evolution between rounds. Terminates early (without error) if the
    /// per-trial pool cap is hit.
    fn run_trial(&self, rng: &mut Rng, logger: &mut impl Logger) -> TrialPool {
        let config = &self.config;
        let mut population = crate::genome::Population::random(
            config.population_size,
            config.process_nodes,
            config.judgement_nodes,
            self.dataset.attributes(),
            config.max_delay,
            rng,
        );
        let mut histories = AdaptiveHistories::new(config.max_delay, self.dataset.attributes());
        let mut trial_pool = TrialPool::new();
        let mut cube = StatsCube::new(
            population.len(),
            config.process_nodes as usize,
            config.max_depth,
            config.horizon,
        );

        for generation in 0..config.generations {
            let mut fitness = FitnessAccumulator::new(population.len());
            evaluate_generation(&self.dataset, &population, config, &mut cube);
            let outcome = extract_generation(&self.dataset, &cube, config, &mut histories, &mut trial_pool, &mut fitness);
            if let Err(err) = outcome {
                logger.log(&format!("trial stopped early: {err}"));
                break;
            }
            if generation + 1 < config.generations {
                advance_generation(&mut population, &fitness, &mut histories, config, u64::from(generation), rng);
            }
        }
        trial_pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NothingLogger;

    fn flat_config(overrides: impl FnOnce(&mut MiningConfig)) -> MiningConfig {
        let mut config = MiningConfig {
            max_delay: 1,
            horizon: 1,
            max_depth: 2,
            min_attrs: 1,
            min_support_count: 1,
            min_support_rate: 0.0,
            min_mean: 0.0,
            min_concentration: 0.0,
            trials: 1,
            generations: 2,
            population_size: 6,
            process_nodes: 2,
            judgement_nodes: 6,
            max_rules_per_trial: 50,
            ..MiningConfig::default()
        };
        overrides(&mut config);
        config
    }

    fn toy_dataset(n: usize, attributes: usize) -> Dataset {
        let attrs: Vec<Vec<u8>> = (0..n).map(|t| (0..attributes).map(|k| u8::from((t + k) % 3 == 0)).collect()).collect();
        let x: Vec<f64> = (0..n).map(|t| if t % 2 == 0 { 0.4 } else { -0.1 }).collect();
        let ts: Vec<String> = (0..n).map(|t| t.to_string()).collect();
        let names: Vec<String> = (0..attributes).map(|k| format!("a{k}")).collect();
        Dataset::new(attrs, x, ts, names).unwrap()
    }

    #[test]
    fn trivial_shape_runs_to_completion_without_panicking() {
        let dataset = toy_dataset(50, 3);
        let config = flat_config(|_| {});
        let mut engine = Engine::new(dataset, config);
        let mut logger = NothingLogger::default();
        let pool = engine.run(&mut logger);
        // No correctness claim beyond "the pipeline completes and every
        // surviving rule satisfies the quality gates it passed through".
        for rule in pool.rules() {
            assert!(rule.support_count >= 1);
        }
    }

    #[test]
    fn duplicate_collapse_keeps_global_pool_deduplicated() {
        // Rules sharing a literal sequence across trials/individuals
        // collapse to one entry in the global pool.
        let dataset = toy_dataset(60, 2);
        let config = flat_config(|c| {
            c.trials = 3;
            c.population_size = 9;
            c.judgement_nodes = 9;
        });
        let mut engine = Engine::new(dataset, config);
        let mut logger = NothingLogger::default();
        let pool = engine.run(&mut logger);

        let mut seen = std::collections::HashSet::new();
        for rule in pool.rules() {
            assert!(seen.insert(rule.literal_key()), "global pool must not contain literal-key duplicates");
        }
    }

    #[test]
    fn concentration_filter_rejects_scattered_outcomes() {
        // A judgement match whose future outcome is evenly split across
        // all four quadrants never clears min_concentration, however
        // favourable the other statistics.
        let n = 80;
        let attrs: Vec<Vec<u8>> = (0..n).map(|_| vec![1]).collect();
        // Deterministic 4-cycle over the quadrant signs.
        let x: Vec<f64> = (0..n)
            .map(|t| if t % 4 < 2 { 0.3 } else { -0.3 })
            .collect();
        let ts: Vec<String> = (0..n).map(|t| t.to_string()).collect();
        let dataset = Dataset::new(attrs, x, ts, vec!["a".into()]).unwrap();

        let config = flat_config(|c| {
            c.population_size = 3;
            c.judgement_nodes = 3;
            c.min_concentration = 0.95;
            c.min_support_count = 1;
            c.min_support_rate = 0.0;
        });
        let mut engine = Engine::new(dataset, config);
        let mut logger = NothingLogger::default();
        let pool = engine.run(&mut logger);
        assert!(pool.is_empty());
    }

    #[test]
    fn adaptive_bias_runs_multiple_generations_without_panicking() {
        // Exercises the full evaluate/extract/evolve loop across several
        // generations so history rotation and weighted resampling both
        // execute.
        let dataset = toy_dataset(100, 4);
        let config = flat_config(|c| {
            c.generations = 6;
            c.population_size = 12;
            c.judgement_nodes = 12;
        });
        let mut engine = Engine::new(dataset, config);
        let mut logger = NothingLogger::default();
        let _pool = engine.run(&mut logger);
    }

    #[test]
    fn adaptive_bias_concentrates_on_the_rewarding_delay() {
        // A single attribute that is true every 7th row. Only delay = 2
        // lines a match up with a deterministic x(t+1) = 1.0; every other
        // delay in [0, 4] lands its matches on a near-zero, sign-balanced
        // baseline, so only delay = 2 ever clears `min_mean`. Over enough
        // generations the delay history must come to concentrate on 2.
        let n = 300;
        let attrs: Vec<Vec<u8>> = (0..n).map(|t| vec![u8::from(t % 7 == 2)]).collect();
        let x: Vec<f64> = (0..n)
            .map(|u| if u % 7 == 5 { 1.0 } else if u % 2 == 0 { 0.05 } else { -0.05 })
            .collect();
        let ts: Vec<String> = (0..n).map(|t| t.to_string()).collect();
        let dataset = Dataset::new(attrs, x, ts, vec!["a".into()]).unwrap();

        let config = flat_config(|c| {
            c.max_delay = 4;
            c.horizon = 1;
            c.max_depth = 1;
            c.min_support_count = 3;
            c.min_mean = 0.5;
            c.min_concentration = 0.0;
            c.generations = 20;
            c.population_size = 30;
            c.process_nodes = 1;
            c.judgement_nodes = 5;
            c.max_rules_per_trial = 1000;
        });

        let mut rng = Rng::from_seed(config.seed);
        let mut population =
            crate::genome::Population::random(config.population_size, config.process_nodes, config.judgement_nodes, 1, config.max_delay, &mut rng);
        let mut histories = AdaptiveHistories::new(config.max_delay, 1);
        let mut cube = StatsCube::new(population.len(), config.process_nodes as usize, config.max_depth, config.horizon);
        let mut logger = NothingLogger::default();

        for generation in 0..config.generations {
            let mut trial_pool = TrialPool::new();
            let mut fitness = FitnessAccumulator::new(population.len());
            evaluate_generation(&dataset, &population, &config, &mut cube);
            let outcome = extract_generation(&dataset, &cube, &config, &mut histories, &mut trial_pool, &mut fitness);
            if let Err(err) = outcome {
                logger.log(&format!("trial stopped early: {err}"));
                break;
            }
            if generation + 1 < config.generations {
                advance_generation(&mut population, &fitness, &mut histories, &config, u64::from(generation), &mut rng);
            }
        }

        let sums = histories.delay.tracking_sums();
        let d2 = sums[2];
        for (delay, &sum) in sums.iter().enumerate() {
            if delay != 2 {
                assert!(d2 > sum, "delay=2 tracking sum {d2} should exceed delay={delay}'s {sum}");
            }
        }
    }
}
