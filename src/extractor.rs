//! Rule extractor: promotes statistics cells to rules, deduplicates
//! within a trial, rewards the adaptive histories, and scores the
//! owning individual's fitness.

use rustc_hash::FxHashSet;

use crate::config::MiningConfig;
use crate::data::Dataset;
use crate::error::MiningError;
use crate::fitness::{directional_imbalance, score_rule, FitnessAccumulator};
use crate::history::AdaptiveHistories;
use crate::rule::{normalise_chain, Literal, Rule};
use crate::stats::StatsCube;

/// The rule list accumulated over one trial; a rule is appended on its
/// first discovery and never duplicated within the trial.
#[derive(Debug, Default)]
pub struct TrialPool {
    pub rules: Vec<Rule>,
    seen_attribute_keys: FxHashSet<Vec<u32>>,
}

impl TrialPool {
    #[must_use]
    pub fn new() -> TrialPool {
        TrialPool::default()
    }

    #[must_use]
    pub fn contains_attribute_key(&self, key: &[u32]) -> bool {
        self.seen_attribute_keys.contains(key)
    }

    fn insert(&mut self, rule: Rule) {
        self.seen_attribute_keys.insert(rule.attribute_key());
        self.rules.push(rule);
    }
}

fn witnesses_for(dataset: &Dataset, literals: &[Literal], t_start: usize, t_end: usize) -> Vec<usize> {
    (t_start..t_end)
        .filter(|&t| {
            literals.iter().all(|lit| {
                let past = t as i64 - i64::from(lit.delay);
                past >= 0 && dataset.attr(past, lit.attribute as usize).is_one()
            })
        })
        .collect()
}

/// Walks every `(individual, process node)` cell produced by the
/// evaluator in ascending depth, applies the quality filters, registers
/// new rules into `trial_pool`, rewards `histories`, and accumulates
/// fitness.
///
/// # Errors
/// Returns [`MiningError::PoolExhausted`] as soon as the per-trial cap
/// is reached; the caller should stop the current trial, but the work
/// done up to that point (fitness, histories) remains valid.
pub fn extract_generation(
    dataset: &Dataset,
    cube: &StatsCube,
    config: &MiningConfig,
    histories: &mut AdaptiveHistories,
    trial_pool: &mut TrialPool,
    fitness: &mut FitnessAccumulator,
) -> Result<(), MiningError> {
    let (t_start, t_end) = dataset.safe_range(config.max_delay, config.horizon);
    let max_depth = cube.max_depth_inclusive();

    for ind in 0..cube.individuals() {
        for p in 0..cube.processes() {
            let mut chain: Vec<(u32, u32)> = Vec::new();
            let match_at_0 = cube.cell(ind, p, 0).match_count;

            for depth in 1..=max_depth {
                let cell = cube.cell(ind, p, depth);
                if cell.attr_chain == 0 {
                    // Deterministic path never reached this depth, so it
                    // never reaches any deeper one either.
                    break;
                }
                chain.push((cell.attr_chain - 1, cell.delay_chain));

                if depth < config.min_attrs {
                    continue;
                }
                let literals = normalise_chain(&chain);
                if literals.len() < config.min_attrs {
                    continue;
                }

                let support_count = cell.match_count;
                if support_count < config.min_support_count {
                    continue;
                }
                let negative_count = cell.neg(match_at_0);
                let support_rate = cell.support_rate(match_at_0);
                if support_rate < config.min_support_rate {
                    continue;
                }
                let Some(horizon) = cell.horizon_stats() else {
                    continue; // NumericallyDegenerate: silently skipped, never an error.
                };
                if horizon.iter().any(|&(_, sigma)| sigma > config.max_sigma) {
                    continue;
                }
                if config.horizon > 0 && !horizon.iter().any(|&(mean, _)| mean.abs() >= config.min_mean) {
                    continue;
                }
                let concentration = cell.quadrant_concentration();
                if concentration < config.min_concentration {
                    continue;
                }

                let high_support = support_rate >= config.min_support_rate + config.high_support_margin;
                let low_variance = horizon
                    .iter()
                    .map(|&(_, s)| s)
                    .fold(0.0_f64, f64::max)
                    <= config.max_sigma - config.low_variance_margin;

                let mut rule = Rule {
                    literals: literals.clone(),
                    horizon,
                    support_count,
                    negative_count,
                    support_rate,
                    high_support,
                    low_variance,
                    witnesses: Vec::new(),
                };
                let is_new = !trial_pool.contains_attribute_key(&rule.attribute_key());

                let imbalance = directional_imbalance(cell.pos_count, cell.neg_count);
                let contribution = score_rule(&config.fitness, &rule, concentration, imbalance, is_new);
                fitness.add(ind, contribution);

                for lit in &literals {
                    let weight = 1 + u64::from(high_support || low_variance) * 2;
                    histories.delay.reward(lit.delay as usize, weight);
                    histories.attribute.reward(lit.attribute as usize, weight);
                }

                if is_new {
                    if trial_pool.rules.len() >= config.max_rules_per_trial {
                        return Err(MiningError::PoolExhausted(trial_pool.rules.len()));
                    }
                    rule.witnesses = witnesses_for(dataset, &literals, t_start, t_end);
                    trial_pool.insert(rule);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::evaluate_generation;
    use crate::genome::{Individual, JudgementNode, Population, ProcessNode};
    use crate::stats::StatsCube;

    fn population_for(attribute: u32, delay: u32) -> Population {
        Population {
            individuals: vec![Individual {
                process: vec![ProcessNode { successor: 1 }],
                judgement: vec![JudgementNode {
                    attribute,
                    successor: 1,
                    delay,
                }],
            }],
        }
    }

    #[test]
    fn trivial_shape_yields_a_rule_with_full_support() {
        let n = 10;
        let attrs: Vec<Vec<u8>> = (0..n).map(|_| vec![1, 0]).collect();
        let x = vec![0.0; n];
        let ts: Vec<String> = (0..n).map(|t| t.to_string()).collect();
        let dataset = Dataset::new(attrs, x, ts, vec!["a0".into(), "a1".into()]).unwrap();

        let mut config = MiningConfig::default();
        config.max_delay = 0;
        config.horizon = 1;
        config.max_depth = 1;
        config.min_attrs = 1;
        config.min_support_rate = 0.1;
        config.min_mean = 0.0;
        config.min_concentration = 0.0;
        config.min_support_count = 1;

        let population = population_for(0, 0);
        let mut cube = StatsCube::new(1, 1, config.max_depth, config.horizon);
        evaluate_generation(&dataset, &population, &config, &mut cube);

        let mut histories = AdaptiveHistories::new(config.max_delay, dataset.attributes());
        let mut trial_pool = TrialPool::new();
        let mut fitness = FitnessAccumulator::new(1);
        extract_generation(&dataset, &cube, &config, &mut histories, &mut trial_pool, &mut fitness).unwrap();

        assert_eq!(trial_pool.rules.len(), 1);
        let rule = &trial_pool.rules[0];
        assert_eq!(rule.literals, vec![Literal { attribute: 0, delay: 0 }]);
        assert_eq!(rule.support_count, 9);
        assert!((rule.horizon[0].0).abs() < 1e-9);
        assert!((rule.horizon[0].1).abs() < 1e-9);
        assert!(rule.low_variance);
    }

    #[test]
    fn all_zero_attributes_yield_no_rules() {
        let n = 20;
        let attrs: Vec<Vec<u8>> = (0..n).map(|_| vec![0]).collect();
        let x = vec![0.5; n];
        let ts: Vec<String> = (0..n).map(|t| t.to_string()).collect();
        let dataset = Dataset::new(attrs, x, ts, vec!["a".into()]).unwrap();

        let mut config = MiningConfig::default();
        config.max_delay = 0;
        config.horizon = 1;
        config.max_depth = 1;
        config.min_attrs = 1;
        config.min_support_count = 1;
        config.min_support_rate = 0.0;

        let population = population_for(0, 0);
        let mut cube = StatsCube::new(1, 1, config.max_depth, config.horizon);
        evaluate_generation(&dataset, &population, &config, &mut cube);

        let mut histories = AdaptiveHistories::new(config.max_delay, dataset.attributes());
        let mut trial_pool = TrialPool::new();
        let mut fitness = FitnessAccumulator::new(1);
        extract_generation(&dataset, &cube, &config, &mut histories, &mut trial_pool, &mut fitness).unwrap();

        assert!(trial_pool.rules.is_empty());
    }

    #[test]
    fn witness_set_matches_literal_satisfaction() {
        let n = 10;
        let attrs: Vec<Vec<u8>> = (0..n).map(|_| vec![1]).collect();
        let x = vec![0.0; n];
        let ts: Vec<String> = (0..n).map(|t| t.to_string()).collect();
        let dataset = Dataset::new(attrs, x, ts, vec!["a".into()]).unwrap();

        let mut config = MiningConfig::default();
        config.max_delay = 0;
        config.horizon = 1;
        config.max_depth = 1;
        config.min_attrs = 1;
        config.min_support_rate = 0.0;
        config.min_mean = 0.0;
        config.min_concentration = 0.0;
        config.min_support_count = 1;

        let population = population_for(0, 0);
        let mut cube = StatsCube::new(1, 1, config.max_depth, config.horizon);
        evaluate_generation(&dataset, &population, &config, &mut cube);

        let mut histories = AdaptiveHistories::new(config.max_delay, dataset.attributes());
        let mut trial_pool = TrialPool::new();
        let mut fitness = FitnessAccumulator::new(1);
        extract_generation(&dataset, &cube, &config, &mut histories, &mut trial_pool, &mut fitness).unwrap();

        let rule = &trial_pool.rules[0];
        assert_eq!(rule.witnesses.len(), rule.support_count as usize);
        for &t in &rule.witnesses {
            for lit in &rule.literals {
                let past = t as i64 - i64::from(lit.delay);
                assert!(dataset.attr(past, lit.attribute as usize).is_one());
            }
        }
    }

    #[test]
    fn zero_horizon_still_yields_rules_with_empty_horizon_arrays() {
        let n = 10;
        let attrs: Vec<Vec<u8>> = (0..n).map(|_| vec![1]).collect();
        let x = vec![0.0; n];
        let ts: Vec<String> = (0..n).map(|t| t.to_string()).collect();
        let dataset = Dataset::new(attrs, x, ts, vec!["a".into()]).unwrap();

        let mut config = MiningConfig::default();
        config.max_delay = 0;
        config.horizon = 0;
        config.max_depth = 1;
        config.min_attrs = 1;
        config.min_support_rate = 0.0;
        config.min_mean = 0.0;
        config.min_concentration = 0.0;
        config.min_support_count = 1;

        let population = population_for(0, 0);
        let mut cube = StatsCube::new(1, 1, config.max_depth, config.horizon);
        evaluate_generation(&dataset, &population, &config, &mut cube);

        let mut histories = AdaptiveHistories::new(config.max_delay, dataset.attributes());
        let mut trial_pool = TrialPool::new();
        let mut fitness = FitnessAccumulator::new(1);
        extract_generation(&dataset, &cube, &config, &mut histories, &mut trial_pool, &mut fitness).unwrap();

        assert_eq!(trial_pool.rules.len(), 1);
        assert!(trial_pool.rules[0].horizon.is_empty());
    }
}
