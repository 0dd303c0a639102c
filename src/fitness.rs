//! Fitness scorer: turns an accepted or duplicate rule into a
//! per-individual fitness contribution, and ranks individuals with a
//! deterministic tie-break.

use std::cmp::Reverse;

use ordered_float::NotNan;

use crate::config::FitnessWeights;
use crate::rule::Rule;

/// Index-seeded tie-break epsilon: individuals are pre-loaded with
/// `idx * -eps` so that sort order is deterministic even when two
/// individuals score identically.
const TIE_BREAK_EPS: f64 = 1e-5;

/// Per-generation running fitness, one scalar per individual.
#[derive(Debug, Clone)]
pub struct FitnessAccumulator {
    scores: Vec<f64>,
}

impl FitnessAccumulator {
    #[must_use]
    pub fn new(population_size: usize) -> FitnessAccumulator {
        FitnessAccumulator {
            scores: (0..population_size).map(|i| -(i as f64) * TIE_BREAK_EPS).collect(),
        }
    }

    pub fn reset(&mut self) {
        for (i, score) in self.scores.iter_mut().enumerate() {
            *score = -(i as f64) * TIE_BREAK_EPS;
        }
    }

    pub fn add(&mut self, individual: usize, amount: f64) {
        self.scores[individual] += amount;
    }

    #[must_use]
    pub fn score(&self, individual: usize) -> f64 {
        self.scores[individual]
    }

    /// Individual indices ranked by descending fitness; ties broken by
    /// the index bias baked into `scores`, so the order is deterministic.
    #[must_use]
    pub fn rank(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.scores.len()).collect();
        order.sort_by_key(|&i| Reverse(NotNan::new(self.scores[i]).expect("fitness is never NaN")));
        order
    }
}

fn step_bonus(steps: &[(f64, f64)], value: f64) -> f64 {
    steps
        .iter()
        .find(|&&(threshold, _)| value >= threshold)
        .map_or(0.0, |&(_, bonus)| bonus)
}

/// Pulls the search toward tight clusters in the prediction space: a
/// step function of the quadrant concentration ratio.
#[must_use]
pub fn concentration_bonus(weights: &FitnessWeights, concentration: f64) -> f64 {
    step_bonus(&weights.concentration_steps, concentration)
}

/// Step function of the strongest absolute horizon mean.
#[must_use]
pub fn significance_bonus(weights: &FitnessWeights, max_abs_mean: f64) -> f64 {
    step_bonus(&weights.significance_steps, max_abs_mean)
}

/// Step function of the directional (positive vs negative `x`) split
/// imbalance.
#[must_use]
pub fn consistency_bonus(weights: &FitnessWeights, directional_imbalance: f64) -> f64 {
    step_bonus(&weights.consistency_steps, directional_imbalance)
}

/// Directional imbalance in `[0, 1]`: 0 when positive/negative horizon-1
/// outcomes are balanced, 1 when they are all one sign.
#[must_use]
pub fn directional_imbalance(pos_count: u64, neg_count: u64) -> f64 {
    let total = pos_count + neg_count;
    if total == 0 {
        0.0
    } else {
        (pos_count as f64 - neg_count as f64).abs() / total as f64
    }
}

/// The full fitness contribution for one accepted/duplicate rule.
/// `is_new` gates the `NEW_RULE_BONUS` term.
#[must_use]
pub fn score_rule(weights: &FitnessWeights, rule: &Rule, concentration: f64, imbalance: f64, is_new: bool) -> f64 {
    let num_attrs = rule.literals.len() as f64;
    let sigma_h1 = rule.horizon.first().map_or(0.0, |&(_, sigma)| sigma);

    let mut score = num_attrs * weights.w_attr
        + rule.support_rate * weights.w_sup
        + weights.w_sigma / (sigma_h1 + weights.sigma_offset)
        + concentration_bonus(weights, concentration)
        + significance_bonus(weights, rule.max_abs_mean())
        + consistency_bonus(weights, imbalance);

    if is_new {
        score += weights.new_rule_bonus;
    }
    score
}
