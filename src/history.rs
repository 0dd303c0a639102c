//! Delay / attribute history: a sliding 5-generation histogram per
//! category domain that biases future mutation sampling toward time
//! delays and attributes seen in good rules.

use crate::rng::Rng;

/// Number of generation buckets kept in the ring.
const HIST: usize = 5;

/// A weighted category ring over a bounded integer domain (delays
/// `[0, D_max]` or attributes `[0, K)`).
#[derive(Debug, Clone)]
pub struct CategoryHistory {
    domain: usize,
    /// `buckets[g][category]`, oldest first.
    buckets: Vec<Vec<u64>>,
}

impl CategoryHistory {
    #[must_use]
    pub fn new(domain: usize) -> CategoryHistory {
        CategoryHistory {
            domain,
            buckets: vec![vec![0u64; domain]; HIST],
        }
    }

    /// `reward(category, weight)`: add `weight` to the current (newest)
    /// bucket.
    pub fn reward(&mut self, category: usize, weight: u64) {
        let newest = self.buckets.last_mut().expect("HIST > 0");
        newest[category] += weight;
    }

    /// Rotate the ring at a generation boundary. Every 5th generation the
    /// fresh bucket starts at `2` instead of `1`, to keep the tail alive.
    pub fn advance(&mut self, generation: u64) {
        self.buckets.remove(0);
        let seed = if generation % 5 == 0 { 2 } else { 1 };
        self.buckets.push(vec![seed; self.domain]);
    }

    /// Tracking sum per category, summed across all live buckets.
    #[must_use]
    pub fn tracking_sums(&self) -> Vec<u64> {
        let mut sums = vec![0u64; self.domain];
        for bucket in &self.buckets {
            for (s, v) in sums.iter_mut().zip(bucket.iter()) {
                *s += v;
            }
        }
        sums
    }

    /// Sample a category with probability proportional to its tracking
    /// sum; uniform if the sum is 0.
    pub fn pick_weighted(&self, rng: &mut Rng) -> usize {
        let sums = self.tracking_sums();
        rng.weighted_index(&sums)
            .unwrap_or_else(|| rng.uniform_below(self.domain))
    }

    #[must_use]
    pub fn domain(&self) -> usize {
        self.domain
    }
}

/// The two adaptive histories maintained across a trial: delay and
/// attribute.
#[derive(Debug, Clone)]
pub struct AdaptiveHistories {
    pub delay: CategoryHistory,
    pub attribute: CategoryHistory,
}

impl AdaptiveHistories {
    #[must_use]
    pub fn new(max_delay: u32, attributes: usize) -> AdaptiveHistories {
        AdaptiveHistories {
            delay: CategoryHistory::new(max_delay as usize + 1),
            attribute: CategoryHistory::new(attributes),
        }
    }

    pub fn advance(&mut self, generation: u64) {
        self.delay.advance(generation);
        self.attribute.advance(generation);
    }
}
