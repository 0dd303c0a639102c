//! Global rule pool: merges each trial's rule pool into a cross-trial
//! deduplicated collection, capped at `Nrulemax x Ntry`.

use rustc_hash::FxHashSet;

use crate::error::MiningError;
use crate::extractor::TrialPool;
use crate::logging::Logger;
use crate::rule::Rule;

/// Cross-trial rule collection, deduplicated on the full
/// `(attribute, delay)` literal sequence — a stricter key than the
/// per-trial attribute-only one.
#[derive(Debug, Default)]
pub struct GlobalPool {
    rules: Vec<Rule>,
    seen_literal_keys: FxHashSet<Vec<(u32, u32)>>,
    capacity: usize,
}

impl GlobalPool {
    #[must_use]
    pub fn new(capacity: usize) -> GlobalPool {
        GlobalPool {
            rules: Vec::new(),
            seen_literal_keys: FxHashSet::default(),
            capacity,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Moves every rule out of a finished trial's pool into the global
    /// one, skipping literal-key duplicates. Stops (without error) once
    /// capacity is reached, logging a warning through `logger` — pool
    /// exhaustion is non-fatal.
    pub fn merge_trial(&mut self, trial_pool: TrialPool, logger: &mut impl Logger) {
        for rule in trial_pool.rules {
            if self.rules.len() >= self.capacity {
                logger.log(&format!(
                    "global rule pool exhausted at {} rules; dropping remaining trial rules",
                    self.capacity
                ));
                return;
            }
            let key = rule.literal_key();
            if self.seen_literal_keys.insert(key) {
                self.rules.push(rule);
            }
        }
    }

    /// # Errors
    /// Returns [`MiningError::PoolExhausted`] if the pool is already at
    /// capacity; used by callers that want a hard signal instead of the
    /// logged-and-continue behaviour of [`GlobalPool::merge_trial`].
    pub fn ensure_capacity(&self) -> Result<(), MiningError> {
        if self.rules.len() >= self.capacity {
            Err(MiningError::PoolExhausted(self.rules.len()))
        } else {
            Ok(())
        }
    }
}
