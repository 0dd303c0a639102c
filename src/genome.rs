//! Individual & population genomes.
//!
//! Genomes are fixed-length index arrays, not a heap-allocated node
//! graph: cycles are just successor IDs that point back, so no pointer
//! graph is needed. Arena-and-index semantics throughout.

use crate::history::AdaptiveHistories;
use crate::rng::Rng;

/// A judgement node: `(attribute, successor, delay)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JudgementNode {
    pub attribute: u32,
    pub successor: u32,
    pub delay: u32,
}

/// A distinguished start node; holds only a successor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessNode {
    pub successor: u32,
}

/// One GNP genome: `P` process nodes followed conceptually by `J`
/// judgement nodes. Judgement-node ids occupy `[process.len(), process.len() + judgement.len())`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    pub process: Vec<ProcessNode>,
    pub judgement: Vec<JudgementNode>,
}

impl Individual {
    #[must_use]
    pub fn process_count(&self) -> usize {
        self.process.len()
    }

    #[must_use]
    pub fn judgement_count(&self) -> usize {
        self.judgement.len()
    }

    /// First valid judgement-node id.
    #[must_use]
    pub fn judgement_base(&self) -> u32 {
        self.process.len() as u32
    }

    #[must_use]
    pub fn is_judgement_node(&self, node: u32) -> bool {
        let base = self.judgement_base();
        node >= base && (node as usize) < base as usize + self.judgement.len()
    }

    fn judgement_mut(&mut self, node: u32) -> &mut JudgementNode {
        let base = self.judgement_base();
        &mut self.judgement[(node - base) as usize]
    }

    #[must_use]
    pub fn judgement_at(&self, node: u32) -> &JudgementNode {
        let base = self.judgement_base();
        &self.judgement[(node - base) as usize]
    }

    fn random_successor(rng: &mut Rng, base: u32, count: usize) -> u32 {
        base + rng.uniform_below(count) as u32
    }

    fn random(rng: &mut Rng, process_nodes: u32, judgement_nodes: u32, attributes: usize, max_delay: u32) -> Individual {
        let base = process_nodes;
        let process = (0..process_nodes)
            .map(|_| ProcessNode {
                successor: Self::random_successor(rng, base, judgement_nodes as usize),
            })
            .collect();
        let judgement = (0..judgement_nodes)
            .map(|_| JudgementNode {
                attribute: rng.uniform_below(attributes) as u32,
                successor: Self::random_successor(rng, base, judgement_nodes as usize),
                delay: rng.uniform_below(max_delay as usize + 1) as u32,
            })
            .collect();
        Individual { process, judgement }
    }

    /// Mutation building block used by crossover: swap one judgement
    /// node's full gene between two individuals.
    pub fn swap_judgement(a: &mut Individual, b: &mut Individual, node_index: usize) {
        std::mem::swap(&mut a.judgement[node_index], &mut b.judgement[node_index]);
    }

    pub fn mutate_process_successor(&mut self, rate: u32, rng: &mut Rng) {
        let base = self.judgement_base();
        let count = self.judgement.len();
        for node in &mut self.process {
            if rng.one_in(rate) {
                node.successor = Individual::random_successor(rng, base, count);
            }
        }
    }

    pub fn mutate_judgement_successor(&mut self, rate: u32, rng: &mut Rng) {
        let base = self.judgement_base();
        let count = self.judgement.len();
        for node in &mut self.judgement {
            if rng.one_in(rate) {
                node.successor = Individual::random_successor(rng, base, count);
            }
        }
    }

    /// Delay mutation; draws from the adaptive history when it holds any
    /// weight, otherwise uniformly.
    pub fn mutate_delay(&mut self, rate: u32, history: &AdaptiveHistories, rng: &mut Rng) {
        for node in &mut self.judgement {
            if rng.one_in(rate) {
                node.delay = history.delay.pick_weighted(rng) as u32;
            }
        }
    }

    pub fn mutate_attribute(&mut self, rate: u32, history: &AdaptiveHistories, rng: &mut Rng) {
        for node in &mut self.judgement {
            if rng.one_in(rate) {
                node.attribute = history.attribute.pick_weighted(rng) as u32;
            }
        }
    }
}

/// Population of `M` individuals.
#[derive(Debug, Clone)]
pub struct Population {
    pub individuals: Vec<Individual>,
}

impl Population {
    #[must_use]
    pub fn random(
        size: u32,
        process_nodes: u32,
        judgement_nodes: u32,
        attributes: usize,
        max_delay: u32,
        rng: &mut Rng,
    ) -> Population {
        let individuals = (0..size)
            .map(|_| Individual::random(rng, process_nodes, judgement_nodes, attributes, max_delay))
            .collect();
        Population { individuals }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// `copy(src, dst)`: clone one individual's genome over another's.
    pub fn copy(&mut self, src: usize, dst: usize) {
        if src == dst {
            return;
        }
        let cloned = self.individuals[src].clone();
        self.individuals[dst] = cloned;
    }
}
