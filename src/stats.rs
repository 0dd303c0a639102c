//! Statistics cube: one [`StatsCell`] per `(individual, process_node,
//! depth)`, allocated once at population construction and zero-filled
//! at each generation boundary.

/// Accumulated moments and counters for one `(individual, process node,
/// depth)` triple.
#[derive(Debug, Clone)]
pub struct StatsCell {
    pub match_count: u64,
    pub eval_count: u64,
    /// Attribute id chosen at this depth on the last row that reached
    /// it, 1-based (`0` means "unused slot").
    pub attr_chain: u32,
    pub delay_chain: u32,
    /// Running sum / sum-of-squares of `x(t+h)` for `h in 1..=H`,
    /// restricted to rows that matched this depth.
    pub horizon_sum: Vec<f64>,
    pub horizon_sumsq: Vec<f64>,
    /// Directional split: positive-`x` sum/count and negative-`x`
    /// sum/count, at horizon 1.
    pub pos_sum: f64,
    pub pos_count: u64,
    pub neg_sum: f64,
    pub neg_count: u64,
    /// Four-quadrant counter over `(sign(x(t+1)), sign(x(t+2)))`.
    pub quadrants: [u64; 4],
}

impl StatsCell {
    fn new(horizon: u32) -> StatsCell {
        StatsCell {
            match_count: 0,
            eval_count: 0,
            attr_chain: 0,
            delay_chain: 0,
            horizon_sum: vec![0.0; horizon as usize],
            horizon_sumsq: vec![0.0; horizon as usize],
            pos_sum: 0.0,
            pos_count: 0,
            neg_sum: 0.0,
            neg_count: 0,
            quadrants: [0; 4],
        }
    }

    fn reset(&mut self) {
        self.match_count = 0;
        self.eval_count = 0;
        self.attr_chain = 0;
        self.delay_chain = 0;
        self.horizon_sum.iter_mut().for_each(|v| *v = 0.0);
        self.horizon_sumsq.iter_mut().for_each(|v| *v = 0.0);
        self.pos_sum = 0.0;
        self.pos_count = 0;
        self.neg_sum = 0.0;
        self.neg_count = 0;
        self.quadrants = [0; 4];
    }

    /// `neg[p][d] = match[p][0] - eval[p][d] + match[p][d]`. Requires
    /// the caller to pass `match_at_depth_0`, since a single cell does
    /// not know its own process node's depth-0 count.
    #[must_use]
    pub fn neg(&self, match_at_depth_0: u64) -> u64 {
        (match_at_depth_0 + self.match_count).saturating_sub(self.eval_count)
    }

    #[must_use]
    pub fn support_rate(&self, match_at_depth_0: u64) -> f64 {
        let neg = self.neg(match_at_depth_0);
        if neg == 0 {
            0.0
        } else {
            self.match_count as f64 / neg as f64
        }
    }

    /// A cell with fewer than 2 matches cannot yield a variance
    /// estimate: never propagated as an error, just silently skipped
    /// by the extractor.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.match_count < 2
    }

    /// Unbiased sample mean/σ (clamped at 0 before the square root) for
    /// each horizon, or `None` if the cell is degenerate.
    #[must_use]
    pub fn horizon_stats(&self) -> Option<Vec<(f64, f64)>> {
        if self.is_degenerate() {
            return None;
        }
        let n = self.match_count as f64;
        Some(
            self.horizon_sum
                .iter()
                .zip(&self.horizon_sumsq)
                .map(|(&sum, &sumsq)| {
                    let mean = sum / n;
                    let variance = ((sumsq - n * mean * mean) / (n - 1.0)).max(0.0);
                    (mean, variance.sqrt())
                })
                .collect(),
        )
    }

    #[must_use]
    pub fn quadrant_concentration(&self) -> f64 {
        let total: u64 = self.quadrants.iter().sum();
        if total == 0 {
            return 0.0;
        }
        *self.quadrants.iter().max().unwrap() as f64 / total as f64
    }
}

/// Owns the `individual x process x depth` cube for one population.
/// Allocated once, reset every generation.
#[derive(Debug)]
pub struct StatsCube {
    individuals: usize,
    processes: usize,
    depths: usize,
    horizon: u32,
    cells: Vec<StatsCell>,
}

impl StatsCube {
    #[must_use]
    pub fn new(individuals: usize, processes: usize, max_depth: u32, horizon: u32) -> StatsCube {
        let depths = max_depth as usize + 1;
        let cells = (0..individuals * processes * depths)
            .map(|_| StatsCell::new(horizon))
            .collect();
        StatsCube {
            individuals,
            processes,
            depths,
            horizon,
            cells,
        }
    }

    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
    }

    fn index(&self, ind: usize, process: usize, depth: usize) -> usize {
        debug_assert!(ind < self.individuals);
        debug_assert!(process < self.processes);
        debug_assert!(depth < self.depths);
        (ind * self.processes + process) * self.depths + depth
    }

    #[must_use]
    pub fn cell(&self, ind: usize, process: usize, depth: usize) -> &StatsCell {
        &self.cells[self.index(ind, process, depth)]
    }

    pub fn cell_mut(&mut self, ind: usize, process: usize, depth: usize) -> &mut StatsCell {
        let idx = self.index(ind, process, depth);
        &mut self.cells[idx]
    }

    #[must_use]
    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    #[must_use]
    pub fn max_depth_inclusive(&self) -> usize {
        self.depths - 1
    }

    #[must_use]
    pub fn processes(&self) -> usize {
        self.processes
    }

    #[must_use]
    pub fn individuals(&self) -> usize {
        self.individuals
    }
}
