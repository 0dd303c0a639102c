//! Evaluator: walks every individual over every safe row, collecting
//! per-`(individual, start-node, depth)` statistics.

use crate::config::MiningConfig;
use crate::data::Dataset;
use crate::genome::Population;
use crate::stats::StatsCube;

/// Runs one full generation sweep: reset, then walk every `(individual,
/// process node)` pair from every safe-range row.
///
/// The `v = 0` branch increments `eval` before restarting at the process
/// node. Omitting that increment would make `eval ~= match`, which
/// degenerates `neg` to a constant across depths and corrupts every
/// support rate. This implementation always increments it.
pub fn evaluate_generation(dataset: &Dataset, population: &Population, config: &MiningConfig, cube: &mut StatsCube) {
    cube.reset();
    let (t_start, t_end) = dataset.safe_range(config.max_delay, config.horizon);
    let max_depth = config.max_depth;

    for (ind_idx, individual) in population.individuals.iter().enumerate() {
        for (p_idx, process) in individual.process.iter().enumerate() {
            for t in t_start..t_end {
                walk_row(dataset, individual, process.successor, ind_idx, p_idx, t, max_depth, cube);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn walk_row(
    dataset: &Dataset,
    individual: &crate::genome::Individual,
    first_successor: u32,
    ind_idx: usize,
    p_idx: usize,
    t: usize,
    max_depth: u32,
    cube: &mut StatsCube,
) {
    cube.cell_mut(ind_idx, p_idx, 0).match_count += 1;
    cube.cell_mut(ind_idx, p_idx, 0).eval_count += 1;

    let mut cur = first_successor;
    let mut depth = 0u32;
    let mut match_flag = true;

    while individual.is_judgement_node(cur) && depth < max_depth {
        depth += 1;
        let node = individual.judgement_at(cur);
        let a = node.attribute;
        let d = node.delay;

        let cell = cube.cell_mut(ind_idx, p_idx, depth as usize);
        cell.attr_chain = a + 1;
        cell.delay_chain = d;

        let past_t = t as i64 - i64::from(d);
        if past_t < 0 {
            // Return to the process node; stop this walk.
            break;
        }

        match dataset.attr(past_t, a as usize) {
            crate::data::AttrValue::One => {
                cube.cell_mut(ind_idx, p_idx, depth as usize).eval_count += 1;
                if match_flag {
                    record_match(dataset, t, cube.cell_mut(ind_idx, p_idx, depth as usize));
                }
                cur = individual.judgement_at(cur).successor;
            }
            crate::data::AttrValue::Zero => {
                // Critical: eval still increments on the no-branch so
                // `neg` stays meaningful.
                cube.cell_mut(ind_idx, p_idx, depth as usize).eval_count += 1;
                break; // restart at process node; loop condition ends it
            }
            crate::data::AttrValue::Missing => {
                cube.cell_mut(ind_idx, p_idx, depth as usize).eval_count += 1;
                match_flag = false;
                cur = individual.judgement_at(cur).successor;
            }
        }
    }
}

fn record_match(dataset: &Dataset, t: usize, cell: &mut crate::stats::StatsCell) {
    cell.match_count += 1;
    for (h, (sum, sumsq)) in cell
        .horizon_sum
        .iter_mut()
        .zip(cell.horizon_sumsq.iter_mut())
        .enumerate()
    {
        if let Some(x) = dataset.x(t as i64 + 1 + h as i64) {
            *sum += x;
            *sumsq += x * x;
        }
    }

    if let Some(x1) = dataset.x(t as i64 + 1) {
        if x1 >= 0.0 {
            cell.pos_sum += x1;
            cell.pos_count += 1;
        } else {
            cell.neg_sum += x1;
            cell.neg_count += 1;
        }
    }

    if let (Some(x1), Some(x2)) = (dataset.x(t as i64 + 1), dataset.x(t as i64 + 2)) {
        let q = usize::from(x1 >= 0.0) | (usize::from(x2 >= 0.0) << 1);
        cell.quadrants[q] += 1;
    }
}
