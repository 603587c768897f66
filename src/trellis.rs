//! Trellis Builder & Viterbi Solver (§4.5): a layered graph, one layer per
//! page, with a distinguished "none" state per layer plus one state per
//! sequence element touching that page. Minimum-cost path selection.

use crate::model::Sequence;

/// A handle into a [`Layer`]'s non-none states: `(sequence_index, item_index)`.
pub type StateSource = (usize, usize);

/// One trellis state (§3 `TrellisState`). `source == None` is the
/// distinguished "none" state, always at index 0 in its layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerState {
    pub source: Option<StateSource>,
}

/// One page's layer: a none state plus every sequence element on that page.
#[derive(Debug, Clone)]
pub struct Layer {
    pub page: usize,
    pub states: Vec<LayerState>,
}

/// Build `num_pages` layers from a set of (already gap-filled) sequences.
pub fn build_layers(num_pages: usize, sequences: &[Sequence]) -> Vec<Layer> {
    let mut layers: Vec<Layer> = (0..num_pages)
        .map(|p| Layer {
            page: p,
            states: vec![LayerState { source: None }],
        })
        .collect();

    for (seq_idx, seq) in sequences.iter().enumerate() {
        for (item_idx, (page, _candidate)) in seq.items.iter().enumerate() {
            if *page < layers.len() {
                layers[*page].states.push(LayerState {
                    source: Some((seq_idx, item_idx)),
                });
            }
        }
    }

    layers
}

/// Edge cost from one state to a state in the immediately-following layer
/// (§4.5). Within-sequence continuations only apply when the next sequence
/// item actually lands on the adjacent page; any other within-sequence gap
/// (possible only for non-extrapolating composite schemes, which are not
/// gap-filled) falls through to the generic none/sentinel rules below, the
/// same way untouched cross-sequence transitions do (§4.5's documented
/// limitation).
fn edge_cost(from: &LayerState, to: &LayerState, sequences: &[Sequence], f_divisor: f64, none_cost: f64, sentinel_cost: f64) -> f64 {
    if to.source.is_none() {
        return none_cost;
    }
    let Some((from_seq, from_item)) = from.source else {
        return none_cost;
    };
    let (to_seq, to_item) = to.source.unwrap();
    if from_seq == to_seq && to_item == from_item + 1 {
        let n = sequences[from_seq].len().max(1);
        return f_divisor / n as f64;
    }
    sentinel_cost
}

/// Per-node emission cost (§4.5: "Emission cost per node is 1").
const EMISSION_COST: f64 = 1.0;

/// Run Viterbi over the layered graph, returning the chosen state source
/// (or `None`) for every page.
pub fn solve(layers: &[Layer], sequences: &[Sequence], f_divisor: f64, none_cost: f64, sentinel_cost: f64) -> Vec<Option<StateSource>> {
    if layers.is_empty() {
        return Vec::new();
    }

    let mut dp: Vec<f64> = vec![EMISSION_COST; layers[0].states.len()];
    let mut backptrs: Vec<Vec<usize>> = vec![Vec::new()];

    for p in 1..layers.len() {
        let prev = &layers[p - 1];
        let cur = &layers[p];
        let mut new_dp = vec![f64::INFINITY; cur.states.len()];
        let mut bp = vec![0usize; cur.states.len()];

        for (to_idx, to_state) in cur.states.iter().enumerate() {
            for (from_idx, from_state) in prev.states.iter().enumerate() {
                let from_cost = dp[from_idx];
                if !from_cost.is_finite() {
                    continue;
                }
                let cost = from_cost + edge_cost(from_state, to_state, sequences, f_divisor, none_cost, sentinel_cost) + EMISSION_COST;
                if cost < new_dp[to_idx] {
                    new_dp[to_idx] = cost;
                    bp[to_idx] = from_idx;
                }
            }
        }

        dp = new_dp;
        backptrs.push(bp);
    }

    let mut best_idx = 0usize;
    let mut best_cost = f64::INFINITY;
    for (i, &cost) in dp.iter().enumerate() {
        if cost < best_cost {
            best_cost = cost;
            best_idx = i;
        }
    }

    let mut path_idx = vec![0usize; layers.len()];
    path_idx[layers.len() - 1] = best_idx;
    for p in (1..layers.len()).rev() {
        path_idx[p - 1] = backptrs[p][path_idx[p]];
    }

    path_idx.iter().enumerate().map(|(p, &idx)| layers[p].states[idx].source).collect()
}
