// This file has code from https://github.com/LIHPC-Computational-Geometry/coupe
//
// # Reference
//
// Kernighan, B. W., Lin, S., 1970. An efficient heuristic procedure for
// partitioning graphs. The Bell System Technical Journal.

use rayon::prelude::*;

use crate::graph::Graph;

/// One vertex exchange performed during a refinement call.
#[derive(Clone, Copy, Debug)]
pub struct SwapRecord {
    /// The vertex that moved out of the first part of the pair.
    pub vertex_a: usize,

    /// The vertex that moved out of the second part of the pair.
    pub vertex_b: usize,

    /// Combined gain of the exchange at the time it was chosen.
    pub gain: i64,

    /// Global cut-edge count right after the exchange.
    pub cut_edges: usize,
}

/// What a [`refine_pair`] call did to the assignment.
#[derive(Debug)]
pub(crate) struct PairOutcome {
    /// Every exchange explored by the call, in order.
    pub swaps: Vec<SwapRecord>,

    /// How many leading entries of `swaps` were kept in the assignment.
    pub committed: usize,

    /// Cut-edge count after the call.
    pub cut_edges: usize,
}

/// Run one Kernighan-Lin refinement round-trip between parts `part_a` and
/// `part_b` of `partition`, committing the best improving exchange prefix.
///
/// Up to `min(|A|, |B|)` exchanges are explored. Each round recomputes
/// every gain from scratch against the working assignment, picks the
/// unlocked cross-pair exchange with the highest combined gain (negative
/// gains included, so the search can climb out of local minima) and locks
/// both vertices. Afterwards the shortest prefix of the exchange sequence
/// that reaches the lowest cut is folded back into `partition`, and only
/// if that cut beats the cut the call started from.
pub(crate) fn refine_pair(
    graph: &Graph,
    partition: &mut [usize],
    part_a: usize,
    part_b: usize,
) -> PairOutcome {
    debug_assert_eq!(graph.len(), partition.len());
    debug_assert_ne!(part_a, part_b);

    let members_a: Vec<usize> = (0..partition.len())
        .filter(|&vertex| partition[vertex] == part_a)
        .collect();
    let members_b: Vec<usize> = (0..partition.len())
        .filter(|&vertex| partition[vertex] == part_b)
        .collect();
    let rounds = members_a.len().min(members_b.len());

    let cut_before = graph.cut_edges(partition);
    let mut outcome = PairOutcome {
        swaps: Vec::with_capacity(rounds),
        committed: 0,
        cut_edges: cut_before,
    };
    if rounds == 0 {
        return outcome;
    }

    let mut work = partition.to_vec();
    let mut locked = vec![false; partition.len()];
    let mut running_cut = cut_before as i64;

    for _ in 0..rounds {
        let gains = compute_gains(graph, &work, part_a, part_b, &locked);
        let (vertex_a, vertex_b, gain) =
            match best_swap(graph, &members_a, &members_b, &locked, &gains) {
                Some(swap) => swap,
                None => break,
            };

        work[vertex_a] = part_b;
        work[vertex_b] = part_a;
        locked[vertex_a] = true;
        locked[vertex_b] = true;
        running_cut -= gain;
        debug_assert_eq!(running_cut as usize, graph.cut_edges(&work));
        outcome.swaps.push(SwapRecord {
            vertex_a,
            vertex_b,
            gain,
            cut_edges: running_cut as usize,
        });
    }

    // Shortest prefix reaching the lowest cut; strict comparison keeps the
    // assignment untouched when no prefix beats the starting cut.
    let mut best_cut = cut_before;
    let mut best_len = 0;
    for (index, swap) in outcome.swaps.iter().enumerate() {
        if swap.cut_edges < best_cut {
            best_cut = swap.cut_edges;
            best_len = index + 1;
        }
    }

    for swap in &outcome.swaps[..best_len] {
        partition[swap.vertex_a] = part_b;
        partition[swap.vertex_b] = part_a;
    }
    outcome.committed = best_len;
    outcome.cut_edges = best_cut;

    log::trace!(
        "pair ({part_a}, {part_b}): explored {} exchanges, committed {}, cut {cut_before} -> {}",
        outcome.swaps.len(),
        outcome.committed,
        outcome.cut_edges,
    );
    outcome
}

/// Classic Kernighan-Lin gains for the designated pair against
/// `assignment`: for a vertex of either part, neighbors in the opposite
/// part of the pair minus neighbors in its own part. Neighbors outside the
/// pair do not count, and locked vertices (or vertices of other parts)
/// score zero since they are never candidates.
fn compute_gains(
    graph: &Graph,
    assignment: &[usize],
    part_a: usize,
    part_b: usize,
    locked: &[bool],
) -> Vec<i64> {
    (0..graph.len())
        .into_par_iter()
        .map(|vertex| {
            let own = assignment[vertex];
            if locked[vertex] || (own != part_a && own != part_b) {
                return 0;
            }
            let other = if own == part_a { part_b } else { part_a };
            let mut gain = 0;
            for &neighbor in graph.neighbors(vertex) {
                if assignment[neighbor] == other {
                    gain += 1;
                } else if assignment[neighbor] == own {
                    gain -= 1;
                }
            }
            gain
        })
        .collect()
}

/// Search every unlocked `(a, b)` cross-pair exchange for the largest
/// combined gain. Two directly connected vertices keep their shared edge
/// in the cut after exchanging, so their combined gain is corrected by -2.
///
/// The parallel reduction follows the same total order as a sequential
/// scan, so the winner does not depend on how rayon splits the search.
fn best_swap(
    graph: &Graph,
    members_a: &[usize],
    members_b: &[usize],
    locked: &[bool],
    gains: &[i64],
) -> Option<(usize, usize, i64)> {
    members_a
        .par_iter()
        .filter(|&&vertex_a| !locked[vertex_a])
        .map(|&vertex_a| {
            let mut best: Option<(usize, usize, i64)> = None;
            for &vertex_b in members_b {
                if locked[vertex_b] {
                    continue;
                }
                let edge_correction = if graph.connected(vertex_a, vertex_b) { 2 } else { 0 };
                let combined = gains[vertex_a] + gains[vertex_b] - edge_correction;
                if best.map_or(true, |(_, _, gain)| combined > gain) {
                    best = Some((vertex_a, vertex_b, combined));
                }
            }
            best
        })
        .reduce(|| None, prefer_swap)
}

/// Total order over candidate exchanges: higher gain wins, ties go to the
/// lower first vertex, then the lower second vertex.
fn prefer_swap(
    left: Option<(usize, usize, i64)>,
    right: Option<(usize, usize, i64)>,
) -> Option<(usize, usize, i64)> {
    match (left, right) {
        (None, candidate) | (candidate, None) => candidate,
        (Some(l), Some(r)) => {
            let left_wins = l.2 > r.2 || (l.2 == r.2 && (l.0, l.1) < (r.0, r.1));
            if left_wins {
                Some(l)
            } else {
                Some(r)
            }
        }
    }
}
