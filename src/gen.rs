use rand::seq::SliceRandom;
use rand::Rng;
use rustc_hash::FxHashSet;

use crate::graph::Graph;

/// Generate a connected simple undirected graph: a random spanning tree
/// over a shuffled vertex order plus `extra_edges` distinct extra edges.
///
/// Deterministic for a seeded `rng`. Panics when `vertex_count` is zero or
/// when more extra edges are requested than a simple graph can hold.
pub fn gen_connected_graph<R: Rng>(
    rng: &mut R,
    vertex_count: usize,
    extra_edges: usize,
) -> Graph {
    if vertex_count == 0 {
        panic!("Cannot generate a graph without vertices.");
    }
    let max_extra = vertex_count * (vertex_count - 1) / 2 - (vertex_count - 1);
    if extra_edges > max_extra {
        panic!("A simple graph with {vertex_count} vertices holds at most {max_extra} extra edges.");
    }

    let mut order: Vec<usize> = (0..vertex_count).collect();
    order.shuffle(rng);

    let mut seen = FxHashSet::default();
    let mut edges = Vec::with_capacity(vertex_count - 1 + extra_edges);

    // Attaching each vertex to an earlier one in the shuffled order yields
    // a uniform random attachment tree, which keeps the graph connected.
    for position in 1..order.len() {
        let anchor = order[rng.gen_range(0..position)];
        let vertex = order[position];
        let key = (anchor.min(vertex), anchor.max(vertex));
        seen.insert(key);
        edges.push(key);
    }

    let mut remaining = extra_edges;
    while remaining > 0 {
        let u = rng.gen_range(0..vertex_count);
        let v = rng.gen_range(0..vertex_count);
        if u == v {
            continue;
        }
        let key = (u.min(v), u.max(v));
        if seen.insert(key) {
            edges.push(key);
            remaining -= 1;
        }
    }

    Graph::from_edges(vertex_count, &edges)
}

/// Whether every vertex is reachable from vertex 0. Depth-first search
/// with an explicit stack, so deep graphs do not recurse.
pub fn is_connected(graph: &Graph) -> bool {
    if graph.is_empty() {
        return true;
    }
    let mut visited = vec![false; graph.len()];
    let mut stack = vec![0];
    visited[0] = true;
    let mut reached = 1;
    while let Some(vertex) = stack.pop() {
        for &neighbor in graph.neighbors(vertex) {
            if !visited[neighbor] {
                visited[neighbor] = true;
                reached += 1;
                stack.push(neighbor);
            }
        }
    }
    reached == graph.len()
}
