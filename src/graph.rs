// This file has code from https://github.com/LIHPC-Computational-Geometry/coupe

use rayon::iter::IndexedParallelIterator;
use rayon::iter::IntoParallelRefIterator;
use rayon::iter::ParallelIterator as _;
use std::fmt;

/// Errors reported when assembling a [`Graph`] from raw CSR arrays.
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub enum StructureError {
    /// `offsets` must hold exactly `vertex_count + 1` entries.
    OffsetsLen { expected: usize, actual: usize },

    /// The first offset must be zero.
    NonZeroStart { actual: usize },

    /// Offsets must be non-decreasing.
    DecreasingOffsets { vertex: usize },

    /// The last offset must equal the neighbor list length.
    TrailingOffset { expected: usize, actual: usize },

    /// A neighbor id does not name a vertex of the graph.
    NeighborOutOfRange { vertex: usize, neighbor: usize },
}

impl fmt::Display for StructureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureError::OffsetsLen { expected, actual } => write!(
                f,
                "offsets length must be the vertex count plus one (expected {expected}, got {actual})",
            ),
            StructureError::NonZeroStart { actual } => {
                write!(f, "offsets must start at 0 (got {actual})")
            }
            StructureError::DecreasingOffsets { vertex } => {
                write!(f, "offsets decrease at vertex {vertex}")
            }
            StructureError::TrailingOffset { expected, actual } => write!(
                f,
                "last offset must equal the neighbor list length (expected {expected}, got {actual})",
            ),
            StructureError::NeighborOutOfRange { vertex, neighbor } => {
                write!(f, "vertex {vertex} lists nonexistent neighbor {neighbor}")
            }
        }
    }
}

impl std::error::Error for StructureError {}

/// An undirected graph in compressed sparse row form.
///
/// `neighbors` is the concatenation of every vertex's adjacency list, and
/// `offsets[v]..offsets[v + 1]` delimits the slice belonging to vertex `v`.
/// The adjacency relation must be symmetric and free of self loops; that is
/// the loader's contract, the engine does not re-check it. A graph is never
/// mutated after construction.
#[derive(Debug)]
pub struct Graph {
    neighbors: Vec<usize>,
    offsets: Vec<usize>,
}

impl Graph {
    /// Build a graph from raw CSR arrays, validating their structure.
    pub fn from_parts(
        vertex_count: usize,
        neighbors: Vec<usize>,
        offsets: Vec<usize>,
    ) -> Result<Self, StructureError> {
        if offsets.len() != vertex_count + 1 {
            return Err(StructureError::OffsetsLen {
                expected: vertex_count + 1,
                actual: offsets.len(),
            });
        }
        if offsets[0] != 0 {
            return Err(StructureError::NonZeroStart { actual: offsets[0] });
        }
        for vertex in 0..vertex_count {
            if offsets[vertex + 1] < offsets[vertex] {
                return Err(StructureError::DecreasingOffsets { vertex });
            }
        }
        if offsets[vertex_count] != neighbors.len() {
            return Err(StructureError::TrailingOffset {
                expected: neighbors.len(),
                actual: offsets[vertex_count],
            });
        }
        for vertex in 0..vertex_count {
            for &neighbor in &neighbors[offsets[vertex]..offsets[vertex + 1]] {
                if neighbor >= vertex_count {
                    return Err(StructureError::NeighborOutOfRange { vertex, neighbor });
                }
            }
        }
        Ok(Self { neighbors, offsets })
    }

    /// Build a graph from an undirected edge list.
    ///
    /// Every `(u, v)` entry becomes both `u -> v` and `v -> u`, and the
    /// adjacency lists come out sorted. Intended for generators and tests;
    /// panics on an out-of-range endpoint.
    pub fn from_edges(vertex_count: usize, edges: &[(usize, usize)]) -> Self {
        let mut adjacency = vec![Vec::new(); vertex_count];
        for &(u, v) in edges {
            assert!(
                u < vertex_count && v < vertex_count,
                "edge ({u}, {v}) out of range for {vertex_count} vertices",
            );
            adjacency[u].push(v);
            adjacency[v].push(u);
        }
        let mut neighbors = Vec::with_capacity(2 * edges.len());
        let mut offsets = Vec::with_capacity(vertex_count + 1);
        offsets.push(0);
        for list in &mut adjacency {
            list.sort_unstable();
            neighbors.extend_from_slice(list);
            offsets.push(neighbors.len());
        }
        Self { neighbors, offsets }
    }

    /// The number of vertices in the graph.
    pub fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Whether the graph has no vertices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The number of undirected edges (each stored twice in `neighbors`).
    pub fn edge_count(&self) -> usize {
        self.neighbors.len() / 2
    }

    /// The adjacency list of the given vertex.
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        &self.neighbors[self.offsets[vertex]..self.offsets[vertex + 1]]
    }

    /// Whether `u` and `v` are directly connected.
    pub fn connected(&self, u: usize, v: usize) -> bool {
        self.neighbors(u).contains(&v)
    }

    /// The number of cut edges of a partition: edges whose two endpoints
    /// are assigned to different parts. Each undirected edge is stored in
    /// both directions and counted from the lower-id endpoint only.
    ///
    /// # Example
    ///
    /// ```
    /// use klpart::graph::Graph;
    ///
    /// // A path 0 - 1 - 2 split as {0, 1} | {2}.
    /// let graph = Graph::from_edges(3, &[(0, 1), (1, 2)]);
    /// assert_eq!(graph.cut_edges(&[0, 0, 1]), 1);
    /// ```
    pub fn cut_edges(&self, partition: &[usize]) -> usize {
        debug_assert_eq!(self.len(), partition.len());

        self.offsets
            .par_iter()
            .zip(&self.offsets[1..])
            .enumerate()
            .map(|(vertex, (&start, &end))| {
                let vertex_part = partition[vertex];
                self.neighbors[start..end]
                    .iter()
                    .filter(|&&neighbor| vertex < neighbor)
                    .filter(|&&neighbor| vertex_part != partition[neighbor])
                    .count()
            })
            .sum()
    }
}
