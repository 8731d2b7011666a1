use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::algorithms::pair_refiner::refine_pair;
use crate::algorithms::{Error, RandomRoundRobin, SwapRecord};
use crate::balance::{part_members, part_sizes, size_bounds};
use crate::graph::Graph;
use crate::Partition;

/// What a [`KernighanLin`] run produced, next to the assignment itself.
#[derive(Clone, Debug)]
pub struct PartitionReport {
    /// Number of edges crossing part boundaries in the final assignment.
    pub cut_edges: usize,

    /// Refinement passes executed, including the final non-improving one.
    pub passes: u32,

    /// Vertex ids grouped by part, in ascending id order.
    pub parts: Vec<Vec<usize>>,

    /// Committed exchanges in application order; empty unless
    /// `record_swaps` is set.
    pub swap_log: Vec<SwapRecord>,
}

fn validate_balance(
    sizes: &[usize],
    num_vertices: usize,
    num_parts: usize,
    margin: f64,
    enforce_min_size: bool,
) -> Result<(), Error> {
    let (min_allowed, max_allowed) = size_bounds(num_vertices, num_parts, margin);
    for (part, &size) in sizes.iter().enumerate() {
        if size > max_allowed || (enforce_min_size && size < min_allowed) {
            return Err(Error::BalanceViolation {
                part,
                size,
                min_allowed,
                max_allowed,
            });
        }
    }
    Ok(())
}

fn kernighan_lin(
    partition: &mut [usize],
    graph: &Graph,
    config: &KernighanLin,
) -> Result<PartitionReport, Error> {
    let vertex_count = graph.len();
    if config.part_count < 2 || config.part_count > vertex_count {
        return Err(Error::InvalidPartCount {
            parts: config.part_count,
            vertices: vertex_count,
        });
    }
    if config.margin < 0.0 {
        return Err(Error::NegativeMargin { margin: config.margin });
    }

    let rng = match config.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    RandomRoundRobin {
        rng,
        part_count: config.part_count,
    }
    .partition(partition, ())?;

    let mut swap_log = Vec::new();
    let mut passes = 0;
    for pass in 0..config.max_passes {
        let mut improved = false;
        for part_a in 0..config.part_count {
            for part_b in (part_a + 1)..config.part_count {
                let outcome = refine_pair(graph, partition, part_a, part_b);
                if outcome.committed > 0 {
                    improved = true;
                    if config.record_swaps {
                        swap_log.extend_from_slice(&outcome.swaps[..outcome.committed]);
                    }
                }
            }
        }
        passes = pass + 1;
        log::trace!(
            "pass {pass}: cut edges {}{}",
            graph.cut_edges(partition),
            if improved { "" } else { " (no improvement)" },
        );
        if !improved {
            break;
        }
    }

    let sizes = part_sizes(partition, config.part_count);
    validate_balance(
        &sizes,
        vertex_count,
        config.part_count,
        config.margin,
        config.enforce_min_size,
    )?;

    let cut_edges = graph.cut_edges(partition);
    log::debug!(
        "partitioned {vertex_count} vertices into {} parts in {passes} passes, cut edges {cut_edges}",
        config.part_count,
    );
    Ok(PartitionReport {
        cut_edges,
        passes,
        parts: part_members(partition, config.part_count),
        swap_log,
    })
}

/// Balanced k-way graph partitioning by iterated Kernighan-Lin pairwise
/// refinement.
///
/// The graph is first dealt into `part_count` near-even parts at random,
/// then every pair of parts is refined in turn until a full pass commits
/// no exchange or `max_passes` is reached. Part sizes are checked against
/// the balance margin before the result is handed back.
///
/// # Example
///
/// ```
/// use klpart::algorithms::KernighanLin;
/// use klpart::graph::Graph;
/// use klpart::Partition;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // Two triangles joined by one edge split cleanly in two.
/// let graph = Graph::from_edges(
///     6,
///     &[(0, 1), (1, 2), (0, 2), (3, 4), (4, 5), (3, 5), (2, 3)],
/// );
/// let mut partition = vec![0; graph.len()];
///
/// let report = KernighanLin {
///     part_count: 2,
///     seed: Some(42),
///     ..Default::default()
/// }
/// .partition(&mut partition, &graph)?;
///
/// assert_eq!(report.cut_edges, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct KernighanLin {
    /// Number of parts to split the graph into.
    pub part_count: usize,

    /// Allowed part-size slack above the ideal size, in percent.
    pub margin: f64,

    /// Seed for the initial random assignment; `None` draws from entropy.
    pub seed: Option<u64>,

    /// Upper bound on refinement passes over all part pairs.
    pub max_passes: u32,

    /// Also reject parts smaller than the ideal size rounded down. Off by
    /// default: one-for-one exchanges preserve the near-even initial
    /// sizes, so only the upper bound is load-bearing.
    pub enforce_min_size: bool,

    /// Keep the committed exchanges in the report, for replaying a run
    /// step by step.
    pub record_swaps: bool,
}

impl Default for KernighanLin {
    fn default() -> Self {
        Self {
            part_count: 2,
            margin: 10.0,
            seed: None,
            max_passes: 10,
            enforce_min_size: false,
            record_swaps: false,
        }
    }
}

impl<'a> Partition<&'a Graph> for KernighanLin {
    type Metadata = PartitionReport;
    type Error = Error;

    fn partition(
        &mut self,
        part_ids: &mut [usize],
        adjacency: &'a Graph,
    ) -> Result<Self::Metadata, Self::Error> {
        if part_ids.len() != adjacency.len() {
            return Err(Error::InputLenMismatch {
                expected: part_ids.len(),
                actual: adjacency.len(),
            });
        }
        kernighan_lin(part_ids, adjacency, self)
    }
}
