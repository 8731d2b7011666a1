// This file has code from https://github.com/LIHPC-Computational-Geometry/coupe

use num_traits::ToPrimitive;

/// Number of vertices assigned to each part.
///
/// Entries of `partition` outside `0..num_parts` are ignored rather than
/// counted, matching how loads are accounted elsewhere in the crate.
pub fn part_sizes(partition: &[usize], num_parts: usize) -> Vec<usize> {
    let mut sizes = vec![0; num_parts];
    for &part in partition {
        if part < num_parts {
            sizes[part] += 1;
        }
    }
    sizes
}

/// Vertex ids grouped by their assigned part, in ascending id order.
pub fn part_members(partition: &[usize], num_parts: usize) -> Vec<Vec<usize>> {
    let mut members = vec![Vec::new(); num_parts];
    for (vertex, &part) in partition.iter().enumerate() {
        if part < num_parts {
            members[part].push(vertex);
        }
    }
    members
}

/// Allowed part-size range for splitting `num_vertices` vertices into
/// `num_parts` parts with `margin` percent of slack.
///
/// The ideal size is the real-valued `num_vertices / num_parts`; the range
/// is `floor(ideal)` to `ceil(ideal * (1 + margin / 100))`. With zero parts
/// there is nothing to bound and the range is `(0, 0)`. Only the upper
/// bound is enforced by default, see
/// [`KernighanLin`](crate::algorithms::KernighanLin).
pub fn size_bounds(num_vertices: usize, num_parts: usize, margin: f64) -> (usize, usize) {
    if num_parts == 0 {
        return (0, 0);
    }
    let ideal = num_vertices.to_f64().unwrap_or(0.0) / num_parts.to_f64().unwrap_or(1.0);
    let min_allowed = ideal.floor() as usize;
    let max_allowed = (ideal * (1.0 + margin / 100.0)).ceil() as usize;
    (min_allowed, max_allowed)
}

/// Largest relative deviation of any part size above the ideal size.
///
/// Zero means no part exceeds the ideal; 0.2 means the heaviest part is
/// 20% over it.
pub fn imbalance(num_parts: usize, partition: &[usize]) -> f64 {
    if num_parts == 0 {
        return 0.0;
    }
    let ideal = partition.len().to_f64().unwrap_or(0.0) / num_parts.to_f64().unwrap_or(1.0);
    if ideal == 0.0 {
        return 0.0;
    }
    part_sizes(partition, num_parts)
        .into_iter()
        .map(|size| (size.to_f64().unwrap_or(0.0) - ideal) / ideal)
        .fold(0.0, f64::max)
}
