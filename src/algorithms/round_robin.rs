use rand::seq::SliceRandom;
use rand::Rng;

use crate::algorithms::Error;
use crate::Partition;

/// Initial assignment that deals vertices to parts round-robin over a
/// uniformly shuffled vertex order.
///
/// Every part receives either `floor(n / part_count)` or
/// `ceil(n / part_count)` vertices, so the result is as even as an
/// assignment can be; which vertices land together is decided entirely by
/// the shuffle.
///
/// # Example
///
/// ```
/// use klpart::algorithms::RandomRoundRobin;
/// use klpart::Partition;
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// let mut part_ids = vec![0; 7];
///
/// RandomRoundRobin {
///     rng: SmallRng::seed_from_u64(42),
///     part_count: 3,
/// }
/// .partition(&mut part_ids, ())
/// .unwrap();
///
/// let mut sizes = [0; 3];
/// for part in part_ids {
///     sizes[part] += 1;
/// }
/// sizes.sort();
/// assert_eq!(sizes, [2, 2, 3]);
/// ```
#[derive(Debug)]
pub struct RandomRoundRobin<R> {
    /// Source of the vertex shuffle; seed it for reproducible assignments.
    pub rng: R,

    /// Number of parts to deal vertices into.
    pub part_count: usize,
}

impl<R: Rng> Partition<()> for RandomRoundRobin<R> {
    type Metadata = ();
    type Error = Error;

    fn partition(&mut self, part_ids: &mut [usize], _: ()) -> Result<Self::Metadata, Self::Error> {
        if self.part_count < 2 || self.part_count > part_ids.len() {
            return Err(Error::InvalidPartCount {
                parts: self.part_count,
                vertices: part_ids.len(),
            });
        }

        let mut order: Vec<usize> = (0..part_ids.len()).collect();
        order.shuffle(&mut self.rng);
        for (position, vertex) in order.into_iter().enumerate() {
            part_ids[vertex] = position % self.part_count;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::balance::part_sizes;
    use itertools::assert_equal;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_round_robin_deals_near_even_sizes() {
        // Arrange
        let mut part_ids = vec![0; 10];

        // Act
        RandomRoundRobin {
            rng: SmallRng::seed_from_u64(1),
            part_count: 3,
        }
        .partition(&mut part_ids, ())
        .unwrap();

        // Assert: 10 vertices over 3 parts always land 4-3-3.
        let mut sizes = part_sizes(&part_ids, 3);
        sizes.sort();
        assert_equal(sizes, [3, 3, 4]);
    }

    #[test]
    fn test_round_robin_covers_every_part() {
        // Arrange
        let mut part_ids = vec![0; 5];

        // Act: as many parts as vertices.
        RandomRoundRobin {
            rng: SmallRng::seed_from_u64(2),
            part_count: 5,
        }
        .partition(&mut part_ids, ())
        .unwrap();

        // Assert: every part holds exactly one vertex.
        assert_equal(part_sizes(&part_ids, 5), [1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_round_robin_is_deterministic_under_seed() {
        // Arrange
        let mut first = vec![0; 32];
        let mut second = vec![0; 32];

        // Act
        RandomRoundRobin {
            rng: SmallRng::seed_from_u64(99),
            part_count: 4,
        }
        .partition(&mut first, ())
        .unwrap();
        RandomRoundRobin {
            rng: SmallRng::seed_from_u64(99),
            part_count: 4,
        }
        .partition(&mut second, ())
        .unwrap();

        // Assert
        assert_eq!(first, second);
    }

    #[test]
    fn test_round_robin_rejects_single_part() {
        let mut part_ids = vec![0; 4];
        let result = RandomRoundRobin {
            rng: SmallRng::seed_from_u64(0),
            part_count: 1,
        }
        .partition(&mut part_ids, ());
        assert!(matches!(
            result,
            Err(Error::InvalidPartCount { parts: 1, vertices: 4 })
        ));
    }

    #[test]
    fn test_round_robin_rejects_more_parts_than_vertices() {
        let mut part_ids = vec![0; 4];
        let result = RandomRoundRobin {
            rng: SmallRng::seed_from_u64(0),
            part_count: 5,
        }
        .partition(&mut part_ids, ());
        assert!(matches!(
            result,
            Err(Error::InvalidPartCount { parts: 5, vertices: 4 })
        ));
    }
}
