// This file has code from https://github.com/LIHPC-Computational-Geometry/coupe
use std::fmt;

mod kernighan_lin;
mod pair_refiner;
mod round_robin;

pub use kernighan_lin::KernighanLin;
pub use kernighan_lin::PartitionReport;
pub use pair_refiner::SwapRecord;
pub use round_robin::RandomRoundRobin;

/// Common errors thrown by algorithms.
#[derive(Clone, Copy, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Input sets don't have matching lengths.
    InputLenMismatch { expected: usize, actual: usize },

    /// The requested part count cannot cover the graph: fewer than two
    /// parts, or more parts than vertices.
    InvalidPartCount { parts: usize, vertices: usize },

    /// The balance margin is negative.
    NegativeMargin { margin: f64 },

    /// A part ended up outside the allowed size range.
    BalanceViolation {
        part: usize,
        size: usize,
        min_allowed: usize,
        max_allowed: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InputLenMismatch { expected, actual } => write!(
                f,
                "input sets don't have the same length (expected {expected} items, got {actual})",
            ),
            Error::InvalidPartCount { parts, vertices } => write!(
                f,
                "cannot split {vertices} vertices into {parts} parts (need between 2 and the vertex count)",
            ),
            Error::NegativeMargin { margin } => {
                write!(f, "balance margin must be non-negative (got {margin})")
            }
            Error::BalanceViolation {
                part,
                size,
                min_allowed,
                max_allowed,
            } => write!(
                f,
                "part {part} has {size} vertices, outside the allowed range [{min_allowed}, {max_allowed}]",
            ),
        }
    }
}

impl std::error::Error for Error {}
