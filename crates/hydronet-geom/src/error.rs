// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use thiserror::Error;

/// Rejected geometry input.
///
/// Every variant is fatal to the operation that produced it; callers must fix
/// or drop the offending feature before retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A line string needs at least two vertices.
    #[error("line string needs at least 2 vertices, got {found}")]
    TooFewVertices {
        /// Number of vertices supplied.
        found: usize,
    },
    /// A coordinate was NaN or infinite.
    #[error("non-finite coordinate")]
    NonFinite,
    /// The line at `line` has zero total length.
    #[error("line {line}: zero length line string")]
    ZeroLength {
        /// Index of the offending line in the input batch.
        line: usize,
    },
    /// The line at `line` starts and ends at the same place.
    #[error("line {line}: looped line string (start and end within tolerance)")]
    Looped {
        /// Index of the offending line in the input batch.
        line: usize,
    },
    /// Both ends of the line at `line` merged into one node.
    #[error("line {line}: both ends merge into one node")]
    Collapsed {
        /// Index of the offending line in the input batch.
        line: usize,
    },
    /// Tolerance must be finite and non-negative.
    #[error("invalid tolerance {0}")]
    InvalidTolerance(f64),
    /// Malformed or unsupported WKT text.
    #[error("wkt: {0}")]
    Wkt(String),
}
