use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geom::Point;

/// Which stage of a computation an error came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operand {
    /// The first polygon, noded against itself.
    A,
    /// The second polygon, noded against itself.
    B,
    /// The two polygons, noded against each other.
    Combined,
}

/// The things that can go wrong during a boolean operation.
#[derive(Debug, Error)]
pub enum Error {
    /// At least one of the inputs was infinite or not a number.
    #[error("non-finite coordinate ({x}, {y}) in operand {operand:?}")]
    NonFinite {
        /// The polygon containing the bad point.
        operand: Operand,
        /// The point's horizontal coordinate.
        x: f64,
        /// The point's vertical coordinate.
        y: f64,
    },

    /// The sweep reached the end of a segment that it never started.
    ///
    /// This happens when a segment collapses to a point or ends up pointing
    /// backwards, so that its end sorts before its start. It usually means that
    /// epsilon is mismatched with the scale of the input.
    #[error("zero-length segment at {at:?} while noding {operand:?} (epsilon {eps})")]
    ZeroLengthSegment {
        /// The stage that hit the degenerate segment.
        operand: Operand,
        /// The location of the segment.
        at: Point,
        /// The tolerance in effect.
        eps: f64,
    },

    /// The sweep processed more events than its configured limit.
    #[error("noding {operand:?} did not settle within {limit} events")]
    IterationLimit {
        /// The stage that ran out of iterations.
        operand: Operand,
        /// The configured limit.
        limit: usize,
    },

    /// The selected segments couldn't be joined up into closed rings.
    #[error("unclosed chain at {at:?}, with {remaining} segments left unmatched")]
    OpenChain {
        /// The point at which the chain got stuck.
        at: Point,
        /// The number of selected segments not belonging to any closed ring.
        remaining: usize,
    },

    /// GeoJSON has no way to describe the complement of a shape.
    #[error("inverted polygons cannot be converted to GeoJSON")]
    InvertedExport,

    /// The GeoJSON input couldn't be parsed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
