//! An optional record of the decisions made during a boolean operation.
//!
//! This is purely diagnostic: nothing in the algorithm ever reads it back, and
//! the default sink ([`NoLog`]) throws everything away.

use serde::{Deserialize, Serialize};

use crate::{error::Operand, geom::Point, segments::Fill, BooleanOp};

/// The pipeline stages, as announced in the build log.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    /// Noding one operand (or both, for [`Operand::Combined`]).
    Noding(Operand),
    /// Choosing the segments on the boundary of the result.
    Select(BooleanOp),
    /// Joining selected segments into rings.
    Chain,
}

/// A single decision.
///
/// Segment ids are only unique within a single noding stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum LogEntry {
    /// A new stage begins; following entries belong to it.
    Stage(Stage),
    /// A segment was added to the sweep.
    NewSegment {
        /// The segment id.
        id: usize,
        /// The segment's first endpoint.
        start: Point,
        /// The segment's last endpoint.
        end: Point,
        /// Does the segment belong to the first polygon of this stage?
        primary: bool,
    },
    /// A segment was split in two; the remainder gets a fresh id.
    Divide {
        /// The segment that was shortened.
        id: usize,
        /// The split point, which is now the segment's end.
        at: Point,
        /// The id of the segment running from `at` to the old end.
        remainder: usize,
    },
    /// Two coincident segments were merged into one.
    Merge {
        /// The segment that survives.
        kept: usize,
        /// The segment that was folded into `kept`.
        dropped: usize,
    },
    /// A split point didn't sort strictly inside the segment, even after
    /// snapping to the nearer endpoint. The split was skipped.
    Unresolved {
        /// The segment that would have been split.
        id: usize,
        /// The would-be split point.
        at: Point,
    },
    /// A ring was too small to enclose anything and was dropped.
    DroppedRegion {
        /// Which polygon the ring belonged to.
        operand: Operand,
        /// The index of the ring within its polygon.
        index: usize,
    },
    /// The sweep finished a segment and fixed its fill.
    Fill {
        /// The segment id.
        id: usize,
        /// The segment's fill for its own polygon.
        fill: Fill,
        /// The segment's fill for the other polygon, if this was a combined sweep.
        other_fill: Option<Fill>,
    },
    /// A segment was chosen as part of the result boundary.
    Selected {
        /// The segment's first endpoint.
        start: Point,
        /// The segment's last endpoint.
        end: Point,
        /// The result's fill on either side of the segment.
        fill: Fill,
    },
    /// A ring was closed.
    ChainClosed {
        /// The ring's vertices, after simplification.
        points: Vec<Point>,
    },
}

/// A consumer of [`LogEntry`]s.
pub trait BuildLog {
    /// Records a single entry. Entries arrive in the order the decisions were made.
    fn record(&mut self, entry: LogEntry);
}

/// A build log that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoLog;

impl BuildLog for NoLog {
    fn record(&mut self, _entry: LogEntry) {}
}

impl BuildLog for Vec<LogEntry> {
    fn record(&mut self, entry: LogEntry) {
        self.push(entry);
    }
}

impl<L: BuildLog + ?Sized> BuildLog for &mut L {
    fn record(&mut self, entry: LogEntry) {
        (**self).record(entry);
    }
}
