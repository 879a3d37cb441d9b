//! Choosing which noded segments bound the result of a boolean operation.

use crate::{
    log::{BuildLog, LogEntry},
    segments::{Fill, Segment},
    BooleanOp,
};

impl BooleanOp {
    /// Is a point inside the result, given whether it's inside each operand?
    pub fn apply(self, in_a: bool, in_b: bool) -> bool {
        match self {
            BooleanOp::Union => in_a || in_b,
            BooleanOp::Intersection => in_a && in_b,
            BooleanOp::Difference => in_a && !in_b,
            BooleanOp::DifferenceRev => in_b && !in_a,
            BooleanOp::Xor => in_a != in_b,
        }
    }

    /// The result's fill on either side of a combined segment.
    fn fill(self, a: Fill, b: Fill) -> Fill {
        Fill {
            above: self.apply(a.above, b.above),
            below: self.apply(a.below, b.below),
        }
    }
}

/// Keeps the segments across which the result's fill changes.
///
/// The returned segments have their `fill` set to the result's fill, and no
/// `other_fill`.
pub(crate) fn select(segments: &[Segment], op: BooleanOp, log: &mut impl BuildLog) -> Vec<Segment> {
    let ret: Vec<_> = segments
        .iter()
        .filter_map(|seg| {
            // A segment without another fill was never combined with anything,
            // so it's outside the other polygon on both sides.
            let fill = op.fill(seg.fill, seg.other_fill.unwrap_or_default());
            fill.is_boundary().then(|| Segment {
                start: seg.start,
                end: seg.end,
                fill,
                other_fill: None,
            })
        })
        .inspect(|seg| {
            log.record(LogEntry::Selected {
                start: seg.start,
                end: seg.end,
                fill: seg.fill,
            })
        })
        .collect();

    tracing::debug!(?op, candidates = segments.len(), selected = ret.len(), "selection finished");
    ret
}
