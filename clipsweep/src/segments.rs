use serde::{Deserialize, Serialize};

use crate::{epsilon::Epsilon, geom::cyclic_pairs, geom::Point};

/// An index into a segment arena.
///
/// Throughout the sweep, we assign identities to segments, so that we may
/// consider segments as different even if they have the same start- and end-points.
/// (Of course, this index-as-identifier breaks down if there are multiple arenas
/// in flight. Just be careful not to mix them up.)
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SegIdx(pub usize);

impl std::fmt::Debug for SegIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "s_{}", self.0)
    }
}

/// Whether the areas on either side of a segment are inside some polygon.
///
/// "Above" is the area to the left of the segment when walking from its start
/// to its end; "below" is the area to the right.
#[derive(Clone, Copy, Default, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fill {
    /// Is the area just above the segment inside?
    pub above: bool,
    /// Is the area just below the segment inside?
    pub below: bool,
}

impl Fill {
    /// Is this segment on the boundary, in the sense that the fill changes across it?
    pub fn is_boundary(&self) -> bool {
        self.above != self.below
    }
}

impl std::fmt::Debug for Fill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c = |b: bool| if b { '#' } else { '.' };
        write!(f, "{}/{}", c(self.above), c(self.below))
    }
}

/// A line segment, annotated with fill information.
///
/// The start point of a segment is always less than its end point, according to
/// [`Epsilon::compare_points`]. This is the right representation for the
/// sweep-line, but it means we don't remember the orientation of the ring that
/// the segment came from: that information lives in the fills instead.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// The first endpoint, in sweep order.
    pub start: Point,
    /// The last endpoint, in sweep order.
    pub end: Point,
    /// The fill of the polygon this segment came from.
    pub fill: Fill,
    /// The fill of the other polygon, once the two operands have been combined.
    pub other_fill: Option<Fill>,
}

impl std::fmt::Debug for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} -- {:?} [{:?}", self.start, self.end, self.fill)?;
        if let Some(other) = self.other_fill {
            write!(f, " {other:?}")?;
        }
        write!(f, "]")
    }
}

impl Segment {
    /// Walks this segment so that the filled side is on the left.
    ///
    /// Returns `None` if the segment isn't a boundary.
    pub(crate) fn oriented(&self) -> Option<(Point, Point)> {
        match (self.fill.above, self.fill.below) {
            (true, false) => Some((self.start, self.end)),
            (false, true) => Some((self.end, self.start)),
            _ => None,
        }
    }
}

/// Splits a closed ring into its edges, each one with its endpoints in sweep order.
///
/// Edges whose endpoints coincide (up to epsilon) are skipped.
pub(crate) fn ring_edges(ring: &[Point], eps: Epsilon) -> impl Iterator<Item = (Point, Point)> + '_ {
    cyclic_pairs(ring).filter_map(move |(&p, &q)| match eps.compare_points(p, q) {
        std::cmp::Ordering::Less => Some((p, q)),
        std::cmp::Ordering::Greater => Some((q, p)),
        std::cmp::Ordering::Equal => None,
    })
}

/// Counts the edges of a ring that survive merging consecutive points that are
/// within epsilon of one another.
pub(crate) fn nondegenerate_edges(ring: &[Point], eps: Epsilon) -> usize {
    ring_edges(ring, eps).count()
}
