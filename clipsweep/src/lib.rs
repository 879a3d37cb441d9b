#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

mod contours;
mod epsilon;
mod error;
mod geojson;
mod geom;
pub mod log;
mod polygon;
mod segments;
mod select;
mod sweep;

pub use epsilon::{Along, Epsilon, LineIntersection};
pub use error::{Error, Operand, Result};
pub use geojson::GeoJson;
pub use geom::{signed_area, Point, Vector};
pub use log::{BuildLog, LogEntry, NoLog, Stage};
pub use polygon::{Polygon, Region};
pub use segments::{Fill, Segment};

use segments::nondegenerate_edges;
use serde::{Deserialize, Serialize};
use sweep::Sweeper;

#[cfg(test)]
pub mod perturbation;

/// Binary operations between sets.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum BooleanOp {
    /// A point is in the union of two sets if it is in either one.
    Union,
    /// A point is in the intersection of two sets if it is in both.
    Intersection,
    /// A point is in the difference of two sets if it is in the first but not the second.
    Difference,
    /// The difference, but with the roles of the two sets swapped.
    DifferenceRev,
    /// A point is in the exclusive-or of two sets if it is in one or the other, but not both.
    Xor,
}

/// A polygon that has been noded against itself.
///
/// Its segments don't cross one another, and each one knows which of its
/// sides are inside the polygon. Noding is the expensive part of a boolean
/// operation, so if you're going to use the same polygon in several operations
/// it's worth keeping this around.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PolySegments {
    /// The noded segments.
    pub segments: Vec<Segment>,
    /// Is the polygon inverted?
    pub inverted: bool,
}

/// Two polygons, noded against each other.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CombinedSegments {
    /// The noded segments. Each one has fills for both polygons: `fill` for the
    /// first and `other_fill` for the second. Where the polygons share an edge,
    /// there's just one segment.
    pub combined: Vec<Segment>,
    /// Is the first polygon inverted?
    pub inverted_a: bool,
    /// Is the second polygon inverted?
    pub inverted_b: bool,
}

/// Boolean operations on polygons, with a fixed tolerance.
///
/// The type parameter is a sink for diagnostics (see [`log`]). By default
/// nothing is recorded.
#[derive(Clone, Debug, Default)]
pub struct PolyBool<L = NoLog> {
    eps: Epsilon,
    max_iterations: Option<usize>,
    log: L,
}

impl PolyBool {
    /// Creates a new instance, with the default epsilon and no log.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<L: BuildLog> PolyBool<L> {
    /// Sets the tolerance used for all subsequent computations.
    pub fn with_epsilon(mut self, eps: impl Into<Epsilon>) -> Self {
        self.eps = eps.into();
        self
    }

    /// Limits the number of sweep-line events processed by each noding pass.
    ///
    /// Exceeding the limit makes the operation fail with
    /// [`Error::IterationLimit`].
    pub fn with_max_iterations(mut self, limit: usize) -> Self {
        self.max_iterations = Some(limit);
        self
    }

    /// Records diagnostics to `log`.
    pub fn with_log<M: BuildLog>(self, log: M) -> PolyBool<M> {
        PolyBool {
            eps: self.eps,
            max_iterations: self.max_iterations,
            log,
        }
    }

    /// The current tolerance.
    pub fn epsilon(&self) -> Epsilon {
        self.eps
    }

    /// Changes the tolerance. The change only affects later computations.
    pub fn set_epsilon(&mut self, eps: impl Into<Epsilon>) {
        self.eps = eps.into();
    }

    /// The diagnostic sink.
    pub fn log(&self) -> &L {
        &self.log
    }

    /// Gives back the diagnostic sink.
    pub fn into_log(self) -> L {
        self.log
    }

    fn node(&mut self, poly: &Polygon, operand: Operand) -> Result<PolySegments> {
        self.log.record(LogEntry::Stage(Stage::Noding(operand)));

        let mut rings = Vec::with_capacity(poly.regions.len());
        for (index, ring) in poly.regions.iter().enumerate() {
            if let Some(p) = ring.iter().find(|p| !p.is_finite()) {
                return Err(Error::NonFinite {
                    operand,
                    x: p.x,
                    y: p.y,
                });
            }
            if nondegenerate_edges(ring, self.eps) < 3 {
                tracing::warn!(?operand, index, len = ring.len(), "dropping degenerate region");
                self.log.record(LogEntry::DroppedRegion { operand, index });
            } else {
                rings.push(ring);
            }
        }

        let mut sweeper =
            Sweeper::new(self.eps, operand, &mut self.log).with_max_iterations(self.max_iterations);
        for ring in rings {
            sweeper.add_region(ring);
        }
        Ok(PolySegments {
            segments: sweeper.run(poly.inverted, false)?,
            inverted: poly.inverted,
        })
    }

    /// Nodes a polygon against itself, resolving its self-intersections.
    ///
    /// Regions are combined using the even-odd rule. Regions with fewer than
    /// three distinct points are dropped. Errors are reported as coming from
    /// [`Operand::A`].
    pub fn segments(&mut self, poly: &Polygon) -> Result<PolySegments> {
        self.node(poly, Operand::A)
    }

    /// Nodes two polygons against each other.
    pub fn combine(&mut self, a: &PolySegments, b: &PolySegments) -> Result<CombinedSegments> {
        self.log
            .record(LogEntry::Stage(Stage::Noding(Operand::Combined)));
        let mut sweeper = Sweeper::new(self.eps, Operand::Combined, &mut self.log)
            .with_max_iterations(self.max_iterations);
        sweeper.add_segments(&a.segments, true);
        sweeper.add_segments(&b.segments, false);
        Ok(CombinedSegments {
            combined: sweeper.run(a.inverted, b.inverted)?,
            inverted_a: a.inverted,
            inverted_b: b.inverted,
        })
    }

    /// Picks out the boundary of a boolean operation.
    pub fn select(&mut self, combined: &CombinedSegments, op: BooleanOp) -> PolySegments {
        self.log.record(LogEntry::Stage(Stage::Select(op)));
        PolySegments {
            segments: select::select(&combined.combined, op, &mut self.log),
            inverted: op.apply(combined.inverted_a, combined.inverted_b),
        }
    }

    /// Picks out the boundary of the union.
    pub fn select_union(&mut self, combined: &CombinedSegments) -> PolySegments {
        self.select(combined, BooleanOp::Union)
    }

    /// Picks out the boundary of the intersection.
    pub fn select_intersect(&mut self, combined: &CombinedSegments) -> PolySegments {
        self.select(combined, BooleanOp::Intersection)
    }

    /// Picks out the boundary of the first polygon minus the second.
    pub fn select_difference(&mut self, combined: &CombinedSegments) -> PolySegments {
        self.select(combined, BooleanOp::Difference)
    }

    /// Picks out the boundary of the second polygon minus the first.
    pub fn select_difference_rev(&mut self, combined: &CombinedSegments) -> PolySegments {
        self.select(combined, BooleanOp::DifferenceRev)
    }

    /// Picks out the boundary of the symmetric difference.
    pub fn select_xor(&mut self, combined: &CombinedSegments) -> PolySegments {
        self.select(combined, BooleanOp::Xor)
    }

    /// Joins segments up into a polygon.
    ///
    /// The regions of the output never cross one another. Outer boundaries run
    /// counter-clockwise and holes run clockwise (inverted polygons are oriented
    /// like their complements).
    pub fn polygon(&mut self, segs: &PolySegments) -> Result<Polygon> {
        self.log.record(LogEntry::Stage(Stage::Chain));
        let regions = if segs.inverted {
            let flipped: Vec<_> = segs
                .segments
                .iter()
                .map(|s| Segment {
                    fill: Fill {
                        above: !s.fill.above,
                        below: !s.fill.below,
                    },
                    ..s.clone()
                })
                .collect();
            contours::chain(&flipped, self.eps, &mut self.log)?
        } else {
            contours::chain(&segs.segments, self.eps, &mut self.log)?
        };
        Ok(Polygon {
            regions,
            inverted: segs.inverted,
        })
    }

    /// Computes a boolean operation between two polygons.
    pub fn boolean_op(&mut self, a: &Polygon, b: &Polygon, op: BooleanOp) -> Result<Polygon> {
        let a = self.node(a, Operand::A)?;
        let b = self.node(b, Operand::B)?;
        let combined = self.combine(&a, &b)?;
        let selected = self.select(&combined, op);
        self.polygon(&selected)
    }

    /// The union of two polygons.
    pub fn union(&mut self, a: &Polygon, b: &Polygon) -> Result<Polygon> {
        self.boolean_op(a, b, BooleanOp::Union)
    }

    /// The intersection of two polygons.
    pub fn intersect(&mut self, a: &Polygon, b: &Polygon) -> Result<Polygon> {
        self.boolean_op(a, b, BooleanOp::Intersection)
    }

    /// The first polygon minus the second.
    pub fn difference(&mut self, a: &Polygon, b: &Polygon) -> Result<Polygon> {
        self.boolean_op(a, b, BooleanOp::Difference)
    }

    /// The second polygon minus the first.
    pub fn difference_rev(&mut self, a: &Polygon, b: &Polygon) -> Result<Polygon> {
        self.boolean_op(a, b, BooleanOp::DifferenceRev)
    }

    /// The symmetric difference of two polygons.
    pub fn xor(&mut self, a: &Polygon, b: &Polygon) -> Result<Polygon> {
        self.boolean_op(a, b, BooleanOp::Xor)
    }
}
