//! Tolerant geometric predicates.
//!
//! Every comparison the rest of the crate makes goes through an [`Epsilon`], so a
//! single tolerance decides what "equal", "collinear" and "intersecting" mean for
//! a whole computation. Zero is the open interval `(-eps, eps)`.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::geom::{cyclic_pairs, Point};

/// The tolerance used by all predicates.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Epsilon(f64);

impl Default for Epsilon {
    fn default() -> Self {
        Epsilon(1e-10)
    }
}

impl From<f64> for Epsilon {
    fn from(eps: f64) -> Self {
        Epsilon(eps)
    }
}

/// Where, along a segment, a point on its supporting line falls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Along {
    /// Strictly before the segment's start.
    BeforeStart,
    /// On the segment's start, up to epsilon.
    OnStart,
    /// Strictly between the two endpoints.
    Interior,
    /// On the segment's end, up to epsilon.
    OnEnd,
    /// Strictly after the segment's end.
    AfterEnd,
}

impl Along {
    fn classify(t: f64, eps: f64) -> Along {
        if t <= -eps {
            Along::BeforeStart
        } else if t < eps {
            Along::OnStart
        } else if t - 1.0 <= -eps {
            Along::Interior
        } else if t - 1.0 < eps {
            Along::OnEnd
        } else {
            Along::AfterEnd
        }
    }
}

/// The crossing point of two non-parallel lines.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineIntersection {
    /// The crossing point.
    pub pt: Point,
    /// Where `pt` falls along the first segment.
    pub along_a: Along,
    /// Where `pt` falls along the second segment.
    pub along_b: Along,
}

impl Epsilon {
    /// Creates a tolerance.
    pub fn new(eps: f64) -> Self {
        Epsilon(eps)
    }

    /// The raw tolerance value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Is `pt` on, or to the left of, the directed line from `a` to `b`?
    ///
    /// Since our segments point in the direction of increasing `x`, "left" is the
    /// same as "above".
    pub fn above_or_on(&self, pt: Point, a: Point, b: Point) -> bool {
        (b - a).cross(pt - a) >= -self.0
    }

    /// Is `p` strictly between `a` and `b`?
    ///
    /// The three points are assumed to be collinear. This returns false if `p` is
    /// (approximately) equal to `a` or `b`, and also if `a` and `b` coincide.
    pub fn between(&self, p: Point, a: Point, b: Point) -> bool {
        let ab = b - a;
        let dot = (p - a).dot(ab);
        if dot < self.0 {
            return false;
        }
        dot - ab.norm_squared() <= -self.0
    }

    /// Do the points have the same `x` coordinate, up to epsilon?
    pub fn same_x(&self, p: Point, q: Point) -> bool {
        (p.x - q.x).abs() < self.0
    }

    /// Do the points have the same `y` coordinate, up to epsilon?
    pub fn same_y(&self, p: Point, q: Point) -> bool {
        (p.y - q.y).abs() < self.0
    }

    /// Are the points the same, up to epsilon?
    pub fn same_point(&self, p: Point, q: Point) -> bool {
        self.same_x(p, q) && self.same_y(p, q)
    }

    /// Orders points by `x` and then by `y`, treating nearby coordinates as equal.
    ///
    /// This is not quite a total order (it isn't transitive for chains of points
    /// that are each within epsilon of the next) but it's consistent for any two
    /// points, which is all the sweep needs.
    pub fn compare_points(&self, p: Point, q: Point) -> Ordering {
        if self.same_x(p, q) {
            if self.same_y(p, q) {
                Ordering::Equal
            } else if p.y < q.y {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        } else if p.x < q.x {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }

    /// Does `p1 -> p2 -> p3` make a straight line?
    pub fn collinear(&self, p1: Point, p2: Point, p3: Point) -> bool {
        (p1 - p2).cross(p2 - p3).abs() < self.0
    }

    /// Intersects the infinite lines through `a0 -> a1` and `b0 -> b1`.
    ///
    /// Returns `None` if the lines are parallel or coincident. Otherwise, the
    /// returned intersection says where the crossing point falls along each
    /// segment.
    pub fn intersect(&self, a0: Point, a1: Point, b0: Point, b1: Point) -> Option<LineIntersection> {
        let a = a1 - a0;
        let b = b1 - b0;
        let axb = a.cross(b);
        if axb.abs() < self.0 {
            return None;
        }

        let d = a0 - b0;
        let t_a = b.cross(d) / axb;
        let t_b = a.cross(d) / axb;

        Some(LineIntersection {
            pt: Point::new(a0.x + t_a * a.x, a0.y + t_a * a.y),
            along_a: Along::classify(t_a, self.0),
            along_b: Along::classify(t_b, self.0),
        })
    }

    /// Even-odd point-in-ring test, by casting a ray in the `+x` direction.
    ///
    /// Points on the boundary are classified arbitrarily.
    pub fn point_in_region(&self, pt: Point, region: &[Point]) -> bool {
        let mut inside = false;
        // `cyclic_pairs` visits (prev, cur) for every edge, including the closing one.
        for (last, cur) in cyclic_pairs(region) {
            if (cur.y - pt.y > self.0) != (last.y - pt.y > self.0)
                && (last.x - cur.x) * (pt.y - cur.y) / (last.y - cur.y) + cur.x - pt.x > self.0
            {
                inside = !inside;
            }
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    use super::*;
    use crate::geom::tests::reasonable_point;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn eps() -> Epsilon {
        Epsilon::default()
    }

    #[test]
    fn above() {
        let eps = eps();
        assert!(eps.above_or_on(p(0.5, 1.0), p(0.0, 0.0), p(1.0, 0.0)));
        assert!(eps.above_or_on(p(0.5, 0.0), p(0.0, 0.0), p(1.0, 0.0)));
        assert!(eps.above_or_on(p(0.5, -1e-11), p(0.0, 0.0), p(1.0, 0.0)));
        assert!(!eps.above_or_on(p(0.5, -1.0), p(0.0, 0.0), p(1.0, 0.0)));
    }

    #[test]
    fn between() {
        let eps = eps();
        assert!(eps.between(p(1.0, 1.0), p(0.0, 0.0), p(2.0, 2.0)));
        assert!(!eps.between(p(0.0, 0.0), p(0.0, 0.0), p(2.0, 2.0)));
        assert!(!eps.between(p(2.0, 2.0), p(0.0, 0.0), p(2.0, 2.0)));
        assert!(!eps.between(p(-1.0, -1.0), p(0.0, 0.0), p(2.0, 2.0)));
        assert!(!eps.between(p(3.0, 3.0), p(0.0, 0.0), p(2.0, 2.0)));
        assert!(!eps.between(p(0.0, 0.0), p(1.0, 1.0), p(1.0, 1.0)));
    }

    #[test]
    fn compare() {
        let eps = eps();
        assert_eq!(eps.compare_points(p(0.0, 5.0), p(1.0, 0.0)), Ordering::Less);
        assert_eq!(eps.compare_points(p(1.0, 0.0), p(1.0, 5.0)), Ordering::Less);
        assert_eq!(eps.compare_points(p(1.0, 5.0), p(1.0, 0.0)), Ordering::Greater);
        assert_eq!(
            eps.compare_points(p(1.0, 5.0), p(1.0 + 1e-12, 5.0 - 1e-12)),
            Ordering::Equal
        );
    }

    #[test]
    fn collinear() {
        let eps = eps();
        assert!(eps.collinear(p(0.0, 0.0), p(1.0, 1.0), p(3.0, 3.0)));
        assert!(!eps.collinear(p(0.0, 0.0), p(1.0, 1.0), p(3.0, 3.1)));
    }

    #[test]
    fn crossing() {
        let eps = eps();
        let i = eps
            .intersect(p(0.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(2.0, 0.0))
            .unwrap();
        assert!(eps.same_point(i.pt, p(1.0, 1.0)));
        assert_eq!(i.along_a, Along::Interior);
        assert_eq!(i.along_b, Along::Interior);
    }

    #[test]
    fn endpoint_classification() {
        let eps = eps();
        // b starts exactly at a's end.
        let i = eps
            .intersect(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0), p(1.0, 1.0))
            .unwrap();
        assert_eq!(i.along_a, Along::OnEnd);
        assert_eq!(i.along_b, Along::OnStart);

        // The lines cross outside both segments.
        let i = eps
            .intersect(p(0.0, 0.0), p(1.0, 0.0), p(3.0, -1.0), p(3.0, -2.0))
            .unwrap();
        assert_eq!(i.along_a, Along::AfterEnd);
        assert_eq!(i.along_b, Along::BeforeStart);
    }

    #[test]
    fn parallel() {
        let eps = eps();
        assert_matches!(
            eps.intersect(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0), p(1.0, 1.0)),
            None
        );
        assert_matches!(
            eps.intersect(p(0.0, 0.0), p(1.0, 0.0), p(0.5, 0.0), p(2.0, 0.0)),
            None
        );
    }

    #[test]
    fn region_containment() {
        let eps = eps();
        let square = [p(0.0, 0.0), p(10.0, 0.0), p(10.0, 10.0), p(0.0, 10.0)];
        assert!(eps.point_in_region(p(5.0, 5.0), &square));
        assert!(!eps.point_in_region(p(15.0, 5.0), &square));
        assert!(!eps.point_in_region(p(-1.0, 5.0), &square));
        assert!(!eps.point_in_region(p(5.0, 11.0), &square));

        // Even-odd: the inner square of a doubled ring is outside.
        let bowtie = [p(0.0, 0.0), p(4.0, 4.0), p(4.0, 0.0), p(0.0, 4.0)];
        assert!(eps.point_in_region(p(1.0, 2.5), &bowtie));
        assert!(!eps.point_in_region(p(2.0, 3.5), &bowtie));
    }

    proptest! {
        #[test]
        fn compare_is_antisymmetric(a in reasonable_point(), b in reasonable_point()) {
            let eps = Epsilon::default();
            prop_assert_eq!(eps.compare_points(a, b), eps.compare_points(b, a).reverse());
        }

        #[test]
        fn intersection_lies_on_both_lines(
            a0 in reasonable_point(),
            a1 in reasonable_point(),
            b0 in reasonable_point(),
            b1 in reasonable_point(),
        ) {
            let eps = Epsilon::default();
            // Only check well-conditioned crossings.
            if (a1 - a0).cross(b1 - b0).abs() > 1.0 {
                let i = eps.intersect(a0, a1, b0, b1).unwrap();
                let dist_a = (a1 - a0).cross(i.pt - a0).abs() / (a1 - a0).norm_squared().sqrt();
                let dist_b = (b1 - b0).cross(i.pt - b0).abs() / (b1 - b0).norm_squared().sqrt();
                prop_assert!(dist_a < 1e-6);
                prop_assert!(dist_b < 1e-6);
            }
        }
    }
}
