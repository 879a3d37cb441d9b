use serde::{Deserialize, Serialize};

use crate::{epsilon::Epsilon, geom::Point, signed_area};

/// A closed ring of points. The last point is implicitly joined to the first.
pub type Region = Vec<Point>;

/// A collection of regions, combined with the even-odd rule.
///
/// If `inverted` is true, the polygon is the complement of the area enclosed by
/// its regions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// The boundary rings.
    pub regions: Vec<Region>,
    /// Is this the outside of `regions` instead of the inside?
    pub inverted: bool,
}

impl Polygon {
    /// A (non-inverted) polygon with the given regions.
    pub fn new(regions: Vec<Region>) -> Self {
        Polygon {
            regions,
            inverted: false,
        }
    }

    /// Builds a (non-inverted) polygon out of anything that looks like lists of points.
    pub fn from_rings<R, P>(rings: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = P>,
        P: Into<Point>,
    {
        Polygon::new(
            rings
                .into_iter()
                .map(|r| r.into_iter().map(Into::into).collect())
                .collect(),
        )
    }

    /// The complement of this polygon.
    pub fn complement(mut self) -> Self {
        self.inverted = !self.inverted;
        self
    }

    /// Does this polygon contain nothing at all?
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty() && !self.inverted
    }

    /// The total area enclosed by the regions.
    ///
    /// This is the sum of the regions' signed areas, which is the actual
    /// enclosed area for polygons produced by this crate (where outer
    /// boundaries wind counter-clockwise and holes clockwise). Inversion is
    /// ignored, because the complement has infinite area.
    pub fn area(&self) -> f64 {
        self.regions.iter().map(|r| signed_area(r)).sum()
    }

    /// Is `pt` inside this polygon?
    ///
    /// Points on (or within epsilon of) the boundary may go either way.
    pub fn contains(&self, pt: Point, eps: Epsilon) -> bool {
        let inside = self
            .regions
            .iter()
            .filter(|r| eps.point_in_region(pt, r))
            .count()
            % 2
            == 1;
        inside != self.inverted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_hole() -> Polygon {
        Polygon::from_rings([
            vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)],
            vec![(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0)],
        ])
    }

    #[test]
    fn area() {
        assert_eq!(with_hole().area(), 12.0);
        assert_eq!(Polygon::default().area(), 0.0);
    }

    #[test]
    fn contains() {
        let eps = Epsilon::default();
        let poly = with_hole();
        assert!(poly.contains(Point::new(0.5, 0.5), eps));
        assert!(!poly.contains(Point::new(2.0, 2.0), eps));
        assert!(!poly.contains(Point::new(5.0, 2.0), eps));

        let poly = poly.complement();
        assert!(!poly.contains(Point::new(0.5, 0.5), eps));
        assert!(poly.contains(Point::new(2.0, 2.0), eps));
        assert!(poly.contains(Point::new(5.0, 2.0), eps));
    }

    #[test]
    fn empty() {
        assert!(Polygon::default().is_empty());
        assert!(!Polygon::default().complement().is_empty());
        assert!(!with_hole().is_empty());
    }
}
