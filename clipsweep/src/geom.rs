use serde::{Deserialize, Serialize};

/// A point in the plane.
///
/// Points have no identity beyond their coordinates, and the algorithms in this
/// crate never compare them exactly: see [`Epsilon`](crate::Epsilon) for the
/// comparisons we actually use.
#[derive(Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// The horizontal coordinate.
    pub x: f64,
    /// The vertical coordinate.
    pub y: f64,
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// A convex combination between `self` (at `t == 0`) and `other` (at `t == 1`).
    pub fn affine(self, other: Point, t: f64) -> Point {
        Point {
            x: (1.0 - t) * self.x + t * other.x,
            y: (1.0 - t) * self.y + t * other.y,
        }
    }

    /// The point halfway between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Point {
        self.affine(other, 0.5)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl std::ops::Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

/// The difference between two points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector {
    /// The horizontal component.
    pub x: f64,
    /// The vertical component.
    pub y: f64,
}

impl Vector {
    /// The (scalar) cross product, which is positive if `other` points to the
    /// left of `self`.
    pub fn cross(&self, other: Vector) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// The dot product.
    pub fn dot(&self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// The squared length.
    pub fn norm_squared(&self) -> f64 {
        self.dot(*self)
    }

    /// The signed angle (in `(-pi, pi]`) that turns `self` onto `other`.
    ///
    /// Positive angles are counter-clockwise.
    pub fn turn_to(&self, other: Vector) -> f64 {
        self.cross(other).atan2(self.dot(other))
    }
}

/// The signed area of a closed ring, positive if it winds counter-clockwise.
///
/// The ring is implicitly closed: the last point connects back to the first.
pub fn signed_area(ring: &[Point]) -> f64 {
    cyclic_pairs(ring)
        .map(|(p, q)| p.x * q.y - q.x * p.y)
        .sum::<f64>()
        / 2.0
}

/// Iterates over the edges of a closed ring, including the one from the last point
/// back to the first.
pub(crate) fn cyclic_pairs<T>(xs: &[T]) -> impl Iterator<Item = (&T, &T)> {
    xs.windows(2)
        .map(|pair| (&pair[0], &pair[1]))
        .chain(xs.last().zip(xs.first()).filter(|_| xs.len() > 1))
}
