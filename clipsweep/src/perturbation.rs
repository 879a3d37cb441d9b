//! Proptest strategies for nudging rings into nearly-degenerate shapes.
//!
//! The base rings are chosen to have lots of coincidences (shared vertices,
//! collinear edges), and the recipes break those coincidences by tiny
//! amounts: exactly the situations where epsilon comparisons matter.

use proptest::{arbitrary::any, prop_oneof, strategy::Strategy};

use crate::geom::Point;

/// A small change to one coordinate.
#[derive(Clone, Copy, Debug)]
pub enum Nudge {
    /// Step to a neighboring float, between -128 and 127 times.
    Ulps(i8),
    /// Add a bounded offset.
    Offset(f64),
}

impl Nudge {
    fn apply(self, f: f64) -> f64 {
        match self {
            Nudge::Ulps(n) => (0..n.unsigned_abs()).fold(f, |f, _| {
                if n > 0 {
                    f.next_up()
                } else {
                    f.next_down()
                }
            }),
            Nudge::Offset(x) => f + x,
        }
    }
}

/// How to build a ring out of a list of base rings. Indices wrap around.
#[derive(Clone, Debug)]
pub enum Recipe {
    /// One of the base rings.
    Base(usize),
    /// Move one vertex.
    Nudge {
        x: Nudge,
        y: Nudge,
        vertex: usize,
        next: Box<Recipe>,
    },
    /// Insert a vertex part way (`t` is between 0 and 1) along an edge.
    Subdivide {
        t: f64,
        edge: usize,
        next: Box<Recipe>,
    },
    /// Concatenate two rings.
    Overlay(Box<Recipe>, Box<Recipe>),
}

impl Recipe {
    /// Builds the ring.
    pub fn realize(&self, base: &[Vec<Point>]) -> Vec<Point> {
        match self {
            Recipe::Base(idx) => base[idx % base.len()].clone(),
            Recipe::Nudge { x, y, vertex, next } => {
                let mut ring = next.realize(base);
                let len = ring.len();
                let p = &mut ring[vertex % len];
                *p = Point::new(x.apply(p.x), y.apply(p.y));
                ring
            }
            Recipe::Subdivide { t, edge, next } => {
                let mut ring = next.realize(base);
                let i = edge % ring.len();
                let mid = ring[i].affine(ring[(i + 1) % ring.len()], *t);
                ring.insert(i + 1, mid);
                ring
            }
            Recipe::Overlay(left, right) => {
                let mut ring = left.realize(base);
                ring.extend(right.realize(base));
                ring
            }
        }
    }
}

fn nudge(max_offset: f64) -> impl Strategy<Value = Nudge> {
    prop_oneof![
        any::<i8>().prop_map(Nudge::Ulps),
        (-max_offset..=max_offset).prop_map(Nudge::Offset)
    ]
}

pub fn recipe(max_offset: f64) -> impl Strategy<Value = Recipe> {
    any::<usize>()
        .prop_map(Recipe::Base)
        .prop_recursive(3, 16, 8, move |inner| {
            prop_oneof![
                (nudge(max_offset), nudge(max_offset), any::<usize>(), inner.clone()).prop_map(
                    |(x, y, vertex, next)| Recipe::Nudge {
                        x,
                        y,
                        vertex,
                        next: Box::new(next),
                    }
                ),
                (0.0..1.0, any::<usize>(), inner.clone()).prop_map(|(t, edge, next)| {
                    Recipe::Subdivide {
                        t,
                        edge,
                        next: Box::new(next),
                    }
                }),
                (inner.clone(), inner)
                    .prop_map(|(left, right)| Recipe::Overlay(Box::new(left), Box::new(right)))
            ]
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ulps() {
        assert_eq!(Nudge::Ulps(0).apply(1.0), 1.0);
        assert_eq!(Nudge::Ulps(1).apply(1.0), 1.0 + f64::EPSILON);
        assert_eq!(Nudge::Ulps(-2).apply(0.0), -2.0 * f64::from_bits(1));
    }

    #[test]
    fn subdivide_and_overlay() {
        let base = vec![vec![Point::new(0.0, 0.0), Point::new(2.0, 0.0), Point::new(0.0, 2.0)]];
        let recipe = Recipe::Overlay(
            Box::new(Recipe::Subdivide {
                t: 0.5,
                edge: 0,
                next: Box::new(Recipe::Base(0)),
            }),
            Box::new(Recipe::Base(7)),
        );
        let ring = recipe.realize(&base);
        assert_eq!(ring.len(), 7);
        assert_eq!(ring[1], Point::new(1.0, 0.0));
    }
}
