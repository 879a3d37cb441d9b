//! Joining selected segments into closed rings.
//!
//! Every selected segment separates the inside of the result from the outside,
//! so we orient each one to have the inside on its left. Then at every point,
//! the number of segments coming in equals the number going out, and we can
//! trace rings by just walking along segments until we get back to where we
//! started.

use ordered_float::OrderedFloat;

use crate::{
    epsilon::Epsilon,
    error::{Error, Result},
    geom::{Point, Vector},
    log::{BuildLog, LogEntry},
    segments::Segment,
};

/// A directed graph whose vertices are segment endpoints, merged up to epsilon.
#[derive(Debug, Default)]
struct Graph {
    points: Vec<Point>,
    /// Indexed by edge: the (from, to) vertices.
    edges: Vec<(usize, usize)>,
    /// Indexed by vertex: the edges leaving it.
    outgoing: Vec<Vec<usize>>,
}

impl Graph {
    fn vertex(&mut self, p: Point, eps: Epsilon) -> usize {
        if let Some(idx) = self.points.iter().position(|&q| eps.same_point(p, q)) {
            return idx;
        }
        self.points.push(p);
        self.outgoing.push(Vec::new());
        self.points.len() - 1
    }

    fn new(segments: &[Segment], eps: Epsilon) -> Self {
        let mut ret = Graph::default();
        for (from, to) in segments.iter().filter_map(Segment::oriented) {
            let from = ret.vertex(from, eps);
            let to = ret.vertex(to, eps);
            ret.outgoing[from].push(ret.edges.len());
            ret.edges.push((from, to));
        }
        ret
    }

    fn direction(&self, edge: usize) -> Vector {
        let (from, to) = self.edges[edge];
        self.points[to] - self.points[from]
    }
}

/// Removes vertices that lie on the straight line between their neighbors.
fn simplify(mut ring: Vec<Point>, eps: Epsilon) -> Vec<Point> {
    loop {
        let n = ring.len();
        if n < 3 {
            return ring;
        }
        let straight =
            (0..n).find(|&i| eps.collinear(ring[(i + n - 1) % n], ring[i], ring[(i + 1) % n]));
        match straight {
            Some(i) => {
                ring.remove(i);
            }
            None => return ring,
        }
    }
}

/// Traces the selected segments into closed rings.
///
/// Each ring has the inside of the result on its left, so (for a result that
/// isn't inverted) outer boundaries are counter-clockwise and holes are clockwise.
/// If several segments leave the same point, we take the one that turns most
/// sharply to the left.
pub(crate) fn chain(
    segments: &[Segment],
    eps: Epsilon,
    log: &mut impl BuildLog,
) -> Result<Vec<Vec<Point>>> {
    let graph = Graph::new(segments, eps);
    let mut used = vec![false; graph.edges.len()];
    let mut rings = Vec::new();

    for first in 0..graph.edges.len() {
        if used[first] {
            continue;
        }

        let start = graph.edges[first].0;
        let mut ring = Vec::new();
        let mut edge = first;
        loop {
            used[edge] = true;
            let (from, to) = graph.edges[edge];
            ring.push(graph.points[from]);
            if to == start {
                break;
            }

            let incoming = graph.direction(edge);
            let next = graph.outgoing[to]
                .iter()
                .copied()
                .filter(|&e| !used[e])
                .max_by_key(|&e| OrderedFloat(incoming.turn_to(graph.direction(e))));
            let Some(next) = next else {
                return Err(Error::OpenChain {
                    at: graph.points[to],
                    remaining: used.iter().filter(|u| !**u).count() + ring.len(),
                });
            };
            edge = next;
        }

        let ring = simplify(ring, eps);
        if ring.len() >= 3 {
            tracing::trace!(len = ring.len(), "closed ring");
            log.record(LogEntry::ChainClosed {
                points: ring.clone(),
            });
            rings.push(ring);
        }
    }

    tracing::debug!(
        segments = graph.edges.len(),
        rings = rings.len(),
        "chaining finished"
    );
    Ok(rings)
}
