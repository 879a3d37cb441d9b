//! The sweep-line noder.
//!
//! We sweep a vertical line from left to right over the segments, keeping an
//! event queue of segment endpoints (sorted by [`Epsilon::compare_points`]) and
//! a status list of the segments currently crossing the sweep-line (sorted from
//! top to bottom). Whenever two segments become neighbors in the status list,
//! we check them for intersections and split them if necessary. Splitting a
//! segment shortens it and pushes the remainder back into the event queue as a
//! new segment, so the queue acts as a worklist of things still to be checked:
//! once it's empty, no two segments cross.
//!
//! While a segment is in the status list we also know which segment is
//! directly below it, which is enough to work out its fill: fill only changes
//! across segments, so the area just below us is the area just above our lower
//! neighbor.

use std::{cmp::Ordering, collections::VecDeque};

use crate::{
    epsilon::{Along, Epsilon, LineIntersection},
    error::{Error, Operand, Result},
    geom::Point,
    log::{BuildLog, LogEntry},
    segments::{ring_edges, Fill, SegIdx, Segment},
};

#[derive(Clone, Copy, PartialEq, Eq)]
struct EvIdx(usize);

impl std::fmt::Debug for EvIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "e_{}", self.0)
    }
}

#[derive(Clone, Debug)]
struct Event {
    is_start: bool,
    seg: SegIdx,
    /// Does this segment belong to the first polygon? (When noding a single
    /// polygon against itself, everything is primary.)
    primary: bool,
    /// The event at the other end of our segment.
    other: EvIdx,
}

#[derive(Clone, Debug)]
struct SweepSeg {
    start: Point,
    end: Point,
    /// `None` until the segment is inserted into the status list, unless it was
    /// split off from a segment that already had a fill.
    fill: Option<Fill>,
    other_fill: Option<Fill>,
}

/// Whether a fill toggles across a segment. Segments whose fill hasn't been
/// determined yet are fresh ring edges, which always toggle.
fn toggles(fill: Option<Fill>) -> bool {
    fill.map_or(true, |f| f.is_boundary())
}

/// Nodes a collection of segments, resolving all their intersections.
///
/// There are two modes, depending on `operand`. When noding a single polygon
/// (`Operand::A` or `Operand::B`), all segments come from the same polygon and
/// we compute their fills from scratch using the even-odd rule. When noding two
/// polygons against each other (`Operand::Combined`), the input segments
/// already have fills for their own polygon, and we compute their fills with
/// respect to the other one.
pub(crate) struct Sweeper<'a, L: BuildLog> {
    eps: Epsilon,
    operand: Operand,
    max_iterations: Option<usize>,
    log: &'a mut L,
    segs: Vec<SweepSeg>,
    events: Vec<Event>,
    queue: VecDeque<EvIdx>,
    /// The segments crossing the sweep-line, ordered from top to bottom. The
    /// entries are the segments' start events.
    status: Vec<EvIdx>,
}

impl<'a, L: BuildLog> Sweeper<'a, L> {
    pub fn new(eps: Epsilon, operand: Operand, log: &'a mut L) -> Self {
        Sweeper {
            eps,
            operand,
            max_iterations: None,
            log,
            segs: Vec::new(),
            events: Vec::new(),
            queue: VecDeque::new(),
            status: Vec::new(),
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: Option<usize>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Adds the edges of a closed ring. Its segments don't have fills yet.
    pub fn add_region(&mut self, ring: &[Point]) {
        for (start, end) in ring_edges(ring, self.eps) {
            self.add_segment(
                SweepSeg {
                    start,
                    end,
                    fill: None,
                    other_fill: None,
                },
                true,
            );
        }
    }

    /// Adds segments that have already been noded, keeping their fills.
    pub fn add_segments(&mut self, segments: &[Segment], primary: bool) {
        for seg in segments {
            self.add_segment(
                SweepSeg {
                    start: seg.start,
                    end: seg.end,
                    fill: Some(seg.fill),
                    other_fill: None,
                },
                primary,
            );
        }
    }

    fn add_segment(&mut self, seg: SweepSeg, primary: bool) -> EvIdx {
        let idx = SegIdx(self.segs.len());
        self.log.record(LogEntry::NewSegment {
            id: idx.0,
            start: seg.start,
            end: seg.end,
            primary,
        });
        self.segs.push(seg);

        let start = EvIdx(self.events.len());
        let end = EvIdx(start.0 + 1);
        self.events.push(Event {
            is_start: true,
            seg: idx,
            primary,
            other: end,
        });
        self.events.push(Event {
            is_start: false,
            seg: idx,
            primary,
            other: start,
        });
        self.enqueue(start);
        self.enqueue(end);
        start
    }

    fn seg(&self, ev: EvIdx) -> &SweepSeg {
        &self.segs[self.events[ev.0].seg.0]
    }

    fn point(&self, ev: EvIdx) -> Point {
        let seg = self.seg(ev);
        if self.events[ev.0].is_start {
            seg.start
        } else {
            seg.end
        }
    }

    /// The order of events in the queue.
    ///
    /// Events are ordered by their points. Ties are broken first by the other
    /// endpoint (events for identical segments compare equal), then by putting
    /// ends before starts, and finally by putting lower segments first.
    fn event_cmp(&self, a: EvIdx, b: EvIdx) -> Ordering {
        let a_pt = self.point(a);
        let b_pt = self.point(b);
        match self.eps.compare_points(a_pt, b_pt) {
            Ordering::Equal => {}
            ord => return ord,
        }

        let a_other = self.point(self.events[a.0].other);
        let b_other = self.point(self.events[b.0].other);
        if self.eps.same_point(a_other, b_other) {
            return Ordering::Equal;
        }

        let a_start = self.events[a.0].is_start;
        if a_start != self.events[b.0].is_start {
            return if a_start {
                Ordering::Greater
            } else {
                Ordering::Less
            };
        }

        let b_seg = self.seg(b);
        if self.eps.above_or_on(a_other, b_seg.start, b_seg.end) {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    }

    fn enqueue(&mut self, ev: EvIdx) {
        let pos = self
            .queue
            .iter()
            .position(|&here| self.event_cmp(ev, here) == Ordering::Less)
            .unwrap_or(self.queue.len());
        self.queue.insert(pos, ev);
    }

    fn dequeue(&mut self, ev: EvIdx) {
        if let Some(pos) = self.queue.iter().position(|&here| here == ev) {
            self.queue.remove(pos);
        }
    }

    /// Is the segment of `a` above the segment of `b`?
    fn status_cmp(&self, a: EvIdx, b: EvIdx) -> Ordering {
        let SweepSeg { start: a1, end: a2, .. } = *self.seg(a);
        let SweepSeg { start: b1, end: b2, .. } = *self.seg(b);
        let above = if self.eps.collinear(a1, b1, b2) {
            self.eps.collinear(a2, b1, b2) || self.eps.above_or_on(a2, b1, b2)
        } else {
            self.eps.above_or_on(a1, b1, b2)
        };
        if above {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    }

    /// Where in the status list a new segment belongs.
    fn status_position(&self, ev: EvIdx) -> usize {
        self.status
            .iter()
            .position(|&here| self.status_cmp(ev, here) == Ordering::Greater)
            .unwrap_or(self.status.len())
    }

    /// Moves the end of a segment, re-sorting its end event.
    fn update_end(&mut self, ev: EvIdx, end: Point) {
        let other = self.events[ev.0].other;
        self.dequeue(other);
        let seg = self.events[ev.0].seg;
        self.segs[seg.0].end = end;
        self.enqueue(other);
    }

    /// Splits a segment at `pt`, which should be strictly inside it.
    fn divide(&mut self, ev: EvIdx, pt: Point) {
        let seg_idx = self.events[ev.0].seg;
        let seg = &self.segs[seg_idx.0];
        let inside = self.eps.compare_points(seg.start, pt) == Ordering::Less
            && self.eps.compare_points(pt, seg.end) == Ordering::Less;
        if !inside {
            // Either `pt` is within epsilon of an endpoint, or the segment is
            // steep enough that `pt` sorts past one of its ends. Splitting
            // would leave a piece that is empty or runs backwards, so treat
            // the pair as touching rather than crossing.
            tracing::warn!(seg = ?seg_idx, ?pt, "skipping split outside the segment");
            self.log.record(LogEntry::Unresolved {
                id: seg_idx.0,
                at: pt,
            });
            return;
        }

        let remainder = SweepSeg {
            start: pt,
            end: seg.end,
            fill: seg.fill,
            other_fill: None,
        };
        let primary = self.events[ev.0].primary;
        self.update_end(ev, pt);
        tracing::trace!(seg = ?seg_idx, ?pt, "split");
        self.log.record(LogEntry::Divide {
            id: seg_idx.0,
            at: pt,
            remainder: self.segs.len(),
        });
        self.add_segment(remainder, primary);
    }

    fn same_segment(&self, a: EvIdx, b: EvIdx) -> bool {
        let a = self.seg(a);
        let b = self.seg(b);
        self.eps.same_point(a.start, b.start) && self.eps.same_point(a.end, b.end)
    }

    /// Moves an intersection that was classified as interior onto an endpoint,
    /// if it doesn't sort strictly between the segment's endpoints.
    ///
    /// This catches crossings within epsilon of an endpoint, and also crossings
    /// near the end of a nearly vertical segment, where a point on the segment
    /// can sort past the segment's end.
    fn snap(
        &self,
        mut i: LineIntersection,
        a: (Point, Point),
        b: (Point, Point),
    ) -> LineIntersection {
        let eps = self.eps;
        let snap_one = |along: &mut Along, pt: &mut Point, (start, end): (Point, Point)| {
            if *along != Along::Interior {
                return;
            }
            if eps.compare_points(*pt, start) != Ordering::Greater {
                *along = Along::OnStart;
                *pt = start;
            } else if eps.compare_points(*pt, end) != Ordering::Less {
                *along = Along::OnEnd;
                *pt = end;
            }
        };
        snap_one(&mut i.along_a, &mut i.pt, a);
        snap_one(&mut i.along_b, &mut i.pt, b);
        i
    }

    /// Checks two segments for intersections, splitting them as necessary.
    ///
    /// If the two segments turn out to be identical (possibly after splitting),
    /// returns `ev2`. Otherwise returns `None`.
    fn check_intersection(&mut self, ev1: EvIdx, ev2: EvIdx) -> Option<EvIdx> {
        let SweepSeg { start: a1, end: a2, .. } = *self.seg(ev1);
        let SweepSeg { start: b1, end: b2, .. } = *self.seg(ev2);
        let eps = self.eps;

        let Some(i) = eps.intersect(a1, a2, b1, b2) else {
            // The segments are parallel, or on the same line.
            if !eps.collinear(a1, a2, b1) {
                return None;
            }
            // Touching at the ends doesn't need any work.
            if eps.same_point(a1, b2) || eps.same_point(a2, b1) {
                return None;
            }

            let a1_eq_b1 = eps.same_point(a1, b1);
            let a2_eq_b2 = eps.same_point(a2, b2);
            if a1_eq_b1 && a2_eq_b2 {
                return Some(ev2);
            }

            // Very short segments can pass the collinearity test without
            // overlapping, so every split below checks its point first.
            let a1_between = !a1_eq_b1 && eps.between(a1, b1, b2);
            let a2_between = !a2_eq_b2 && eps.between(a2, b1, b2);
            if a1_eq_b1 {
                if a2_between {
                    // (a1)---(a2)
                    // (b1)----------(b2)
                    self.divide(ev2, a2);
                } else if eps.between(b2, a1, a2) {
                    // (a1)----------(a2)
                    // (b1)---(b2)
                    self.divide(ev1, b2);
                }
                return self.same_segment(ev1, ev2).then_some(ev2);
            } else if a1_between {
                if !a2_eq_b2 {
                    if a2_between {
                        //         (a1)---(a2)
                        // (b1)-----------------(b2)
                        self.divide(ev2, a2);
                    } else if eps.between(b2, a1, a2) {
                        //         (a1)----------(a2)
                        // (b1)----------(b2)
                        self.divide(ev1, b2);
                    }
                }
                //         (a1)---(a2)
                // (b1)----------(b2)
                self.divide(ev2, a1);
            }
            return None;
        };

        let i = self.snap(i, (a1, a2), (b1, b2));
        if i.along_a == Along::Interior {
            match i.along_b {
                Along::OnStart => self.divide(ev1, b1),
                Along::Interior => self.divide(ev1, i.pt),
                Along::OnEnd => self.divide(ev1, b2),
                Along::BeforeStart | Along::AfterEnd => {}
            }
        }
        if i.along_b == Along::Interior {
            match i.along_a {
                Along::OnStart => self.divide(ev2, a1),
                Along::Interior => self.divide(ev2, i.pt),
                Along::OnEnd => self.divide(ev2, a2),
                Along::BeforeStart | Along::AfterEnd => {}
            }
        }
        None
    }

    /// Folds the segment of `ev` into the identical segment of `kept`, and
    /// forgets about `ev`.
    fn merge(&mut self, ev: EvIdx, kept: EvIdx) {
        let dropped = self.events[ev.0].seg;
        let kept_seg = self.events[kept.0].seg;
        if self.operand == Operand::Combined {
            self.segs[kept_seg.0].other_fill = self.segs[dropped.0].fill;
        } else if toggles(self.segs[dropped.0].fill) {
            // Two edges of the same polygon on top of each other: each one
            // toggles the fill, so together they might cancel out.
            if let Some(fill) = self.segs[kept_seg.0].fill.as_mut() {
                fill.above = !fill.above;
            }
        }

        tracing::trace!(kept = ?kept_seg, ?dropped, "merged coincident segments");
        self.log.record(LogEntry::Merge {
            kept: kept_seg.0,
            dropped: dropped.0,
        });
        self.dequeue(self.events[ev.0].other);
        self.dequeue(ev);
    }

    fn compute_fill(&mut self, ev: EvIdx, below: Option<EvIdx>, inverted: (bool, bool)) {
        let (primary_inverted, secondary_inverted) = inverted;
        let seg_idx = self.events[ev.0].seg;

        if self.operand == Operand::Combined {
            if self.segs[seg_idx.0].other_fill.is_some() {
                return;
            }
            let primary = self.events[ev.0].primary;
            let outside = if primary {
                secondary_inverted
            } else {
                primary_inverted
            };
            let inside = match below {
                None => outside,
                Some(below) => {
                    // We want the other polygon's fill just below us. If our
                    // lower neighbor belongs to the same polygon, that's its
                    // `other_fill`, and otherwise it's its own fill.
                    let below_seg = self.seg(below);
                    let fill = if self.events[below.0].primary == primary {
                        below_seg.other_fill
                    } else {
                        below_seg.fill
                    };
                    fill.map_or(outside, |f| f.above)
                }
            };
            self.segs[seg_idx.0].other_fill = Some(Fill {
                above: inside,
                below: inside,
            });
        } else {
            let toggle = toggles(self.segs[seg_idx.0].fill);
            let fill_below = match below {
                None => primary_inverted,
                Some(below) => self.seg(below).fill.map_or(primary_inverted, |f| f.above),
            };
            self.segs[seg_idx.0].fill = Some(Fill {
                above: fill_below != toggle,
                below: fill_below,
            });
        }
    }

    fn finish(&mut self, ev: EvIdx) -> Segment {
        let seg_idx = self.events[ev.0].seg;
        let primary = self.events[ev.0].primary;
        let seg = &mut self.segs[seg_idx.0];
        if !primary {
            // The secondary polygon's segments computed their own fill in
            // `fill` and the primary polygon's in `other_fill`. Put everything
            // in terms of the primary polygon.
            std::mem::swap(&mut seg.fill, &mut seg.other_fill);
        }

        let ret = Segment {
            start: seg.start,
            end: seg.end,
            fill: seg.fill.unwrap_or_default(),
            other_fill: seg.other_fill,
        };
        self.log.record(LogEntry::Fill {
            id: seg_idx.0,
            fill: ret.fill,
            other_fill: ret.other_fill,
        });
        ret
    }

    /// Runs the sweep to completion, returning the noded segments.
    ///
    /// `primary_inverted` and `secondary_inverted` say whether the polygons are
    /// inverted, which decides the fill far away from any segment.
    pub fn run(mut self, primary_inverted: bool, secondary_inverted: bool) -> Result<Vec<Segment>> {
        let mut ret = Vec::new();
        let mut iterations = 0usize;

        while let Some(&ev) = self.queue.front() {
            iterations += 1;
            if let Some(limit) = self.max_iterations {
                if iterations > limit {
                    return Err(Error::IterationLimit {
                        operand: self.operand,
                        limit,
                    });
                }
            }

            if self.events[ev.0].is_start {
                let pos = self.status_position(ev);
                let above = pos.checked_sub(1).map(|i| self.status[i]);
                let below = self.status.get(pos).copied();

                let same = above
                    .and_then(|above| self.check_intersection(ev, above))
                    .or_else(|| below.and_then(|below| self.check_intersection(ev, below)));
                if let Some(same) = same {
                    self.merge(ev, same);
                }

                // If we got merged, or if splitting put something in front of us,
                // go around again.
                if self.queue.front() != Some(&ev) {
                    continue;
                }

                self.compute_fill(ev, below, (primary_inverted, secondary_inverted));
                self.status.insert(pos, ev);
            } else {
                let start = self.events[ev.0].other;
                let Some(pos) = self.status.iter().position(|&here| here == start) else {
                    return Err(Error::ZeroLengthSegment {
                        operand: self.operand,
                        at: self.point(ev),
                        eps: self.eps.value(),
                    });
                };

                // Our neighbors are about to become adjacent.
                if pos > 0 && pos + 1 < self.status.len() {
                    self.check_intersection(self.status[pos - 1], self.status[pos + 1]);
                }
                self.status.remove(pos);
                ret.push(self.finish(ev));
            }
            self.dequeue(ev);
        }

        tracing::debug!(
            operand = ?self.operand,
            segments = ret.len(),
            iterations,
            "noding finished"
        );
        Ok(ret)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::log::NoLog;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn square(x: f64, y: f64, size: f64) -> Vec<Point> {
        vec![p(x, y), p(x + size, y), p(x + size, y + size), p(x, y + size)]
    }

    fn node(regions: &[Vec<Point>], inverted: bool) -> Vec<Segment> {
        let mut log = NoLog;
        let mut sweeper = Sweeper::new(Epsilon::default(), Operand::A, &mut log);
        for r in regions {
            sweeper.add_region(r);
        }
        sweeper.run(inverted, false).unwrap()
    }

    #[test]
    fn square_fills() {
        let segs = node(&[square(0.0, 0.0, 10.0)], false);
        assert_eq!(segs.len(), 4);
        for s in &segs {
            assert!(s.fill.is_boundary());
            assert_eq!(s.other_fill, None);
        }

        let bottom = segs
            .iter()
            .find(|s| s.start == p(0.0, 0.0) && s.end == p(10.0, 0.0))
            .unwrap();
        assert!(bottom.fill.above);
        let left = segs
            .iter()
            .find(|s| s.start == p(0.0, 0.0) && s.end == p(0.0, 10.0))
            .unwrap();
        assert!(left.fill.below);
    }

    #[test]
    fn inverted_square_fills() {
        let segs = node(&[square(0.0, 0.0, 10.0)], true);
        let bottom = segs
            .iter()
            .find(|s| s.start == p(0.0, 0.0) && s.end == p(10.0, 0.0))
            .unwrap();
        assert!(!bottom.fill.above);
        assert!(bottom.fill.below);
    }

    #[test]
    fn bowtie_is_split() {
        let mut log: Vec<LogEntry> = Vec::new();
        let mut sweeper = Sweeper::new(Epsilon::default(), Operand::A, &mut log);
        sweeper.add_region(&[p(0.0, 0.0), p(4.0, 4.0), p(4.0, 0.0), p(0.0, 4.0)]);
        let segs = sweeper.run(false, false).unwrap();

        assert_eq!(segs.len(), 6);
        assert!(segs.iter().all(|s| s.fill.is_boundary()));
        assert!(log.iter().any(
            |entry| matches!(entry, LogEntry::Divide { at, .. } if Epsilon::default().same_point(*at, p(2.0, 2.0)))
        ));
    }

    #[test]
    fn doubled_ring_cancels() {
        let sq = square(0.0, 0.0, 1.0);
        let segs = node(&[sq.clone(), sq], false);
        assert_eq!(segs.len(), 4);
        assert!(segs.iter().all(|s| !s.fill.is_boundary()));
    }

    #[test]
    fn collinear_overlap_is_merged() {
        // The second square shares part of the first one's bottom edge.
        let segs = node(&[square(0.0, 0.0, 4.0), square(1.0, -2.0, 2.0)], false);
        let eps = Epsilon::default();
        let on_shared_edge: Vec<_> = segs
            .iter()
            .filter(|s| eps.same_point(s.start, p(1.0, 0.0)) && eps.same_point(s.end, p(3.0, 0.0)))
            .collect();
        // The overlap becomes a single segment, and since the squares are
        // on opposite sides of it, both sides are filled.
        assert_eq!(on_shared_edge.len(), 1);
        assert!(!on_shared_edge[0].fill.is_boundary());
    }

    #[test]
    fn combined_fills() {
        let mut log = NoLog;
        let a = node(&[square(0.0, 0.0, 10.0)], false);
        let b = node(&[square(5.0, 5.0, 10.0)], false);
        let mut sweeper = Sweeper::new(Epsilon::default(), Operand::Combined, &mut log);
        sweeper.add_segments(&a, true);
        sweeper.add_segments(&b, false);
        let segs = sweeper.run(false, false).unwrap();

        // Each square has two edges split in half by the other one.
        assert_eq!(segs.len(), 12);
        assert!(segs.iter().all(|s| s.other_fill.is_some()));

        // The part of A's top edge that's inside B.
        let eps = Epsilon::default();
        let top = segs
            .iter()
            .find(|s| eps.same_point(s.start, p(5.0, 10.0)) && eps.same_point(s.end, p(10.0, 10.0)))
            .unwrap();
        assert_eq!(
            top.fill,
            Fill {
                above: false,
                below: true
            }
        );
        assert_eq!(
            top.other_fill,
            Some(Fill {
                above: true,
                below: true
            })
        );
    }

    #[test]
    fn iteration_limit() {
        let mut log = NoLog;
        let mut sweeper =
            Sweeper::new(Epsilon::default(), Operand::B, &mut log).with_max_iterations(Some(3));
        sweeper.add_region(&square(0.0, 0.0, 1.0));
        assert_matches!(
            sweeper.run(false, false),
            Err(Error::IterationLimit {
                operand: Operand::B,
                limit: 3
            })
        );
    }

    #[test]
    fn crossing_near_an_endpoint_snaps_to_it() {
        let mut log = NoLog;
        let sweeper = Sweeper::new(Epsilon::default(), Operand::A, &mut log);
        let a = (p(0.0, 0.0), p(10.0, 0.0));
        let b = (p(4.9, -0.25), p(5.0, 5e-11));
        let i = Epsilon::default().intersect(a.0, a.1, b.0, b.1).unwrap();
        assert_eq!((i.along_a, i.along_b), (Along::Interior, Along::Interior));

        let i = sweeper.snap(i, a, b);
        assert_eq!((i.along_a, i.along_b), (Along::Interior, Along::OnEnd));
        assert_eq!(i.pt, b.1);
    }

    #[test]
    fn steep_crossing_snaps_to_the_end() {
        // `b` is nearly vertical, and the crossing is within epsilon of its
        // end horizontally but above it, so it sorts after the end.
        let mut log = NoLog;
        let sweeper = Sweeper::new(Epsilon::default(), Operand::A, &mut log);
        let a = (p(1.000002232038944, -0.9999977679610561), p(2.0, 0.0));
        let b = (p(1.0, 1.0), p(1.0000044640878518, -1.0));
        let i = Epsilon::default().intersect(a.0, a.1, b.0, b.1).unwrap();
        assert_eq!((i.along_a, i.along_b), (Along::Interior, Along::Interior));
        assert_eq!(
            Epsilon::default().compare_points(i.pt, b.1),
            Ordering::Greater
        );

        let i = sweeper.snap(i, a, b);
        assert_eq!((i.along_a, i.along_b), (Along::Interior, Along::OnEnd));
        assert_eq!(i.pt, b.1);
    }

    #[test]
    fn shallow_crossing_is_treated_as_touching() {
        // A sliver whose two long edges meet at (2, 0) at a very shallow
        // angle. Their computed crossing misses the shared vertex by more
        // than epsilon, but the only split it suggests is at the vertex.
        let mut log: Vec<LogEntry> = Vec::new();
        let mut sweeper = Sweeper::new(Epsilon::default(), Operand::A, &mut log);
        sweeper.add_region(&[
            p(1.8670939026028794, 0.13290609739712056),
            p(2.0, 0.0),
            p(1.0000000968192662, 1.000000000128028),
        ]);
        let segs = sweeper.run(false, false).unwrap();

        assert_eq!(segs.len(), 3);
        assert!(segs.iter().all(|s| s.fill.is_boundary()));
        assert!(log
            .iter()
            .any(|entry| matches!(entry, LogEntry::Unresolved { id: 0, at } if *at == p(2.0, 0.0))));
        assert!(!log.iter().any(|entry| matches!(entry, LogEntry::Divide { .. })));

        let rings = crate::contours::chain(&segs, Epsilon::default(), &mut NoLog).unwrap();
        assert_eq!(rings.len(), 1);
    }

    #[test]
    fn end_without_start_is_an_error() {
        // Splitting never makes a segment run backwards, but if one does show
        // up, the sweep reports it.
        let mut log = NoLog;
        let mut sweeper = Sweeper::new(Epsilon::default(), Operand::A, &mut log);
        sweeper.add_segment(
            SweepSeg {
                start: p(1.0, 0.0),
                end: p(0.0, 0.0),
                fill: None,
                other_fill: None,
            },
            true,
        );
        assert_matches!(
            sweeper.run(false, false),
            Err(Error::ZeroLengthSegment {
                operand: Operand::A,
                ..
            })
        );
    }
}
