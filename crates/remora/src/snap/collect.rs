use crate::bbox::{BOX_POINT_COUNT, BoundingBoxPoints};
use crate::candidate::{AlignPointFinder, MatchCandidate};
use crate::geom::{Axis, Point, Vector, is_finite_point};
use indexmap::IndexMap;

/// A coordinate usable as a map key; `-0.0` and `0.0` share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CoordKey(u64);

impl CoordKey {
    pub(crate) fn new(value: f64) -> Self {
        let value = if value == 0.0 { 0.0 } else { value };
        Self(value.to_bits())
    }

    pub(crate) fn value(self) -> f64 {
        f64::from_bits(self.0)
    }
}

/// Votes per start-anchored coordinate, in first-vote order.
#[derive(Debug, Clone, Default)]
pub struct VoteTally {
    votes: IndexMap<CoordKey, usize>,
}

impl VoteTally {
    pub fn vote(&mut self, value: f64) {
        *self.votes.entry(CoordKey::new(value)).or_insert(0) += 1;
    }

    pub fn count(&self, value: f64) -> usize {
        self.votes.get(&CoordKey::new(value)).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.votes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.votes.is_empty()
    }

    /// `(value, votes)` pairs in the order each value first received a vote.
    pub fn iter(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.votes.iter().map(|(key, &count)| (key.value(), count))
    }
}

/// Candidates for every bounding-box point plus the per-axis tallies they produced.
#[derive(Debug, Clone, Default)]
pub struct CollectedMatches {
    pub candidates: [MatchCandidate; BOX_POINT_COUNT],
    pub x_votes: VoteTally,
    pub y_votes: VoteTally,
}

impl CollectedMatches {
    pub fn tally(&self, axis: Axis) -> &VoteTally {
        match axis {
            Axis::X => &self.x_votes,
            Axis::Y => &self.y_votes,
        }
    }

    fn tally_mut(&mut self, axis: Axis) -> &mut VoteTally {
        match axis {
            Axis::X => &mut self.x_votes,
            Axis::Y => &mut self.y_votes,
        }
    }
}

/// The coordinate the drag anchor would need for `point` to land on `matched` along `axis`.
pub fn start_anchored_value(axis: Axis, start: Point, point: Point, matched: Point) -> f64 {
    axis.of(start) + axis.of(matched) - axis.of(point)
}

/// Queries the finder once per bounding-box point, moved by the raw pointer delta, and tallies
/// the start-anchored value each match implies.
pub fn collect_matches<F>(
    finder: &F,
    bbox: &BoundingBoxPoints,
    delta: Vector,
    start: Point,
) -> CollectedMatches
where
    F: AlignPointFinder + ?Sized,
{
    let mut collected = CollectedMatches::default();
    for (anchor, p) in bbox.iter() {
        let dragged = p + delta;
        let found = finder.find_matched_align_points(dragged.x, dragged.y);
        // Copy the values out; the finder may reuse its buffers on the next query.
        let candidate = MatchCandidate {
            by_x: found.by_x.filter(|q| is_finite_point(*q)),
            by_y: found.by_y.filter(|q| is_finite_point(*q)),
        };
        for axis in Axis::BOTH {
            if let Some(matched) = candidate.on(axis) {
                collected
                    .tally_mut(axis)
                    .vote(start_anchored_value(axis, start, p, matched));
            }
        }
        collected.candidates[anchor.index()] = candidate;
    }
    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{point, rect, vector};

    #[test]
    fn tally_keeps_first_vote_order_and_counts() {
        let mut tally = VoteTally::default();
        tally.vote(5.0);
        tally.vote(2.0);
        tally.vote(5.0);
        assert_eq!(tally.iter().collect::<Vec<_>>(), vec![(5.0, 2), (2.0, 1)]);
        assert_eq!(tally.count(2.0), 1);
        assert_eq!(tally.count(7.0), 0);
    }

    #[test]
    fn negative_zero_shares_a_key_with_zero() {
        let mut tally = VoteTally::default();
        tally.vote(0.0);
        tally.vote(-0.0);
        assert_eq!(tally.len(), 1);
        assert_eq!(tally.count(0.0), 2);
    }

    #[test]
    fn queries_use_dragged_positions_and_votes_are_start_anchored() {
        let bbox = BoundingBoxPoints::from_rect(rect(0.0, 0.0, 100.0, 100.0));
        let queried = std::cell::RefCell::new(Vec::new());
        let finder = |x: f64, y: f64| {
            queried.borrow_mut().push(point(x, y));
            if (x, y) == (105.0, 3.0) {
                MatchCandidate {
                    by_x: Some(point(200.0, 0.0)),
                    by_y: None,
                }
            } else {
                MatchCandidate::default()
            }
        };

        let collected = collect_matches(&finder, &bbox, vector(5.0, 3.0), point(0.0, 0.0));

        assert_eq!(queried.borrow().len(), 8);
        assert_eq!(queried.borrow()[0], point(5.0, 3.0));
        assert_eq!(collected.x_votes.iter().collect::<Vec<_>>(), vec![(100.0, 1)]);
        assert!(collected.y_votes.is_empty());
        assert_eq!(collected.candidates[2].by_x, Some(point(200.0, 0.0)));
    }

    #[test]
    fn non_finite_matches_have_no_opinion() {
        let bbox = BoundingBoxPoints::from_rect(rect(0.0, 0.0, 10.0, 10.0));
        let finder = |_: f64, _: f64| MatchCandidate {
            by_x: Some(point(f64::NAN, 0.0)),
            by_y: Some(point(0.0, f64::INFINITY)),
        };
        let collected = collect_matches(&finder, &bbox, vector(0.0, 0.0), point(0.0, 0.0));
        assert!(collected.x_votes.is_empty());
        assert!(collected.y_votes.is_empty());
        assert!(collected.candidates.iter().all(MatchCandidate::is_empty));
    }
}
