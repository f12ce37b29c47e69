use crate::geom::{Axis, Point};

/// What the candidate finder offers for one queried point.
///
/// `by_x` is a foreign point sharing the queried X (a vertical alignment); `by_y` shares the
/// queried Y. Either, both, or neither may be present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatchCandidate {
    pub by_x: Option<Point>,
    pub by_y: Option<Point>,
}

impl MatchCandidate {
    pub fn on(&self, axis: Axis) -> Option<Point> {
        match axis {
            Axis::X => self.by_x,
            Axis::Y => self.by_y,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.by_x.is_none() && self.by_y.is_none()
    }
}

/// Spatial search over the other objects on the canvas.
///
/// Implementations own their buffers; the engine only copies the returned values and never holds
/// on to anything between queries.
pub trait AlignPointFinder {
    fn find_matched_align_points(&self, x: f64, y: f64) -> MatchCandidate;

    /// Per axis, the aligned point farthest from `(x, y)` among those sharing the nearest match's
    /// coordinate. Used for the extension guide of a single-point snap.
    fn find_farthest_align_points(&self, _x: f64, _y: f64) -> MatchCandidate {
        MatchCandidate::default()
    }
}

impl<F> AlignPointFinder for F
where
    F: Fn(f64, f64) -> MatchCandidate,
{
    fn find_matched_align_points(&self, x: f64, y: f64) -> MatchCandidate {
        self(x, y)
    }
}
