//! A sorted index of alignment points collected from the objects that are not being dragged.

use crate::bbox::BoundingBoxPoints;
use crate::candidate::{AlignPointFinder, MatchCandidate};
use crate::config::SnapConfig;
use crate::geom::{Axis, Point, Rect, Segment, is_finite_point};

#[derive(Debug, Clone, Default)]
pub struct AlignPointIndex {
    sorted_x: Vec<Point>,
    sorted_y: Vec<Point>,
    edges: Vec<Segment>,
    workarea: Vec<Point>,
    capture_radius: f64,
}

impl AlignPointIndex {
    pub fn new(capture_radius: f64) -> Self {
        Self {
            capture_radius,
            ..Default::default()
        }
    }

    pub fn from_config(config: &SnapConfig) -> Self {
        Self::new(config.effective_capture_radius())
    }

    pub fn capture_radius(&self) -> f64 {
        self.capture_radius
    }

    pub fn set_capture_radius(&mut self, capture_radius: f64) {
        self.capture_radius = capture_radius;
    }

    /// Rebuilds the index from the bounding boxes of the unselected, unrotated objects.
    ///
    /// Every box contributes its eight points and its four outline edges. The work area, when
    /// given, contributes its eight points but no edges.
    pub fn collect<I>(&mut self, boxes: I, workarea: Option<Rect>)
    where
        I: IntoIterator<Item = Rect>,
    {
        self.sorted_x.clear();
        self.sorted_y.clear();
        self.edges.clear();
        self.workarea.clear();

        let mut points = Vec::new();
        for rect in boxes {
            let finite_size = rect.size.width.is_finite() && rect.size.height.is_finite();
            if !is_finite_point(rect.origin) || !finite_size {
                tracing::debug!(?rect, "skipping object with non-finite bounds");
                continue;
            }
            let bbox = BoundingBoxPoints::from_rect(rect);
            points.extend_from_slice(bbox.points());
            self.edges.extend_from_slice(&bbox.edges());
        }
        if let Some(area) = workarea {
            let bbox = BoundingBoxPoints::from_rect(area);
            self.workarea.extend_from_slice(bbox.points());
            points.extend_from_slice(bbox.points());
        }

        self.sorted_x = points.clone();
        self.sorted_x.sort_by(|a, b| a.x.total_cmp(&b.x));
        self.sorted_y = points;
        self.sorted_y.sort_by(|a, b| a.y.total_cmp(&b.y));

        tracing::trace!(
            points = self.sorted_x.len(),
            edges = self.edges.len(),
            "collected align points"
        );
    }

    /// Adds a single point, keeping both orderings sorted (inserted before equal coordinates).
    pub fn insert(&mut self, p: Point) {
        if !is_finite_point(p) {
            return;
        }
        let pos = self.sorted_x.partition_point(|q| q.x < p.x);
        self.sorted_x.insert(pos, p);
        let pos = self.sorted_y.partition_point(|q| q.y < p.y);
        self.sorted_y.insert(pos, p);
    }

    pub fn push_edges(&mut self, edges: impl IntoIterator<Item = Segment>) {
        self.edges.extend(edges);
    }

    pub fn pop_edges(&mut self, n: usize) {
        let keep = self.edges.len().saturating_sub(n);
        self.edges.truncate(keep);
    }

    pub fn edges(&self) -> &[Segment] {
        &self.edges
    }

    pub fn workarea_points(&self) -> &[Point] {
        &self.workarea
    }

    pub fn len(&self) -> usize {
        self.sorted_x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_x.is_empty()
    }

    /// The point within the capture radius on `axis` that is closest on that axis.
    ///
    /// Ties go to the point closer on the other axis, then to the earlier point in index order.
    pub fn nearest(&self, axis: Axis, at: Point) -> Option<Point> {
        let sorted = match axis {
            Axis::X => &self.sorted_x,
            Axis::Y => &self.sorted_y,
        };
        let target = axis.of(at);
        let lo = sorted.partition_point(|q| axis.of(*q) < target - self.capture_radius);
        let hi = sorted.partition_point(|q| axis.of(*q) <= target + self.capture_radius);
        if lo >= hi {
            return None;
        }

        let other = axis.other();
        let mut best: Option<(f64, f64, Point)> = None;
        for &q in &sorted[lo..hi] {
            let along = (axis.of(q) - target).abs();
            let across = (other.of(q) - other.of(at)).abs();
            let better = match best {
                None => true,
                Some((best_along, best_across, _)) => {
                    along < best_along || (along == best_along && across < best_across)
                }
            };
            if better {
                best = Some((along, across, q));
            }
        }
        best.map(|(_, _, q)| q)
    }

    /// The point sharing the nearest match's coordinate on `axis` that lies farthest from `at`
    /// on the other axis. Ties go to the earlier point in index order.
    pub fn farthest(&self, axis: Axis, at: Point) -> Option<Point> {
        let aligned = axis.of(self.nearest(axis, at)?);
        let sorted = match axis {
            Axis::X => &self.sorted_x,
            Axis::Y => &self.sorted_y,
        };
        let lo = sorted.partition_point(|q| axis.of(*q) < aligned);
        let hi = sorted.partition_point(|q| axis.of(*q) <= aligned);

        let other = axis.other();
        let mut best: Option<(f64, Point)> = None;
        for &q in &sorted[lo..hi] {
            let across = (other.of(q) - other.of(at)).abs();
            if best.is_none_or(|(best_across, _)| across > best_across) {
                best = Some((across, q));
            }
        }
        best.map(|(_, q)| q)
    }
}

impl AlignPointFinder for AlignPointIndex {
    fn find_matched_align_points(&self, x: f64, y: f64) -> MatchCandidate {
        if self.is_empty() {
            return MatchCandidate::default();
        }
        let at = crate::geom::point(x, y);
        MatchCandidate {
            by_x: self.nearest(Axis::X, at),
            by_y: self.nearest(Axis::Y, at),
        }
    }

    fn find_farthest_align_points(&self, x: f64, y: f64) -> MatchCandidate {
        let at = crate::geom::point(x, y);
        MatchCandidate {
            by_x: self.farthest(Axis::X, at),
            by_y: self.farthest(Axis::Y, at),
        }
    }
}
