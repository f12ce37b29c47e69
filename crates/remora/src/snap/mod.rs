//! The per-pointer-move snap computation.
//!
//! One call runs, in order: candidate collection and voting, per-axis target resolution,
//! validation and clustering of the agreeing candidates, and guide drawing. Nothing survives the
//! call. [`snap_point`] is the single-position variant used while creating shapes.

mod cluster;
mod collect;
mod guides;
mod point;
mod resolve;
mod validate;

pub use cluster::{Cluster, ClusterKey, ClusterMember, build_clusters};
pub use collect::{CollectedMatches, VoteTally, collect_matches, start_anchored_value};
pub use point::snap_point;
pub use resolve::{Target, resolve_target};
pub use validate::is_valid;

use crate::bbox::BoundingBoxPoints;
use crate::candidate::AlignPointFinder;
use crate::geom::{Axis, Point, Vector};
use crate::guide::{GuideRenderer, LineId};
use guides::GuidePass;

/// Result of one snap computation.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapOutcome {
    /// Offset to add to the drag start.
    pub offset: Vector,
    pub target: Target,
    pub clusters: Vec<Cluster>,
    /// Guide lines actually sent to the renderer.
    pub guides_drawn: usize,
}

impl SnapOutcome {
    pub fn unsnapped(current: Point, start: Point) -> Self {
        Self {
            offset: current - start,
            target: Target::default(),
            clusters: Vec::new(),
            guides_drawn: 0,
        }
    }

    pub fn is_snapped(&self, axis: Axis) -> bool {
        self.target.get(axis).is_some()
    }
}

/// The offset to add to `start` so the dragged box aligns with other objects.
///
/// On an axis with no snap the component equals the raw pointer delta.
pub fn compute_snap_offset<F, R>(
    finder: &F,
    renderer: &mut R,
    bbox: &BoundingBoxPoints,
    current: Point,
    start: Point,
) -> Vector
where
    F: AlignPointFinder + ?Sized,
    R: GuideRenderer + ?Sized,
{
    compute_snap(finder, renderer, bbox, current, start).offset
}

/// [`compute_snap_offset`], also returning the resolved target and the snap clusters.
pub fn compute_snap<F, R>(
    finder: &F,
    renderer: &mut R,
    bbox: &BoundingBoxPoints,
    current: Point,
    start: Point,
) -> SnapOutcome
where
    F: AlignPointFinder + ?Sized,
    R: GuideRenderer + ?Sized,
{
    let delta = current - start;
    let collected = collect_matches(finder, bbox, delta, start);

    let mut guides = GuidePass::new(renderer);
    for (anchor, p) in bbox.iter() {
        let candidate = collected.candidates[anchor.index()];
        guides.draw(
            p + delta,
            candidate.by_x,
            candidate.by_y,
            LineId::Provisional(anchor.index()),
        );
    }

    let target = resolve_target(&collected);
    let center = bbox.center() + delta;
    let clusters = build_clusters(bbox, &collected, &target, center, start, delta);

    for cluster in &clusters {
        let rep = cluster.representative();
        guides.draw(
            cluster.anchor_position(&target, start, delta),
            rep.matched.by_x,
            rep.matched.by_y,
            LineId::Cluster(cluster.key),
        );
    }

    let mut offset = delta;
    for axis in Axis::BOTH {
        if let Some(t) = target.get(axis) {
            axis.set_vector(&mut offset, t - axis.of(start));
        }
    }

    tracing::trace!(
        x_values = collected.x_votes.len(),
        y_values = collected.y_votes.len(),
        target_x = ?target.x,
        target_y = ?target.y,
        clusters = clusters.len(),
        guides = guides.drawn(),
        "computed snap offset"
    );

    SnapOutcome {
        offset,
        target,
        guides_drawn: guides.drawn(),
        clusters,
    }
}
