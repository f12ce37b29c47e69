use super::collect::{CollectedMatches, CoordKey, start_anchored_value};
use super::resolve::Target;
use super::validate::is_valid;
use crate::bbox::{BoundingBoxPoints, BoxAnchor};
use crate::candidate::MatchCandidate;
use crate::geom::{Axis, Point, Vector};
use indexmap::IndexMap;

/// The resolved coordinate pair a cluster shares. Either half may be missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClusterKey {
    x: Option<CoordKey>,
    y: Option<CoordKey>,
}

impl ClusterKey {
    pub fn new(x: Option<f64>, y: Option<f64>) -> Self {
        Self {
            x: x.map(CoordKey::new),
            y: y.map(CoordKey::new),
        }
    }

    pub fn x(&self) -> Option<f64> {
        self.x.map(CoordKey::value)
    }

    pub fn y(&self) -> Option<f64> {
        self.y.map(CoordKey::value)
    }
}

impl std::fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(x) = self.x() {
            write!(f, "x{x}")?;
        }
        if let Some(y) = self.y() {
            if self.x.is_some() {
                f.write_str("_")?;
            }
            write!(f, "y{y}")?;
        }
        Ok(())
    }
}

/// A bounding-box point whose own match agrees with the resolved target on at least one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterMember {
    pub anchor: BoxAnchor,
    /// The point's position at drag start.
    pub point: Point,
    /// Only the axes this point's own match claims.
    pub matched: MatchCandidate,
}

impl ClusterMember {
    pub fn claimed_axes(&self) -> impl Iterator<Item = Axis> + '_ {
        Axis::BOTH
            .into_iter()
            .filter(|&axis| self.matched.on(axis).is_some())
    }

    /// Manhattan distance from the dragged position to each matched point it claims.
    fn distance(&self, delta: Vector) -> f64 {
        let dragged = self.point + delta;
        [self.matched.by_x, self.matched.by_y]
            .into_iter()
            .flatten()
            .map(|m| (dragged.x - m.x).abs() + (dragged.y - m.y).abs())
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    pub key: ClusterKey,
    pub members: Vec<ClusterMember>,
    representative: usize,
}

impl Cluster {
    pub fn representative(&self) -> &ClusterMember {
        &self.members[self.representative]
    }

    /// Where the guide for this cluster is anchored.
    ///
    /// A claimed axis uses the matched coordinate. An axis snapped only through the global target
    /// re-applies the representative's offset from the drag start, keeping the guide on the
    /// dragged shape. Unsnapped axes follow the raw pointer delta.
    pub fn anchor_position(&self, target: &Target, start: Point, delta: Vector) -> Point {
        let rep = self.representative();
        let dragged = rep.point + delta;
        let mut at = dragged;
        for axis in Axis::BOTH {
            if let Some(m) = rep.matched.on(axis) {
                axis.set(&mut at, axis.of(m));
            } else if let Some(t) = target.get(axis) {
                let nearest_bbox_diff = axis.of(rep.point) - axis.of(start);
                axis.set(&mut at, t + nearest_bbox_diff);
            }
        }
        at
    }
}

/// Groups the points whose valid matches agree with `target`, keyed by their resolved position,
/// and picks the member closest to its match as each group's representative.
pub fn build_clusters(
    bbox: &BoundingBoxPoints,
    collected: &CollectedMatches,
    target: &Target,
    center: Point,
    start: Point,
    delta: Vector,
) -> Vec<Cluster> {
    let mut groups: IndexMap<ClusterKey, Vec<ClusterMember>> = IndexMap::new();

    for (anchor, p) in bbox.iter() {
        let candidate = collected.candidates[anchor.index()];
        let mut matched = MatchCandidate::default();
        for axis in Axis::BOTH {
            let Some(m) = candidate.on(axis) else {
                continue;
            };
            if !is_valid(Some(m), center, anchor, axis) {
                tracing::debug!(?anchor, %axis, x = m.x, y = m.y, "rejected align candidate");
                continue;
            }
            if target.get(axis) != Some(start_anchored_value(axis, start, p, m)) {
                continue;
            }
            match axis {
                Axis::X => matched.by_x = Some(m),
                Axis::Y => matched.by_y = Some(m),
            }
        }
        if matched.is_empty() {
            continue;
        }

        let member = ClusterMember {
            anchor,
            point: p,
            matched,
        };
        let resolve = |axis: Axis| match matched.on(axis) {
            Some(m) => Some(axis.of(m)),
            None => target
                .get(axis)
                .map(|t| t + axis.of(p) - axis.of(start)),
        };
        let key = ClusterKey::new(resolve(Axis::X), resolve(Axis::Y));
        groups.entry(key).or_default().push(member);
    }

    groups
        .into_iter()
        .map(|(key, members)| {
            let mut representative = 0;
            for (i, m) in members.iter().enumerate().skip(1) {
                if m.distance(delta) < members[representative].distance(delta) {
                    representative = i;
                }
            }
            Cluster {
                key,
                members,
                representative,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::{point, rect, vector};
    use crate::snap::collect::collect_matches;
    use crate::snap::resolve::resolve_target;

    fn unit_box() -> BoundingBoxPoints {
        BoundingBoxPoints::from_rect(rect(0.0, 0.0, 100.0, 100.0))
    }

    fn clusters_for(
        answers: &[(BoxAnchor, MatchCandidate)],
        delta: Vector,
    ) -> (Vec<Cluster>, Target) {
        let bbox = unit_box();
        let start = point(0.0, 0.0);
        let finder = |x: f64, y: f64| {
            answers
                .iter()
                .find(|(a, _)| bbox.get(*a) + delta == point(x, y))
                .map(|(_, c)| *c)
                .unwrap_or_default()
        };
        let collected = collect_matches(&finder, &bbox, delta, start);
        let target = resolve_target(&collected);
        let center = bbox.center() + delta;
        (
            build_clusters(&bbox, &collected, &target, center, start, delta),
            target,
        )
    }

    fn by_x(x: f64, y: f64) -> MatchCandidate {
        MatchCandidate {
            by_x: Some(point(x, y)),
            by_y: None,
        }
    }

    fn by_y(x: f64, y: f64) -> MatchCandidate {
        MatchCandidate {
            by_x: None,
            by_y: Some(point(x, y)),
        }
    }

    #[test]
    fn single_match_forms_a_partial_cluster() {
        let delta = vector(5.0, 3.0);
        let (clusters, target) = clusters_for(&[(BoxAnchor::NorthEast, by_x(200.0, 0.0))], delta);
        assert_eq!(clusters.len(), 1);
        let cluster = &clusters[0];
        assert_eq!(cluster.key, ClusterKey::new(Some(200.0), None));
        assert_eq!(cluster.key.to_string(), "x200");
        assert_eq!(cluster.representative().anchor, BoxAnchor::NorthEast);
        assert_eq!(
            cluster.anchor_position(&target, point(0.0, 0.0), delta),
            point(200.0, 3.0)
        );
    }

    #[test]
    fn invalid_matches_still_vote_but_never_cluster() {
        let (clusters, target) = clusters_for(
            &[(BoxAnchor::NorthEast, by_x(200.0, 90.0))],
            vector(5.0, 3.0),
        );
        assert_eq!(target.x, Some(100.0));
        assert!(clusters.is_empty());
    }

    #[test]
    fn matches_disagreeing_with_the_target_are_left_out() {
        let (clusters, target) = clusters_for(
            &[
                (BoxAnchor::NorthWest, by_x(100.0, -10.0)),
                (BoxAnchor::NorthEast, by_x(200.0, -10.0)),
                (BoxAnchor::SouthWest, by_x(40.0, 200.0)),
            ],
            vector(0.0, 0.0),
        );
        assert_eq!(target.x, Some(100.0));
        let anchors: Vec<_> = clusters
            .iter()
            .flat_map(|c| c.members.iter().map(|m| m.anchor))
            .collect();
        assert_eq!(anchors, vec![BoxAnchor::NorthWest, BoxAnchor::NorthEast]);
    }

    #[test]
    fn points_on_the_same_column_share_a_partial_cluster() {
        // NE lands 403 away from its match, SE only 13.
        let (clusters, _) = clusters_for(
            &[
                (BoxAnchor::NorthEast, by_x(200.0, -400.0)),
                (BoxAnchor::SouthEast, by_x(200.0, 110.0)),
            ],
            vector(97.0, 0.0),
        );
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].members.len(), 2);
        assert_eq!(clusters[0].representative().anchor, BoxAnchor::SouthEast);
    }

    #[test]
    fn representative_ties_go_to_the_earliest_member() {
        let (clusters, _) = clusters_for(
            &[
                (BoxAnchor::NorthEast, by_x(200.0, -10.0)),
                (BoxAnchor::SouthEast, by_x(200.0, 110.0)),
            ],
            vector(97.0, 0.0),
        );
        assert_eq!(clusters[0].representative().anchor, BoxAnchor::NorthEast);
    }

    #[test]
    fn globally_overridden_axis_keeps_the_guide_on_the_shape() {
        let delta = vector(5.0, 3.0);
        let (clusters, target) = clusters_for(
            &[
                (BoxAnchor::NorthEast, by_x(200.0, -10.0)),
                (BoxAnchor::West, by_y(-40.0, 60.0)),
            ],
            delta,
        );
        assert_eq!(target, Target { x: Some(100.0), y: Some(10.0) });

        let ne = clusters
            .iter()
            .find(|c| c.representative().anchor == BoxAnchor::NorthEast)
            .unwrap();
        assert_eq!(ne.key, ClusterKey::new(Some(200.0), Some(10.0)));
        assert_eq!(
            ne.representative().claimed_axes().collect::<Vec<_>>(),
            vec![Axis::X]
        );
        assert_eq!(
            ne.anchor_position(&target, point(0.0, 0.0), delta),
            point(200.0, 10.0)
        );

        let w = clusters
            .iter()
            .find(|c| c.representative().anchor == BoxAnchor::West)
            .unwrap();
        assert_eq!(
            w.anchor_position(&target, point(0.0, 0.0), delta),
            point(100.0, 60.0)
        );
    }
}
