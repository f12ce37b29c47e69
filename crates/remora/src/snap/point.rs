use crate::candidate::AlignPointFinder;
use crate::geom::{Point, point};
use crate::guide::{GuideRenderer, LineId};

/// Snaps a single pointer position, as the creation tools do for a new shape's corner.
///
/// Each axis with a nearest match takes the match's coordinate. The nearest guide is drawn from
/// the pointer, then an extension guide runs from the snapped position to the farthest aligned
/// point. Without any match the position is returned unchanged and nothing is drawn.
pub fn snap_point<F, R>(finder: &F, renderer: &mut R, at: Point) -> Point
where
    F: AlignPointFinder + ?Sized,
    R: GuideRenderer + ?Sized,
{
    let nearest = finder.find_matched_align_points(at.x, at.y);
    let (nx, ny) = (nearest.by_x, nearest.by_y);
    if nearest.is_empty() {
        return at;
    }

    renderer.draw_align_line(at, nx, ny, &LineId::Pointer);

    let from = point(
        nx.or(ny).map_or(at.x, |p| p.x),
        ny.or(nx).map_or(at.y, |p| p.y),
    );
    let farthest = finder.find_farthest_align_points(at.x, at.y);
    if !farthest.is_empty() {
        renderer.draw_align_line(from, farthest.by_x, farthest.by_y, &LineId::Extension);
    }

    let snapped = point(nx.map_or(at.x, |p| p.x), ny.map_or(at.y, |p| p.y));
    tracing::trace!(x = snapped.x, y = snapped.y, "snapped pointer");
    snapped
}
