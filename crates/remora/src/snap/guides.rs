use super::collect::CoordKey;
use crate::geom::Point;
use crate::guide::{GuideRenderer, LineId};
use rustc_hash::FxHashSet;

/// Forwards guide draws to a renderer, skipping any whose rendered coordinate pair was already
/// drawn during the same computation.
pub(crate) struct GuidePass<'a, R: ?Sized> {
    renderer: &'a mut R,
    drawn: FxHashSet<(CoordKey, CoordKey)>,
}

impl<'a, R> GuidePass<'a, R>
where
    R: GuideRenderer + ?Sized,
{
    pub(crate) fn new(renderer: &'a mut R) -> Self {
        Self {
            renderer,
            drawn: FxHashSet::default(),
        }
    }

    /// `x,matchedY` for a horizontal guide, `matchedX,y` for a vertical one.
    fn rendered_pair(at: Point, by_x: Option<Point>, by_y: Option<Point>) -> (CoordKey, CoordKey) {
        let x = by_x.map_or(at.x, |m| m.x);
        let y = by_y.map_or(at.y, |m| m.y);
        (CoordKey::new(x), CoordKey::new(y))
    }

    pub(crate) fn draw(
        &mut self,
        at: Point,
        by_x: Option<Point>,
        by_y: Option<Point>,
        line_id: LineId,
    ) -> bool {
        if by_x.is_none() && by_y.is_none() {
            return false;
        }
        if !self.drawn.insert(Self::rendered_pair(at, by_x, by_y)) {
            tracing::debug!(%line_id, x = at.x, y = at.y, "skipping duplicate guide");
            return false;
        }
        self.renderer.draw_align_line(at, by_x, by_y, &line_id);
        true
    }

    pub(crate) fn drawn(&self) -> usize {
        self.drawn.len()
    }
}
