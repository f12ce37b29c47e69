use crate::bbox::BoundingBoxPoints;
use crate::candidate::AlignPointFinder;
use crate::config::SnapConfig;
use crate::geom::Point;
use crate::guide::GuideRenderer;
use crate::snap::{SnapOutcome, compute_snap, snap_point};

/// Bundles a candidate finder, a guide renderer and the auto-align settings for a drag.
#[derive(Debug, Clone)]
pub struct Snapper<F, R> {
    finder: F,
    renderer: R,
    config: SnapConfig,
}

impl<F, R> Snapper<F, R>
where
    F: AlignPointFinder,
    R: GuideRenderer,
{
    pub fn new(finder: F, renderer: R, config: SnapConfig) -> Self {
        Self {
            finder,
            renderer,
            config,
        }
    }

    pub fn config(&self) -> &SnapConfig {
        &self.config
    }

    /// Turning auto-align off clears any guide still on screen.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.enabled = enabled;
        if !enabled {
            self.renderer.clear();
        }
    }

    pub fn finder(&self) -> &F {
        &self.finder
    }

    pub fn finder_mut(&mut self) -> &mut F {
        &mut self.finder
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_parts(self) -> (F, R, SnapConfig) {
        (self.finder, self.renderer, self.config)
    }

    /// Clears the previous move's guides, then snaps (unless auto-align is off).
    pub fn snap(&mut self, bbox: &BoundingBoxPoints, current: Point, start: Point) -> SnapOutcome {
        self.renderer.clear();
        if !self.config.enabled {
            return SnapOutcome::unsnapped(current, start);
        }
        compute_snap(&self.finder, &mut self.renderer, bbox, current, start)
    }

    /// Single-position counterpart of [`Snapper::snap`].
    pub fn snap_point(&mut self, at: Point) -> Point {
        self.renderer.clear();
        if !self.config.enabled {
            return at;
        }
        snap_point(&self.finder, &mut self.renderer, at)
    }
}
