#![forbid(unsafe_code)]

//! Headless alignment snapping for dragging shapes in a 2D vector editor.
//!
//! Once per pointer move, [`compute_snap_offset`] asks an [`AlignPointFinder`] for alignment
//! candidates near each of the dragged shape's eight bounding-box points, picks one target per
//! axis by plurality vote, and returns the offset that lands the shape on it. Guide lines go
//! through a [`GuideRenderer`]. The computation is a pure function of its inputs and the
//! collaborators' answers.

pub mod bbox;
pub mod candidate;
pub mod config;
pub mod error;
pub mod geom;
pub mod guide;
pub mod index;
pub mod snap;
mod snapper;
mod svg;

pub use bbox::{BOX_POINT_COUNT, BoundingBoxPoints, BoxAnchor};
pub use candidate::{AlignPointFinder, MatchCandidate};
pub use config::SnapConfig;
pub use error::{Error, Result};
pub use geom::{Axis, Point, Rect, Vector};
pub use guide::{GuideLayer, GuideLine, GuideRenderer, LineId, NoGuides};
pub use index::AlignPointIndex;
pub use snap::{
    SnapOutcome, Target, compute_snap, compute_snap_offset, is_valid, snap_point,
};
pub use snapper::Snapper;
