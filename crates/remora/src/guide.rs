//! Guide lines: the renderer seam used by the engine and an in-memory SVG guide layer.

use crate::geom::{Axis, Point, Segment, point};
use crate::snap::ClusterKey;
use crate::svg;
use indexmap::IndexMap;
use serde::Serialize;

pub const HIGHLIGHT_STROKE: &str = "#F707F0";
pub const NORMAL_STROKE: &str = "#1890EF";
/// Guides shorter than this (canvas units) carry no distance label.
pub const MIN_LABELED_LENGTH: f64 = 10.0;

/// Identifies a guide line; drawing again with the same id updates the line in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineId {
    /// Live feedback for one bounding-box point, by its index.
    Provisional(usize),
    /// The guide for a resolved snap cluster.
    Cluster(ClusterKey),
    /// The guide for a single snapped pointer position.
    Pointer,
    /// Continues a pointer guide to the farthest aligned point. Never labeled.
    Extension,
}

impl LineId {
    pub fn is_extension(&self) -> bool {
        matches!(self, LineId::Extension)
    }
}

impl std::fmt::Display for LineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LineId::Provisional(index) => write!(f, "{index}"),
            LineId::Cluster(key) => write!(f, "c_{key}"),
            LineId::Pointer => f.write_str("pointer"),
            LineId::Extension => f.write_str("extension"),
        }
    }
}

pub trait GuideRenderer {
    /// Draws (or updates) the guide anchored at `at`, towards whichever matches are present.
    fn draw_align_line(
        &mut self,
        at: Point,
        by_x: Option<Point>,
        by_y: Option<Point>,
        line_id: &LineId,
    );

    fn clear(&mut self) {}
}

/// A renderer that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGuides;

impl GuideRenderer for NoGuides {
    fn draw_align_line(&mut self, _: Point, _: Option<Point>, _: Option<Point>, _: &LineId) {}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuideLine {
    pub axis: Axis,
    pub id: String,
    /// The matched point.
    pub x1: f64,
    pub y1: f64,
    /// The end on the dragged shape.
    pub x2: f64,
    pub y2: f64,
    /// Lies on one of the work area's own points.
    pub on_workarea: bool,
    pub highlighted: bool,
    pub label: Option<GuideLabel>,
}

impl GuideLine {
    pub fn segment(&self) -> Segment {
        Segment::new(point(self.x1, self.y1), point(self.x2, self.y2))
    }

    pub fn length(&self) -> f64 {
        self.segment().length()
    }

    pub fn stroke(&self) -> &'static str {
        if self.highlighted {
            HIGHLIGHT_STROKE
        } else {
            NORMAL_STROKE
        }
    }
}

/// In-memory guide lines keyed by `(axis, line id)`.
#[derive(Debug, Clone)]
pub struct GuideLayer {
    lines: IndexMap<(Axis, LineId), GuideLine>,
    workarea_xs: Vec<f64>,
    workarea_ys: Vec<f64>,
    edges: Vec<Segment>,
    zoom_ratio: f64,
}

impl Default for GuideLayer {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl GuideLayer {
    pub fn new(zoom_ratio: f64) -> Self {
        Self {
            lines: IndexMap::new(),
            workarea_xs: Vec::new(),
            workarea_ys: Vec::new(),
            edges: Vec::new(),
            zoom_ratio,
        }
    }

    /// Work-area points get a thicker, unlabeled guide; guides lying on a known object edge stay
    /// unlabeled too.
    pub fn set_context(&mut self, workarea: &[Point], edges: &[Segment]) {
        self.workarea_xs = workarea.iter().map(|p| p.x).collect();
        self.workarea_ys = workarea.iter().map(|p| p.y).collect();
        self.edges = edges.to_vec();
    }

    pub fn lines(&self) -> impl Iterator<Item = &GuideLine> {
        self.lines.values()
    }

    pub fn get(&self, axis: Axis, line_id: &LineId) -> Option<&GuideLine> {
        self.lines.get(&(axis, *line_id))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn is_on_workarea(&self, p: Point) -> bool {
        self.workarea_xs.contains(&p.x) && self.workarea_ys.contains(&p.y)
    }

    fn build_line(
        &self,
        axis: Axis,
        at: Point,
        major: Point,
        minor: Option<Point>,
        id: &LineId,
    ) -> GuideLine {
        let end = match axis {
            Axis::X => point(major.x, minor.map_or(at.y, |m| m.y)),
            Axis::Y => point(minor.map_or(at.x, |m| m.x), major.y),
        };
        let segment = Segment::new(major, end);
        let on_workarea = self.is_on_workarea(major);
        let highlighted = !on_workarea && !self.edges.iter().any(|e| e.coincides(&segment));

        let length = segment.length();
        let labeled = highlighted && !id.is_extension() && length >= MIN_LABELED_LENGTH;
        let label = labeled.then(|| {
            let offset = 5.0 / self.zoom_ratio;
            let mid = segment.midpoint();
            let (dx, dy) = match axis {
                Axis::X => (offset, 0.0),
                Axis::Y => (-2.0 * offset, -offset),
            };
            GuideLabel {
                text: svg::fmt((length / 10.0 * 100.0).round() / 100.0),
                x: mid.x + dx,
                y: mid.y + dy,
                font_size: 20.0 / self.zoom_ratio.sqrt(),
            }
        });

        GuideLine {
            axis,
            id: id.to_string(),
            x1: major.x,
            y1: major.y,
            x2: end.x,
            y2: end.y,
            on_workarea,
            highlighted,
            label,
        }
    }

    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        out.push_str(r#"<g class="align-lines">"#);
        for line in self.lines.values() {
            let mut id = String::new();
            svg::escape_xml_into(&mut id, &line.id);

            out.push_str(r#"<path fill="none" id="align_line_"#);
            out.push_str(line.axis.as_str());
            out.push('_');
            out.push_str(&id);
            out.push_str(r#"" stroke=""#);
            out.push_str(line.stroke());
            out.push_str(r#"" stroke-width=""#);
            out.push_str(if line.on_workarea { "2" } else { "1" });
            out.push_str(r#"" vector-effect="non-scaling-stroke" d="M "#);
            svg::fmt_into(&mut out, line.x1);
            out.push(' ');
            svg::fmt_into(&mut out, line.y1);
            out.push_str(" L ");
            svg::fmt_into(&mut out, line.x2);
            out.push(' ');
            svg::fmt_into(&mut out, line.y2);
            out.push_str(r#""/>"#);

            if let Some(label) = &line.label {
                out.push_str(r#"<text id="align_text_"#);
                out.push_str(line.axis.as_str());
                out.push('_');
                out.push_str(&id);
                out.push_str(r#"" fill=""#);
                out.push_str(HIGHLIGHT_STROKE);
                out.push_str(r#"" font-family="Arial" font-size=""#);
                svg::fmt_into(&mut out, label.font_size);
                out.push_str(r#"" x=""#);
                svg::fmt_into(&mut out, label.x);
                out.push_str(r#"" y=""#);
                svg::fmt_into(&mut out, label.y);
                out.push_str(r#"">"#);
                svg::escape_xml_into(&mut out, &label.text);
                out.push_str("</text>");
            }
        }
        out.push_str("</g>");
        out
    }
}

impl GuideRenderer for GuideLayer {
    fn draw_align_line(
        &mut self,
        at: Point,
        by_x: Option<Point>,
        by_y: Option<Point>,
        line_id: &LineId,
    ) {
        for axis in Axis::BOTH {
            let (major, minor) = match axis {
                Axis::X => (by_x, by_y),
                Axis::Y => (by_y, by_x),
            };
            let Some(major) = major else {
                continue;
            };
            let line = self.build_line(axis, at, major, minor, line_id);
            self.lines.insert((axis, *line_id), line);
        }
    }

    fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_guide_runs_from_match_to_anchor_row() {
        let mut layer = GuideLayer::default();
        let id = LineId::Provisional(2);
        layer.draw_align_line(point(105.0, 3.0), Some(point(200.0, 0.0)), None, &id);

        assert_eq!(layer.len(), 1);
        let line = layer.get(Axis::X, &id).unwrap();
        assert_eq!((line.x1, line.y1, line.x2, line.y2), (200.0, 0.0, 200.0, 3.0));
        assert!(line.highlighted);
        assert!(line.label.is_none(), "a 3-unit guide is too short to label");
    }

    #[test]
    fn both_matches_draw_two_lines_meeting_at_the_matches() {
        let mut layer = GuideLayer::default();
        let id = LineId::Provisional(0);
        layer.draw_align_line(
            point(0.0, 0.0),
            Some(point(10.0, 300.0)),
            Some(point(-200.0, 20.0)),
            &id,
        );
        let x = layer.get(Axis::X, &id).unwrap();
        let y = layer.get(Axis::Y, &id).unwrap();
        assert_eq!((x.x2, x.y2), (10.0, 20.0));
        assert_eq!((y.x2, y.y2), (10.0, 20.0));
        assert_eq!(x.label.as_ref().map(|l| l.text.as_str()), Some("28"));
        assert_eq!(y.label.as_ref().map(|l| l.text.as_str()), Some("21"));
    }

    #[test]
    fn same_id_updates_in_place() {
        let mut layer = GuideLayer::default();
        let id = LineId::Provisional(5);
        layer.draw_align_line(point(0.0, 0.0), Some(point(1.0, 50.0)), None, &id);
        layer.draw_align_line(point(0.0, 0.0), Some(point(2.0, 50.0)), None, &id);
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.get(Axis::X, &id).unwrap().x1, 2.0);
    }

    #[test]
    fn workarea_and_edge_guides_are_not_highlighted() {
        let mut layer = GuideLayer::default();
        layer.set_context(
            &[point(0.0, 0.0), point(300.0, 200.0)],
            &[Segment::new(point(50.0, 0.0), point(50.0, 100.0))],
        );
        layer.draw_align_line(
            point(0.0, 150.0),
            Some(point(0.0, 0.0)),
            None,
            &LineId::Provisional(0),
        );
        layer.draw_align_line(
            point(50.0, 80.0),
            Some(point(50.0, 10.0)),
            None,
            &LineId::Provisional(1),
        );
        let lines: Vec<_> = layer.lines().collect();
        assert!(lines[0].on_workarea && !lines[0].highlighted);
        assert!(!lines[1].on_workarea && !lines[1].highlighted);
        assert!(lines.iter().all(|l| l.label.is_none()));
    }

    #[test]
    fn svg_contains_path_and_label() {
        let mut layer = GuideLayer::default();
        layer.draw_align_line(
            point(100.0, 150.0),
            Some(point(100.0, 0.0)),
            None,
            &LineId::Provisional(7),
        );
        let svg = layer.to_svg();
        assert!(svg.contains(r#"id="align_line_x_7""#), "{svg}");
        assert!(svg.contains(r#"d="M 100 0 L 100 150""#), "{svg}");
        assert!(svg.contains(r#"<text id="align_text_x_7""#), "{svg}");
        assert!(svg.contains(">15</text>"), "{svg}");
    }

    #[test]
    fn extension_guides_stay_highlighted_but_unlabeled() {
        let mut layer = GuideLayer::default();
        layer.draw_align_line(
            point(100.0, 150.0),
            Some(point(100.0, -300.0)),
            None,
            &LineId::Extension,
        );
        let line = layer.get(Axis::X, &LineId::Extension).unwrap();
        assert!(line.highlighted);
        assert_eq!(line.length(), 450.0);
        assert!(line.label.is_none());
        assert!(layer.to_svg().contains(r#"id="align_line_x_extension""#));
        assert!(!layer.to_svg().contains("<text"));
    }

    #[test]
    fn clear_removes_everything() {
        let mut layer = GuideLayer::default();
        layer.draw_align_line(
            point(0.0, 0.0),
            None,
            Some(point(9.0, 9.0)),
            &LineId::Provisional(3),
        );
        assert!(!layer.is_empty());
        layer.clear();
        assert!(layer.is_empty());
    }
}
