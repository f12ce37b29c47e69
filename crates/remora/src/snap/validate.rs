use crate::bbox::{BoxAnchor, Column, Row};
use crate::geom::{Axis, Point};

/// Whether `candidate` is a sensible match for the bounding-box point `anchor` along `axis`.
///
/// Edge midpoints never match along the axis their own edge runs across (W/E for x, N/S for y).
/// Otherwise the candidate has to lie on the same side of `center` as the point itself, measured
/// on the other axis; matching across the center would need the shape to flip or skew.
pub fn is_valid(candidate: Option<Point>, center: Point, anchor: BoxAnchor, axis: Axis) -> bool {
    let Some(candidate) = candidate else {
        return false;
    };
    match axis {
        Axis::X => match anchor.row() {
            Row::Middle => false,
            Row::Top => candidate.y <= center.y,
            Row::Bottom => candidate.y >= center.y,
        },
        Axis::Y => match anchor.column() {
            Column::Center => false,
            Column::Left => candidate.x <= center.x,
            Column::Right => candidate.x >= center.x,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::point;

    const CENTER: Point = Point::new(50.0, 50.0);

    fn anchor(index: usize) -> BoxAnchor {
        BoxAnchor::from_index(index).unwrap()
    }

    #[test]
    fn missing_candidate_is_invalid() {
        for a in BoxAnchor::ALL {
            assert!(!is_valid(None, CENTER, a, Axis::X));
            assert!(!is_valid(None, CENTER, a, Axis::Y));
        }
    }

    #[test]
    fn edge_midpoints_are_excluded_on_their_cross_axis() {
        for p in [point(0.0, 0.0), point(50.0, 50.0), point(-1e6, 1e6)] {
            assert!(!is_valid(Some(p), CENTER, anchor(3), Axis::X));
            assert!(!is_valid(Some(p), CENTER, anchor(4), Axis::X));
            assert!(!is_valid(Some(p), CENTER, anchor(1), Axis::Y));
            assert!(!is_valid(Some(p), CENTER, anchor(6), Axis::Y));
        }
    }

    #[test]
    fn x_matches_respect_vertical_halves() {
        let above = Some(point(10.0, 20.0));
        let below = Some(point(10.0, 80.0));
        for i in 0..3 {
            assert!(is_valid(above, CENTER, anchor(i), Axis::X));
            assert!(!is_valid(below, CENTER, anchor(i), Axis::X));
        }
        for i in 5..8 {
            assert!(is_valid(below, CENTER, anchor(i), Axis::X));
            assert!(!is_valid(above, CENTER, anchor(i), Axis::X));
        }
    }

    #[test]
    fn y_matches_respect_horizontal_halves() {
        let left = Some(point(20.0, 10.0));
        let right = Some(point(80.0, 10.0));
        for i in [0, 3, 5] {
            assert!(is_valid(left, CENTER, anchor(i), Axis::Y));
            assert!(!is_valid(right, CENTER, anchor(i), Axis::Y));
        }
        for i in [2, 4, 7] {
            assert!(is_valid(right, CENTER, anchor(i), Axis::Y));
            assert!(!is_valid(left, CENTER, anchor(i), Axis::Y));
        }
    }

    #[test]
    fn candidates_on_the_center_line_are_valid_from_both_sides() {
        let on_center = Some(point(50.0, 50.0));
        assert!(is_valid(on_center, CENTER, BoxAnchor::NorthWest, Axis::X));
        assert!(is_valid(on_center, CENTER, BoxAnchor::SouthEast, Axis::X));
        assert!(is_valid(on_center, CENTER, BoxAnchor::West, Axis::Y));
        assert!(is_valid(on_center, CENTER, BoxAnchor::East, Axis::Y));
    }
}
