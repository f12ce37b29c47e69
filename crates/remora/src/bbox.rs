//! The eight canonical points of an axis-aligned bounding box.

use crate::error::{Error, Result};
use crate::geom::{Point, Rect, Segment, Vector, is_finite_point, point};

pub const BOX_POINT_COUNT: usize = 8;

/// Names the slots of [`BoundingBoxPoints`], in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BoxAnchor {
    NorthWest,
    North,
    NorthEast,
    West,
    East,
    SouthWest,
    South,
    SouthEast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Top,
    Middle,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Left,
    Center,
    Right,
}

impl BoxAnchor {
    pub const ALL: [BoxAnchor; BOX_POINT_COUNT] = [
        BoxAnchor::NorthWest,
        BoxAnchor::North,
        BoxAnchor::NorthEast,
        BoxAnchor::West,
        BoxAnchor::East,
        BoxAnchor::SouthWest,
        BoxAnchor::South,
        BoxAnchor::SouthEast,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn row(self) -> Row {
        match self {
            BoxAnchor::NorthWest | BoxAnchor::North | BoxAnchor::NorthEast => Row::Top,
            BoxAnchor::West | BoxAnchor::East => Row::Middle,
            BoxAnchor::SouthWest | BoxAnchor::South | BoxAnchor::SouthEast => Row::Bottom,
        }
    }

    pub fn column(self) -> Column {
        match self {
            BoxAnchor::NorthWest | BoxAnchor::West | BoxAnchor::SouthWest => Column::Left,
            BoxAnchor::North | BoxAnchor::South => Column::Center,
            BoxAnchor::NorthEast | BoxAnchor::East | BoxAnchor::SouthEast => Column::Right,
        }
    }
}

/// `[NW, N, NE, W, E, SW, S, SE]` of a box. The center is not stored; `N.x` and `W.y` carry it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBoxPoints([Point; BOX_POINT_COUNT]);

impl BoundingBoxPoints {
    pub fn new(points: [Point; BOX_POINT_COUNT]) -> Self {
        Self(points)
    }

    pub fn from_rect(rect: Rect) -> Self {
        let xs = [rect.min_x(), rect.center().x, rect.max_x()];
        let ys = [rect.min_y(), rect.center().y, rect.max_y()];
        let mut points = [Point::zero(); BOX_POINT_COUNT];
        let mut slot = 0;
        for (row, &y) in ys.iter().enumerate() {
            for (col, &x) in xs.iter().enumerate() {
                if row == 1 && col == 1 {
                    continue;
                }
                points[slot] = point(x, y);
                slot += 1;
            }
        }
        Self(points)
    }

    pub fn try_from_slice(points: &[Point]) -> Result<Self> {
        let points: [Point; BOX_POINT_COUNT] =
            points.try_into().map_err(|_| Error::BoundingBoxArity {
                count: points.len(),
            })?;
        if !points.iter().all(|p| is_finite_point(*p)) {
            return Err(Error::NonFinite {
                what: "bounding box",
            });
        }
        Ok(Self(points))
    }

    pub fn points(&self) -> &[Point; BOX_POINT_COUNT] {
        &self.0
    }

    pub fn get(&self, anchor: BoxAnchor) -> Point {
        self.0[anchor.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (BoxAnchor, Point)> + '_ {
        BoxAnchor::ALL.iter().map(|&anchor| (anchor, self.get(anchor)))
    }

    pub fn center(&self) -> Point {
        point(self.get(BoxAnchor::North).x, self.get(BoxAnchor::West).y)
    }

    pub fn translate(&self, by: Vector) -> Self {
        Self(self.0.map(|p| p + by))
    }

    /// The four outline edges, spanned by the NW and SE corners.
    pub fn edges(&self) -> [Segment; 4] {
        let nw = self.get(BoxAnchor::NorthWest);
        let se = self.get(BoxAnchor::SouthEast);
        [
            Segment::new(nw, point(se.x, nw.y)),
            Segment::new(nw, point(nw.x, se.y)),
            Segment::new(point(se.x, nw.y), se),
            Segment::new(point(nw.x, se.y), se),
        ]
    }
}

impl std::ops::Index<BoxAnchor> for BoundingBoxPoints {
    type Output = Point;

    fn index(&self, anchor: BoxAnchor) -> &Point {
        &self.0[anchor.index()]
    }
}

impl From<Rect> for BoundingBoxPoints {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}
