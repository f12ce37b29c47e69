use serde::{Deserialize, Serialize};

/// Unit marker for canvas (document) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CanvasSpace;

pub type Point = euclid::Point2D<f64, CanvasSpace>;
pub type Vector = euclid::Vector2D<f64, CanvasSpace>;
pub type Rect = euclid::Rect<f64, CanvasSpace>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

pub fn rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    euclid::rect(x, y, width, height)
}

/// One of the two canvas axes. Per-axis logic is written once over this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const BOTH: [Axis; 2] = [Axis::X, Axis::Y];

    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    pub fn of(self, p: Point) -> f64 {
        match self {
            Axis::X => p.x,
            Axis::Y => p.y,
        }
    }

    pub fn set(self, p: &mut Point, value: f64) {
        match self {
            Axis::X => p.x = value,
            Axis::Y => p.y = value,
        }
    }

    pub fn set_vector(self, v: &mut Vector, value: f64) {
        match self {
            Axis::X => v.x = value,
            Axis::Y => v.y = value,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An axis-aligned segment, used for object outline edges and guide lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// The axis whose coordinate is constant along the segment, if any.
    pub fn fixed_axis(&self) -> Option<Axis> {
        if self.from.x == self.to.x {
            Some(Axis::X)
        } else if self.from.y == self.to.y {
            Some(Axis::Y)
        } else {
            None
        }
    }

    /// Chebyshev length; guide segments are axis-aligned so this is their length.
    pub fn length(&self) -> f64 {
        (self.to.x - self.from.x)
            .abs()
            .max((self.to.y - self.from.y).abs())
    }

    pub fn midpoint(&self) -> Point {
        self.from.lerp(self.to, 0.5)
    }

    /// Whether both segments lie on the same axis-aligned line and their extents overlap.
    pub fn coincides(&self, other: &Segment) -> bool {
        let (Some(axis), Some(other_axis)) = (self.fixed_axis(), other.fixed_axis()) else {
            return false;
        };
        if axis != other_axis || axis.of(self.from) != axis.of(other.from) {
            return false;
        }
        let along = axis.other();
        let (a0, a1) = min_max(along.of(self.from), along.of(self.to));
        let (b0, b1) = min_max(along.of(other.from), along.of(other.to));
        a0.max(b0) <= a1.min(b1)
    }
}

fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

pub(crate) fn is_finite_point(p: Point) -> bool {
    p.x.is_finite() && p.y.is_finite()
}
