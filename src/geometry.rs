//! Line segments: angle folding, intersection, rotation and on-line tests.

use std::f64::consts::PI;
use std::fmt;

use glam::{DVec2, dvec2};

use crate::defaults::ANGLE_MATCH_TOLERANCE;
use crate::errors::GeometryError;
use crate::types::Point;

/// Fold an angle into `[0, π)`; a line and its reverse are the same axis.
pub fn fold_angle(angle: f64) -> f64 {
    let folded = angle.rem_euclid(PI);
    // rem_euclid can round up to exactly PI for tiny negative inputs
    if folded >= PI { 0.0 } else { folded }
}

/// A line segment between two distinct points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Line {
    start: Point,
    end: Point,
}

impl Line {
    /// Create a line (unchecked).
    /// Use `try_new` for user-provided values.
    #[inline]
    pub(crate) const fn new(start: Point, end: Point) -> Self {
        Line { start, end }
    }

    /// Create a line, rejecting coincident endpoints.
    pub fn try_new(start: Point, end: Point) -> Result<Self, GeometryError> {
        if start == end {
            Err(GeometryError::DegenerateLine)
        } else {
            Ok(Line { start, end })
        }
    }

    /// Convenience constructor from raw coordinates.
    pub fn from_coords(u1: f64, v1: f64, u2: f64, v2: f64) -> Result<Self, GeometryError> {
        Line::try_new(Point::new(u1, v1), Point::new(u2, v2))
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    /// Vector from start to end
    #[inline]
    pub fn delta(&self) -> DVec2 {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.delta().length()
    }

    /// Unit vector from start to end
    pub fn direction(&self) -> DVec2 {
        self.delta().normalize()
    }

    /// Undirected angle in `[0, π)`.
    pub fn angle(&self) -> f64 {
        let d = self.delta();
        fold_angle(d.y.atan2(d.x))
    }

    pub fn center(&self) -> Point {
        Point::from_vec((self.start.to_vec() + self.end.to_vec()) * 0.5)
    }

    /// Intersection of the infinite lines through `self` and `other`.
    pub fn intersect(&self, other: &Line) -> Result<Point, GeometryError> {
        let d1 = self.delta();
        let d2 = other.delta();
        let denom = d1.perp_dot(d2);
        // compare the sine of the enclosed angle so the test is scale free
        if denom.abs() <= ANGLE_MATCH_TOLERANCE * d1.length() * d2.length() {
            return Err(GeometryError::NoIntersection);
        }
        let t = (other.start - self.start).perp_dot(d2) / denom;
        let point = self.start + d1 * t;
        if point.u.is_finite() && point.v.is_finite() {
            Ok(point)
        } else {
            Err(GeometryError::NoIntersection)
        }
    }

    /// This line rotated by `angle` radians about `pivot`.
    pub fn rotated(&self, pivot: Point, angle: f64) -> Line {
        let rotation = DVec2::from_angle(angle);
        let turn = |p: Point| pivot + rotation.rotate(p - pivot);
        Line::new(turn(self.start), turn(self.end))
    }

    /// This line moved by `offset`.
    pub fn translated(&self, offset: DVec2) -> Line {
        Line::new(self.start + offset, self.end + offset)
    }

    /// Perpendicular distance from `point` to the infinite line.
    pub fn distance_to_point(&self, point: Point) -> f64 {
        self.direction().perp_dot(point - self.start).abs()
    }

    /// Whether `point` lies within `tolerance` of the infinite line.
    pub fn point_on_line(&self, point: Point, tolerance: f64) -> bool {
        self.distance_to_point(point) <= tolerance
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.start, self.end)
    }
}

/// Segment from the origin along `angle` with unit length.
pub(crate) fn unit_ray(angle: f64) -> Line {
    Line::new(Point::ORIGIN, Point::from_vec(dvec2(angle.cos(), angle.sin())))
}
