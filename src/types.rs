//! Validated numeric primitives and the tolerance-aware [`Point`].
//!
//! Points compare, order and hash on their coordinates rounded to
//! [`RESOLUTION`] decimal digits, so two intersection results that differ only
//! by floating noise collapse to one entry in a set.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

use glam::{DVec2, dvec2};

use crate::defaults::{RESOLUTION, round_to};

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
    /// Value is zero when non-zero required
    Zero,
    /// Value is negative when positive required
    Negative,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
            NumericError::Zero => write!(f, "value is zero"),
            NumericError::Negative => write!(f, "value is negative"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Reject NaN and infinities.
#[inline]
pub(crate) fn check_finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// Reject anything that is not a finite, strictly positive value.
#[inline]
pub(crate) fn check_positive(val: f64) -> Result<f64, NumericError> {
    let val = check_finite(val)?;
    if val == 0.0 {
        Err(NumericError::Zero)
    } else if val < 0.0 {
        Err(NumericError::Negative)
    } else {
        Ok(val)
    }
}

/// Uniform factor applied to grid origins, offsets, shifts and dashes
/// before they leave the crate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scale(f64);

impl Scale {
    pub const ONE: Scale = Scale(1.0);

    /// Create a Scale with validation (rejects NaN, infinite, zero, negative)
    pub fn try_new(factor: f64) -> Result<Self, NumericError> {
        check_positive(factor).map(Scale)
    }

    /// The inverse scale, used to bring host values back to domain units.
    pub fn inverse(self) -> Scale {
        Scale(1.0 / self.0)
    }

    #[inline]
    pub fn apply(self, value: f64) -> f64 {
        value * self.0
    }

    #[inline]
    pub fn point(self, p: Point) -> Point {
        Point::new(self.apply(p.u), self.apply(p.v))
    }

    #[inline]
    pub fn raw(self) -> f64 {
        self.0
    }
}

impl Default for Scale {
    fn default() -> Self {
        Scale::ONE
    }
}

/// A coordinate in domain-local (u, v) units.
#[derive(Clone, Copy, Debug, Default)]
pub struct Point {
    pub u: f64,
    pub v: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { u: 0.0, v: 0.0 };

    /// Create a point (unchecked).
    /// Use `try_new` for user-provided values.
    #[inline]
    pub const fn new(u: f64, v: f64) -> Self {
        Point { u, v }
    }

    /// Create a point with validation (rejects NaN/infinite coordinates)
    pub fn try_new(u: f64, v: f64) -> Result<Self, NumericError> {
        Ok(Point::new(check_finite(u)?, check_finite(v)?))
    }

    #[inline]
    pub fn from_vec(vec: DVec2) -> Self {
        Point::new(vec.x, vec.y)
    }

    #[inline]
    pub fn to_vec(self) -> DVec2 {
        dvec2(self.u, self.v)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        self.to_vec().distance(other.to_vec())
    }

    /// The point snapped to [`RESOLUTION`] digits.
    pub fn rounded(self) -> Point {
        Point::new(round_to(self.u, RESOLUTION), round_to(self.v, RESOLUTION))
    }

    /// Integer key used for equality, ordering and hashing.
    fn key(self) -> (i64, i64) {
        let factor = 10f64.powi(RESOLUTION);
        ((self.u * factor).round() as i64, (self.v * factor).round() as i64)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Point {}

impl Hash for Point {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for Point {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Point {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// Translate a point by a vector
impl Add<DVec2> for Point {
    type Output = Point;
    fn add(self, rhs: DVec2) -> Point {
        Point::new(self.u + rhs.x, self.v + rhs.y)
    }
}

/// Subtract two points to get the vector between them
impl Sub<Point> for Point {
    type Output = DVec2;
    fn sub(self, rhs: Point) -> DVec2 {
        dvec2(self.u - rhs.u, self.v - rhs.v)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.u, self.v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashSet};

    // ==================== Point tests ====================

    #[test]
    fn point_equality_ignores_noise_below_resolution() {
        let a = Point::new(0.1 + 0.2, 1.0);
        let b = Point::new(0.3, 1.0 - 1e-9);
        assert_eq!(a, b);
        assert_ne!(a, Point::new(0.300002, 1.0));
    }

    #[test]
    fn point_hash_set_deduplicates_near_duplicates() {
        let mut set = HashSet::new();
        set.insert(Point::new(1.0, 2.0));
        set.insert(Point::new(1.0 + 1e-10, 2.0 - 1e-10));
        set.insert(Point::new(2.0, 1.0));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn point_ordering_is_lexicographic() {
        let set: BTreeSet<Point> = [
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(0.0, 0.5),
        ]
        .into_iter()
        .collect();
        let ordered: Vec<Point> = set.into_iter().collect();
        assert_eq!(
            ordered,
            vec![Point::new(0.0, 0.5), Point::new(0.0, 1.0), Point::new(1.0, 0.0)]
        );
    }

    #[test]
    fn point_try_new_rejects_non_finite() {
        assert_eq!(Point::try_new(f64::NAN, 0.0), Err(NumericError::NaN));
        assert_eq!(Point::try_new(0.0, f64::INFINITY), Err(NumericError::Infinite));
        assert!(Point::try_new(-3.0, 4.0).is_ok());
    }

    #[test]
    fn point_minus_point_gives_vector() {
        let d = Point::new(5.0, 7.0) - Point::new(2.0, 3.0);
        assert_eq!(d, dvec2(3.0, 4.0));
        assert_eq!(Point::new(2.0, 3.0) + d, Point::new(5.0, 7.0));
        assert!((Point::new(2.0, 3.0).distance_to(Point::new(5.0, 7.0)) - 5.0).abs() < 1e-12);
    }

    // ==================== Scale tests ====================

    #[test]
    fn scale_try_new_valid() {
        assert!(Scale::try_new(12.0).is_ok());
        assert!(Scale::try_new(0.5).is_ok());
    }

    #[test]
    fn scale_try_new_rejects_invalid() {
        assert_eq!(Scale::try_new(0.0), Err(NumericError::Zero));
        assert_eq!(Scale::try_new(-1.0), Err(NumericError::Negative));
        assert_eq!(Scale::try_new(f64::NAN), Err(NumericError::NaN));
        assert_eq!(Scale::try_new(f64::INFINITY), Err(NumericError::Infinite));
    }

    #[test]
    fn scale_inverse_round_trips() {
        let scale = Scale::try_new(2.5).unwrap();
        let p = scale.point(Point::new(0.4, 1.2));
        assert_eq!(scale.inverse().point(p), Point::new(0.4, 1.2));
    }
}
