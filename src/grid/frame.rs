//! Quadrant classification of an axis chord.
//!
//! The solver works in a normalized (base, perp) frame: `base` is the domain
//! edge the axis leans toward and `angle` is measured from it, so the span,
//! offset and shift math is the same in every quadrant.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::defaults::ZERO_TOL;
use crate::domain::Domain;
use crate::geometry::{Line, unit_ray};

/// Which sector of `[0, π)` an axis falls in, split at the diagonal angle,
/// π/2 and π minus the diagonal angle.
///
/// Boundaries belong to the sector below them except π − diagonal, which
/// belongs to `Fourth` so both diagonals use the u edge as base.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    /// `[0, diagonal]`
    First,
    /// `(diagonal, π/2]`
    Second,
    /// `(π/2, π − diagonal)`
    Third,
    /// `[π − diagonal, π)`
    Fourth,
}

impl Quadrant {
    pub fn classify(axis_angle: f64, diagonal_angle: f64) -> Quadrant {
        if axis_angle <= diagonal_angle {
            Quadrant::First
        } else if axis_angle <= FRAC_PI_2 {
            Quadrant::Second
        } else if axis_angle < PI - diagonal_angle {
            Quadrant::Third
        } else {
            Quadrant::Fourth
        }
    }

    /// Whether the u edge (`max_u`) is the base for this sector.
    pub fn is_u_side(self) -> bool {
        matches!(self, Quadrant::First | Quadrant::Fourth)
    }

    pub fn offset_direction(self) -> f64 {
        match self {
            Quadrant::First | Quadrant::Third => -1.0,
            Quadrant::Second | Quadrant::Fourth => 1.0,
        }
    }

    pub fn shift_direction(self) -> f64 {
        1.0
    }

    /// Angle between the axis and its base edge.
    pub fn reduce(self, axis_angle: f64) -> f64 {
        match self {
            Quadrant::First => axis_angle,
            Quadrant::Second | Quadrant::Third => (FRAC_PI_2 - axis_angle).abs(),
            Quadrant::Fourth => PI - axis_angle,
        }
    }

    /// Axis angle for a reduced angle in this sector; inverse of [`reduce`](Self::reduce).
    pub fn unreduce(self, reduced: f64) -> f64 {
        match self {
            Quadrant::First => reduced,
            Quadrant::Second => FRAC_PI_2 - reduced,
            Quadrant::Third => FRAC_PI_2 + reduced,
            Quadrant::Fourth => PI - reduced,
        }
    }
}

/// Axis re-expressed in the quadrant-agnostic (base, perp) frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisFrame {
    pub quadrant: Quadrant,
    /// Domain extent along the base edge
    pub base_extent: f64,
    /// Domain extent across the base edge
    pub perp_extent: f64,
    pub offset_direction: f64,
    pub shift_direction: f64,
    /// Angle from the base edge in `[0, π/2]`, exactly zero near an edge
    pub angle: f64,
    /// Unit segment from the origin at `angle`
    pub abstract_axis: Line,
}

impl AxisFrame {
    pub fn new(axis: &Line, domain: &Domain) -> AxisFrame {
        let axis_angle = axis.angle();
        let quadrant = Quadrant::classify(axis_angle, domain.diagonal().angle());

        let (base_extent, perp_extent) = if quadrant.is_u_side() {
            (domain.max_u(), domain.max_v())
        } else {
            (domain.max_v(), domain.max_u())
        };

        let reduced = quadrant.reduce(axis_angle);
        // near-edge angles would blow up tan() in the span search
        let angle = if reduced < ZERO_TOL { 0.0 } else { reduced };

        AxisFrame {
            quadrant,
            base_extent,
            perp_extent,
            offset_direction: quadrant.offset_direction(),
            shift_direction: quadrant.shift_direction(),
            angle,
            abstract_axis: unit_ray(angle),
        }
    }
}
