//! The repeat tile of a pattern and the angles it can tile at.
//!
//! A [`Domain`] is the rectangle `[0, max_u] × [0, max_v]`. Lines at a *safe
//! angle* leave the origin and hit a corner of the tiled domain grid within
//! [`MAX_DOMAIN`] units, which is what lets the axis solver find a finite,
//! rational repeat.

use std::collections::BTreeSet;
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use crate::defaults::{DOMAIN_RESOLUTION, MAX_DOMAIN, RESOLUTION, round_to};
use crate::errors::GeometryError;
use crate::geometry::Line;
use crate::log::debug;
use crate::types::{NumericError, Point, check_positive};

/// One rectangular repeat unit. Immutable once built.
#[derive(Clone, Debug)]
pub struct Domain {
    max_u: f64,
    max_v: f64,
    diagonal: Line,
    boundary_lines: [Line; 4],
    safe_angles: Vec<f64>,
}

impl Domain {
    /// Build a domain from the tile width and height.
    ///
    /// Both extents are rounded to [`DOMAIN_RESOLUTION`] digits so repeated
    /// use of the same nominal size never drifts.
    pub fn try_new(max_u: f64, max_v: f64) -> Result<Self, NumericError> {
        let max_u = round_to(check_positive(max_u)?, DOMAIN_RESOLUTION);
        let max_v = round_to(check_positive(max_v)?, DOMAIN_RESOLUTION);
        // a positive value below the domain resolution rounds away
        check_positive(max_u)?;
        check_positive(max_v)?;

        let origin = Point::ORIGIN;
        let max_u_point = Point::new(max_u, 0.0);
        let max_v_point = Point::new(0.0, max_v);
        let top_right = Point::new(max_u, max_v);

        let mut domain = Domain {
            max_u,
            max_v,
            diagonal: Line::new(origin, top_right),
            boundary_lines: [
                Line::new(origin, max_u_point),
                Line::new(origin, max_v_point),
                Line::new(max_u_point, top_right),
                Line::new(max_v_point, top_right),
            ],
            safe_angles: Vec::new(),
        };
        domain.safe_angles = domain.calculate_safe_angles();
        Ok(domain)
    }

    fn calculate_safe_angles(&self) -> Vec<f64> {
        let diagonal_angle = self.diagonal.angle();
        let mut angles = vec![0.0, diagonal_angle, FRAC_PI_2, PI - diagonal_angle, PI];

        let limit = MAX_DOMAIN / 2.0;
        let mut u_mult = 1u32;
        while self.max_u * u_mult as f64 <= limit {
            let mut v_mult = 1u32;
            while self.max_v * v_mult as f64 <= limit {
                if u_mult != v_mult {
                    let corner = Point::new(self.max_u * u_mult as f64, self.max_v * v_mult as f64);
                    let angle = Line::new(Point::ORIGIN, corner).angle();
                    angles.push(angle);
                    angles.push(PI - angle);
                }
                v_mult += 1;
            }
            u_mult += 1;
        }
        angles
    }

    #[inline]
    pub fn max_u(&self) -> f64 {
        self.max_u
    }

    #[inline]
    pub fn max_v(&self) -> f64 {
        self.max_v
    }

    /// Line from the origin to the top-right corner.
    pub fn diagonal(&self) -> &Line {
        &self.diagonal
    }

    /// Bottom, left, right and top edges, in that order.
    pub fn boundary_lines(&self) -> &[Line; 4] {
        &self.boundary_lines
    }

    /// Seed angles first (0, diagonal, π/2, π − diagonal, π), then the
    /// generated lattice angles in multiplier order.
    pub fn safe_angles(&self) -> &[f64] {
        &self.safe_angles
    }

    /// Boundary-inclusive containment, judged at [`RESOLUTION`] digits.
    pub fn contains(&self, point: Point) -> bool {
        let p = point.rounded();
        let max_u = round_to(self.max_u, RESOLUTION);
        let max_v = round_to(self.max_v, RESOLUTION);
        (0.0..=max_u).contains(&p.u) && (0.0..=max_v).contains(&p.v)
    }

    /// Clip the infinite line through `line` to the domain rectangle.
    ///
    /// The chord's endpoints come back in ascending point order so the
    /// resulting direction does not depend on how the input was drawn.
    pub fn intersect(&self, line: &Line) -> Result<Line, GeometryError> {
        let mut points = BTreeSet::new();
        for boundary in &self.boundary_lines {
            match boundary.intersect(line) {
                Ok(point) if self.contains(point) => {
                    points.insert(point);
                }
                Ok(_) => {}
                Err(err) => {
                    debug!(%err, %line, "boundary intersection skipped");
                }
            }
        }

        if points.len() != 2 {
            return Err(GeometryError::LinesDoNotIntersect {
                count: points.len(),
            });
        }
        let mut points = points.into_iter();
        match (points.next(), points.next()) {
            (Some(start), Some(end)) => {
                debug!(%line, %start, %end, "domain chord");
                Ok(Line::new(start, end))
            }
            _ => Err(GeometryError::LinesDoNotIntersect { count: 0 }),
        }
    }

    /// Nearest safe angle to `bad_angle`; ties go to the earlier entry.
    pub fn get_safe_angle(&self, bad_angle: f64) -> f64 {
        self.safe_angles
            .iter()
            .copied()
            .min_by(|a, b| (a - bad_angle).abs().total_cmp(&(b - bad_angle).abs()))
            .unwrap_or(bad_angle)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Domain U:{:.10} V:{:.10}", self.max_u, self.max_v)
    }
}
