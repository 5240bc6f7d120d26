//! Span, offset and shift of an axis in its (base, perp) frame.

use std::f64::consts::FRAC_PI_2;

use glam::dvec2;

use super::frame::AxisFrame;
use crate::defaults::{MAX_DOMAIN, MAX_TRY, POINT_MATCH_TOLERANCE, ZERO_TOL};
use crate::errors::GeometryError;
use crate::geometry::Line;
use crate::types::Point;

/// Whole domain tiles crossed before the axis hits a lattice point again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCounts {
    /// Tiles along the base edge
    pub base: u32,
    /// Tiles across the base edge
    pub prep: u32,
}

/// A matched repeat: the axis runs from the origin to the lattice point
/// `(base_length, prep_length)` in the (base, perp) frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpanSolution {
    pub counts: TileCounts,
    pub base_length: f64,
    pub prep_length: f64,
}

impl SpanSolution {
    pub fn span(&self) -> f64 {
        dvec2(self.base_length, self.prep_length).length()
    }

    /// Reduced angle the matched lattice point actually lies at.
    pub fn exact_angle(&self) -> f64 {
        self.prep_length.atan2(self.base_length)
    }
}

/// Find the smallest number of rows after which the axis lands on a lattice
/// point within `POINT_MATCH_TOLERANCE`.
pub fn solve_span(frame: &AxisFrame) -> Result<SpanSolution, GeometryError> {
    let base = frame.base_extent;
    if frame.angle == 0.0 {
        return Ok(SpanSolution {
            counts: TileCounts { base: 1, prep: 1 },
            base_length: base,
            prep_length: 0.0,
        });
    }

    let run_per_row = frame.perp_extent * (FRAC_PI_2 - frame.angle).tan();
    for rep in 1..MAX_TRY {
        let prep_length = frame.perp_extent * rep as f64;
        // the span is at least this long, so nothing further is acceptable
        if prep_length > MAX_DOMAIN {
            break;
        }
        let projected = run_per_row * rep as f64;
        let remainder = projected % base;
        if remainder <= POINT_MATCH_TOLERANCE || remainder >= base - POINT_MATCH_TOLERANCE {
            let tiles = (projected / base).round();
            return Ok(SpanSolution {
                counts: TileCounts {
                    base: tiles as u32,
                    prep: rep,
                },
                base_length: tiles * base,
                prep_length,
            });
        }
    }
    Err(GeometryError::CannotDetermineSpan)
}

/// Perpendicular distance between neighbouring parallel lines, signed by
/// the quadrant's offset direction.
pub fn solve_offset(frame: &AxisFrame, counts: TileCounts) -> f64 {
    if frame.angle == 0.0 {
        frame.perp_extent
    } else {
        (frame.base_extent * frame.angle.sin() / counts.prep as f64).abs() * frame.offset_direction
    }
}

/// Along-axis stagger from one parallel line to the next.
///
/// With a single row the next line starts one base edge further on. With
/// several rows the next line is found by walking the domain lattice for the
/// first point it passes through.
pub fn solve_shift(frame: &AxisFrame, counts: TileCounts, offset: f64) -> Result<f64, GeometryError> {
    if counts.prep == 1 {
        return Ok((frame.base_extent * frame.angle.cos()).abs() * frame.shift_direction);
    }

    let (sin, cos) = frame.angle.sin_cos();
    let step = dvec2((offset * sin).abs(), -(offset * cos).abs());
    let next_line = frame.abstract_axis.translated(step);
    let grid_point = next_grid_point(&next_line, frame, counts)?;
    Ok(next_line.start().distance_to(grid_point) * frame.shift_direction)
}

fn next_grid_point(line: &Line, frame: &AxisFrame, counts: TileCounts) -> Result<Point, GeometryError> {
    for i in 0..counts.base {
        for j in 0..counts.prep {
            let point = Point::new(frame.base_extent * i as f64, frame.perp_extent * j as f64);
            if line.point_on_line(point, ZERO_TOL) {
                return Ok(point);
            }
        }
    }
    Err(GeometryError::CannotDetermineNextGrid)
}
