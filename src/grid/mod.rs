//! Periodic axes: turning one raw line into an exactly repeating grid line.
//!
//! [`GridAxis::new`] snaps the seed to the nearest safe angle, clips it to the
//! domain and searches for the span, offset and shift that make it tile. When
//! a candidate angle has no acceptable solution the seed is rotated by a
//! small, growing amount ("jiggled") and the search starts over.

mod frame;
mod solve;

use std::fmt;

pub use frame::{AxisFrame, Quadrant};
pub use solve::TileCounts;

use crate::defaults::{
    ANGLE_MATCH_TOLERANCE, MAX_DOMAIN, MAX_JIGGLE_STEPS, ZERO_TOL, jiggle_step,
};
use crate::domain::Domain;
use crate::errors::GeometryError;
use crate::geometry::Line;
use crate::log::debug;
use crate::pattern::FillGrid;
use crate::types::{Point, Scale};

/// One family of parallel pattern lines.
#[derive(Debug, Clone)]
pub struct GridAxis {
    axis: Line,
    frame: AxisFrame,
    span: f64,
    offset: f64,
    shift: f64,
    tile_counts: TileCounts,
    jiggle_count: u32,
    segment_lines: Vec<Line>,
}

/// A candidate that passed every check.
struct Solution {
    axis: Line,
    frame: AxisFrame,
    span: f64,
    offset: f64,
    shift: f64,
    tile_counts: TileCounts,
}

/// Rotation applied on jiggle attempt `attempt`: +1, −2, +3, −4 ... steps.
fn jiggle_angle(attempt: u32) -> f64 {
    let magnitude = attempt as f64 * jiggle_step();
    if attempt % 2 == 0 { -magnitude } else { magnitude }
}

/// Rotate `line` about its center onto `target` unless it is already there.
fn rotate_to(line: Line, target: f64) -> Line {
    let adjust = target - line.angle();
    if adjust.abs() > ANGLE_MATCH_TOLERANCE {
        line.rotated(line.center(), adjust)
    } else {
        line
    }
}

fn solve(candidate: Line, domain: &Domain) -> Result<Solution, GeometryError> {
    let snapped = rotate_to(candidate, domain.get_safe_angle(candidate.angle()));
    let chord = domain.intersect(&snapped)?;
    let frame = AxisFrame::new(&chord, domain);
    let span = solve::solve_span(&frame)?;

    // the span search tolerates a little slack; pin the axis to the exact
    // lattice direction so the shift search below can hit lattice points
    let exact = rotate_to(snapped, frame.quadrant.unreduce(span.exact_angle()));
    let axis = domain.intersect(&exact)?;
    let frame = AxisFrame::new(&axis, domain);

    let offset = solve::solve_offset(&frame, span.counts);
    let shift = solve::solve_shift(&frame, span.counts, offset)?;

    if span.span() > MAX_DOMAIN {
        return Err(GeometryError::CannotDetermineSpan);
    }
    if shift.abs() > MAX_DOMAIN {
        return Err(GeometryError::CannotDetermineNextGrid);
    }

    Ok(Solution {
        axis,
        frame,
        span: span.span(),
        offset,
        shift,
        tile_counts: span.counts,
    })
}

impl GridAxis {
    /// Build the axis for `line`, jiggling it when its angle does not tile.
    ///
    /// Fails with [`GeometryError::CannotDetermineApproximateAxis`] once the
    /// jiggle budget is spent.
    pub fn new(line: Line, domain: &Domain) -> Result<Self, GeometryError> {
        let center = line.center();
        let mut attempt = 0;
        loop {
            let candidate = if attempt == 0 {
                line
            } else {
                line.rotated(center, jiggle_angle(attempt))
            };

            match solve(candidate, domain) {
                Ok(solution) => {
                    debug!(%line, attempt, span = solution.span, "axis solved");
                    return Ok(GridAxis {
                        axis: solution.axis,
                        frame: solution.frame,
                        span: solution.span,
                        offset: solution.offset,
                        shift: solution.shift,
                        tile_counts: solution.tile_counts,
                        jiggle_count: attempt,
                        segment_lines: vec![line],
                    });
                }
                Err(err) if err.is_retryable() => {
                    debug!(%line, attempt, %err, "candidate rejected, jiggling");
                }
                Err(err) => return Err(err),
            }

            if attempt >= MAX_JIGGLE_STEPS {
                return Err(GeometryError::CannotDetermineApproximateAxis { attempts: attempt });
            }
            attempt += 1;
        }
    }

    /// The accepted chord of the domain, endpoints in ascending order.
    pub fn axis(&self) -> &Line {
        &self.axis
    }

    pub fn quadrant(&self) -> Quadrant {
        self.frame.quadrant
    }

    /// Angle from the base edge, in `[0, π/2]`.
    pub fn angle(&self) -> f64 {
        self.frame.angle
    }

    pub fn offset_direction(&self) -> f64 {
        self.frame.offset_direction
    }

    pub fn shift_direction(&self) -> f64 {
        self.frame.shift_direction
    }

    pub fn abstract_axis(&self) -> &Line {
        &self.frame.abstract_axis
    }

    /// Along-axis length after which the pattern repeats.
    pub fn span(&self) -> f64 {
        self.span
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn shift(&self) -> f64 {
        self.shift
    }

    pub fn tile_count_base(&self) -> u32 {
        self.tile_counts.base
    }

    pub fn tile_count_prep(&self) -> u32 {
        self.tile_counts.prep
    }

    /// Jiggles it took to find this axis; zero when the seed tiled as drawn.
    pub fn jiggle_count(&self) -> u32 {
        self.jiggle_count
    }

    /// The seed line first, then every line merged into this axis.
    pub fn segment_lines(&self) -> &[Line] {
        &self.segment_lines
    }

    /// Endpoint of any segment line closest to the start of the axis.
    pub fn origin(&self) -> Point {
        let start = self.axis.start();
        self.segment_lines
            .iter()
            .flat_map(|line| [line.start(), line.end()])
            .min_by(|a, b| a.distance_to(start).total_cmp(&b.distance_to(start)))
            .unwrap_or(start)
    }

    /// Dash and gap lengths: the seed line, then the rest of the span.
    pub fn segments(&self) -> [f64; 2] {
        let dash = self.segment_lines.first().map_or(0.0, Line::length);
        [dash, self.span - dash]
    }

    /// Merge `line` into this axis if it lies on the axis' infinite line.
    pub fn add_segment(&mut self, line: Line) -> bool {
        let on_axis = self.axis.point_on_line(line.start(), ZERO_TOL)
            && self.axis.point_on_line(line.end(), ZERO_TOL);
        if on_axis {
            debug!(%line, axis = %self.axis, "merged into existing axis");
            self.segment_lines.push(line);
        }
        on_axis
    }

    /// Grid descriptor for this axis with lengths and origin scaled.
    pub fn fill_grid(&self, scale: Scale) -> FillGrid {
        FillGrid {
            angle: self.axis.angle(),
            origin: scale.point(self.origin()),
            offset: scale.apply(self.offset),
            shift: scale.apply(self.shift),
            segments: self.segments().map(|s| scale.apply(s)),
        }
    }
}

impl fmt::Display for GridAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GridAxis {} angle={:.6} span={:.6} offset={:.6} shift={:.6} tiles={}x{}",
            self.axis,
            self.frame.angle,
            self.span,
            self.offset,
            self.shift,
            self.tile_counts.base,
            self.tile_counts.prep
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, SQRT_2};

    fn line(u1: f64, v1: f64, u2: f64, v2: f64) -> Line {
        Line::from_coords(u1, v1, u2, v2).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn horizontal_seed() {
        let domain = Domain::try_new(2.0, 1.0).unwrap();
        let axis = GridAxis::new(line(0.0, 0.0, 2.0, 0.0), &domain).unwrap();
        assert_eq!(axis.angle(), 0.0);
        assert_eq!(axis.tile_count_prep(), 1);
        assert_eq!(axis.offset(), 1.0);
        assert_eq!(axis.shift(), 2.0);
        assert_eq!(axis.span(), 2.0);
        assert_eq!(axis.jiggle_count(), 0);
        assert_eq!(axis.segments(), [2.0, 0.0]);
    }

    #[test]
    fn diagonal_seed_spans_the_diagonal() {
        let domain = Domain::try_new(1.0, 1.0).unwrap();
        let axis = GridAxis::new(line(0.0, 0.0, 1.0, 1.0), &domain).unwrap();
        assert_eq!(axis.quadrant(), Quadrant::First);
        assert!(close(axis.angle(), FRAC_PI_4));
        assert_eq!(axis.tile_count_base(), 1);
        assert_eq!(axis.tile_count_prep(), 1);
        assert!(close(axis.span(), domain.diagonal().length()));
        assert!(close(axis.offset().abs(), SQRT_2 / 2.0));
        assert!(close(axis.shift(), SQRT_2 / 2.0));
        let [dash, gap] = axis.segments();
        assert!(close(dash, SQRT_2));
        assert!(gap.abs() < 1e-9);
    }

    #[test]
    fn vertical_seed_uses_v_edge_as_base() {
        let domain = Domain::try_new(2.0, 1.0).unwrap();
        let axis = GridAxis::new(line(0.5, 0.0, 0.5, 1.0), &domain).unwrap();
        assert_eq!(axis.quadrant(), Quadrant::Second);
        assert_eq!(axis.angle(), 0.0);
        assert_eq!(axis.span(), 1.0);
        assert_eq!(axis.offset(), 2.0);
        assert_eq!(axis.shift(), 1.0);
        assert_eq!(axis.origin(), Point::new(0.5, 0.0));
        assert!(close(axis.axis().angle(), FRAC_PI_2));
    }

    #[test]
    fn anti_diagonal_is_fourth_quadrant() {
        let domain = Domain::try_new(1.0, 1.0).unwrap();
        let axis = GridAxis::new(line(0.0, 1.0, 1.0, 0.0), &domain).unwrap();
        assert_eq!(axis.quadrant(), Quadrant::Fourth);
        assert!(close(axis.offset(), SQRT_2 / 2.0));
        assert!(close(axis.shift(), SQRT_2 / 2.0));
    }

    #[test]
    fn steep_backslash_is_third_quadrant() {
        let domain = Domain::try_new(1.0, 1.0).unwrap();
        let axis = GridAxis::new(line(1.0, 0.0, 0.0, 2.0), &domain).unwrap();
        assert_eq!(axis.quadrant(), Quadrant::Third);
        assert!(close(axis.angle(), 0.5f64.atan()));
        assert_eq!(axis.tile_count_base(), 2);
        assert_eq!(axis.tile_count_prep(), 1);
        assert!(close(axis.span(), 5f64.sqrt()));
        assert!(close(axis.offset(), -1.0 / 5f64.sqrt()));
        assert!(close(axis.shift(), 2.0 / 5f64.sqrt()));
    }

    #[test]
    fn multi_row_axis() {
        let domain = Domain::try_new(1.0, 1.0).unwrap();
        let axis = GridAxis::new(line(0.0, 0.0, 1.0, 2.0 / 3.0), &domain).unwrap();
        assert_eq!(axis.tile_count_base(), 3);
        assert_eq!(axis.tile_count_prep(), 2);
        assert!(close(axis.span(), 13f64.sqrt()));
        assert!(close(axis.shift(), 8.0 / 13f64.sqrt()));
    }

    #[test]
    fn corner_touching_seed_is_jiggled_onto_a_lattice_angle() {
        let domain = Domain::try_new(1.0, 1.0).unwrap();
        // only touches the corner (1, 1); small jiggles snap straight back
        let axis = GridAxis::new(line(1.0, 1.0, 2.0, 0.0), &domain).unwrap();
        assert_eq!(axis.jiggle_count(), 5);
        assert_eq!(axis.quadrant(), Quadrant::Fourth);
        assert_eq!(axis.tile_count_base(), 50);
        assert_eq!(axis.tile_count_prep(), 49);
        assert!(axis.span() <= MAX_DOMAIN);
        assert!(axis.shift().abs() <= MAX_DOMAIN);
    }

    #[test]
    fn line_outside_domain_exhausts_jiggles() {
        let domain = Domain::try_new(1.0, 1.0).unwrap();
        let err = GridAxis::new(line(101.0, 200.0, 102.0, 201.0), &domain).unwrap_err();
        assert_eq!(
            err,
            GeometryError::CannotDetermineApproximateAxis {
                attempts: MAX_JIGGLE_STEPS
            }
        );
    }

    #[test]
    fn jiggle_sequence_alternates_and_grows() {
        let step = jiggle_step();
        assert!(close(jiggle_angle(1), step));
        assert!(close(jiggle_angle(2), -2.0 * step));
        assert!(close(jiggle_angle(3), 3.0 * step));
    }

    #[test]
    fn collinear_lines_merge() {
        let domain = Domain::try_new(2.0, 1.0).unwrap();
        let mut axis = GridAxis::new(line(0.0, 0.0, 1.0, 0.0), &domain).unwrap();
        assert!(axis.add_segment(line(1.5, 0.0, 2.0, 0.0)));
        assert!(!axis.add_segment(line(0.0, 0.5, 2.0, 0.5)));
        assert_eq!(axis.segment_lines().len(), 2);
        assert_eq!(axis.segments(), [1.0, 1.0]);
        assert_eq!(axis.origin(), Point::ORIGIN);
    }

    #[test]
    fn seed_line_is_kept_unchanged() {
        let domain = Domain::try_new(1.0, 1.0).unwrap();
        let seed = line(0.2, 0.2, 0.4, 0.4);
        let axis = GridAxis::new(seed, &domain).unwrap();
        assert_eq!(axis.segment_lines()[0], seed);
        assert_eq!(axis.origin(), Point::new(0.2, 0.2));
        assert!(close(axis.segments()[0], 0.2 * SQRT_2));
    }

    #[test]
    fn fill_grid_scales_lengths_not_angle() {
        let domain = Domain::try_new(2.0, 1.0).unwrap();
        let axis = GridAxis::new(line(0.0, 0.0, 2.0, 0.0), &domain).unwrap();
        let grid = axis.fill_grid(Scale::try_new(10.0).unwrap());
        assert_eq!(grid.angle, 0.0);
        assert_eq!(grid.offset, 10.0);
        assert_eq!(grid.shift, 20.0);
        assert_eq!(grid.segments, [20.0, 0.0]);
        assert_eq!(grid.origin, Point::ORIGIN);
    }
}
