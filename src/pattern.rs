//! Grouping raw lines into grid axes.

use crate::domain::Domain;
use crate::errors::GeometryError;
use crate::geometry::Line;
use crate::grid::GridAxis;
use crate::log::{debug, warn};
use crate::types::{Point, Scale};

/// Everything a host needs to draw one family of pattern lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FillGrid {
    /// Line direction in `[0, π)` radians
    pub angle: f64,
    pub origin: Point,
    /// Perpendicular spacing between parallel lines
    pub offset: f64,
    /// Along-axis stagger between parallel lines
    pub shift: f64,
    /// Dash length, then gap length
    pub segments: [f64; 2],
}

/// A line that did not become part of any axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisFailure {
    /// Position of the line in the input
    pub index: usize,
    pub label: Option<String>,
    pub line: Line,
    pub error: GeometryError,
}

/// One input line, optionally labelled for diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledLine {
    pub label: Option<String>,
    pub line: Line,
}

impl From<Line> for LabeledLine {
    fn from(line: Line) -> Self {
        LabeledLine { label: None, line }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PatternResult {
    pub axes: Vec<GridAxis>,
    pub failures: Vec<AxisFailure>,
}

impl PatternResult {
    /// One descriptor per axis, in the order the axes were created.
    pub fn fill_grids(&self, scale: Scale) -> Vec<FillGrid> {
        self.axes.iter().map(|axis| axis.fill_grid(scale)).collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Build axes for `lines` in order.
///
/// A line lying on an existing axis is merged into the first such axis.
/// Lines whose axis cannot be solved are recorded in
/// [`PatternResult::failures`] and the rest of the batch carries on.
pub fn assemble<I>(domain: &Domain, lines: I) -> PatternResult
where
    I: IntoIterator,
    I::Item: Into<LabeledLine>,
{
    let mut result = PatternResult::default();

    for (index, item) in lines.into_iter().enumerate() {
        let LabeledLine { label, line } = item.into();

        if result.axes.iter_mut().any(|axis| axis.add_segment(line)) {
            continue;
        }

        match GridAxis::new(line, domain) {
            Ok(axis) => {
                debug!(index, %axis, "new axis");
                result.axes.push(axis);
            }
            Err(error) => {
                warn!(index, label = label.as_deref(), %line, %error, "line dropped from pattern");
                result.failures.push(AxisFailure {
                    index,
                    label,
                    line,
                    error,
                });
            }
        }
    }

    result
}
