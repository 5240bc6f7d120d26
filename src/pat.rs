//! `.pat` text for a pattern definition.
//!
//! ```text
//! *Name
//! ;%TYPE=MODEL
//! angle, origin-u, origin-v, shift, offset[, dash, -gap]
//! ```
//!
//! Angles are in degrees. A line without a dash list is continuous.

use std::fmt;

use crate::defaults::ZERO_TOL;
use crate::host::PatternDefinition;
use crate::pattern::FillGrid;

/// Six-decimal number with negative zero printed as zero.
struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format!("{:.6}", self.0);
        match text.strip_prefix('-') {
            Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => f.write_str(rest),
            _ => f.write_str(&text),
        }
    }
}

fn write_grid(f: &mut fmt::Formatter<'_>, grid: &FillGrid) -> fmt::Result {
    write!(
        f,
        "{}, {}, {}, {}, {}",
        Num(grid.angle.to_degrees()),
        Num(grid.origin.u),
        Num(grid.origin.v),
        Num(grid.shift),
        Num(grid.offset)
    )?;
    let [dash, gap] = grid.segments;
    if gap.abs() > ZERO_TOL {
        write!(f, ", {}, {}", Num(dash), Num(-gap))?;
    }
    writeln!(f)
}

impl fmt::Display for PatternDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "*{}", self.name)?;
        writeln!(f, ";%TYPE={}", self.target)?;
        for grid in &self.grids {
            write_grid(f, grid)?;
        }
        Ok(())
    }
}
