//! Turn line segments drawn inside one repeat tile into an exactly repeating
//! fill pattern.
//!
//! Each distinct line direction becomes a [`FillGrid`]: an angle, an origin,
//! the spacing between parallel lines (offset), the stagger along the line
//! (shift) and a dash/gap pair. The grids are handed to a host application
//! through [`PatternHost`] or written as `.pat` text.
//!
//! ```no_run
//! let output = patmaker::make_pattern(
//!     "pattern \"Diagonal\"\n\
//!      domain 1, 1\n\
//!      line (0, 0) to (1, 1)\n",
//! )?;
//! print!("{}", output.definition);
//! # Ok::<(), miette::Report>(())
//! ```

pub mod ast;
pub mod compile;
pub mod defaults;
pub mod domain;
pub mod errors;
pub mod geometry;
pub mod grid;
pub mod host;
mod log;
pub mod parse;
pub mod pat;
pub mod pattern;
pub mod types;

use pest_derive::Parser;

pub use compile::{PatternInput, PatternOutput};
pub use domain::Domain;
pub use errors::{GeometryError, SourceContext, SourceError};
pub use geometry::Line;
pub use grid::GridAxis;
pub use host::{HostOrientation, PatternDefinition, PatternHost, PatternTarget};
pub use pattern::{AxisFailure, FillGrid, LabeledLine, PatternResult, assemble};
pub use types::{NumericError, Point, Scale};

#[derive(Parser)]
#[grammar = "patsource.pest"]
pub struct PatternParser;

/// Build a pattern from source text.
///
/// Returns the solved pattern on success, or an error with diagnostics.
/// Lines that cannot be turned into a grid do not fail the call; they are
/// listed in [`PatternResult::failures`].
pub fn make_pattern(source: &str) -> Result<PatternOutput, miette::Report> {
    make_pattern_named("<input>", source)
}

/// Like [`make_pattern`], with `name` used as the file name in diagnostics.
pub fn make_pattern_named(name: &str, source: &str) -> Result<PatternOutput, miette::Report> {
    let ctx = SourceContext::new(name, source);
    let program = parse::parse(&ctx)?;
    let input = compile::compile(&program, &ctx)?;
    Ok(input.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    #[test]
    fn parse_minimal_source() {
        let input = "domain 1, 1";
        let result = PatternParser::parse(Rule::program, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_labeled_line() {
        let input = "A: line (0, 0) to (1, 1)";
        let result = PatternParser::parse(Rule::program, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_case_insensitive_keywords() {
        let input = "PATTERN \"X\" Model TO_HOST\nDomain 1, 1";
        let result = PatternParser::parse(Rule::program, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn make_pattern_diagonal() {
        let output = make_pattern("domain 1, 1\nline (0, 0) to (1, 1)").unwrap();
        assert_eq!(output.definition.name, "Untitled");
        assert_eq!(output.definition.grids.len(), 1);
        assert!(output.result.is_complete());
    }

    #[test]
    fn make_pattern_reports_file_name() {
        let report = make_pattern_named("tile.hatch", "line (0, 0) to (1, 1)").unwrap_err();
        match report.downcast_ref::<SourceError>() {
            Some(SourceError::MissingDomain { src }) => assert_eq!(src.name(), "tile.hatch"),
            other => panic!("expected missing domain, got {other:?}"),
        }
    }
}
