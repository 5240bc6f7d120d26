//! Error types with rich diagnostics using miette
//!
//! Geometry errors are plain tagged variants the solver matches on to decide
//! between retrying and giving up. Source errors carry spans for the
//! pattern source format.

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::types::NumericError;

/// Source context for error reporting
#[derive(Debug, Clone)]
pub struct SourceContext {
    /// Name of the source (filename or "<input>")
    pub name: String,
    /// The full source text
    pub source: String,
}

impl SourceContext {
    /// Create a new source context
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a NamedSource for miette
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.name, self.source.clone())
    }
}

// ============================================================================
// Geometry Errors
// ============================================================================

/// Failures of the line, domain and axis computations.
///
/// Only `CannotDetermineApproximateAxis` ever leaves
/// [`GridAxis::new`](crate::grid::GridAxis::new); the retryable variants mark
/// a single candidate angle as unusable and trigger another jiggle.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("lines are parallel or coincident")]
    #[diagnostic(code(patmaker::geometry::no_intersection))]
    NoIntersection,

    #[error("line crosses the domain boundary at {count} point(s), expected 2")]
    #[diagnostic(
        code(patmaker::geometry::lines_do_not_intersect),
        help("the line (extended to infinity) must pass through the repeat tile")
    )]
    LinesDoNotIntersect { count: usize },

    #[error("no commensurate span found for this angle")]
    #[diagnostic(code(patmaker::geometry::cannot_determine_span))]
    CannotDetermineSpan,

    #[error("no lattice point found on the next grid line")]
    #[diagnostic(code(patmaker::geometry::cannot_determine_next_grid))]
    CannotDetermineNextGrid,

    #[error("can not find a decent approximate axis after {attempts} jiggle attempts")]
    #[diagnostic(
        code(patmaker::geometry::cannot_determine_approximate_axis),
        help("the line is at an angle that does not repeat within the domain; try redrawing it closer to a lattice direction")
    )]
    CannotDetermineApproximateAxis { attempts: u32 },

    #[error("line start and end points coincide")]
    #[diagnostic(code(patmaker::geometry::degenerate_line))]
    DegenerateLine,
}

impl GeometryError {
    /// Whether the solver should jiggle the seed and try again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GeometryError::NoIntersection
                | GeometryError::LinesDoNotIntersect { .. }
                | GeometryError::CannotDetermineSpan
                | GeometryError::CannotDetermineNextGrid
        )
    }
}

// ============================================================================
// Source Errors
// ============================================================================

/// Errors found while reading a pattern source
#[derive(Error, Diagnostic, Debug)]
pub enum SourceError {
    #[error("syntax error: {message}")]
    #[diagnostic(code(patmaker::source::syntax))]
    Syntax {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("invalid number: {message}")]
    #[diagnostic(code(patmaker::source::invalid_number))]
    InvalidNumber {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("invalid number")]
        span: SourceSpan,
    },

    #[error("missing domain statement")]
    #[diagnostic(
        code(patmaker::source::missing_domain),
        help("add a line like `domain 1.0, 1.0` giving the tile width and height")
    )]
    MissingDomain {
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("`{keyword}` given more than once")]
    #[diagnostic(code(patmaker::source::duplicate_statement))]
    DuplicateStatement {
        keyword: &'static str,
        #[source_code]
        src: NamedSource<String>,
        #[label("first given here")]
        first: SourceSpan,
        #[label("given again here")]
        second: SourceSpan,
    },

    #[error("invalid domain size: {error}")]
    #[diagnostic(
        code(patmaker::source::invalid_domain),
        help("tile width and height must be positive")
    )]
    InvalidDomain {
        error: NumericError,
        #[source_code]
        src: NamedSource<String>,
        #[label("this size")]
        span: SourceSpan,
    },

    #[error("invalid scale: {error}")]
    #[diagnostic(code(patmaker::source::invalid_scale))]
    InvalidScale {
        error: NumericError,
        #[source_code]
        src: NamedSource<String>,
        #[label("this scale")]
        span: SourceSpan,
    },

    #[error("line has zero length")]
    #[diagnostic(code(patmaker::source::degenerate_line))]
    DegenerateLine {
        #[source_code]
        src: NamedSource<String>,
        #[label("start and end are the same point")]
        span: SourceSpan,
    },
}
