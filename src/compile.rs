//! Validate a parsed program into something the solver can run.

use crate::ast::{Program, Span, Spanned, Statement};
use crate::defaults::{DOMAIN_RESOLUTION, round_to};
use crate::domain::Domain;
use crate::errors::{SourceContext, SourceError};
use crate::geometry::Line;
use crate::host::{HostOrientation, PatternDefinition, PatternTarget};
use crate::pattern::{LabeledLine, PatternResult, assemble};
use crate::types::{Point, Scale, check_positive};

/// Name used when the source has no `pattern` header.
pub const DEFAULT_NAME: &str = "Untitled";

/// A validated pattern source.
#[derive(Debug, Clone)]
pub struct PatternInput {
    pub name: String,
    pub target: PatternTarget,
    pub orientation: HostOrientation,
    pub domain: Domain,
    pub scale: Scale,
    pub lines: Vec<LabeledLine>,
}

/// Solved axes together with the definition handed to a host.
#[derive(Debug, Clone)]
pub struct PatternOutput {
    pub definition: PatternDefinition,
    pub result: PatternResult,
}

impl PatternOutput {
    /// Pass the definition to `host`.
    pub fn register_with<H: crate::host::PatternHost>(&self, host: &mut H) -> Result<(), H::Error> {
        host.register(&self.definition)
    }
}

impl PatternInput {
    /// Solve every line and package the grids at the source's scale.
    pub fn build(self) -> PatternOutput {
        let result = assemble(&self.domain, self.lines);
        let definition = PatternDefinition {
            name: self.name,
            target: self.target,
            orientation: self.orientation,
            grids: result.fill_grids(self.scale),
        };
        PatternOutput { definition, result }
    }
}

/// Keeps the first occurrence of a statement that may only appear once.
struct Once<T> {
    keyword: &'static str,
    first: Option<Spanned<T>>,
}

impl<T> Once<T> {
    fn new(keyword: &'static str) -> Self {
        Once {
            keyword,
            first: None,
        }
    }

    fn set(&mut self, value: Spanned<T>, ctx: &SourceContext) -> Result<(), SourceError> {
        if let Some(first) = &self.first {
            return Err(SourceError::DuplicateStatement {
                keyword: self.keyword,
                src: ctx.named_source(),
                first: first.span.into(),
                second: value.span.into(),
            });
        }
        self.first = Some(value);
        Ok(())
    }
}

fn coordinate(value: Spanned<f64>, ctx: &SourceContext) -> Result<f64, SourceError> {
    if value.value.is_finite() {
        Ok(value.value)
    } else {
        Err(SourceError::InvalidNumber {
            message: "value is not finite".to_string(),
            src: ctx.named_source(),
            span: value.span.into(),
        })
    }
}

/// Check a program and resolve defaults.
pub fn compile(program: &Program, ctx: &SourceContext) -> Result<PatternInput, miette::Report> {
    let mut header = Once::new("pattern");
    let mut domain = Once::new("domain");
    let mut scale = Once::new("scale");
    let mut lines = Vec::new();

    for statement in &program.statements {
        match statement {
            Statement::Pattern(h) => header.set(h.clone(), ctx)?,
            Statement::Domain(d) => domain.set(*d, ctx)?,
            Statement::Scale(s) => scale.set(*s, ctx)?,
            Statement::Line(line) => lines.push(line),
        }
    }

    let Some(size) = domain.first else {
        return Err(SourceError::MissingDomain {
            src: ctx.named_source(),
        }
        .into());
    };
    let invalid_domain = |error, span: Span| SourceError::InvalidDomain {
        error,
        src: ctx.named_source(),
        span: span.into(),
    };
    let width = size.value.width;
    let height = size.value.height;
    let domain = Domain::try_new(width.value, height.value).map_err(|error| {
        // blame whichever extent is at fault
        let rounded = round_to(width.value, DOMAIN_RESOLUTION);
        let span = if check_positive(rounded).is_err() {
            width.span
        } else {
            height.span
        };
        invalid_domain(error, span)
    })?;

    let scale = match scale.first {
        Some(s) => Scale::try_new(s.value).map_err(|error| SourceError::InvalidScale {
            error,
            src: ctx.named_source(),
            span: s.span.into(),
        })?,
        None => Scale::default(),
    };

    let lines = lines
        .into_iter()
        .map(|stmt| {
            let start = Point::new(coordinate(stmt.start.u, ctx)?, coordinate(stmt.start.v, ctx)?);
            let end = Point::new(coordinate(stmt.end.u, ctx)?, coordinate(stmt.end.v, ctx)?);
            let line = Line::try_new(start, end).map_err(|_| SourceError::DegenerateLine {
                src: ctx.named_source(),
                span: stmt.span.into(),
            })?;
            Ok(LabeledLine {
                label: stmt.label.clone(),
                line,
            })
        })
        .collect::<Result<Vec<_>, SourceError>>()?;

    let header = header.first.map(|h| h.value);
    Ok(PatternInput {
        name: header
            .as_ref()
            .map_or_else(|| DEFAULT_NAME.to_string(), |h| h.name.clone()),
        target: header.as_ref().and_then(|h| h.target).unwrap_or_default(),
        orientation: header.as_ref().and_then(|h| h.orientation).unwrap_or_default(),
        domain,
        scale,
        lines,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse;
    use crate::types::NumericError;

    fn compile_str(source: &str) -> Result<PatternInput, miette::Report> {
        let ctx = SourceContext::new("<test>", source);
        let program = parse(&ctx)?;
        compile(&program, &ctx)
    }

    fn source_error(source: &str) -> SourceError {
        let report = compile_str(source).unwrap_err();
        match report.downcast::<SourceError>() {
            Ok(err) => err,
            Err(report) => panic!("not a source error: {report:?}"),
        }
    }

    #[test]
    fn defaults_without_header() {
        let input = compile_str("domain 2, 1\nline (0, 0) to (2, 0)").unwrap();
        assert_eq!(input.name, DEFAULT_NAME);
        assert_eq!(input.target, PatternTarget::Model);
        assert_eq!(input.orientation, HostOrientation::ToHost);
        assert_eq!(input.scale, Scale::ONE);
        assert_eq!(input.domain.max_u(), 2.0);
        assert_eq!(input.lines.len(), 1);
    }

    #[test]
    fn header_and_scale_are_applied() {
        let input =
            compile_str("pattern \"Tile\" drafting to_view\ndomain 1, 1\nscale 0.5\nB: line (0,0) to (1,1)")
                .unwrap();
        assert_eq!(input.name, "Tile");
        assert_eq!(input.target, PatternTarget::Drafting);
        assert_eq!(input.orientation, HostOrientation::ToView);
        assert_eq!(input.scale.raw(), 0.5);
        assert_eq!(input.lines[0].label.as_deref(), Some("B"));
    }

    #[test]
    fn missing_domain() {
        assert!(matches!(
            source_error("line (0, 0) to (1, 1)"),
            SourceError::MissingDomain { .. }
        ));
    }

    #[test]
    fn duplicate_domain_labels_both() {
        let source = "domain 1, 1\ndomain 2, 2";
        match source_error(source) {
            SourceError::DuplicateStatement {
                keyword,
                first,
                second,
                ..
            } => {
                assert_eq!(keyword, "domain");
                assert_eq!(first.offset(), 0);
                assert_eq!(second.offset(), 12);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn zero_height_domain() {
        match source_error("domain 1, 0") {
            SourceError::InvalidDomain { error, span, .. } => {
                assert_eq!(error, NumericError::Zero);
                assert_eq!(span.offset(), 10);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn negative_scale() {
        assert!(matches!(
            source_error("domain 1, 1\nscale -2"),
            SourceError::InvalidScale {
                error: NumericError::Negative,
                ..
            }
        ));
    }

    #[test]
    fn overflowing_coordinate() {
        assert!(matches!(
            source_error("domain 1, 1\nline (1e999, 0) to (1, 1)"),
            SourceError::InvalidNumber { .. }
        ));
    }

    #[test]
    fn zero_length_line() {
        assert!(matches!(
            source_error("domain 1, 1\nline (0.5, 0.5) to (0.5, 0.5)"),
            SourceError::DegenerateLine { .. }
        ));
    }

    #[test]
    fn build_solves_lines_at_scale() {
        let output = compile_str("domain 2, 1\nscale 10\nline (0, 0) to (2, 0)")
            .unwrap()
            .build();
        assert_eq!(output.result.axes.len(), 1);
        assert_eq!(output.definition.grids[0].offset, 10.0);
        assert_eq!(output.definition.grids[0].shift, 20.0);
    }
}
