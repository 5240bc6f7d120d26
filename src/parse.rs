//! Parse pest pairs into AST nodes

use crate::ast::*;
use crate::errors::{SourceContext, SourceError};
use crate::host::{HostOrientation, PatternTarget};
use crate::{PatternParser, Rule};
use pest::Parser;
use pest::error::InputLocation;
use pest::iterators::{Pair, Pairs};

/// Parse pattern source into AST
pub fn parse(ctx: &SourceContext) -> Result<Program, miette::Report> {
    let pairs = PatternParser::parse(Rule::program, &ctx.source).map_err(|e| syntax_error(e, ctx))?;

    let mut statements = Vec::new();
    for pair in pairs {
        if pair.as_rule() == Rule::program {
            for inner in pair.into_inner() {
                if inner.as_rule() == Rule::statement {
                    statements.push(parse_statement(inner, ctx)?);
                }
            }
        }
    }

    Ok(Program { statements })
}

fn syntax_error(err: pest::error::Error<Rule>, ctx: &SourceContext) -> miette::Report {
    let (start, end) = match err.location {
        InputLocation::Pos(pos) => (pos, pos),
        InputLocation::Span(span) => span,
    };
    SourceError::Syntax {
        message: err.variant.message().into_owned(),
        src: ctx.named_source(),
        span: Span { start, end }.into(),
    }
    .into()
}

/// Grammar guarantees the child exists; a mismatch means the grammar and
/// this module disagree.
fn next_pair<'a>(pairs: &mut Pairs<'a, Rule>, expected: &str) -> Result<Pair<'a, Rule>, miette::Report> {
    pairs
        .next()
        .ok_or_else(|| miette::miette!("Missing {} in parse tree", expected))
}

fn parse_statement(pair: Pair<Rule>, ctx: &SourceContext) -> Result<Statement, miette::Report> {
    let inner = next_pair(&mut pair.into_inner(), "statement body")?;
    match inner.as_rule() {
        Rule::pattern_stmt => Ok(Statement::Pattern(parse_pattern_stmt(inner)?)),
        Rule::domain_stmt => Ok(Statement::Domain(parse_domain_stmt(inner, ctx)?)),
        Rule::scale_stmt => {
            let span = Span::from(inner.as_span());
            let number = parse_number(next_pair(&mut inner.into_inner(), "scale")?, ctx)?;
            Ok(Statement::Scale(Spanned {
                value: number.value,
                span,
            }))
        }
        Rule::line_stmt => Ok(Statement::Line(parse_line_stmt(inner, ctx)?)),
        _ => Err(miette::miette!(
            "Unexpected rule in statement: {:?}",
            inner.as_rule()
        )),
    }
}

fn parse_pattern_stmt(pair: Pair<Rule>) -> Result<Spanned<PatternHeader>, miette::Report> {
    let span = Span::from(pair.as_span());
    let mut header = PatternHeader {
        name: String::new(),
        target: None,
        orientation: None,
    };

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::string => header.name = parse_string(inner),
            Rule::target => header.target = Some(parse_target(inner)?),
            Rule::orientation => header.orientation = Some(parse_orientation(inner)?),
            _ => {}
        }
    }

    Ok(Spanned {
        value: header,
        span,
    })
}

fn parse_string(pair: Pair<Rule>) -> String {
    pair.into_inner()
        .next()
        .map(|inner| inner.as_str().to_string())
        .unwrap_or_default()
}

fn parse_target(pair: Pair<Rule>) -> Result<PatternTarget, miette::Report> {
    match pair.as_str().to_ascii_lowercase().as_str() {
        "model" => Ok(PatternTarget::Model),
        "drafting" => Ok(PatternTarget::Drafting),
        s => Err(miette::miette!("Invalid pattern target: {}", s)),
    }
}

fn parse_orientation(pair: Pair<Rule>) -> Result<HostOrientation, miette::Report> {
    match pair.as_str().to_ascii_lowercase().as_str() {
        "to_host" => Ok(HostOrientation::ToHost),
        "to_view" => Ok(HostOrientation::ToView),
        s => Err(miette::miette!("Invalid orientation: {}", s)),
    }
}

fn parse_domain_stmt(pair: Pair<Rule>, ctx: &SourceContext) -> Result<Spanned<DomainSize>, miette::Report> {
    let span = Span::from(pair.as_span());
    let mut inner = pair.into_inner();
    let width = parse_number(next_pair(&mut inner, "domain width")?, ctx)?;
    let height = parse_number(next_pair(&mut inner, "domain height")?, ctx)?;
    Ok(Spanned {
        value: DomainSize { width, height },
        span,
    })
}

fn parse_line_stmt(pair: Pair<Rule>, ctx: &SourceContext) -> Result<LineStatement, miette::Report> {
    let span = Span::from(pair.as_span());
    let mut label = None;
    let mut points = Vec::with_capacity(2);

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::label => label = Some(inner.as_str().to_string()),
            Rule::point => points.push(parse_point(inner, ctx)?),
            _ => {}
        }
    }

    match points.as_slice() {
        [start, end] => Ok(LineStatement {
            label,
            start: *start,
            end: *end,
            span,
        }),
        _ => Err(miette::miette!("Line needs two points, found {}", points.len())),
    }
}

fn parse_point(pair: Pair<Rule>, ctx: &SourceContext) -> Result<PointLiteral, miette::Report> {
    let mut inner = pair.into_inner();
    let u = parse_number(next_pair(&mut inner, "u coordinate")?, ctx)?;
    let v = parse_number(next_pair(&mut inner, "v coordinate")?, ctx)?;
    Ok(PointLiteral { u, v })
}

fn parse_number(pair: Pair<Rule>, ctx: &SourceContext) -> Result<Spanned<f64>, miette::Report> {
    let span = Span::from(pair.as_span());
    let value = pair.as_str().parse::<f64>().map_err(|e| SourceError::InvalidNumber {
        message: e.to_string(),
        src: ctx.named_source(),
        span: span.into(),
    })?;
    Ok(Spanned { value, span })
}
