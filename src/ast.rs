//! Abstract Syntax Tree types for pattern sources
//!
//! Every node that compile-time validation can complain about carries the
//! byte span it was parsed from.

use miette::SourceSpan;

use crate::host::{HostOrientation, PatternTarget};

/// Byte range in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl From<pest::Span<'_>> for Span {
    fn from(span: pest::Span<'_>) -> Self {
        Span {
            start: span.start(),
            end: span.end(),
        }
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.end - span.start).into()
    }
}

/// A value together with where it was written
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spanned<T> {
    pub value: T,
    pub span: Span,
}

/// A complete pattern source
#[derive(Debug, Clone)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// A pattern statement
#[derive(Debug, Clone)]
pub enum Statement {
    /// pattern "Name" model to_host
    Pattern(Spanned<PatternHeader>),
    /// domain 1.0, 0.5
    Domain(Spanned<DomainSize>),
    /// scale 12
    Scale(Spanned<f64>),
    /// A: line (0, 0) to (1, 1)
    Line(LineStatement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternHeader {
    pub name: String,
    pub target: Option<PatternTarget>,
    pub orientation: Option<HostOrientation>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainSize {
    pub width: Spanned<f64>,
    pub height: Spanned<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineStatement {
    pub label: Option<String>,
    pub start: PointLiteral,
    pub end: PointLiteral,
    pub span: Span,
}

/// `(u, v)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLiteral {
    pub u: Spanned<f64>,
    pub v: Spanned<f64>,
}
