//! The boundary to the application that turns grids into a fill pattern.
//!
//! This crate never talks to a CAD document directly. It hands a
//! [`PatternDefinition`] to whatever implements [`PatternHost`].

use std::fmt;

use crate::pattern::FillGrid;

/// Whether the pattern is drawn in model units or at a fixed sheet size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatternTarget {
    #[default]
    Model,
    Drafting,
}

impl PatternTarget {
    pub fn as_str(self) -> &'static str {
        match self {
            PatternTarget::Model => "MODEL",
            PatternTarget::Drafting => "DRAFTING",
        }
    }
}

impl fmt::Display for PatternTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the host should orient the pattern on the faces it fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HostOrientation {
    /// Align with the host element
    #[default]
    ToHost,
    /// Keep aligned with the view
    ToView,
}

/// A complete, host-independent pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternDefinition {
    pub name: String,
    pub target: PatternTarget,
    pub orientation: HostOrientation,
    pub grids: Vec<FillGrid>,
}

/// Implemented by the caller to create the pattern in its own document model.
pub trait PatternHost {
    type Error;

    fn register(&mut self, definition: &PatternDefinition) -> Result<(), Self::Error>;
}

/// Hosts that just collect definitions, e.g. for batch export.
impl PatternHost for Vec<PatternDefinition> {
    type Error = std::convert::Infallible;

    fn register(&mut self, definition: &PatternDefinition) -> Result<(), Self::Error> {
        self.push(definition.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_model_pattern() {
        assert_eq!(PatternTarget::default(), PatternTarget::Model);
        assert_eq!(HostOrientation::default(), HostOrientation::ToHost);
        assert_eq!(PatternTarget::Drafting.to_string(), "DRAFTING");
    }

    #[test]
    fn vec_host_collects_definitions() {
        let definition = PatternDefinition {
            name: "Empty".to_string(),
            target: PatternTarget::Model,
            orientation: HostOrientation::ToView,
            grids: Vec::new(),
        };
        let mut host: Vec<PatternDefinition> = Vec::new();
        let Ok(()) = host.register(&definition);
        assert_eq!(host, vec![definition]);
    }
}
