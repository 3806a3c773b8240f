use core::fmt;
use serde::{Deserialize, Serialize};

/// High-level capability labels for routing, errors, and cache configuration.
///
/// These map one-to-one with orchestrator operations and allow consistent
/// Display formatting and match-exhaustive handling when adding new
/// capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// The reference country set backing the selector.
    Countries,
    /// Top-5 weekly search terms for a validated selection.
    TopTerms,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Countries => "countries",
            Self::TopTerms => "top-terms",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
