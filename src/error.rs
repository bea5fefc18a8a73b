use thiserror::Error;

use crate::parse::ParseError;
use crate::CompileError;

/// Unified error type covering parsing and validation.
///
/// Returned by [`RuleSet::from_text()`](crate::RuleSet::from_text) and the
/// cache entry points. Both variants carry the offending 1-based source
/// position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Compile(#[from] CompileError),
}
