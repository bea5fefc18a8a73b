use thiserror::Error;

use super::policy::PolicyType;

/// Semantic validation failures: structurally valid documents that break an
/// invariant the grammar cannot express. Every positioned variant carries the
/// offending 1-based line (and column where one exists) so authoring tools
/// can point at the exact spot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("line {line} column {column}: criteria have no policies and no refinements")]
    PolicyMissing { line: usize, column: usize },

    #[error("line {line} column {column}: duplicate {policy_type} policy")]
    DuplicatePolicy {
        policy_type: PolicyType,
        line: usize,
        column: usize,
    },

    #[error("line {line}: missing {policy_type} policy")]
    MissingPolicy { policy_type: PolicyType, line: usize },

    #[error("no fallback-policy statement found")]
    MissingFallback,

    #[error("line {line} column {column}: duplicate fallback-policy statement")]
    DuplicateFallback { line: usize, column: usize },

    #[error("line {line} column {column}: duplicate priority declaration")]
    DuplicatePriority { line: usize, column: usize },

    #[error("line {line} column {column}: priority stage '{stage}' declared twice")]
    DuplicatePriorityStage {
        stage: String,
        line: usize,
        column: usize,
    },

    #[error("line {line} column {column}: priority declaration must end with first-line or last-line")]
    MissingLineOrder { line: usize, column: usize },

    #[error("line {line} column {column}: line order must be the last priority stage")]
    LineOrderNotLast { line: usize, column: usize },

    #[error(
        "line {line} column {column}: priority declaration needs a specificity stage before the line order"
    )]
    MissingSpecificityStage { line: usize, column: usize },

    #[error("line {line} column {column}: at most two specificity stages may be declared")]
    TooManyPriorityStages { line: usize, column: usize },

    #[error(
        "line {line} column {column}: criterium ordering must name each of t, a, b, c, s, m, g exactly once"
    )]
    InvalidCriteriumOrder { line: usize, column: usize },
}
