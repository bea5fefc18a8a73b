use crate::types::{Category, Criterion, PolicyType};

/// The result of parsing a rules document: one entry per significant line,
/// in document order, with exact indentation levels.
#[derive(Debug)]
pub(crate) struct ParsedRules {
    pub(crate) statements: Vec<Statement>,
}

/// A parsed line.
#[derive(Debug)]
pub(crate) struct Statement {
    pub(crate) line: usize,
    /// Column of the first token.
    pub(crate) column: usize,
    /// Exact count of leading spaces; nesting is derived from it.
    pub(crate) indent: usize,
    pub(crate) kind: StatementKind,
}

#[derive(Debug)]
pub(crate) enum StatementKind {
    Priority(PriorityDeclaration),
    Fallback(Vec<PolicyAssignment>),
    Rule {
        criteria: Vec<Criterion>,
        policies: Vec<PolicyAssignment>,
    },
}

/// One `<letter>: <name>` pair with the letter's position.
#[derive(Debug, Clone)]
pub(crate) struct PolicyAssignment {
    pub(crate) policy_type: PolicyType,
    pub(crate) policy_id: String,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

/// A raw priority declaration line; its shape is checked by the validator.
#[derive(Debug, Clone)]
pub(crate) struct PriorityDeclaration {
    pub(crate) line: usize,
    pub(crate) column: usize,
    pub(crate) stages: Vec<SpannedStage>,
}

#[derive(Debug, Clone)]
pub(crate) struct SpannedStage {
    pub(crate) stage: RawStage,
    pub(crate) column: usize,
}

#[derive(Debug, Clone)]
pub(crate) enum RawStage {
    CriteriumOrder(Vec<SpannedLetter>),
    NumberOfCriteria,
    FirstLine,
    LastLine,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct SpannedLetter {
    pub(crate) category: Category,
    pub(crate) column: usize,
}
