//! Semantic validation: invariants the grammar cannot express. Consumes the
//! raw rule tree and produces the validated form the compiler flattens, or a
//! [`CompileError`] pointing at the offending line.

use crate::parse::{PolicyAssignment, PriorityDeclaration, RawStage, SpannedLetter};
use crate::tree::{CriteriaBlock, RuleTree};
use crate::types::{
    CompileError, Criterion, LineOrder, PolicySet, PolicyType, PriorityRule, SpecificityStage,
};

#[derive(Debug)]
pub(crate) struct ValidRules {
    pub(crate) priority: PriorityRule,
    pub(crate) fallback_line: usize,
    pub(crate) fallback: PolicySet,
    pub(crate) blocks: Vec<ValidBlock>,
}

#[derive(Debug)]
pub(crate) struct ValidBlock {
    pub(crate) line: usize,
    pub(crate) criteria: Vec<Criterion>,
    pub(crate) policies: Option<PolicySet>,
    pub(crate) children: Vec<ValidBlock>,
}

pub(crate) fn validate(tree: RuleTree) -> Result<ValidRules, CompileError> {
    let priority = priority_rule(&tree.priority_decls)?;
    let mut fallbacks = tree.fallbacks.into_iter();
    let Some(fallback) = fallbacks.next() else {
        return Err(CompileError::MissingFallback);
    };
    if let Some(extra) = fallbacks.next() {
        return Err(CompileError::DuplicateFallback {
            line: extra.line,
            column: extra.column,
        });
    }
    let fallback_set = policy_set(&fallback.assignments, fallback.line)?;
    let blocks = tree
        .blocks
        .into_iter()
        .map(valid_block)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ValidRules {
        priority,
        fallback_line: fallback.line,
        fallback: fallback_set,
        blocks,
    })
}

fn valid_block(block: CriteriaBlock) -> Result<ValidBlock, CompileError> {
    let policies = if block.assignments.is_empty() {
        None
    } else {
        Some(policy_set(&block.assignments, block.line)?)
    };
    let children = block
        .children
        .into_iter()
        .map(valid_block)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ValidBlock {
        line: block.line,
        criteria: block.criteria,
        policies,
        children,
    })
}

/// Exactly one policy id per policy type. Duplicates and omissions name the
/// offending type; duplicates additionally carry the repeated letter's
/// column.
fn policy_set(assignments: &[PolicyAssignment], line: usize) -> Result<PolicySet, CompileError> {
    let mut slots: [Option<&str>; 5] = [None; 5];
    for assignment in assignments {
        let slot = &mut slots[assignment.policy_type.index()];
        if slot.is_some() {
            return Err(CompileError::DuplicatePolicy {
                policy_type: assignment.policy_type,
                line: assignment.line,
                column: assignment.column,
            });
        }
        *slot = Some(&assignment.policy_id);
    }
    for policy_type in PolicyType::ALL {
        if slots[policy_type.index()].is_none() {
            return Err(CompileError::MissingPolicy { policy_type, line });
        }
    }
    let id = |policy_type: PolicyType| slots[policy_type.index()].unwrap_or_default().to_owned();
    Ok(PolicySet::new(
        id(PolicyType::Loan),
        id(PolicyType::Request),
        id(PolicyType::Notice),
        id(PolicyType::Overdue),
        id(PolicyType::LostItem),
    ))
}

fn priority_rule(decls: &[PriorityDeclaration]) -> Result<PriorityRule, CompileError> {
    let mut iter = decls.iter();
    let Some(decl) = iter.next() else {
        return Ok(PriorityRule::default());
    };
    if let Some(extra) = iter.next() {
        return Err(CompileError::DuplicatePriority {
            line: extra.line,
            column: extra.column,
        });
    }
    resolve(decl)
}

/// A declaration is one or two specificity stages of distinct types followed
/// by a line-order stage.
fn resolve(decl: &PriorityDeclaration) -> Result<PriorityRule, CompileError> {
    let Some((last, specificity_stages)) = decl.stages.split_last() else {
        return Err(CompileError::MissingLineOrder {
            line: decl.line,
            column: decl.column,
        });
    };
    let line_order = match last.stage {
        RawStage::FirstLine => LineOrder::FirstLine,
        RawStage::LastLine => LineOrder::LastLine,
        RawStage::CriteriumOrder(_) | RawStage::NumberOfCriteria => {
            return Err(CompileError::MissingLineOrder {
                line: decl.line,
                column: last.column,
            });
        }
    };
    if specificity_stages.is_empty() {
        return Err(CompileError::MissingSpecificityStage {
            line: decl.line,
            column: decl.column,
        });
    }
    if let Some(extra) = specificity_stages.get(2) {
        return Err(CompileError::TooManyPriorityStages {
            line: decl.line,
            column: extra.column,
        });
    }
    let mut specificity = Vec::new();
    let mut weights = [0_i64; 7];
    for spanned in specificity_stages {
        let stage = match &spanned.stage {
            RawStage::NumberOfCriteria => SpecificityStage::NumberOfCriteria,
            RawStage::CriteriumOrder(letters) => {
                weights = letter_weights(letters, decl.line, spanned.column)?;
                SpecificityStage::CriteriumOrder
            }
            RawStage::FirstLine | RawStage::LastLine => {
                return Err(CompileError::LineOrderNotLast {
                    line: decl.line,
                    column: spanned.column,
                });
            }
        };
        if specificity.contains(&stage) {
            return Err(CompileError::DuplicatePriorityStage {
                stage: stage_name(stage).to_owned(),
                line: decl.line,
                column: spanned.column,
            });
        }
        specificity.push(stage);
    }
    Ok(PriorityRule::new(specificity, line_order, weights))
}

fn stage_name(stage: SpecificityStage) -> &'static str {
    match stage {
        SpecificityStage::CriteriumOrder => "criterium",
        SpecificityStage::NumberOfCriteria => "number-of-criteria",
    }
}

/// The first-listed letter ranks highest (weight 7), the last lowest
/// (weight 1). Each of the seven letters must appear exactly once.
fn letter_weights(
    letters: &[SpannedLetter],
    line: usize,
    column: usize,
) -> Result<[i64; 7], CompileError> {
    let mut weights = [0_i64; 7];
    for (position, letter) in letters.iter().enumerate() {
        let slot = &mut weights[letter.category.index()];
        if *slot != 0 {
            return Err(CompileError::InvalidCriteriumOrder {
                line,
                column: letter.column,
            });
        }
        *slot = 7 - i64::try_from(position).unwrap_or(7);
    }
    if weights.iter().any(|&weight| weight == 0) {
        return Err(CompileError::InvalidCriteriumOrder { line, column });
    }
    Ok(weights)
}
