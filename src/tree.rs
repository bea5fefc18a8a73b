//! Rule tree builder: turns the flat statement list into nested criteria
//! blocks using the exact indentation levels, and splits out the priority
//! declarations and the fallback statement for the validator.

use crate::parse::{ParsedRules, PolicyAssignment, PriorityDeclaration, StatementKind};
use crate::types::{CompileError, Criterion};

#[derive(Debug)]
pub(crate) struct RuleTree {
    pub(crate) priority_decls: Vec<PriorityDeclaration>,
    /// Every fallback statement encountered; the validator requires exactly
    /// one.
    pub(crate) fallbacks: Vec<FallbackStatement>,
    pub(crate) blocks: Vec<CriteriaBlock>,
}

#[derive(Debug)]
pub(crate) struct FallbackStatement {
    pub(crate) line: usize,
    pub(crate) column: usize,
    pub(crate) assignments: Vec<PolicyAssignment>,
}

/// A conjunction of criteria with optional policy assignments and nested
/// refinements. Children inherit the conjunction of every enclosing block.
#[derive(Debug)]
pub(crate) struct CriteriaBlock {
    pub(crate) line: usize,
    pub(crate) column: usize,
    pub(crate) criteria: Vec<Criterion>,
    pub(crate) assignments: Vec<PolicyAssignment>,
    pub(crate) children: Vec<CriteriaBlock>,
}

struct Frame {
    indent: usize,
    block: CriteriaBlock,
}

pub(crate) fn build(parsed: ParsedRules) -> Result<RuleTree, CompileError> {
    let mut tree = RuleTree {
        priority_decls: Vec::new(),
        fallbacks: Vec::new(),
        blocks: Vec::new(),
    };
    let mut stack: Vec<Frame> = Vec::new();
    for statement in parsed.statements {
        match statement.kind {
            StatementKind::Priority(decl) => tree.priority_decls.push(decl),
            StatementKind::Fallback(assignments) => tree.fallbacks.push(FallbackStatement {
                line: statement.line,
                column: statement.column,
                assignments,
            }),
            StatementKind::Rule { criteria, policies } => {
                close_to(&mut stack, &mut tree.blocks, statement.indent)?;
                stack.push(Frame {
                    indent: statement.indent,
                    block: CriteriaBlock {
                        line: statement.line,
                        column: statement.column,
                        criteria,
                        assignments: policies,
                        children: Vec::new(),
                    },
                });
            }
        }
    }
    close_to(&mut stack, &mut tree.blocks, 0)?;
    Ok(tree)
}

/// Pop every open scope at indentation greater than or equal to `indent`,
/// attaching each closed block to its parent (or the top level). A closed
/// block with neither policies nor children has nothing to resolve and is
/// rejected.
fn close_to(
    stack: &mut Vec<Frame>,
    roots: &mut Vec<CriteriaBlock>,
    indent: usize,
) -> Result<(), CompileError> {
    while stack.last().is_some_and(|frame| frame.indent >= indent) {
        let Some(frame) = stack.pop() else {
            break;
        };
        if frame.block.assignments.is_empty() && frame.block.children.is_empty() {
            return Err(CompileError::PolicyMissing {
                line: frame.block.line,
                column: frame.block.column,
            });
        }
        match stack.last_mut() {
            Some(parent) => parent.block.children.push(frame.block),
            None => roots.push(frame.block),
        }
    }
    Ok(())
}
