use std::fmt;

use super::lookup::Lookup;
use super::match_result::{MatchResult, PolicyMatch, RuleMatch};
use super::policy::PolicyType;
use super::priority::PriorityRule;
use super::rule::CompiledRule;
use crate::RulesError;

/// A compiled, immutable circulation rule set. Thread-safe and designed to
/// live behind `Arc`; re-compilation produces a new instance rather than
/// mutating this one.
///
/// # Example
///
/// ```
/// use circ_rules::{Lookup, PolicyType, RuleSet};
///
/// let rules = RuleSet::from_text(
///     "fallback-policy: l: no-loan r: hold-only n: quiet o: standard-overdue i: standard-lost\n\
///      m book: l: three-week r: allow-all n: quiet o: standard-overdue i: standard-lost\n",
/// )?;
///
/// let result = rules.select(&Lookup::new().material_type("book"));
/// assert_eq!(result.policy(PolicyType::Loan), "three-week");
/// # Ok::<(), circ_rules::RulesError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub(crate) fallback: CompiledRule,
    /// Criteria-bearing rules in document order.
    pub(crate) rules: Vec<CompiledRule>,
    pub(crate) priority: PriorityRule,
}

impl RuleSet {
    pub(crate) fn new(
        fallback: CompiledRule,
        rules: Vec<CompiledRule>,
        priority: PriorityRule,
    ) -> Self {
        Self {
            fallback,
            rules,
            priority,
        }
    }

    /// Parse, validate, and compile a rules document.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError`] on a syntax or validation failure. No partial
    /// rule set is ever produced.
    pub fn from_text(input: &str) -> Result<Self, RulesError> {
        let parsed = crate::parse::parse(input)?;
        let tree = crate::tree::build(parsed)?;
        let valid = crate::validate::validate(tree)?;
        Ok(crate::compile::compile(valid))
    }

    /// Evaluate a lookup and return the single best match.
    ///
    /// Total over all lookups: the fallback always satisfies, so there is
    /// always a winner and one policy id per policy type.
    #[must_use]
    pub fn select(&self, lookup: &Lookup) -> MatchResult {
        MatchResult::from_rule(crate::evaluate::select(&self.fallback, &self.rules, lookup))
    }

    /// Every satisfied rule ordered most-specific first, the fallback last.
    ///
    /// The winner returned by [`select()`](Self::select) is always the first
    /// element. Intended for rule-preview tooling rather than the hot path.
    #[must_use]
    pub fn select_all(&self, lookup: &Lookup) -> Vec<RuleMatch> {
        crate::evaluate::select_all(&self.fallback, &self.rules, lookup)
            .into_iter()
            .map(RuleMatch::from_rule)
            .collect()
    }

    /// The all-matches listing projected to one policy type.
    #[must_use]
    pub fn matches_for(&self, policy_type: PolicyType, lookup: &Lookup) -> Vec<PolicyMatch> {
        crate::evaluate::select_all(&self.fallback, &self.rules, lookup)
            .into_iter()
            .map(|rule| PolicyMatch::new(rule.policies.get(policy_type).to_owned(), rule.line))
            .collect()
    }

    /// Number of criteria-bearing rules; the fallback is not counted.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// The resolved priority declaration.
    #[must_use]
    pub fn priority(&self) -> &PriorityRule {
        &self.priority
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleSet({} rules + fallback)", self.rules.len())
    }
}
