use serde::Serialize;

use super::category::CategorySet;
use super::policy::{PolicySet, PolicyType};
use super::rule::CompiledRule;

/// Flags describing which criteria categories the winning rule constrained.
///
/// The four location letters report as one flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionsPresent {
    pub is_item_type_present: bool,
    pub is_loan_type_present: bool,
    pub is_patron_group_present: bool,
    pub is_location_present: bool,
}

impl ConditionsPresent {
    pub(crate) fn from_categories(categories: CategorySet) -> Self {
        Self {
            is_item_type_present: categories.has_material_type(),
            is_loan_type_present: categories.has_loan_type(),
            is_patron_group_present: categories.has_patron_group(),
            is_location_present: categories.has_location(),
        }
    }
}

/// The single-match evaluation response: the winning rule's complete policy
/// assignment, its source line, and which criteria categories it constrained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    #[serde(flatten)]
    policies: PolicySet,
    line_number: usize,
    conditions: ConditionsPresent,
}

impl MatchResult {
    pub(crate) fn from_rule(rule: &CompiledRule) -> Self {
        Self {
            policies: rule.policies.clone(),
            line_number: rule.line,
            conditions: ConditionsPresent::from_categories(rule.categories_used),
        }
    }

    /// The policy id assigned for the given policy type.
    #[must_use]
    pub fn policy(&self, policy_type: PolicyType) -> &str {
        self.policies.get(policy_type)
    }

    /// The winning rule's complete policy assignment.
    #[must_use]
    pub fn policies(&self) -> &PolicySet {
        &self.policies
    }

    /// 1-based source line of the winning rule.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Which criteria categories the winning rule constrained.
    #[must_use]
    pub fn conditions(&self) -> ConditionsPresent {
        self.conditions
    }
}

/// One entry of the all-matches listing: a satisfied rule with its policies
/// and source line, ordered most-specific first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMatch {
    #[serde(flatten)]
    policies: PolicySet,
    line_number: usize,
}

impl RuleMatch {
    pub(crate) fn from_rule(rule: &CompiledRule) -> Self {
        Self {
            policies: rule.policies.clone(),
            line_number: rule.line,
        }
    }

    /// The policy id assigned for the given policy type.
    #[must_use]
    pub fn policy(&self, policy_type: PolicyType) -> &str {
        self.policies.get(policy_type)
    }

    /// This rule's complete policy assignment.
    #[must_use]
    pub fn policies(&self) -> &PolicySet {
        &self.policies
    }

    /// 1-based source line of this rule.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

/// A policy id with the rule line it came from, projected for one policy
/// type. Element of the administrative preview listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyMatch {
    policy_id: String,
    line_number: usize,
}

impl PolicyMatch {
    pub(crate) fn new(policy_id: String, line_number: usize) -> Self {
        Self {
            policy_id,
            line_number,
        }
    }

    /// The matched policy id.
    #[must_use]
    pub fn policy_id(&self) -> &str {
        &self.policy_id
    }

    /// 1-based source line of the rule that assigned it.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}
