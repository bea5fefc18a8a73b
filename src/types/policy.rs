use std::fmt;

use serde::Serialize;

/// The five policy categories a rule assigns, with their DSL letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyType {
    /// `l` -- loan policy.
    Loan,
    /// `r` -- request policy.
    Request,
    /// `n` -- patron notice policy.
    Notice,
    /// `o` -- overdue fine policy.
    Overdue,
    /// `i` -- lost item fee policy.
    LostItem,
}

impl PolicyType {
    /// All policy types in canonical letter order (`l, r, n, o, i`).
    pub const ALL: [PolicyType; 5] = [
        PolicyType::Loan,
        PolicyType::Request,
        PolicyType::Notice,
        PolicyType::Overdue,
        PolicyType::LostItem,
    ];

    /// Map a DSL letter to its policy type.
    #[must_use]
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'l' => Some(PolicyType::Loan),
            'r' => Some(PolicyType::Request),
            'n' => Some(PolicyType::Notice),
            'o' => Some(PolicyType::Overdue),
            'i' => Some(PolicyType::LostItem),
            _ => None,
        }
    }

    /// The policy type's DSL letter.
    #[must_use]
    pub fn letter(self) -> char {
        match self {
            PolicyType::Loan => 'l',
            PolicyType::Request => 'r',
            PolicyType::Notice => 'n',
            PolicyType::Overdue => 'o',
            PolicyType::LostItem => 'i',
        }
    }

    /// Position in [`PolicyType::ALL`]; used to index assignment slots.
    pub(crate) fn index(self) -> usize {
        match self {
            PolicyType::Loan => 0,
            PolicyType::Request => 1,
            PolicyType::Notice => 2,
            PolicyType::Overdue => 3,
            PolicyType::LostItem => 4,
        }
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolicyType::Loan => "loan",
            PolicyType::Request => "request",
            PolicyType::Notice => "notice",
            PolicyType::Overdue => "overdue fine",
            PolicyType::LostItem => "lost item",
        };
        write!(f, "{name}")
    }
}

/// A complete policy assignment: exactly one policy id per [`PolicyType`].
///
/// Constructed by the validator; a compiled rule set never holds a partial
/// assignment, which is what makes evaluation total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicySet {
    #[serde(rename = "loanPolicyId")]
    loan: String,
    #[serde(rename = "requestPolicyId")]
    request: String,
    #[serde(rename = "noticePolicyId")]
    notice: String,
    #[serde(rename = "overduePolicyId")]
    overdue: String,
    #[serde(rename = "lostItemPolicyId")]
    lost_item: String,
}

impl PolicySet {
    pub(crate) fn new(
        loan: String,
        request: String,
        notice: String,
        overdue: String,
        lost_item: String,
    ) -> Self {
        Self {
            loan,
            request,
            notice,
            overdue,
            lost_item,
        }
    }

    /// The policy id assigned for the given policy type.
    #[must_use]
    pub fn get(&self, policy_type: PolicyType) -> &str {
        match policy_type {
            PolicyType::Loan => &self.loan,
            PolicyType::Request => &self.request,
            PolicyType::Notice => &self.notice,
            PolicyType::Overdue => &self.overdue,
            PolicyType::LostItem => &self.lost_item,
        }
    }
}
