use super::category::CategorySet;
use super::criterion::Criterion;
use super::lookup::Lookup;
use super::policy::PolicySet;

/// A flattened rule: the full criteria conjunction accumulated from the root
/// of its block tree down to the policies clause, the policies it assigns,
/// and precomputed specificity metadata.
///
/// Produced by compilation and immutable once built. The fallback compiles to
/// a rule with an empty conjunction.
#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    /// 1-based source line of the policies clause.
    pub(crate) line: usize,
    pub(crate) criteria: Vec<Criterion>,
    pub(crate) policies: PolicySet,
    /// Distinct logical categories the conjunction constrains (location
    /// letters merged).
    pub(crate) categories_used: CategorySet,
    /// Greatest declared letter weight among the criteria.
    pub(crate) max_category_weight: i64,
    pub(crate) salience: i64,
}

impl CompiledRule {
    /// Whether every criterion in the conjunction holds for the lookup.
    /// An empty conjunction always holds.
    pub(crate) fn is_satisfied(&self, lookup: &Lookup) -> bool {
        self.criteria.iter().all(|c| c.is_satisfied(lookup))
    }
}
