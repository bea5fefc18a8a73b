//! Matching: filter compiled rules by criteria satisfaction and rank them by
//! salience. A pure sort-and-pick over an immutable rule set; no firing loop
//! and no shared state, so arbitrarily many callers may evaluate
//! concurrently.

use crate::types::{CompiledRule, Lookup};

/// The satisfied rule with the highest salience. The fallback's empty
/// conjunction always satisfies, so there is always a winner. Equal scores
/// keep the earlier rule: first compiled wins.
pub(crate) fn select<'a>(
    fallback: &'a CompiledRule,
    rules: &'a [CompiledRule],
    lookup: &Lookup,
) -> &'a CompiledRule {
    let mut best = fallback;
    for rule in rules {
        if rule.salience > best.salience && rule.is_satisfied(lookup) {
            best = rule;
        }
    }
    best
}

/// Every satisfied rule ordered by descending salience, the fallback last.
/// The sort is stable, so equal scores keep document order.
pub(crate) fn select_all<'a>(
    fallback: &'a CompiledRule,
    rules: &'a [CompiledRule],
    lookup: &Lookup,
) -> Vec<&'a CompiledRule> {
    let mut matched: Vec<&CompiledRule> = rules
        .iter()
        .filter(|rule| rule.is_satisfied(lookup))
        .collect();
    matched.sort_by(|a, b| b.salience.cmp(&a.salience));
    matched.push(fallback);
    matched
}
