//! Flattens the validated block tree into an ordered list of compiled rules.
//! Each policies clause encountered during the depth-first walk emits one
//! rule carrying the merged root-to-leaf conjunction and a precomputed
//! salience score, so evaluation order reduces to a numeric comparison.

use tracing::debug;

use crate::types::{CategorySet, CompiledRule, Criterion, PriorityRule, RuleSet};
use crate::validate::{ValidBlock, ValidRules};

pub(crate) fn compile(valid: ValidRules) -> RuleSet {
    let priority = valid.priority;
    let fallback = CompiledRule {
        line: valid.fallback_line,
        criteria: Vec::new(),
        policies: valid.fallback,
        categories_used: CategorySet::EMPTY,
        max_category_weight: 0,
        salience: priority.salience(valid.fallback_line, CategorySet::EMPTY, 0),
    };
    let mut rules = Vec::new();
    let root = Scope::default();
    for block in valid.blocks {
        flatten(block, &root, &priority, &mut rules);
    }
    debug!(rules = rules.len(), "compiled circulation rule set");
    RuleSet::new(fallback, rules, priority)
}

/// An open scope during the walk: the conjunction accumulated so far plus the
/// running specificity accumulators inherited from the parent.
#[derive(Debug, Clone, Default)]
struct Scope {
    criteria: Vec<Criterion>,
    categories: CategorySet,
    max_weight: i64,
}

fn flatten(block: ValidBlock, parent: &Scope, priority: &PriorityRule, out: &mut Vec<CompiledRule>) {
    let mut scope = parent.clone();
    for criterion in block.criteria {
        scope.categories.insert(criterion.category);
        scope.max_weight = scope.max_weight.max(priority.weight(criterion.category));
        scope.criteria.push(criterion);
    }
    if let Some(policies) = block.policies {
        out.push(CompiledRule {
            line: block.line,
            criteria: scope.criteria.clone(),
            policies,
            categories_used: scope.categories,
            max_category_weight: scope.max_weight,
            salience: priority.salience(block.line, scope.categories, scope.max_weight),
        });
    }
    for child in block.children {
        flatten(child, &scope, priority, out);
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{Category, MatchMode, RuleSet};

    const FALLBACK: &str = "fallback-policy: l: a r: b n: c o: d i: e\n";
    const POLICIES: &str = "l: x r: x n: x o: x i: x";

    fn compile_text(text: &str) -> RuleSet {
        RuleSet::from_text(text).unwrap()
    }

    #[test]
    fn fallback_has_empty_conjunction() {
        let rules = compile_text(FALLBACK);
        assert!(rules.fallback.criteria.is_empty());
        assert_eq!(rules.fallback.line, 1);
        assert_eq!(rules.rule_count(), 0);
    }

    #[test]
    fn one_rule_per_policies_clause() {
        let text = format!("{FALLBACK}m book: {POLICIES}\ng staff: {POLICIES}\n");
        let rules = compile_text(&text);
        assert_eq!(rules.rule_count(), 2);
        assert_eq!(rules.rules[0].line, 2);
        assert_eq!(rules.rules[1].line, 3);
    }

    #[test]
    fn nested_blocks_accumulate_the_conjunction() {
        let text = format!("{FALLBACK}m book\n    g staff: {POLICIES}\n");
        let rules = compile_text(&text);
        assert_eq!(rules.rule_count(), 1);
        let rule = &rules.rules[0];
        assert_eq!(rule.line, 3);
        assert_eq!(rule.criteria.len(), 2);
        assert_eq!(rule.criteria[0].category, Category::MaterialType);
        assert_eq!(rule.criteria[1].category, Category::PatronGroup);
        assert_eq!(rule.categories_used.len(), 2);
    }

    #[test]
    fn parent_with_policies_and_children_emits_both() {
        let text = format!("{FALLBACK}m book: {POLICIES}\n    g staff: {POLICIES}\n");
        let rules = compile_text(&text);
        assert_eq!(rules.rule_count(), 2);
        assert_eq!(rules.rules[0].criteria.len(), 1);
        assert_eq!(rules.rules[1].criteria.len(), 2);
    }

    #[test]
    fn sibling_scopes_do_not_leak() {
        let text = format!(
            "{FALLBACK}m book\n    g staff: {POLICIES}\n    t course: {POLICIES}\n"
        );
        let rules = compile_text(&text);
        assert_eq!(rules.rule_count(), 2);
        // The second child conjoins with `m book`, not with its sibling.
        let second = &rules.rules[1];
        assert_eq!(second.criteria.len(), 2);
        assert_eq!(second.criteria[0].category, Category::MaterialType);
        assert_eq!(second.criteria[1].category, Category::LoanType);
    }

    #[test]
    fn location_letters_count_once() {
        let text = format!(
            "{FALLBACK}a inst b camp c lib s shelf: {POLICIES}\n"
        );
        let rules = compile_text(&text);
        let rule = &rules.rules[0];
        assert_eq!(rule.criteria.len(), 4);
        assert_eq!(rule.categories_used.len(), 1);
    }

    #[test]
    fn salience_grows_with_categories_under_default_priority() {
        let text = format!(
            "{FALLBACK}m book: {POLICIES}\nm book g staff: {POLICIES}\n"
        );
        let rules = compile_text(&text);
        assert!(rules.rules[1].salience > rules.rules[0].salience);
        assert!(rules.rules[0].salience > rules.fallback.salience);
    }

    #[test]
    fn declared_letter_weights_feed_max_category_weight() {
        let text = format!(
            "priority: criterium(t, s, c, b, a, m, g), number-of-criteria, last-line\n{FALLBACK}m book g staff: {POLICIES}\nt course: {POLICIES}\n"
        );
        let rules = compile_text(&text);
        // m weighs 2, g weighs 1; t weighs 7.
        assert_eq!(rules.rules[0].max_category_weight, 2);
        assert_eq!(rules.rules[1].max_category_weight, 7);
        assert!(rules.rules[1].salience > rules.rules[0].salience);
    }

    #[test]
    fn star_criterium_counts_its_category() {
        let text = format!("{FALLBACK}m *: {POLICIES}\n");
        let rules = compile_text(&text);
        let rule = &rules.rules[0];
        assert!(matches!(rule.criteria[0].mode, MatchMode::All));
        assert_eq!(rule.categories_used.len(), 1);
    }
}
