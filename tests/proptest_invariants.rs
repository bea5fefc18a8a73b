
use circ_rules::{Lookup, PolicyType, RuleSet};
use proptest::prelude::*;
use strategies::{arb_flat_document, arb_lookup, FALLBACK};

// ---------------------------------------------------------------------------
// Invariant 1: Totality
//
// For every valid document and every lookup, evaluation returns exactly one
// non-empty policy id per policy type, because the fallback always satisfies.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn evaluation_is_total(doc in arb_flat_document(), lookup in arb_lookup()) {
        let rules = RuleSet::from_text(&doc.text).unwrap();
        let result = rules.select(&lookup);
        for policy_type in PolicyType::ALL {
            prop_assert!(!result.policy(policy_type).is_empty());
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 2: The single-match winner heads the all-matches listing, and the
// fallback (line 1) closes it.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn winner_heads_the_all_matches_listing(doc in arb_flat_document(), lookup in arb_lookup()) {
        let rules = RuleSet::from_text(&doc.text).unwrap();
        let winner = rules.select(&lookup);
        let all = rules.select_all(&lookup);

        prop_assert!(!all.is_empty());
        prop_assert_eq!(winner.line_number(), all[0].line_number());
        prop_assert_eq!(
            winner.policy(PolicyType::Loan),
            all[0].policy(PolicyType::Loan)
        );
        prop_assert_eq!(all.last().map(|m| m.line_number()), Some(1));
    }
}

// ---------------------------------------------------------------------------
// Invariant 3: Idempotent recompilation -- compiling the same text twice
// yields identical match results for every lookup.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn recompilation_is_idempotent(doc in arb_flat_document(), lookup in arb_lookup()) {
        let first = RuleSet::from_text(&doc.text).unwrap();
        let second = RuleSet::from_text(&doc.text).unwrap();
        prop_assert_eq!(first.select(&lookup), second.select(&lookup));
        prop_assert_eq!(first.select_all(&lookup), second.select_all(&lookup));
    }

    #[test]
    fn evaluation_is_deterministic(doc in arb_flat_document(), lookup in arb_lookup()) {
        let rules = RuleSet::from_text(&doc.text).unwrap();
        let first = rules.select(&lookup);
        for _ in 0..5 {
            prop_assert_eq!(&first, &rules.select(&lookup));
        }
    }
}

// ---------------------------------------------------------------------------
// Invariant 4: Specificity monotonicity -- under default priority a rule
// whose conjunction strictly extends another's logical categories never loses
// to it, regardless of document order.
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn superset_of_categories_wins(
        with_loan_type in any::<bool>(),
        extra_is_group in any::<bool>(),
        superset_first in any::<bool>(),
    ) {
        let mut base = String::from("m book");
        if with_loan_type {
            base.push_str(" t standard");
        }
        let extra = if extra_is_group { "g staff" } else { "b north" };
        let tail = "r: fb n: fb o: fb i: fb";
        let narrow = format!("{base}: l: narrow {tail}\n");
        let wide = format!("{base} {extra}: l: wide {tail}\n");
        let text = if superset_first {
            format!("{FALLBACK}{wide}{narrow}")
        } else {
            format!("{FALLBACK}{narrow}{wide}")
        };

        let rules = RuleSet::from_text(&text).unwrap();
        let lookup = Lookup::new()
            .material_type("book")
            .loan_type("standard")
            .patron_group("staff")
            .campus("north");
        let selected = rules.select(&lookup);
        prop_assert_eq!(selected.policy(PolicyType::Loan), "wide");
    }
}
