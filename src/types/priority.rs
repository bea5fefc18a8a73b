use super::category::{Category, CategorySet};

/// Which source-line order wins when every specificity stage ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOrder {
    /// The earliest matching line wins.
    FirstLine,
    /// The latest matching line wins.
    LastLine,
}

/// A specificity tie-break stage of a priority declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecificityStage {
    /// `criterium(...)` -- the highest-ranked category letter among a rule's
    /// criteria wins.
    CriteriumOrder,
    /// `number-of-criteria` -- more distinct logical categories wins.
    NumberOfCriteria,
}

/// Multiplier for the least-significant specificity stage. Also the exclusive
/// upper bound of the line term, so line order can never override a
/// specificity stage.
const SPECIFICITY_SLOT: i64 = 10_000_000;

/// Multiplier for the most-significant stage when two are declared.
const PRIMARY_SLOT: i64 = 100_000_000;

/// The resolved priority declaration of a rules document.
///
/// Holds one or two specificity stages (most significant first), the line
/// order, and the per-letter weight table. Weights are all zero unless the
/// document declared an explicit `criterium(...)` ordering, in which case the
/// first-listed letter weighs 7 and the last weighs 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityRule {
    specificity: Vec<SpecificityStage>,
    line_order: LineOrder,
    weights: [i64; 7],
}

impl Default for PriorityRule {
    /// Criterium specificity (all weights zero), then criteria count, then
    /// last line wins.
    fn default() -> Self {
        Self {
            specificity: vec![
                SpecificityStage::CriteriumOrder,
                SpecificityStage::NumberOfCriteria,
            ],
            line_order: LineOrder::LastLine,
            weights: [0; 7],
        }
    }
}

impl PriorityRule {
    pub(crate) fn new(
        specificity: Vec<SpecificityStage>,
        line_order: LineOrder,
        weights: [i64; 7],
    ) -> Self {
        Self {
            specificity,
            line_order,
            weights,
        }
    }

    /// The declared line order.
    #[must_use]
    pub fn line_order(&self) -> LineOrder {
        self.line_order
    }

    /// The declared specificity stages, most significant first.
    #[must_use]
    pub fn specificity(&self) -> &[SpecificityStage] {
        &self.specificity
    }

    /// Declared weight of a category letter; 0 without an explicit ordering.
    pub(crate) fn weight(&self, category: Category) -> i64 {
        self.weights[category.index()]
    }

    /// Composite salience of a rule. Comparing scores totally orders all
    /// rules of a document: the line term stays below `10^7`, the secondary
    /// stage occupies the `10^7` slot, and the primary stage (when declared)
    /// the `10^8` slot.
    pub(crate) fn salience(&self, line: usize, categories: CategorySet, max_weight: i64) -> i64 {
        let line = i64::try_from(line).unwrap_or(i64::MAX);
        let line_term = match self.line_order {
            LineOrder::FirstLine => SPECIFICITY_SLOT - line,
            LineOrder::LastLine => line,
        };
        let value = |stage: SpecificityStage| match stage {
            SpecificityStage::CriteriumOrder => max_weight,
            SpecificityStage::NumberOfCriteria => i64::from(categories.len()),
        };
        match *self.specificity.as_slice() {
            [only] => line_term + value(only) * SPECIFICITY_SLOT,
            [primary, secondary] => {
                line_term + value(secondary) * SPECIFICITY_SLOT + value(primary) * PRIMARY_SLOT
            }
            _ => line_term,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories(list: &[Category]) -> CategorySet {
        let mut set = CategorySet::EMPTY;
        for &category in list {
            set.insert(category);
        }
        set
    }

    #[test]
    fn default_prefers_more_categories() {
        let priority = PriorityRule::default();
        let one = priority.salience(2, categories(&[Category::MaterialType]), 0);
        let two = priority.salience(
            1,
            categories(&[Category::MaterialType, Category::PatronGroup]),
            0,
        );
        assert!(two > one);
    }

    #[test]
    fn default_breaks_count_ties_by_last_line() {
        let priority = PriorityRule::default();
        let set = categories(&[Category::MaterialType]);
        let early = priority.salience(3, set, 0);
        let late = priority.salience(9, set, 0);
        assert!(late > early);
    }

    #[test]
    fn first_line_inverts_the_line_term() {
        let priority = PriorityRule::new(
            vec![SpecificityStage::NumberOfCriteria],
            LineOrder::FirstLine,
            [0; 7],
        );
        let set = categories(&[Category::MaterialType]);
        let early = priority.salience(3, set, 0);
        let late = priority.salience(9, set, 0);
        assert!(early > late);
    }

    #[test]
    fn criterium_order_outranks_count_when_primary() {
        // criterium(...) primary, number-of-criteria secondary: a rule using a
        // heavier letter beats one using more categories with lighter letters.
        let mut weights = [0_i64; 7];
        weights[Category::LoanType.index()] = 7;
        weights[Category::MaterialType.index()] = 2;
        weights[Category::PatronGroup.index()] = 1;
        let priority = PriorityRule::new(
            vec![
                SpecificityStage::CriteriumOrder,
                SpecificityStage::NumberOfCriteria,
            ],
            LineOrder::LastLine,
            weights,
        );
        let heavy = priority.salience(2, categories(&[Category::LoanType]), 7);
        let many = priority.salience(
            9,
            categories(&[Category::MaterialType, Category::PatronGroup]),
            2,
        );
        assert!(heavy > many);
    }

    #[test]
    fn single_stage_uses_the_secondary_slot() {
        let priority = PriorityRule::new(
            vec![SpecificityStage::NumberOfCriteria],
            LineOrder::LastLine,
            [0; 7],
        );
        let set = categories(&[Category::MaterialType, Category::LoanType]);
        assert_eq!(priority.salience(5, set, 0), 5 + 2 * 10_000_000);
    }

    #[test]
    fn line_term_never_reaches_the_specificity_slot() {
        let priority = PriorityRule::default();
        let fallback = priority.salience(1, CategorySet::EMPTY, 0);
        let rule = priority.salience(2, categories(&[Category::MaterialType]), 0);
        assert!(rule > fallback);
        let first_line = PriorityRule::new(
            vec![SpecificityStage::NumberOfCriteria],
            LineOrder::FirstLine,
            [0; 7],
        );
        // Even the line-1 fallback stays below a one-criterion rule.
        let fallback = first_line.salience(1, CategorySet::EMPTY, 0);
        let rule = first_line.salience(9999, categories(&[Category::MaterialType]), 0);
        assert!(rule > fallback);
    }
}
