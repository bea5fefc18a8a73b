//! A compiled circulation-rules engine.
//!
//! Rule text is an indentation-significant DSL mapping item, loan, and patron
//! attributes to the five operational policies: loan (`l`), request (`r`),
//! notice (`n`), overdue fine (`o`), and lost item (`i`). Criteria name one
//! of seven attribute letters -- loan type (`t`), institution (`a`), campus
//! (`b`), library (`c`), shelving location (`s`), material type (`m`), and
//! patron group (`g`) -- and deeper indentation conjoins a line's criteria
//! with every enclosing line's.
//!
//! A document compiles into an immutable [`RuleSet`]. Evaluating a [`Lookup`]
//! against it always yields exactly one policy id per policy type, because
//! every document carries a mandatory catch-all `fallback-policy` statement.
//! Among simultaneously satisfied rules the most specific wins; an optional
//! `priority:` declaration controls how ties are broken.
//!
//! ```
//! use circ_rules::{Lookup, PolicyType, RuleSet};
//!
//! let rules = RuleSet::from_text(
//!     "fallback-policy: l: no-loan r: hold-only n: quiet o: standard-overdue i: standard-lost\n\
//!      m book: l: three-week r: allow-all n: quiet o: standard-overdue i: standard-lost\n",
//! )?;
//!
//! let result = rules.select(&Lookup::new().material_type("book"));
//! assert_eq!(result.policy(PolicyType::Loan), "three-week");
//!
//! let fallback = rules.select(&Lookup::new().material_type("dvd"));
//! assert_eq!(fallback.policy(PolicyType::Loan), "no-loan");
//! # Ok::<(), circ_rules::RulesError>(())
//! ```
//!
//! Compilation is a pure function from text to [`RuleSet`] and evaluation is
//! a pure function over it; the only shared mutable state in the crate is the
//! per-tenant [`RuleCache`].

mod cache;
mod compile;
mod error;
mod evaluate;
mod parse;
mod tree;
mod types;
mod validate;

pub use cache::RuleCache;
pub use error::RulesError;
pub use parse::ParseError;
pub use types::{
    Category, CompileError, ConditionsPresent, Criterion, LineOrder, Lookup, MatchMode,
    MatchResult, PolicyMatch, PolicySet, PolicyType, PriorityRule, RuleMatch, RuleSet,
    SpecificityStage,
};
