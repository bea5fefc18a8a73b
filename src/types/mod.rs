mod category;
mod criterion;
mod error;
mod lookup;
mod match_result;
mod policy;
mod priority;
mod rule;
mod ruleset;

pub use category::Category;
pub(crate) use category::CategorySet;
pub use criterion::{Criterion, MatchMode};
pub use error::CompileError;
pub use lookup::Lookup;
pub use match_result::{ConditionsPresent, MatchResult, PolicyMatch, RuleMatch};
pub use policy::{PolicySet, PolicyType};
pub use priority::{LineOrder, PriorityRule, SpecificityStage};
pub(crate) use rule::CompiledRule;
pub use ruleset::RuleSet;
