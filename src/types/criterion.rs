use std::fmt;

use super::category::Category;
use super::lookup::Lookup;

/// How a criterion matches an attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchMode {
    /// `*` -- matches any value, including an absent one.
    All,
    /// A single name, optionally negated.
    One { name: String, negated: bool },
    /// A name list, optionally negated.
    Set { names: Vec<String>, negated: bool },
}

/// A single attribute constraint: a category plus a match mode.
///
/// One tagged union covers all seven categories; the category is data, not a
/// type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    pub category: Category,
    pub mode: MatchMode,
}

impl Criterion {
    /// Whether the lookup's value for this category satisfies the criterion.
    ///
    /// An absent value never equals a name and is never a member of a name
    /// list, so positive criteria fail and negated criteria hold when the
    /// attribute is missing.
    pub(crate) fn is_satisfied(&self, lookup: &Lookup) -> bool {
        let value = lookup.value(self.category);
        match &self.mode {
            MatchMode::All => true,
            MatchMode::One { name, negated } => value.map_or(*negated, |v| (v == name) != *negated),
            MatchMode::Set { names, negated } => {
                value.map_or(*negated, |v| names.iter().any(|n| n == v) != *negated)
            }
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category.letter())?;
        match &self.mode {
            MatchMode::All => write!(f, " *"),
            MatchMode::One { name, negated } => {
                write!(f, " {}", Rendered(name, *negated))
            }
            MatchMode::Set { names, negated } => {
                if *negated {
                    write!(f, " !")?;
                } else {
                    write!(f, " ")?;
                }
                for (i, name) in names.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write_name(f, name)?;
                }
                Ok(())
            }
        }
    }
}

struct Rendered<'a>(&'a str, bool);

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.1 {
            write!(f, "!")?;
        }
        write_name(f, self.0)
    }
}

fn write_name(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    let bare = name.chars().count() > 1
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.');
    if bare {
        write!(f, "{name}")
    } else {
        write!(f, "\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
    }
}
