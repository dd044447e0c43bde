//! Inference rule vocabulary.
//!
//! The editor shows short names (`∧Elim`), the verifier expects long names
//! (`And Elimination`). Both directions go through the one table below.

use crate::proof::NO_RULE;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Long name sent for premises and subproof assumptions
pub const ASSUMPTION: &str = "Assumption";
/// Long name sent for goals, which restate the line they cite
pub const REITERATION: &str = "Reiteration";

/// Built-in natural deduction rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    AndElim,
    OrElim,
    NotElim,
    BottomElim,
    ImpliesElim,
    IffElim,
    AndIntro,
    OrIntro,
    NotIntro,
    BottomIntro,
    ImpliesIntro,
    IffIntro,
    ForallElim,
    ForallIntro,
    ExistsElim,
    ExistsIntro,
    Reiteration,
    PeanoInduction,
    StrongInduction,
}

static TABLE: [(Rule, &str, &str); 19] = [
    (Rule::AndElim, "∧Elim", "And Elimination"),
    (Rule::OrElim, "∨Elim", "Or Elimination"),
    (Rule::NotElim, "¬Elim", "Not Elimination"),
    (Rule::BottomElim, "⊥Elim", "Bottom Elimination"),
    (Rule::ImpliesElim, "→Elim", "Implies Elimination"),
    (Rule::IffElim, "↔Elim", "Iff Elimination"),
    (Rule::AndIntro, "∧Intro", "And Introduction"),
    (Rule::OrIntro, "∨Intro", "Or Introduction"),
    (Rule::NotIntro, "¬Intro", "Not Introduction"),
    (Rule::BottomIntro, "⊥Intro", "Bottom Introduction"),
    (Rule::ImpliesIntro, "→Intro", "Implies Introduction"),
    (Rule::IffIntro, "↔Intro", "Iff Introduction"),
    (Rule::ForallElim, "∀Elim", "Forall Elimination"),
    (Rule::ForallIntro, "∀Intro", "Forall Introduction"),
    (Rule::ExistsElim, "∃Elim", "Exists Elimination"),
    (Rule::ExistsIntro, "∃Intro", "Exists Introduction"),
    (Rule::Reiteration, "Reit", REITERATION),
    (Rule::PeanoInduction, "P-Ind", "Peano Induction"),
    (Rule::StrongInduction, "S-Ind", "Strong Induction"),
];

impl Rule {
    pub fn all() -> impl Iterator<Item = Rule> {
        TABLE.iter().map(|&(rule, _, _)| rule)
    }

    fn entry(self) -> &'static (Rule, &'static str, &'static str) {
        // every variant has exactly one row
        &TABLE[self as usize]
    }

    pub fn short_name(self) -> &'static str {
        self.entry().1
    }

    pub fn long_name(self) -> &'static str {
        self.entry().2
    }

    pub fn from_short(name: &str) -> Option<Rule> {
        TABLE.iter().find(|(_, short, _)| *short == name).map(|&(rule, _, _)| rule)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Built-in rules plus the custom rules a verifier has registered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleBook {
    custom: IndexSet<String>,
}

/// Names that mark a line as unjustified or as an assumption
fn is_reserved(name: &str) -> bool {
    name == NO_RULE || name == ASSUMPTION
}

impl RuleBook {
    /// Reserved names in `names` are skipped
    pub fn with_custom<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RuleBook {
            custom: names
                .into_iter()
                .map(Into::into)
                .filter(|name: &String| !is_reserved(name))
                .collect(),
        }
    }

    /// Returns false if the name was already known or is reserved
    pub fn add_custom(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        !is_reserved(&name) && self.custom.insert(name)
    }

    pub fn custom(&self) -> impl Iterator<Item = &str> {
        self.custom.iter().map(String::as_str)
    }

    /// Long name to send for an editor rule name. Custom rules go verbatim.
    pub fn resolve<'a>(&'a self, name: &str) -> Option<&'a str> {
        if let Some(rule) = Rule::from_short(name) {
            return Some(rule.long_name());
        }
        self.custom.get(name).map(String::as_str)
    }

    /// Short names of built-ins followed by custom names, for a rule picker
    pub fn choices(&self) -> Vec<&str> {
        let mut choices: Vec<&str> = Rule::all().map(Rule::short_name).collect();
        choices.extend(self.custom());
        choices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_table_order_matches_variants() {
        for (index, rule) in Rule::all().enumerate() {
            assert_eq!(rule as usize, index);
        }
    }

    #[test]
    fn test_table_is_bijective() {
        let shorts: HashSet<_> = Rule::all().map(Rule::short_name).collect();
        let longs: HashSet<_> = Rule::all().map(Rule::long_name).collect();
        assert_eq!(shorts.len(), TABLE.len());
        assert_eq!(longs.len(), TABLE.len());
        for rule in Rule::all() {
            assert_eq!(Rule::from_short(rule.short_name()), Some(rule));
        }
    }

    #[test]
    fn test_known_names() {
        assert_eq!(Rule::from_short("∧Elim").map(Rule::long_name), Some("And Elimination"));
        assert_eq!(Rule::from_short("Reit").map(Rule::long_name), Some("Reiteration"));
        assert_eq!(Rule::from_short("S-Ind").map(Rule::long_name), Some("Strong Induction"));
        assert_eq!(Rule::from_short("none"), None);
        assert_eq!(Rule::from_short("And Elimination"), None);
    }

    #[test]
    fn test_rulebook_resolves_custom_verbatim() {
        let mut book = RuleBook::with_custom(["Modus Tollens"]);
        assert_eq!(book.resolve("→Elim"), Some("Implies Elimination"));
        assert_eq!(book.resolve("Modus Tollens"), Some("Modus Tollens"));
        assert_eq!(book.resolve("De Morgan"), None);

        assert!(book.add_custom("De Morgan"));
        assert!(!book.add_custom("De Morgan"));
        assert_eq!(book.custom().collect::<Vec<_>>(), vec!["Modus Tollens", "De Morgan"]);
        assert_eq!(book.choices().len(), TABLE.len() + 2);
        assert_eq!(RuleBook::default().resolve("Modus Tollens"), None);
    }

    #[test]
    fn test_choices_lists_builtins_then_custom() {
        let book = RuleBook::with_custom(["Modus Tollens"]);
        let choices = book.choices();
        assert_eq!(choices[0], "∧Elim");
        assert_eq!(choices[TABLE.len() - 1], "S-Ind");
        assert_eq!(choices.last(), Some(&"Modus Tollens"));
    }

    #[test]
    fn test_reserved_names_are_not_custom_rules() {
        let mut book = RuleBook::with_custom(["none", "Assumption", "Modus Tollens"]);
        assert_eq!(book.custom().collect::<Vec<_>>(), vec!["Modus Tollens"]);
        assert!(!book.add_custom("none"));
        assert!(!book.add_custom(ASSUMPTION));
        assert_eq!(book.resolve("none"), None);
        assert_eq!(book.resolve("Assumption"), None);
        assert!(!book.choices().contains(&"none"));
    }
}
