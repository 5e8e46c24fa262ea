use crate::common::*;
use crate::dice::DiceGroup;
use crate::ops::SelectionRule;
use std::fmt;

/// A parsed pool of dice groups with an optional selection rule.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Expression {
    groups: NonEmpty<DiceGroup>,
    rule: SelectionRule,
}

impl Expression {
    pub fn new(groups: NonEmpty<DiceGroup>, rule: SelectionRule) -> Self {
        Self { groups, rule }
    }

    pub fn groups(&self) -> &[DiceGroup] {
        &self.groups
    }

    pub fn rule(&self) -> SelectionRule {
        self.rule
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let groups = self
            .groups
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" + ");
        write!(f, "{}{}", groups, self.rule)
    }
}
