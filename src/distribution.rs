use crate::common::*;
use crate::dice::{describe_dice, Die};
use crate::ops::{Select, SelectionRule};
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{AddAssign, RangeInclusive};

/// A number of raw outcomes.
///
/// Exact while the pool's raw product fits in a [`Count`]. Only a pool without
/// a rule can exceed that (30d20 already does); such pools are counted in
/// floating point instead.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub enum OutcomeCount {
    Exact(Count),
    Approx(Float),
}

impl OutcomeCount {
    pub fn exact(self) -> Option<Count> {
        match self {
            Self::Exact(n) => Some(n),
            Self::Approx(_) => None,
        }
    }

    pub fn is_exact(self) -> bool {
        matches!(self, Self::Exact(_))
    }

    pub fn to_float(self) -> Float {
        match self {
            Self::Exact(n) => n as Float,
            Self::Approx(x) => x,
        }
    }
}

impl From<Count> for OutcomeCount {
    fn from(n: Count) -> Self {
        Self::Exact(n)
    }
}

impl From<Float> for OutcomeCount {
    fn from(x: Float) -> Self {
        Self::Approx(x)
    }
}

impl fmt::Display for OutcomeCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{}", n),
            Self::Approx(x) => write!(f, "{:.3e}", x),
        }
    }
}

/// Number type a [`Tally`] accumulates in.
pub(crate) trait Weight: Copy + Default + AddAssign + Into<OutcomeCount> {
    const ONE: Self;
}

impl Weight for Count {
    const ONE: Self = 1;
}

impl Weight for Float {
    const ONE: Self = 1.0;
}

/// Outcome counts per total, before they are turned into probabilities.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tally<W = Count> {
    /// Number of equally likely raw outcomes the counts partition.
    pub raw_outcomes: W,
    pub counts: BTreeMap<Total, W>,
}

impl<W> Tally<W> {
    pub fn new(raw_outcomes: W, counts: BTreeMap<Total, W>) -> Self {
        Self { raw_outcomes, counts }
    }
}

/// One attainable total.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Outcome {
    pub total: Total,
    /// Raw outcomes that produce `total`.
    pub count: OutcomeCount,
    pub probability: Float,
}

/// The exact distribution of a pool's total under a selection rule.
///
/// Outcomes are sorted by total and never empty. Their counts always add up to
/// [`total_outcomes`](Self::total_outcomes), the product of every die's side
/// count, whether or not a rule collapsed some of them onto the same total.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
    outcomes: Vec<Outcome>,
    total_outcomes: OutcomeCount,
    pool: NonEmpty<Die>,
    rule: SelectionRule,
}

impl Distribution {
    pub(crate) fn new<W: Weight>(
        pool: NonEmpty<Die>,
        rule: SelectionRule,
        tally: Tally<W>,
    ) -> Self {
        let raw_outcomes: OutcomeCount = tally.raw_outcomes.into();
        let outcomes = tally
            .counts
            .into_iter()
            .map(|(total, count)| {
                let count: OutcomeCount = count.into();
                Outcome {
                    total,
                    count,
                    probability: count.to_float() / raw_outcomes.to_float(),
                }
            })
            .collect();
        Self {
            outcomes,
            total_outcomes: raw_outcomes,
            pool,
            rule,
        }
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Outcome> {
        self.outcomes.iter()
    }

    pub fn totals(&self) -> impl Iterator<Item = Total> + '_ {
        self.outcomes.iter().map(|o| o.total)
    }

    pub fn get(&self, total: Total) -> Option<&Outcome> {
        self.outcomes
            .binary_search_by_key(&total, |o| o.total)
            .ok()
            .map(|i| &self.outcomes[i])
    }

    pub fn probability(&self, total: Total) -> Float {
        self.get(total).map_or(0.0, |o| o.probability)
    }

    pub fn total_outcomes(&self) -> OutcomeCount {
        self.total_outcomes
    }

    /// Whether every count is exact.
    pub fn is_exact(&self) -> bool {
        self.total_outcomes.is_exact()
    }

    pub fn pool(&self) -> &NonEmpty<Die> {
        &self.pool
    }

    /// The rule that produced this distribution. [`SelectionRule::None`] when
    /// the requested rule was inactive.
    pub fn rule(&self) -> SelectionRule {
        self.rule
    }

    pub fn rule_count(&self) -> usize {
        self.rule.count()
    }

    pub fn min_total(&self) -> Total {
        self.outcomes.first().map_or(0, |o| o.total)
    }

    pub fn max_total(&self) -> Total {
        self.outcomes.last().map_or(0, |o| o.total)
    }

    pub fn range(&self) -> RangeInclusive<Total> {
        self.min_total()..=self.max_total()
    }

    /// Expected value of the total.
    pub fn mean(&self) -> Float {
        self.outcomes
            .iter()
            .map(|o| o.total as Float * o.probability)
            .sum()
    }

    pub fn describe_pool(&self) -> String {
        describe_dice(&self.pool)
    }

    /// One-line description, e.g.
    /// `4d6 (drop lowest 1): exact probability of totals (3 to 18).`
    pub fn caption(&self) -> String {
        let rule = self.rule.describe();
        let rule = if rule.is_empty() {
            rule
        } else {
            format!(" ({})", rule)
        };
        format!(
            "{}{}: exact probability of totals ({} to {}).",
            self.describe_pool(),
            rule,
            self.min_total(),
            self.max_total()
        )
    }
}

impl<'a> IntoIterator for &'a Distribution {
    type Item = &'a Outcome;
    type IntoIter = std::slice::Iter<'a, Outcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
