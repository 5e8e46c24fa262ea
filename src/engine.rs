use crate::common::*;
use crate::convolve::convolve;
use crate::dice::{approx_outcome_product, describe_dice, outcome_product, Die};
use crate::distribution::Distribution;
use crate::enumerate::enumerate;
use crate::error::EngineError;
use crate::ops::{Select, SelectionRule};
use crate::parse::ast::Expression;
use crate::validate::{Limits, PoolValidator};
use tracing::debug;

/// Computes exact distributions of dice pools.
///
/// The engine keeps no state between calls: the same pool and rule always
/// give the same [`Distribution`]. Without an active rule the total is found
/// by convolution; with one, by enumerating every raw outcome, which is only
/// attempted while the number of outcomes is within
/// [`Limits::enumeration_cap`]. Convolved pools whose outcomes outnumber a
/// [`Count`] are counted in floating point (see [`OutcomeCount`]).
///
/// [`OutcomeCount`]: crate::distribution::OutcomeCount
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct DistributionEngine {
    limits: Limits,
}

impl DistributionEngine {
    pub const fn new(limits: Limits) -> Self {
        Self { limits }
    }

    pub const fn limits(&self) -> &Limits {
        &self.limits
    }

    /// A validator enforcing the same limits as this engine.
    pub const fn validator(&self) -> PoolValidator {
        PoolValidator::new(self.limits)
    }

    /// Distribution of `dice` under `rule`.
    ///
    /// Only emptiness is checked here; run the pool through
    /// [`PoolValidator::check_pool`] to enforce the side and size limits.
    pub fn compute(&self, dice: &[Die], rule: SelectionRule) -> Result<Distribution, EngineError> {
        let pool = NonEmpty::try_from_vec(dice.to_vec()).map_err(|_| EngineError::EmptyPool)?;

        if rule.is_active() {
            debug!(pool = %describe_dice(dice), rule = %rule, "enumerating outcomes");
            let tally = enumerate(dice, rule, self.limits.enumeration_cap)?;
            Ok(Distribution::new(pool, rule, tally))
        } else {
            let rule = SelectionRule::none();
            match outcome_product(dice) {
                Some(raw_outcomes) => {
                    debug!(pool = %describe_dice(dice), "convolving dice");
                    Ok(Distribution::new(pool, rule, convolve(dice, raw_outcomes)))
                }
                None => {
                    debug!(pool = %describe_dice(dice), "convolving dice in floating point");
                    let raw_outcomes = approx_outcome_product(dice);
                    Ok(Distribution::new(pool, rule, convolve(dice, raw_outcomes)))
                }
            }
        }
    }

    /// Validates and computes a parsed notation such as `4d6pl1`.
    pub fn evaluate(&self, expr: &Expression) -> Result<Distribution, EngineError> {
        let pool = self.validator().expand(expr.groups())?;
        self.compute(pool.dice(), expr.rule())
    }
}
