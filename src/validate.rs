use crate::common::*;
use crate::dice::{DiceGroup, Die, Pool};
use crate::error::EngineError;

/// Policy limits shared by the validator and the engine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Limits {
    pub min_sides: UInt,
    pub max_sides: UInt,
    pub max_dice: usize,
    /// Largest number of raw outcomes a keep/drop rule will enumerate.
    pub enumeration_cap: Count,
}

impl Limits {
    pub const MIN_SIDES: UInt = 2;
    pub const MAX_SIDES: UInt = 200;
    pub const MAX_DICE: usize = 30;
    pub const ENUMERATION_CAP: Count = 300_000;

    pub const fn new() -> Self {
        Self {
            min_sides: Self::MIN_SIDES,
            max_sides: Self::MAX_SIDES,
            max_dice: Self::MAX_DICE,
            enumeration_cap: Self::ENUMERATION_CAP,
        }
    }

    pub const fn with_enumeration_cap(mut self, cap: Count) -> Self {
        self.enumeration_cap = cap;
        self
    }

    pub const fn with_max_dice(mut self, max_dice: usize) -> Self {
        self.max_dice = max_dice;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks dice and pools against [`Limits`] before they reach the engine.
///
/// Every check is side-effect free; [`PoolValidator::push`] only mutates the
/// pool once the addition has passed.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct PoolValidator {
    limits: Limits,
}

impl PoolValidator {
    pub const fn new(limits: Limits) -> Self {
        Self { limits }
    }

    pub const fn limits(&self) -> &Limits {
        &self.limits
    }

    pub fn check_die(&self, die: Die) -> Result<(), EngineError> {
        let Limits { min_sides, max_sides, .. } = self.limits;
        if (min_sides..=max_sides).contains(&die.sides()) {
            Ok(())
        } else {
            Err(EngineError::InvalidDie {
                sides: die.sides(),
                min: min_sides,
                max: max_sides,
            })
        }
    }

    fn check_len(&self, dice: usize) -> Result<(), EngineError> {
        let max = self.limits.max_dice;
        if dice > max {
            Err(EngineError::PoolTooLarge { dice, max })
        } else {
            Ok(())
        }
    }

    /// Checks `pool` as it would be after adding `extra`, without adding it.
    pub fn check_addition(&self, pool: &[Die], extra: Option<Die>) -> Result<(), EngineError> {
        for &die in pool.iter().chain(&extra) {
            self.check_die(die)?;
        }
        self.check_len(pool.len() + usize::from(extra.is_some()))
    }

    /// Checks a pool that is about to be handed to the engine.
    pub fn check_pool(&self, pool: &[Die]) -> Result<(), EngineError> {
        if pool.is_empty() {
            return Err(EngineError::EmptyPool);
        }
        self.check_addition(pool, None)
    }

    pub fn push(&self, pool: &mut Pool, die: Die) -> Result<(), EngineError> {
        self.check_addition(pool.dice(), Some(die))?;
        pool.push_unchecked(die);
        Ok(())
    }

    /// Builds a pool from notation groups such as `4d6 + 1d8`.
    ///
    /// The dice count is checked before any group is expanded.
    pub fn expand(&self, groups: &[DiceGroup]) -> Result<Pool, EngineError> {
        let dice = groups
            .iter()
            .fold(0usize, |acc, group| acc.saturating_add(group.num));
        self.check_len(dice)?;

        let mut pool = Pool::new();
        for group in groups {
            self.check_die(group.die)?;
            for _ in 0..group.num {
                pool.push_unchecked(group.die);
            }
        }
        self.check_pool(pool.dice())?;
        Ok(pool)
    }
}
