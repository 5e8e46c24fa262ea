use crate::common::*;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

/// A fair die with faces `1..=sides`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Die {
    sides: NonZeroUInt,
}

impl Die {
    pub const fn new(sides: NonZeroUInt) -> Self {
        Self { sides }
    }

    pub const fn sides(self) -> UInt {
        self.sides.get()
    }

    pub fn faces(self) -> RangeInclusive<UInt> {
        1..=self.sides()
    }
}

impl From<NonZeroUInt> for Die {
    fn from(sides: NonZeroUInt) -> Self {
        Self::new(sides)
    }
}

impl TryFrom<UInt> for Die {
    type Error = <NonZeroUInt as TryFrom<UInt>>::Error;

    fn try_from(value: UInt) -> Result<Self, Self::Error> {
        NonZeroUInt::try_from(value).map(Self::new)
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.sides)
    }
}

/// `num` identical dice, as written in notation like `4d6`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DiceGroup {
    pub num: usize,
    pub die: Die,
}

impl DiceGroup {
    pub const fn new(num: usize, die: Die) -> Self {
        Self { num, die }
    }
}

impl fmt::Display for DiceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.num, self.die)
    }
}

/// An ordered collection of dice.
///
/// Dice are only added through [`PoolValidator::push`](crate::validate::PoolValidator::push),
/// so a pool never holds a die or a dice count outside the validator's limits.
#[derive(Debug, Clone, Default, Eq, PartialEq, Hash)]
pub struct Pool {
    dice: Vec<Die>,
}

impl Pool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Removes the die at `index`, if there is one.
    pub fn remove(&mut self, index: usize) -> Option<Die> {
        (index < self.dice.len()).then(|| self.dice.remove(index))
    }

    pub fn clear(&mut self) {
        self.dice.clear();
    }

    pub(crate) fn push_unchecked(&mut self, die: Die) {
        self.dice.push(die);
    }
}

impl AsRef<[Die]> for Pool {
    fn as_ref(&self) -> &[Die] {
        &self.dice
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&describe_dice(&self.dice))
    }
}

/// Groups dice by side count, smallest first: `[8, 6, 6]` reads `2d6 + 1d8`.
pub fn describe_dice(dice: &[Die]) -> String {
    if dice.is_empty() {
        return "No dice".to_string();
    }

    let mut counts = BTreeMap::new();
    for die in dice {
        *counts.entry(*die).or_insert(0usize) += 1;
    }
    counts
        .into_iter()
        .map(|(die, num)| DiceGroup::new(num, die).to_string())
        .collect::<Vec<_>>()
        .join(" + ")
}

/// Number of raw outcomes of rolling every die once, or `None` if it does not fit a [`Count`].
pub fn outcome_product(dice: &[Die]) -> Option<Count> {
    dice.iter()
        .try_fold(1 as Count, |acc, die| acc.checked_mul(Count::from(die.sides())))
}

/// [`outcome_product`] in floating point, for pools it cannot count.
pub fn approx_outcome_product(dice: &[Die]) -> Float {
    dice.iter().map(|die| Float::from(die.sides())).product()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_describe_dice() {
        assert_eq!(describe_dice(&dice(&[8, 6, 6])), "2d6 + 1d8");
        assert_eq!(describe_dice(&dice(&[20])), "1d20");
        assert_eq!(describe_dice(&dice(&[100, 4, 100, 12, 4])), "2d4 + 1d12 + 2d100");
        assert_eq!(describe_dice(&[]), "No dice");
    }

    #[test]
    fn test_die_from_int() {
        assert_eq!(Die::try_from(6).unwrap().sides(), 6);
        assert!(Die::try_from(0).is_err());
        assert_eq!(Die::try_from(20).unwrap().to_string(), "d20");
        assert_eq!(Die::try_from(4).unwrap().faces().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_outcome_product() {
        assert_eq!(outcome_product(&dice(&[6, 6])), Some(36));
        assert_eq!(outcome_product(&dice(&[2, 3, 4])), Some(24));
        assert_eq!(outcome_product(&[]), Some(1));
        assert_eq!(outcome_product(&dice(&[200; 16])), Some(200u128.pow(16)));
        assert_eq!(outcome_product(&dice(&[200; 17])), None);
        assert_eq!(approx_outcome_product(&dice(&[2, 3, 4])), 24.0);
        assert!(approx_outcome_product(&dice(&[200; 30])) > 1e69);
    }

    #[test]
    fn test_pool_remove() {
        let mut pool = Pool::new();
        for d in dice(&[4, 6, 8]) {
            pool.push_unchecked(d);
        }
        assert_eq!(pool.remove(1), Die::try_from(6).ok());
        assert_eq!(pool.remove(5), None);
        assert_eq!(pool.dice(), &dice(&[4, 8])[..]);
        assert_eq!(pool.to_string(), "1d4 + 1d8");
        pool.clear();
        assert!(pool.is_empty());
    }
}
