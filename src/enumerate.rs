use crate::common::*;
use crate::dice::{outcome_product, Die};
use crate::distribution::Tally;
use crate::error::EngineError;
use crate::ops::{Select, SelectionRule};
use std::collections::BTreeMap;
use tracing::debug;

/// Exact distribution of the kept total under `rule`, found by visiting
/// every assignment of faces to `dice`.
///
/// Refuses up front when the number of assignments exceeds `cap`.
pub(crate) fn enumerate(
    dice: &[Die],
    rule: SelectionRule,
    cap: Count,
) -> Result<Tally, EngineError> {
    let raw_outcomes = match outcome_product(dice) {
        Some(n) if n <= cap => n,
        _ => {
            debug!(dice = dice.len(), cap = %cap, "enumeration space too large");
            return Err(EngineError::EnumerationSpaceTooLarge { cap });
        }
    };

    let mut counts = BTreeMap::new();
    let mut rolls: Vec<UInt> = vec![1; dice.len()];
    let mut sorted = Vec::with_capacity(dice.len());
    loop {
        sorted.clear();
        sorted.extend_from_slice(&rolls);
        sorted.sort_unstable();
        *counts.entry(rule.total(&sorted)).or_insert(0) += 1;

        if !advance(&mut rolls, dice) {
            break;
        }
    }
    Ok(Tally::new(raw_outcomes, counts))
}

/// Steps `rolls` to the next face assignment, last die fastest.
/// Returns `false` once every assignment has been visited.
fn advance(rolls: &mut [UInt], dice: &[Die]) -> bool {
    for (roll, die) in rolls.iter_mut().zip(dice).rev() {
        if *roll < die.sides() {
            *roll += 1;
            return true;
        }
        *roll = 1;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convolve::convolve;
    use crate::test_utils::*;

    const CAP: Count = 300_000;

    fn tally(sides: &[UInt], rule: SelectionRule) -> Tally {
        enumerate(&dice(sides), rule, CAP).unwrap()
    }

    #[test]
    fn test_advance_visits_every_assignment() {
        let pool = dice(&[2, 3]);
        let mut rolls: Vec<UInt> = vec![1, 1];
        let mut seen = vec![rolls.clone()];
        while advance(&mut rolls, &pool) {
            seen.push(rolls.clone());
        }
        assert_eq!(
            seen,
            vec![vec![1, 1], vec![1, 2], vec![1, 3], vec![2, 1], vec![2, 2], vec![2, 3]]
        );
    }

    #[test]
    fn test_four_d6_drop_lowest() {
        let tally = tally(&[6, 6, 6, 6], SelectionRule::drop_low(1));
        assert_eq!(tally.raw_outcomes, 1296);
        assert_eq!(tally.counts.values().sum::<Count>(), 1296);
        assert_eq!(tally.counts.keys().next(), Some(&3));
        assert_eq!(tally.counts.keys().last(), Some(&18));
        assert_eq!(tally.counts[&3], 1);
        // three or four sixes
        assert_eq!(tally.counts[&18], 21);
    }

    #[test]
    fn test_advantage_and_disadvantage() {
        let adv = tally(&[20, 20], SelectionRule::keep_high(1));
        assert_eq!(adv.counts[&20], 39);
        assert_eq!(adv.counts[&1], 1);

        let dis = tally(&[20, 20], SelectionRule::keep_low(1));
        assert_eq!(dis.counts[&1], 39);
        assert_eq!(dis.counts[&20], 1);
    }

    #[test]
    fn test_drop_high() {
        let tally = tally(&[6, 6, 6], SelectionRule::drop_high(1));
        assert_eq!(tally.counts.keys().next(), Some(&2));
        assert_eq!(tally.counts.keys().last(), Some(&12));
        assert_eq!(tally.counts.values().sum::<Count>(), 216);
    }

    #[test]
    fn test_clamped_rules() {
        let plain = convolve(&dice(&[4, 6, 8]), 192 as Count);
        assert_eq!(tally(&[4, 6, 8], SelectionRule::keep_high(3)), plain);
        assert_eq!(tally(&[4, 6, 8], SelectionRule::keep_low(10)), plain);

        let nothing = tally(&[4, 6, 8], SelectionRule::drop_low(5));
        assert_eq!(nothing.counts, BTreeMap::from([(0, 192)]));
        assert_eq!(nothing.raw_outcomes, 192);
    }

    #[test]
    fn test_cap() {
        assert_eq!(
            enumerate(&dice(&[100; 10]), SelectionRule::keep_high(1), CAP),
            Err(EngineError::EnumerationSpaceTooLarge { cap: CAP })
        );
        assert_eq!(
            enumerate(&dice(&[200; 30]), SelectionRule::keep_high(1), CAP),
            Err(EngineError::EnumerationSpaceTooLarge { cap: CAP })
        );
        assert!(enumerate(&dice(&[6, 6]), SelectionRule::keep_high(1), 36).is_ok());
        assert_eq!(
            enumerate(&dice(&[6, 6]), SelectionRule::keep_high(1), 35),
            Err(EngineError::EnumerationSpaceTooLarge { cap: 35 })
        );
    }
}
