use crate::common::*;
use crate::dice::Die;
use crate::distribution::{Tally, Weight};
use std::collections::BTreeMap;
use tracing::trace;

/// Distribution of the plain sum of `dice`, counted in `W`.
///
/// The sum does not depend on which die showed which face, so only the
/// distribution of the running sum is carried from one die to the next.
/// `raw_outcomes` is the product of the dice's side counts.
pub(crate) fn convolve<W: Weight>(dice: &[Die], raw_outcomes: W) -> Tally<W> {
    let counts = dice
        .iter()
        .fold(BTreeMap::from([(0, W::ONE)]), |counts, &die| add_die(&counts, die));
    Tally::new(raw_outcomes, counts)
}

fn add_die<W: Weight>(counts: &BTreeMap<Total, W>, die: Die) -> BTreeMap<Total, W> {
    let mut next = BTreeMap::new();
    for (&sum, &count) in counts {
        for face in die.faces() {
            *next.entry(sum + face).or_insert_with(W::default) += count;
        }
    }
    trace!(die = %die, sums = next.len(), "convolved die");
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{approx_outcome_product, outcome_product};
    use crate::test_utils::*;
    use rand::Rng;

    fn exact(sides: &[UInt]) -> Tally {
        let pool = dice(sides);
        convolve(&pool, outcome_product(&pool).unwrap())
    }

    fn counts(sides: &[UInt]) -> Vec<(Total, Count)> {
        exact(sides).counts.into_iter().collect()
    }

    #[test]
    fn test_single_die() {
        assert_eq!(counts(&[4]), vec![(1, 1), (2, 1), (3, 1), (4, 1)]);
    }

    #[test]
    fn test_two_d6() {
        let tally = exact(&[6, 6]);
        assert_eq!(tally.raw_outcomes, 36);
        assert_eq!(tally.counts[&2], 1);
        assert_eq!(tally.counts[&7], 6);
        assert_eq!(tally.counts[&12], 1);
        assert_eq!(tally.counts.len(), 11);
    }

    #[test]
    fn test_mixed_dice() {
        // d4 + d6: totals 2..=10, plateau of 4 ways in the middle
        assert_eq!(
            counts(&[4, 6]),
            vec![(2, 1), (3, 2), (4, 3), (5, 4), (6, 4), (7, 4), (8, 3), (9, 2), (10, 1)]
        );
    }

    #[test]
    fn test_random_pools() {
        let mut rng = rng();
        for _ in 0..50 {
            let sides: Vec<UInt> = (0..rng.gen_range(1..=30))
                .map(|_| rng.gen_range(2..=12))
                .collect();
            let tally = exact(&sides);

            let product: Count = sides.iter().map(|&s| Count::from(s)).product();
            assert_eq!(tally.raw_outcomes, product);
            assert_eq!(tally.counts.values().sum::<Count>(), product);
            assert_eq!(*tally.counts.keys().next().unwrap(), sides.len() as Total);
            assert_eq!(*tally.counts.keys().last().unwrap(), sides.iter().sum::<UInt>());
        }
    }

    #[test]
    fn test_float_counts_match_exact() {
        let pool = dice(&[6, 8, 10, 20]);
        let ints = convolve(&pool, outcome_product(&pool).unwrap());
        let approx = convolve(&pool, approx_outcome_product(&pool));
        assert_eq!(approx.raw_outcomes, 9600.0);
        assert!(ints.counts.keys().eq(approx.counts.keys()));
        for (total, &count) in &ints.counts {
            assert_eq!(approx.counts[total], count as Float);
        }
    }

    #[test]
    fn test_pool_beyond_exact_counts() {
        let pool = dice(&[200; 30]);
        assert_eq!(outcome_product(&pool), None);

        let tally = convolve(&pool, approx_outcome_product(&pool));
        assert_eq!(tally.counts.len(), 6000 - 30 + 1);
        assert_eq!(tally.counts.keys().next(), Some(&30));
        assert_eq!(tally.counts.keys().last(), Some(&6000));
        assert_eq!(tally.counts[&30], 1.0);
        assert_eq!(tally.counts[&6000], 1.0);
        let sum: Float = tally.counts.values().sum();
        assert!((sum / tally.raw_outcomes - 1.0).abs() < 1e-9);
    }
}
