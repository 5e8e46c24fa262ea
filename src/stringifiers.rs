use crate::common::*;
use crate::distribution::{Distribution, Outcome, OutcomeCount};

/// Renders a [`Distribution`] as a table of totals.
///
/// Implementors override the pieces they format differently; the default
/// methods produce plain, column-aligned text.
pub trait Stringify: Sized + Default {
    fn stringify(&mut self, dist: &Distribution) -> String {
        let mut out = self.str_header(dist);
        for outcome in dist {
            out.push_str(&self.str_row(outcome));
            out.push('\n');
        }
        out.push_str(&self.str_footer(dist));
        out
    }

    fn str_header(&mut self, dist: &Distribution) -> String {
        format!(
            "{}\n{}\n{:>8}  {:>12}  {:>11}\n",
            dist.caption(),
            str_summary(dist),
            "Total",
            "Outcomes",
            "Probability"
        )
    }

    fn str_row(&mut self, outcome: &Outcome) -> String {
        format!(
            "{:>8}  {:>12}  {:>11}",
            outcome.total,
            fmt_count(outcome.count),
            percent(outcome.probability)
        )
    }

    fn str_footer(&mut self, dist: &Distribution) -> String {
        format!(
            "Total combinations: {}",
            fmt_count(dist.total_outcomes())
        )
    }
}

#[derive(Default, Debug)]
pub struct SimpleStringifier;

impl Stringify for SimpleStringifier {}

#[derive(Default, Debug)]
pub struct MarkdownStringifier;

impl Stringify for MarkdownStringifier {
    fn str_header(&mut self, dist: &Distribution) -> String {
        format!(
            "{}\n\n{}\n\n| Total | Outcomes | Probability |\n|------:|---------:|------------:|\n",
            dist.caption(),
            str_summary(dist)
        )
    }

    fn str_row(&mut self, outcome: &Outcome) -> String {
        format!(
            "| {} | {} | {} |",
            outcome.total,
            fmt_count(outcome.count),
            percent(outcome.probability)
        )
    }

    fn str_footer(&mut self, dist: &Distribution) -> String {
        format!(
            "\n_Total combinations: {}_",
            fmt_count(dist.total_outcomes())
        )
    }
}

fn str_summary(dist: &Distribution) -> String {
    format!(
        "Dice: {}, mean: {:.2}, range: {} - {}",
        dist.describe_pool(),
        dist.mean(),
        dist.min_total(),
        dist.max_total()
    )
}

/// `1234567` -> `1,234,567`
pub fn group_thousands(n: Count) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Exact counts get thousands separators, approximate ones scientific notation.
pub fn fmt_count(count: OutcomeCount) -> String {
    match count {
        OutcomeCount::Exact(n) => group_thousands(n),
        approx => approx.to_string(),
    }
}

pub fn percent(probability: Float) -> String {
    format!("{:.3}%", probability * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::DistributionEngine;
    use crate::ops::SelectionRule;
    use crate::test_utils::*;

    fn check<S: Stringify>(sides: &[UInt], rule: SelectionRule, expected: &str) {
        let dist = DistributionEngine::default()
            .compute(&dice(sides), rule)
            .unwrap();
        assert_eq!(S::default().stringify(&dist), expected);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1296), "1,296");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
        assert_eq!(group_thousands(100_000), "100,000");
    }

    #[test]
    fn test_fmt_count() {
        assert_eq!(fmt_count(OutcomeCount::Exact(1296)), "1,296");
        assert_eq!(fmt_count(OutcomeCount::Approx(1.0737e69)), "1.074e69");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.25), "25.000%");
        assert_eq!(percent(1.0 / 216.0), "0.463%");
        assert_eq!(percent(1.0), "100.000%");
    }

    #[test]
    fn test_simple() {
        check::<SimpleStringifier>(
            &[4],
            SelectionRule::none(),
            "1d4: exact probability of totals (1 to 4).\n\
             Dice: 1d4, mean: 2.50, range: 1 - 4\n\
             \x20  Total      Outcomes  Probability\n\
             \x20      1             1      25.000%\n\
             \x20      2             1      25.000%\n\
             \x20      3             1      25.000%\n\
             \x20      4             1      25.000%\n\
             Total combinations: 4",
        );
    }

    #[test]
    fn test_markdown() {
        check::<MarkdownStringifier>(
            &[2, 2],
            SelectionRule::keep_high(1),
            "2d2 (keep highest 1): exact probability of totals (1 to 2).\n\
             \n\
             Dice: 2d2, mean: 1.75, range: 1 - 2\n\
             \n\
             | Total | Outcomes | Probability |\n\
             |------:|---------:|------------:|\n\
             | 1 | 1 | 25.000% |\n\
             | 2 | 3 | 75.000% |\n\
             \n\
             _Total combinations: 4_",
        );
    }
}
