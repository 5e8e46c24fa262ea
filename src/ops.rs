use crate::common::*;
use std::fmt;
use std::ops::Range;

/// Which dice of a roll contribute to its total.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[enum_dispatch::enum_dispatch(Select)]
pub enum SelectionRule {
    None(NoRule),
    KeepHigh(KeepHigh),
    KeepLow(KeepLow),
    DropHigh(DropHigh),
    DropLow(DropLow),
}

impl SelectionRule {
    pub const fn none() -> Self {
        Self::None(NoRule)
    }

    pub const fn keep_high(count: usize) -> Self {
        Self::KeepHigh(KeepHigh(count))
    }

    pub const fn keep_low(count: usize) -> Self {
        Self::KeepLow(KeepLow(count))
    }

    pub const fn drop_high(count: usize) -> Self {
        Self::DropHigh(DropHigh(count))
    }

    pub const fn drop_low(count: usize) -> Self {
        Self::DropLow(DropLow(count))
    }

    /// Human readable form, e.g. `keep highest 2`. Empty when the rule is inactive.
    pub fn describe(&self) -> String {
        if self.is_active() {
            format!("{} {}", self.label(), self.count())
        } else {
            String::new()
        }
    }
}

impl Default for SelectionRule {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Display for SelectionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None(x) => fmt::Display::fmt(x, f),
            Self::KeepHigh(x) => fmt::Display::fmt(x, f),
            Self::KeepLow(x) => fmt::Display::fmt(x, f),
            Self::DropHigh(x) => fmt::Display::fmt(x, f),
            Self::DropLow(x) => fmt::Display::fmt(x, f),
        }
    }
}

#[enum_dispatch::enum_dispatch]
pub trait Select {
    /// How many dice the rule names. Zero for [`NoRule`].
    fn count(&self) -> usize;

    fn label(&self) -> &'static str;

    /// Positions, within `n` rolls sorted ascending, of the rolls that are summed.
    /// The count is clamped to `n`.
    fn kept_run(&self, n: usize) -> Range<usize>;

    fn is_active(&self) -> bool {
        self.count() > 0
    }

    /// Total of `sorted`, which must be in ascending order.
    fn total(&self, sorted: &[UInt]) -> Total {
        sorted[self.kept_run(sorted.len())].iter().sum()
    }
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct NoRule;

impl Select for NoRule {
    fn count(&self) -> usize {
        0
    }

    fn label(&self) -> &'static str {
        ""
    }

    fn kept_run(&self, n: usize) -> Range<usize> {
        0..n
    }
}

impl fmt::Display for NoRule {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}

macro_rules! rule_impl {
    ($(($name:ident, $label:literal, $disp:literal, |$n:ident, $c:ident| $run:expr)),+ $(,)?) => {$(
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
        pub struct $name(pub(crate) usize);

        impl $name {
            pub const fn new(count: usize) -> Self {
                Self(count)
            }
        }

        impl Select for $name {
            fn count(&self) -> usize {
                self.0
            }

            fn label(&self) -> &'static str {
                $label
            }

            fn kept_run(&self, $n: usize) -> Range<usize> {
                let $c = self.0.min($n);
                $run
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $disp, self.0)
            }
        }
    )+};
}

rule_impl!(
    (KeepHigh, "keep highest", "kh", |n, c| n - c..n),
    (KeepLow, "keep lowest", "kl", |_n, c| 0..c),
    (DropHigh, "drop highest", "ph", |n, c| 0..n - c),
    (DropLow, "drop lowest", "pl", |n, c| c..n),
);
