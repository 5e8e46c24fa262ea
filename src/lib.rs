//! Exact probability distributions for pools of dice.
//!
//! A pool of fair dice, optionally with a keep/drop rule such as "keep the
//! highest 3", is turned into the exact number of raw outcomes behind every
//! attainable total.
//!
//! ```
//! let dist = dice_odds::distribution("4d6pl1").unwrap();
//! assert_eq!(dist.total_outcomes().exact(), Some(1296));
//! assert_eq!(dist.range(), 3..=18);
//! ```

mod common;
mod convolve;
pub mod dice;
pub mod distribution;
pub mod engine;
mod enumerate;
pub mod error;
pub mod ops;
pub mod parse;
pub mod stringifiers;
pub mod validate;

pub use common::*;
pub use dice::{DiceGroup, Die, Pool};
pub use distribution::{Distribution, Outcome, OutcomeCount};
pub use engine::DistributionEngine;
pub use error::{EngineError, Error};
pub use ops::{Select, SelectionRule};
pub use validate::{Limits, PoolValidator};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Parses `notation` and computes its distribution with the default [`Limits`].
pub fn distribution(notation: &str) -> Result<Distribution> {
    let expr = parse::parse(notation)?;
    Ok(DistributionEngine::default().evaluate(&expr)?)
}
