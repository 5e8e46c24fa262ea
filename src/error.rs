use crate::common::*;
use crate::parse::ParseError;

/// Why no distribution could be produced for a pool.
#[derive(thiserror::Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum EngineError {
    #[error("add at least one die to see the distribution")]
    EmptyPool,
    #[error("dice must have between {min} and {max} sides, found d{sides}")]
    InvalidDie { sides: UInt, min: UInt, max: UInt },
    #[error("a pool holds at most {max} dice, found {dice}")]
    PoolTooLarge { dice: usize, max: usize },
    #[error("keep/drop rules are supported up to {cap} outcome combinations; reduce dice count or sides to apply the rule")]
    EnumerationSpaceTooLarge { cap: Count },
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Engine(#[from] EngineError),
}
