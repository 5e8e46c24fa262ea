use std::num::NonZeroU32;
pub use vec1::vec1;

pub type UInt = u32;
pub type NonZeroUInt = NonZeroU32;

/// A sum of kept face values.
pub type Total = UInt;

/// An exact number of raw outcomes.
pub type Count = u128;

pub type Float = f64;

pub type NonEmpty<T> = vec1::Vec1<T>;
