
mod imp;

mod dynamic_array;

use core::{alloc::Layout, fmt};

pub use dynamic_array::*;

//--------------------------------------------------------------

macro_rules! impl_slice_partial_eq_generic {
    ([$($vars:tt)*] $lhs:ty, $rhs:ty $(where $ty:ty: $bound:ident)?) => {
        impl<T, U, $($vars)*> PartialEq<$rhs> for $lhs  where
            T : PartialEq<U>,
            $($ty: $bound)?
        {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool { self[..] == other[..] }
        }
    };
}
use impl_slice_partial_eq_generic;

//--------------------------------------------------------------

/// Collection error
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Error {
    /// An argument was outside of its allowed range
    InvalidArgument(&'static str),
    /// An index did not refer to a live element
    IndexOutOfBounds { index: usize, len: usize },
    /// A required collection was not provided
    NullReference(&'static str),
    /// The requested capacity would exceed `isize::MAX` bytes
    CapacityOverflow,
    /// The allocator could not provide the requested memory
    AllocError(Layout),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(s)             => f.write_fmt(format_args!("Invalid argument: {s}")),
            Error::IndexOutOfBounds { index, len } => f.write_fmt(format_args!("Index {index} out of bounds for length {len}")),
            Error::NullReference(s)               => f.write_fmt(format_args!("Null reference: {s}")),
            Error::CapacityOverflow               => f.write_str("Capacity overflow"),
            Error::AllocError(layout)             => f.write_fmt(format_args!("Failed to allocate {} bytes with alignment {}", layout.size(), layout.align())),
        }
    }
}

impl std::error::Error for Error {
}

pub type Result<T> = core::result::Result<T, Error>;

//--------------------------------------------------------------

/// A trait used to define a strategy to reserve additional memory for containers.
pub trait ReserveStrategy {
    /// Calculate the new capacity for a container.
    ///
    /// `cur_capacity` represents the current capacity of the container.
    ///
    /// `min_capacity` represents the minimum required capacity to be able to resize.
    ///
    /// Returns `None` if the capacity were to overflow
    fn calculate(cur_capacity: usize, min_capacity: usize) -> Option<usize>;
}

/// A reserve strategy that will try to either return double the current capacity, or the minimum required capacity, whichever is bigger.
pub struct DoubleOrMinReserveStrategy;

impl ReserveStrategy for DoubleOrMinReserveStrategy {
    fn calculate(cur_capacity: usize, min_capacity: usize) -> Option<usize> {
        let double_cap = cur_capacity.checked_mul(2)?;
        let new_cap = if double_cap > min_capacity { double_cap } else { min_capacity };
        if new_cap <= isize::MAX as usize {
            Some(new_cap)
        } else {
            None
        }
    }
}

/// A reserve strategy that will return a power of 2 capacity
pub struct Pow2ReserveStrategy;

impl ReserveStrategy for Pow2ReserveStrategy {
    fn calculate(_cur_capacity: usize, min_capacity: usize) -> Option<usize> {
        let new_cap = min_capacity.checked_next_power_of_two()?;
        if new_cap <= isize::MAX as usize {
            Some(new_cap)
        } else {
            None
        }
    }
}

/// A reserve stategy that grows the capacity by 1.5, plus a single slot.
///
/// Each step goes from `cap` to `floor(cap * 3 / 2) + 1`, which also lets an empty allocation grow.
pub struct ThreeHalvesReserveStrategy;

impl ReserveStrategy for ThreeHalvesReserveStrategy {
    fn calculate(cur_capacity: usize, min_capacity: usize) -> Option<usize> {
        let mut cap = cur_capacity;
        while cap < min_capacity {
            // `cap + cap / 2` == `floor(cap * 3 / 2)`, without the intermediate overflow
            cap = cap.checked_add(cap >> 1)?.checked_add(1)?;
            if cap > isize::MAX as usize {
                return None;
            }
        }
        Some(cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_halves_strategy() {
        assert_eq!(ThreeHalvesReserveStrategy::calculate(16, 17), Some(25));
        assert_eq!(ThreeHalvesReserveStrategy::calculate(5, 6), Some(8));
        assert_eq!(ThreeHalvesReserveStrategy::calculate(1, 2), Some(2));
        assert_eq!(ThreeHalvesReserveStrategy::calculate(0, 1), Some(1));
        // 16 -> 25 -> 38
        assert_eq!(ThreeHalvesReserveStrategy::calculate(16, 30), Some(38));
        assert_eq!(ThreeHalvesReserveStrategy::calculate(10, 4), Some(10));
        assert_eq!(ThreeHalvesReserveStrategy::calculate(isize::MAX as usize / 2 + 1, isize::MAX as usize), None);
    }

    #[test]
    fn double_or_min_strategy() {
        assert_eq!(DoubleOrMinReserveStrategy::calculate(4, 5), Some(8));
        assert_eq!(DoubleOrMinReserveStrategy::calculate(4, 20), Some(20));
        assert_eq!(DoubleOrMinReserveStrategy::calculate(usize::MAX, usize::MAX), None);
    }

    #[test]
    fn pow2_strategy() {
        assert_eq!(Pow2ReserveStrategy::calculate(4, 5), Some(8));
        assert_eq!(Pow2ReserveStrategy::calculate(0, 1), Some(1));
        assert_eq!(Pow2ReserveStrategy::calculate(0, usize::MAX), None);
    }

    #[test]
    fn error_display() {
        assert_eq!(Error::IndexOutOfBounds { index: 10, len: 9 }.to_string(), "Index 10 out of bounds for length 9");
        assert_eq!(Error::InvalidArgument("capacity").to_string(), "Invalid argument: capacity");
        assert_eq!(Error::CapacityOverflow.to_string(), "Capacity overflow");
    }
}
