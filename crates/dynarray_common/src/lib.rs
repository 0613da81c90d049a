//! Growable, contiguous containers with an exact and observable capacity.

pub mod collections;
pub mod prelude;
