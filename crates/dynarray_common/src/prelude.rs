
pub use crate::collections::{DynamicArray, ReserveStrategy};
pub use crate::dynamic_array;
