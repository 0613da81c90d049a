use core::{cmp::Ordering, mem};

/// Quicksort using a Lomuto partition with the last element as pivot.
///
/// Only the smaller partition is sorted recursively, the larger one is handled by the loop, which keeps the stack depth at *O*(log(*n*)).
pub(super) fn quick_sort<T, F>(mut v: &mut [T], compare: &mut F) where
    F: FnMut(&T, &T) -> Ordering
{
    while v.len() > 1 {
        let pivot = partition(v, compare);
        let (left, right) = mem::take(&mut v).split_at_mut(pivot);
        // `right[0]` is the pivot, which is already at its final position
        let right = &mut right[1..];

        if left.len() < right.len() {
            quick_sort(left, compare);
            v = right;
        } else {
            quick_sort(right, compare);
            v = left;
        }
    }
}

/// Partitions `v` around its last element and returns the final index of the pivot.
///
/// Every element that doesn't compare greater than the pivot ends up before it.
fn partition<T, F>(v: &mut [T], compare: &mut F) -> usize where
    F: FnMut(&T, &T) -> Ordering
{
    let last = v.len() - 1;
    let mut store = 0;
    for idx in 0..last {
        if compare(&v[idx], &v[last]) != Ordering::Greater {
            v.swap(store, idx);
            store += 1;
        }
    }
    v.swap(store, last);
    store
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partition_places_pivot() {
        let mut v = [7, 2, 9, 1, 5];
        let pivot = partition(&mut v, &mut i32::cmp);
        assert_eq!(pivot, 2);
        assert_eq!(v[2], 5);
        assert!(v[..2].iter().all(|x| *x <= 5));
        assert!(v[3..].iter().all(|x| *x > 5));
    }

    #[test]
    fn sorts_small_slices() {
        let mut empty: [i32; 0] = [];
        quick_sort(&mut empty, &mut i32::cmp);

        let mut single = [3];
        quick_sort(&mut single, &mut i32::cmp);
        assert_eq!(single, [3]);

        let mut v = [3, 1, 2, 3, 1];
        quick_sort(&mut v, &mut i32::cmp);
        assert_eq!(v, [1, 1, 2, 3, 3]);
    }

    #[test]
    fn sorted_input_does_not_overflow_the_stack() {
        let mut v: Vec<u32> = (0..10_000).collect();
        quick_sort(&mut v, &mut u32::cmp);
        assert!(v.windows(2).all(|w| w[0] <= w[1]));
    }
}
