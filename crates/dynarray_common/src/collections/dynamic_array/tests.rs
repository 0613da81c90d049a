use std::{
    any::Any,
    cell::Cell,
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    panic::{self, AssertUnwindSafe},
    rc::Rc,
};

use super::*;
use crate::{collections::DoubleOrMinReserveStrategy, dynamic_array};

/// Counts how many times it was dropped
#[derive(Clone)]
struct DropCounter<'a>(&'a Cell<usize>);

impl Drop for DropCounter<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() + 1);
    }
}

fn hash_of<T: Hash>(val: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    val.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn dynamic_array_new() {
    let arr = DynamicArray::<i32>::new();
    assert_eq!(arr.capacity(), DEFAULT_CAPACITY);
    assert_eq!(arr.len(), 0);
    assert!(arr.is_empty());

    let arr = DynamicArray::<i32>::with_capacity(21).unwrap();
    assert_eq!(arr.capacity(), 21);
    assert_eq!(arr.len(), 0);

    assert_eq!(DynamicArray::<i32>::with_capacity(0).err(), Some(Error::InvalidArgument("The initial capacity has to be a positive number")));
    assert_eq!(DynamicArray::<u64>::with_capacity(usize::MAX).err(), Some(Error::CapacityOverflow));

    let arr = DynamicArray::<i32>::default();
    assert_eq!(arr.capacity(), DEFAULT_CAPACITY);
}

#[test]
fn dynamic_array_constructors() {
    let expected: Box<[i32]> = (0..=10).collect();

    let adopted = DynamicArray::from_array(expected.clone());
    assert_eq!(adopted.len(), 11);
    assert_eq!(adopted.capacity(), 11);
    assert_eq!(adopted.to_array(), expected);

    let copied = DynamicArray::from_other(&adopted);
    assert_eq!(copied.to_array(), expected);
    assert_eq!(copied.capacity(), adopted.capacity());

    let mut pushed = DynamicArray::new();
    for i in 0..=10 {
        pushed.push(i);
    }
    assert_eq!(pushed.to_array(), expected);

    let empty = DynamicArray::<i32>::from_array(Box::new([]));
    assert!(empty.is_empty());
    assert_eq!(empty.capacity(), 0);
}

#[test]
fn dynamic_array_copy_is_independent() {
    let mut arr = dynamic_array![String::from("a"), String::from("b")];
    let copy = DynamicArray::from_other(&arr);

    arr.set(0, String::from("z")).unwrap();
    arr.push(String::from("c"));

    assert_eq!(copy.to_string(), "[a, b]");
    assert_eq!(arr.to_string(), "[z, b, c]");

    let clone = arr.clone();
    assert_eq!(clone, arr);
}

#[test]
fn dynamic_array_macro() {
    let arr: DynamicArray<i32> = dynamic_array![];
    assert!(arr.is_empty());
    assert_eq!(arr.capacity(), DEFAULT_CAPACITY);

    let arr = dynamic_array![1, 2, 3];
    assert_eq!(arr, [1, 2, 3]);
    assert_eq!(arr.capacity(), 3);

    let arr = dynamic_array![7u8; 4];
    assert_eq!(arr, [7, 7, 7, 7]);
    assert_eq!(arr.capacity(), 4);

    let arr = dynamic_array![7u8; 0];
    assert!(arr.is_empty());
    assert_eq!(arr.capacity(), 1);
}

#[test]
fn dynamic_array_conversions() {
    let arr = DynamicArray::<u32>::from(vec![1, 2, 3]);
    assert_eq!(arr.capacity(), 3);
    assert_eq!(arr, [1, 2, 3]);

    let arr = DynamicArray::<u32>::from([4, 5]);
    assert_eq!(arr, &[4, 5]);

    let arr = DynamicArray::<u32>::from(&[6, 7][..]);
    assert_eq!(arr, &[6, 7][..]);

    let arr: DynamicArray<u32> = (0..20).collect();
    assert_eq!(arr.len(), 20);
    assert_eq!(arr.capacity(), 25);

    let mut arr = dynamic_array![1, 2];
    arr.extend([3, 4]);
    let boxed: Box<[i32]> = arr.into();
    assert_eq!(&*boxed, &[1, 2, 3, 4]);

    let arr = dynamic_array![String::from("x"), String::from("y")];
    let collected: Vec<String> = arr.into_iter().collect();
    assert_eq!(collected, ["x", "y"]);
}

#[test]
fn dynamic_array_push_grows() {
    let mut arr = DynamicArray::<i32>::new();
    for i in 0..16 {
        arr.push(i);
    }
    assert_eq!(arr.capacity(), 16);

    arr.push(16);
    assert_eq!(arr.capacity(), 25);
    assert_eq!(arr.len(), 17);
    assert!(arr.iter().copied().eq(0..17));

    let mut arr = DynamicArray::<i32, DoubleOrMinReserveStrategy>::with_capacity_and_strategy(2).unwrap();
    arr.push(1);
    arr.push(2);
    arr.push(3);
    assert_eq!(arr.capacity(), 4);
}

#[test]
fn dynamic_array_pop() {
    let mut arr = dynamic_array![1, 2];
    assert_eq!(arr.pop(), Some(2));
    assert_eq!(arr.pop(), Some(1));
    assert_eq!(arr.pop(), None);
    assert_eq!(arr.capacity(), 2);
}

#[test]
fn dynamic_array_to_string() {
    let mut arr = DynamicArray::<i32>::new();
    assert_eq!(arr.to_string(), "[]");
    for i in 0..5 {
        arr.push(i);
    }
    assert_eq!(arr.to_string(), "[0, 1, 2, 3, 4]");
    assert_eq!(arr.format(), "[0, 1, 2, 3, 4]");
    assert_eq!(format!("{arr:?}"), "[0, 1, 2, 3, 4]");
}

#[test]
fn dynamic_array_to_string_ignores_format_flags() {
    let arr = dynamic_array![1, 22, 333];
    assert_eq!(format!("{arr:>4}"), "[1, 22, 333]");
    assert_eq!(format!("{arr:05}"), "[1, 22, 333]");

    let floats = dynamic_array![1.5f64, 2.25];
    assert_eq!(format!("{floats:.3}"), "[1.5, 2.25]");
    assert_eq!(floats.format(), floats.to_string());
}

#[test]
fn dynamic_array_add_methods() {
    let mut arr = DynamicArray::new();
    for i in 0..20 {
        arr.push(i);
    }
    assert_eq!(arr.len(), 20);
    assert_eq!(arr.get(15), Ok(&15));
    assert_eq!(arr.get(0), Ok(&0));
    arr.clear();
    assert!(arr.is_empty());

    for i in 0..20 {
        arr.push(i);
    }
    arr.insert(0, 100).unwrap();
    arr.insert(10, 200).unwrap();
    for i in 0..100 {
        arr.push(i);
    }
    let len = arr.len();
    arr.insert(len, 300).unwrap();
    assert_eq!(arr.get(0), Ok(&100));
    assert_eq!(arr.get(10), Ok(&200));
    assert_eq!(arr.get(arr.len() - 1), Ok(&300));
    assert_eq!(arr.len(), 123);
    arr.clear();

    let mut second = DynamicArray::new();
    for i in 0..5 {
        arr.push(i);
        second.push(i);
    }
    arr.append_all(Some(&second)).unwrap();
    assert_eq!(arr.len(), 10);
    assert_eq!(arr.to_string(), "[0, 1, 2, 3, 4, 0, 1, 2, 3, 4]");
    assert_eq!(second.len(), 5);

    assert!(matches!(arr.append_all(None), Err(Error::NullReference(_))));
    assert_eq!(arr.len(), 10);
}

#[test]
fn dynamic_array_append_own_copy() {
    let mut arr = dynamic_array![0, 1, 2, 3, 4];
    let copy = arr.clone();
    arr.append_all(Some(&copy)).unwrap();
    assert_eq!(arr.to_string(), "[0, 1, 2, 3, 4, 0, 1, 2, 3, 4]");
}

#[test]
fn dynamic_array_insert() {
    let mut arr = dynamic_array![1, 2, 3];
    arr.insert(1, 4).unwrap();
    assert_eq!(arr, [1, 4, 2, 3]);
    assert_eq!(arr.capacity(), 5);

    arr.insert(4, 5).unwrap();
    assert_eq!(arr, [1, 4, 2, 3, 5]);
    assert_eq!(arr.capacity(), 5);

    arr.insert(0, 0).unwrap();
    assert_eq!(arr, [0, 1, 4, 2, 3, 5]);
    assert_eq!(arr.capacity(), 8);

    assert_eq!(arr.insert(7, 6), Err(Error::IndexOutOfBounds { index: 7, len: 6 }));
    assert_eq!(arr.len(), 6);
}

#[test]
fn dynamic_array_insert_into_empty() {
    let mut arr = DynamicArray::<i32>::new();
    assert_eq!(arr.insert(0, 1), Err(Error::IndexOutOfBounds { index: 0, len: 0 }));
    assert!(arr.is_empty());

    arr.push(1);
    assert_eq!(arr.insert(0, 0), Ok(()));
    assert_eq!(arr, [0, 1]);
}

#[test]
fn dynamic_array_set() {
    let mut arr = DynamicArray::with_capacity(5).unwrap();
    for i in 0..5 {
        arr.push(i);
        arr.set(i, 0).unwrap();
        assert_eq!(arr.get(i), Ok(&0));
    }
    assert_eq!(arr.len(), 5);
    assert!(arr.set(6, 0).is_err());
    assert!(arr.set(5, 0).is_err());

    arr.push(0);
    assert_eq!(arr.len(), 6);
    assert_eq!(arr.set(7, 0), Err(Error::IndexOutOfBounds { index: 7, len: 6 }));
    assert_eq!(arr.set(5, 1), Ok(()));
    assert_eq!(arr.get(5), Ok(&1));
    assert_eq!(arr.get(6), Err(Error::IndexOutOfBounds { index: 6, len: 6 }));

    *arr.get_mut(0).unwrap() = 9;
    assert_eq!(arr[0], 9);
}

#[test]
fn dynamic_array_remove_methods() {
    let strings = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9", "10"].map(String::from);
    let mut arr: DynamicArray<String> = strings.into();

    assert_eq!(arr.remove(5).as_deref(), Ok("5"));
    assert_eq!(arr.to_string(), "[0, 1, 2, 3, 4, 6, 7, 8, 9, 10]");

    assert!(arr.remove_value(&String::from("4")));
    assert_eq!(arr.to_string(), "[0, 1, 2, 3, 6, 7, 8, 9, 10]");
    assert!(!arr.remove_value(&String::from("11")));

    assert_eq!(arr.remove(10), Err(Error::IndexOutOfBounds { index: 10, len: 9 }));
    assert_eq!(arr.remove(9), Err(Error::IndexOutOfBounds { index: 9, len: 9 }));
    assert_eq!(arr.capacity(), 11);

    arr.clear();
    for i in 0..10 {
        arr.push(if i % 2 == 1 { String::from("1") } else { String::from("0") });
    }
    assert!(arr.remove_where(|x| x == "1"));
    assert_eq!(arr.to_string(), "[0, 0, 0, 0, 0]");
    assert!(!arr.remove_where(|x| x == "1"));
}

#[test]
fn dynamic_array_remove_value_first_match() {
    let mut arr = dynamic_array![3, 1, 3, 2];
    assert!(arr.remove_value(&3));
    assert_eq!(arr, [1, 3, 2]);
}

#[test]
fn dynamic_array_remove_where_drops() {
    let drops = Cell::new(0);
    let mut arr = DynamicArray::new();
    for _ in 0..6 {
        arr.push(DropCounter(&drops));
    }

    let mut idx = 0;
    arr.remove_where(|_| {
        idx += 1;
        idx % 3 == 0
    });
    assert_eq!(arr.len(), 4);
    assert_eq!(drops.get(), 2);

    drop(arr);
    assert_eq!(drops.get(), 6);
}

#[test]
fn dynamic_array_remove_where_panic_keeps_elements() {
    let mut arr = dynamic_array![1, 2, 3, 4, 5, 6];
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        arr.remove_where(|x| {
            if *x == 4 {
                panic!("predicate failed");
            }
            x % 2 == 0
        })
    }));
    assert!(result.is_err());
    assert_eq!(arr, [1, 3, 4, 5, 6]);
}

#[test]
fn dynamic_array_index_of() {
    let mut arr: DynamicArray<i32> = [1, 2, 3, 3, 5, 6, 7, 3, 3, 10].into();
    assert_eq!(arr.index_of(&3), Some(2));
    assert_eq!(arr.last_index_of(&3), Some(8));
    assert_eq!(arr.index_of(&4), None);
    assert_eq!(arr.last_index_of(&4), None);
    assert!(arr.contains(&10));
    assert!(!arr.contains(&11));

    arr.clear();
    assert_eq!(arr.index_of(&3), None);
}

#[test]
fn dynamic_array_spare_capacity() {
    let mut arr = DynamicArray::with_capacity(5).unwrap();
    for i in 0..5 {
        arr.push(i);
    }
    assert!(!arr.has_spare_capacity());
    arr.push(5);
    assert!(arr.has_spare_capacity());
    assert_eq!(arr.capacity(), 8);
}

#[test]
fn dynamic_array_capacity_changes() {
    let mut arr = DynamicArray::<i32>::new();
    arr.extend(0..5);

    arr.shrink_to_len();
    assert_eq!(arr.capacity(), 5);
    assert_eq!(arr, [0, 1, 2, 3, 4]);

    arr.set_capacity(10).unwrap();
    assert_eq!(arr.capacity(), 10);
    assert_eq!(arr, [0, 1, 2, 3, 4]);

    arr.set_capacity(3).unwrap();
    assert_eq!(arr.capacity(), 3);
    assert_eq!(arr, [0, 1, 2]);

    assert_eq!(arr.set_capacity(0), Err(Error::InvalidArgument("The capacity has to be greater or equal to 1")));
    assert_eq!(arr.capacity(), 3);

    arr.clear();
    arr.shrink_to_len();
    assert_eq!(arr.capacity(), 0);
    arr.push(1);
    assert_eq!(arr.capacity(), 1);
    arr.push(2);
    assert_eq!(arr.capacity(), 2);
}

#[test]
fn dynamic_array_set_capacity_drops_surplus() {
    let drops = Cell::new(0);
    let mut arr = DynamicArray::new();
    for _ in 0..5 {
        arr.push(DropCounter(&drops));
    }
    arr.set_capacity(2).unwrap();
    assert_eq!(drops.get(), 3);
    assert_eq!(arr.len(), 2);
}

#[test]
fn dynamic_array_to_array_is_independent() {
    let arr = dynamic_array![1, 2, 3, 4, 5];
    let mut copy = arr.to_array();
    copy[0] = 10;
    assert_eq!(&*copy, &[10, 2, 3, 4, 5]);
    assert_eq!(arr, [1, 2, 3, 4, 5]);
}

#[test]
fn dynamic_array_equality() {
    let mut adopted: DynamicArray<i32> = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10].into();
    let mut with_cap = DynamicArray::with_capacity(10).unwrap();
    for i in 1..11 {
        with_cap.push(i);
    }
    assert_eq!(adopted, with_cap);
    assert!(adopted.equals_any(Some(&with_cap)));
    assert_eq!(hash_of(&adopted), hash_of(&with_cap));

    adopted.set_capacity(11).unwrap();
    adopted.push(11);
    assert_ne!(adopted, with_cap);

    with_cap.push(11);
    assert_eq!(adopted.len(), with_cap.len());
    assert_ne!(adopted.capacity(), with_cap.capacity());
    assert_ne!(adopted, with_cap);

    let object: Box<dyn Any> = Box::new(42u32);
    assert!(!adopted.equals_any(Some(&*object)));
    assert!(!adopted.equals_any(None));
}

#[test]
fn dynamic_array_equality_is_capacity_sensitive() {
    let a: DynamicArray<i32> = dynamic_array![1, 2];
    let mut b = DynamicArray::new();
    b.push(1);
    b.push(2);

    assert_eq!(a, [1, 2]);
    assert_eq!(b, [1, 2]);
    assert_ne!(a, b);
}

#[test]
fn dynamic_array_sort() {
    let mut ints = DynamicArray::new();
    let mut ints_sorted = DynamicArray::new();
    let mut doubles = DynamicArray::new();
    let mut doubles_sorted = DynamicArray::new();
    let mut strings = DynamicArray::new();
    let mut strings_sorted = DynamicArray::new();

    for (i, j) in (0..10).rev().zip(0..10) {
        ints.push(i);
        ints_sorted.push(j);
        doubles.push(i as f64 + 0.00001);
        doubles_sorted.push(j as f64 + 0.00001);
        strings.push(i.to_string());
        strings_sorted.push(j.to_string());
    }

    ints.sort();
    assert_eq!(ints, ints_sorted);

    doubles.sort_by(f64::total_cmp);
    assert_eq!(doubles, doubles_sorted);

    strings.sort_by(|a, b| a.cmp(b));
    assert_eq!(strings, strings_sorted);
}

#[test]
fn dynamic_array_sort_edge_cases() {
    let mut arr = DynamicArray::<i32>::new();
    arr.sort();
    assert!(arr.is_empty());

    arr.push(1);
    arr.sort();
    assert_eq!(arr, [1]);

    let mut arr = dynamic_array![2, 2, 1, 1, 2];
    arr.sort();
    assert_eq!(arr, [1, 1, 2, 2, 2]);
    arr.sort_by(|a, b| b.cmp(a));
    assert_eq!(arr, [2, 2, 2, 1, 1]);
}

#[test]
fn dynamic_array_zero_sized() {
    let mut arr = DynamicArray::<()>::with_capacity(2).unwrap();
    arr.push(());
    arr.push(());
    arr.push(());
    assert_eq!(arr.len(), 3);
    assert_eq!(arr.capacity(), 4);
    assert_eq!(arr.remove(0), Ok(()));
    assert_eq!(arr.len(), 2);
}

#[test]
fn dynamic_array_drops_elements() {
    let rc = Rc::new(());
    {
        let mut arr = DynamicArray::new();
        for _ in 0..20 {
            arr.push(rc.clone());
        }
        assert_eq!(Rc::strong_count(&rc), 21);
        arr.truncate(10);
        assert_eq!(Rc::strong_count(&rc), 11);
    }
    assert_eq!(Rc::strong_count(&rc), 1);
}

mod proptests {
    use super::*;
    use std::cmp::Ordering;

    use proptest::prelude::*;

    proptest! {
        /// Property: the length tracks pushes, and the capacity only changes when the container is full
        #[test]
        fn push_tracks_len_and_capacity(values in prop::collection::vec(any::<u32>(), 0..200)) {
            let mut arr = DynamicArray::new();
            for (i, &v) in values.iter().enumerate() {
                let old_cap = arr.capacity();
                arr.push(v);
                prop_assert_eq!(arr.len(), i + 1);
                prop_assert!(arr.len() <= arr.capacity());
                if i < old_cap {
                    prop_assert_eq!(arr.capacity(), old_cap);
                } else {
                    prop_assert_eq!(arr.capacity(), old_cap * 3 / 2 + 1);
                }
            }
            prop_assert_eq!(arr.as_slice(), values.as_slice());
        }

        /// Property: inserting behaves like `Vec::insert` for valid indices
        #[test]
        fn insert_matches_vec(
            initial in prop::collection::vec(any::<i16>(), 1..50),
            inserts in prop::collection::vec((any::<prop::sample::Index>(), any::<i16>()), 0..50),
        ) {
            let mut arr: DynamicArray<i16> = initial.clone().into();
            let mut expected = initial;
            for (idx, val) in inserts {
                let idx = idx.index(expected.len() + 1);
                let old_cap = arr.capacity();
                prop_assert_eq!(arr.insert(idx, val), Ok(()));
                expected.insert(idx, val);
                prop_assert!(arr.capacity() >= old_cap);
            }
            prop_assert_eq!(arr.as_slice(), expected.as_slice());
        }

        /// Property: `remove_where` keeps exactly the elements that don't match, in order
        #[test]
        fn remove_where_matches_retain(values in prop::collection::vec(any::<u8>(), 0..100), divisor in 1u8..8) {
            let mut arr: DynamicArray<u8> = values.clone().into();
            let removed = arr.remove_where(|x| x % divisor == 0);

            let mut expected = values.clone();
            expected.retain(|x| x % divisor != 0);
            prop_assert_eq!(removed, expected.len() != values.len());
            prop_assert_eq!(arr.as_slice(), expected.as_slice());
            prop_assert_eq!(arr.capacity(), values.len());
        }

        /// Property: `to_array` followed by `from_array` gives an equal container only when no slots were spare
        #[test]
        fn array_round_trip(values in prop::collection::vec(any::<u32>(), 1..40), spare in 0usize..4) {
            let mut arr = DynamicArray::with_capacity(values.len() + spare).unwrap();
            arr.extend(values.iter().copied());

            let round_trip = DynamicArray::from_array(arr.to_array());
            prop_assert_eq!(round_trip.as_slice(), arr.as_slice());
            prop_assert_eq!(round_trip == arr, spare == 0);
        }

        /// Property: sorting gives the same order as the standard library sort
        #[test]
        fn sort_matches_std(values in prop::collection::vec(any::<i32>(), 0..300)) {
            let mut arr: DynamicArray<i32> = values.clone().into();
            arr.sort();

            let mut expected = values;
            expected.sort_unstable();
            prop_assert_eq!(arr.as_slice(), expected.as_slice());
        }

        /// Property: sorting with any consistent comparator orders adjacent pairs and keeps the same elements
        #[test]
        fn sort_by_any_comparator(
            values in prop::collection::vec(any::<i32>(), 0..300),
            modulus in 1i32..8,
            descending in any::<bool>(),
        ) {
            let key = |x: &i32| x.rem_euclid(modulus);
            let mut compare = |a: &i32, b: &i32| {
                let ord = key(a).cmp(&key(b));
                if descending { ord.reverse() } else { ord }
            };

            let mut arr: DynamicArray<i32> = values.clone().into();
            arr.sort_by(&mut compare);

            for pair in arr.windows(2) {
                prop_assert_ne!(compare(&pair[0], &pair[1]), Ordering::Greater);
            }

            let mut sorted_result = arr.to_array().into_vec();
            sorted_result.sort_unstable();
            let mut sorted_input = values;
            sorted_input.sort_unstable();
            prop_assert_eq!(sorted_result, sorted_input);
            prop_assert_eq!(arr.capacity(), arr.len());
        }

        /// Property: `index_of` and `last_index_of` find the first and last match
        #[test]
        fn index_of_matches_position(values in prop::collection::vec(0u8..10, 0..50), needle in 0u8..10) {
            let arr: DynamicArray<u8> = values.clone().into();
            prop_assert_eq!(arr.index_of(&needle), values.iter().position(|x| *x == needle));
            prop_assert_eq!(arr.last_index_of(&needle), values.iter().rposition(|x| *x == needle));
        }

        /// Property: out of range indices are rejected without changing the container
        #[test]
        fn out_of_range_access_is_rejected(values in prop::collection::vec(any::<u32>(), 0..20), offset in 0usize..10) {
            let mut arr: DynamicArray<u32> = values.clone().into();
            let idx = values.len() + offset;
            prop_assert_eq!(arr.get(idx), Err(Error::IndexOutOfBounds { index: idx, len: values.len() }));
            prop_assert!(arr.set(idx, 0).is_err());
            prop_assert!(arr.remove(idx).is_err());
            prop_assert_eq!(arr.as_slice(), values.as_slice());
        }
    }
}
