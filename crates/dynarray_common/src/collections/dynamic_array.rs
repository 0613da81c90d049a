use core::{
    any::Any,
    cmp::{self, Ordering},
    fmt::{self, Debug, Display},
    hash::{Hash, Hasher},
    mem::ManuallyDrop,
    ops::{Deref, DerefMut},
    ptr,
    slice,
};

use static_assertions::{assert_impl_all, assert_not_impl_any, const_assert};

use super::{
    imp::array::RawArray,
    impl_slice_partial_eq_generic,
    Error, ReserveStrategy, Result, ThreeHalvesReserveStrategy,
};

mod sort;

/// Capacity of a dynamic array created with [`DynamicArray::new`].
pub const DEFAULT_CAPACITY: usize = 16;

/// A contiguous growable array type, also known as a dynamic array.
///
/// Dynamic arrays have *O*(1) indexing and amortized *O*(1) push (to the end).
///
/// # Examples
///
/// ```
/// use dynarray_common::{dynamic_array, collections::DynamicArray};
///
/// let mut arr = DynamicArray::new();
/// arr.push(1);
/// arr.push(2);
///
/// assert_eq!(arr.len(), 2);
/// assert_eq!(arr.get(0), Ok(&1));
///
/// arr.set(0, 7).unwrap();
/// assert_eq!(arr.to_string(), "[7, 2]");
///
/// let other = dynamic_array![7, 2];
/// assert_eq!(arr.as_slice(), other.as_slice());
/// ```
///
/// # Capacity and reallocation
///
/// The capacity of a dynamic array is the amount of slots allocated for elements, the *length* is the number of actual elements within the dynamic array.
/// The capacity is always exactly what was requested: [`DynamicArray::new`] allocates 16 slots, [`DynamicArray::with_capacity`] allocates the given number of slots,
/// and an adopted array keeps its own length as capacity.
///
/// When a push or insert needs more slots than are available, the storage is reallocated to a capacity decided by the reserve strategy `R`.
/// The default [`ThreeHalvesReserveStrategy`] grows from `cap` to `floor(cap * 3 / 2) + 1` slots.
/// The capacity never shrinks by itself, only [`shrink_to_len`] and [`set_capacity`] reduce it.
///
/// The capacity is part of the identity of a dynamic array: two dynamic arrays only compare equal when they have the same length,
/// the same capacity, and the same elements.
///
/// # Thread safety
///
/// A `DynamicArray` does no synchronization of its own.
/// Callers that want to share one between threads need to wrap it in a lock themselves.
///
/// [`shrink_to_len`]: DynamicArray::shrink_to_len
/// [`set_capacity`]: DynamicArray::set_capacity
pub struct DynamicArray<T, R: ReserveStrategy = ThreeHalvesReserveStrategy> {
    arr: RawArray<T, R>,
    len: usize,
}

const_assert!(DEFAULT_CAPACITY >= 1);
assert_impl_all!(DynamicArray<u32>: Send, Sync, Clone, Default);
assert_not_impl_any!(DynamicArray<std::rc::Rc<u32>>: Send, Sync);

impl<T> DynamicArray<T> {
    /// Constructs a new, empty `DynamicArray<T>` with a capacity of [`DEFAULT_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::new_with_strategy()
    }

    /// Constructs a new, empty `DynamicArray<T>` with exactly the specified capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `capacity` is 0, or [`Error::CapacityOverflow`] if the capacity exceeds `isize::MAX` _bytes_.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Self::with_capacity_and_strategy(capacity)
    }

    /// Constructs a `DynamicArray` that adopts the allocation of `array` as its storage.
    ///
    /// No elements are copied, both the length and the capacity become `array.len()`.
    pub fn from_array(array: Box<[T]>) -> Self {
        Self::from_array_with_strategy(array)
    }

    /// Creates a dynamic array with `n` clones of `elem`, and a capacity of `n` (or 1 when `n` is 0).
    pub fn from_elem(elem: T, n: usize) -> Self where
        T: Clone
    {
        Self::from_elem_with_strategy(elem, n)
    }
}

impl<T, R: ReserveStrategy> DynamicArray<T, R> {
    /// Constructs a new, empty `DynamicArray<T, R>` with a capacity of [`DEFAULT_CAPACITY`].
    #[must_use]
    pub fn new_with_strategy() -> Self {
        Self { arr: RawArray::with_capacity(DEFAULT_CAPACITY), len: 0 }
    }

    /// Constructs a new, empty `DynamicArray<T, R>` with exactly the specified capacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `capacity` is 0, or [`Error::CapacityOverflow`] if the capacity exceeds `isize::MAX` _bytes_.
    pub fn with_capacity_and_strategy(capacity: usize) -> Result<Self> {
        if capacity < 1 {
            return Err(Error::InvalidArgument("The initial capacity has to be a positive number"));
        }
        Ok(Self { arr: RawArray::try_with_capacity(capacity)?, len: 0 })
    }

    /// Constructs a copy of `other`, with the same elements and the same capacity.
    ///
    /// The copy owns its own storage, changes to one of them are never visible through the other.
    pub fn from_other(other: &Self) -> Self where
        T: Clone
    {
        let mut arr = Self { arr: RawArray::with_capacity(other.capacity()), len: 0 };
        for elem in other.iter() {
            // SAFETY: the capacity matches `other`, so there is always a free slot, and `len` is only increased after the write.
            unsafe {
                ptr::write(arr.as_mut_ptr().add(arr.len), elem.clone());
            }
            arr.len += 1;
        }
        arr
    }

    /// Constructs a `DynamicArray<T, R>` that adopts the allocation of `array` as its storage.
    pub fn from_array_with_strategy(array: Box<[T]>) -> Self {
        let len = array.len();
        Self { arr: RawArray::from_boxed_slice(array), len }
    }

    /// Creates a `DynamicArray<T, R>` with `n` clones of `elem`.
    pub fn from_elem_with_strategy(elem: T, n: usize) -> Self where
        T: Clone
    {
        let mut arr = Self { arr: RawArray::with_capacity(cmp::max(n, 1)), len: 0 };
        for _ in 0..n {
            arr.push(elem.clone());
        }
        arr
    }

    /// Returns the total number of element the dynamic array can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.arr.capacity()
    }

    /// Returns `true` when the next push will not need to reallocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynarray_common::collections::DynamicArray;
    ///
    /// let mut arr = DynamicArray::with_capacity(1).unwrap();
    /// assert!(arr.has_spare_capacity());
    /// arr.push(1);
    /// assert!(!arr.has_spare_capacity());
    /// ```
    #[inline]
    pub fn has_spare_capacity(&self) -> bool {
        self.capacity() > self.len
    }

    /// Returns the number of elements in the dynamic array, also referred to as the 'length'.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the dynamic array contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Extracts a slice containing the entire dynamic array.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self
    }

    /// Extracts a mutable slice of the entire dynamic array.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self
    }

    /// Returns a raw pointer to the dynamic array's buffer.
    ///
    /// Modifying the dynamic array may cause its buffer to be reallocated, which would make the pointer invalid.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.arr.ptr()
    }

    /// Returns a raw mutable pointer to the dynamic array's buffer.
    ///
    /// Modifying the dynamic array may cause its buffer to be reallocated, which would make the pointer invalid.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.arr.ptr()
    }

    /// Appends an element to the back of the collection.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` _bytes_
    ///
    /// # Time complexity
    ///
    /// Takes amortized *O*(1) time.
    /// If the dynamic array's length would exceed its capacity after the push, *O*(*capacity*) time is taken to move the elements to a larger allocation.
    #[inline]
    pub fn push(&mut self, value: T) {
        let len = self.len;
        if len == self.capacity() {
            self.grow_one();
        }
        // SAFETY: there is at least one free slot at `len`
        unsafe {
            ptr::write(self.as_mut_ptr().add(len), value);
        }
        self.len += 1;
    }

    /// Removes the last element and returns it, or [`None`] if the dynamic array is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            // SAFETY: the element at the old `len - 1` was initialized and is no longer reachable
            unsafe { Some(ptr::read(self.as_ptr().add(self.len))) }
        }
    }

    /// Inserts an element at position `index`, shifting all element after it to the right.
    ///
    /// An insert requires the dynamic array to already contain elements, use [`push`] to add the first element.
    ///
    /// [`push`]: DynamicArray::push
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if the dynamic array is empty, or if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynarray_common::dynamic_array;
    ///
    /// let mut arr = dynamic_array![1, 2, 3];
    /// arr.insert(1, 4).unwrap();
    /// assert_eq!(arr, [1, 4, 2, 3]);
    /// arr.insert(4, 5).unwrap();
    /// assert_eq!(arr, [1, 4, 2, 3, 5]);
    /// assert!(arr.insert(6, 6).is_err());
    /// ```
    ///
    /// # Time complexity
    ///
    /// Takes *O*([`DynamicArray::len`]) time.
    /// All items after the insertion index must be shifted to the right.
    pub fn insert(&mut self, index: usize, element: T) -> Result<()> {
        let len = self.len;
        if len == 0 || index > len {
            return Err(Error::IndexOutOfBounds { index, len });
        }

        // Space for the new element
        if len == self.capacity() {
            self.grow_one();
        }

        // SAFETY: `index <= len < capacity`
        unsafe {
            let p = self.as_mut_ptr().add(index);
            if index < len {
                // Shift everything over to make space.
                // (Duplicating the `index`th element into two consecutive places.)
                ptr::copy(p, p.add(1), len - index);
            }
            // Write it in, overwriting the first copy of the `index`th element.
            ptr::write(p, element);
        }
        self.len += 1;
        Ok(())
    }

    /// Appends a clone of every element of `other`, in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullReference`] if `other` is `None`.
    pub fn append_all(&mut self, other: Option<&DynamicArray<T, R>>) -> Result<()> where
        T: Clone
    {
        let Some(other) = other else {
            return Err(Error::NullReference("Cannot append the elements of a missing dynamic array"));
        };
        for elem in other.iter() {
            self.push(elem.clone());
        }
        Ok(())
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T> {
        let len = self.len;
        self.as_slice().get(index).ok_or(Error::IndexOutOfBounds { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        self.as_mut_slice().get_mut(index).ok_or(Error::IndexOutOfBounds { index, len })
    }

    /// Overwrites the element at `index`, dropping the old value. The length is not changed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn set(&mut self, index: usize, element: T) -> Result<()> {
        *self.get_mut(index)? = element;
        Ok(())
    }

    /// Removes and returns the element at position `index`, shifting all elements after it to the left.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynarray_common::dynamic_array;
    ///
    /// let mut arr = dynamic_array![1, 2, 3];
    /// assert_eq!(arr.remove(1), Ok(2));
    /// assert_eq!(arr, [1, 3]);
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<T> {
        let len = self.len;
        if index >= len {
            return Err(Error::IndexOutOfBounds { index, len });
        }
        // SAFETY: `index` was checked above
        Ok(unsafe { self.remove_unchecked(index) })
    }

    /// Removes the first element equal to `element`.
    ///
    /// Returns `true` if an element was found and removed, a missing element is not an error.
    pub fn remove_value(&mut self, element: &T) -> bool where
        T: PartialEq
    {
        match self.index_of(element) {
            Some(index) => {
                // SAFETY: `index_of` only returns indices of live elements
                drop(unsafe { self.remove_unchecked(index) });
                true
            },
            None => false,
        }
    }

    /// Removes every element for which `predicate` returns `true`, keeping the order of the remaining elements.
    ///
    /// Returns `true` if at least one element was removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynarray_common::dynamic_array;
    ///
    /// let mut arr = dynamic_array![1, 2, 3, 4, 5, 6];
    /// assert!(arr.remove_where(|x| x % 2 == 0));
    /// assert_eq!(arr, [1, 3, 5]);
    /// assert!(!arr.remove_where(|x| *x > 10));
    /// ```
    pub fn remove_where<F>(&mut self, mut predicate: F) -> bool where
        F: FnMut(&T) -> bool
    {
        let original_len = self.len;
        // Hide all elements while holes exist, the guard restores the length.
        self.len = 0;

        // Layout while processing:
        // [Kept, Kept, Hole, Hole, Unchecked, Unchecked]
        // |<-   processed len  ->| ^- next to check
        //             |<- del  ->|
        //
        // When the predicate or the drop of an element panics, the guard shifts the unchecked elements over the holes.
        let mut guard = scopeguard::guard((self, 0usize, 0usize), |(arr, processed, deleted)| {
            if deleted > 0 {
                // SAFETY: trailing unchecked items must be valid since we never touch them.
                unsafe {
                    let base = arr.as_mut_ptr();
                    ptr::copy(base.add(processed), base.add(processed - deleted), original_len - processed);
                }
            }
            arr.len = original_len - deleted;
        });

        while guard.1 != original_len {
            let (arr, processed, deleted) = &mut *guard;
            // SAFETY: unchecked elements are valid
            let cur = unsafe { arr.as_mut_ptr().add(*processed) };
            if predicate(unsafe { &*cur }) {
                // Advance early, so a panicking drop doesn't cause a double drop
                *processed += 1;
                *deleted += 1;
                // SAFETY: the element is never touched again after this
                unsafe { ptr::drop_in_place(cur) };
            } else {
                if *deleted > 0 {
                    // SAFETY: `deleted > 0`, so the hole can't overlap with the current element
                    unsafe { ptr::copy_nonoverlapping(cur, cur.sub(*deleted), 1) };
                }
                *processed += 1;
            }
        }

        let deleted = guard.2;
        drop(guard);
        deleted > 0
    }

    /// Returns the index of the first element equal to `element`, or `None` if there is no such element.
    pub fn index_of(&self, element: &T) -> Option<usize> where
        T: PartialEq
    {
        self.iter().position(|elem| elem == element)
    }

    /// Returns the index of the last element equal to `element`, or `None` if there is no such element.
    pub fn last_index_of(&self, element: &T) -> Option<usize> where
        T: PartialEq
    {
        self.iter().rposition(|elem| elem == element)
    }

    /// Returns `true` if the dynamic array contains an element equal to `element`.
    pub fn contains(&self, element: &T) -> bool where
        T: PartialEq
    {
        self.index_of(element).is_some()
    }

    /// Shortens the dynamic array, keeping the first `len` elements and dropping the rest.
    ///
    /// If `len` is greater or equal to the dynamic array's current length, this has no effect.
    /// This has no effect on the capacity.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let remaining_len = self.len - len;
        // SAFETY: the length is shrunk before dropping, so a panicking drop can't cause a double drop
        unsafe {
            let s = ptr::slice_from_raw_parts_mut(self.as_mut_ptr().add(len), remaining_len);
            self.len = len;
            ptr::drop_in_place(s);
        }
    }

    /// Clears the dynamic array, removing all values.
    ///
    /// Note that this method has no effect on the allocated capacity of the dynamic array.
    #[inline]
    pub fn clear(&mut self) {
        self.truncate(0)
    }

    /// Reallocates the storage so the capacity is exactly the current length.
    pub fn shrink_to_len(&mut self) {
        if self.capacity() != self.len {
            self.arr.reallocate(self.len, self.len);
        }
    }

    /// Reallocates the storage to exactly `capacity` slots.
    ///
    /// When `capacity` is smaller than the current length, the elements that don't fit anymore are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `capacity` is 0, or [`Error::CapacityOverflow`] if the capacity exceeds `isize::MAX` _bytes_.
    /// The dynamic array is left untouched on error.
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity < 1 {
            return Err(Error::InvalidArgument("The capacity has to be greater or equal to 1"));
        }

        let new_arr = RawArray::try_with_capacity(capacity)?;
        self.truncate(capacity);
        // SAFETY: `len <= capacity` after the truncate, and the first `len` elements are initialized
        unsafe { self.arr.replace_with(new_arr, self.len) };
        Ok(())
    }

    /// Returns a newly allocated array containing clones of all elements, independent of the dynamic array.
    pub fn to_array(&self) -> Box<[T]> where
        T: Clone
    {
        self.as_slice().into()
    }

    /// Converts the dynamic array into a boxed slice, moving the elements.
    ///
    /// The storage is reallocated first when there is spare capacity.
    pub fn into_boxed_slice(self) -> Box<[T]> {
        let me = ManuallyDrop::new(self);
        // SAFETY: `me` is never used or dropped again, so the buffer is moved out exactly once
        unsafe {
            let arr = ptr::read(&me.arr);
            arr.into_boxed_slice(me.len)
        }
    }

    /// Formats the elements as `[e0, e1, ..., en]`, or `[]` when empty.
    pub fn format(&self) -> String where
        T: Display
    {
        self.to_string()
    }

    /// Compares with a value of any type.
    ///
    /// Returns `false` when `other` is `None` or not a dynamic array of the same type, otherwise this is the same as `==`.
    pub fn equals_any(&self, other: Option<&dyn Any>) -> bool where
        T: PartialEq + 'static,
        R: 'static
    {
        other.and_then(|other| other.downcast_ref::<Self>()).map_or(false, |other| self == other)
    }

    /// Sorts the dynamic array in place with a comparator function.
    ///
    /// This uses a quicksort with a Lomuto partition, using the last element of each range as pivot.
    /// The sort is not stable, and takes *O*(*n* \* log(*n*)) time on average, *O*(*n*^2) in the worst case.
    ///
    /// # Examples
    ///
    /// ```
    /// use dynarray_common::dynamic_array;
    ///
    /// let mut arr = dynamic_array![5, 4, 1, 3, 2];
    /// arr.sort_by(|a, b| b.cmp(a));
    /// assert_eq!(arr, [5, 4, 3, 2, 1]);
    /// ```
    pub fn sort_by<F>(&mut self, mut compare: F) where
        F: FnMut(&T, &T) -> Ordering
    {
        sort::quick_sort(self.as_mut_slice(), &mut compare);
    }

    /// Sorts the dynamic array in place in ascending order.
    ///
    /// See [`sort_by`] for details.
    ///
    /// [`sort_by`]: DynamicArray::sort_by
    pub fn sort(&mut self) where
        T: Ord
    {
        self.sort_by(T::cmp)
    }

    //--------------------------------------------------------------

    #[cold]
    fn grow_one(&mut self) {
        self.arr.grow_one(self.len);
    }

    /// # Safety
    ///
    /// `index` needs to be smaller than the length
    unsafe fn remove_unchecked(&mut self, index: usize) -> T {
        debug_assert!(index < self.len);
        let len = self.len;
        unsafe {
            // The place we are taking from
            let ptr = self.as_mut_ptr().add(index);
            // Copy it out, unsafely having a copy of the value on the stack and in the dynamic array at the same time
            let ret = ptr::read(ptr);
            // Shift everything down to fill in that spot
            ptr::copy(ptr.add(1), ptr, len - index - 1);
            self.len = len - 1;
            ret
        }
    }
}

/// Creates a [`DynamicArray`] containing the arguments.
///
/// - `dynamic_array![]` creates an empty dynamic array with the default capacity.
/// - `dynamic_array![a, b, c]` creates a dynamic array with the given elements, and a capacity equal to the number of elements.
/// - `dynamic_array![elem; n]` creates a dynamic array with `n` clones of `elem`.
#[macro_export]
macro_rules! dynamic_array {
    () => {
        $crate::collections::DynamicArray::new()
    };
    ($elem:expr; $n:expr) => {
        $crate::collections::DynamicArray::from_elem($elem, $n)
    };
    ($($val:expr),+ $(,)?) => {
        $crate::collections::DynamicArray::from_array(::std::boxed::Box::new([$($val),+]))
    };
}

impl<T, R: ReserveStrategy> Drop for DynamicArray<T, R> {
    fn drop(&mut self) {
        // SAFETY: the first `len` elements are initialized, `RawArray` handles deallocation
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len))
        }
    }
}

impl<T, R: ReserveStrategy> Deref for DynamicArray<T, R> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        // SAFETY: the first `len` elements are initialized
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }
}

impl<T, R: ReserveStrategy> DerefMut for DynamicArray<T, R> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        // SAFETY: the first `len` elements are initialized
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }
}

impl<T, R: ReserveStrategy> Default for DynamicArray<T, R> {
    /// Creates an empty `DynamicArray<T, R>` with the default capacity.
    fn default() -> Self {
        Self::new_with_strategy()
    }
}

impl<T: Clone, R: ReserveStrategy> Clone for DynamicArray<T, R> {
    /// Creates a copy with the same elements and capacity, see [`DynamicArray::from_other`].
    fn clone(&self) -> Self {
        Self::from_other(self)
    }
}

impl<T, U, R0, R1> PartialEq<DynamicArray<U, R1>> for DynamicArray<T, R0> where
    T: PartialEq<U>,
    R0: ReserveStrategy,
    R1: ReserveStrategy,
{
    /// Dynamic arrays are equal when their length, capacity, and elements are equal, compared in that order.
    fn eq(&self, other: &DynamicArray<U, R1>) -> bool {
        if self.len != other.len {
            return false;
        }
        if self.capacity() != other.capacity() {
            return false;
        }
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq, R: ReserveStrategy> Eq for DynamicArray<T, R> {}

impl_slice_partial_eq_generic!([R: ReserveStrategy] DynamicArray<T, R>, &[U]);
impl_slice_partial_eq_generic!([R: ReserveStrategy] DynamicArray<T, R>, &mut [U]);
impl_slice_partial_eq_generic!([R: ReserveStrategy] DynamicArray<T, R>, [U]);
impl_slice_partial_eq_generic!([R: ReserveStrategy, const N: usize] DynamicArray<T, R>, [U; N]);
impl_slice_partial_eq_generic!([R: ReserveStrategy, const N: usize] DynamicArray<T, R>, &[U; N]);

impl<T: Hash, R: ReserveStrategy> Hash for DynamicArray<T, R> {
    /// Hashes the same properties that are used for equality: length, capacity, and elements.
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        self.capacity().hash(state);
        Hash::hash(self.as_slice(), state)
    }
}

impl<T: Debug, R: ReserveStrategy> Debug for DynamicArray<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(self.as_slice(), f)
    }
}

impl<T: Display, R: ReserveStrategy> Display for DynamicArray<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, elem) in self.iter().enumerate() {
            if idx != 0 {
                f.write_str(", ")?;
            }
            write!(f, "{elem}")?;
        }
        f.write_str("]")
    }
}

impl<T, R: ReserveStrategy> AsRef<[T]> for DynamicArray<T, R> {
    fn as_ref(&self) -> &[T] {
        self
    }
}

impl<T, R: ReserveStrategy> AsMut<[T]> for DynamicArray<T, R> {
    fn as_mut(&mut self) -> &mut [T] {
        self
    }
}

impl<'a, T, R: ReserveStrategy> IntoIterator for &'a DynamicArray<T, R> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, R: ReserveStrategy> IntoIterator for &'a mut DynamicArray<T, R> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, R: ReserveStrategy> IntoIterator for DynamicArray<T, R> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    /// Creates a consuming iterator, that moves each value out of the dynamic array (from start to end).
    fn into_iter(self) -> Self::IntoIter {
        self.into_boxed_slice().into_vec().into_iter()
    }
}

impl<T, R: ReserveStrategy> FromIterator<T> for DynamicArray<T, R> {
    /// Collects into a dynamic array that starts at the default capacity and grows like repeated pushes.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::new_with_strategy();
        arr.extend(iter);
        arr
    }
}

impl<T, R: ReserveStrategy> Extend<T> for DynamicArray<T, R> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for elem in iter {
            self.push(elem);
        }
    }
}

impl<T, R: ReserveStrategy> From<Box<[T]>> for DynamicArray<T, R> {
    fn from(array: Box<[T]>) -> Self {
        Self::from_array_with_strategy(array)
    }
}

impl<T, R: ReserveStrategy> From<Vec<T>> for DynamicArray<T, R> {
    fn from(vec: Vec<T>) -> Self {
        Self::from_array_with_strategy(vec.into_boxed_slice())
    }
}

impl<T, R: ReserveStrategy, const N: usize> From<[T; N]> for DynamicArray<T, R> {
    fn from(array: [T; N]) -> Self {
        let boxed: Box<[T]> = Box::new(array);
        Self::from_array_with_strategy(boxed)
    }
}

impl<T: Clone, R: ReserveStrategy> From<&[T]> for DynamicArray<T, R> {
    fn from(slice: &[T]) -> Self {
        Self::from_array_with_strategy(slice.into())
    }
}

impl<T, R: ReserveStrategy> From<DynamicArray<T, R>> for Box<[T]> {
    fn from(arr: DynamicArray<T, R>) -> Self {
        arr.into_boxed_slice()
    }
}

#[cfg(test)]
mod tests;
