use std::{
    alloc::{self, Layout},
    marker::PhantomData,
    mem::{size_of, ManuallyDrop},
    ptr::{self, NonNull},
};

use crate::collections::{Error, ReserveStrategy, Result};


/// Low level utility for more ergonomically allocating, reallocating, and deallocating
/// a buffer of memory without having to worry about all te corner cases involved.
/// In particular:
///
/// - Produces `NonNull::dangling` on zero-sized types
/// - Produces `NonNull::dangling` on zero-length allocations.
/// - Avoids freeing `NonNull::dangling`
/// - Catches all overflows in capacity computations (promotes them to "capacity overflow" errors).
///
/// Unlike `std`'s `RawVec`, the capacity is always the exact number of slots that was requested,
/// also for zero-sized types, so the reported capacity of a container can be relied on.
///
/// This type does not in anyway inspect the memory it manages. When dropped it *will* free its memory, but it *won't* try to drop its contents.
/// It is up to the user of `RawArray` to handle the actual things *stored* inside of `RawArray`
pub(crate) struct RawArray<T, R: ReserveStrategy> {
    ptr:      NonNull<T>,
    cap:      usize,
    _phantom: PhantomData<(T, fn() -> R)>,
}

// SAFETY: `RawArray` uniquely owns its buffer, so it's as thread-safe as `T` itself.
unsafe impl<T: Send, R: ReserveStrategy> Send for RawArray<T, R> {}
unsafe impl<T: Sync, R: ReserveStrategy> Sync for RawArray<T, R> {}

impl<T, R: ReserveStrategy> RawArray<T, R> {
    /// Tries to create a `RawArray` with exactly the capacity and alignment requirements for a `[T; capacity]`.
    /// No memory is allocated when `capacity` is `0` or `T` is zero-sized, but the capacity is still recorded.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let ptr = Self::allocate(capacity)?;
        Ok(Self { ptr, cap: capacity, _phantom: PhantomData })
    }

    /// Creates a `RawArray` with exactly the capacity and alignment requirements for a `[T; capacity]`.
    ///
    /// # Panics
    ///
    /// Panics if the requested capacity exceeds `isize::MAX` bytes.
    ///
    /// # Aborts
    ///
    /// Aborts on OOM
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(arr) => arr,
            Err(err) => handle_error(err),
        }
    }

    /// Takes ownership of the allocation backing a boxed slice, the capacity becomes the length of the slice.
    pub fn from_boxed_slice(slice: Box<[T]>) -> Self {
        let cap = slice.len();
        let ptr = NonNull::from(Box::leak(slice)).cast::<T>();
        Self { ptr, cap, _phantom: PhantomData }
    }

    /// Converts the first `len` elements into a boxed slice, reallocating when the capacity doesn't match `len`.
    ///
    /// # Safety
    ///
    /// The first `len` elements must be initialized and `len` must not exceed the capacity.
    pub unsafe fn into_boxed_slice(mut self, len: usize) -> Box<[T]> {
        debug_assert!(len <= self.cap);
        if self.cap != len {
            self.reallocate(len, len);
        }

        let me = ManuallyDrop::new(self);
        // SAFETY: the allocation has exactly the layout of a `[T; len]` and was allocated by the global allocator
        unsafe { Box::from_raw(ptr::slice_from_raw_parts_mut(me.ptr.as_ptr(), len)) }
    }

    /// Get the capacity of the allocation.
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Get a raw pointer to the start of the allocation.
    /// Note that this is a dangling pointer when either `capacity() == 0` or `T` is zero-sized.
    pub fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Grow the buffer so it can hold at least one more element, using the reserve strategy to pick the new capacity.
    ///
    /// `len` is the number of initialized elements that need to be moved over.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes.
    ///
    /// # Aborts
    ///
    /// Aborts on OOM.
    pub fn grow_one(&mut self, len: usize) {
        if let Err(err) = self.try_grow_one(len) {
            handle_error(err);
        }
    }

    /// The same as `grow_one`, but returns on errors instead of panicking or aborting.
    pub fn try_grow_one(&mut self, len: usize) -> Result<()> {
        let required_cap = self.cap.checked_add(1).ok_or(Error::CapacityOverflow)?;
        let new_cap = R::calculate(self.cap, required_cap).ok_or(Error::CapacityOverflow)?;
        self.try_reallocate(len, new_cap)
    }

    /// Move the first `len` elements into a new allocation of exactly `new_cap` slots.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds `isize::MAX` bytes, or if `len > new_cap`.
    ///
    /// # Aborts
    ///
    /// Aborts on OOM.
    pub fn reallocate(&mut self, len: usize, new_cap: usize) {
        if let Err(err) = self.try_reallocate(len, new_cap) {
            handle_error(err);
        }
    }

    /// The same as `reallocate`, but returns on errors instead of panicking or aborting.
    ///
    /// The buffer is left untouched when an error is returned.
    pub fn try_reallocate(&mut self, len: usize, new_cap: usize) -> Result<()> {
        assert!(len <= new_cap, "Tried to move {len} elements into a buffer of {new_cap} slots");
        let new_arr = Self::try_with_capacity(new_cap)?;
        // SAFETY: `len` fits in the new buffer, and the caller guarantees `len` elements are initialized.
        unsafe { self.replace_with(new_arr, len) };
        Ok(())
    }

    /// Move the first `len` elements into `new_arr` and make it the current buffer, the old buffer is deallocated.
    ///
    /// # Safety
    ///
    /// The first `len` elements must be initialized and `len` must not exceed the capacity of either buffer.
    pub unsafe fn replace_with(&mut self, new_arr: Self, len: usize) {
        debug_assert!(len <= self.cap && len <= new_arr.cap);
        unsafe { ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_arr.ptr.as_ptr(), len) };
        // The old buffer gets dropped here, which only frees the memory
        *self = new_arr;
    }

    //--------------------------------------------------------------

    fn allocate(capacity: usize) -> Result<NonNull<T>> {
        let layout = Layout::array::<T>(capacity).map_err(|_| Error::CapacityOverflow)?;
        if layout.size() == 0 {
            return Ok(NonNull::dangling());
        }

        // SAFETY: the layout has a non-zero size
        let ptr = unsafe { alloc::alloc(layout) };
        NonNull::new(ptr.cast::<T>()).ok_or(Error::AllocError(layout))
    }

    fn current_memory(&self) -> Option<(NonNull<u8>, Layout)> {
        if size_of::<T>() == 0 || self.cap == 0 {
            None
        } else {
            // This memory has already been allocated with this layout, so it can't fail
            Layout::array::<T>(self.cap).ok().map(|layout| (self.ptr.cast(), layout))
        }
    }
}

impl<T, R: ReserveStrategy> Drop for RawArray<T, R> {
    fn drop(&mut self) {
        if let Some((ptr, layout)) = self.current_memory() {
            // SAFETY: `ptr` was allocated by the global allocator with `layout`
            unsafe { alloc::dealloc(ptr.as_ptr(), layout) };
        }
    }
}

/// Central function for reserve error handling
#[cold]
#[track_caller]
fn handle_error(e: Error) -> ! {
    match e {
        Error::AllocError(layout) => alloc::handle_alloc_error(layout),
        _ => capacity_overflow(),
    }
}

#[cold]
#[track_caller]
fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}
