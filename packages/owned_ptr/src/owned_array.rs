use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Index, IndexMut};
use std::ptr::{self, NonNull};

use tracing::trace;

use crate::{DefaultDeleteArray, Deleter, Null};

/// Exclusive owner of an array, released as a whole through the deleter `D` when dropped.
///
/// This is the array counterpart of [`Owned`](crate::Owned), with the same ownership
/// contract. Instead of dereferencing to a single value, it offers indexed element access.
/// The owned address carries the element count, so indexing through [`Index`] is bounds
/// checked; [`get_unchecked()`](Self::get_unchecked) skips the check.
///
/// The default deleter [`DefaultDeleteArray`] releases arrays allocated as `Box<[T]>`.
///
/// # Examples
///
/// ```
/// use owned_ptr::OwnedArray;
///
/// let mut array = OwnedArray::from(vec![10, 20, 30]);
/// array[1] += 5;
///
/// assert_eq!(array.len(), 3);
/// assert_eq!(array[1], 25);
/// assert_eq!(array.as_slice(), &[10, 25, 30]);
/// ```
pub struct OwnedArray<T, D: Deleter<[T]> = DefaultDeleteArray> {
    ptr: Option<NonNull<[T]>>,
    deleter: D,

    // We own the `T` elements, which matters for drop checking.
    _owns: PhantomData<[T]>,
}

impl<T, D: Deleter<[T]>> OwnedArray<T, D> {
    /// Creates an empty owner with a default-constructed deleter.
    #[must_use]
    pub fn new() -> Self
    where
        D: Default,
    {
        Self::with_deleter(D::default())
    }

    /// Creates an empty owner that will use `deleter` for any array it later adopts.
    #[must_use]
    pub const fn with_deleter(deleter: D) -> Self {
        Self {
            ptr: None,
            deleter,
            _owns: PhantomData,
        }
    }

    /// Takes ownership of the array at `ptr`, using a default-constructed deleter.
    ///
    /// A null `ptr` produces an empty owner.
    ///
    /// # Safety
    ///
    /// If `ptr` is not null, the caller must ensure that:
    ///
    /// 1. `ptr` refers to a live array of initialized elements, with the length carried by
    ///    `ptr`, allocated in the shape `D` releases.
    /// 2. Nothing else releases, or accesses under an assumption of ownership, the array
    ///    for as long as the returned owner holds it.
    #[must_use]
    pub unsafe fn from_raw(ptr: *mut [T]) -> Self
    where
        D: Default,
    {
        // SAFETY: Forwarding the guarantees of our own caller.
        unsafe { Self::from_raw_with_deleter(ptr, D::default()) }
    }

    /// Takes ownership of the array at `ptr`, releasing it later through `deleter`.
    ///
    /// # Safety
    ///
    /// Same requirements as [`from_raw()`](Self::from_raw), with the array allocated in the
    /// shape `deleter` releases.
    #[must_use]
    pub unsafe fn from_raw_with_deleter(ptr: *mut [T], deleter: D) -> Self {
        Self {
            ptr: NonNull::new(ptr),
            deleter,
            _owns: PhantomData,
        }
    }

    /// Takes ownership of the `len` elements starting at `first`.
    ///
    /// A null `first` produces an empty owner regardless of `len`.
    ///
    /// # Safety
    ///
    /// Same requirements as [`from_raw()`](Self::from_raw) for the array of `len` elements
    /// starting at `first`.
    #[must_use]
    pub unsafe fn from_raw_parts(first: *mut T, len: usize) -> Self
    where
        D: Default,
    {
        // SAFETY: Forwarding the guarantees of our own caller.
        unsafe { Self::from_raw(ptr::slice_from_raw_parts_mut(first, len)) }
    }

    /// Moves the array and deleter out of this owner into a new one, leaving this owner
    /// empty with a default-constructed deleter.
    #[must_use]
    pub fn take(&mut self) -> Self
    where
        D: Default,
    {
        mem::take(self)
    }

    /// Releases the array owned by `self` (if any), then adopts the array and deleter of
    /// `source`, leaving `source` empty with the deleter previously held by `self`.
    pub fn assign(&mut self, source: &mut Self) {
        self.clear();
        self.swap(source);
    }

    /// Releases the owned array (if any), leaving this owner empty.
    pub fn clear(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            self.delete_resource(ptr);
        }
    }

    /// Hands the owned array back to the caller without releasing it, leaving this owner
    /// empty.
    #[must_use = "the released array leaks unless the caller releases it"]
    pub fn release(&mut self) -> Option<NonNull<[T]>> {
        self.ptr.take()
    }

    /// Adopts the array at `ptr` and then releases the previously owned array (if any).
    ///
    /// # Safety
    ///
    /// Same requirements as [`from_raw()`](Self::from_raw). In addition, `ptr` must not be
    /// the array this owner currently holds.
    pub unsafe fn reset(&mut self, ptr: *mut [T]) {
        let previous = mem::replace(&mut self.ptr, NonNull::new(ptr));

        if let Some(previous) = previous {
            self.delete_resource(previous);
        }
    }

    /// Exchanges the arrays and deleters of two owners. No deleter is invoked.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.deleter, &mut other.deleter);
    }

    /// Returns the address of the owned array without affecting ownership.
    #[must_use]
    #[inline]
    pub fn get(&self) -> Option<NonNull<[T]>> {
        self.ptr
    }

    /// Whether this owner is empty.
    ///
    /// An owner of a zero-length array is not null.
    #[must_use]
    #[inline]
    pub fn is_null(&self) -> bool {
        self.ptr.is_none()
    }

    /// The number of elements in the owned array, zero if this owner is empty.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.ptr.map_or(0, |ptr| ptr.len())
    }

    /// Whether the owned array has no elements, including when this owner is empty.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a reference to the deleter.
    #[must_use]
    #[inline]
    pub fn deleter(&self) -> &D {
        &self.deleter
    }

    /// Returns an exclusive reference to the deleter.
    #[must_use]
    #[inline]
    pub fn deleter_mut(&mut self) -> &mut D {
        &mut self.deleter
    }

    /// The owned elements as a slice, empty if this owner is empty.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        match self.ptr {
            // SAFETY: The array is live and exclusively ours.
            Some(ptr) => unsafe { ptr.as_ref() },
            None => &[],
        }
    }

    /// The owned elements as an exclusive slice, empty if this owner is empty.
    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        match self.ptr {
            // SAFETY: The array is live and exclusively ours, and we hold `&mut self`.
            Some(mut ptr) => unsafe { ptr.as_mut() },
            None => &mut [],
        }
    }

    /// Returns the element at `index` without bounds checking.
    ///
    /// # Safety
    ///
    /// The owner must not be empty and `index` must be less than [`len()`](Self::len).
    #[must_use]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        // SAFETY: Forwarding the guarantees of our own caller.
        unsafe { self.as_slice().get_unchecked(index) }
    }

    /// Returns the element at `index` for exclusive access, without bounds checking.
    ///
    /// # Safety
    ///
    /// The owner must not be empty and `index` must be less than [`len()`](Self::len).
    #[must_use]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        // SAFETY: Forwarding the guarantees of our own caller.
        unsafe { self.as_mut_slice().get_unchecked_mut(index) }
    }

    fn delete_resource(&mut self, ptr: NonNull<[T]>) {
        trace!(
            address = ?ptr.cast::<T>(),
            len = ptr.len(),
            type_name = type_name::<T>(),
            "releasing owned array"
        );

        // SAFETY: The array was adopted under the guarantees of `from_raw()` or `reset()`
        // and has already been detached from `self.ptr`, so this is its only release.
        unsafe {
            self.deleter.delete(ptr);
        }
    }
}

impl<T> OwnedArray<T> {
    /// Creates an owner of `len` elements produced by calling `f` with each index in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use owned_ptr::OwnedArray;
    ///
    /// let squares = OwnedArray::from_fn(4, |i| i * i);
    ///
    /// assert_eq!(squares.as_slice(), &[0, 1, 4, 9]);
    /// ```
    #[must_use]
    pub fn from_fn(len: usize, f: impl FnMut(usize) -> T) -> Self {
        (0..len).map(f).collect::<Box<[T]>>().into()
    }

    /// Converts this owner back into a boxed slice, or `None` if it is empty.
    #[must_use]
    pub fn into_boxed_slice(mut self) -> Option<Box<[T]>> {
        // SAFETY: Arrays released by `DefaultDeleteArray` are always `Box<[T]>` allocations,
        // and `release()` has detached it from `self` so it is not released twice.
        self.release()
            .map(|ptr| unsafe { Box::from_raw(ptr.as_ptr()) })
    }
}

impl<T> From<Box<[T]>> for OwnedArray<T> {
    fn from(value: Box<[T]>) -> Self {
        // SAFETY: `Box::into_raw()` hands us a live allocation that `DefaultDeleteArray` reverses.
        unsafe { Self::from_raw(Box::into_raw(value)) }
    }
}

impl<T> From<Vec<T>> for OwnedArray<T> {
    fn from(value: Vec<T>) -> Self {
        value.into_boxed_slice().into()
    }
}

impl<T, D: Deleter<[T]> + Default> From<Null> for OwnedArray<T, D> {
    fn from(_: Null) -> Self {
        Self::new()
    }
}

impl<T, D: Deleter<[T]> + Default> Default for OwnedArray<T, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, D: Deleter<[T]>> Drop for OwnedArray<T, D> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, D: Deleter<[T]>> Index<usize> for OwnedArray<T, D> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index` is out of bounds or the owner is empty.
    fn index(&self, index: usize) -> &Self::Output {
        let len = self.len();
        assert!(
            index < len,
            "index {index} is out of bounds for an owned array of length {len}"
        );

        // SAFETY: We just checked the bounds; a null owner has length zero.
        unsafe { self.get_unchecked(index) }
    }
}

impl<T, D: Deleter<[T]>> IndexMut<usize> for OwnedArray<T, D> {
    /// # Panics
    ///
    /// Panics if `index` is out of bounds or the owner is empty.
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let len = self.len();
        assert!(
            index < len,
            "index {index} is out of bounds for an owned array of length {len}"
        );

        // SAFETY: We just checked the bounds; a null owner has length zero.
        unsafe { self.get_unchecked_mut(index) }
    }
}

impl<T, D, U, E> PartialEq<OwnedArray<U, E>> for OwnedArray<T, D>
where
    D: Deleter<[T]>,
    E: Deleter<[U]>,
{
    /// Two owners are equal if they hold arrays at the same address (or are both empty).
    /// Lengths, deleters and element contents are not compared.
    ///
    /// Zero-length arrays (and arrays of zero-sized elements) typically share one dangling
    /// address, so two separately created owners of such arrays can compare equal.
    fn eq(&self, other: &OwnedArray<U, E>) -> bool {
        self.ptr.map(NonNull::cast::<()>) == other.ptr.map(NonNull::cast::<()>)
    }
}

impl<T, D: Deleter<[T]>> Eq for OwnedArray<T, D> {}

impl<T, D: Deleter<[T]>> PartialEq<Null> for OwnedArray<T, D> {
    fn eq(&self, _: &Null) -> bool {
        self.is_null()
    }
}

impl<T, D: Deleter<[T]>> PartialEq<OwnedArray<T, D>> for Null {
    fn eq(&self, other: &OwnedArray<T, D>) -> bool {
        other.is_null()
    }
}

impl<T, D: Deleter<[T]>> fmt::Debug for OwnedArray<T, D> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnedArray")
            .field("type_name", &type_name::<T>())
            .field("ptr", &self.ptr.map(NonNull::cast::<T>))
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

impl<T, D: Deleter<[T]>> fmt::Pointer for OwnedArray<T, D> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let address = self
            .ptr
            .map_or(ptr::null(), |ptr| ptr.cast::<T>().as_ptr().cast_const());
        fmt::Pointer::fmt(&address, f)
    }
}

// SAFETY: OwnedArray<T, D> owns its elements exactly like Box<[T]> does.
unsafe impl<T: Send, D: Deleter<[T]> + Send> Send for OwnedArray<T, D> {}

// SAFETY: Shared access to OwnedArray<T, D> only hands out shared references to T and D.
unsafe impl<T: Sync, D: Deleter<[T]> + Sync> Sync for OwnedArray<T, D> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::indexing_slicing,
    reason = "tests focus on succinct code and do not need to tick all the boxes"
)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;

    assert_impl_all!(OwnedArray<u32>: Send, Sync);
    assert_not_impl_any!(OwnedArray<u32>: Clone, Copy);
    assert_not_impl_any!(OwnedArray<Rc<u32>>: Send, Sync);

    /// Records the base address and length of every array it releases.
    #[derive(Clone, Debug, Default)]
    struct RecordingDelete {
        released: Rc<RefCell<Vec<(usize, usize)>>>,
    }

    impl RecordingDelete {
        fn released(&self) -> Vec<(usize, usize)> {
            self.released.borrow().clone()
        }
    }

    impl<T> Deleter<[T]> for RecordingDelete {
        unsafe fn delete(&mut self, ptr: NonNull<[T]>) {
            self.released
                .borrow_mut()
                .push((ptr.cast::<T>().addr().get(), ptr.len()));
            drop(unsafe { Box::from_raw(ptr.as_ptr()) });
        }
    }

    fn boxed_array<T: Clone>(value: T, len: usize) -> *mut [T] {
        Box::into_raw(vec![value; len].into_boxed_slice())
    }

    fn base(ptr: *mut [u32]) -> usize {
        ptr.cast::<u32>().addr()
    }

    #[test]
    fn new_is_null_and_empty() {
        let array = OwnedArray::<u32>::new();

        assert!(array.is_null());
        assert!(array.is_empty());
        assert_eq!(array.len(), 0);
        assert!(array.as_slice().is_empty());
    }

    #[test]
    fn zero_length_array_is_not_null() {
        let array = OwnedArray::<u32>::from(Vec::new());

        assert!(!array.is_null());
        assert!(array.is_empty());
    }

    #[test]
    fn index_matches_underlying_array() {
        let values = vec![3_u32, 1, 4, 1, 5, 9];
        let array = OwnedArray::<_>::from(values.clone());

        for (i, expected) in values.iter().enumerate() {
            assert_eq!(array[i], *expected);
            assert_eq!(unsafe { *array.get_unchecked(i) }, *expected);
        }
    }

    #[test]
    fn index_mut_writes_through() {
        let mut array = OwnedArray::<_>::from(vec![0_u32; 3]);

        array[2] = 7;
        unsafe { *array.get_unchecked_mut(0) = 1 };

        assert_eq!(array.as_slice(), &[1, 0, 7]);
    }

    #[test]
    #[should_panic]
    fn index_out_of_bounds_panics() {
        let array = OwnedArray::<_>::from(vec![1_u32, 2]);

        let _value = array[2];
    }

    #[test]
    #[should_panic]
    fn index_of_null_panics() {
        let array = OwnedArray::<u32>::new();

        let _value = array[0];
    }

    #[test]
    fn drop_releases_whole_array_once() {
        let deleter = RecordingDelete::default();
        let raw = boxed_array(5_u32, 4);

        let array = unsafe { OwnedArray::from_raw_with_deleter(raw, deleter.clone()) };
        drop(array);

        assert_eq!(deleter.released(), vec![(base(raw), 4)]);
    }

    #[test]
    fn default_deleter_drops_every_element() {
        struct DropCounter(Rc<Cell<usize>>);

        impl Drop for DropCounter {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        let array = OwnedArray::from_fn(5, |_| DropCounter(Rc::clone(&drops)));
        assert_eq!(drops.get(), 0);

        drop(array);
        assert_eq!(drops.get(), 5);
    }

    #[test]
    fn release_hands_back_array_without_deleting() {
        let deleter = RecordingDelete::default();
        let raw = boxed_array(1_u32, 2);
        let mut array = unsafe { OwnedArray::from_raw_with_deleter(raw, deleter.clone()) };

        let released = array.release();

        assert_eq!(released.map(NonNull::as_ptr), Some(raw));
        assert!(array.is_null());

        drop(array);
        assert!(deleter.released().is_empty());

        drop(unsafe { Box::from_raw(raw) });
    }

    #[test]
    fn reset_releases_previous_and_adopts_new() {
        let deleter = RecordingDelete::default();
        let first = boxed_array(1_u32, 2);
        let second = boxed_array(2_u32, 3);
        let mut array = unsafe { OwnedArray::from_raw_with_deleter(first, deleter.clone()) };

        unsafe { array.reset(second) };

        assert_eq!(deleter.released(), vec![(base(first), 2)]);
        assert_eq!(array.as_slice(), &[2, 2, 2]);

        unsafe { array.reset(ptr::slice_from_raw_parts_mut(ptr::null_mut(), 0)) };

        assert!(array.is_null());
        assert_eq!(
            deleter.released(),
            vec![(base(first), 2), (base(second), 3)]
        );
    }

    #[test]
    fn from_raw_parts_adopts_array() {
        let raw = boxed_array(8_u32, 3);

        let array = unsafe { OwnedArray::<u32>::from_raw_parts(raw.cast::<u32>(), 3) };

        assert_eq!(array.len(), 3);
        assert_eq!(array[2], 8);
    }

    #[test]
    fn from_raw_parts_with_null_is_null() {
        let array = unsafe { OwnedArray::<u32>::from_raw_parts(ptr::null_mut(), 10) };

        assert!(array.is_null());
        assert_eq!(array.len(), 0);
    }

    #[test]
    fn take_and_assign_transfer_ownership() {
        let deleter = RecordingDelete::default();
        let raw = boxed_array(4_u32, 2);
        let mut source = unsafe { OwnedArray::from_raw_with_deleter(raw, deleter.clone()) };

        let mut middle = source.take();
        assert!(source.is_null());

        let mut target = OwnedArray::with_deleter(deleter.clone());
        target.assign(&mut middle);

        assert!(middle.is_null());
        assert_eq!(target.len(), 2);
        assert!(deleter.released().is_empty());

        drop(target);
        assert_eq!(deleter.released(), vec![(base(raw), 2)]);
    }

    #[test]
    fn swap_exchanges_arrays() {
        let mut a = OwnedArray::<_>::from(vec![1_u32]);
        let mut b = OwnedArray::<_>::from(vec![2_u32, 3]);

        a.swap(&mut b);

        assert_eq!(a.as_slice(), &[2, 3]);
        assert_eq!(b.as_slice(), &[1]);
    }

    #[test]
    fn equality_and_null_comparison() {
        let a = OwnedArray::<_>::from(vec![1_u32]);
        let b = OwnedArray::<_>::from(vec![1_u32]);
        let empty = OwnedArray::<u64>::new();

        assert!(a != b);
        assert!(a != empty);
        assert!(empty == OwnedArray::<String>::new());

        assert!(a != Null);
        assert!(empty == Null);
        assert!(Null == empty);
    }

    #[test]
    fn distinct_zero_length_arrays_compare_equal() {
        let a = OwnedArray::<u32>::from(Vec::new());
        let b = OwnedArray::<u32>::from(Vec::new());

        assert!(!a.is_null());
        assert!(!b.is_null());
        assert!(a == b);
    }

    #[test]
    fn boxed_slice_round_trip() {
        let array = OwnedArray::<_>::from(vec!["a", "b"]);

        let boxed = array.into_boxed_slice().unwrap();

        assert_eq!(&*boxed, &["a", "b"]);
        assert!(OwnedArray::<u8>::new().into_boxed_slice().is_none());
    }

    #[test]
    fn from_null_sentinel_is_null() {
        let array: OwnedArray<u8> = Null.into();

        assert!(array.is_null());
    }
}
