use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr::{self, NonNull};

use tracing::trace;

use crate::{DefaultDelete, Deleter, Null};

/// Exclusive owner of a single object, released through the deleter `D` when dropped.
///
/// An `Owned<T, D>` is either empty or owns exactly one resource. Ownership can be handed
/// back with [`release()`](Self::release), replaced with [`reset()`](Self::reset) or
/// moved to another owner, but never duplicated: the type implements neither [`Clone`]
/// nor [`Copy`], so no two live owners can ever reference the same resource.
///
/// When an `Owned` holding a resource is dropped, its deleter is invoked on that resource
/// exactly once. Dropping an empty `Owned` does nothing.
///
/// The default deleter [`DefaultDelete`] releases resources allocated through [`Box`]. Any
/// other [`Deleter`] may be supplied, as long as it matches how the resource was allocated.
///
/// # Examples
///
/// ```
/// use owned_ptr::{Owned, make_owned};
///
/// let mut owned = make_owned(String::from("hello"));
/// owned.push_str(", world");
/// assert_eq!(&*owned, "hello, world");
///
/// // Moving the resource out of a place leaves the place empty.
/// let moved = owned.take();
/// assert!(owned.is_null());
/// assert_eq!(&*moved, "hello, world");
/// ```
///
/// # Thread safety
///
/// Like [`Box<T>`], an `Owned<T, D>` is [`Send`] if both `T` and `D` are [`Send`] and
/// [`Sync`] if both are [`Sync`]. Mutation always requires exclusive access.
pub struct Owned<T: ?Sized, D: Deleter<T> = DefaultDelete> {
    ptr: Option<NonNull<T>>,
    deleter: D,

    // We own a `T`, which matters for drop checking.
    _owns: PhantomData<T>,
}

impl<T: ?Sized, D: Deleter<T>> Owned<T, D> {
    /// Creates an empty owner with a default-constructed deleter.
    #[must_use]
    pub fn new() -> Self
    where
        D: Default,
    {
        Self::with_deleter(D::default())
    }

    /// Creates an empty owner that will use `deleter` for any resource it later adopts.
    #[must_use]
    pub const fn with_deleter(deleter: D) -> Self {
        Self {
            ptr: None,
            deleter,
            _owns: PhantomData,
        }
    }

    /// Takes ownership of the resource at `ptr`, using a default-constructed deleter.
    ///
    /// A null `ptr` produces an empty owner.
    ///
    /// # Safety
    ///
    /// If `ptr` is not null, the caller must ensure that:
    ///
    /// 1. `ptr` refers to a live, initialized `T` allocated in the shape `D` releases.
    /// 2. Nothing else releases, or accesses under an assumption of ownership, the resource
    ///    for as long as the returned owner holds it.
    #[must_use]
    pub unsafe fn from_raw(ptr: *mut T) -> Self
    where
        D: Default,
    {
        // SAFETY: Forwarding the guarantees of our own caller.
        unsafe { Self::from_raw_with_deleter(ptr, D::default()) }
    }

    /// Takes ownership of the resource at `ptr`, releasing it later through `deleter`.
    ///
    /// A null `ptr` produces an empty owner that still keeps `deleter` for later use.
    ///
    /// # Safety
    ///
    /// Same requirements as [`from_raw()`](Self::from_raw), with the resource allocated in
    /// the shape `deleter` releases.
    #[must_use]
    pub unsafe fn from_raw_with_deleter(ptr: *mut T, deleter: D) -> Self {
        Self {
            ptr: NonNull::new(ptr),
            deleter,
            _owns: PhantomData,
        }
    }

    /// Moves the resource and deleter out of this owner into a new one, leaving this owner
    /// empty with a default-constructed deleter.
    ///
    /// No deleter is invoked.
    #[must_use]
    pub fn take(&mut self) -> Self
    where
        D: Default,
    {
        mem::take(self)
    }

    /// Releases the resource owned by `self` (if any), then adopts the resource and deleter
    /// of `source`, leaving `source` empty.
    ///
    /// `source` receives the deleter previously held by `self`. Because `self` and `source`
    /// are both exclusive borrows, they can never be the same owner.
    ///
    /// # Examples
    ///
    /// ```
    /// use owned_ptr::make_owned;
    ///
    /// let mut target = make_owned(1_u32);
    /// let mut source = make_owned(2_u32);
    ///
    /// target.assign(&mut source);
    ///
    /// assert_eq!(*target, 2);
    /// assert!(source.is_null());
    /// ```
    ///
    /// An owner cannot be assigned from itself:
    ///
    /// ```compile_fail,E0499
    /// use owned_ptr::make_owned;
    ///
    /// let mut owned = make_owned(1_u32);
    ///
    /// owned.assign(&mut owned);
    /// ```
    pub fn assign(&mut self, source: &mut Self) {
        self.clear();
        self.swap(source);
    }

    /// Releases the owned resource (if any), leaving this owner empty.
    pub fn clear(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            self.delete_resource(ptr);
        }
    }

    /// Hands the owned resource back to the caller without releasing it, leaving this owner
    /// empty.
    ///
    /// Returns `None` if the owner was already empty. The caller becomes responsible for
    /// releasing the returned resource.
    #[must_use = "the released resource leaks unless the caller releases it"]
    pub fn release(&mut self) -> Option<NonNull<T>> {
        self.ptr.take()
    }

    /// Adopts the resource at `ptr` and then releases the previously owned resource (if any).
    ///
    /// A null `ptr` leaves this owner empty, so `reset(ptr::null_mut())` is a pure release.
    ///
    /// # Safety
    ///
    /// Same requirements as [`from_raw()`](Self::from_raw). In addition, `ptr` must not be
    /// the resource this owner currently holds.
    pub unsafe fn reset(&mut self, ptr: *mut T) {
        let previous = mem::replace(&mut self.ptr, NonNull::new(ptr));

        if let Some(previous) = previous {
            self.delete_resource(previous);
        }
    }

    /// Exchanges the resources and deleters of two owners. No deleter is invoked.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.deleter, &mut other.deleter);
    }

    /// Returns the address of the owned resource without affecting ownership.
    #[must_use]
    #[inline]
    pub fn get(&self) -> Option<NonNull<T>> {
        self.ptr
    }

    /// Whether this owner is empty.
    #[must_use]
    #[inline]
    pub fn is_null(&self) -> bool {
        self.ptr.is_none()
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

    /// Returns a reference to the owned value, or `None` if this owner is empty.
    #[must_use]
    pub fn as_deref(&self) -> Option<&T> {
        // SAFETY: The resource is live and exclusively ours, so the shared borrow of `self`
        // is enough to hand out a shared reference.
        self.ptr.map(|ptr| unsafe { ptr.as_ref() })
    }

    /// Returns an exclusive reference to the owned value, or `None` if this owner is empty.
    #[must_use]
    pub fn as_deref_mut(&mut self) -> Option<&mut T> {
        // SAFETY: The resource is live and exclusively ours, and we hold `&mut self`.
        self.ptr.map(|mut ptr| unsafe { ptr.as_mut() })
    }

    fn address(&self) -> Option<NonNull<()>> {
        self.ptr.map(NonNull::cast)
    }

    fn delete_resource(&mut self, ptr: NonNull<T>) {
        trace!(address = ?ptr, type_name = type_name::<T>(), "releasing owned resource");

        // SAFETY: The resource was adopted under the guarantees of `from_raw()` or `reset()`
        // and has already been detached from `self.ptr`, so this is its only release.
        unsafe {
            self.deleter.delete(ptr);
        }
    }
}

impl<T: ?Sized> Owned<T> {
    /// Converts this owner back into a [`Box`], or `None` if it is empty.
    #[must_use]
    pub fn into_box(mut self) -> Option<Box<T>> {
        // SAFETY: Resources released by `DefaultDelete` are always `Box<T>` allocations,
        // and `release()` has detached it from `self` so it is not released twice.
        self.release()
            .map(|ptr| unsafe { Box::from_raw(ptr.as_ptr()) })
    }
}

impl<T: ?Sized> From<Box<T>> for Owned<T> {
    fn from(value: Box<T>) -> Self {
        // SAFETY: `Box::into_raw()` hands us a live allocation that `DefaultDelete` reverses.
        unsafe { Self::from_raw(Box::into_raw(value)) }
    }
}

impl<T: ?Sized, D: Deleter<T> + Default> From<Null> for Owned<T, D> {
    fn from(_: Null) -> Self {
        Self::new()
    }
}

impl<T: ?Sized, D: Deleter<T> + Default> Default for Owned<T, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized, D: Deleter<T>> Drop for Owned<T, D> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: ?Sized, D: Deleter<T>> Deref for Owned<T, D> {
    type Target = T;

    /// Provides direct access to the owned value.
    ///
    /// # Panics
    ///
    /// Panics if the owner is empty.
    fn deref(&self) -> &Self::Target {
        let Some(value) = self.as_deref() else {
            panic!("cannot dereference an empty Owned<{}>", type_name::<T>());
        };

        value
    }
}

impl<T: ?Sized, D: Deleter<T>> DerefMut for Owned<T, D> {
    /// Provides direct exclusive access to the owned value.
    ///
    /// # Panics
    ///
    /// Panics if the owner is empty.
    fn deref_mut(&mut self) -> &mut Self::Target {
        let Some(value) = self.as_deref_mut() else {
            panic!("cannot dereference an empty Owned<{}>", type_name::<T>());
        };

        value
    }
}

impl<T, D, U, E> PartialEq<Owned<U, E>> for Owned<T, D>
where
    T: ?Sized,
    D: Deleter<T>,
    U: ?Sized,
    E: Deleter<U>,
{
    /// Two owners are equal if they hold the same address (or are both empty).
    /// Deleters and pointee contents are not compared.
    ///
    /// Distinct zero-sized values may share one dangling address, so two owners of
    /// separately created zero-sized values can compare equal.
    fn eq(&self, other: &Owned<U, E>) -> bool {
        self.address() == other.address()
    }
}

impl<T: ?Sized, D: Deleter<T>> Eq for Owned<T, D> {}

impl<T: ?Sized, D: Deleter<T>> PartialEq<Null> for Owned<T, D> {
    fn eq(&self, _: &Null) -> bool {
        self.is_null()
    }
}

impl<T: ?Sized, D: Deleter<T>> PartialEq<Owned<T, D>> for Null {
    fn eq(&self, other: &Owned<T, D>) -> bool {
        other.is_null()
    }
}

impl<T: ?Sized, D: Deleter<T>> fmt::Debug for Owned<T, D> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Owned")
            .field("type_name", &type_name::<T>())
            .field("ptr", &self.ptr)
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized, D: Deleter<T>> fmt::Pointer for Owned<T, D> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.address() {
            Some(ptr) => fmt::Pointer::fmt(&ptr, f),
            None => fmt::Pointer::fmt(&ptr::null::<()>(), f),
        }
    }
}

// SAFETY: Owned<T, D> owns its T exactly like Box<T> does, so moving it to another thread
// moves the T and the deleter along with it.
unsafe impl<T: ?Sized + Send, D: Deleter<T> + Send> Send for Owned<T, D> {}

// SAFETY: Shared access to Owned<T, D> only hands out shared references to T and D.
unsafe impl<T: ?Sized + Sync, D: Deleter<T> + Sync> Sync for Owned<T, D> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    reason = "tests focus on succinct code and do not need to tick all the boxes"
)]
mod tests {
    use std::any::Any;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;

    assert_impl_all!(Owned<u32>: Send, Sync);
    assert_impl_all!(Owned<String>: Send, Sync);
    assert_not_impl_any!(Owned<u32>: Clone, Copy);
    assert_not_impl_any!(Owned<Rc<u32>>: Send, Sync);
    assert_not_impl_any!(Owned<Cell<u32>>: Sync);

    /// Records the address of every resource it releases, in release order.
    #[derive(Clone, Debug, Default)]
    struct RecordingDelete {
        released: Rc<RefCell<Vec<usize>>>,
    }

    impl RecordingDelete {
        fn released(&self) -> Vec<usize> {
            self.released.borrow().clone()
        }
    }

    impl<T> Deleter<T> for RecordingDelete {
        unsafe fn delete(&mut self, ptr: NonNull<T>) {
            self.released.borrow_mut().push(ptr.addr().get());
            drop(unsafe { Box::from_raw(ptr.as_ptr()) });
        }
    }

    fn boxed<T>(value: T) -> *mut T {
        Box::into_raw(Box::new(value))
    }

    #[test]
    fn new_is_empty() {
        let owned = Owned::<u32>::new();

        assert!(owned.is_null());
        assert!(owned.get().is_none());
        assert!(owned.as_deref().is_none());
    }

    #[test]
    fn from_null_pointer_is_empty() {
        let deleter = RecordingDelete::default();

        let owned =
            unsafe { Owned::<u32, _>::from_raw_with_deleter(ptr::null_mut(), deleter.clone()) };
        assert!(owned.is_null());

        drop(owned);
        assert!(deleter.released().is_empty());
    }

    #[test]
    fn from_null_sentinel_is_empty() {
        let owned: Owned<String> = Null.into();

        assert!(owned.is_null());
    }

    #[test]
    fn from_raw_owns_resource() {
        let raw = boxed(42_u32);

        let owned = unsafe { Owned::<u32>::from_raw(raw) };

        assert!(!owned.is_null());
        assert_eq!(owned.get().map(NonNull::as_ptr), Some(raw));
        assert_eq!(*owned, 42);
    }

    #[test]
    fn drop_releases_resource_once() {
        let deleter = RecordingDelete::default();
        let raw = boxed(1_u32);

        let owned = unsafe { Owned::from_raw_with_deleter(raw, deleter.clone()) };
        drop(owned);

        assert_eq!(deleter.released(), vec![raw.addr()]);
    }

    #[test]
    fn drop_of_empty_releases_nothing() {
        let deleter = RecordingDelete::default();

        drop(Owned::<u32, _>::with_deleter(deleter.clone()));

        assert!(deleter.released().is_empty());
    }

    #[test]
    fn release_hands_back_resource_without_deleting() {
        let deleter = RecordingDelete::default();
        let raw = boxed(7_u32);
        let mut owned = unsafe { Owned::from_raw_with_deleter(raw, deleter.clone()) };

        let released = owned.release();

        assert_eq!(released.map(NonNull::as_ptr), Some(raw));
        assert!(owned.is_null());

        drop(owned);
        assert!(deleter.released().is_empty());

        drop(unsafe { Box::from_raw(raw) });
    }

    #[test]
    fn release_of_empty_returns_none() {
        let mut owned = Owned::<u32>::new();

        assert!(owned.release().is_none());
    }

    #[test]
    fn reset_releases_previous_and_adopts_new() {
        let deleter = RecordingDelete::default();
        let first = boxed(1_u32);
        let second = boxed(2_u32);
        let mut owned = unsafe { Owned::from_raw_with_deleter(first, deleter.clone()) };

        unsafe { owned.reset(second) };

        assert_eq!(deleter.released(), vec![first.addr()]);
        assert_eq!(*owned, 2);

        drop(owned);
        assert_eq!(deleter.released(), vec![first.addr(), second.addr()]);
    }

    #[test]
    fn reset_with_null_is_pure_release() {
        let deleter = RecordingDelete::default();
        let raw = boxed(1_u32);
        let mut owned = unsafe { Owned::from_raw_with_deleter(raw, deleter.clone()) };

        unsafe { owned.reset(ptr::null_mut()) };

        assert!(owned.is_null());
        assert_eq!(deleter.released(), vec![raw.addr()]);
    }

    #[test]
    fn reset_on_empty_releases_nothing() {
        let deleter = RecordingDelete::default();
        let raw = boxed(1_u32);
        let mut owned = Owned::<u32, _>::with_deleter(deleter.clone());

        unsafe { owned.reset(raw) };

        assert!(deleter.released().is_empty());
        assert_eq!(*owned, 1);
    }

    #[test]
    fn clear_releases_and_empties() {
        let deleter = RecordingDelete::default();
        let raw = boxed(3_u32);
        let mut owned = unsafe { Owned::from_raw_with_deleter(raw, deleter.clone()) };

        owned.clear();

        assert!(owned.is_null());
        assert_eq!(deleter.released(), vec![raw.addr()]);

        // Clearing again is harmless.
        owned.clear();
        assert_eq!(deleter.released().len(), 1);
    }

    #[test]
    fn take_moves_resource_and_leaves_source_empty() {
        let deleter = RecordingDelete::default();
        let raw = boxed(5_u32);
        let mut source = unsafe { Owned::from_raw_with_deleter(raw, deleter.clone()) };

        let target = source.take();

        assert!(source.is_null());
        assert_eq!(target.get().map(NonNull::as_ptr), Some(raw));
        assert!(deleter.released().is_empty());

        drop(source);
        assert!(deleter.released().is_empty());

        drop(target);
        assert_eq!(deleter.released(), vec![raw.addr()]);
    }

    #[test]
    fn native_move_does_not_release() {
        let deleter = RecordingDelete::default();
        let raw = boxed(5_u32);
        let source = unsafe { Owned::from_raw_with_deleter(raw, deleter.clone()) };

        let target = source;

        assert!(deleter.released().is_empty());
        assert_eq!(*target, 5);
    }

    #[test]
    fn assign_releases_target_and_empties_source() {
        let deleter = RecordingDelete::default();
        let old = boxed(1_u32);
        let new = boxed(2_u32);
        let mut target = unsafe { Owned::from_raw_with_deleter(old, deleter.clone()) };
        let mut source = unsafe { Owned::from_raw_with_deleter(new, deleter.clone()) };

        target.assign(&mut source);

        assert_eq!(deleter.released(), vec![old.addr()]);
        assert_eq!(target.get().map(NonNull::as_ptr), Some(new));
        assert!(source.is_null());

        drop(source);
        assert_eq!(deleter.released(), vec![old.addr()]);

        drop(target);
        assert_eq!(deleter.released(), vec![old.addr(), new.addr()]);
    }

    #[test]
    fn assign_adopts_source_deleter() {
        let target_deleter = RecordingDelete::default();
        let source_deleter = RecordingDelete::default();
        let raw = boxed(9_u32);
        let mut target = Owned::<u32, _>::with_deleter(target_deleter.clone());
        let mut source = unsafe { Owned::from_raw_with_deleter(raw, source_deleter.clone()) };

        target.assign(&mut source);
        drop(target);

        assert!(target_deleter.released().is_empty());
        assert_eq!(source_deleter.released(), vec![raw.addr()]);
    }

    #[test]
    fn assign_from_empty_source_empties_target() {
        let deleter = RecordingDelete::default();
        let raw = boxed(1_u32);
        let mut target = unsafe { Owned::from_raw_with_deleter(raw, deleter.clone()) };
        let mut source = Owned::<u32, _>::with_deleter(deleter.clone());

        target.assign(&mut source);

        assert!(target.is_null());
        assert!(source.is_null());
        assert_eq!(deleter.released(), vec![raw.addr()]);
    }

    #[test]
    fn swap_exchanges_resources_and_deleters() {
        let a_deleter = RecordingDelete::default();
        let b_deleter = RecordingDelete::default();
        let a_raw = boxed(1_u32);
        let b_raw = boxed(2_u32);
        let mut a = unsafe { Owned::from_raw_with_deleter(a_raw, a_deleter.clone()) };
        let mut b = unsafe { Owned::from_raw_with_deleter(b_raw, b_deleter.clone()) };

        a.swap(&mut b);

        assert_eq!(*a, 2);
        assert_eq!(*b, 1);
        assert!(a_deleter.released().is_empty());
        assert!(b_deleter.released().is_empty());

        // Each deleter travelled with its resource.
        drop(a);
        assert_eq!(b_deleter.released(), vec![b_raw.addr()]);
        assert!(a_deleter.released().is_empty());

        drop(b);
        assert_eq!(a_deleter.released(), vec![a_raw.addr()]);
    }

    #[test]
    fn swap_with_empty_moves_resource() {
        let mut full = Owned::<_>::from(Box::new(4_u32));
        let mut empty = Owned::<u32>::new();

        full.swap(&mut empty);

        assert!(full.is_null());
        assert_eq!(*empty, 4);
    }

    #[test]
    fn deleter_mut_changes_stored_deleter() {
        struct TaggedDelete {
            tag: u32,
            seen: Rc<Cell<u32>>,
        }

        impl Deleter<u32> for TaggedDelete {
            unsafe fn delete(&mut self, ptr: NonNull<u32>) {
                self.seen.set(self.tag);
                drop(unsafe { Box::from_raw(ptr.as_ptr()) });
            }
        }

        let seen = Rc::new(Cell::new(0));
        let deleter = TaggedDelete {
            tag: 1,
            seen: Rc::clone(&seen),
        };
        let mut owned = unsafe { Owned::from_raw_with_deleter(boxed(0_u32), deleter) };

        owned.deleter_mut().tag = 99;
        assert_eq!(owned.deleter().tag, 99);

        drop(owned);
        assert_eq!(seen.get(), 99);
    }

    #[test]
    fn closure_deleter_runs_on_drop() {
        let calls = Rc::new(Cell::new(0));
        let calls_clone = Rc::clone(&calls);
        let raw = boxed(11_u64);

        let owned = unsafe {
            Owned::from_raw_with_deleter(raw, move |ptr: NonNull<u64>| {
                calls_clone.set(calls_clone.get() + 1);
                drop(Box::from_raw(ptr.as_ptr()));
            })
        };

        assert_eq!(*owned, 11);
        drop(owned);

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn equality_compares_addresses_only() {
        let a = Owned::<_>::from(Box::new(1_u32));
        let b = Owned::<_>::from(Box::new(1_u32));

        assert!(a != b);

        let empty_u32 = Owned::<u32>::new();
        let empty_string = Owned::<String>::new();
        assert!(empty_u32 == empty_string);
        assert!(a != empty_u32);
    }

    #[test]
    fn distinct_zero_sized_values_compare_equal() {
        let a = Owned::<_>::from(Box::new(()));
        let b = Owned::<_>::from(Box::new(()));

        assert!(!a.is_null());
        assert!(!b.is_null());
        assert!(a == b);
    }

    #[test]
    fn null_comparison_agrees_with_is_null() {
        let mut owned = Owned::<_>::from(Box::new(1_u32));
        assert_eq!(owned.is_null(), owned == Null);
        assert_eq!(!owned.is_null(), owned != Null);
        assert_eq!(!owned.is_null(), Null != owned);

        owned.clear();
        assert_eq!(owned.is_null(), owned == Null);
        assert_eq!(owned.is_null(), Null == owned);
    }

    #[test]
    fn deref_mut_modifies_value() {
        let mut owned = Owned::<_>::from(Box::new(String::from("a")));

        owned.push('b');

        assert_eq!(&*owned, "ab");
        assert_eq!(owned.as_deref_mut().map(|s| s.len()), Some(2));
    }

    #[test]
    #[should_panic]
    fn deref_of_empty_panics() {
        let owned = Owned::<u32>::new();

        let _value = *owned;
    }

    #[test]
    fn box_round_trip_preserves_value() {
        let owned = Owned::<_>::from(Box::new(vec![1, 2, 3]));
        let address = owned.get();

        let boxed = owned.into_box().unwrap();

        assert_eq!(Some(NonNull::from(&*boxed)), address);
        assert_eq!(*boxed, vec![1, 2, 3]);
    }

    #[test]
    fn into_box_of_empty_is_none() {
        assert!(Owned::<u32>::new().into_box().is_none());
    }

    #[test]
    fn owns_trait_objects() {
        let boxed: Box<dyn Any> = Box::new(17_u32);
        let owned = Owned::<dyn Any>::from(boxed);

        assert_eq!(owned.downcast_ref::<u32>(), Some(&17));
    }

    #[test]
    fn debug_output_names_type() {
        let owned = Owned::<_>::from(Box::new(1_u8));

        assert!(format!("{owned:?}").contains("u8"));
        assert!(!format!("{owned:p}").is_empty());
    }
}
