use crate::{Deleter, Owned, OwnedArray};

/// Allocates `value` on the heap and returns its owner.
///
/// The allocation is owned from the moment it exists; there is no point at which the raw
/// address is visible outside an owner.
///
/// # Examples
///
/// ```
/// use owned_ptr::make_owned;
///
/// let owned = make_owned(vec![1, 2, 3]);
///
/// assert!(!owned.is_null());
/// assert_eq!(owned.len(), 3);
/// ```
#[must_use]
pub fn make_owned<T>(value: T) -> Owned<T> {
    Owned::from(Box::new(value))
}

/// Allocates the value returned by `f` on the heap and returns its owner.
///
/// If `f` panics, nothing is allocated.
#[must_use]
pub fn make_owned_with<T>(f: impl FnOnce() -> T) -> Owned<T> {
    make_owned(f())
}

/// Exchanges the resources and deleters of two owners.
///
/// Equivalent to [`Owned::swap()`].
pub fn swap<T: ?Sized, D: Deleter<T>>(a: &mut Owned<T, D>, b: &mut Owned<T, D>) {
    a.swap(b);
}

/// Exchanges the arrays and deleters of two array owners.
///
/// Equivalent to [`OwnedArray::swap()`].
///
/// # Examples
///
/// ```
/// use owned_ptr::{OwnedArray, swap_arrays};
///
/// let mut a = OwnedArray::from(vec![1, 2]);
/// let mut b = OwnedArray::from(vec![3]);
///
/// swap_arrays(&mut a, &mut b);
///
/// assert_eq!(a.as_slice(), &[3]);
/// assert_eq!(b.as_slice(), &[1, 2]);
/// ```
pub fn swap_arrays<T, D: Deleter<[T]>>(a: &mut OwnedArray<T, D>, b: &mut OwnedArray<T, D>) {
    a.swap(b);
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(
    clippy::undocumented_unsafe_blocks,
    reason = "tests focus on succinct code and do not need to tick all the boxes"
)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::ptr::NonNull;
    use std::rc::Rc;

    use super::*;

    /// Records its own name and the length of every array it releases.
    #[derive(Clone, Debug)]
    struct NamedDelete {
        name: &'static str,
        released: Rc<RefCell<Vec<(&'static str, usize)>>>,
    }

    impl<T> Deleter<[T]> for NamedDelete {
        unsafe fn delete(&mut self, ptr: NonNull<[T]>) {
            self.released.borrow_mut().push((self.name, ptr.len()));
            drop(unsafe { Box::from_raw(ptr.as_ptr()) });
        }
    }

    #[test]
    fn make_owned_owns_value() {
        let owned = make_owned(String::from("made"));

        assert!(!owned.is_null());
        assert_eq!(&*owned, "made");
    }

    #[test]
    fn make_owned_with_calls_factory_once() {
        let calls = Cell::new(0);

        let owned = make_owned_with(|| {
            calls.set(calls.get() + 1);
            99_u16
        });

        assert_eq!(*owned, 99);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn free_swap_exchanges_resources() {
        let mut a = make_owned(1_u8);
        let mut b = make_owned(2_u8);
        let a_address = a.get();
        let b_address = b.get();

        swap(&mut a, &mut b);

        assert_eq!(a.get(), b_address);
        assert_eq!(b.get(), a_address);
    }

    #[test]
    fn free_swap_arrays_moves_deleters_with_arrays() {
        let released = Rc::new(RefCell::new(Vec::new()));
        let deleter = |name| NamedDelete {
            name,
            released: Rc::clone(&released),
        };

        let raw_a = Box::into_raw(vec![1_u32].into_boxed_slice());
        let raw_b = Box::into_raw(vec![2_u32, 3].into_boxed_slice());
        let mut a = unsafe { OwnedArray::from_raw_with_deleter(raw_a, deleter("a")) };
        let mut b = unsafe { OwnedArray::from_raw_with_deleter(raw_b, deleter("b")) };

        swap_arrays(&mut a, &mut b);

        assert_eq!(a.as_slice(), &[2, 3]);
        assert_eq!(b.as_slice(), &[1]);
        assert_eq!(a.deleter().name, "b");
        assert_eq!(b.deleter().name, "a");

        drop(a);
        assert_eq!(*released.borrow(), vec![("b", 2)]);

        drop(b);
        assert_eq!(*released.borrow(), vec![("b", 2), ("a", 1)]);
    }

    #[test]
    fn made_value_is_dropped_with_owner() {
        let tracker = Rc::new(());

        let owned = make_owned(Rc::clone(&tracker));
        assert_eq!(Rc::strong_count(&tracker), 2);

        drop(owned);
        assert_eq!(Rc::strong_count(&tracker), 1);
    }
}
