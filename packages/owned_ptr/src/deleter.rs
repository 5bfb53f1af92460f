use std::ptr::NonNull;

/// Releases a resource owned by an [`Owned`](crate::Owned) or
/// [`OwnedArray`](crate::OwnedArray).
///
/// The deleter is a value stored inside the owning pointer and is chosen through a type
/// parameter, so the release strategy is fixed when the pointer is created and involves no
/// dynamic dispatch.
///
/// The resource address is passed as a [`NonNull`], so a deleter is never asked to release
/// a null address. Owning pointers only call the deleter when they hold a resource.
///
/// Any `FnMut(NonNull<T>)` closure or function is a deleter.
///
/// # Examples
///
/// ```
/// use std::ptr::NonNull;
///
/// use owned_ptr::{Deleter, Owned};
///
/// #[derive(Debug, Default)]
/// struct LoudDelete;
///
/// impl Deleter<u32> for LoudDelete {
///     unsafe fn delete(&mut self, ptr: NonNull<u32>) {
///         // SAFETY: Forwarding the guarantees of our own caller.
///         let value = unsafe { Box::from_raw(ptr.as_ptr()) };
///         println!("releasing {value}");
///     }
/// }
///
/// let raw = Box::into_raw(Box::new(5_u32));
///
/// // SAFETY: The pointer came from `Box::into_raw()`, which `LoudDelete` reverses.
/// let owned = unsafe { Owned::from_raw_with_deleter(raw, LoudDelete) };
/// assert_eq!(*owned, 5);
/// ```
pub trait Deleter<T: ?Sized> {
    /// Releases the resource at `ptr`.
    ///
    /// # Safety
    ///
    /// The caller must ensure that:
    ///
    /// 1. `ptr` refers to a live resource allocated in the shape this deleter releases
    ///    (e.g. a `Box<T>` for [`DefaultDelete`], a `Box<[T]>` for [`DefaultDeleteArray`]).
    /// 2. Nothing else releases or uses the resource after this call.
    unsafe fn delete(&mut self, ptr: NonNull<T>);
}

impl<T: ?Sized, F> Deleter<T> for F
where
    F: FnMut(NonNull<T>),
{
    unsafe fn delete(&mut self, ptr: NonNull<T>) {
        (self)(ptr);
    }
}

/// Releases a single object allocated by `Box<T>`.
///
/// This is the default deleter of [`Owned<T>`](crate::Owned).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DefaultDelete;

impl<T: ?Sized> Deleter<T> for DefaultDelete {
    unsafe fn delete(&mut self, ptr: NonNull<T>) {
        // SAFETY: The caller guarantees the resource came from a `Box<T>` and is not used again.
        drop(unsafe { Box::from_raw(ptr.as_ptr()) });
    }
}

/// Releases a whole array allocated by `Box<[T]>`.
///
/// This is the default deleter of [`OwnedArray<T>`](crate::OwnedArray). It drops every
/// element before freeing the allocation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DefaultDeleteArray;

impl<T> Deleter<[T]> for DefaultDeleteArray {
    unsafe fn delete(&mut self, ptr: NonNull<[T]>) {
        // SAFETY: The caller guarantees the resource came from a `Box<[T]>` and is not used again.
        drop(unsafe { Box::from_raw(ptr.as_ptr()) });
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    reason = "tests focus on succinct code and do not need to tick all the boxes"
)]
mod tests {
    use std::any::Any;
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    /// Test helper that counts how many times it has been dropped.
    struct DropCounter {
        drops: Rc<Cell<usize>>,
    }

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    #[test]
    fn default_delete_drops_boxed_value() {
        let drops = Rc::new(Cell::new(0));
        let raw = Box::into_raw(Box::new(DropCounter {
            drops: Rc::clone(&drops),
        }));

        unsafe { DefaultDelete.delete(NonNull::new_unchecked(raw)) };

        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn default_delete_handles_unsized_values() {
        let drops = Rc::new(Cell::new(0));
        let boxed: Box<dyn Any> = Box::new(DropCounter {
            drops: Rc::clone(&drops),
        });
        let raw = Box::into_raw(boxed);

        unsafe { DefaultDelete.delete(NonNull::new_unchecked(raw)) };

        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn default_delete_array_drops_every_element() {
        let drops = Rc::new(Cell::new(0));
        let boxed: Box<[DropCounter]> = (0..4)
            .map(|_| DropCounter {
                drops: Rc::clone(&drops),
            })
            .collect();
        let raw = Box::into_raw(boxed);

        unsafe { DefaultDeleteArray.delete(NonNull::new_unchecked(raw)) };

        assert_eq!(drops.get(), 4);
    }

    #[test]
    fn closure_is_a_deleter() {
        let calls = Cell::new(0);
        let mut deleter = |ptr: NonNull<u64>| {
            calls.set(calls.get() + 1);
            drop(unsafe { Box::from_raw(ptr.as_ptr()) });
        };

        let raw = Box::into_raw(Box::new(7_u64));
        unsafe { Deleter::delete(&mut deleter, NonNull::new_unchecked(raw)) };

        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn function_pointer_is_a_deleter() {
        fn release(ptr: NonNull<u8>) {
            drop(unsafe { Box::from_raw(ptr.as_ptr()) });
        }

        let mut deleter: fn(NonNull<u8>) = release;
        let raw = Box::into_raw(Box::new(1_u8));

        unsafe { deleter.delete(NonNull::new_unchecked(raw)) };
    }
}
