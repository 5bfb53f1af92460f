use std::ptr::{self, NonNull};

use crate::{Deleter, Error, Owned, Result};

/// Alignment that `malloc()` guarantees on every supported platform.
const MALLOC_ALIGNMENT: usize = 2 * size_of::<usize>();

/// Releases a resource allocated by the C allocator (`malloc()` and friends).
///
/// The resource is dropped in place and its memory is then returned with `free()`. Works for
/// both single objects and arrays, as long as the whole resource is one C allocation.
///
/// # Examples
///
/// ```
/// use owned_ptr::malloc_owned;
///
/// let owned = malloc_owned(String::from("from the C heap")).unwrap();
///
/// assert_eq!(owned.len(), 15);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FreeDelete;

impl<T: ?Sized> Deleter<T> for FreeDelete {
    unsafe fn delete(&mut self, ptr: NonNull<T>) {
        // SAFETY: The caller guarantees the resource is live, initialized and not used again.
        unsafe {
            ptr::drop_in_place(ptr.as_ptr());
        }

        // SAFETY: The caller guarantees the memory came from the C allocator.
        unsafe {
            libc::free(ptr.as_ptr().cast::<libc::c_void>());
        }
    }
}

/// Moves `value` into memory obtained from the C allocator and returns its owner, which
/// releases it through [`FreeDelete`].
///
/// This is useful when the resource will later be handed to C code that expects to
/// `free()` it, via [`Owned::release()`].
///
/// # Errors
///
/// Returns [`Error::UnsupportedAlignment`] if `T` needs stricter alignment than `malloc()`
/// guarantees, and [`Error::AllocationFailed`] if the C allocator returns null. In both
/// cases `value` is dropped.
pub fn malloc_owned<T>(value: T) -> Result<Owned<T, FreeDelete>> {
    let align = align_of::<T>();

    if align > MALLOC_ALIGNMENT {
        return Err(Error::UnsupportedAlignment {
            align,
            supported: MALLOC_ALIGNMENT,
        });
    }

    // malloc(0) may return null, which we would mistake for failure.
    let size = size_of::<T>().max(1);

    // SAFETY: No safety requirements beyond a sensible size.
    let raw = unsafe { libc::malloc(size) }.cast::<T>();

    let Some(ptr) = NonNull::new(raw) else {
        return Err(Error::AllocationFailed { size });
    };

    // SAFETY: Fresh allocation, large enough for a T and aligned for it (checked above).
    unsafe {
        ptr.write(value);
    }

    // SAFETY: The pointer refers to a live, initialized T in C allocator memory, which is
    // exactly what FreeDelete releases. Nothing else knows about it.
    Ok(unsafe { Owned::from_raw_with_deleter(ptr.as_ptr(), FreeDelete) })
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
#[allow(
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    reason = "tests focus on succinct code and do not need to tick all the boxes"
)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::OwnedArray;

    struct DropCounter(Rc<Cell<usize>>);

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn malloc_owned_holds_value() {
        let mut owned = malloc_owned(41_u64).unwrap();

        *owned += 1;

        assert_eq!(*owned, 42);
    }

    #[test]
    fn drop_runs_destructor_once() {
        let drops = Rc::new(Cell::new(0));

        let owned = malloc_owned(DropCounter(Rc::clone(&drops))).unwrap();
        assert_eq!(drops.get(), 0);

        drop(owned);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn zero_sized_values_are_supported() {
        let owned = malloc_owned(()).unwrap();

        assert!(!owned.is_null());
    }

    #[test]
    fn over_aligned_values_are_rejected() {
        #[repr(align(64))]
        struct CacheLine(#[allow(dead_code, reason = "only the layout matters")] u8);

        let drops = Rc::new(Cell::new(0));

        let result = malloc_owned((CacheLine(0), DropCounter(Rc::clone(&drops))));

        assert!(matches!(
            result,
            Err(Error::UnsupportedAlignment { align: 64, .. })
        ));
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn released_value_can_be_freed_manually() {
        let mut owned = malloc_owned(5_u32).unwrap();

        let raw = owned.release().unwrap();
        drop(owned);

        assert_eq!(unsafe { raw.read() }, 5);
        unsafe { libc::free(raw.as_ptr().cast()) };
    }

    #[test]
    fn free_delete_releases_arrays() {
        let len = 3;
        let first = unsafe { libc::malloc(size_of::<u32>() * len) }.cast::<u32>();
        assert!(!first.is_null());

        for i in 0..len {
            unsafe { first.add(i).write(u32::try_from(i).unwrap() * 10) };
        }

        let raw = ptr::slice_from_raw_parts_mut(first, len);
        let array = unsafe { OwnedArray::from_raw_with_deleter(raw, FreeDelete) };

        assert_eq!(array.as_slice(), &[0, 10, 20]);
    }
}
