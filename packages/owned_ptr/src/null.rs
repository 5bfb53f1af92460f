/// Sentinel standing for "no resource" in comparisons and conversions.
///
/// Comparing an owning pointer with `Null` is equivalent to calling its `is_null()` method,
/// and converting `Null` into an owning pointer produces an empty one.
///
/// # Examples
///
/// ```
/// use owned_ptr::{Null, Owned, make_owned};
///
/// let empty: Owned<u32> = Null.into();
/// assert!(empty == Null);
///
/// let full = make_owned(1_u32);
/// assert!(full != Null);
/// assert!(Null != full);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Null;
