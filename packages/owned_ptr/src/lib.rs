#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Exclusive-ownership smart pointers with pluggable deleters.
//!
//! This package provides two owning pointer types that each hold at most one resource and
//! release it exactly once, through a deleter chosen at compile time:
//!
//! - [`Owned<T, D>`] - owns a single object and dereferences to it.
//! - [`OwnedArray<T, D>`] - owns a whole array and offers indexed element access.
//!
//! Ownership is never duplicated: neither type implements [`Clone`] or [`Copy`]. It can be
//! handed back ([`Owned::release()`]), replaced ([`Owned::reset()`]), moved out of a place
//! ([`Owned::take()`], [`Owned::assign()`]) or exchanged ([`Owned::swap()`], [`swap()`]).
//!
//! # Deleters
//!
//! A [`Deleter`] decides how a resource is released. The deleter must match how the
//! resource was allocated:
//!
//! - [`DefaultDelete`] - single objects allocated with [`Box`] (default for [`Owned`]).
//! - [`DefaultDeleteArray`] - arrays allocated as `Box<[T]>` (default for [`OwnedArray`]).
//! - [`FreeDelete`] - resources allocated by the C allocator, e.g. via [`malloc_owned()`].
//! - Any `FnMut(NonNull<T>)` closure or function, or your own type implementing [`Deleter`].
//!
//! # Examples
//!
//! ```
//! use owned_ptr::{Null, Owned, make_owned};
//!
//! let mut owned = make_owned(42_u32);
//! assert!(owned != Null);
//! assert_eq!(*owned, 42);
//!
//! // Transfer ownership to another place, leaving the original empty.
//! let mut other: Owned<u32> = Owned::new();
//! other.assign(&mut owned);
//! assert!(owned.is_null());
//! assert_eq!(*other, 42);
//!
//! // Dropping `other` releases the value exactly once.
//! ```
//!
//! Custom deleters are supplied at construction:
//!
//! ```
//! use std::ptr::NonNull;
//!
//! use owned_ptr::Owned;
//!
//! let raw = Box::into_raw(Box::new(String::from("custom")));
//!
//! let deleter = |ptr: NonNull<String>| {
//!     // SAFETY: The owner passes us the pointer it adopted below, once.
//!     drop(unsafe { Box::from_raw(ptr.as_ptr()) });
//! };
//!
//! // SAFETY: The pointer came from `Box::into_raw()` and the deleter reverses exactly that.
//! let owned = unsafe { Owned::from_raw_with_deleter(raw, deleter) };
//!
//! assert_eq!(&*owned, "custom");
//! ```

mod deleter;
mod error;
mod free_delete;
mod make;
mod null;
mod owned;
mod owned_array;

pub use deleter::*;
pub use error::*;
pub use free_delete::*;
pub use make::*;
pub use null::*;
pub use owned::*;
pub use owned_array::*;
