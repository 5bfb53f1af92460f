use thiserror::Error;

/// Errors that can occur when allocating a resource for an owning pointer.
///
/// The wrappers themselves never fail; only the C allocator factory
/// [`malloc_owned()`](crate::malloc_owned) reports errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The C allocator returned a null pointer.
    #[error("C allocator could not provide {size} bytes")]
    AllocationFailed {
        /// The number of bytes that were requested.
        size: usize,
    },

    /// The type requires stricter alignment than `malloc()` is guaranteed to provide.
    #[error(
        "type alignment of {align} bytes exceeds the {supported}-byte alignment guaranteed by the C allocator"
    )]
    UnsupportedAlignment {
        /// The alignment required by the type.
        align: usize,

        /// The alignment the C allocator guarantees on this platform.
        supported: usize,
    },
}

/// A specialized `Result` type for `owned_ptr` operations, returning the crate's
/// [`Error`] type as the error value.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(Error: Send, Sync, Debug);

    #[test]
    fn allocation_failed_mentions_size() {
        let error = Error::AllocationFailed { size: 4096 };

        assert!(error.to_string().contains("4096"));
    }

    #[test]
    fn unsupported_alignment_mentions_both_alignments() {
        let error = Error::UnsupportedAlignment {
            align: 64,
            supported: 16,
        };

        let message = error.to_string();
        assert!(message.contains("64"));
        assert!(message.contains("16"));

        let result: Result<()> = Err(error);
        assert!(result.is_err());
    }
}
