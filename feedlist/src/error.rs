use alloc::string::String;

/// Result alias for fallible [`crate::ContentList`] operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Argument errors reported by the store primitives and the reconciler.
///
/// Every error is a caller bug: the call that returned it left the list untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("range {start}..{start}+{count} is out of bounds for a list of length {len}")]
    RangeOutOfBounds {
        start: usize,
        count: usize,
        len: usize,
    },

    #[error("duplicate content key {key:?}")]
    DuplicateKey { key: String },

    #[error("content keys must not be empty")]
    EmptyKey,
}

impl Error {
    pub(crate) fn duplicate_key(key: &str) -> Self {
        Self::DuplicateKey { key: key.into() }
    }
}
