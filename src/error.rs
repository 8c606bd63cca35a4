//! Error types for tree access through cursors.
//!
//! This module contains the [`Error`] type returned by every fallible cursor
//! operation. Reads never fail: a missing key, or a key holding a different
//! kind, is reported as `None`. Errors are reserved for contract violations
//! the caller is expected to handle.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use nbt_tree::{Anchor, Error, MemoryAnchor, Tag};
//!
//! let anchor = Arc::new(MemoryAnchor::new("item"));
//! let root = anchor.root();
//! let list = root.get_list("lore", Tag::String).unwrap();
//!
//! match list.append(42i32) {
//!     Err(Error::ElementMismatch { expected, actual, .. }) => {
//!         assert_eq!(expected, Tag::String);
//!         assert_eq!(actual, Tag::Int);
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

use std::fmt::{self, Display};

use crate::{Path, Tag};

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// This type represents all possible errors that can occur when writing
/// through a cursor, working with a list, or using object adapters.
#[derive(Debug)]
pub enum Error {
    /// A free-form failure reported by an anchor or an adapter codec.
    Message(String),

    /// The key is empty, or its modified UTF-8 encoding is longer than
    /// [`MAX_KEY_LEN`](crate::MAX_KEY_LEN) bytes.
    InvalidKey(String),

    /// The key exists but does not hold the requested container kind.
    KindMismatch {
        key: String,
        expected: Tag,
        actual: Tag,
    },

    /// A list already declares a different element kind than the one
    /// requested or offered.
    ElementMismatch {
        key: String,
        expected: Tag,
        actual: Tag,
    },

    IndexOutOfBounds { index: usize, len: usize },

    /// No adapter is registered for the named Rust type.
    NoAdapter(&'static str),

    /// The stored object was written by a different adapter.
    AdapterMismatch {
        key: String,
        expected: String,
        actual: String,
    },

    /// The anchor owning the tree has been dropped while a cursor into it
    /// was still in use.
    ///
    /// This never happens in correct usage: cursors must not outlive their
    /// anchor.
    Detached(Path),
}

impl Error {
    /// Names the list an element-kind mismatch was raised for.
    pub(crate) fn in_list(self, name: &str) -> Self {
        match self {
            Error::ElementMismatch {
                expected, actual, ..
            } => Error::ElementMismatch {
                key: name.to_owned(),
                expected,
                actual,
            },
            other => other,
        }
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Message(message) => formatter.write_str(message),
            Error::InvalidKey(key) => write!(formatter, "invalid compound key: {key:?}"),
            Error::KindMismatch {
                key,
                expected,
                actual,
            } => write!(
                formatter,
                "kind mismatch for key {key:?}: expected {expected}, got {actual}"
            ),
            Error::ElementMismatch {
                key,
                expected,
                actual,
            } => write!(
                formatter,
                "element kind mismatch in list {key:?}: expected {expected}, got {actual}"
            ),
            Error::IndexOutOfBounds { index, len } => {
                write!(formatter, "index {index} out of bounds for list of length {len}")
            }
            Error::NoAdapter(type_name) => {
                write!(formatter, "no adapter registered for type {type_name}")
            }
            Error::AdapterMismatch {
                key,
                expected,
                actual,
            } => write!(
                formatter,
                "object under key {key:?} was stored as {actual:?}, not {expected:?}"
            ),
            Error::Detached(path) => {
                write!(formatter, "cursor at {path} outlived its anchor")
            }
        }
    }
}

impl std::error::Error for Error {}
