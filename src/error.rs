use std::fmt;

/// Errors reported by fallible multiset operations.
///
/// Operations validate their arguments before touching the multiset, so a
/// returned error always means that the multiset was left unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MultisetError {
    /// An argument was outside of the range accepted by the operation, such as
    /// a zero occurence count passed to [`add()`](crate::Multiset::add).
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
    /// A mutation was attempted on a read-only multiset.
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },
}
//
impl MultisetError {
    pub(crate) fn zero_count(name: &'static str) -> Self {
        Self::InvalidArgument {
            name,
            reason: "number of occurences must be positive",
        }
    }

    pub(crate) fn too_many_elements(name: &'static str) -> Self {
        Self::InvalidArgument {
            name,
            reason: "total number of elements would overflow",
        }
    }
}

impl fmt::Display for MultisetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { name, reason } => {
                write!(f, "invalid argument `{name}`: {reason}")
            }
            Self::Unsupported { operation } => {
                write!(f, "`{operation}` is not supported on a read-only multiset")
            }
        }
    }
}

impl std::error::Error for MultisetError {}
