use std::error::Error;
use std::fmt;

/// Errors raised while compiling a pattern set into a tree.
///
/// Dispatch never fails; an input that matches no pattern is a normal
/// `None` result, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildError {
    /// Some subset of more than 16 patterns cannot be separated: within
    /// that subset, every cared bit is unanimous or wildcard. Also raised
    /// when a non-empty pattern set has no cared bit at all.
    InvalidInput,
    /// An allocation failed while growing one of the tables.
    OutOfMemory,
    /// The compiled tree would need more than 65536 nodes or buckets,
    /// which the 16-bit child indices cannot address.
    CapacityExceeded,
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::InvalidInput => write!(f, "pattern set has no separating bit"),
            BuildError::OutOfMemory => write!(f, "allocation failed during tree construction"),
            BuildError::CapacityExceeded => {
                write!(f, "pattern set exceeds the 65536 node/bucket limit")
            }
        }
    }
}

impl Error for BuildError {}
