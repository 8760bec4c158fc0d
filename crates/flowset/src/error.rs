use flowset_core::WordCountMismatch;
use thiserror::Error;

/// Errors that can occur when operating on flow sets.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowSetError {
    /// Two sets over the same universe disagreed on their storage length. Only reachable if
    /// storage was built for a different universe size than its mapper reports.
    #[error("inconsistent packed storage: {0}")]
    StorageMismatch(#[from] WordCountMismatch),

    #[error("universe is full: cannot register another element beyond {capacity}")]
    UniverseExhausted { capacity: usize },

    #[error("index {index} is outside the universe of size {size}")]
    IndexOutOfRange { index: usize, size: usize },

    /// The cursor has not yielded an element, or its current element was already removed.
    #[error("cursor has no current element to remove")]
    NoCurrentElement,
}

/// A specialized Result type for flow set operations
pub type Result<T> = std::result::Result<T, FlowSetError>;
