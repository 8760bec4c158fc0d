use thiserror::Error;

/// Two packed bit buffers combined word-by-word did not have the same number of words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("word count mismatch: expected {expected} words, found {found}")]
pub struct WordCountMismatch {
    pub expected: usize,
    pub found: usize,
}
