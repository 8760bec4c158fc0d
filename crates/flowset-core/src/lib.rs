pub mod bits;
pub mod error;
pub mod index;
pub mod index_vec;
pub mod mapper;

pub use crate::{
    bits::{BitIter, PackedBits, WORD_BITS, Word},
    error::WordCountMismatch,
    index::Idx,
    index_vec::IndexVec,
    mapper::IndexMapper,
};

/// Core crate assumption.
const _USIZE_AT_LEAST_U32: () = const {
    assert!(u32::BITS <= usize::BITS);
};
