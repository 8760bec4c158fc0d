use std::marker::PhantomData;

use crate::Idx;
use allocator_api2::{
    alloc::{Allocator, Global},
    vec::Vec,
};

/// Append-only storage addressed by a typed dense index rather than `usize`.
///
/// Elements are never removed or reordered, so an index handed out by [`IndexVec::push`] stays
/// valid for the life of the vector.
pub struct IndexVec<I: Idx, T, A: Allocator = Global> {
    raw: Vec<T, A>,
    _index: PhantomData<I>,
}

impl<I: Idx, T> IndexVec<I, T, Global> {
    pub fn new() -> Self {
        Self::new_in(Global)
    }
}

impl<I: Idx, T> Default for IndexVec<I, T, Global> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Idx, T, A: Allocator> IndexVec<I, T, A> {
    pub fn new_in(alloc: A) -> Self {
        Self { raw: Vec::new_in(alloc), _index: PhantomData }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Appends `element` and returns the index it was stored at.
    pub fn push(&mut self, element: T) -> I {
        let index = I::from_usize(self.raw.len());
        self.raw.push(element);
        index
    }

    #[inline]
    pub fn as_raw_slice(&self) -> &[T] {
        self.raw.as_slice()
    }
}

impl<I: Idx, T: std::fmt::Debug, A: Allocator> std::fmt::Debug for IndexVec<I, T, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.raw.iter()).finish()
    }
}

impl<I: Idx, T, A: Allocator> std::ops::Index<I> for IndexVec<I, T, A> {
    type Output = T;

    fn index(&self, index: I) -> &Self::Output {
        &self.raw[index.idx()]
    }
}
