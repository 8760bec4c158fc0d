use crate::{Idx, IndexVec};
use hashbrown::{DefaultHashBuilder, HashTable, hash_table::Entry};
use std::hash::{BuildHasher, Hash};

/// Bidirectional map between elements and dense indices `0..capacity`.
///
/// Indices are handed out in registration order and never reused. Once `capacity` elements are
/// registered, unseen elements are rejected.
pub struct IndexMapper<I: Idx, T> {
    elements: IndexVec<I, T>,
    element_to_idx: HashTable<I>,
    hasher: DefaultHashBuilder,
    capacity: usize,
}

impl<I: Idx, T: Hash + Eq> IndexMapper<I, T> {
    /// Creates an empty mapper that accepts up to `capacity` distinct elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: IndexVec::default(),
            element_to_idx: HashTable::new(),
            hasher: DefaultHashBuilder::default(),
            capacity,
        }
    }

    /// Creates a full mapper over the distinct `elements`, indexed in first-occurrence order.
    pub fn from_elements(elements: impl IntoIterator<Item = T>) -> Self {
        let mut mapper = Self::with_capacity(usize::MAX);
        for element in elements {
            mapper.register_or_lookup(element);
        }
        mapper.capacity = mapper.len();
        mapper
    }

    /// Returns the index of `element` without registering it.
    pub fn lookup(&self, element: &T) -> Option<I> {
        let hash = self.hasher.hash_one(element);
        self.element_to_idx.find(hash, |&i| self.elements[i] == *element).copied()
    }

    /// Returns the index of `element`, registering it first if unseen.
    ///
    /// Returns `None` only if `element` is unseen and the mapper is already at capacity.
    pub fn register_or_lookup(&mut self, element: T) -> Option<I> {
        let entry = self.element_to_idx.entry(
            self.hasher.hash_one(&element),
            |&i| self.elements[i] == element,
            |&i| self.hasher.hash_one(&self.elements[i]),
        );
        match entry {
            Entry::Occupied(i) => Some(*i.get()),
            Entry::Vacant(vacant) => {
                if self.elements.len() >= self.capacity {
                    return None;
                }
                let new_index = self.elements.push(element);
                vacant.insert(new_index);
                Some(new_index)
            }
        }
    }
}

impl<I: Idx, T> IndexMapper<I, T> {
    /// Maximum number of elements this mapper can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of elements registered so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Registered elements in index order.
    #[inline]
    pub fn elements(&self) -> &[T] {
        self.elements.as_raw_slice()
    }
}

impl<I: Idx, T> std::ops::Index<I> for IndexMapper<I, T> {
    type Output = T;

    fn index(&self, index: I) -> &Self::Output {
        &self.elements[index]
    }
}

impl<I: Idx, T: std::fmt::Debug> std::fmt::Debug for IndexMapper<I, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexMapper")
            .field("capacity", &self.capacity)
            .field("elements", &self.elements)
            .finish()
    }
}
