use std::{
    cell::RefCell,
    hash::Hash,
    num::NonZero,
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
};

use flowset_core::{Idx, IndexMapper, newtype_index};
use tracing::{debug, trace};

use crate::{FlowSetError, PackedSet, Result};

/// Anything that can be a member of a flow set.
pub trait Element: Clone + Eq + Hash {}

impl<T: Clone + Eq + Hash> Element for T {}

newtype_index! {
    /// Dense index of an element within its universe.
    pub struct ElementIdx;
}

/// Opaque identity of a universe. Two sets can combine word-by-word iff their ids match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniverseId(NonZero<u64>);

impl UniverseId {
    fn fresh() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        let id = NEXT.fetch_add(1, Ordering::Relaxed);
        Self(NonZero::new(id).expect("universe id counter wrapped"))
    }
}

struct UniverseInner<T> {
    id: UniverseId,
    mapper: RefCell<IndexMapper<ElementIdx, T>>,
}

/// A shared handle to a finite universe of elements and its element <-> index mapping.
///
/// Cloning the handle is cheap and shares the mapping; every [`PackedSet`] holds one. The
/// universe size is fixed at construction. A universe built with [`Universe::with_capacity`]
/// starts empty and registers elements on first [`Universe::register_or_lookup`], which is the
/// only operation that mutates the shared mapping.
pub struct Universe<T> {
    inner: Rc<UniverseInner<T>>,
}

impl<T: Element> Universe<T> {
    /// Creates a fully populated universe over the distinct `elements`, in iteration order.
    pub fn new(elements: impl IntoIterator<Item = T>) -> Self {
        Self::from_mapper(IndexMapper::from_elements(elements))
    }

    /// Creates a universe of `size` elements that are registered lazily.
    pub fn with_capacity(size: usize) -> Self {
        Self::from_mapper(IndexMapper::with_capacity(size))
    }

    fn from_mapper(mapper: IndexMapper<ElementIdx, T>) -> Self {
        let id = UniverseId::fresh();
        debug!(
            universe = ?id,
            size = mapper.capacity(),
            registered = mapper.len(),
            "created universe"
        );
        Self { inner: Rc::new(UniverseInner { id, mapper: RefCell::new(mapper) }) }
    }

    #[inline]
    pub fn id(&self) -> UniverseId {
        self.inner.id
    }

    /// The universe size `N`.
    pub fn size(&self) -> usize {
        self.inner.mapper.borrow().capacity()
    }

    /// Number of elements that have been assigned an index. Equals [`Universe::size`] for a
    /// universe built with [`Universe::new`].
    pub fn registered(&self) -> usize {
        self.inner.mapper.borrow().len()
    }

    /// Returns the dense index of `element` without registering it.
    pub fn lookup(&self, element: &T) -> Option<ElementIdx> {
        self.inner.mapper.borrow().lookup(element)
    }

    pub fn contains(&self, element: &T) -> bool {
        self.lookup(element).is_some()
    }

    /// Returns the dense index of `element`, assigning the next free index if it is unseen.
    pub fn register_or_lookup(&self, element: T) -> Result<ElementIdx> {
        let mut mapper = self.inner.mapper.borrow_mut();
        let before = mapper.len();
        let capacity = mapper.capacity();
        let index = mapper
            .register_or_lookup(element)
            .ok_or(FlowSetError::UniverseExhausted { capacity })?;
        if mapper.len() != before {
            trace!(universe = ?self.inner.id, index = index.get(), "registered element");
        }
        Ok(index)
    }

    /// Returns the element at dense `index`.
    pub fn element_at(&self, index: usize) -> Result<T> {
        let mapper = self.inner.mapper.borrow();
        if index >= mapper.len() {
            return Err(FlowSetError::IndexOutOfRange { index, size: mapper.capacity() });
        }
        Ok(mapper[ElementIdx::from_usize(index)].clone())
    }

    /// Every registered element in index order.
    pub fn elements(&self) -> Vec<T> {
        self.inner.mapper.borrow().elements().to_vec()
    }

    /// Creates an empty set over this universe.
    pub fn empty_set(&self) -> PackedSet<T> {
        PackedSet::new(self)
    }

    /// Maps indices of set bits back to elements under a single borrow of the mapping.
    pub(crate) fn resolve(&self, indices: impl Iterator<Item = ElementIdx>) -> Vec<T> {
        let mapper = self.inner.mapper.borrow();
        indices.map(|i| mapper[i].clone()).collect()
    }

    pub(crate) fn element(&self, index: ElementIdx) -> T {
        self.inner.mapper.borrow()[index].clone()
    }
}

impl<T> Clone for Universe<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T> std::fmt::Debug for Universe<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mapper = self.inner.mapper.borrow();
        f.debug_struct("Universe")
            .field("id", &self.inner.id)
            .field("size", &mapper.capacity())
            .field("registered", &mapper.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_indexes_in_order() {
        let universe = Universe::new(["a", "b", "c", "d"]);

        assert_eq!(universe.size(), 4);
        assert_eq!(universe.registered(), 4);
        assert_eq!(universe.lookup(&"c").map(Idx::get), Some(2));
        assert_eq!(universe.element_at(3), Ok("d"));
        assert_eq!(universe.elements(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let universe = Universe::new([1, 2, 1, 3, 2]);
        assert_eq!(universe.size(), 3);
        assert_eq!(universe.elements(), vec![1, 2, 3]);
    }

    #[test]
    fn test_lookup_is_pure() {
        let universe = Universe::<&str>::with_capacity(2);
        assert_eq!(universe.lookup(&"x"), None);
        assert!(!universe.contains(&"x"));
        assert_eq!(universe.registered(), 0);
    }

    #[test]
    fn test_lazy_registration() {
        let universe = Universe::with_capacity(2);

        let x = universe.register_or_lookup("x").unwrap();
        let y = universe.register_or_lookup("y").unwrap();
        assert_eq!((x.get(), y.get()), (0, 1));
        assert_eq!(universe.register_or_lookup("x"), Ok(x));
        assert_eq!(universe.registered(), 2);

        assert_eq!(
            universe.register_or_lookup("z"),
            Err(FlowSetError::UniverseExhausted { capacity: 2 })
        );
    }

    #[test]
    fn test_element_at_unassigned() {
        let universe = Universe::with_capacity(4);
        universe.register_or_lookup('q').unwrap();

        assert_eq!(universe.element_at(0), Ok('q'));
        let out_of_range = |index| FlowSetError::IndexOutOfRange { index, size: 4 };
        assert_eq!(universe.element_at(1), Err(out_of_range(1)));
        assert_eq!(universe.element_at(99), Err(out_of_range(99)));
    }

    #[test]
    fn test_debug_reports_occupancy() {
        let universe = Universe::with_capacity(3);
        universe.register_or_lookup("only").unwrap();

        let rendered = format!("{universe:?}");
        assert!(rendered.starts_with("Universe { id: UniverseId("), "{rendered}");
        assert!(rendered.ends_with("size: 3, registered: 1 }"), "{rendered}");
    }

    #[test]
    fn test_identity() {
        let a = Universe::new([1, 2]);
        let b = Universe::new([1, 2]);

        assert_eq!(a.id(), a.clone().id());
        assert_ne!(a.id(), b.id());
    }
}
