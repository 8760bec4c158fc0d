use flowset_core::{BitIter, Idx};

use crate::{Element, ElementIdx, FlowSetError, PackedSet, Result, Universe};

/// Lazy ascending iterator over the elements of a [`PackedSet`].
pub struct Iter<'a, T> {
    universe: &'a Universe<T>,
    bits: BitIter<'a, ElementIdx>,
}

impl<'a, T: Element> Iter<'a, T> {
    pub(crate) fn new(universe: &'a Universe<T>, bits: BitIter<'a, ElementIdx>) -> Self {
        Self { universe, bits }
    }
}

impl<T: Element> Iterator for Iter<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.bits.next().map(|index| self.universe.element(index))
    }
}

impl<T: Element> std::iter::FusedIterator for Iter<'_, T> {}

/// Index-based cursor over a mutably borrowed [`PackedSet`].
///
/// The cursor remembers the dense index it last yielded and scans forward from the following
/// bit, so removing the current element never disturbs its position.
///
/// ```
/// use flowset::{FlowSet, Universe};
///
/// let universe = Universe::new(["a", "b", "c", "d"]);
/// let mut set = universe.empty_set();
/// set.add("a").unwrap();
/// set.add("c").unwrap();
///
/// let mut cursor = set.cursor();
/// while let Some(element) = cursor.next() {
///     if element == "a" {
///         cursor.remove_current().unwrap();
///     }
/// }
/// assert_eq!(set.to_list(), vec!["c"]);
/// ```
pub struct Cursor<'a, T> {
    set: &'a mut PackedSet<T>,
    next: usize,
    current: Option<ElementIdx>,
}

impl<'a, T: Element> Cursor<'a, T> {
    pub(crate) fn new(set: &'a mut PackedSet<T>) -> Self {
        Self { set, next: 0, current: None }
    }

    /// Dense index of the element last yielded, unless it has been removed.
    pub fn current_index(&self) -> Option<usize> {
        self.current.map(Idx::idx)
    }

    /// Clears the bit of the element last yielded and returns that element.
    ///
    /// Fails if nothing has been yielded yet or the current element was already removed.
    pub fn remove_current(&mut self) -> Result<T> {
        let index = self.current.take().ok_or(FlowSetError::NoCurrentElement)?;
        self.set.bits.remove(index);
        Ok(self.set.universe.element(index))
    }
}

impl<T: Element> Iterator for Cursor<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.current = self.set.bits.next_set_from(self.next);
        let index = self.current?;
        self.next = index.idx() + 1;
        Some(self.set.universe.element(index))
    }
}
