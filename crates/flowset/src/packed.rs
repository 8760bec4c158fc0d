use flowset_core::{Idx, PackedBits, WordCountMismatch};
use tracing::{error, trace};

use crate::{
    BoundedFlowSet, Cursor, Element, ElementIdx, FlowSet, FlowSetError, Iter, Operand, Result,
    Universe, UniverseId, fallback,
};

/// A flow set over a fixed universe, stored as one bit per universe element.
///
/// Sets built over the same [`Universe`] combine word-by-word; anything else goes through the
/// element-wise [`fallback`]. Bits at indices that have no registered element are always
/// clear, so `size` and `is_empty` never see padding.
pub struct PackedSet<T> {
    pub(crate) universe: Universe<T>,
    pub(crate) bits: PackedBits<ElementIdx>,
}

impl<T: Element> PackedSet<T> {
    /// Creates an empty set over `universe`.
    pub fn new(universe: &Universe<T>) -> Self {
        Self { universe: universe.clone(), bits: PackedBits::new_empty(universe.size()) }
    }

    pub fn from_elements(
        universe: &Universe<T>,
        elements: impl IntoIterator<Item = T>,
    ) -> Result<Self> {
        let mut set = Self::new(universe);
        for element in elements {
            set.add(element)?;
        }
        Ok(set)
    }

    /// A new empty set over the same universe.
    pub fn empty_set(&self) -> Self {
        Self::new(&self.universe)
    }

    #[inline]
    pub fn universe_handle(&self) -> &Universe<T> {
        &self.universe
    }

    pub fn contains_index(&self, index: usize) -> bool {
        index < self.bits.domain_size() && self.bits.contains(ElementIdx::from_usize(index))
    }

    /// Adds the element already registered at dense `index`.
    pub fn add_index(&mut self, index: usize) -> Result<bool> {
        let registered = self.universe.registered();
        if index >= registered {
            return Err(FlowSetError::IndexOutOfRange { index, size: self.universe.size() });
        }
        Ok(self.bits.insert(ElementIdx::from_usize(index)))
    }

    /// Elements whose dense index lies in `low..=high`, in ascending index order.
    ///
    /// An inverted range yields no elements. `high` must lie inside the universe.
    pub fn to_list_range(&self, low: usize, high: usize) -> Result<Vec<T>> {
        if low > high {
            return Ok(Vec::new());
        }
        let size = self.universe.size();
        if high >= size {
            return Err(FlowSetError::IndexOutOfRange { index: high, size });
        }
        Ok(self.universe.resolve(self.bits.iter_range(low, high)))
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.universe, self.bits.iter())
    }

    /// A cursor that can remove the element it last yielded.
    #[inline]
    pub fn cursor(&mut self) -> Cursor<'_, T> {
        Cursor::new(self)
    }

    pub fn complement_in_place(&mut self) {
        self.bits.complement_in_place(self.universe.registered());
    }

    /// Returns `dest` as a packed set if it shares our universe.
    fn sibling_mut<'d>(&self, dest: &'d mut (dyn FlowSet<T> + '_)) -> Option<&'d mut PackedSet<T>> {
        let id = self.universe.id();
        dest.as_packed_mut().filter(|dest| dest.universe.id() == id)
    }

    #[cold]
    fn inconsistent(&self, mismatch: WordCountMismatch) -> FlowSetError {
        error!(
            universe = ?self.universe.id(),
            expected = mismatch.expected,
            found = mismatch.found,
            "packed storage disagrees with its universe"
        );
        mismatch.into()
    }
}

impl<T: Element> FlowSet<T> for PackedSet<T> {
    #[inline]
    fn size(&self) -> usize {
        self.bits.count()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    #[inline]
    fn clear(&mut self) {
        self.bits.clear();
    }

    fn add(&mut self, element: T) -> Result<bool> {
        let index = self.universe.register_or_lookup(element)?;
        Ok(self.bits.insert(index))
    }

    fn remove(&mut self, element: &T) -> bool {
        match self.universe.lookup(element) {
            Some(index) => self.bits.remove(index),
            None => false,
        }
    }

    fn contains(&self, element: &T) -> bool {
        self.universe.lookup(element).is_some_and(|index| self.bits.contains(index))
    }

    fn to_list(&self) -> Vec<T> {
        self.universe.resolve(self.bits.iter())
    }

    fn universe_id(&self) -> Option<UniverseId> {
        Some(self.universe.id())
    }

    fn as_packed(&self) -> Option<&PackedSet<T>> {
        Some(self)
    }

    fn as_packed_mut(&mut self) -> Option<&mut PackedSet<T>> {
        Some(self)
    }

    fn union_into(&self, other: &dyn FlowSet<T>, dest: &mut dyn FlowSet<T>) -> Result<()> {
        if let Operand::Sibling(other) = Operand::classify(self.universe.id(), other) {
            if let Some(dest) = self.sibling_mut(dest) {
                return dest
                    .bits
                    .union_of(&self.bits, &other.bits)
                    .map_err(|e| self.inconsistent(e));
            }
        }
        trace!(op = "union", "operands span universes, combining element-wise");
        fallback::union(self, other, dest)
    }

    fn intersection_into(&self, other: &dyn FlowSet<T>, dest: &mut dyn FlowSet<T>) -> Result<()> {
        if let Operand::Sibling(other) = Operand::classify(self.universe.id(), other) {
            if let Some(dest) = self.sibling_mut(dest) {
                return dest
                    .bits
                    .intersection_of(&self.bits, &other.bits)
                    .map_err(|e| self.inconsistent(e));
            }
        }
        trace!(op = "intersection", "operands span universes, combining element-wise");
        fallback::intersection(self, other, dest)
    }

    fn difference_into(&self, other: &dyn FlowSet<T>, dest: &mut dyn FlowSet<T>) -> Result<()> {
        if let Operand::Sibling(other) = Operand::classify(self.universe.id(), other) {
            if let Some(dest) = self.sibling_mut(dest) {
                return dest
                    .bits
                    .difference_of(&self.bits, &other.bits)
                    .map_err(|e| self.inconsistent(e));
            }
        }
        trace!(op = "difference", "operands span universes, combining element-wise");
        fallback::difference(self, other, dest)
    }

    fn copy_into(&self, dest: &mut dyn FlowSet<T>) -> Result<()> {
        if let Some(dest) = self.sibling_mut(dest) {
            return dest.bits.copy_from(&self.bits).map_err(|e| self.inconsistent(e));
        }
        trace!(op = "copy", "destination spans universes, copying element-wise");
        fallback::copy(self, dest)
    }

    fn union_with(&mut self, other: &dyn FlowSet<T>) -> Result<bool> {
        match Operand::classify(self.universe.id(), other) {
            Operand::Sibling(other) => {
                self.bits.union_with(&other.bits).map_err(|e| self.inconsistent(e))
            }
            Operand::Foreign(other) => fallback::union_with(self, other),
        }
    }

    fn intersect_with(&mut self, other: &dyn FlowSet<T>) -> Result<bool> {
        match Operand::classify(self.universe.id(), other) {
            Operand::Sibling(other) => {
                self.bits.intersect_with(&other.bits).map_err(|e| self.inconsistent(e))
            }
            Operand::Foreign(other) => Ok(fallback::intersect_with(self, other)),
        }
    }

    fn subtract_with(&mut self, other: &dyn FlowSet<T>) -> Result<bool> {
        match Operand::classify(self.universe.id(), other) {
            Operand::Sibling(other) => {
                self.bits.subtract_with(&other.bits).map_err(|e| self.inconsistent(e))
            }
            Operand::Foreign(other) => Ok(fallback::subtract_with(self, other)),
        }
    }

    fn equals(&self, other: &dyn FlowSet<T>) -> bool {
        match Operand::classify(self.universe.id(), other) {
            Operand::Sibling(other) => self.bits == other.bits,
            Operand::Foreign(other) => fallback::equals(self, other),
        }
    }
}

impl<T: Element> BoundedFlowSet<T> for PackedSet<T> {
    fn universe(&self) -> &Universe<T> {
        &self.universe
    }

    fn complement_into(&self, dest: &mut dyn FlowSet<T>) -> Result<()> {
        let registered = self.universe.registered();
        if let Some(dest) = self.sibling_mut(dest) {
            return dest
                .bits
                .complement_of(&self.bits, registered)
                .map_err(|e| self.inconsistent(e));
        }
        trace!(op = "complement", "destination spans universes, complementing element-wise");
        fallback::complement(self, &self.universe, dest)
    }
}

impl<T> Clone for PackedSet<T> {
    fn clone(&self) -> Self {
        Self { universe: self.universe.clone(), bits: self.bits.clone() }
    }
}

impl<T: Element> PartialEq for PackedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl<T: Element> Eq for PackedSet<T> {}

impl<T: Element + std::fmt::Debug> std::fmt::Debug for PackedSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T: Element> IntoIterator for &'a PackedSet<T> {
    type Item = T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
