use crate::{Element, PackedSet, Result, Universe, UniverseId, fallback};

/// A set-valued dataflow fact.
///
/// The binary operations write into a caller-supplied destination so a fixed-point loop can
/// reuse its buffers. Every operation has an element-wise default in terms of `size`, `clear`,
/// `add`, `remove`, `contains` and `to_list`; representations override them with faster
/// strategies when their operands allow it.
///
/// Rust's borrow rules keep `dest` distinct from `self` and `other`, so the in-place forms
/// (`union_with` and friends) cover the `a = a op b` case.
pub trait FlowSet<T: Element> {
    /// Number of elements in the set.
    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn clear(&mut self);

    /// Adds `element`, returning whether it was newly added.
    fn add(&mut self, element: T) -> Result<bool>;

    /// Removes `element`, returning whether it was present.
    fn remove(&mut self, element: &T) -> bool;

    fn contains(&self, element: &T) -> bool;

    /// The elements of the set in the representation's canonical order.
    fn to_list(&self) -> Vec<T>;

    /// Identity of the universe this set is packed over, if any.
    fn universe_id(&self) -> Option<UniverseId> {
        None
    }

    /// Capability query for the word-parallel representation.
    fn as_packed(&self) -> Option<&PackedSet<T>> {
        None
    }

    fn as_packed_mut(&mut self) -> Option<&mut PackedSet<T>> {
        None
    }

    /// `dest = self ∪ other`
    fn union_into(&self, other: &dyn FlowSet<T>, dest: &mut dyn FlowSet<T>) -> Result<()> {
        fallback::union(self, other, dest)
    }

    /// `dest = self ∩ other`
    fn intersection_into(&self, other: &dyn FlowSet<T>, dest: &mut dyn FlowSet<T>) -> Result<()> {
        fallback::intersection(self, other, dest)
    }

    /// `dest = self \ other`
    fn difference_into(&self, other: &dyn FlowSet<T>, dest: &mut dyn FlowSet<T>) -> Result<()> {
        fallback::difference(self, other, dest)
    }

    /// Overwrites `dest` with the contents of `self`.
    fn copy_into(&self, dest: &mut dyn FlowSet<T>) -> Result<()> {
        fallback::copy(self, dest)
    }

    /// `self = self ∪ other`, returning whether `self` changed.
    fn union_with(&mut self, other: &dyn FlowSet<T>) -> Result<bool> {
        fallback::union_with(self, other)
    }

    /// `self = self ∩ other`, returning whether `self` changed.
    fn intersect_with(&mut self, other: &dyn FlowSet<T>) -> Result<bool> {
        Ok(fallback::intersect_with(self, other))
    }

    /// `self = self \ other`, returning whether `self` changed.
    fn subtract_with(&mut self, other: &dyn FlowSet<T>) -> Result<bool> {
        Ok(fallback::subtract_with(self, other))
    }

    /// Set equality, regardless of representation.
    fn equals(&self, other: &dyn FlowSet<T>) -> bool {
        fallback::equals(self, other)
    }
}

/// A flow set whose elements are drawn from a known finite universe, and which can therefore
/// be complemented.
pub trait BoundedFlowSet<T: Element>: FlowSet<T> {
    fn universe(&self) -> &Universe<T>;

    /// `dest = universe \ self`
    fn complement_into(&self, dest: &mut dyn FlowSet<T>) -> Result<()> {
        fallback::complement(self, self.universe(), dest)
    }
}

/// How a packed set may combine with another operand.
pub enum Operand<'a, T: Element> {
    /// Packed over the same universe: combine word-by-word.
    Sibling(&'a PackedSet<T>),
    /// Any other representation or universe: combine element-by-element.
    Foreign(&'a dyn FlowSet<T>),
}

impl<'a, T: Element> Operand<'a, T> {
    /// Classifies `other` relative to the universe identified by `universe`.
    pub fn classify(universe: UniverseId, other: &'a dyn FlowSet<T>) -> Self {
        match other.as_packed() {
            Some(packed) if packed.universe_id() == Some(universe) => Operand::Sibling(packed),
            _ => Operand::Foreign(other),
        }
    }
}
