use crate::{Element, FlowSet, Result};

/// An unbounded flow set backed by a plain vector, kept in insertion order.
///
/// Every operation is element-wise. Useful when the universe is not known up front, and as the
/// foreign operand that forces a [`PackedSet`](crate::PackedSet) onto its fallback path.
#[derive(Clone)]
pub struct SparseSet<T> {
    elements: Vec<T>,
}

impl<T: Element> SparseSet<T> {
    pub fn new() -> Self {
        Self { elements: Vec::new() }
    }
}

impl<T: Element> Default for SparseSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Element> FlowSet<T> for SparseSet<T> {
    #[inline]
    fn size(&self) -> usize {
        self.elements.len()
    }

    fn clear(&mut self) {
        self.elements.clear();
    }

    fn add(&mut self, element: T) -> Result<bool> {
        if self.elements.contains(&element) {
            return Ok(false);
        }
        self.elements.push(element);
        Ok(true)
    }

    fn remove(&mut self, element: &T) -> bool {
        match self.elements.iter().position(|e| e == element) {
            Some(position) => {
                self.elements.remove(position);
                true
            }
            None => false,
        }
    }

    fn contains(&self, element: &T) -> bool {
        self.elements.contains(element)
    }

    fn to_list(&self) -> Vec<T> {
        self.elements.clone()
    }
}

impl<T: Element> FromIterator<T> for SparseSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        for element in iter {
            if !set.elements.contains(&element) {
                set.elements.push(element);
            }
        }
        set
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SparseSet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(&self.elements).finish()
    }
}
