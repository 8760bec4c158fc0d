//! Element-wise set algebra that works across any two [`FlowSet`] representations.
//!
//! These are O(N) in the number of elements and are what every operation degrades to when the
//! operands cannot be combined word-by-word. On error, `dest` holds the elements added so far.

use crate::{Element, FlowSet, Result, Universe};

pub fn union<T: Element, A: FlowSet<T> + ?Sized>(
    a: &A,
    b: &dyn FlowSet<T>,
    dest: &mut dyn FlowSet<T>,
) -> Result<()> {
    dest.clear();
    for element in a.to_list().into_iter().chain(b.to_list()) {
        dest.add(element)?;
    }
    Ok(())
}

pub fn intersection<T: Element, A: FlowSet<T> + ?Sized>(
    a: &A,
    b: &dyn FlowSet<T>,
    dest: &mut dyn FlowSet<T>,
) -> Result<()> {
    dest.clear();
    for element in a.to_list() {
        if b.contains(&element) {
            dest.add(element)?;
        }
    }
    Ok(())
}

pub fn difference<T: Element, A: FlowSet<T> + ?Sized>(
    a: &A,
    b: &dyn FlowSet<T>,
    dest: &mut dyn FlowSet<T>,
) -> Result<()> {
    dest.clear();
    for element in a.to_list() {
        if !b.contains(&element) {
            dest.add(element)?;
        }
    }
    Ok(())
}

/// `dest = universe \ a`
pub fn complement<T: Element, A: FlowSet<T> + ?Sized>(
    a: &A,
    universe: &Universe<T>,
    dest: &mut dyn FlowSet<T>,
) -> Result<()> {
    dest.clear();
    for element in universe.elements() {
        if !a.contains(&element) {
            dest.add(element)?;
        }
    }
    Ok(())
}

pub fn copy<T: Element, A: FlowSet<T> + ?Sized>(a: &A, dest: &mut dyn FlowSet<T>) -> Result<()> {
    dest.clear();
    for element in a.to_list() {
        dest.add(element)?;
    }
    Ok(())
}

pub fn equals<T: Element, A: FlowSet<T> + ?Sized>(a: &A, b: &dyn FlowSet<T>) -> bool {
    a.size() == b.size() && a.to_list().iter().all(|element| b.contains(element))
}

pub fn union_with<T: Element, A: FlowSet<T> + ?Sized>(
    a: &mut A,
    b: &dyn FlowSet<T>,
) -> Result<bool> {
    let mut changed = false;
    for element in b.to_list() {
        changed |= a.add(element)?;
    }
    Ok(changed)
}

pub fn intersect_with<T: Element, A: FlowSet<T> + ?Sized>(a: &mut A, b: &dyn FlowSet<T>) -> bool {
    let mut changed = false;
    for element in a.to_list() {
        if !b.contains(&element) {
            changed |= a.remove(&element);
        }
    }
    changed
}

pub fn subtract_with<T: Element, A: FlowSet<T> + ?Sized>(a: &mut A, b: &dyn FlowSet<T>) -> bool {
    let mut changed = false;
    for element in b.to_list() {
        changed |= a.remove(&element);
    }
    changed
}
