//! Flow sets for dataflow analyses.
//!
//! A [`Universe`] fixes the finite set of elements an analysis reasons about and assigns each a
//! dense index. [`PackedSet`]s over the same universe store one bit per element and combine a
//! machine word at a time; combining with any other [`FlowSet`] falls back to element-wise
//! operations.

mod error;
pub mod fallback;
mod flow_set;
mod iter;
mod packed;
mod sparse;
mod universe;

pub use crate::{
    error::{FlowSetError, Result},
    flow_set::{BoundedFlowSet, FlowSet, Operand},
    iter::{Cursor, Iter},
    packed::PackedSet,
    sparse::SparseSet,
    universe::{Element, ElementIdx, Universe, UniverseId},
};
